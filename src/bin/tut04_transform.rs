use anyhow::Result;
use gltut::tutorials::tut04::TransformedTriangle;

fn main() -> Result<()> {
    gltut::run::<TransformedTriangle>()
}
