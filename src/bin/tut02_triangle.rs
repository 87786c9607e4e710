use anyhow::Result;
use gltut::tutorials::tut02::FileTriangle;

fn main() -> Result<()> {
    gltut::run::<FileTriangle>()
}
