use anyhow::Result;
use gltut::tutorials::tut05::Cube;

fn main() -> Result<()> {
    gltut::run::<Cube>()
}
