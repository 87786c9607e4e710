use anyhow::Result;
use gltut::tutorials::tut03::FadingTriangle;

fn main() -> Result<()> {
    gltut::run::<FadingTriangle>()
}
