use anyhow::Result;
use gltut::tutorials::tut01::Triangle;

fn main() -> Result<()> {
    gltut::run::<Triangle>()
}
