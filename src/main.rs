use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use xre_tiff::get_metadata;
use xre_tiff::logger::{self, info};

fn main() -> Result<()> {
    logger::init();

    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        bail!("usage: xre-tiff-info <file.tif>...");
    }

    info!("Inspecting {} file(s)", paths.len());

    for path in &paths {
        let metadata = get_metadata(path)
            .with_context(|| format!("read metadata {}", path.display()))?;

        println!(
            "{}: {}x{} {} slope={} offset={}",
            path.display(),
            metadata.width,
            metadata.height,
            metadata.dtype,
            metadata.slope,
            metadata.offset
        );
    }

    Ok(())
}
