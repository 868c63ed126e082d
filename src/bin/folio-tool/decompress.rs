use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;

const RES_ARCHIVE: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/res.tar.gz"));

/// Unpacks the bundled `res` tree (templates and public files) into `output`.
pub fn decompress_files(output: &Path) -> std::io::Result<()> {
    let tar = GzDecoder::new(RES_ARCHIVE);
    let mut archive = Archive::new(tar);
    archive.unpack(output)?;

    Ok(())
}
