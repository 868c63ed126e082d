use std::fs::File;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use flate2::write::GzEncoder;
use flate2::Compression;

const RES_ARCHIVE: &str = "res.tar.gz";

fn env_path(key: &str) -> io::Result<PathBuf> {
    env::var(key)
        .map(PathBuf::from)
        .map_err(|e| io::Error::new(io::ErrorKind::NotFound, format!("{} is not set: {}", key, e)))
}

/// Packs `res_dir` so folio-tool can unpack a complete site on bootstrap.
fn pack_resources(res_dir: &Path, archive_path: &Path) -> io::Result<()> {
    let _ = fs::remove_file(archive_path);

    let enc = GzEncoder::new(File::create(archive_path)?, Compression::default());
    let mut tar = tar::Builder::new(enc);
    tar.append_dir_all(".", res_dir)?;
    tar.into_inner()?.finish()?;
    Ok(())
}

fn main() -> io::Result<()> {
    let res_dir = env_path("CARGO_MANIFEST_DIR")?.join("res");
    let archive_path = env_path("OUT_DIR")?.join(RES_ARCHIVE);

    println!("cargo:rerun-if-changed={}", res_dir.display());
    pack_resources(&res_dir, &archive_path)
}
