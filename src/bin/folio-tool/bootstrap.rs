use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use regex::Regex;
use uuid::Uuid;

use crate::decompress::decompress_files;
use crate::BootstrapArgs;

const CFG_FILE_NAME: &str = "folio.toml";
const SAMPLE_PASSWORD: &str = "change-me";

fn get_sample_cfg() -> &'static str {
    include_str!("../../../folio.toml")
}

/// Points every `*_dir` entry of the sample config at `prefix`.
fn replace_paths(prefix: &Path, config_data: &str) -> String {
    let prefix = prefix.to_string_lossy();
    let prefix = prefix.trim_end_matches('/');

    let dir_regex = Regex::new(r#"(?m)^(?P<key>\w+_dir) = "(?:res/)?(?P<name>\w+)""#).unwrap();
    dir_regex.replace_all(config_data, |captures: &regex::Captures| {
        format!(r#"{} = "{}/{}""#, &captures["key"], prefix, &captures["name"])
    }).to_string()
}

fn replace_password(config_data: &str, password: &str) -> String {
    config_data.replace(&format!(r#"password = "{}""#, SAMPLE_PASSWORD), &format!(r#"password = "{}""#, password))
}

fn write_folio_cfg(out_dir: &Path, password: &str) -> Result<()> {
    let sample_cfg = replace_paths(out_dir, get_sample_cfg());
    let sample_cfg = replace_password(&sample_cfg, password);

    let cfg_path = out_dir.join(CFG_FILE_NAME);
    fs::write(&cfg_path, sample_cfg).with_context(|| format!("Error writing {}", cfg_path.display()))
}

pub fn bootstrap_cmd(args: BootstrapArgs) -> Result<()> {
    let out_path = fs::canonicalize(&args.out_dir)
        .with_context(|| format!("Error converting path to absolute: {}", &args.out_dir))?;

    if !out_path.is_dir() {
        bail!("Output path must be a directory: {}", out_path.display());
    }

    decompress_files(&out_path).context("Error unpacking site resources")?;
    fs::create_dir_all(out_path.join("uploads"))?;

    let password = Uuid::new_v4().simple().to_string();
    write_folio_cfg(&out_path, &password)?;

    println!("Site created in {}", out_path.display());
    println!("Admin password: {}", password);
    Ok(())
}
