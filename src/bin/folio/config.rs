use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use folio::config::{read_config, Config};

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()));
    if let Some(exe_dir) = exe_dir {
        if exe_dir.join(CFG_FILE_NAME).exists() {
            return Some(exe_dir.join(CFG_FILE_NAME));
        }
    }

    if let Ok(cur_dir) = env::current_dir() {
        if cur_dir.join(CFG_FILE_NAME).exists() {
            return Some(cur_dir.join(CFG_FILE_NAME));
        }
    }

    let cfg_file = dirs::config_dir()?.join(CFG_FILE_NAME);
    if cfg_file.exists() {
        return Some(cfg_file);
    }

    None
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    let config_path = match cfg_path.or_else(get_config_path) {
        Some(path) => path,
        None => return Err(anyhow!("Could not find Folio configuration ({})", CFG_FILE_NAME)),
    };

    println!("Reading config from {}", config_path.display());
    let mut config = read_config(&config_path)
        .with_context(|| format!("Unable to load {}", config_path.display()))?;

    if let Some(mut log) = config.log {
        if log.location.is_none() {
            log.location = dirs::cache_dir().map(|dir| dir.join("Folio").join("log").join("server.log"));
        }
        match log.location {
            Some(ref location) => println!("Log enabled. Files will be written in {}", location.display()),
            None => println!("Log enabled. No cache dir found, using stdout"),
        }
        config.log = Some(log);
    } else {
        println!("Log disabled. Using stdout");
    }

    println!("Assets served from {}, uploads stored in {}",
             config.assets.base_url, config.paths.uploads_dir.display());

    Ok(config)
}
