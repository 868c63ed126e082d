use std::io::ErrorKind;
use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;

#[derive(Deserialize)]
pub struct Site {
    pub owner: String,
}

#[derive(Deserialize)]
pub struct Paths {
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
    pub data_dir: PathBuf,
    pub uploads_dir: PathBuf,
}

#[derive(Deserialize)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct Admin {
    pub password: String,
}

pub const DEFAULT_ASSETS_BASE_URL: &str = "/uploads";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Deserialize)]
pub struct Assets {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for Assets {
    fn default() -> Self {
        Assets {
            base_url: default_base_url(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_ASSETS_BASE_URL.to_string()
}

fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

#[derive(Deserialize)]
pub struct Contact {
    pub enabled: bool,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    pub server: Server,
    pub admin: Admin,
    #[serde(default)]
    pub assets: Assets,
    pub contact: Option<Contact>,
    pub log: Option<Log>,
}

impl Config {
    pub fn contact_enabled(&self) -> bool {
        self.contact.as_ref().map(|c| c.enabled).unwrap_or(false)
    }
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    let Some(str_path) = path.to_str() else {
        return Ok(path);
    };

    if str_path.starts_with("${exe_dir}") {
        let cur_exe = env::current_exe()?;
        let exe_dir = cur_exe.parent().map(|p| p.to_string_lossy().to_string()).unwrap_or_default();
        Ok(PathBuf::from(str_path.replace("${exe_dir}", &exe_dir)))
    } else {
        Ok(path)
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    if cfg.admin.password.trim().is_empty() {
        return Err(io::Error::new(ErrorKind::InvalidData, "Admin password must not be empty"));
    }

    cfg.paths = Paths {
        template_dir: parse_path(cfg.paths.template_dir)?,
        public_dir: parse_path(cfg.paths.public_dir)?,
        data_dir: parse_path(cfg.paths.data_dir)?,
        uploads_dir: parse_path(cfg.paths.uploads_dir)?,
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

#[cfg(test)]
pub(crate) mod test_config {
    use std::path::Path;

    use super::*;

    pub fn config_in(dir: &Path) -> Config {
        Config {
            site: Site { owner: "Jane Doe".to_string() },
            paths: Paths {
                template_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/res/template")),
                public_dir: dir.join("public"),
                data_dir: dir.join("data"),
                uploads_dir: dir.join("uploads"),
            },
            server: Server { address: "127.0.0.1".to_string(), port: 8001 },
            admin: Admin { password: "secret".to_string() },
            assets: Assets::default(),
            contact: Some(Contact { enabled: true }),
            log: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[site]
owner = "Jane Doe"

[paths]
template_dir = "res/template"
public_dir = "res/public"
data_dir = "data"
uploads_dir = "uploads"

[server]
address = "0.0.0.0"
port = 8001

[admin]
password = "change-me"
"#;

    #[test]
    fn test_minimal_config() {
        let cfg = parse_config(SAMPLE).unwrap();
        assert_eq!(cfg.site.owner, "Jane Doe");
        assert_eq!(cfg.server.port, 8001);
        assert_eq!(cfg.assets.base_url, "/uploads");
        assert_eq!(cfg.assets.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert!(!cfg.contact_enabled());
        assert!(cfg.log.is_none());
        assert_eq!(cfg.paths.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_optional_sections() {
        let content = format!("{}\n[assets]\nbase_url = \"https://cdn.example.com\"\n\n[contact]\nenabled = true\n\n[log]\nlevel = \"Debug\"\nlog_to_console = false\n", SAMPLE);
        let cfg = parse_config(&content).unwrap();
        assert_eq!(cfg.assets.base_url, "https://cdn.example.com");
        assert_eq!(cfg.assets.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert!(cfg.contact_enabled());
        assert_eq!(cfg.log.unwrap().level, LogLevel::Debug);
    }

    #[test]
    fn test_empty_password_is_rejected() {
        let content = SAMPLE.replace("change-me", "");
        assert_eq!(parse_config(&content).err().unwrap().kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_exe_dir_expansion() {
        let content = SAMPLE.replace(r#"data_dir = "data""#, r#"data_dir = "${exe_dir}/data""#);
        let cfg = parse_config(&content).unwrap();
        let data_dir = cfg.paths.data_dir.to_str().unwrap().to_string();
        assert!(!data_dir.contains("${exe_dir}"));
        assert!(data_dir.ends_with("/data"));
    }

    #[test]
    fn test_shipped_sample_parses() {
        let cfg = parse_config(include_str!("../folio.toml")).unwrap();
        assert!(cfg.contact_enabled());
    }
}
