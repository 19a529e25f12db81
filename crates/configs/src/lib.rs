use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Directory served at `/`.
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            worker_threads: Some(4),
            frontend_dir: default_frontend_dir(),
        }
    }
}

/// Which todo store the process runs with. Exactly one is active.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    File,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(StoreBackend::Memory),
            "file" | "json" => Ok(StoreBackend::File),
            other => Err(anyhow!("unknown store backend `{other}` (expected memory|file)")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { backend: StoreBackend::default(), data_file: default_data_file() }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_frontend_dir() -> PathBuf { PathBuf::from("frontend") }
fn default_data_file() -> PathBuf { PathBuf::from("data").join("todos.json") }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

/// Like [`load_from_file`], but a missing file yields the defaults.
/// Unreadable or invalid files are still errors.
pub fn load_or_default(path: &str) -> Result<AppConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse(&content).map_err(|e| anyhow!("invalid config {path}: {e}")),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(anyhow!("cannot read config {path}: {e}")),
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file if present, defaults otherwise; env vars override both.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_or_default(&config_path())?;
        cfg.apply_env_overrides()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| anyhow!("SERVER_PORT must be a number, got `{port}`"))?;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Ok(backend) = std::env::var("TODO_STORE") {
            self.store.backend = backend.parse()?;
        }
        if let Ok(file) = std::env::var("TODO_DATA_FILE") {
            self.store.data_file = PathBuf::from(file);
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.store.validate()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl StoreConfig {
    fn validate(&self) -> Result<()> {
        if self.backend == StoreBackend::File && self.data_file.as_os_str().is_empty() {
            return Err(anyhow!("store.data_file is required for the file backend"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.store.backend, StoreBackend::Memory);
        assert_eq!(cfg.store.data_file, PathBuf::from("data/todos.json"));
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn parses_file_backend() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 3000

            [store]
            backend = "file"
            data_file = "/tmp/todos.json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.store.backend, StoreBackend::File);
        assert_eq!(cfg.store.data_file, PathBuf::from("/tmp/todos.json"));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(parse("[store]\nbackend = \"sqlite\"").is_err());
        assert!("sqlite".parse::<StoreBackend>().is_err());
        assert_eq!(" File ".parse::<StoreBackend>().unwrap(), StoreBackend::File);
    }

    #[test]
    fn normalize_fills_host_and_rejects_port_zero() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "  ".into();
        cfg.server.worker_threads = Some(0);
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));

        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn file_backend_needs_a_path() {
        let mut cfg = AppConfig::default();
        cfg.store.backend = StoreBackend::File;
        cfg.store.data_file = PathBuf::new();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn load_from_missing_file_errors() {
        let path = std::env::temp_dir().join(format!("todo_cfg_{}.toml", uuid::Uuid::new_v4()));
        assert!(load_from_file(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("todo_cfg_{}.toml", uuid::Uuid::new_v4()));
        assert_eq!(load_or_default(path.to_str().unwrap()).unwrap(), AppConfig::default());
    }

    #[test]
    fn invalid_file_is_an_error_not_defaults() {
        let path = std::env::temp_dir().join(format!("todo_cfg_{}.toml", uuid::Uuid::new_v4()));
        let path_str = path.to_str().unwrap();

        std::fs::write(&path, "[store]\nbackend = \"sqlite\"\n").unwrap();
        assert!(load_or_default(path_str).is_err());

        std::fs::write(&path, "[server]\nport = \"eighty\"\n\n[store]\nbackend = \"file\"\n").unwrap();
        assert!(load_or_default(path_str).is_err());

        let _ = std::fs::remove_file(&path);
    }
}
