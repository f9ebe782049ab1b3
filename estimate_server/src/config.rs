use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "estimate_server.toml";

/// Prefix of environment overrides (`ESTIMATE_SERVER__SERVER__PORT=8080`)
pub const ENV_PREFIX: &str = "ESTIMATE_SERVER";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub body_limit_bytes: usize,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Catalog file; the embedded reference catalog is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Load configuration: built-in defaults, then the config file (optional),
/// then environment variables.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

    let config = config::Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 5001)?
        .set_default("server.log_level", "info")?
        .set_default("server.body_limit_bytes", 1024 * 1024)?
        .set_default("cors.allowed_origins", vec!["http://localhost:5173"])?
        .add_source(config::File::from(file).required(path.is_some()))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        )
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate(&cfg)?;
    Ok(cfg)
}

fn validate(cfg: &Config) -> anyhow::Result<()> {
    if cfg.server.port == 0 {
        anyhow::bail!("server.port must be non-zero");
    }
    if cfg.server.body_limit_bytes == 0 {
        anyhow::bail!("server.body_limit_bytes must be non-zero");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("tantya_empty_{}.toml", std::process::id()));
        std::fs::write(&path, "").unwrap();

        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.server.port, 5001);
        assert_eq!(cfg.server.body_limit_bytes, 1024 * 1024);
        assert_eq!(cfg.cors.allowed_origins, vec!["http://localhost:5173".to_string()]);
        assert!(cfg.catalog.path.is_none());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("tantya_server_{}.toml", std::process::id()));
        std::fs::write(
            &path,
            r#"
[server]
port = 8088

[catalog]
path = "/srv/tantya/catalog.json"

[cors]
allowed_origins = ["https://tantya.example", "http://localhost:5173"]
"#,
        )
        .unwrap();

        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.server.port, 8088);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.catalog.path, Some(PathBuf::from("/srv/tantya/catalog.json")));
        assert_eq!(cfg.cors.allowed_origins.len(), 2);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("tantya_definitely_missing_config.toml");
        assert!(load_config(Some(&path)).is_err());
    }
}
