use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::ClientConfig;

pub const DEFAULT_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "study";

const CONFIG_HEADER: &str = "# studydeck connection settings; --uri and --database override these\n";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct StudyDeckConfig {
    pub uri: Option<String>,
    pub database: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub query_timeout_ms: Option<u64>,
}

impl StudyDeckConfig {
    /// Starter file contents written by `studydeck init`
    pub fn template() -> Self {
        Self {
            uri: Some(DEFAULT_URI.to_string()),
            database: Some(DEFAULT_DATABASE.to_string()),
            connect_timeout_secs: Some(10),
            query_timeout_ms: None,
        }
    }

    /// Resolve into a client config; explicit overrides win over file values
    pub fn to_client_config(&self, uri: Option<&str>, database: Option<&str>) -> ClientConfig {
        let uri = uri.or(self.uri.as_deref()).unwrap_or(DEFAULT_URI);
        let database = database.or(self.database.as_deref()).unwrap_or(DEFAULT_DATABASE);

        let mut config = ClientConfig::new(uri, database);
        config.connect_timeout = self.connect_timeout_secs.map(Duration::from_secs);
        config.query_timeout = self.query_timeout_ms.map(Duration::from_millis);
        config
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("studydeck.toml")
}

/// Read `path` (or `studydeck.toml`), returning `None` when there is no file.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<StudyDeckConfig>> {
    let path = path.map_or_else(default_config_path, Path::to_path_buf);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };

    let config: StudyDeckConfig = toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

/// Write `config` as TOML; an existing file is kept unless `force` is set.
pub fn write_config(path: &Path, config: &StudyDeckConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (pass --force to replace it)", path.display());
    }

    let body = toml::to_string_pretty(config)?;
    std::fs::write(path, format!("{CONFIG_HEADER}{body}"))
        .with_context(|| format!("writing {}", path.display()))
}
