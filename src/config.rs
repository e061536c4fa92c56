use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path, sync::Arc};

use crate::{session::SessionProvider, store::BlockStore};

pub struct AppState {
    pub config: Config,
    pub store: BlockStore,
    pub session: Arc<dyn SessionProvider>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: usize,
    /// Path of the JSON document holding the block records.
    pub blocks_file: String,
    /// Base URL of the external session service. When absent the identity
    /// display always shows the anonymous placeholder.
    pub session_url: Option<String>,
}

/// Parse the config file into Config struct.
pub async fn parse_config(filepath: &str) -> Result<Config> {
    let content = fs::read_to_string(filepath).context("failed to read config file")?;
    let c: Config = toml::from_str(&content).context("failed to convert toml config data")?;

    if !hostname_validator::is_valid(&c.host) {
        return Err(anyhow::Error::msg(format!("host '{}' is invalid", c.host)));
    }

    if c.port > 65535 {
        return Err(anyhow::Error::msg(format!(
            "port '{}' is invalid, must be between [0, 65535]",
            c.port
        )));
    }

    if let Some(parent) = Path::new(&c.blocks_file).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("failed to create blocks data directory")?;
        }
    }

    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(dir: &tempfile::TempDir, content: &str) -> String {
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_parse_config() {
        let dir = tempfile::tempdir().unwrap();
        let blocks_file = dir.path().join("data").join("blocks.json");
        let path = write_config(
            &dir,
            &format!(
                "host = \"localhost\"\nport = 4000\nblocks_file = \"{}\"\n",
                blocks_file.display()
            ),
        );

        let config = parse_config(&path).await.unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 4000);
        assert!(config.session_url.is_none());
        // parent of the blocks file is created at startup
        assert!(blocks_file.parent().unwrap().exists());
    }

    #[tokio::test]
    async fn test_parse_config_rejects_bad_port() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "host = \"localhost\"\nport = 70000\nblocks_file = \"blocks.json\"\n",
        );

        assert!(parse_config(&path).await.is_err());
    }
}
