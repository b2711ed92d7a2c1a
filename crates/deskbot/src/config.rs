//! Client configuration: a JSON file, then command-line overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use deskbot_session::SessionConfig;
use deskbot_transport::TransportConfig;
use serde::{Deserialize, Serialize};

use crate::DeskbotError;

fn default_host() -> String {
    "localhost".into()
}

fn default_port() -> u16 {
    7911
}

/// Everything the binary needs to run one session.
///
/// Every field has a default, so `{}` is a valid config file. Session
/// settings (`player_name`, `room`, `turn_order`, `stop_on_desync`) sit at
/// the top level next to the connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server host name or address. Default: `localhost`.
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port. Default: 7911.
    #[serde(default = "default_port")]
    pub port: u16,

    /// `.ydk` deck list submitted after being seated.
    #[serde(default)]
    pub deck: Option<PathBuf>,

    /// Script source handed to the decision engine.
    #[serde(default)]
    pub script: Option<PathBuf>,

    /// Give up if the server is silent this long. Unset waits forever.
    #[serde(default)]
    pub read_timeout_secs: Option<u64>,

    #[serde(flatten)]
    pub session: SessionConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            deck: None,
            script: None,
            read_timeout_secs: None,
            session: SessionConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Reads and parses a JSON config file.
    pub async fn load(path: &Path) -> Result<Self, DeskbotError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DeskbotError::Read {
                path: path.to_owned(),
                source,
            })?;
        serde_json::from_str(&text).map_err(|e| DeskbotError::Config {
            path: path.to_owned(),
            reason: e.to_string(),
        })
    }

    /// `host:port`, ready for connecting.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            read_timeout: self.read_timeout_secs.map(Duration::from_secs),
        }
    }
}
