use serde::{Deserialize, Serialize};

/// Unique Device Name of a discovered server, the stable identity resolved
/// themes are keyed by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServerUdn(String);

impl ServerUdn {
    pub fn new(udn: impl Into<String>) -> Self {
        Self(udn.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ServerUdn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServerUdn {
    fn from(udn: &str) -> Self {
        Self::new(udn)
    }
}

/// The slice of a discovered media server this crate reads. Created by the
/// discovery layer; its lifetime is owned there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaServer {
    udn: ServerUdn,
    friendly_name: String,
}

impl MediaServer {
    pub fn new(udn: impl Into<ServerUdn>, friendly_name: impl Into<String>) -> Self {
        Self {
            udn: udn.into(),
            friendly_name: friendly_name.into(),
        }
    }

    pub fn udn(&self) -> &ServerUdn {
        &self.udn
    }

    pub fn friendly_name(&self) -> &str {
        &self.friendly_name
    }
}
