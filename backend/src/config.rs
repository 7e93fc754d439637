//! Server and policy configuration.
//!
//! `ServerConfig` comes from the environment only. `PolicyConfig` is the
//! `[policy]` section of `repository.toml`, overridable per key through the
//! environment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;

use crate::db::repository::RepositoryError;
use crate::db::RepositoryConfig;

/// Bind address of the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Read `HOST` (default 0.0.0.0) and `PORT` (default 8080). An
    /// unparsable port falls back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(defaults.port),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

/// What happens to a category's animals when the category is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryDeleteBehavior {
    /// Delete the animals along with the category.
    #[default]
    Cascade,
    /// Keep the animals and clear their category.
    SetNull,
}

impl FromStr for CategoryDeleteBehavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cascade" => Ok(Self::Cascade),
            "set-null" | "set_null" | "setnull" => Ok(Self::SetNull),
            _ => Err(format!("Unknown category delete behavior: {}", s)),
        }
    }
}

impl fmt::Display for CategoryDeleteBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cascade => f.write_str("cascade"),
            Self::SetNull => f.write_str("set-null"),
        }
    }
}

/// What happens to an enclosure's occupants when the enclosure is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnclosureDeletePolicy {
    /// Move occupants to the enclosure named `DefaultEnclosure`, or leave
    /// them without an enclosure when there is none.
    #[default]
    Reassign,
    /// Refuse to delete an occupied enclosure.
    Reject,
}

impl FromStr for EnclosureDeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reassign" => Ok(Self::Reassign),
            "reject" => Ok(Self::Reject),
            _ => Err(format!("Unknown enclosure delete policy: {}", s)),
        }
    }
}

impl fmt::Display for EnclosureDeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reassign => f.write_str("reassign"),
            Self::Reject => f.write_str("reject"),
        }
    }
}

/// Delete behaviour for records that own other records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub category_delete: CategoryDeleteBehavior,
    pub enclosure_delete: EnclosureDeletePolicy,
}

#[derive(Debug, Default, Deserialize)]
struct PolicyFile {
    #[serde(default)]
    policy: PolicyConfig,
}

impl PolicyConfig {
    /// Read the `[policy]` section of a TOML file. A missing section yields
    /// the defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RepositoryError> {
        let file: PolicyFile = toml::from_str(content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse policy section: {}", e))
        })?;
        Ok(file.policy)
    }

    /// Apply `ZOO_CATEGORY_DELETE` and `ZOO_ENCLOSURE_DELETE` on top of `self`.
    pub fn with_env_overrides(mut self) -> Result<Self, RepositoryError> {
        if let Ok(value) = std::env::var("ZOO_CATEGORY_DELETE") {
            self.category_delete = value.parse().map_err(RepositoryError::configuration)?;
        }
        if let Ok(value) = std::env::var("ZOO_ENCLOSURE_DELETE") {
            self.enclosure_delete = value.parse().map_err(RepositoryError::configuration)?;
        }
        Ok(self)
    }

    /// Policy from the default `repository.toml` (if any) plus environment
    /// overrides.
    pub fn load() -> Result<Self, RepositoryError> {
        let base = match RepositoryConfig::default_path() {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_env_overrides()
    }
}
