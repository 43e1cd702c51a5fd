// uart-echo - USART Echo Firmware
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

pub const SCHEMA_VERSION: &str = "1.0";

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

fn default_name() -> String {
    "uart-echo".to_string()
}

/// Where the host harness gets its byte stream from.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase", deny_unknown_fields)]
pub enum TransportConfig {
    /// Read stdin, echo to stdout. A struct variant so `deny_unknown_fields`
    /// also rejects stray keys next to `kind: stdio`.
    Stdio {},
    /// Listen on `bind` and echo each accepted connection in turn.
    Tcp { bind: String },
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig::Stdio {}
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EchoLimits {
    /// Stop a session after this many echoed bytes.
    #[serde(default)]
    pub max_bytes: Option<u64>,
    /// TCP only: stop serving after this many connections.
    #[serde(default)]
    pub max_connections: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EchoConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub transport: TransportConfig,
    /// Sent once at the start of every session, before any echo.
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub limits: EchoLimits,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            name: default_name(),
            transport: TransportConfig::default(),
            banner: None,
            limits: EchoLimits::default(),
        }
    }
}

impl EchoConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read echo config at {:?}", path.as_ref()))?;
        let config = Self::from_yaml(&contents)?;
        tracing::debug!(name = %config.name, "loaded echo config");
        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(contents).context("Failed to parse echo config YAML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema_version != SCHEMA_VERSION {
            anyhow::bail!(
                "Unsupported schema_version '{}'. Supported versions: '{}'",
                self.schema_version,
                SCHEMA_VERSION
            );
        }

        if let TransportConfig::Tcp { bind } = &self.transport {
            parse_bind_addr(bind)?;
        }

        if self.limits.max_bytes == Some(0) {
            anyhow::bail!("Limit 'max_bytes' must be greater than zero");
        }

        if let Some(max_connections) = self.limits.max_connections {
            if max_connections == 0 {
                anyhow::bail!("Limit 'max_connections' must be greater than zero");
            }
            if matches!(self.transport, TransportConfig::Stdio {}) {
                tracing::warn!("'max_connections' has no effect on the stdio transport");
            }
        }

        Ok(())
    }

    pub fn banner_bytes(&self) -> Option<&[u8]> {
        self.banner.as_deref().map(str::as_bytes)
    }
}

pub fn parse_bind_addr(bind: &str) -> Result<SocketAddr> {
    bind.trim()
        .parse()
        .with_context(|| format!("Invalid TCP bind address '{}'", bind))
}
