// uart-echo - USART Echo Firmware
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

use uart_echo_cli::{serve, SessionReport};
use uart_echo_config::{EchoConfig, TransportConfig};
use uart_echo_core::EchoStats;

const EXIT_OK: u8 = 0;
const EXIT_CONFIG_ERROR: u8 = 2;
const EXIT_RUNTIME_ERROR: u8 = 3;

const REPORT_SCHEMA_VERSION: &str = "1.0";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Echo a byte stream back to its sender, one byte at a time",
    long_about = None
)]
struct Cli {
    /// Path to the echo config (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen for TCP clients on ADDR (e.g. 127.0.0.1:7000)
    #[arg(long, value_name = "ADDR", conflicts_with = "stdio")]
    tcp: Option<String>,

    /// Echo stdin to stdout (default when no config is given)
    #[arg(long)]
    stdio: bool,

    /// Message sent once at the start of every session
    #[arg(long)]
    banner: Option<String>,

    /// Stop a session after this many echoed bytes
    #[arg(long)]
    max_bytes: Option<u64>,

    /// TCP only: exit after serving this many connections
    #[arg(long)]
    max_connections: Option<u64>,

    /// Write a JSON run report to this path on exit
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log every echoed byte
    #[arg(short, long)]
    trace: bool,
}

#[derive(Debug, Serialize)]
struct RunReport {
    report_schema_version: &'static str,
    name: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    totals: EchoStats,
    sessions: Vec<SessionReport>,
}

fn resolve_config(cli: &Cli) -> Result<EchoConfig> {
    let mut config = match &cli.config {
        Some(path) => EchoConfig::from_file(path)?,
        None => EchoConfig::default(),
    };

    if let Some(bind) = &cli.tcp {
        config.transport = TransportConfig::Tcp { bind: bind.clone() };
    } else if cli.stdio {
        config.transport = TransportConfig::Stdio {};
    }
    if let Some(banner) = &cli.banner {
        config.banner = Some(banner.clone());
    }
    if cli.max_bytes.is_some() {
        config.limits.max_bytes = cli.max_bytes;
    }
    if cli.max_connections.is_some() {
        config.limits.max_connections = cli.max_connections;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn totals(sessions: &[SessionReport]) -> EchoStats {
    sessions.iter().fold(EchoStats::default(), |acc, s| EchoStats {
        bytes_echoed: acc.bytes_echoed.saturating_add(s.stats.bytes_echoed),
        read_errors: acc.read_errors.saturating_add(s.stats.read_errors),
        write_errors: acc.write_errors.saturating_add(s.stats.write_errors),
    })
}

fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize run report")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write report to {:?}", path))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Stdout carries echoed bytes in stdio mode, so logs always go to stderr.
    tracing_subscriber::fmt()
        .with_max_level(if cli.trace {
            tracing::Level::TRACE
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let mut sessions = Vec::new();
    let outcome = serve(&config, |report| {
        if cli.report.is_some() {
            sessions.push(report);
        }
    });

    let (code, status, message) = match &outcome {
        Ok(()) => (EXIT_OK, "finished", None),
        Err(e) => {
            error!("{:#}", e);
            (EXIT_RUNTIME_ERROR, "error", Some(format!("{:#}", e)))
        }
    };

    if let Some(path) = &cli.report {
        let report = RunReport {
            report_schema_version: REPORT_SCHEMA_VERSION,
            name: config.name.clone(),
            status,
            message,
            totals: totals(&sessions),
            sessions,
        };
        if let Err(e) = write_report(path, &report) {
            error!("{:#}", e);
            return ExitCode::from(EXIT_RUNTIME_ERROR);
        }
        info!(path = %path.display(), "wrote run report");
    }

    ExitCode::from(code)
}
