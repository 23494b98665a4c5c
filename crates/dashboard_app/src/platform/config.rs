//! Command line and `dashboard.ron` settings, merged into one [`AppConfig`].
//!
//! Precedence is command line, then config file, then built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use dashboard_gateway::{GatewaySettings, DEFAULT_BASE_URL};
use dashboard_logging::{default_log_path, LogDestination};
use log::LevelFilter;
use serde::Deserialize;
use url::Url;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.ron";

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "dashboard", version, about = "Terminal client for the knowledge dashboard backend")]
pub struct Cli {
    /// Backend origin, e.g. http://127.0.0.1:8000
    #[arg(long)]
    pub backend: Option<String>,
    /// RON config file (defaults to ./dashboard.ron when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub log: Option<LogTarget>,
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Where downloaded uploads are saved
    #[arg(long)]
    pub download_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Contents of the optional RON config file. Every key may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub backend: Option<String>,
    pub log: Option<LogTarget>,
    pub log_level: Option<LogLevel>,
    pub log_file: Option<PathBuf>,
    pub download_dir: Option<PathBuf>,
    pub state_dir: Option<PathBuf>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(text)?)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: Url,
    pub log: LogDestination,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub download_dir: PathBuf,
    /// Directory holding `.dashboard_state.ron`.
    pub state_dir: PathBuf,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn load(cli: Cli) -> anyhow::Result<Self> {
        let file = match cli.config.as_deref() {
            Some(path) => Some(read_file_config(path)?),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Some(read_file_config(fallback)?)
                } else {
                    None
                }
            }
        };
        Self::merge(cli, file.unwrap_or_default())
    }

    pub fn merge(cli: Cli, file: FileConfig) -> anyhow::Result<Self> {
        let defaults = GatewaySettings::default();

        let backend_text = cli
            .backend
            .or(file.backend)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let backend = Url::parse(&backend_text)
            .with_context(|| format!("invalid backend url {backend_text:?}"))?;
        if !matches!(backend.scheme(), "http" | "https") {
            anyhow::bail!("backend url must be http or https: {backend_text}");
        }

        let download_dir = cli
            .download_dir
            .or(file.download_dir)
            .unwrap_or_else(|| PathBuf::from("downloads"));

        Ok(Self {
            backend,
            log: cli.log.or(file.log).map(Into::into).unwrap_or_default(),
            log_level: cli
                .log_level
                .or(file.log_level)
                .map(Into::into)
                .unwrap_or(LevelFilter::Info),
            log_file: cli.log_file.or(file.log_file).unwrap_or_else(default_log_path),
            download_dir,
            state_dir: file.state_dir.unwrap_or_else(|| PathBuf::from(".")),
            connect_timeout: file
                .connect_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            request_timeout: file
                .request_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        })
    }

    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            base_url: self.backend.clone(),
            connect_timeout: self.connect_timeout,
            request_timeout: self.request_timeout,
            ..GatewaySettings::default()
        }
    }
}

fn read_file_config(path: &Path) -> anyhow::Result<FileConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    FileConfig::parse(&text).with_context(|| format!("parsing config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = AppConfig::merge(Cli::default(), FileConfig::default()).unwrap();
        assert_eq!(config.backend.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(config.log, LogDestination::Terminal);
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn command_line_wins_over_file() {
        let file = FileConfig::parse(
            r#"(
                backend: Some("http://files.example:9000"),
                log: Some(both),
                log_level: Some(debug),
                request_timeout_secs: Some(5),
            )"#,
        )
        .unwrap();
        let cli = Cli {
            backend: Some("https://cli.example".into()),
            ..Cli::default()
        };

        let config = AppConfig::merge(cli, file).unwrap();
        assert_eq!(config.backend.as_str(), "https://cli.example/");
        assert_eq!(config.log, LogDestination::Both);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.gateway_settings().request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_non_http_backend() {
        let cli = Cli {
            backend: Some("ftp://example.com".into()),
            ..Cli::default()
        };
        assert!(AppConfig::merge(cli, FileConfig::default()).is_err());
    }

    #[test]
    fn unknown_file_keys_are_errors() {
        assert!(FileConfig::parse("(colour: Some(true))").is_err());
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "dashboard",
            "--backend",
            "http://10.0.0.2:8000",
            "--log",
            "file",
            "--log-level",
            "warn",
            "--download-dir",
            "/tmp/dl",
        ])
        .unwrap();
        assert_eq!(cli.log, Some(LogTarget::File));
        assert_eq!(cli.log_level, Some(LogLevel::Warn));
        assert_eq!(cli.download_dir, Some(PathBuf::from("/tmp/dl")));
    }
}
