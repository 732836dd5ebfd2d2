//! Logging built on `tracing-subscriber`
//!
//! - Console output, colored only when stdout is a terminal
//! - Optional file output in full, compact or JSON format

pub mod config;
pub mod error;
pub(crate) mod writer;

pub use config::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};
use writer::LogFileWriter;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber described by `config`.
pub fn init_logger(config: LoggerConfig) -> Result<(), LoggerError> {
    config.validate()?;

    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| LoggerError::config(format!("Invalid filter '{}': {}", config.level, e)))?;

    tracing_subscriber::registry()
        .with(build_layers(&config)?)
        .with(filter)
        .try_init()
        .map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))
}

/// File layer comes first: the first fmt layer decides whether span fields
/// are stored with ANSI codes, and those must not leak into the file.
fn build_layers(config: &LoggerConfig) -> Result<Vec<BoxedLayer>, LoggerError> {
    let mut layers = Vec::with_capacity(2);

    if config.file.enabled {
        layers.push(file_layer(&config.file)?);
    }

    if config.console.enabled {
        let use_ansi = config.console.colored && std::io::stdout().is_terminal();
        layers.push(
            fmt::layer()
                .with_ansi(use_ansi)
                .with_target(true)
                .with_level(true)
                .boxed(),
        );
    }

    Ok(layers)
}

fn file_layer(config: &FileConfig) -> Result<BoxedLayer, LoggerError> {
    let writer = LogFileWriter::new(config)?;
    let base = fmt::layer().with_ansi(false).with_target(true);

    let layer = match config.format {
        LogFormat::Full => base.with_writer(writer).boxed(),
        LogFormat::Compact => base.compact().with_writer(writer).boxed(),
        LogFormat::Json => base.json().with_writer(writer).boxed(),
    };

    Ok(layer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_build_layers_console_only() {
        let layers = build_layers(&LoggerConfig::default()).unwrap();
        assert_eq!(layers.len(), 1);
    }

    #[test]
    fn test_build_layers_with_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs/academy.log");
        let config = LoggerConfig::new(
            ConsoleConfig::default(),
            FileConfig::new(true, path.clone(), true, LogFormat::Compact),
            "debug",
        )
        .unwrap();

        let layers = build_layers(&config).unwrap();
        assert_eq!(layers.len(), 2);
        assert!(path.exists());
    }

    #[test]
    fn test_file_layer_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let config = FileConfig::new(
            true,
            PathBuf::from(&blocker).join("academy.log"),
            true,
            LogFormat::Json,
        );
        assert!(matches!(file_layer(&config), Err(LoggerError::Io(_))));
    }
}
