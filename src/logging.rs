use std::{fs, io, path::Path, time};

use snafu::{ResultExt, Snafu};
use tracing::Level;
use tracing_subscriber::{Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Snafu)]
pub enum InitLoggingError {
    #[snafu(display("parsing env variable value"))]
    InvalidEnvVariable {
        #[snafu(source)]
        source: filter::FromEnvError,
    },

    #[snafu(display("creating logs directory"))]
    DirCreation {
        #[snafu(source)]
        source: io::Error,
    },

    #[snafu(display("opening log file"))]
    OpenFile {
        #[snafu(source)]
        source: io::Error,
    },
}

/// Logs INFO and up (or `LOG_LEVEL`) to stdout and everything from DEBUG
/// to `<dir>/debug-<unix seconds>.log`.
pub fn load(dir: &Path) -> Result<(), InitLoggingError> {
    let stdout_filter = filter::EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .with_env_var("LOG_LEVEL")
        .from_env()
        .context(InvalidEnvVariableSnafu)?;

    fs::create_dir_all(dir).context(DirCreationSnafu)?;

    let timestamp = time::SystemTime::now()
        .duration_since(time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let file = fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(dir.join(format!("debug-{}.log", timestamp)))
        .context(OpenFileSnafu)?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_filter(stdout_filter))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(file)
                .with_filter(filter::LevelFilter::from_level(Level::DEBUG)),
        )
        .init();

    Ok(())
}
