//! Logging Infrastructure
//!
//! - Console output, pretty or JSON
//! - Optional daily rotating application logs (`{log_dir}/app`)
//! - Optional daily rotating security logs (`{log_dir}/security`), fed by
//!   events on the `security` target (see [`security_log!`](crate::security_log))

use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, filter::filter_fn, fmt, prelude::*};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the logging system
///
/// `RUST_LOG` wins over `level` when set.
///
/// ```no_run
/// // Development setup (console only)
/// table_server::init_logger_with_file(Some("debug"), Some(false), None)?;
///
/// // Production setup (console + files)
/// table_server::init_logger_with_file(Some("info"), Some(true), Some("./logs"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: Option<&str>,
    json_format: Option<bool>,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let level = level.unwrap_or("info");
    let json_format = json_format.unwrap_or(false);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut layers: Vec<BoxedLayer> = vec![console_layer(json_format)];

    if let Some(dir) = log_dir {
        let log_dir = Path::new(dir);
        let app_log_dir = log_dir.join("app");
        let security_log_dir = log_dir.join("security");
        fs::create_dir_all(&app_log_dir)?;
        fs::create_dir_all(&security_log_dir)?;

        // Everything except security events
        let app_log = RollingFileAppender::new(Rotation::DAILY, app_log_dir, "app");
        layers.push(file_layer(app_log, json_format, |target| target != "security"));

        let security_log = RollingFileAppender::new(Rotation::DAILY, security_log_dir, "security");
        layers.push(file_layer(security_log, json_format, |target| {
            target == "security"
        }));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

/// Initialize the logging system (console only)
pub fn init_logger(level: &str) -> anyhow::Result<()> {
    init_logger_with_file(Some(level), None, None)
}

fn console_layer(json_format: bool) -> BoxedLayer {
    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    }
}

fn file_layer(
    appender: RollingFileAppender,
    json_format: bool,
    keep_target: fn(&str) -> bool,
) -> BoxedLayer {
    let filter = filter_fn(move |meta| keep_target(meta.target()));
    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_writer(Mutex::new(appender))
            .with_filter(filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(Mutex::new(appender))
            .with_filter(filter)
            .boxed()
    }
}
