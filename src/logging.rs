use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Initialise logging. With `debug` the level is `debug` and `RUST_LOG` may
/// override it; otherwise it is fixed at `info`. When `log_file` is given,
/// output goes to that file instead of stderr.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(debug));

    let appender = log_file.and_then(|path| match file_appender(&path) {
        Ok(appender) => Some(appender),
        Err(err) => {
            eprintln!("fog_map: cannot open log file {}: {err}", path.display());
            None
        }
    });

    let _ = match appender {
        Some(appender) => builder.with_writer(appender).with_ansi(false).try_init(),
        None => builder.try_init(),
    };
}

fn env_filter(debug: bool) -> EnvFilter {
    // Without debug logging, ignore RUST_LOG so a stray variable in the
    // environment cannot make output verbose.
    if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    }
}

fn file_appender(path: &Path) -> Result<RollingFileAppender, tracing_appender::rolling::InitError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "fog_map.log".to_string());
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
}
