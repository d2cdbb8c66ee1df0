use std::env;
use std::ffi::OsStr;
use std::io;
use std::path::Path;

use once_cell::sync::OnceCell;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Directory and file name for the rolling appender. A bare name logs to
/// the working directory and a path without a name logs to `app.log`.
fn split_log_path(path: &Path) -> (&Path, &OsStr) {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().unwrap_or(OsStr::new("app.log"));
    (dir, file_name)
}

/// Console + rolling file logging, filtered by `RUST_LOG` (default `info`).
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Console (stderr) layer with file/line
    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .compact();

    // RUST_LOG_FILE=logs/app.log by default, rotated daily
    let log_path = env::var("RUST_LOG_FILE").unwrap_or_else(|_| "logs/app.log".to_string());
    let (dir, file_name) = split_log_path(Path::new(&log_path));
    let (nb_writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, file_name));
    let _ = FILE_GUARD.set(guard);

    let file_layer = fmt::layer()
        .with_writer(nb_writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .compact();

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    // Hook panics to log with backtrace
    std::panic::set_hook(Box::new(|info| {
        let mut msg = String::new();
        if let Some(loc) = info.location() {
            msg.push_str(&format!("panic at {}:{}:{} ", loc.file(), loc.line(), loc.column()));
        }
        if let Some(s) = info.payload().downcast_ref::<&str>() {
            msg.push_str(s);
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            msg.push_str(s);
        } else {
            msg.push_str("<non-string panic>");
        }
        let bt = std::backtrace::Backtrace::force_capture();
        tracing::error!("{}\nBacktrace:\n{:?}", msg, bt);
    }));
}
