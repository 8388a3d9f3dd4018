use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};

use anyhow::{Result, anyhow, bail};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

/// `<local time> <LEVEL> <file:line> <fields>`, dimmed and coloured on a tty.
struct LocalFmt;

/// Writes `text` wrapped in the escape `code` when `ansi` is set.
fn styled(
    writer: &mut Writer<'_>,
    ansi: bool,
    code: &str,
    text: impl std::fmt::Display,
) -> std::fmt::Result {
    if ansi {
        write!(writer, "\x1b[{code}m{text}\x1b[0m ")
    } else {
        write!(writer, "{text} ")
    }
}

fn level_code(level: Level) -> &'static str {
    match level {
        Level::ERROR => "1;31",
        Level::WARN => "1;33",
        Level::INFO => "1;32",
        Level::DEBUG => "1;34",
        Level::TRACE => "1;35",
    }
}

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();

        styled(&mut writer, ansi, "2", Local::now().format("%H:%M:%S%.3f"))?;
        styled(
            &mut writer,
            ansi,
            level_code(*meta.level()),
            format_args!("{:>5}", meta.level()),
        )?;
        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            styled(
                &mut writer,
                ansi,
                "36",
                format_args!("{}:{line}", short_source_path(file)),
            )?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Drops the crate-relative `src/` prefix so records stay on one line.
fn short_source_path(file: &str) -> &str {
    file.rsplit_once("src/")
        .or_else(|| file.rsplit_once("src\\"))
        .map_or(file, |(_, rest)| rest)
}

type SharedLogFile = Arc<Mutex<Option<File>>>;

/// The configured `log_file`, attached after the subscriber is installed.
/// Records are dropped until then.
#[derive(Clone)]
struct LogFile(SharedLogFile);

struct LogFileGuard<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileGuard<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), File::flush)
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileGuard(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

type ReloadFn = Box<dyn Fn(&str) -> Result<()> + Send + Sync>;

static RELOAD_FILTER: OnceLock<ReloadFn> = OnceLock::new();
static LOG_FILE: OnceLock<SharedLogFile> = OnceLock::new();

/// `RUST_LOG` wins over the configured level. An unusable configured
/// level falls back to `info`.
fn make_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn keep_reload_handle<S>(handle: reload::Handle<EnvFilter, S>)
where
    S: Subscriber + Send + Sync + 'static,
{
    let _ = RELOAD_FILTER.set(Box::new(move |level: &str| {
        let filter =
            EnvFilter::try_new(level).map_err(|e| anyhow!("invalid log level '{level}': {e}"))?;
        handle
            .reload(filter)
            .map_err(|e| anyhow!("filter reload failed: {e}"))
    }));
}

/// Changes the active log filter at runtime.
/// Accepts a bare level ("error", "warn", "info", "debug", "trace")
/// or any full EnvFilter directive.
pub fn set_log_level(level: &str) -> Result<()> {
    match RELOAD_FILTER.get() {
        Some(reload_filter) => reload_filter(level),
        None => bail!("logging not yet initialized"),
    }
}

/// Starts appending log output to `path`, replacing any open log file.
/// The directory must already exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow!("cannot open log file '{}': {e}", path.display()))?;

    match LOG_FILE.get() {
        Some(shared) => {
            *shared.lock().unwrap_or_else(PoisonError::into_inner) = Some(file);
            Ok(())
        }
        None => bail!("logging not yet initialized"),
    }
}

/// Initializes logging. Call once at startup.
///
/// - Terminal: records go to stderr so stdout stays clean for results,
///   coloured when stderr is a terminal.
/// - File: inactive until [`enable_file_logging`] is called.
/// - Level: `level` from the config, unless `RUST_LOG` is set.
pub fn init_logging(level: &str) {
    let shared: SharedLogFile = Arc::new(Mutex::new(None));
    let _ = LOG_FILE.set(Arc::clone(&shared));

    let (level_filter, level_handle) = reload::Layer::new(make_filter(level));

    let terminal_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal());

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(false)
        .with_writer(LogFile(shared));

    if tracing_subscriber::registry()
        .with(level_filter)
        .with(terminal_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
    {
        keep_reload_handle(level_handle);
    }
}
