//! tracing subscriber setup for the job log

use crate::output::commands::workflow_command;
use std::fmt::Write as _;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// Filter used for workflow command output when `RUST_LOG` is unset.
/// Debug lines are only displayed by the runner when step debugging is on.
const GHA_DEFAULT_FILTER: &str = "warn,revapp_core=debug,revapp=debug";

/// How log lines are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// GitHub Actions workflow commands on stdout
    Gha,
    /// Human-readable `fmt` output on stderr
    Text,
}

impl LogFormat {
    /// Explicit choice wins; otherwise GitHub Actions is detected from `GITHUB_ACTIONS`
    pub fn detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("gha") => LogFormat::Gha,
            Some("text") => LogFormat::Text,
            _ => {
                if std::env::var("GITHUB_ACTIONS").is_ok() {
                    LogFormat::Gha
                } else {
                    LogFormat::Text
                }
            }
        }
    }
}

/// Install the global subscriber before the first log line.
///
/// A subscriber that is already installed is left in place.
pub fn init(format: LogFormat) {
    match format {
        LogFormat::Gha => {
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(GHA_DEFAULT_FILTER));
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stdout)
                .event_format(GhaFormat)
                .try_init();
        }
        LogFormat::Text => {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}

/// Formats each event as a single workflow command line
#[derive(Debug, Clone, Copy, Default)]
pub struct GhaFormat;

impl<S, N> FormatEvent<S, N> for GhaFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        writeln!(
            writer,
            "{}",
            workflow_command(*event.metadata().level(), &visitor.finish())
        )
    }
}

/// Collects the message and appends other fields as `key=value`
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields
        } else {
            format!("{} {}", self.message, self.fields)
        }
    }

    fn push_field(&mut self, name: &str, value: std::fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", name, value);
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.push_field(field.name(), format_args!("{}", value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            self.push_field(field.name(), format_args!("{:?}", value));
        }
    }
}

/// Run `f` with a workflow-command subscriber and return its log output
#[cfg(test)]
pub(crate) fn capture_log<R>(f: impl FnOnce() -> R) -> (R, String) {
    use parking_lot::Mutex;
    use std::io;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let buffer = Buffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(move || writer.clone())
        .event_format(GhaFormat)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.0.lock().clone();
    (result, String::from_utf8_lossy(&bytes).into_owned())
}
