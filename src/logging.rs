use tokio::sync::mpsc::UnboundedSender;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

use crate::display::Display;

/// Environment variable holding the tracing filter directive.
pub const LOG_FILTER_VAR: &str = "RESEARCH_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Writer that forwards writes to a logging channel.
struct DisplayWriter {
    sender: UnboundedSender<String>,
}

impl std::io::Write for DisplayWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let line = String::from_utf8_lossy(buf).to_string();
        let _ = self.sender.send(line);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

async fn pump(mut rx: tokio::sync::mpsc::UnboundedReceiver<String>, display: Display) {
    while let Some(line) = rx.recv().await {
        display.show_log(&line).await;
    }
}

pub(crate) fn make_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Format events as bare lines and hand each one to `sender`.
pub(crate) fn display_subscriber(
    filter: EnvFilter,
    sender: UnboundedSender<String>,
) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .without_time()
        .with_file(false)
        .with_line_number(false)
        .with_target(false)
        .with_writer(move || DisplayWriter {
            sender: sender.clone(),
        })
        .finish()
}

/// Route tracing logs into the display renderer.
pub fn setup_tracing_display_logger(display: Display) {
    let directive = std::env::var(LOG_FILTER_VAR).ok();

    let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<String>();
    tokio::spawn(pump(rx, display));

    let _ = display_subscriber(make_filter(directive.as_deref()), tx).try_init();
}
