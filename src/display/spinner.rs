//! Pseudographical progress indicator.

use std::io::Write;
use std::sync::{Arc, LazyLock, Mutex};
use std::time::Duration;

use crossterm::cursor;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const TICK: Duration = Duration::from_millis(100);

/// Where the animation is drawn. Shared so tests can inspect what was written.
pub type Sink = Arc<Mutex<dyn Write + Send>>;

static TERMINAL: LazyLock<Sink> = LazyLock::new(|| -> Sink { Arc::new(Mutex::new(std::io::stderr())) });

/// The stderr sink every terminal spinner draws through.
/// Holding its lock keeps frames off the screen.
pub fn terminal() -> Sink {
    TERMINAL.clone()
}

#[derive(Debug, PartialEq, Eq)]
pub enum SpinnerError {
    AlreadyRunning,
}

impl std::fmt::Display for SpinnerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpinnerError::AlreadyRunning => write!(f, "spinner started twice without a stop"),
        }
    }
}

impl std::error::Error for SpinnerError {}

fn emit(sink: &Sink, bytes: &[u8]) {
    if let Ok(mut out) = sink.lock() {
        let _ = out.write_all(bytes).and_then(|()| out.flush());
    }
}

fn draw(sink: &Sink, frame: &str, label: &str) {
    let mut buf = Vec::new();
    let _ = crossterm::queue!(
        buf,
        Print("\r"),
        SetForegroundColor(Color::DarkGrey),
        Print(frame),
        ResetColor,
        Print(" "),
        Print(label),
    );
    emit(sink, &buf);
}

/// Blank out the longest line we could have drawn and park the cursor at column 0.
fn clear(sink: &Sink, label: &str) {
    let mut buf = Vec::new();
    let _ = crossterm::queue!(buf, cursor::Show, Print(clear_sequence(label)));
    emit(sink, &buf);
}

/// What a stopped spinner leaves as the last thing on its line.
pub fn clear_sequence(label: &str) -> String {
    format!("\r{}\r", " ".repeat(label.chars().count() + 3))
}

async fn animate(sink: Sink, label: String, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(TICK);
    let mut index: usize = 0;

    let mut buf = Vec::new();
    let _ = crossterm::queue!(buf, cursor::Hide);
    emit(&sink, &buf);
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                draw(&sink, FRAMES[index], &label);
                index += 1;
                index %= FRAMES.len();
            }
        }
    }
    clear(&sink, &label);
}

struct Running {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

/// Animates `<glyph> <label>` on one line while a slow call is in flight.
/// `start` and `stop` must alternate; `stop` returns only once the line is clean.
pub struct Spinner {
    sink: Option<Sink>,
    running: Option<Running>,
}

impl Spinner {
    pub fn new(sink: Sink) -> Self {
        Spinner {
            sink: Some(sink),
            running: None,
        }
    }

    pub fn stderr() -> Self {
        Self::new(terminal())
    }

    /// For non-interactive output, make a spinner that keeps the bookkeeping but draws nothing.
    pub fn silent() -> Self {
        Spinner {
            sink: None,
            running: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Immediately start a task that animates until `stop`.
    pub fn start(&mut self, label: &str) -> Result<(), SpinnerError> {
        if self.running.is_some() {
            return Err(SpinnerError::AlreadyRunning);
        }
        let cancel = CancellationToken::new();
        let task = self
            .sink
            .clone()
            .map(|sink| tokio::spawn(animate(sink, label.to_string(), cancel.clone())));
        self.running = Some(Running { cancel, task });
        Ok(())
    }

    /// Halt the animation and wait for the task to clear its line. No-op when idle.
    pub async fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };
        running.cancel.cancel();
        if let Some(task) = running.task {
            let _ = task.await;
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        // The task still clears the line on its own once it sees the cancellation.
        if let Some(running) = self.running.take() {
            running.cancel.cancel();
        }
    }
}
