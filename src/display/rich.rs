use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use std::io::Write;
use std::sync::Arc;

use super::spinner::{Sink, terminal};
use super::{AnyDisplay, FAREWELL, Spinner, TITLE, answer_block, rule};

/// Clear the spinner's line and write `text` to `out` while no frame can be drawn.
fn write_over_spinner(spinner_sink: &Sink, out: &mut impl Write, text: &str) {
    let Ok(mut line) = spinner_sink.lock() else {
        return;
    };
    let mut clear = Vec::new();
    let _ = crossterm::queue!(clear, Clear(ClearType::CurrentLine), Print("\r"));
    let _ = line.write_all(&clear).and_then(|()| line.flush());
    let _ = out.write_all(text.as_bytes()).and_then(|()| out.flush());
}

/// Colourful stderr chrome around plain stdout content, with a spinner while researching.
#[derive(Default)]
struct RichDisplay;

#[async_trait::async_trait]
impl AnyDisplay for RichDisplay {
    fn spinner(&self) -> Spinner {
        Spinner::stderr()
    }

    async fn show_greeting(&self) {
        let _ = crossterm::execute!(
            std::io::stderr(),
            SetAttribute(Attribute::Bold),
            Print(TITLE),
            SetAttribute(Attribute::Reset),
            Print("\n"),
            Print(rule()),
            Print("\n\n"),
            SetForegroundColor(Color::DarkGrey),
            Print("Enter your question (or 'quit' to exit):"),
            ResetColor,
            Print("\n\n"),
        );
    }

    async fn show_prompt(&self, prompt: &str) {
        // The spinner owns the current line; take it over before echoing.
        let text = format!("\nFull Input Prompt -\n{prompt}\n");
        write_over_spinner(&terminal(), &mut std::io::stdout(), &text);
    }

    async fn show_answer(&self, answer: &str) {
        // `stdout` should be free from control sequences so that it could be piped.
        let _ = crossterm::execute!(std::io::stdout(), Print(answer_block(answer)), Print("\n"));
    }

    async fn show_error(&self, message: &str) {
        let _ = crossterm::execute!(
            std::io::stderr(),
            SetForegroundColor(Color::Red),
            Print("error: "),
            ResetColor,
            Print(message),
            Print("\n\n"),
        );
    }

    async fn show_farewell(&self) {
        let _ = crossterm::execute!(std::io::stderr(), Print("\r"), Print(FAREWELL), Print("\n"));
    }

    async fn show_log(&self, line: &str) {
        let line = line.trim_end();
        let _ = crossterm::execute!(
            std::io::stderr(),
            Clear(ClearType::CurrentLine),
            Print("\r"),
            SetForegroundColor(Color::DarkCyan),
            Print("| "),
            Print(line),
            ResetColor,
            Print("\n"),
        );
    }
}

pub fn make_display() -> super::Display {
    Arc::new(RichDisplay)
}
