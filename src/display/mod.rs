use std::sync::Arc;

mod plain;
mod rich;
pub mod spinner;

pub use spinner::Spinner;

pub const TITLE: &str = "Market Research Tool";
pub const FAREWELL: &str = "So long and thanks for all the fish!";
pub const BANNER_WIDTH: usize = 42;

pub fn rule() -> String {
    "=".repeat(BANNER_WIDTH)
}

/// The answer framed by rules, as it lands on stdout.
pub fn answer_block(answer: &str) -> String {
    let rule = rule();
    format!("{rule}\nLLM RESPONSE\n{rule}\n{answer}\n{rule}\n")
}

/// Object-safe display interface used by CLI components.
#[async_trait::async_trait]
pub trait AnyDisplay: Send + Sync {
    /// Return an idle progress indicator suited to this output.
    fn spinner(&self) -> Spinner;

    /// Introduce the tool and how to leave it.
    async fn show_greeting(&self);

    /// Echo the full prompt about to be sent to the model.
    async fn show_prompt(&self, prompt: &str);

    /// Present the model's answer between banners.
    async fn show_answer(&self, answer: &str);

    /// Report a failed research round without leaving the loop.
    async fn show_error(&self, message: &str);

    async fn show_farewell(&self);

    /// Append a text line to the technical readout.
    async fn show_log(&self, line: &str);
}

/// Dynamically chosen display backend used by CLI components.
pub type Display = Arc<dyn AnyDisplay>;

/// Create a display. Prefer the rich TTY UI; fall back to plain printing.
pub fn make_display() -> Display {
    // Rich needs stderr to be a TTY so the spinner has somewhere to draw.
    if atty::is(atty::Stream::Stderr) {
        return rich::make_display();
    }
    plain::make_display()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_is_framed_by_fixed_width_rules() {
        let block = answer_block("Tariffs are rising.");
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].len(), BANNER_WIDTH);
        assert_eq!(lines[1], "LLM RESPONSE");
        assert_eq!(lines[3], "Tariffs are rising.");
        assert_eq!(lines[4], lines[0]);
    }
}
