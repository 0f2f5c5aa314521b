use super::{AnyDisplay, FAREWELL, Spinner, TITLE, answer_block, rule};

struct Plain;

#[async_trait::async_trait]
impl AnyDisplay for Plain {
    fn spinner(&self) -> Spinner {
        Spinner::silent()
    }

    async fn show_greeting(&self) {
        println!("{TITLE}\n{}\n\nEnter your question (or 'quit' to exit):\n", rule());
    }

    async fn show_prompt(&self, prompt: &str) {
        println!("\nFull Input Prompt -\n{prompt}");
    }

    async fn show_answer(&self, answer: &str) {
        println!("{}", answer_block(answer));
    }

    async fn show_error(&self, message: &str) {
        eprintln!("error: {message}");
    }

    async fn show_farewell(&self) {
        println!("{FAREWELL}");
    }

    async fn show_log(&self, line: &str) {
        eprintln!("log: {}", line.trim_end());
    }
}

/// Minimal stdout display: prints prompts and answers linearly.
pub fn make_display() -> super::Display {
    std::sync::Arc::new(Plain)
}
