use eyre::{Result, eyre};

/// What came back from asking the user for a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Text(String),
    Eof,
    Interrupted,
}

/// Source of user lines; the terminal editor in production, a script in tests.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Line>;

    /// Offer an accepted line to the source's recall history, if it keeps one.
    fn remember(&mut self, _line: &str) {}
}

/// Line editing and in-memory history backed by rustyline.
pub struct Editor {
    inner: rustyline::DefaultEditor,
}

impl Editor {
    pub fn new() -> Result<Self> {
        let inner = rustyline::DefaultEditor::new().map_err(|e| eyre!(e))?;
        Ok(Self { inner })
    }
}

impl LineSource for Editor {
    fn read_line(&mut self, prompt: &str) -> Result<Line> {
        use rustyline::error::ReadlineError::{Eof, Interrupted};

        match self.inner.readline(prompt) {
            Ok(line) => Ok(Line::Text(line)),
            Err(Eof) => Ok(Line::Eof),
            Err(Interrupted) => Ok(Line::Interrupted),
            Err(e) => Err(eyre!(e)),
        }
    }

    fn remember(&mut self, line: &str) {
        self.inner.add_history_entry(line).ok();
    }
}
