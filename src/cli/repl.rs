use eyre::Result;
use std::future::Future;

use crate::conversation::Conversation;
use crate::display::AnyDisplay;
use crate::research::Researcher;

use super::input::{Line, LineSource};

pub const PROMPT: &str = "> ";
const RESEARCHING: &str = "Researching...";

/// How a raw input line should be treated.
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Blank,
    Quit,
    Query(&'a str),
}

pub fn classify(line: &str) -> Command<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Command::Blank;
    }
    if ["quit", "exit", "q"]
        .iter()
        .any(|word| line.eq_ignore_ascii_case(word))
    {
        return Command::Quit;
    }
    Command::Query(line)
}

enum Outcome {
    Answered(String),
    Failed(eyre::Report),
    Interrupted,
}

/// Resolves on Ctrl-C; never resolves if the signal cannot be watched.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Run one research round with the spinner going, abandoning it if `interrupt` resolves first.
/// The spinner is stopped before returning no matter how the round ended.
async fn research_with_spinner(
    query: &str,
    display: &dyn AnyDisplay,
    researcher: &Researcher,
    conversation: &mut Conversation,
    interrupt: impl Future<Output = ()>,
) -> Result<Outcome> {
    let mut spinner = display.spinner();
    spinner.start(RESEARCHING)?;

    let outcome = tokio::select! {
        result = researcher.research(query, conversation, display) => match result {
            Ok(reply) => Outcome::Answered(reply),
            Err(e) => Outcome::Failed(e),
        },
        _ = interrupt => Outcome::Interrupted,
    };

    spinner.stop().await;
    Ok(outcome)
}

/// Read questions until the user leaves, answering each from a fresh search.
pub async fn interact_forever(
    input: &mut dyn LineSource,
    display: &dyn AnyDisplay,
    researcher: &Researcher,
    conversation: &mut Conversation,
) -> Result<()> {
    interact_until(input, display, researcher, conversation, interrupted).await
}

/// The loop itself; `interrupt` is called once per research round.
async fn interact_until<F, Fut>(
    input: &mut dyn LineSource,
    display: &dyn AnyDisplay,
    researcher: &Researcher,
    conversation: &mut Conversation,
    interrupt: F,
) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = ()>,
{
    loop {
        let line = match input.read_line(PROMPT)? {
            Line::Text(line) => line,
            Line::Eof | Line::Interrupted => break,
        };
        let query = match classify(&line) {
            Command::Blank => continue,
            Command::Quit => break,
            Command::Query(query) => query,
        };
        input.remember(query);

        let round = research_with_spinner(query, display, researcher, conversation, interrupt());
        match round.await? {
            Outcome::Answered(reply) => display.show_answer(&reply).await,
            Outcome::Failed(e) => {
                // The display reports it; the log only keeps a trace for RESEARCH_LOG=debug.
                tracing::debug!("research failed: {e:#}");
                display.show_error(&format!("{e:#}")).await;
            }
            Outcome::Interrupted => break,
        }
    }
    display.show_farewell().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;
    use crate::conversation::Turn;
    use crate::display::spinner::clear_sequence;
    use crate::research::tests::{FakeModel, FakeSearch, RecordingDisplay, article, researcher};

    /// Feeds prepared lines, then reports end of input.
    #[derive(Default)]
    struct ScriptedInput {
        lines: VecDeque<Line>,
        remembered: Vec<String>,
        prompts: usize,
    }

    impl ScriptedInput {
        fn new(lines: &[&str]) -> Self {
            ScriptedInput {
                lines: lines.iter().map(|l| Line::Text(l.to_string())).collect(),
                ..Default::default()
            }
        }
    }

    impl LineSource for ScriptedInput {
        fn read_line(&mut self, prompt: &str) -> Result<Line> {
            assert_eq!(prompt, PROMPT);
            self.prompts += 1;
            Ok(self.lines.pop_front().unwrap_or(Line::Eof))
        }

        fn remember(&mut self, line: &str) {
            self.remembered.push(line.to_string());
        }
    }

    struct Harness {
        search: Arc<FakeSearch>,
        model: Arc<FakeModel>,
        display: RecordingDisplay,
        spinner_output: Arc<Mutex<Vec<u8>>>,
        conversation: Conversation,
    }

    impl Harness {
        fn new(search: FakeSearch, model: FakeModel) -> Self {
            let (display, spinner_output) = RecordingDisplay::with_spinner();
            Harness {
                search: Arc::new(search),
                model: Arc::new(model),
                display,
                spinner_output,
                conversation: Conversation::new(),
            }
        }

        async fn run(&mut self, input: &mut ScriptedInput) {
            let researcher = researcher(&self.search, &self.model);
            interact_forever(input, &self.display, &researcher, &mut self.conversation)
                .await
                .unwrap();
        }

        /// Like `run`, but every research round is interrupted after `delay`.
        async fn run_interrupted_after(&mut self, input: &mut ScriptedInput, delay: Duration) {
            let researcher = researcher(&self.search, &self.model);
            let interrupt = || tokio::time::sleep(delay);
            interact_until(input, &self.display, &researcher, &mut self.conversation, interrupt)
                .await
                .unwrap();
        }

        fn spinner_text(&self) -> String {
            String::from_utf8_lossy(&self.spinner_output.lock().unwrap()).to_string()
        }

        fn spinner_was_cleared(&self) -> bool {
            self.spinner_text().ends_with(&clear_sequence(RESEARCHING))
        }
    }

    #[test]
    fn quit_words_match_case_insensitively() {
        for word in ["quit", "QUIT", "Exit", "q", "  Q  "] {
            assert_eq!(classify(word), Command::Quit, "{word:?}");
        }
        assert_eq!(classify(""), Command::Blank);
        assert_eq!(classify(" \t "), Command::Blank);
        assert_eq!(classify("  quitting time  "), Command::Query("quitting time"));
    }

    #[tokio::test]
    async fn answers_are_shown_between_prompts() {
        let search = FakeSearch {
            results: vec![
                article("EU sets EV tariffs"),
                article("China responds"),
                article("US weighs options"),
            ],
            ..Default::default()
        };
        let mut harness = Harness::new(search, FakeModel::replying(&["Tariffs climb; see EU sets EV tariffs."]));
        let mut input = ScriptedInput::new(&["latest news on electric vehicle tariffs", "quit"]);

        harness.run(&mut input).await;

        let events = harness.display.events();
        assert_eq!(events.len(), 3);
        let prompt = &events[0];
        assert!(prompt.contains("Article 1:\nTitle: EU sets EV tariffs"));
        assert!(prompt.contains("Article 2:\nTitle: China responds"));
        assert!(prompt.contains("Article 3:\nTitle: US weighs options"));
        assert_eq!(events[1], "answer: Tariffs climb; see EU sets EV tariffs.");
        assert_eq!(events[2], "farewell");
        assert_eq!(input.remembered, vec!["latest news on electric vehicle tariffs"]);
    }

    #[tokio::test]
    async fn blank_lines_only_reprompt() {
        let mut harness = Harness::new(FakeSearch::default(), FakeModel::default());
        let mut input = ScriptedInput::new(&["", "   ", "EXIT"]);

        harness.run(&mut input).await;

        assert_eq!(input.prompts, 3);
        assert!(harness.search.queries.lock().unwrap().is_empty());
        assert!(harness.conversation.is_empty());
        assert_eq!(harness.display.events(), vec!["farewell"]);
    }

    #[tokio::test]
    async fn end_of_input_says_goodbye() {
        let mut harness = Harness::new(FakeSearch::default(), FakeModel::default());
        let mut input = ScriptedInput {
            lines: VecDeque::from([Line::Interrupted]),
            ..Default::default()
        };
        harness.run(&mut input).await;
        assert_eq!(harness.display.events(), vec!["farewell"]);

        let mut input = ScriptedInput::new(&[]);
        harness.run(&mut input).await;
        assert_eq!(harness.display.events(), vec!["farewell", "farewell"]);
    }

    #[tokio::test]
    async fn second_query_carries_earlier_turns() {
        let search = FakeSearch {
            results: vec![article("One")],
            ..Default::default()
        };
        let mut harness = Harness::new(search, FakeModel::replying(&["a1", "a2"]));
        let mut input = ScriptedInput::new(&["q1", "q2", "q"]);

        harness.run(&mut input).await;

        let calls = harness.model.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        let turns = harness.conversation.turns();
        assert_eq!(turns.len(), 4);
        assert_eq!(calls[1].1, turns[..3].to_vec());
        assert_eq!(turns[1], Turn::assistant("a1"));
        assert_eq!(turns[3], Turn::assistant("a2"));
    }

    #[tokio::test]
    async fn failures_are_reported_and_the_loop_continues() {
        let search = FakeSearch {
            results: vec![article("One")],
            ..Default::default()
        };
        let mut harness = Harness::new(search, FakeModel::failing_once_then(&["second try"]));
        let mut input = ScriptedInput::new(&["q1", "q2", "quit"]);

        harness.run(&mut input).await;

        let events = harness.display.events();
        assert!(events[1].starts_with("error: "));
        assert!(events[1].contains("overloaded"));
        assert_eq!(events[3], "answer: second try");
        assert_eq!(events.last().map(String::as_str), Some("farewell"));
        assert_eq!(harness.conversation.len(), 2);
        assert!(harness.conversation.turns()[0].content.contains("User's Question: q2"));
        assert!(harness.spinner_was_cleared());
    }

    #[tokio::test]
    async fn search_outage_does_not_end_the_session() {
        let search = FakeSearch {
            fail: true,
            ..Default::default()
        };
        let mut harness = Harness::new(search, FakeModel::default());
        let mut input = ScriptedInput::new(&["q1", "q2"]);

        harness.run(&mut input).await;

        let events = harness.display.events();
        assert_eq!(events.len(), 3);
        assert!(events[0].contains("432"));
        assert!(events[1].contains("432"));
        assert_eq!(events[2], "farewell");
        assert_eq!(harness.search.queries.lock().unwrap().len(), 2);
        assert!(harness.spinner_was_cleared());
    }

    #[tokio::test]
    async fn failed_round_reports_once() {
        let (sender, mut log_lines) = tokio::sync::mpsc::unbounded_channel();
        let subscriber =
            crate::logging::display_subscriber(crate::logging::make_filter(None), sender);
        let _guard = tracing::subscriber::set_default(subscriber);

        let search = FakeSearch {
            fail: true,
            ..Default::default()
        };
        let mut harness = Harness::new(search, FakeModel::default());
        let mut input = ScriptedInput::new(&["q1", "quit"]);

        harness.run(&mut input).await;

        let errors: Vec<String> = harness
            .display
            .events()
            .into_iter()
            .filter(|e| e.starts_with("error: "))
            .collect();
        assert_eq!(errors.len(), 1);
        while let Ok(line) = log_lines.try_recv() {
            assert!(!line.contains("research failed"), "{line:?}");
        }
    }

    #[tokio::test]
    async fn ctrl_c_during_research_exits_cleanly() {
        let search = FakeSearch {
            results: vec![article("One")],
            ..Default::default()
        };
        let model = FakeModel {
            stall: true,
            ..Default::default()
        };
        let mut harness = Harness::new(search, model);
        let mut input = ScriptedInput::new(&["q1", "q2"]);

        harness
            .run_interrupted_after(&mut input, Duration::from_millis(150))
            .await;

        assert_eq!(input.prompts, 1);
        let events = harness.display.events();
        assert_eq!(events.len(), 2);
        assert!(events[0].starts_with("prompt: "));
        assert_eq!(events[1], "farewell");
        assert!(harness.conversation.is_empty());
        assert!(harness.spinner_text().contains("Researching..."));
        assert!(harness.spinner_was_cleared());
    }

    #[tokio::test]
    async fn spinner_is_cleared_after_an_answer() {
        let mut harness = Harness::new(FakeSearch::default(), FakeModel::replying(&["ok"]));
        let mut input = ScriptedInput::new(&["q1"]);

        harness
            .run_interrupted_after(&mut input, Duration::from_secs(60))
            .await;

        assert_eq!(harness.display.events()[1], "answer: ok");
        assert!(harness.spinner_was_cleared());
    }
}
