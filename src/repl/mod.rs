//! REPL (Read-Eval-Print Loop) and single-shot driver
//!
//! Both modes share the same path: build a [`Query`], hand it to the
//! [`Translator`], render the [`Answer`]. Queries run strictly one after
//! another and any lookup error ends the session.

pub mod display;
pub mod input;

use std::io::Write;
use tracing::debug;

use crate::errors::Result;
use crate::lookup::{Query, Translator};
pub use crate::repl::display::{render, show_error};
pub use crate::repl::input::{InputEvent, InputHandler, LineSource};

/// Why an interactive session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// End of input
    Eof,
    /// Ctrl-C on an empty line
    Interrupted,
}

/// Interactive session over a translator
pub struct ReplSession<'a> {
    translator: &'a dyn Translator,
    lookups: usize,
}

impl<'a> ReplSession<'a> {
    /// Create new session
    pub fn new(translator: &'a dyn Translator) -> Self {
        ReplSession {
            translator,
            lookups: 0,
        }
    }

    /// Look up one query and print the answer
    pub async fn lookup<W: Write>(&mut self, query: &Query, out: &mut W) -> Result<()> {
        debug!(query = %query, "lookup");
        let answer = self.translator.lookup(query).await?;
        self.lookups += 1;
        render(answer, out).await
    }

    /// Read, look up and print until end of input or interrupt
    ///
    /// Blank lines are skipped. Ctrl-C with text on the line re-prompts.
    pub async fn run<S, W>(&mut self, input: &mut S, out: &mut W) -> Result<SessionEnd>
    where
        S: LineSource,
        W: Write,
    {
        loop {
            match input.read_line()? {
                InputEvent::Line(line) => {
                    let Some(query) = Query::new(&line) else {
                        continue;
                    };
                    self.lookup(&query, out).await?;
                }
                InputEvent::Cancelled => continue,
                InputEvent::Interrupted => return Ok(SessionEnd::Interrupted),
                InputEvent::Eof => return Ok(SessionEnd::Eof),
            }
        }
    }

    /// Number of lookups performed so far
    pub fn lookup_count(&self) -> usize {
        self.lookups
    }
}

/// Single-shot mode: one lookup, then done
pub async fn run_once<W: Write>(translator: &dyn Translator, query: &Query, out: &mut W) -> Result<()> {
    ReplSession::new(translator).lookup(query, out).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LookupError;
    use crate::lookup::Answer;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Echoes queries back and records what it was asked
    #[derive(Default)]
    struct EchoTranslator {
        seen: Mutex<Vec<String>>,
        fail_on: Option<String>,
    }

    #[async_trait]
    impl Translator for EchoTranslator {
        async fn lookup(&self, query: &Query) -> Result<Answer> {
            self.seen.lock().unwrap().push(query.as_str().to_string());
            if self.fail_on.as_deref() == Some(query.as_str()) {
                return Err(LookupError::StreamingError("boom".to_string()));
            }
            Ok(Answer::Text(format!("<{}>", query)))
        }
    }

    struct ScriptedInput(VecDeque<InputEvent>);

    impl ScriptedInput {
        fn new(events: Vec<InputEvent>) -> Self {
            ScriptedInput(events.into())
        }
    }

    impl LineSource for ScriptedInput {
        fn read_line(&mut self) -> Result<InputEvent> {
            Ok(self.0.pop_front().unwrap_or(InputEvent::Eof))
        }
    }

    fn line(text: &str) -> InputEvent {
        InputEvent::Line(text.to_string())
    }

    #[tokio::test]
    async fn test_lines_are_trimmed() {
        let translator = EchoTranslator::default();
        let mut session = ReplSession::new(&translator);
        let mut input = ScriptedInput::new(vec![line("  hello  ")]);
        let mut out = Vec::new();

        let end = session.run(&mut input, &mut out).await.unwrap();

        assert_eq!(end, SessionEnd::Eof);
        assert_eq!(*translator.seen.lock().unwrap(), vec!["hello"]);
        assert_eq!(String::from_utf8(out).unwrap(), "<hello>\n");
    }

    #[tokio::test]
    async fn test_blank_lines_skip_lookup() {
        let translator = EchoTranslator::default();
        let mut session = ReplSession::new(&translator);
        let mut input = ScriptedInput::new(vec![line(""), line("   "), line("word")]);
        let mut out = Vec::new();

        session.run(&mut input, &mut out).await.unwrap();

        assert_eq!(session.lookup_count(), 1);
        assert_eq!(*translator.seen.lock().unwrap(), vec!["word"]);
    }

    #[tokio::test]
    async fn test_interrupt_on_empty_line_ends_session() {
        let translator = EchoTranslator::default();
        let mut session = ReplSession::new(&translator);
        let mut input = ScriptedInput::new(vec![
            line("one"),
            InputEvent::Interrupted,
            line("never"),
        ]);
        let mut out = Vec::new();

        let end = session.run(&mut input, &mut out).await.unwrap();

        assert_eq!(end, SessionEnd::Interrupted);
        assert_eq!(*translator.seen.lock().unwrap(), vec!["one"]);
    }

    #[tokio::test]
    async fn test_cancelled_line_reprompts() {
        let translator = EchoTranslator::default();
        let mut session = ReplSession::new(&translator);
        let mut input = ScriptedInput::new(vec![
            InputEvent::Cancelled,
            line("two"),
            InputEvent::Cancelled,
            InputEvent::Interrupted,
        ]);
        let mut out = Vec::new();

        let end = session.run(&mut input, &mut out).await.unwrap();

        assert_eq!(end, SessionEnd::Interrupted);
        assert_eq!(session.lookup_count(), 1);
    }

    #[tokio::test]
    async fn test_lookup_error_aborts_session() {
        let translator = EchoTranslator {
            fail_on: Some("bad".to_string()),
            ..Default::default()
        };
        let mut session = ReplSession::new(&translator);
        let mut input = ScriptedInput::new(vec![line("good"), line("bad"), line("after")]);
        let mut out = Vec::new();

        let result = session.run(&mut input, &mut out).await;

        assert!(result.is_err());
        assert_eq!(*translator.seen.lock().unwrap(), vec!["good", "bad"]);
        assert_eq!(String::from_utf8(out).unwrap(), "<good>\n");
    }

    #[tokio::test]
    async fn test_run_once() {
        let translator = EchoTranslator::default();
        let query = Query::new("take off").unwrap();
        let mut out = Vec::new();

        run_once(&translator, &query, &mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "<take off>\n");
    }
}
