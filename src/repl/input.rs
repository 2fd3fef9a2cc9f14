//! Input handler for the REPL using rustyline
//!
//! Provides line editing with in-memory history and the interrupt rules of
//! the prompt loop: Ctrl-C on an empty line quits, Ctrl-C with text on the
//! line throws the text away and prompts again.

use rustyline::{
    Cmd, ConditionalEventHandler, DefaultEditor, Event, EventContext, EventHandler, KeyEvent,
    RepeatCount,
};
use rustyline::error::ReadlineError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::errors::Result;

/// Prompt marker shown before each line
pub const PROMPT_MARKER: &str = ">> ";

/// What a read produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A full line, untrimmed
    Line(String),

    /// Ctrl-C while text was on the line
    Cancelled,

    /// Ctrl-C on an empty line
    Interrupted,

    /// End of input (Ctrl-D)
    Eof,
}

/// Anything the prompt loop can read lines from
pub trait LineSource {
    /// Block until the next line or terminal event
    fn read_line(&mut self) -> Result<InputEvent>;
}

/// Records whether the line had text when Ctrl-C arrived
struct InterruptHandler {
    had_text: Arc<AtomicBool>,
}

impl ConditionalEventHandler for InterruptHandler {
    fn handle(&self, _evt: &Event, _n: RepeatCount, _positive: bool, ctx: &EventContext) -> Option<Cmd> {
        self.had_text.store(!ctx.line().is_empty(), Ordering::SeqCst);
        Some(Cmd::Interrupt)
    }
}

/// Input handler managing the readline interface
pub struct InputHandler {
    editor: DefaultEditor,
    prompt: String,
    had_text: Arc<AtomicBool>,
}

impl InputHandler {
    /// Create new input handler
    pub fn new() -> Result<Self> {
        let mut editor = DefaultEditor::new()?;
        let had_text = Arc::new(AtomicBool::new(false));

        editor.bind_sequence(
            KeyEvent::ctrl('C'),
            EventHandler::Conditional(Box::new(InterruptHandler {
                had_text: Arc::clone(&had_text),
            })),
        );

        Ok(InputHandler {
            editor,
            prompt: PROMPT_MARKER.to_string(),
            had_text,
        })
    }

    /// Keep a non-blank line in the in-memory history
    fn remember(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }
        if let Err(err) = self.editor.add_history_entry(trimmed) {
            debug!(%err, "line not added to history");
        }
    }
}

impl LineSource for InputHandler {
    fn read_line(&mut self) -> Result<InputEvent> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                self.remember(&line);
                Ok(InputEvent::Line(line))
            }
            Err(ReadlineError::Interrupted) => {
                if self.had_text.swap(false, Ordering::SeqCst) {
                    Ok(InputEvent::Cancelled)
                } else {
                    Ok(InputEvent::Interrupted)
                }
            }
            Err(ReadlineError::Eof) => Ok(InputEvent::Eof),
            Err(err) => Err(err.into()),
        }
    }
}
