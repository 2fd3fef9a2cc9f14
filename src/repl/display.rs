//! Answer rendering
//!
//! Writes answers to any `Write`: stdout in the binary, a buffer in tests.
//! Streamed fragments are flushed as they arrive.

use colored::Colorize;
use std::io::Write;
use tracing::debug;

use crate::errors::Result;
use crate::lookup::Answer;
use crate::streaming::Streamer;

/// Print one answer followed by its trailing newline
///
/// A streamed answer is closed exactly once, whether it ran to the end or
/// failed part way; the failure is returned after the close.
pub async fn render<W: Write>(answer: Answer, out: &mut W) -> Result<()> {
    match answer {
        Answer::Text(text) => {
            writeln!(out, "{}", text)?;
        }
        Answer::Lines(lines) => {
            for line in &lines {
                writeln!(out, "{}", line)?;
            }
        }
        Answer::NotFound => {}
        Answer::Stream(mut streamer) => {
            let drained = drain_stream(streamer.as_mut(), out).await;
            streamer.close();
            let fragments = drained?;
            debug!(fragments, "streamed answer rendered");
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Copy fragments to `out` until end-of-stream, returning how many arrived
pub async fn drain_stream<W: Write>(streamer: &mut dyn Streamer, out: &mut W) -> Result<usize> {
    let mut count = 0;
    while let Some(fragment) = streamer.recv().await? {
        write!(out, "{}", fragment)?;
        out.flush()?;
        count += 1;
    }
    Ok(count)
}

/// Report a fatal error on stderr
pub fn show_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}
