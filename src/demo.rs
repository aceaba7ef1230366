//! A guided walkthrough of the cursor API.
//!
//! Runs a fixed sequence of motions and selections over some text and
//! records what each step printed. The CLI driver uses it to demonstrate
//! the cursor against [`SAMPLE`] or a user-supplied file.

use crate::cursor::{Cursor, Mode, NavError, SelectionMode};

/// Indented, brace- and call-shaped text that exercises every step.
pub const SAMPLE: &str = "
  first line
  second line
  blockTest {
    Hello, world!
  }
  fakeFunc(a, b, c,
    d, e, f, g, h, i)
  last line
";

/// One walkthrough step and the text it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub title: &'static str,
    pub output: String,
}

impl Step {
    const fn new(title: &'static str, output: String) -> Self {
        Self { title, output }
    }
}

/// Run the walkthrough over `text`.
///
/// In lax mode every step runs and failed motions are simply skipped. In
/// strict mode the first failed motion aborts the walkthrough.
///
/// # Errors
///
/// In strict mode, returns the [`NavError`] of the first motion that fails,
/// e.g. `prev_line` on text without enough lines.
pub fn walkthrough(text: &str, mode: Mode) -> Result<Vec<Step>, NavError> {
    let mut c = Cursor::new(text, mode);
    let mut steps = Vec::with_capacity(6);

    c.next_line()?;
    steps.push(Step::new("next_line", c.peek_line()));

    c.last_line();
    steps.push(Step::new("last_line", c.peek_line()));

    c.prev_line()?;
    c.prev_line()?;
    c.next_char_in_line('(')?;
    c.advance()?;
    c.start_selection(SelectionMode::Regular);
    c.next_line()?;
    c.before_next_char_in_line(')')?;
    steps.push(Step::new(
        "next_char_in_line, advance, regular selection",
        c.end_selection(),
    ));

    for _ in 0..4 {
        c.prev_line()?;
    }
    c.start_selection(SelectionMode::Line);
    c.next_line()?;
    c.next_line()?;
    steps.push(Step::new("line selection", c.end_selection()));

    c.start_selection(SelectionMode::Line);
    c.prev_line()?;
    c.prev_line()?;
    steps.push(Step::new(
        "prev_line, reverse line selection",
        c.end_selection(),
    ));

    c.first_line();
    steps.push(Step::new("first_line", c.peek_line()));

    tracing::debug!(
        steps = steps.len(),
        mode = mode.as_str(),
        "walkthrough finished"
    );
    Ok(steps)
}
