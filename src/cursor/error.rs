use std::fmt;

/// Why a motion could not be carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("no more data")]
    NoMoreData,
    #[error("{0:?} not found")]
    NotFound(char),
    #[error("no more lines")]
    NoMoreLines,
}

/// The fallible cursor motions, used to label errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Advance,
    Backtrack,
    NextLine,
    PrevLine,
    AfterPrevCharInLine,
    PrevCharInLine,
    BeforeNextCharInLine,
    NextCharInLine,
}

impl Motion {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Advance => "advance",
            Self::Backtrack => "backtrack",
            Self::NextLine => "next_line",
            Self::PrevLine => "prev_line",
            Self::AfterPrevCharInLine => "after_prev_char_in_line",
            Self::PrevCharInLine => "prev_char_in_line",
            Self::BeforeNextCharInLine => "before_next_char_in_line",
            Self::NextCharInLine => "next_char_in_line",
        }
    }
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A failed motion, raised by cursors in strict mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{motion}: {kind}")]
pub struct NavError {
    pub motion: Motion,
    pub kind: ErrorKind,
}

impl NavError {
    pub const fn new(motion: Motion, kind: ErrorKind) -> Self {
        Self { motion, kind }
    }
}
