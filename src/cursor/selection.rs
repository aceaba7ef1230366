use super::buffer::Buffer;
use super::scan;

/// How a selection snaps to the text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Exact offsets: anchor and cursor position.
    #[default]
    Regular,
    /// Whole lines from the anchor's line to the cursor's line.
    Line,
}

/// An active selection.
///
/// `start` is the anchor, `end` follows the cursor. They are independently
/// valid offsets and `start <= end` is not guaranteed: the cursor may have
/// moved backwards since the selection began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    mode: SelectionMode,
    start: usize,
    end: usize,
}

impl Selection {
    /// Anchor a selection at `offset`.
    ///
    /// A regular selection starts as the single position `offset`, which
    /// is empty past the end of the buffer. A line selection covers the
    /// whole line right away.
    pub fn anchor(buffer: &Buffer, offset: usize, mode: SelectionMode) -> Self {
        let start = match mode {
            SelectionMode::Regular => offset,
            SelectionMode::Line => scan::line_start_hard(buffer, offset),
        };
        let mut selection = Self {
            mode,
            start,
            end: start,
        };
        if mode == SelectionMode::Line {
            selection.follow(buffer, offset);
        }
        selection
    }

    pub const fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub const fn start(&self) -> usize {
        self.start
    }

    pub const fn end(&self) -> usize {
        self.end
    }

    /// Re-derive the moving end after the cursor landed on `offset`.
    pub fn follow(&mut self, buffer: &Buffer, offset: usize) {
        self.end = match self.mode {
            SelectionMode::Regular if buffer.char_at(offset).is_none() => {
                buffer.len().saturating_sub(1)
            }
            SelectionMode::Regular => offset,
            SelectionMode::Line => scan::line_end(buffer, offset),
        };
    }

    /// The selected text.
    ///
    /// Regular selections cover both bounds inclusively. Line selections
    /// always yield whole lines, trailing newline included, whichever way
    /// the cursor moved.
    pub fn text(&self, buffer: &Buffer) -> String {
        match self.mode {
            SelectionMode::Regular => {
                let (lo, hi) = if self.start <= self.end {
                    (self.start, self.end)
                } else {
                    (self.end, self.start)
                };
                buffer.slice(lo..hi + 1)
            }
            SelectionMode::Line => {
                let (lo, hi) = if self.start <= self.end {
                    (self.start, self.end)
                } else {
                    (
                        scan::line_start_hard(buffer, self.end),
                        scan::line_end(buffer, self.start),
                    )
                };
                buffer.slice(lo..scan::through_newline(buffer, hi))
            }
        }
    }
}
