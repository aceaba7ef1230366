use super::buffer::Buffer;
use super::error::{ErrorKind, Motion, NavError};
use super::scan;
use super::selection::{Selection, SelectionMode};

/// Failure policy of a cursor, fixed at construction.
#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Failed motions return `Ok(false)` and leave the cursor untouched.
    #[default]
    Lax,
    /// Failed motions return a labeled [`NavError`].
    Strict,
}

impl Mode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lax => "lax",
            Self::Strict => "strict",
        }
    }

    /// Apply this policy to a failed motion.
    const fn reject(self, err: NavError) -> Result<bool, NavError> {
        match self {
            Self::Lax => Ok(false),
            Self::Strict => Err(err),
        }
    }
}

/// A stateful cursor over an immutable [`Buffer`].
///
/// Every motion computes its target with the pure functions in
/// [`scan`](super::scan) and only commits it on success, so a failed motion
/// never leaves a partial move behind. After each committed motion the
/// active selection, if any, follows the new offset.
#[derive(Debug, Clone)]
pub struct Cursor {
    buffer: Buffer,
    mode: Mode,
    offset: usize,
    selection: Option<Selection>,
}

impl Cursor {
    /// Create a cursor at offset 0 of `text`.
    pub fn new(text: &str, mode: Mode) -> Self {
        Self::from_buffer(Buffer::from_text(text), mode)
    }

    /// Create a cursor at offset 0 of a shared buffer.
    pub const fn from_buffer(buffer: Buffer, mode: Mode) -> Self {
        Self {
            buffer,
            mode,
            offset: 0,
            selection: None,
        }
    }

    pub fn lax(text: &str) -> Self {
        Self::new(text, Mode::Lax)
    }

    pub fn strict(text: &str) -> Self {
        Self::new(text, Mode::Strict)
    }

    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Current offset, in code points. Always within `[0, len]`.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    // --- Position queries ---

    pub fn peek_char(&self) -> Option<char> {
        self.buffer.char_at(self.offset)
    }

    pub fn peek_prev_char(&self) -> Option<char> {
        self.buffer.char_before(self.offset)
    }

    pub fn peek_next_char(&self) -> Option<char> {
        self.buffer.char_at(self.offset + 1)
    }

    /// Text of the current line from its semantic start, trailing newline
    /// included when present.
    pub fn peek_line(&self) -> String {
        scan::line_text(&self.buffer, self.offset)
    }

    // --- Single steps ---

    /// Step one position forward.
    ///
    /// # Errors
    ///
    /// In strict mode, returns [`ErrorKind::NoMoreData`] past the end.
    pub fn advance(&mut self) -> Result<bool, NavError> {
        let target = scan::advance(&self.buffer, self.offset);
        self.attempt(Motion::Advance, target)
    }

    /// Step one position back.
    ///
    /// # Errors
    ///
    /// In strict mode, returns [`ErrorKind::NoMoreData`] at offset 0.
    pub fn backtrack(&mut self) -> Result<bool, NavError> {
        let target = scan::backtrack(&self.buffer, self.offset);
        self.attempt(Motion::Backtrack, target)
    }

    // --- Line boundaries ---

    pub fn line_start(&mut self) {
        self.settle(scan::line_start(&self.buffer, self.offset));
    }

    pub fn line_start_hard(&mut self) {
        self.settle(scan::line_start_hard(&self.buffer, self.offset));
    }

    pub fn line_end(&mut self) {
        self.settle(scan::line_end(&self.buffer, self.offset));
    }

    pub fn first_line(&mut self) {
        self.settle(scan::first_line(&self.buffer));
    }

    pub fn last_line(&mut self) {
        self.settle(scan::last_line(&self.buffer));
    }

    // --- Multi-line motion ---

    /// Move to the start of the following line.
    ///
    /// # Errors
    ///
    /// In strict mode, returns [`ErrorKind::NoMoreLines`] on the last line.
    pub fn next_line(&mut self) -> Result<bool, NavError> {
        let target = scan::next_line(&self.buffer, self.offset);
        self.attempt(Motion::NextLine, target)
    }

    /// Move to the semantic start of the preceding line.
    ///
    /// # Errors
    ///
    /// In strict mode, returns [`ErrorKind::NoMoreLines`] on the first line.
    pub fn prev_line(&mut self) -> Result<bool, NavError> {
        let target = scan::prev_line(&self.buffer, self.offset);
        self.attempt(Motion::PrevLine, target)
    }

    // --- In-line search ---

    /// Land just after the previous `target` on this line.
    ///
    /// # Errors
    ///
    /// In strict mode, returns [`ErrorKind::NotFound`].
    pub fn after_prev_char_in_line(&mut self, target: char) -> Result<bool, NavError> {
        let found = scan::after_prev_char_in_line(&self.buffer, self.offset, target);
        self.attempt(Motion::AfterPrevCharInLine, found)
    }

    /// Land on the previous `target` on this line.
    ///
    /// # Errors
    ///
    /// In strict mode, returns [`ErrorKind::NotFound`].
    pub fn prev_char_in_line(&mut self, target: char) -> Result<bool, NavError> {
        let found = scan::prev_char_in_line(&self.buffer, self.offset, target);
        self.attempt(Motion::PrevCharInLine, found)
    }

    /// Land just before the next `target` on this line.
    ///
    /// # Errors
    ///
    /// In strict mode, returns [`ErrorKind::NotFound`].
    pub fn before_next_char_in_line(&mut self, target: char) -> Result<bool, NavError> {
        let found = scan::before_next_char_in_line(&self.buffer, self.offset, target);
        self.attempt(Motion::BeforeNextCharInLine, found)
    }

    /// Land on the next `target` on this line.
    ///
    /// # Errors
    ///
    /// In strict mode, returns [`ErrorKind::NotFound`].
    pub fn next_char_in_line(&mut self, target: char) -> Result<bool, NavError> {
        let found = scan::next_char_in_line(&self.buffer, self.offset, target);
        self.attempt(Motion::NextCharInLine, found)
    }

    // --- Selection ---

    /// Begin a selection anchored at the current offset, replacing any
    /// selection already in progress.
    pub fn start_selection(&mut self, mode: SelectionMode) {
        let selection = Selection::anchor(&self.buffer, self.offset, mode);
        tracing::debug!(
            ?mode,
            start = selection.start(),
            end = selection.end(),
            "selection started"
        );
        self.selection = Some(selection);
    }

    /// Text of the active selection, or an empty string without one.
    pub fn peek_selection(&self) -> String {
        self.selection
            .map(|selection| selection.text(&self.buffer))
            .unwrap_or_default()
    }

    pub fn peek_selection_start(&self) -> Option<char> {
        self.selection
            .and_then(|selection| self.buffer.char_at(selection.start()))
    }

    pub fn peek_selection_end(&self) -> Option<char> {
        self.selection
            .and_then(|selection| self.buffer.char_at(selection.end()))
    }

    /// Finish the active selection and return its text.
    pub fn end_selection(&mut self) -> String {
        let text = self.peek_selection();
        if let Some(selection) = self.selection.take() {
            tracing::debug!(
                mode = ?selection.mode(),
                start = selection.start(),
                end = selection.end(),
                chars = text.chars().count(),
                "selection ended"
            );
        }
        text
    }

    // --- Private helpers ---

    /// Commit or reject the outcome of a fallible motion.
    fn attempt(
        &mut self,
        motion: Motion,
        target: Result<usize, ErrorKind>,
    ) -> Result<bool, NavError> {
        match target {
            Ok(offset) => {
                self.settle(offset);
                Ok(true)
            }
            Err(kind) => {
                let err = NavError::new(motion, kind);
                tracing::trace!(
                    %err,
                    offset = self.offset,
                    mode = self.mode.as_str(),
                    "motion failed"
                );
                self.mode.reject(err)
            }
        }
    }

    /// Move to `offset` and let the selection follow.
    fn settle(&mut self, offset: usize) {
        debug_assert!(offset <= self.buffer.len());
        self.offset = offset;
        if let Some(selection) = self.selection.as_mut() {
            selection.follow(&self.buffer, offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lax_at(text: &str, steps: usize) -> Cursor {
        let mut cursor = Cursor::lax(text);
        for _ in 0..steps {
            assert_eq!(cursor.advance(), Ok(true));
        }
        cursor
    }

    // --- Construction and peeks ---

    #[test]
    fn test_new_cursor_starts_at_origin_without_selection() {
        let cursor = Cursor::lax("abc");
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.mode(), Mode::Lax);
        assert!(cursor.selection().is_none());
        assert_eq!(cursor.peek_selection(), "");
    }

    #[test]
    fn test_peeks_around_offset() {
        let cursor = lax_at("abc", 1);
        assert_eq!(cursor.peek_prev_char(), Some('a'));
        assert_eq!(cursor.peek_char(), Some('b'));
        assert_eq!(cursor.peek_next_char(), Some('c'));
    }

    #[test]
    fn test_peeks_out_of_range_are_none() {
        let cursor = Cursor::lax("a");
        assert_eq!(cursor.peek_prev_char(), None);
        assert_eq!(cursor.peek_next_char(), None);

        let cursor = lax_at("a", 1);
        assert_eq!(cursor.peek_char(), None);
    }

    #[test]
    fn test_cursors_share_a_buffer() {
        let buffer = Buffer::from_text("abc\ndef");
        let mut first = Cursor::from_buffer(buffer.clone(), Mode::Lax);
        let second = Cursor::from_buffer(buffer, Mode::Strict);
        first.last_line();
        assert_eq!(first.offset(), 4);
        assert_eq!(second.offset(), 0);
    }

    // --- Failure policy ---

    #[test]
    fn test_advance_at_end_lax_returns_false() {
        let mut cursor = lax_at("ab", 2);
        assert_eq!(cursor.advance(), Ok(false));
        assert_eq!(cursor.offset(), 2);
    }

    #[test]
    fn test_advance_at_end_strict_raises_no_more_data() {
        let mut cursor = Cursor::strict("ab");
        cursor.advance().unwrap();
        cursor.advance().unwrap();
        let err = cursor.advance().unwrap_err();
        assert_eq!(err, NavError::new(Motion::Advance, ErrorKind::NoMoreData));
        assert_eq!(cursor.offset(), 2);
    }

    #[test]
    fn test_backtrack_at_origin_strict_raises() {
        let mut cursor = Cursor::strict("ab");
        let err = cursor.backtrack().unwrap_err();
        assert_eq!(err.to_string(), "backtrack: no more data");
    }

    #[test]
    fn test_failed_search_rolls_back_in_both_modes() {
        for mode in [Mode::Lax, Mode::Strict] {
            let mut cursor = Cursor::new("ab(c\nd)", mode);
            cursor.advance().unwrap();
            let result = cursor.next_char_in_line(')');
            assert_ne!(result, Ok(true));
            assert_eq!(cursor.offset(), 1);
        }
    }

    #[test]
    fn test_failed_motion_keeps_selection_untouched() {
        let mut cursor = lax_at("abc\ndef", 5);
        cursor.start_selection(SelectionMode::Regular);
        let before = cursor.selection().copied();
        assert_eq!(cursor.next_line(), Ok(false));
        assert_eq!(cursor.selection().copied(), before);
    }

    // --- Line motion ---

    #[test]
    fn test_prev_line_from_origin_fails() {
        let mut cursor = Cursor::strict("abc\ndef\nghi");
        let err = cursor.prev_line().unwrap_err();
        assert_eq!(err.kind, ErrorKind::NoMoreLines);
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_next_line_then_peek_line() {
        let mut cursor = Cursor::lax("abc\ndef\nghi");
        assert_eq!(cursor.next_line(), Ok(true));
        assert_eq!(cursor.offset(), 4);
        assert_eq!(cursor.peek_line(), "def\n");
    }

    #[test]
    fn test_peek_line_does_not_move() {
        let cursor = lax_at("  abc\ndef", 4);
        assert_eq!(cursor.peek_line(), "abc\n");
        assert_eq!(cursor.offset(), 4);
    }

    #[test]
    fn test_line_start_and_hard_start() {
        let mut cursor = lax_at("x\n  abc", 6);
        cursor.line_start();
        assert_eq!(cursor.offset(), 4);
        cursor.line_start_hard();
        assert_eq!(cursor.offset(), 2);
    }

    #[test]
    fn test_line_start_after_last_line_with_trailing_newline() {
        let mut cursor = Cursor::lax("abc\ndef\n");
        cursor.last_line();
        assert_eq!(cursor.offset(), 7);
        cursor.line_start();
        assert_eq!(cursor.offset(), 7);
        assert_eq!(cursor.peek_line(), "def\n");
        assert_eq!(cursor.prev_line(), Ok(true));
        assert_eq!(cursor.offset(), 4);
    }

    #[test]
    fn test_line_end_then_first_and_last_line() {
        let mut cursor = Cursor::lax("\tabc\ndef");
        cursor.first_line();
        assert_eq!(cursor.peek_char(), Some('a'));
        cursor.line_end();
        assert_eq!(cursor.peek_char(), Some('c'));
        cursor.last_line();
        assert_eq!(cursor.peek_char(), Some('d'));
    }

    // --- In-line search ---

    #[test]
    fn test_in_line_search_landings() {
        let mut cursor = Cursor::lax("call(a, b)");
        assert_eq!(cursor.next_char_in_line('('), Ok(true));
        assert_eq!(cursor.offset(), 4);
        assert_eq!(cursor.before_next_char_in_line(')'), Ok(true));
        assert_eq!(cursor.peek_char(), Some('b'));
        assert_eq!(cursor.prev_char_in_line(','), Ok(true));
        assert_eq!(cursor.peek_char(), Some(','));
        assert_eq!(cursor.after_prev_char_in_line('('), Ok(true));
        assert_eq!(cursor.peek_char(), Some('a'));
    }

    #[test]
    fn test_strict_not_found_names_motion_and_target() {
        let mut cursor = Cursor::strict("abc");
        let err = cursor.prev_char_in_line('z').unwrap_err();
        assert_eq!(err.motion, Motion::PrevCharInLine);
        assert_eq!(err.kind, ErrorKind::NotFound('z'));
    }

    // --- Selection ---

    #[test]
    fn test_regular_selection_past_end() {
        let mut cursor = lax_at("abc", 1);
        cursor.start_selection(SelectionMode::Regular);
        cursor.advance().unwrap();
        cursor.advance().unwrap();
        assert_eq!(cursor.offset(), 3);
        assert_eq!(cursor.end_selection(), "bc");
        assert!(cursor.selection().is_none());
    }

    #[test]
    fn test_regular_selection_started_past_end_is_empty() {
        let mut cursor = lax_at("abc", 3);
        cursor.start_selection(SelectionMode::Regular);
        assert_eq!(cursor.peek_selection(), "");
        assert_eq!(cursor.backtrack(), Ok(true));
        assert_eq!(cursor.end_selection(), "c");
    }

    #[test]
    fn test_line_selection_survives_failed_prev_line() {
        for steps in 0..3 {
            let mut cursor = lax_at("abc\ndef\n", steps);
            cursor.start_selection(SelectionMode::Line);
            assert_eq!(cursor.prev_line(), Ok(false));
            assert_eq!(cursor.offset(), steps);
            assert_eq!(cursor.end_selection(), "abc\n");
        }
    }

    #[test]
    fn test_selection_start_and_end_chars() {
        let mut cursor = lax_at("hello", 1);
        assert_eq!(cursor.peek_selection_start(), None);
        cursor.start_selection(SelectionMode::Regular);
        cursor.advance().unwrap();
        cursor.advance().unwrap();
        assert_eq!(cursor.peek_selection_start(), Some('e'));
        assert_eq!(cursor.peek_selection_end(), Some('l'));
        assert_eq!(cursor.peek_selection(), "ell");
    }

    #[test]
    fn test_end_selection_without_selection_is_empty() {
        let mut cursor = Cursor::lax("abc");
        assert_eq!(cursor.end_selection(), "");
    }

    #[test]
    fn test_reverse_line_selection_yields_whole_lines() {
        let mut cursor = Cursor::lax("one\ntwo\nthree\n");
        cursor.next_line().unwrap();
        cursor.next_line().unwrap();
        cursor.start_selection(SelectionMode::Line);
        cursor.prev_line().unwrap();
        assert_eq!(cursor.end_selection(), "two\nthree\n");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone, Copy)]
        enum Step {
            Advance,
            Backtrack,
            LineStart,
            LineStartHard,
            LineEnd,
            FirstLine,
            LastLine,
            NextLine,
            PrevLine,
            AfterPrev(char),
            Prev(char),
            BeforeNext(char),
            Next(char),
        }

        fn step() -> impl Strategy<Value = Step> {
            let target = prop::sample::select(vec!['a', '(', ' ']);
            prop_oneof![
                Just(Step::Advance),
                Just(Step::Backtrack),
                Just(Step::LineStart),
                Just(Step::LineStartHard),
                Just(Step::LineEnd),
                Just(Step::FirstLine),
                Just(Step::LastLine),
                Just(Step::NextLine),
                Just(Step::PrevLine),
                target.clone().prop_map(Step::AfterPrev),
                target.clone().prop_map(Step::Prev),
                target.clone().prop_map(Step::BeforeNext),
                target.prop_map(Step::Next),
            ]
        }

        fn apply(cursor: &mut Cursor, step: Step) -> Result<bool, NavError> {
            match step {
                Step::Advance => cursor.advance(),
                Step::Backtrack => cursor.backtrack(),
                Step::LineStart => {
                    cursor.line_start();
                    Ok(true)
                }
                Step::LineStartHard => {
                    cursor.line_start_hard();
                    Ok(true)
                }
                Step::LineEnd => {
                    cursor.line_end();
                    Ok(true)
                }
                Step::FirstLine => {
                    cursor.first_line();
                    Ok(true)
                }
                Step::LastLine => {
                    cursor.last_line();
                    Ok(true)
                }
                Step::NextLine => cursor.next_line(),
                Step::PrevLine => cursor.prev_line(),
                Step::AfterPrev(c) => cursor.after_prev_char_in_line(c),
                Step::Prev(c) => cursor.prev_char_in_line(c),
                Step::BeforeNext(c) => cursor.before_next_char_in_line(c),
                Step::Next(c) => cursor.next_char_in_line(c),
            }
        }

        proptest! {
            #[test]
            fn offset_stays_in_bounds_and_failures_roll_back(
                text in "[ab( \t\n]{0,32}",
                steps in prop::collection::vec(step(), 0..24),
                line_mode in any::<bool>(),
            ) {
                let mut cursor = Cursor::lax(&text);
                let mode = if line_mode { SelectionMode::Line } else { SelectionMode::Regular };
                cursor.start_selection(mode);

                for step in steps {
                    let offset = cursor.offset();
                    let selection = cursor.selection().copied();
                    let moved = apply(&mut cursor, step);

                    prop_assert!(cursor.offset() <= cursor.buffer().len());
                    if moved == Ok(false) {
                        prop_assert_eq!(cursor.offset(), offset);
                        prop_assert_eq!(cursor.selection().copied(), selection);
                    }
                }
            }

            #[test]
            fn strict_and_lax_agree_on_offsets(
                text in "[ab( \n]{0,32}",
                steps in prop::collection::vec(step(), 0..24),
            ) {
                let mut lax = Cursor::lax(&text);
                let mut strict = Cursor::strict(&text);

                for step in steps {
                    let lax_result = apply(&mut lax, step);
                    let strict_result = apply(&mut strict, step);
                    prop_assert_eq!(lax_result.unwrap_or(false), strict_result.is_ok());
                    prop_assert_eq!(lax.offset(), strict.offset());
                }
            }

            #[test]
            fn line_boundaries_are_idempotent(
                text in "[ab \t\n]{0,32}",
                advance_by in 0..40usize,
            ) {
                let mut cursor = Cursor::lax(&text);
                for _ in 0..advance_by {
                    cursor.advance().unwrap();
                }

                let mut scratch = cursor.clone();
                scratch.line_start();
                let once = scratch.offset();
                scratch.line_start();
                prop_assert_eq!(scratch.offset(), once);

                let mut scratch = cursor.clone();
                scratch.line_end();
                let once = scratch.offset();
                scratch.line_end();
                prop_assert_eq!(scratch.offset(), once);

                let mut scratch = cursor.clone();
                scratch.first_line();
                let once = scratch.offset();
                scratch.first_line();
                prop_assert_eq!(scratch.offset(), once);

                let mut scratch = cursor;
                scratch.last_line();
                let once = scratch.offset();
                scratch.last_line();
                prop_assert_eq!(scratch.offset(), once);
                scratch.line_start();
                prop_assert_eq!(scratch.offset(), once);
            }
        }
    }
}
