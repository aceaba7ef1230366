//! Pure boundary and search functions over a [`Buffer`].
//!
//! Each function takes a buffer and an offset and returns the offset a
//! motion would land on, without any cursor state. Fallible motions return
//! the [`ErrorKind`] that stopped them; the caller decides what a failure
//! means.

use super::buffer::Buffer;
use super::error::ErrorKind;

/// Newline, tab or space: skipped when looking for a line's semantic start.
const fn is_line_space(c: char) -> bool {
    matches!(c, '\n' | '\t' | ' ')
}

/// Tab or space.
const fn is_indent(c: char) -> bool {
    matches!(c, '\t' | ' ')
}

/// Index of the nearest newline strictly before `offset`.
fn preceding_newline(buffer: &Buffer, offset: usize) -> Option<usize> {
    (0..offset.min(buffer.len()))
        .rev()
        .find(|&i| buffer.char_at(i) == Some('\n'))
}

/// Advance from `pos` while `skip` matches. Stops on the last character
/// rather than stepping past the end.
fn skip_forward(buffer: &Buffer, mut pos: usize, skip: impl Fn(char) -> bool) -> usize {
    while buffer.char_at(pos).is_some_and(&skip) && buffer.char_at(pos + 1).is_some() {
        pos += 1;
    }
    pos
}

/// Skip newlines and indentation forward from the newline before `offset`.
/// May stop on a newline that ends the buffer.
fn semantic_start(buffer: &Buffer, offset: usize) -> usize {
    let from = preceding_newline(buffer, offset).unwrap_or(0);
    skip_forward(buffer, from, is_line_space)
}

/// One position forward.
///
/// # Errors
///
/// Returns [`ErrorKind::NoMoreData`] when `offset` is already past the end.
pub fn advance(buffer: &Buffer, offset: usize) -> Result<usize, ErrorKind> {
    buffer
        .char_at(offset)
        .map(|_| offset + 1)
        .ok_or(ErrorKind::NoMoreData)
}

/// One position back.
///
/// # Errors
///
/// Returns [`ErrorKind::NoMoreData`] at offset 0.
pub fn backtrack(buffer: &Buffer, offset: usize) -> Result<usize, ErrorKind> {
    buffer
        .char_before(offset)
        .map(|_| offset - 1)
        .ok_or(ErrorKind::NoMoreData)
}

/// Start of the line containing `offset`, with no whitespace skipping.
pub fn line_start_hard(buffer: &Buffer, offset: usize) -> usize {
    preceding_newline(buffer, offset).map_or(0, |nl| nl + 1)
}

/// Semantic start of the line: past the preceding newline and any
/// indentation or blank lines that follow it.
///
/// A newline that ends the buffer is its own start, which is where
/// [`last_line`] lands on text with a trailing newline.
pub fn line_start(buffer: &Buffer, offset: usize) -> usize {
    if buffer.char_at(offset) == Some('\n') && buffer.char_at(offset + 1).is_none() {
        return offset;
    }
    semantic_start(buffer, offset)
}

/// Last content character of the line containing `offset`.
///
/// On a newline, steps back onto the previous character unless that would
/// leave the line (empty line or start of buffer).
pub fn line_end(buffer: &Buffer, offset: usize) -> usize {
    if buffer.char_at(offset) == Some('\n') {
        return match buffer.char_before(offset) {
            Some(prev) if prev != '\n' => offset - 1,
            _ => offset,
        };
    }

    let mut pos = offset;
    while buffer.char_at(pos + 1).is_some_and(|c| c != '\n') {
        pos += 1;
    }
    pos
}

/// Offset 0, past any leading indentation.
pub fn first_line(buffer: &Buffer) -> usize {
    skip_forward(buffer, 0, is_indent)
}

/// Semantic start of the final line, as reached from the end of the buffer.
pub fn last_line(buffer: &Buffer) -> usize {
    line_start(buffer, buffer.len())
}

/// Just past the first newline at or after `offset`.
///
/// # Errors
///
/// Returns [`ErrorKind::NoMoreLines`] when no newline follows.
pub fn next_line(buffer: &Buffer, offset: usize) -> Result<usize, ErrorKind> {
    (offset..buffer.len())
        .find(|&i| buffer.char_at(i) == Some('\n'))
        .map(|nl| nl + 1)
        .ok_or(ErrorKind::NoMoreLines)
}

/// Semantic start of the line ending at the newline before `offset`.
///
/// # Errors
///
/// Returns [`ErrorKind::NoMoreLines`] when no newline precedes `offset`.
pub fn prev_line(buffer: &Buffer, offset: usize) -> Result<usize, ErrorKind> {
    preceding_newline(buffer, offset)
        .map(|nl| semantic_start(buffer, nl))
        .ok_or(ErrorKind::NoMoreLines)
}

/// Nearest index before `offset` holding `target`, within the current line.
fn find_back_in_line(buffer: &Buffer, offset: usize, target: char) -> Result<usize, ErrorKind> {
    for i in (0..offset.min(buffer.len())).rev() {
        match buffer.char_at(i) {
            Some('\n') | None => break,
            Some(c) if c == target => return Ok(i),
            Some(_) => {}
        }
    }
    Err(ErrorKind::NotFound(target))
}

/// Nearest index after `offset` holding `target`, within the current line.
fn find_forward_in_line(
    buffer: &Buffer,
    offset: usize,
    target: char,
) -> Result<usize, ErrorKind> {
    if buffer.char_at(offset) != Some('\n') {
        for i in offset + 1..buffer.len() {
            match buffer.char_at(i) {
                Some('\n') | None => break,
                Some(c) if c == target => return Ok(i),
                Some(_) => {}
            }
        }
    }
    Err(ErrorKind::NotFound(target))
}

/// Just after the nearest `target` before `offset` on the same line.
///
/// # Errors
///
/// Returns [`ErrorKind::NotFound`] when `target` does not occur behind `offset`
/// before a newline or the edge of the buffer.
pub fn after_prev_char_in_line(
    buffer: &Buffer,
    offset: usize,
    target: char,
) -> Result<usize, ErrorKind> {
    find_back_in_line(buffer, offset, target).map(|i| i + 1)
}

/// On the nearest `target` before `offset` on the same line.
///
/// # Errors
///
/// Returns [`ErrorKind::NotFound`] when `target` does not occur behind `offset`
/// before a newline or the edge of the buffer.
pub fn prev_char_in_line(
    buffer: &Buffer,
    offset: usize,
    target: char,
) -> Result<usize, ErrorKind> {
    find_back_in_line(buffer, offset, target)
}

/// Just before the nearest `target` after `offset` on the same line.
///
/// # Errors
///
/// Returns [`ErrorKind::NotFound`] when `target` does not occur ahead of `offset`
/// before a newline or the edge of the buffer.
pub fn before_next_char_in_line(
    buffer: &Buffer,
    offset: usize,
    target: char,
) -> Result<usize, ErrorKind> {
    find_forward_in_line(buffer, offset, target).map(|i| i - 1)
}

/// On the nearest `target` after `offset` on the same line.
///
/// # Errors
///
/// Returns [`ErrorKind::NotFound`] when `target` does not occur ahead of `offset`
/// before a newline or the edge of the buffer.
pub fn next_char_in_line(
    buffer: &Buffer,
    offset: usize,
    target: char,
) -> Result<usize, ErrorKind> {
    find_forward_in_line(buffer, offset, target)
}

/// Exclusive end of a span whose last character is at `end`, extended to
/// cover the line's terminating newline when there is one.
pub fn through_newline(buffer: &Buffer, end: usize) -> usize {
    match buffer.char_at(end) {
        None => buffer.len(),
        Some('\n') => end + 1,
        Some(_) if buffer.char_at(end + 1) == Some('\n') => end + 2,
        Some(_) => end + 1,
    }
}

/// Text of the line containing `offset`, from its semantic start through
/// its trailing newline (if any).
pub fn line_text(buffer: &Buffer, offset: usize) -> String {
    let start = semantic_start(buffer, offset);
    let end = line_end(buffer, start);
    buffer.slice(start..through_newline(buffer, end))
}
