//! Byte-level line classifier.
//!
//! This module scans a byte stream and sorts every physical line into
//! code, comment, or blank. It uses one generic comment grammar for all
//! files: `//` line comments and `/* */` block comments. It does not look
//! inside string literals, so `"// not a comment"` starts a line comment.
//!
//! ## Classification rules
//!
//! - A line is **code** if it carries any byte that is not whitespace and
//!   not part of a comment. Code wins over comments on the same line.
//! - Otherwise it is a **comment** if it ends inside a line comment or an
//!   open block comment.
//! - Otherwise it is **blank**. This includes a line whose block comment
//!   closes before the newline, such as ` */` or `/* note */`.
//!
//! Line comments end at the newline; block comments carry over to the next
//! line and do not nest.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::trace;

use crate::error::CountError;
use crate::stats::{FileTally, LineKind};
use crate::Result;

/// Scanner mode between two bytes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Outside any comment
    #[default]
    Normal,
    /// After `//`, until the end of the line
    InLineComment,
    /// After `/*`, until the matching `*/`
    InBlockComment,
}

/// Tracks what has been seen on the current line.
#[derive(Default, Debug, Copy, Clone)]
struct LineContext {
    has_code: bool,
    has_bytes: bool,
}

impl LineContext {
    /// Kind of the line, given the mode it ends in.
    fn kind(&self, end_mode: Mode) -> LineKind {
        if self.has_code {
            LineKind::Code
        } else if end_mode != Mode::Normal {
            LineKind::Comment
        } else {
            LineKind::Blank
        }
    }
}

fn is_blank_byte(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

/// A classifier that reads a stream and produces a [`FileTally`].
///
/// `pending` holds the previous byte when it may still pair with the next
/// one: a `/` in normal mode (start of `//` or `/*`) or a `*` inside a block
/// comment (start of `*/`).
pub struct LineClassifier<R: Read> {
    reader: BufReader<R>,
    mode: Mode,
    pending: Option<u8>,
    line: LineContext,
    tally: FileTally,
}

impl LineClassifier<File> {
    /// Open a file for classification.
    pub fn open(file_path: impl AsRef<Path>) -> Result<Self> {
        let path = file_path.as_ref();
        let file = File::open(path).map_err(|e| CountError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> LineClassifier<R> {
    /// Create a classifier from any reader.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            mode: Mode::Normal,
            pending: None,
            line: LineContext::default(),
            tally: FileTally::new(),
        }
    }

    /// Current scanner mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Read the whole stream and return the tally.
    ///
    /// A read error ends the scan early; lines seen so far are kept.
    pub fn classify(mut self) -> FileTally {
        let mut buf = [0u8; 8192];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    for &byte in &buf[..n] {
                        self.feed(byte);
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    trace!(error = %e, "read error, stopping scan");
                    break;
                }
            }
        }
        self.finish()
    }

    /// Advance the state machine by one byte.
    pub fn feed(&mut self, byte: u8) {
        self.line.has_bytes = true;
        let pending = self.pending.take();

        match self.mode {
            Mode::Normal => {
                if pending == Some(b'/') {
                    match byte {
                        b'/' => return self.enter(Mode::InLineComment),
                        b'*' => return self.enter(Mode::InBlockComment),
                        // the slash was plain code after all
                        _ => self.line.has_code = true,
                    }
                }
                match byte {
                    b'\n' => self.finish_line(),
                    b'/' => self.pending = Some(b'/'),
                    b if is_blank_byte(b) => {}
                    _ => self.line.has_code = true,
                }
            }
            Mode::InLineComment => {
                if byte == b'\n' {
                    self.finish_line();
                }
            }
            Mode::InBlockComment => {
                if pending == Some(b'*') && byte == b'/' {
                    self.mode = Mode::Normal;
                    return;
                }
                match byte {
                    b'\n' => self.finish_line(),
                    b'*' => self.pending = Some(b'*'),
                    _ => {}
                }
            }
        }
    }

    /// Close out a trailing line without newline and return the tally.
    pub fn finish(mut self) -> FileTally {
        if self.line.has_bytes {
            if self.mode == Mode::Normal && self.pending.take() == Some(b'/') {
                self.line.has_code = true;
            }
            self.finish_line();
        }
        self.tally
    }

    fn enter(&mut self, mode: Mode) {
        self.mode = mode;
    }

    fn finish_line(&mut self) {
        let kind = self.line.kind(self.mode);
        self.tally.record(kind);
        trace!(line = self.tally.lines, %kind, "classified line");

        if self.mode == Mode::InLineComment {
            self.mode = Mode::Normal;
        }
        self.pending = None;
        self.line = LineContext::default();
    }
}

/// Classify a single file and return its tally.
///
/// # Example
///
/// ```rust,ignore
/// use countlineslib::classifier::classify_file;
///
/// let tally = classify_file("src/main.c")?;
/// println!("code: {}, comments: {}", tally.code, tally.comment);
/// ```
pub fn classify_file(path: impl AsRef<Path>) -> Result<FileTally> {
    let classifier = LineClassifier::open(path)?;
    Ok(classifier.classify())
}

/// Classify source held in memory.
///
/// # Example
///
/// ```rust
/// use countlineslib::classifier::classify_str;
///
/// let tally = classify_str("int x = 1; // note\n\n// done\n/* closed */\n");
/// assert_eq!(tally.code, 1);
/// assert_eq!(tally.comment, 1);
/// // a line whose block comment closes before the newline is blank
/// assert_eq!(tally.blank, 2);
/// ```
pub fn classify_str(source: &str) -> FileTally {
    classify_bytes(source.as_bytes())
}

/// Classify raw bytes held in memory.
pub fn classify_bytes(source: &[u8]) -> FileTally {
    LineClassifier::from_reader(source).classify()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(src: &str) -> FileTally {
        let t = classify_str(src);
        assert_eq!(t.total(), t.lines, "tally does not add up for {src:?}");
        t
    }

    #[test]
    fn empty_input() {
        let t = tally("");
        assert_eq!(t.lines, 0);
    }

    #[test]
    fn three_blank_lines() {
        let t = tally("\n\n\n");
        assert_eq!(t.lines, 3);
        assert_eq!(t.blank, 3);
        assert_eq!(t.code, 0);
        assert_eq!(t.comment, 0);
    }

    #[test]
    fn whitespace_only_line() {
        let t = tally("  \t\t \r\n");
        assert_eq!(t.blank, 1);
        assert_eq!(t.lines, 1);
    }

    #[test]
    fn one_code_line() {
        let t = tally("int main(void);\n");
        assert_eq!(t.code, 1);
        assert_eq!(t.lines, 1);
    }

    #[test]
    fn single_line_comment() {
        let t = tally("   // Comment\n");
        assert_eq!(t.comment, 1);
        assert_eq!(t.code, 0);
    }

    #[test]
    fn code_before_line_comment_is_code() {
        let t = tally("int x; // note\n");
        assert_eq!(t.code, 1);
        assert_eq!(t.comment, 0);
    }

    #[test]
    fn code_after_block_comment_is_code() {
        let t = tally("/* lead */ int x;\n");
        assert_eq!(t.code, 1);
        assert_eq!(t.comment, 0);
    }

    #[test]
    fn closed_block_comment_on_one_line_is_blank() {
        let t = tally("   /* comment */ \n");
        assert_eq!(t.blank, 1);
        assert_eq!(t.comment, 0);
        assert_eq!(t.code, 0);
    }

    #[test]
    fn multiline_block_comment_closing_line_is_blank() {
        let t = tally("/*\n\n  comment\n*/\nint x;\n");
        // the empty line still sits inside the open block
        assert_eq!(t.comment, 3);
        assert_eq!(t.blank, 1);
        assert_eq!(t.code, 1);
    }

    #[test]
    fn comment_or_blank_decided_by_mode_at_line_end() {
        let t = tally("/*\n x\n */\nint a;\n");
        assert_eq!(t.comment, 2);
        assert_eq!(t.blank, 1);
        assert_eq!(t.code, 1);
        assert_eq!(t.lines, 4);
    }

    #[test]
    fn unterminated_block_without_newline() {
        let t = tally("/* unterminated");
        assert_eq!(t.lines, 1);
        assert_eq!(t.comment, 1);
    }

    #[test]
    fn line_comment_does_not_persist() {
        let t = tally("// one\nint x;\n");
        assert_eq!(t.comment, 1);
        assert_eq!(t.code, 1);
    }

    #[test]
    fn block_comment_persists_across_lines() {
        let t = tally("int a; /* open\nstill comment\n*/ int b;\n");
        assert_eq!(t.code, 2);
        assert_eq!(t.comment, 1);
    }

    #[test]
    fn slashes_inside_block_comment_do_not_nest() {
        // `//` inside the block must not swallow the closing `*/`
        let t = tally("/* a // b */ int x;\n");
        assert_eq!(t.code, 1);
        assert_eq!(t.comment, 0);

        let t = tally("/* a // b */\nint y;\n");
        assert_eq!(t.comment, 0);
        assert_eq!(t.blank, 1);
        assert_eq!(t.code, 1);
    }

    #[test]
    fn block_open_inside_line_comment_is_ignored() {
        let t = tally("// see /* here\nint x;\n");
        assert_eq!(t.comment, 1);
        assert_eq!(t.code, 1);
    }

    #[test]
    fn spurious_block_close_is_code() {
        let t = tally("*/\n");
        assert_eq!(t.code, 1);
        assert_eq!(t.comment, 0);
    }

    #[test]
    fn opening_star_does_not_close() {
        // `/*/` opens a comment; the `*` cannot be reused as `*/`
        let t = tally("/*/\nstill inside\n*/\n");
        assert_eq!(t.comment, 2);
        assert_eq!(t.blank, 1);
        assert_eq!(t.code, 0);
    }

    #[test]
    fn stars_before_close() {
        let t = tally("/** doc **/\nx\n");
        assert_eq!(t.blank, 1);
        assert_eq!(t.comment, 0);
        assert_eq!(t.code, 1);
    }

    #[test]
    fn lone_slash_is_code() {
        assert_eq!(tally("a = b / c;\n").code, 1);
        assert_eq!(tally("/\n").code, 1);
        assert_eq!(tally("  /").code, 1);
    }

    #[test]
    fn trailing_line_without_newline() {
        let t = tally("int a;\nint b;");
        assert_eq!(t.lines, 2);
        assert_eq!(t.code, 2);

        let t = tally("int a;\n   ");
        assert_eq!(t.lines, 2);
        assert_eq!(t.blank, 1);

        let t = tally("int a;\n// tail");
        assert_eq!(t.lines, 2);
        assert_eq!(t.comment, 1);
    }

    #[test]
    fn comment_in_string_literal_is_not_special_cased() {
        let t = tally("\"//not a comment\"\n");
        // the opening quote is code, so the line still counts as code
        assert_eq!(t.code, 1);

        let t = tally("s = \"/* trap\";\nint x;\n");
        // the block comment swallows the next line
        assert_eq!(t.code, 1);
        assert_eq!(t.comment, 1);
    }

    #[test]
    fn mode_transitions() {
        let mut c = LineClassifier::from_reader(&b""[..]);
        for &b in b"x //" {
            c.feed(b);
        }
        assert_eq!(c.mode(), Mode::InLineComment);
        c.feed(b'\n');
        assert_eq!(c.mode(), Mode::Normal);

        for &b in b"/* a\n" {
            c.feed(b);
        }
        assert_eq!(c.mode(), Mode::InBlockComment);
        for &b in b"*/" {
            c.feed(b);
        }
        assert_eq!(c.mode(), Mode::Normal);
    }

    #[test]
    fn classify_file_missing() {
        let result = classify_file("/nonexistent/file.c");
        assert!(matches!(result, Err(CountError::FileRead { .. })));
    }

    #[test]
    fn non_utf8_bytes_are_code() {
        let t = classify_bytes(&[0xff, 0xfe, b'\n', b'\n']);
        assert_eq!(t.code, 1);
        assert_eq!(t.blank, 1);
    }
}
