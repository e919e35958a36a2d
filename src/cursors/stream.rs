//! Cursor over a seekable byte stream.
//!
//! All cursors opened from one stream share a single fixed-size window of
//! bytes keyed by absolute offset. Moving forward within the window is free;
//! moving outside it, including backtracking to an offset the window has
//! already slid past, re-seeks the stream and refills the window.

use crate::cursor::Cursor;
use crate::error::InputError;
use crate::position::{Position, PositionFn};
use std::cell::RefCell;
use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};
use std::rc::Rc;
use tracing::{debug, warn};

/// Smallest window that can hold any encoded char
pub const MIN_WINDOW_SIZE: usize = 4;

/// How the bytes of a stream map to chars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Invalid sequences decode to U+FFFD and consume one byte
    #[default]
    Utf8,
    /// One byte per char, ISO 8859-1
    Latin1,
}

/// Settings for a [`StreamCursor`]
#[derive(Debug, Clone, Copy)]
pub struct StreamConfig {
    pub encoding: Encoding,
    pub tab_width: usize,
    pub window_size: usize,
    /// Replaces the tab-width rule when set
    pub positions: Option<PositionFn<char>>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        StreamConfig {
            encoding: Encoding::Utf8,
            tab_width: Position::DEFAULT_TAB_WIDTH,
            window_size: 4096,
            positions: None,
        }
    }
}

impl StreamConfig {
    pub fn with_encoding(self, encoding: Encoding) -> Self {
        StreamConfig { encoding, ..self }
    }

    pub fn with_tab_width(self, tab_width: usize) -> Self {
        StreamConfig { tab_width, ..self }
    }

    pub fn with_window_size(self, window_size: usize) -> Self {
        StreamConfig {
            window_size,
            ..self
        }
    }

    pub fn with_positions(self, positions: PositionFn<char>) -> Self {
        StreamConfig {
            positions: Some(positions),
            ..self
        }
    }
}

struct Window<R> {
    reader: R,
    /// Absolute offset of `buf[0]`
    base: u64,
    buf: Vec<u8>,
    capacity: usize,
    /// The buffer runs up to the end of the stream
    exhausted: bool,
    refills: usize,
    error: Option<io::Error>,
}

impl<R: Read + Seek> Window<R> {
    fn new(reader: R, capacity: usize) -> Self {
        Window {
            reader,
            base: 0,
            buf: Vec::with_capacity(capacity),
            capacity,
            exhausted: false,
            refills: 0,
            error: None,
        }
    }

    fn fill(&mut self, offset: u64) -> io::Result<()> {
        self.reader.seek(SeekFrom::Start(offset))?;
        self.buf.clear();
        self.buf.resize(self.capacity, 0);

        let mut filled = 0;
        while filled < self.capacity {
            match self.reader.read(&mut self.buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if filled == 0 => {
                    self.buf.clear();
                    return Err(e);
                }
                Err(e) => {
                    // Input ends after the bytes that were read
                    warn!(offset, bytes = filled, error = %e, "stream read failed, ending input");
                    self.error = Some(e);
                    break;
                }
            }
        }

        self.buf.truncate(filled);
        self.base = offset;
        self.exhausted = filled < self.capacity;
        self.refills += 1;
        debug!(offset, bytes = filled, refills = self.refills, "refilled stream window");
        Ok(())
    }

    /// Up to `want` bytes starting at `offset`; fewer only at end of stream
    fn bytes_at(&mut self, offset: u64, want: usize) -> io::Result<&[u8]> {
        let end = self.base + self.buf.len() as u64;
        let inside = offset >= self.base
            && (offset + want as u64 <= end || (self.exhausted && offset <= end));
        if !inside {
            self.fill(offset)?;
        }
        let start = (offset - self.base) as usize;
        let stop = (start + want).min(self.buf.len());
        Ok(&self.buf[start..stop])
    }

    fn decode(&mut self, offset: u64, encoding: Encoding) -> io::Result<Option<(char, usize)>> {
        let want = match encoding {
            Encoding::Utf8 => MIN_WINDOW_SIZE,
            Encoding::Latin1 => 1,
        };
        let bytes = self.bytes_at(offset, want)?;
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(match encoding {
            Encoding::Latin1 => (char::from(bytes[0]), 1),
            Encoding::Utf8 => decode_utf8(bytes),
        }))
    }
}

fn decode_utf8(bytes: &[u8]) -> (char, usize) {
    let invalid = (char::REPLACEMENT_CHARACTER, 1);
    let b1 = bytes[0];

    // Leading byte determines the sequence length and its payload bits
    let (len, payload, min) = match b1 {
        0x00..=0x7F => return (char::from(b1), 1),
        0xC0..=0xDF => (2, b1 & 0x1F, 0x80),
        0xE0..=0xEF => (3, b1 & 0x0F, 0x800),
        0xF0..=0xF7 => (4, b1 & 0x07, 0x10000),
        _ => return invalid,
    };
    if bytes.len() < len {
        return invalid;
    }

    let mut codepoint = u32::from(payload);
    for &b in &bytes[1..len] {
        if b & 0xC0 != 0x80 {
            return invalid;
        }
        codepoint = (codepoint << 6) | u32::from(b & 0x3F);
    }

    // Overlong encodings, surrogates and values past U+10FFFF are rejected
    match char::from_u32(codepoint) {
        Some(ch) if codepoint >= min => (ch, len),
        _ => invalid,
    }
}

/// A cursor over a seekable byte stream, one `char` per token
///
/// Offsets are byte offsets into the stream. Cursors share their window, so
/// they are neither `Send` nor safe to interleave across threads.
pub struct StreamCursor<R> {
    window: Rc<RefCell<Window<R>>>,
    current: Option<(char, usize)>,
    position: Position,
    config: StreamConfig,
}

impl<R: Read + Seek> StreamCursor<R> {
    /// Open a stream with the default settings and the given encoding
    pub fn open(reader: R, encoding: Encoding) -> Result<Self, InputError> {
        Self::with_config(reader, StreamConfig::default().with_encoding(encoding))
    }

    pub fn with_config(reader: R, config: StreamConfig) -> Result<Self, InputError> {
        if config.window_size < MIN_WINDOW_SIZE {
            return Err(InputError::WindowTooSmall {
                min: MIN_WINDOW_SIZE,
                got: config.window_size,
            });
        }

        let mut window = Window::new(reader, config.window_size);
        let current = window.decode(0, config.encoding)?;
        Ok(StreamCursor {
            window: Rc::new(RefCell::new(window)),
            current,
            position: Position::START,
            config,
        })
    }

    /// Take the I/O error that cut the input short, if any
    pub fn take_io_error(&self) -> Option<io::Error> {
        self.window.borrow_mut().error.take()
    }

    /// How many times the shared window has been filled
    pub fn refills(&self) -> usize {
        self.window.borrow().refills
    }
}

impl<R> Clone for StreamCursor<R> {
    fn clone(&self) -> Self {
        StreamCursor {
            window: Rc::clone(&self.window),
            current: self.current,
            position: self.position,
            config: self.config,
        }
    }
}

impl<R> PartialEq for StreamCursor<R> {
    fn eq(&self, other: &Self) -> bool {
        self.position.offset == other.position.offset
    }
}

impl<R> fmt::Debug for StreamCursor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamCursor")
            .field("position", &self.position)
            .field("current", &self.current.map(|(ch, _)| ch))
            .finish()
    }
}

impl<R: Read + Seek> Cursor for StreamCursor<R> {
    type Token = char;

    fn current(&self) -> Option<char> {
        self.current.map(|(ch, _)| ch)
    }

    fn advance(self) -> Self {
        let Some((ch, len)) = self.current else {
            panic!("advance past end of input at {}", self.position);
        };

        let offset = self.position.offset + len;
        let mut position = match self.config.positions {
            Some(step) => step(self.position, &ch),
            None => self.position.next_char(ch, self.config.tab_width),
        };
        position.offset = offset;

        let current = {
            let mut window = self.window.borrow_mut();
            match window.decode(offset as u64, self.config.encoding) {
                Ok(next) => next,
                Err(e) => {
                    warn!(offset, error = %e, "stream read failed, ending input");
                    window.error = Some(e);
                    None
                }
            }
        };

        StreamCursor {
            current,
            position,
            ..self
        }
    }

    fn position(&self) -> Position {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attempt::attempt;
    use crate::many::many;
    use crate::or::OrExt;
    use crate::parser::Parser;
    use crate::text::{is_string, letter};
    use crate::then::ThenExt;
    use std::io::Cursor as IoCursor;

    /// Reader whose reads fail once they reach `fail_at`
    struct FailingReader {
        data: Vec<u8>,
        pos: usize,
        fail_at: usize,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos >= self.fail_at {
                return Err(io::Error::new(io::ErrorKind::Other, "boom"));
            }
            let end = self.fail_at.min(self.data.len()).min(self.pos + buf.len());
            let n = end - self.pos;
            buf[..n].copy_from_slice(&self.data[self.pos..end]);
            self.pos = end;
            Ok(n)
        }
    }

    impl Seek for FailingReader {
        fn seek(&mut self, to: SeekFrom) -> io::Result<u64> {
            let SeekFrom::Start(offset) = to else {
                return Err(io::Error::new(io::ErrorKind::Unsupported, "relative seek"));
            };
            self.pos = offset as usize;
            Ok(offset)
        }
    }

    fn collect<R: Read + Seek>(mut cursor: StreamCursor<R>) -> (String, StreamCursor<R>) {
        let mut text = String::new();
        while let Some(ch) = cursor.current() {
            text.push(ch);
            cursor = cursor.advance();
        }
        (text, cursor)
    }

    #[test]
    fn test_reads_utf8() {
        let input = IoCursor::new("héllo\n✓".as_bytes().to_vec());
        let cursor = StreamCursor::open(input, Encoding::Utf8).unwrap();
        let (text, end) = collect(cursor);
        assert_eq!(text, "héllo\n✓");
        assert_eq!(end.position().offset, "héllo\n✓".len());
        assert_eq!(end.position().line, 2);
        assert_eq!(end.position().column, 2);
    }

    #[test]
    fn test_offset_counts_bytes() {
        let cursor = StreamCursor::open(IoCursor::new("é!".as_bytes().to_vec()), Encoding::Utf8)
            .unwrap();
        let next = cursor.advance();
        assert_eq!(next.current(), Some('!'));
        assert_eq!(next.position().offset, 2);
        assert_eq!(next.position().column, 2);
    }

    #[test]
    fn test_latin1() {
        let input = IoCursor::new(vec![0x63, 0x61, 0x66, 0xE9]);
        let cursor = StreamCursor::open(input, Encoding::Latin1).unwrap();
        let (text, end) = collect(cursor);
        assert_eq!(text, "café");
        assert_eq!(end.position().offset, 4);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let cursor = StreamCursor::open(IoCursor::new(vec![b'a', 0xFF, b'b']), Encoding::Utf8)
            .unwrap();
        let (text, _) = collect(cursor);
        assert_eq!(text, "a\u{FFFD}b");
    }

    #[test]
    fn test_overlong_encoding_is_replaced() {
        assert_eq!(decode_utf8(&[0xC0, 0x80]), (char::REPLACEMENT_CHARACTER, 1));
        assert_eq!(decode_utf8(&[0xED, 0xA0, 0x80]), (char::REPLACEMENT_CHARACTER, 1));
        assert_eq!(decode_utf8(&[0xE2, 0x9C, 0x93]), ('✓', 3));
    }

    #[test]
    fn test_window_slides_and_backtracking_reseeks() {
        let input: String = "abcdefghij".repeat(3);
        let config = StreamConfig::default().with_window_size(8);
        let start = StreamCursor::with_config(IoCursor::new(input.clone().into_bytes()), config)
            .unwrap();
        assert_eq!(start.refills(), 1);

        let (text, _) = collect(start.clone());
        assert_eq!(text, input);
        let after_forward = start.refills();
        assert!(after_forward > 1);

        // The window has moved past offset 0; reading from the saved start
        // cursor again must reseek the stream.
        let again = start.clone().advance();
        assert_eq!(again.current(), Some('b'));
        assert!(start.refills() > after_forward);
    }

    #[test]
    fn test_multibyte_char_across_window_boundary() {
        let input = "abc✓def";
        let config = StreamConfig::default().with_window_size(4);
        let cursor = StreamCursor::with_config(IoCursor::new(input.as_bytes().to_vec()), config)
            .unwrap();
        let (text, _) = collect(cursor);
        assert_eq!(text, input);
    }

    #[test]
    fn test_custom_position_function() {
        fn every_char_is_a_line(position: Position, _: &char) -> Position {
            Position::new(position.line + 1, 1, position.offset)
        }
        let config = StreamConfig::default().with_positions(every_char_is_a_line);
        let cursor =
            StreamCursor::with_config(IoCursor::new(b"xyz".to_vec()), config).unwrap();
        let cursor = cursor.advance().advance();
        assert_eq!(cursor.position(), Position::new(3, 1, 2));
    }

    #[test]
    fn test_window_too_small() {
        let config = StreamConfig::default().with_window_size(2);
        let result = StreamCursor::with_config(IoCursor::new(Vec::new()), config);
        assert!(matches!(
            result,
            Err(InputError::WindowTooSmall { min: 4, got: 2 })
        ));
    }

    #[test]
    fn test_read_error_ends_input_and_is_recorded() {
        let reader = FailingReader {
            data: b"abcdefgh".to_vec(),
            pos: 0,
            fail_at: 6,
        };
        let config = StreamConfig::default()
            .with_encoding(Encoding::Latin1)
            .with_window_size(4);
        let start = StreamCursor::with_config(reader, config).unwrap();

        let (letters, end) = many(letter()).parse(start).unwrap();
        assert_eq!(letters.into_iter().collect::<String>(), "abcdef");
        assert!(end.is_end());
        assert_eq!(end.position().offset, 6);

        let error = end.take_io_error().unwrap();
        assert_eq!(error.to_string(), "boom");
        assert!(end.take_io_error().is_none());
    }

    #[test]
    fn test_read_error_before_any_byte_fails_open() {
        let reader = FailingReader {
            data: b"abc".to_vec(),
            pos: 0,
            fail_at: 0,
        };
        let result = StreamCursor::open(reader, Encoding::Utf8);
        assert!(matches!(result, Err(InputError::Io(_))));
    }

    #[test]
    fn test_backtracking_across_window_miss() {
        let input = IoCursor::new(b"abcdefghXY".to_vec());
        let config = StreamConfig::default().with_window_size(4);
        let start = StreamCursor::with_config(input, config).unwrap();

        let parser = attempt(is_string("abcdefgh").then(is_string("XZ")))
            .or(is_string("abcdefghXY"));
        let before = start.refills();
        let (matched, end) = parser.parse(start.clone()).unwrap();
        assert_eq!(matched, "abcdefghXY");
        assert!(end.is_end());
        assert!(start.refills() > before + 1);
    }

    #[test]
    fn test_empty_stream() {
        let cursor = StreamCursor::open(IoCursor::new(Vec::new()), Encoding::Utf8).unwrap();
        assert!(cursor.is_end());
        assert!(cursor.take_io_error().is_none());
    }
}
