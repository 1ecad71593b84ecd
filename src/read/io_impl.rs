use std::io::BufRead;

use memchr::memchr;

use super::Read;
use crate::error::Result;

/// Read from any [`BufRead`], one line at a time.
///
/// The underlying reader is owned, so it is released as soon as the `IoReader` is dropped,
/// whether parsing finished or failed.
#[derive(Debug)]
pub struct IoReader<R> {
    reader: R,
    buffer: String,
    pos: usize,
}

impl<R: BufRead> IoReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
            pos: 0,
        }
    }

    /// Make sure there is unconsumed input in the buffer, returning false at end of input.
    fn fill(&mut self) -> Result<bool> {
        if self.pos < self.buffer.len() {
            return Ok(true);
        }
        self.buffer.clear();
        self.pos = 0;
        Ok(self.reader.read_line(&mut self.buffer)? > 0)
    }
}

impl<R: BufRead> Read for IoReader<R> {
    fn peek(&mut self) -> Result<Option<char>> {
        if !self.fill()? {
            return Ok(None);
        }
        Ok(self.buffer[self.pos..].chars().next())
    }

    #[inline]
    fn discard(&mut self) {
        if let Some(c) = self.buffer[self.pos..].chars().next() {
            self.pos += c.len_utf8();
        }
    }

    fn take_line(&mut self) -> Result<String> {
        let mut line = String::new();
        while self.fill()? {
            let rest = &self.buffer[self.pos..];
            match memchr(b'\n', rest.as_bytes()) {
                Some(end) => {
                    line.push_str(&rest[..end]);
                    self.pos += end;
                    break;
                }
                None => {
                    line.push_str(rest);
                    self.pos = self.buffer.len();
                }
            }
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Cursor;

    #[test]
    fn test_peek_across_lines() {
        let mut rdr = IoReader::new(Cursor::new("a\nb"));
        let mut seen = String::new();
        while let Some(c) = rdr.peek().unwrap() {
            seen.push(c);
            rdr.discard();
        }
        assert_eq!(seen, "a\nb");
    }

    #[test]
    fn test_take_line() {
        let mut rdr = IoReader::new(Cursor::new("x % comment\nnext"));
        rdr.discard_str("x ");
        assert_eq!(rdr.take_line().unwrap(), "% comment");
        assert_eq!(rdr.peek().unwrap(), Some('\n'));
        rdr.discard();
        assert_eq!(rdr.take_line().unwrap(), "next");
        assert_eq!(rdr.peek().unwrap(), None);
    }

    #[test]
    fn test_invalid_utf8() {
        let mut rdr = IoReader::new(Cursor::new(&b"ok\n\xff\xfe\n"[..]));
        assert_eq!(rdr.take_line().unwrap(), "ok");
        rdr.discard();
        assert!(matches!(rdr.peek(), Err(Error::Io(_))));
    }

    impl<R: BufRead> IoReader<R> {
        fn discard_str(&mut self, s: &str) {
            for expected in s.chars() {
                assert_eq!(self.peek().unwrap(), Some(expected));
                self.discard();
            }
        }
    }
}
