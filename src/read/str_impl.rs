use memchr::memchr;

use super::Read;
use crate::error::Result;

/// Read from an in-memory string.
#[derive(Debug, Clone)]
pub struct StrReader<'r> {
    input: &'r str,
    pos: usize,
}

impl<'r> StrReader<'r> {
    pub fn new(input: &'r str) -> Self {
        Self { input, pos: 0 }
    }

    /// The input which has not been consumed yet.
    pub fn remaining(&self) -> &'r str {
        &self.input[self.pos..]
    }
}

impl Read for StrReader<'_> {
    #[inline]
    fn peek(&mut self) -> Result<Option<char>> {
        Ok(self.remaining().chars().next())
    }

    #[inline]
    fn discard(&mut self) {
        if let Some(c) = self.remaining().chars().next() {
            self.pos += c.len_utf8();
        }
    }

    fn take_line(&mut self) -> Result<String> {
        let rest = self.remaining();
        // `\n` is ascii, so `end` is always a char boundary
        let end = memchr(b'\n', rest.as_bytes()).unwrap_or(rest.len());
        self.pos += end;
        Ok(rest[..end].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_discard() {
        let mut rdr = StrReader::new("a🍄b");
        assert_eq!(rdr.peek().unwrap(), Some('a'));
        rdr.discard();
        assert_eq!(rdr.peek().unwrap(), Some('🍄'));
        rdr.discard();
        assert_eq!(rdr.remaining(), "b");
        rdr.discard();
        assert_eq!(rdr.peek().unwrap(), None);
        // discarding at the end is a no-op
        rdr.discard();
        assert_eq!(rdr.peek().unwrap(), None);
    }

    #[test]
    fn test_take_line() {
        let mut rdr = StrReader::new("% a🍄 comment\n@book");
        assert_eq!(rdr.take_line().unwrap(), "% a🍄 comment");
        assert_eq!(rdr.peek().unwrap(), Some('\n'));

        let mut rdr = StrReader::new("% no newline");
        assert_eq!(rdr.take_line().unwrap(), "% no newline");
        assert_eq!(rdr.peek().unwrap(), None);
    }

    use proptest::prelude::*;
    proptest! {
        #[test]
        fn no_panic(s in "\\PC*") {
            let mut rdr = StrReader::new(&s);
            let _ = rdr.take_line();
            while let Ok(Some(_)) = rdr.peek() {
                rdr.discard();
            }
        }
    }
}
