//! Character sources for the [`Tokenizer`](crate::lexer::Tokenizer).
//!
//! A source is pulled one character at a time, so memory use is bounded by the buffered line
//! (for [`IoReader`]) rather than by the whole input.
mod io_impl;
mod str_impl;

pub use io_impl::IoReader;
pub use str_impl::StrReader;

use crate::error::Result;

pub trait Read {
    /// Peek a single character without consuming it.
    fn peek(&mut self) -> Result<Option<char>>;

    /// Discard a single character. This is only valid after a previous `.peek()` returned a value!
    fn discard(&mut self);

    /// Consume characters up to, but not including, the next `\n`, and return them.
    fn take_line(&mut self) -> Result<String> {
        let mut line = String::new();
        while let Some(c) = self.peek()? {
            if c == '\n' {
                break;
            }
            self.discard();
            line.push(c);
        }
        Ok(line)
    }
}

impl<T: Read + ?Sized> Read for &mut T {
    #[inline]
    fn peek(&mut self) -> Result<Option<char>> {
        (**self).peek()
    }

    #[inline]
    fn discard(&mut self) {
        (**self).discard()
    }

    #[inline]
    fn take_line(&mut self) -> Result<String> {
        (**self).take_line()
    }
}
