use std::io::BufRead;

use crate::common::SessionError;

/// Line-oriented reader over the terminal (or any `BufRead` in tests).
pub struct LineInput<R: BufRead> {
    reader: R,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Next line without its terminator. End of input is an error.
    pub fn read_line(&mut self) -> Result<String, SessionError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(SessionError::InputClosed);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }

    pub fn prompt(&mut self, text: &str) -> Result<String, SessionError> {
        log::info!("{text}");
        self.read_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn strips_unix_and_windows_terminators_only() {
        let mut input = LineInput::new(Cursor::new("one\r\n  two  \n\nlast"));
        assert_eq!(input.read_line().unwrap(), "one");
        assert_eq!(input.read_line().unwrap(), "  two  ");
        assert_eq!(input.read_line().unwrap(), "");
        assert_eq!(input.read_line().unwrap(), "last");
    }

    #[test]
    fn end_of_input_is_input_closed() {
        let mut input = LineInput::new(Cursor::new("only\n"));
        input.read_line().unwrap();
        assert!(matches!(input.read_line(), Err(SessionError::InputClosed)));
    }
}
