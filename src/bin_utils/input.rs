use std::{io::BufRead, str::FromStr};

use anyhow::{Context, Result};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("End of input")]
    EndOfInput,
    #[error("Invalid input `{0}`! Please enter a number.")]
    InvalidNumber(String),
}

/// Reads trimmed answers from the console, one line per answer.
pub struct LineReader<R> {
    source: R,
}

impl<R> LineReader<R>
where
    R: BufRead,
{
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn next_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self
            .source
            .read_line(&mut line)
            .context("Failed to read from input")?;
        if read == 0 {
            return Err(InputError::EndOfInput.into());
        }
        Ok(line.trim().to_string())
    }

    /// Parses the next line, a line that doesn't parse is reported as
    /// [`InputError::InvalidNumber`].
    pub fn next_number<T>(&mut self) -> Result<T>
    where
        T: FromStr,
    {
        let line = self.next_line()?;
        line.parse()
            .map_err(|_| InputError::InvalidNumber(line).into())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn read_answers() {
        let mut reader = LineReader::new("  Alice \n12.50\nabc\n3\n".as_bytes());
        assert_eq!(reader.next_line().unwrap(), "Alice");
        assert_eq!(reader.next_number::<Decimal>().unwrap(), dec!(12.5));

        let err = reader.next_number::<Decimal>().unwrap_err();
        assert_eq!(
            err.downcast_ref::<InputError>(),
            Some(&InputError::InvalidNumber("abc".to_string()))
        );
        assert_eq!(reader.next_number::<usize>().unwrap(), 3);

        let err = reader.next_line().unwrap_err();
        assert_eq!(err.downcast_ref::<InputError>(), Some(&InputError::EndOfInput));
    }
}
