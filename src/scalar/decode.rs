use super::Alphabet;
use crate::alphabet;
use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    Empty,
    InvalidCharacter { character: char, index: usize },
    Overflow { index: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Empty => write!(f, "Empty input"),
            Error::InvalidCharacter { character, index } => write!(f, "Invalid character '{}' at index {}", character, index),
            Error::Overflow { index } => write!(f, "Value exceeds {} at index {}", u64::MAX, index),
        }
    }
}

impl From<alphabet::DecodeError> for Error {
    fn from(error: alphabet::DecodeError) -> Self {
        match error {
            alphabet::DecodeError::InvalidCharacter { character, index } => Error::InvalidCharacter { character, index },
        }
    }
}

pub struct Decoder<'a> {
    alphabet: &'a Alphabet,
}

impl<'a> Decoder<'a> {
    pub const fn new(alphabet: &'a Alphabet) -> Self {
        Self { alphabet }
    }

    /// Decodes a run of digits, reporting positions relative to `offset`.
    ///
    /// Digits are accumulated left to right (`value * base + digit`) with
    /// checked arithmetic: a value above `u64::MAX` is an error, never wrapped.
    pub fn decode_symbols(&self, symbols: impl IntoIterator<Item = char>, offset: usize) -> Result<u64, Error> {
        let base = self.alphabet.base();
        let mut value: u64 = 0;
        let mut empty = true;
        for (index, character) in symbols.into_iter().enumerate() {
            let index = offset + index;
            let digit = self.alphabet.decode(character, index)? as u64;
            value = value
                .checked_mul(base)
                .and_then(|value| value.checked_add(digit))
                .ok_or(Error::Overflow { index })?;
            empty = false;
        }
        if empty {
            return Err(Error::Empty);
        }
        Ok(value)
    }

    pub fn decode_at(&self, input: &str, offset: usize) -> Result<u64, Error> {
        self.decode_symbols(input.chars(), offset)
    }

    pub fn decode(&self, input: &str) -> Result<u64, Error> {
        self.decode_at(input, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::{Alphabet, Decoder, Error};

    fn hex() -> Alphabet {
        Alphabet::new("0123456789ABCDEF").unwrap()
    }

    #[test]
    fn decode() {
        let alphabet = hex();
        let decoder = Decoder::new(&alphabet);
        assert_eq!(decoder.decode("0"), Ok(0));
        assert_eq!(decoder.decode("1"), Ok(1));
        assert_eq!(decoder.decode("A"), Ok(10));
        assert_eq!(decoder.decode("F"), Ok(15));
        assert_eq!(decoder.decode("10"), Ok(16));
        assert_eq!(decoder.decode("FF"), Ok(255));
        assert_eq!(decoder.decode("00FF"), Ok(255));
        assert_eq!(decoder.decode("FFFFFFFFFFFFFFFF"), Ok(u64::MAX));
    }

    #[test]
    fn invalid_character() {
        let alphabet = hex();
        let decoder = Decoder::new(&alphabet);
        assert_eq!(decoder.decode("Z"), Err(Error::InvalidCharacter { character: 'Z', index: 0 }));
        assert_eq!(decoder.decode("1f"), Err(Error::InvalidCharacter { character: 'f', index: 1 }));
    }

    #[test]
    fn empty() {
        let alphabet = hex();
        let decoder = Decoder::new(&alphabet);
        assert_eq!(decoder.decode(""), Err(Error::Empty));
    }

    #[test]
    fn overflow() {
        let alphabet = hex();
        let decoder = Decoder::new(&alphabet);
        assert_eq!(decoder.decode("10000000000000000"), Err(Error::Overflow { index: 16 }));
        assert_eq!(decoder.decode("FFFFFFFFFFFFFFFF0"), Err(Error::Overflow { index: 16 }));
    }

    #[test]
    fn decode_at() {
        let alphabet = hex();
        let decoder = Decoder::new(&alphabet);
        assert_eq!(decoder.decode_at("0G", 6), Err(Error::InvalidCharacter { character: 'G', index: 7 }));
    }
}
