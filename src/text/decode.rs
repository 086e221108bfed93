use super::{block_width, Unit};
use crate::{alphabet::Alphabet, scalar};
use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    InvalidEncodedLength { length: usize, width: usize },
    InvalidCharacter { character: char, index: usize },
    InvalidCodePoint { value: u64, index: usize },
    InvalidByte { value: u64, index: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidEncodedLength { length, width } => {
                write!(f, "Invalid encoded length {} (expecting a multiple of {})", length, width)
            }
            Error::InvalidCharacter { character, index } => write!(f, "Invalid character '{}' at index {}", character, index),
            Error::InvalidCodePoint { value, index } => write!(f, "Invalid code point {:#x} at index {}", value, index),
            Error::InvalidByte { value, index } => write!(f, "Invalid byte {:#x} at index {}", value, index),
        }
    }
}

// A block holds at most `block_width` digits and `base^(width - 1) < Unit::space()`,
// so its value stays below `space * base`, far from `u64::MAX`.
impl From<scalar::decode::Error> for Error {
    fn from(error: scalar::decode::Error) -> Self {
        match error {
            scalar::decode::Error::InvalidCharacter { character, index } => Error::InvalidCharacter { character, index },
            scalar::decode::Error::Empty => unreachable!("blocks are never empty"),
            scalar::decode::Error::Overflow { .. } => unreachable!("a block always fits in a u64"),
        }
    }
}

pub struct Decoder<'a> {
    alphabet: &'a Alphabet,
    decoder: scalar::Decoder<'a>,
}

impl<'a> Decoder<'a> {
    pub const fn new(alphabet: &'a Alphabet) -> Self {
        Self {
            alphabet,
            decoder: scalar::Decoder::new(alphabet),
        }
    }

    /// Splits `encoded` into blocks and calls `f` with each decoded value and
    /// the index of the block's first symbol. Stops at the first error.
    fn decode_units(&self, encoded: &str, unit: Unit, mut f: impl FnMut(u64, usize) -> Result<(), Error>) -> Result<(), Error> {
        let width = block_width(self.alphabet.base(), unit);
        let symbols: Vec<char> = encoded.chars().collect();
        if symbols.len() % width != 0 {
            return Err(Error::InvalidEncodedLength {
                length: symbols.len(),
                width,
            });
        }
        for (block_index, block) in symbols.chunks(width).enumerate() {
            let index = block_index * width;
            let value = self.decoder.decode_symbols(block.iter().copied(), index)?;
            f(value, index)?;
        }
        Ok(())
    }

    pub fn decode(&self, encoded: &str) -> Result<String, Error> {
        let mut output = String::new();
        self.decode_units(encoded, Unit::CodePoint, |value, index| {
            let character = u32::try_from(value)
                .ok()
                .and_then(char::from_u32)
                .ok_or(Error::InvalidCodePoint { value, index })?;
            output.push(character);
            Ok(())
        })?;
        Ok(output)
    }

    pub fn decode_bytes(&self, encoded: &str) -> Result<Vec<u8>, Error> {
        let mut output = Vec::new();
        self.decode_units(encoded, Unit::Byte, |value, index| {
            let byte = u8::try_from(value).map_err(|_| Error::InvalidByte { value, index })?;
            output.push(byte);
            Ok(())
        })?;
        Ok(output)
    }
}
