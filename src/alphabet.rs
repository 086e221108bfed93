use std::{collections::HashMap, error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    TooShort { length: usize },
    DuplicateCharacter { character: char, first: usize, second: usize },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DecodeError {
    InvalidCharacter { character: char, index: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { length } => write!(f, "Alphabet must contain at least 2 characters ({} given)", length),
            Self::DuplicateCharacter { character, first, second } => {
                write!(f, "Duplicate character '{}' at indexes {} and {}", character, first, second)
            }
        }
    }
}

impl error::Error for DecodeError {}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter { character, index } => write!(f, "Invalid character '{}' at index {}", character, index),
        }
    }
}

/// Ordered set of distinct symbols. The symbol at index 0 is the zero digit.
///
/// The reverse lookup is built once in [`Alphabet::new`], so an alphabet never
/// changes after construction and can be shared freely between threads.
#[derive(Clone, Debug)]
pub struct Alphabet {
    encode: Vec<char>,
    decode: HashMap<char, usize>,
}

impl Alphabet {
    pub fn new(characters: &str) -> Result<Self, Error> {
        let encode: Vec<char> = characters.chars().collect();
        if encode.len() < 2 {
            return Err(Error::TooShort { length: encode.len() });
        }

        let mut decode = HashMap::with_capacity(encode.len());
        for (index, &character) in encode.iter().enumerate() {
            if let Some(&first) = decode.get(&character) {
                return Err(Error::DuplicateCharacter {
                    character,
                    first,
                    second: index,
                });
            }
            decode.insert(character, index);
        }

        Ok(Self { encode, decode })
    }

    pub fn encode(&self, value: usize) -> char {
        self.encode[value]
    }

    pub fn decode(&self, character: char, index: usize) -> Result<usize, DecodeError> {
        match self.decode.get(&character) {
            Some(&value) => Ok(value),
            None => Err(DecodeError::InvalidCharacter { character, index }),
        }
    }

    pub fn zero(&self) -> char {
        self.encode[0]
    }

    pub fn len(&self) -> usize {
        self.encode.len()
    }

    pub fn base(&self) -> u64 {
        self.encode.len() as u64
    }

    pub fn symbols(&self) -> &[char] {
        &self.encode
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for character in &self.encode {
            write!(f, "{}", character)?;
        }
        Ok(())
    }
}
