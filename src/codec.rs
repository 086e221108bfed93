use crate::{
    alphabet::{self, Alphabet},
    base52, base62, scalar,
    text::{self, block_width, Unit},
};

/// A base-N numeral codec over an owned [`Alphabet`].
///
/// Holds no mutable state; one instance can serve any number of threads.
#[derive(Clone, Debug)]
pub struct Codec {
    alphabet: Alphabet,
}

impl Codec {
    pub fn new(alphabet: &str) -> Result<Self, alphabet::Error> {
        Ok(Self::from_alphabet(Alphabet::new(alphabet)?))
    }

    pub fn from_alphabet(alphabet: Alphabet) -> Self {
        Self { alphabet }
    }

    /// Digits, then uppercase, then lowercase letters.
    pub fn base62() -> Self {
        match Self::new(base62::ALPHABET) {
            Ok(codec) => codec,
            Err(_) => panic!("Could not build base62 alphabet"),
        }
    }

    /// Uppercase then lowercase letters.
    pub fn base52() -> Self {
        match Self::new(base52::ALPHABET) {
            Ok(codec) => codec,
            Err(_) => panic!("Could not build base52 alphabet"),
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn base(&self) -> u64 {
        self.alphabet.base()
    }

    /// Number of digits every `unit` occupies in the text layer.
    pub fn block_width(&self, unit: Unit) -> usize {
        block_width(self.alphabet.base(), unit)
    }

    pub fn encode(&self, number: u64) -> String {
        scalar::Encoder::new(&self.alphabet).encode(number)
    }

    pub fn decode(&self, digits: &str) -> Result<u64, scalar::decode::Error> {
        scalar::Decoder::new(&self.alphabet).decode(digits)
    }

    pub fn encode_text(&self, text: &str) -> String {
        text::Encoder::new(&self.alphabet).encode(text)
    }

    pub fn decode_text(&self, encoded: &str) -> Result<String, text::decode::Error> {
        text::Decoder::new(&self.alphabet).decode(encoded)
    }

    pub fn encode_bytes(&self, input: impl AsRef<[u8]>) -> String {
        text::Encoder::new(&self.alphabet).encode_bytes(input)
    }

    pub fn decode_bytes(&self, encoded: &str) -> Result<Vec<u8>, text::decode::Error> {
        text::Decoder::new(&self.alphabet).decode_bytes(encoded)
    }
}
