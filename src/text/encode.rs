use super::{block_width, Unit};
use crate::{alphabet::Alphabet, scalar};

pub struct Encoder<'a> {
    alphabet: &'a Alphabet,
    encoder: scalar::Encoder<'a>,
}

impl<'a> Encoder<'a> {
    pub const fn new(alphabet: &'a Alphabet) -> Self {
        Self {
            alphabet,
            encoder: scalar::Encoder::new(alphabet),
        }
    }

    fn encode_units(&self, units: impl Iterator<Item = u64>, unit: Unit) -> String {
        let width = block_width(self.alphabet.base(), unit);
        let zero = self.alphabet.zero();
        let mut output = String::with_capacity(units.size_hint().0 * width);
        let mut block = String::with_capacity(width);
        for value in units {
            block.clear();
            let len = self.encoder.encode_into(value, &mut block);
            output.extend((len..width).map(|_| zero));
            output.push_str(&block);
        }
        output
    }

    /// Encodes every code point of `text` as one block.
    pub fn encode(&self, text: &str) -> String {
        self.encode_units(text.chars().map(|character| character as u64), Unit::CodePoint)
    }

    /// Encodes every byte of `input` as one block.
    pub fn encode_bytes(&self, input: impl AsRef<[u8]>) -> String {
        self.encode_units(input.as_ref().iter().map(|&byte| byte as u64), Unit::Byte)
    }
}
