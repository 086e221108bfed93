use super::Alphabet;

pub struct Encoder<'a> {
    alphabet: &'a Alphabet,
}

impl<'a> Encoder<'a> {
    pub const fn new(alphabet: &'a Alphabet) -> Self {
        Self { alphabet }
    }

    /// Appends the digits of `number` to `output`, most significant first, and
    /// returns how many digits were written.
    pub fn encode_into(&self, number: u64, output: &mut String) -> usize {
        if number == 0 {
            output.push(self.alphabet.zero());
            return 1;
        }
        let base = self.alphabet.base();
        let mut digits = Vec::with_capacity(u64::BITS as usize);
        let mut number = number;
        while number > 0 {
            digits.push(self.alphabet.encode((number % base) as usize));
            number /= base;
        }
        output.extend(digits.iter().rev());
        digits.len()
    }

    pub fn encode(&self, number: u64) -> String {
        let mut output = String::new();
        self.encode_into(number, &mut output);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::{Alphabet, Encoder};

    #[test]
    fn encode() {
        let alphabet = Alphabet::new("0123456789ABCDEF").unwrap();
        let encoder = Encoder::new(&alphabet);
        assert_eq!(encoder.encode(0), "0");
        assert_eq!(encoder.encode(1), "1");
        assert_eq!(encoder.encode(10), "A");
        assert_eq!(encoder.encode(15), "F");
        assert_eq!(encoder.encode(16), "10");
        assert_eq!(encoder.encode(255), "FF");
        assert_eq!(encoder.encode(u64::MAX), "FFFFFFFFFFFFFFFF");
    }

    #[test]
    fn encode_binary() {
        let alphabet = Alphabet::new("01").unwrap();
        let encoder = Encoder::new(&alphabet);
        assert_eq!(encoder.encode(5), "101");
        assert_eq!(encoder.encode(u64::MAX).len(), 64);
    }

    #[test]
    fn encode_into() {
        let alphabet = Alphabet::new("0123456789ABCDEF").unwrap();
        let encoder = Encoder::new(&alphabet);
        let mut output = String::from("0x");
        assert_eq!(encoder.encode_into(0xBEEF, &mut output), 4);
        assert_eq!(output, "0xBEEF");
    }

    #[test]
    fn encode_multibyte_symbols() {
        let alphabet = Alphabet::new("○●").unwrap();
        let encoder = Encoder::new(&alphabet);
        assert_eq!(encoder.encode(0), "○");
        assert_eq!(encoder.encode(6), "●●○");
    }
}
