use crate::{scalar, text, Codec};
use std::sync::OnceLock;

pub const ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

static CODEC: OnceLock<Codec> = OnceLock::new();

pub fn codec() -> &'static Codec {
    CODEC.get_or_init(Codec::base62)
}

pub fn encode(number: u64) -> String {
    codec().encode(number)
}

pub fn decode(digits: &str) -> Result<u64, scalar::decode::Error> {
    codec().decode(digits)
}

pub fn encode_text(text: &str) -> String {
    codec().encode_text(text)
}

pub fn decode_text(encoded: &str) -> Result<String, text::decode::Error> {
    codec().decode_text(encoded)
}
