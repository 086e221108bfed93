//! Positional numeral codec over an arbitrary alphabet of N >= 2 symbols.
//!
//! The scalar layer converts a `u64` to and from its base-N digit string. The
//! text layer builds on it to encode every byte or code point of an input as a
//! fixed-width block of digits.
//!
//! ```
//! use base_n::Codec;
//!
//! let codec = Codec::new("0123456789ABCDEF").unwrap();
//! assert_eq!(codec.encode(255), "FF");
//! assert_eq!(codec.decode("FF"), Ok(255));
//!
//! let encoded = base_n::base62::encode_text("hello");
//! assert_eq!(base_n::base62::decode_text(&encoded).unwrap(), "hello");
//! ```

pub mod alphabet;
pub mod base52;
pub mod base62;
pub mod codec;
pub mod scalar;
pub mod text;

pub use alphabet::Alphabet;
pub use codec::Codec;
pub use text::Unit;
