use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Length of a digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Content digest of a stored value.
///
/// A `Digest` is a 256-bit BLAKE3 hash. It doubles as the value's identity
/// and as its file name (rendered as 64 lowercase hex characters), so it must
/// be stable across runs and platforms.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Digest raw bytes without any domain tag.
    pub fn of_bytes(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Wrap a pre-computed hash.
    pub const fn from_hash(hash: [u8; DIGEST_LEN]) -> Self {
        Self(hash)
    }

    /// Hex-encoded string representation. This is the on-disk file name.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        let arr: [u8; DIGEST_LEN] =
            bytes
                .as_slice()
                .try_into()
                .map_err(|_| TypeError::InvalidLength {
                    expected: DIGEST_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.short_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn of_bytes_is_deterministic() {
        assert_eq!(Digest::of_bytes(b"hello world"), Digest::of_bytes(b"hello world"));
        assert_ne!(Digest::of_bytes(b"hello"), Digest::of_bytes(b"world"));
    }

    #[test]
    fn hex_is_64_lowercase_chars() {
        let hex = Digest::of_bytes(b"test").to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn short_hex_is_prefix() {
        let d = Digest::of_bytes(b"test");
        assert_eq!(d.short_hex().len(), 8);
        assert!(d.to_hex().starts_with(&d.short_hex()));
    }

    #[test]
    fn display_matches_hex() {
        let d = Digest::of_bytes(b"test");
        assert_eq!(format!("{d}"), d.to_hex());
        assert_eq!(format!("{d:?}"), format!("Digest({})", d.short_hex()));
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(matches!(
            Digest::from_hex("not hex"),
            Err(TypeError::InvalidHex(_))
        ));
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            Digest::from_hex("abcd"),
            Err(TypeError::InvalidLength {
                expected: 32,
                actual: 2
            })
        );
    }

    #[test]
    fn parses_via_from_str() {
        let d = Digest::of_bytes(b"parse me");
        let parsed: Digest = d.to_hex().parse().unwrap();
        assert_eq!(parsed, d);
    }

    #[test]
    fn serde_json_roundtrip() {
        let d = Digest::of_bytes(b"serde test");
        let json = serde_json::to_string(&d).unwrap();
        let back: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(d, back);
    }

    proptest! {
        #[test]
        fn hex_parse_inverts_render(bytes in proptest::array::uniform32(any::<u8>())) {
            let d = Digest::from_hash(bytes);
            prop_assert_eq!(Digest::from_hex(&d.to_hex()).unwrap(), d);
        }
    }
}
