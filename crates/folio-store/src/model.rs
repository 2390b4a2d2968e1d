use std::fmt;

use folio_crypto::ContentHasher;
use folio_types::Digest;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// A value type the store can persist.
///
/// The default digest is the domain-separated BLAKE3 hash of the value's
/// canonical JSON. Override [`Model::digest`] to key on a subset of fields,
/// but keep it deterministic across runs: the digest is the file name.
///
/// Two values with equal digests are the same value as far as the store is
/// concerned. A digest collision between logically different values makes
/// the second `put` fail with [`StoreError::DuplicateKey`].
pub trait Model: Serialize + DeserializeOwned {
    /// Domain tag mixed into the default digest.
    const DOMAIN: &'static str = "folio-model-v1";

    fn digest(&self) -> StoreResult<Digest> {
        ContentHasher::new(Self::DOMAIN)
            .hash_json(self)
            .map_err(|e| StoreError::Digest(e.to_string()))
    }
}

/// Byte encoding for stored files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// UTF-8 JSON. Self-describing; works for any serde model.
    #[default]
    Json,
    /// bincode 1.x. Compact, but cannot decode self-describing types such
    /// as `serde_json::Value`.
    Bincode,
}

impl Encoding {
    pub fn encode<T: Serialize>(&self, value: &T) -> StoreResult<Vec<u8>> {
        match self {
            Self::Json => {
                serde_json::to_vec(value).map_err(|e| StoreError::EncodeFailure(e.to_string()))
            }
            Self::Bincode => {
                bincode::serialize(value).map_err(|e| StoreError::EncodeFailure(e.to_string()))
            }
        }
    }

    /// Decode `bytes`, returning the codec's message on failure. The caller
    /// attaches the file path.
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, String> {
        match self {
            Self::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
            Self::Bincode => bincode::deserialize(bytes).map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Bincode => write!(f, "bincode"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        title: String,
        pinned: bool,
    }

    impl Model for Note {}

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Task {
        title: String,
        pinned: bool,
    }

    impl Model for Task {
        const DOMAIN: &'static str = "task-v1";
    }

    fn note(title: &str) -> Note {
        Note {
            title: title.into(),
            pinned: false,
        }
    }

    #[test]
    fn digest_is_stable_and_content_derived() {
        assert_eq!(note("a").digest().unwrap(), note("a").digest().unwrap());
        assert_ne!(note("a").digest().unwrap(), note("b").digest().unwrap());
    }

    #[test]
    fn digest_is_domain_separated_per_type() {
        let task = Task {
            title: "a".into(),
            pinned: false,
        };
        assert_ne!(note("a").digest().unwrap(), task.digest().unwrap());
    }

    #[test]
    fn json_and_bincode_both_decode_what_they_encode() {
        for encoding in [Encoding::Json, Encoding::Bincode] {
            let bytes = encoding.encode(&note("x")).unwrap();
            let back: Note = encoding.decode(&bytes).unwrap();
            assert_eq!(back, note("x"), "{encoding}");
        }
    }

    #[test]
    fn decode_reports_garbage() {
        let err = Encoding::Json.decode::<Note>(b"{not json").unwrap_err();
        assert!(!err.is_empty());
        assert!(Encoding::Bincode.decode::<Note>(&[0xff]).is_err());
    }

    #[test]
    fn encoding_names() {
        assert_eq!(Encoding::Json.to_string(), "json");
        assert_eq!(Encoding::Bincode.to_string(), "bincode");
        let parsed: Encoding = serde_json::from_str("\"bincode\"").unwrap();
        assert_eq!(parsed, Encoding::Bincode);
    }
}
