use folio_types::Digest;

/// Domain-separated BLAKE3 content hasher.
///
/// Each hasher carries a domain tag (e.g. `"folio-model-v1"`) that is
/// prepended to every hash computation, so two value types with identical
/// encodings still land on different keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> Digest {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        Digest::from_hash(*hasher.finalize().as_bytes())
    }

    /// Hash a serializable value as JSON with domain separation.
    ///
    /// Maps are hashed through `serde_json::Value`, whose object type keeps
    /// keys sorted, so field order in a `HashMap` cannot change the digest.
    pub fn hash_json<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<Digest, HasherError> {
        let canonical =
            serde_json::to_value(value).map_err(|e| HasherError::Serialization(e.to_string()))?;
        let data = serde_json::to_vec(&canonical)
            .map_err(|e| HasherError::Serialization(e.to_string()))?;
        Ok(self.hash(&data))
    }
}

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("serialization error: {0}")]
    Serialization(String),
}
