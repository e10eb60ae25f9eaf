//! Shared key generation for storage backends.
//!
//! Key format: `filedir/{hash[0..2]}/{hash[2..4]}/{hash}` where `hash` is the
//! lowercase hex SHA-256 of the content.

use sha2::{Digest, Sha256};

use crate::traits::{StorageError, StorageResult};

/// Lowercase hex SHA-256 of `data`.
pub fn content_hash(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Storage key of the blob with the given content hash.
pub fn content_key(contenthash: &str) -> StorageResult<String> {
    if contenthash.len() != 64 || !contenthash.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(StorageError::InvalidKey(format!(
            "Not a content hash: {}",
            contenthash
        )));
    }
    let hash = contenthash.to_ascii_lowercase();
    Ok(format!("filedir/{}/{}/{}", &hash[0..2], &hash[2..4], hash))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_key_layout() {
        let hash = content_hash(b"episode");
        let key = content_key(&hash).unwrap();
        assert!(key.starts_with(&format!("filedir/{}/{}/", &hash[0..2], &hash[2..4])));
        assert!(key.ends_with(&hash));
    }

    #[test]
    fn test_content_key_rejects_garbage() {
        assert!(matches!(
            content_key("../../etc/passwd"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(content_key(&"z".repeat(64)).is_err());
    }
}
