//! # Structural Change Hash
//!
//! Reduces `CanonicalBytes` to the 64-bit value stored alongside an
//! application record and compared on every write.
//!
//! The hash is used for change detection only, never for integrity. It is
//! the first eight bytes, big-endian, of the SHA-256 digest of the canonical
//! bytes. Truncating a well-distributed digest keeps the stored value compact
//! while making accidental collisions between successive revisions of the
//! same record negligible.
//!
//! ## Invariant
//!
//! `structural_hash()` accepts only `&CanonicalBytes`, not raw `&[u8]`, so
//! every stored hash was produced through the canonical serialization path.

use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;

/// Compute the full SHA-256 digest of canonical bytes.
pub fn sha256_digest(data: &CanonicalBytes) -> [u8; 32] {
    let hash = Sha256::digest(data.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    bytes
}

/// Compute the 64-bit structural change hash of canonical bytes.
pub fn structural_hash(data: &CanonicalBytes) -> u64 {
    let digest = sha256_digest(data);
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

/// Render a structural hash as fixed-width lowercase hex.
pub fn hash_hex(hash: u64) -> String {
    format!("{hash:016x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_hash_deterministic() {
        let cb = CanonicalBytes::new(&serde_json::json!({"a": 1, "b": 2})).unwrap();
        assert_eq!(structural_hash(&cb), structural_hash(&cb));
    }

    #[test]
    fn test_structural_hash_key_order_independent() {
        let a = CanonicalBytes::new(&serde_json::json!({"a": 1, "b": 2})).unwrap();
        let b = CanonicalBytes::new(&serde_json::json!({"b": 2, "a": 1})).unwrap();
        assert_eq!(structural_hash(&a), structural_hash(&b));
    }

    #[test]
    fn test_structural_hash_is_digest_prefix() {
        let cb = CanonicalBytes::new(&serde_json::json!({"k": "v"})).unwrap();
        let digest = sha256_digest(&cb);
        let hash = structural_hash(&cb);
        assert_eq!(hash.to_be_bytes(), digest[..8]);
    }

    #[test]
    fn test_structural_hash_value_sensitive() {
        let a = CanonicalBytes::new(&serde_json::json!({"k": "v"})).unwrap();
        let b = CanonicalBytes::new(&serde_json::json!({"k": "w"})).unwrap();
        assert_ne!(structural_hash(&a), structural_hash(&b));
    }

    #[test]
    fn test_hash_hex_fixed_width() {
        assert_eq!(hash_hex(0), "0000000000000000");
        assert_eq!(hash_hex(0xabc), "0000000000000abc");
        assert_eq!(hash_hex(u64::MAX), "ffffffffffffffff");
    }
}
