use rand::RngCore;
use sha2::{Digest, Sha256};

/// A freshly generated opaque capability token: 32 random bytes, hex encoded.
/// Only the digest is persisted; the plaintext goes into the email link.
#[derive(Debug, Clone)]
pub struct OpaqueToken {
    pub plaintext: String,
    pub digest: String,
}

impl OpaqueToken {
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        let plaintext = hex::encode(bytes);
        let digest = Self::digest_of(&plaintext);
        Self { plaintext, digest }
    }

    /// Digest used to look a presented token up in storage.
    pub fn digest_of(plaintext: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(plaintext.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_unique_and_256_bit() {
        let a = OpaqueToken::generate();
        let b = OpaqueToken::generate();

        assert_eq!(a.plaintext.len(), 64); // 32 bytes hex encoded
        assert_ne!(a.plaintext, b.plaintext);
        assert_ne!(a.digest, b.digest);
    }

    #[test]
    fn digest_is_stable_for_same_plaintext() {
        let token = OpaqueToken::generate();
        assert_eq!(token.digest, OpaqueToken::digest_of(&token.plaintext));
    }

    #[test]
    fn digest_differs_from_plaintext() {
        let token = OpaqueToken::generate();
        assert_ne!(token.digest, token.plaintext);
    }
}
