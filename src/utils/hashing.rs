//! Bitcoin-style hashing helpers

use sha2::{Digest, Sha256};

/// Calculate Bitcoin double SHA256 hash
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    let first_hash = Sha256::digest(data);
    let second_hash = Sha256::digest(first_hash);

    let mut result = [0u8; 32];
    result.copy_from_slice(&second_hash);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_sha256_known_vector() {
        // SHA256(SHA256("hello"))
        assert_eq!(
            hex::encode(double_sha256(b"hello")),
            "9595c9df90075148eb06860365df33584b75bff782a510c6cd4883a419833d50"
        );
    }

    #[test]
    fn test_double_sha256_differs_from_single() {
        let single = Sha256::digest(b"counterparty");
        assert_ne!(double_sha256(b"counterparty").as_slice(), single.as_slice());
    }
}
