//! Development signature verifier.

use async_trait::async_trait;

use crate::ports::SignatureVerifier;

/// Shape-only signature check for development.
///
/// Accepts any well-formed 65-byte secp256k1 signature over any message for
/// any well-formed address. Performs no recovery - a production deployment
/// supplies a real verifier behind the same port.
pub struct DevSignatureVerifier;

fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit())
}

#[async_trait]
impl SignatureVerifier for DevSignatureVerifier {
    async fn verify(&self, address: &str, message: &str, signature: &str) -> bool {
        let address = address.strip_prefix("0x").unwrap_or(address);
        let signature = signature.strip_prefix("0x").unwrap_or(signature);
        !message.is_empty()
            && address.len() == 40
            && is_hex(address)
            && signature.len() == 130
            && is_hex(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "0x00112233445566778899aabbccddeeff00112233";

    fn sig() -> String {
        format!("0x{}", "ab".repeat(65))
    }

    #[tokio::test]
    async fn accepts_well_formed_signature() {
        let verifier = DevSignatureVerifier;
        assert!(verifier.verify(ADDRESS, "login:123", &sig()).await);
    }

    #[tokio::test]
    async fn accepts_unprefixed_signature() {
        let verifier = DevSignatureVerifier;
        let unprefixed = "ab".repeat(65);
        assert!(verifier.verify(ADDRESS, "login:123", &unprefixed).await);
    }

    #[tokio::test]
    async fn rejects_malformed_input() {
        let verifier = DevSignatureVerifier;
        assert!(!verifier.verify(ADDRESS, "login:123", "0x1234").await);
        assert!(!verifier.verify("0xnothex", "login:123", &sig()).await);
        assert!(!verifier.verify(ADDRESS, "", &sig()).await);
    }
}
