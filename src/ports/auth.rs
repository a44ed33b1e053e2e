//! SignatureVerifier port - wallet-signature login.
//!
//! Login is proof of key possession: the client signs a challenge message
//! with their wallet and the server checks that the recovered signer matches
//! the claimed address. Key management and the recovery math live behind
//! this port.

use async_trait::async_trait;

/// Port for verifying a wallet signature over a login message.
#[async_trait]
pub trait SignatureVerifier: Send + Sync {
    /// Returns true when `signature` over `message` recovers to `address`.
    ///
    /// Must never fail hard - a malformed signature is simply not valid.
    async fn verify(&self, address: &str, message: &str, signature: &str) -> bool;
}
