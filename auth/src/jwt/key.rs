use std::fmt;

use super::errors::JwtError;

/// Process-wide HMAC secret used to sign and verify every token.
///
/// Built once at startup; an empty secret is rejected so a misconfigured
/// process never starts serving.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Wrap a secret, rejecting empty input.
    ///
    /// # Errors
    /// * `MissingSigningKey` - Secret is empty
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, JwtError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(JwtError::MissingSigningKey);
        }
        Ok(Self(secret))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningKey").field(&"<redacted>").finish()
    }
}
