use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::JwtError;
use super::key::SigningKey;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type so each token kind keeps its own payload type.
/// Signs with HS256 only; tokens whose header names any other algorithm are
/// rejected before the signature is checked.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
}

impl JwtHandler {
    /// Create a new JWT handler.
    ///
    /// # Arguments
    /// * `key` - Process signing key
    /// * `issuer` - Issuer every decoded token must carry
    ///
    /// # Returns
    /// JwtHandler configured with HS256, mandatory `exp`/`iss` and zero leeway
    pub fn new(key: &SigningKey, issuer: &str) -> Self {
        let algorithm = Algorithm::HS256;

        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            algorithm,
            validation,
        }
    }

    /// Encode claims into a signed JWT.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` is in the past
    /// * `UnexpectedClaims` - Payload does not deserialize into `T`
    /// * `InvalidToken` - Bad signature, algorithm, issuer or encoding
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        // Header problems (unknown `alg`, bad encoding) are not claim mismatches
        decode_header(token).map_err(|e| JwtError::InvalidToken(e.to_string()))?;

        let token_data =
            decode::<T>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    ErrorKind::Json(err) => JwtError::UnexpectedClaims(err.to_string()),
                    _ => JwtError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}
