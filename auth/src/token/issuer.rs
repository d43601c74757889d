use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::AccessClaims;
use super::errors::TokenError;

/// Issues and verifies compact signed access tokens.
///
/// Signing is symmetric HS256; the algorithm is pinned on both paths so a
/// token declaring any other algorithm in its header is rejected before
/// its claims are looked at. The validity window is fixed at construction
/// and shared by every issuance path in a deployment.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validity: Duration,
}

impl TokenIssuer {
    /// Create a token issuer from a symmetric secret.
    ///
    /// # Arguments
    /// * `secret` - Signing secret known only to the service
    /// * `validity` - Expiry window applied to every issued token
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], validity: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            validity,
        }
    }

    /// The configured expiry window.
    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Issue a signed token for a user.
    ///
    /// Claims carry issued-at = now and expiry = now + validity window.
    ///
    /// # Errors
    /// * `EncodingFailed` - signing or serialization failed
    pub fn issue(&self, user_id: i64, email: &str) -> Result<String, TokenError> {
        let claims = AccessClaims::for_user(user_id, email, self.validity);
        self.sign(&claims)
    }

    /// Sign pre-built claims. Used by `issue` and by tests that need
    /// control over the timing fields.
    pub fn sign(&self, claims: &AccessClaims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// The signature is checked before any claim field is trusted, `exp`
    /// is required, and no clock leeway is granted: a token is rejected
    /// the instant its expiry is no longer in the future.
    ///
    /// # Errors
    /// * `Expired` - expiry is not strictly after now
    /// * `SignatureInvalid` - signature mismatch or algorithm mismatch
    /// * `Malformed` - not a structurally valid token
    pub fn verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::SignatureInvalid
                }
                _ => TokenError::Malformed,
            })?;

        Ok(token_data.claims)
    }
}
