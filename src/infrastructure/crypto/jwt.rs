use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::application::ports::token_codec::{AccountClaims, TokenCodec, TokenError};
use crate::domain::accounts::account::Account;

const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// HMAC-signed bearer tokens keyed by a secret handed in at startup.
pub struct JwtTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl JwtTokenCodec {
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, account: &Account) -> Result<String, TokenError> {
        let now = chrono::Utc::now().timestamp();
        let claims = AccountClaims {
            account_number: account.number,
            exp: (now + self.ttl_secs).max(0) as usize,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| TokenError::Signing)
    }

    fn verify(&self, token: &str) -> Result<AccountClaims, TokenError> {
        let header = jsonwebtoken::decode_header(token).map_err(|_| TokenError::Malformed)?;
        if !HMAC_ALGORITHMS.contains(&header.alg) {
            return Err(TokenError::UnexpectedSigningMethod(format!("{:?}", header.alg)));
        }
        let mut validation = Validation::new(header.alg);
        validation.leeway = 0;
        let data = jsonwebtoken::decode::<AccountClaims>(token, &self.decoding, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidAlgorithm => {
                    TokenError::UnexpectedSigningMethod(format!("{:?}", header.alg))
                }
                _ => TokenError::Malformed,
            })?;
        Ok(data.claims)
    }
}
