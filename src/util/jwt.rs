use jsonwebtoken::{decode, errors::ErrorKind, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ResponseError;

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub sub: String,
    iat: u64,
    exp: u64,
}

pub fn parse_access_token(jwt: &str, secret: &str) -> Result<AccessTokenClaims, ResponseError> {
    let token = decode::<AccessTokenClaims>(
        jwt,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        if matches!(e.kind(), ErrorKind::ExpiredSignature) {
            ResponseError::access_token_err("authorization token expired", "access_token已过期")
        } else {
            ResponseError::from(e)
        }
    })?;
    Ok(token.claims)
}

#[cfg(test)]
pub(crate) fn generate_access_token(sub: &str, secret: &str, expire: i64) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = chrono::Utc::now().timestamp();
    let claims = AccessTokenClaims {
        sub: sub.to_string(),
        iat: now as u64,
        exp: (now + expire) as u64,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
