//! Stateless session tokens.
//!
//! Tokens are HS256 JWTs signed with a server-held secret. There is no
//! server-side session table; validity is solely a function of the
//! signature and the `exp` claim.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Wallet public key (base58).
    pub sub: String,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiry, seconds since epoch.
    pub exp: i64,
    pub user_id: String,
    pub email: String,
}

/// Mint a session token for an authenticated wallet.
///
/// Expiry is `ttl_secs` from issuance time.
pub fn mint_token(
    secret: &str,
    public_key: &str,
    user_id: &str,
    email: &str,
    ttl_secs: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = Utc::now().timestamp();
    let claims = Claims {
        sub: public_key.to_string(),
        iat,
        exp: iat + ttl_secs,
        user_id: user_id.to_string(),
        email: email.to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a token's signature and expiry, returning its claims.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::errors::ErrorKind;

    const SECRET: &str = "test-signing-secret";

    #[test]
    fn test_mint_and_verify_round_trip() {
        let token = mint_token(SECRET, "pubkey123", "user-1", "pubkey123@wallet.test", 3600)
            .unwrap();

        let claims = verify_token(SECRET, &token).unwrap();
        assert_eq!(claims.sub, "pubkey123");
        assert_eq!(claims.user_id, "user-1");
        assert_eq!(claims.email, "pubkey123@wallet.test");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = mint_token(SECRET, "pubkey123", "user-1", "a@b", 3600).unwrap();
        let err = verify_token("other-secret", &token).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidSignature));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = mint_token(SECRET, "pubkey123", "user-1", "a@b", 3600).unwrap();
        // Flip a character in the payload segment
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3);
        let payload = parts[1].clone();
        let flipped = if payload.starts_with('A') { "B" } else { "A" };
        parts[1] = format!("{}{}", flipped, &payload[1..]);
        let tampered = parts.join(".");

        assert!(verify_token(SECRET, &tampered).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Encode claims already expired well past the default leeway
        let iat = Utc::now().timestamp() - 7200;
        let claims = Claims {
            sub: "pubkey123".to_string(),
            iat,
            exp: iat + 3600,
            user_id: "user-1".to_string(),
            email: "a@b".to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let err = verify_token(SECRET, &token).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ExpiredSignature));
    }
}
