use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::Claims;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as usize)
        .unwrap_or(0)
}

pub fn generate_access_token(
    employee_id: i64,
    email: String,
    secret: &str,
    ttl: usize,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        employee_id,
        sub: email,
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn roundtrip_preserves_identity() {
        let token = generate_access_token(42, "a@b.com".into(), SECRET, 600).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.employee_id, 42);
        assert_eq!(claims.sub, "a@b.com");
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_access_token(1, "a@b.com".into(), SECRET, 600).unwrap();
        assert!(verify_token(&token, "other-secret").is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(verify_token("not.a.token", SECRET).is_err());
    }

    #[test]
    fn each_token_gets_a_fresh_jti() {
        let a = generate_access_token(1, "a@b.com".into(), SECRET, 600).unwrap();
        let b = generate_access_token(1, "a@b.com".into(), SECRET, 600).unwrap();
        let ja = verify_token(&a, SECRET).unwrap().jti;
        let jb = verify_token(&b, SECRET).unwrap().jti;
        assert_ne!(ja, jb);
    }
}
