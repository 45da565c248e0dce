use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub role: String,
    pub exp: i64,    // expiration time
    pub iat: i64,    // issued at
    pub jti: String, // JWT ID
}

impl Claims {
    pub fn new(user_id: String, username: String, role: String, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: user_id,
            username,
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

pub fn create_access_token(
    user_id: String,
    username: String,
    role: String,
    secret: &str,
    expiration_hours: u64,
) -> anyhow::Result<String> {
    let claims = Claims::new(user_id, username, role, expiration_hours);
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;

    Ok(token)
}

pub fn verify_access_token(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_verify_round_trip() {
        let token = create_access_token(
            "user-123".into(),
            "budi".into(),
            "verifier".into(),
            "secret",
            1,
        )
        .expect("create token");
        let claims = verify_access_token(&token, "secret").expect("verify token");
        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.username, "budi");
        assert_eq!(claims.role, "verifier");
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let token =
            create_access_token("user-123".into(), "budi".into(), "admin".into(), "secret", 1)
                .expect("create token");
        assert!(verify_access_token(&token, "other-secret").is_err());
    }
}
