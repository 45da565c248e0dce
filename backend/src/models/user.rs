//! Models that represent user accounts, authentication payloads, and roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
/// Database representation of an authenticated user account.
pub struct User {
    /// Unique identifier for the user.
    pub id: String,
    /// Immutable username used for login.
    pub username: String,
    /// Argon2 hash of the user's password.
    pub password_hash: String,
    /// Human-readable full name.
    pub full_name: String,
    /// Role describing the user's privileges.
    pub role: UserRole,
    /// NRP linking a personnel-role account to its own personnel record.
    pub nrp: Option<String>,
    /// Deactivated accounts cannot authenticate.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, ToSchema, Default)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
/// Supported user roles stored in the database.
pub enum UserRole {
    /// Full administrative access, including account management.
    Admin,
    /// Personnel-administration staff (staf kepegawaian).
    Staff,
    /// Officer authorized to decide pending requests (pejabat verifikator).
    Verifier,
    /// Unit leadership with read access to reports and audit trails.
    Leader,
    /// An individual service member with self-service access only.
    #[default]
    Personnel,
}

impl UserRole {
    /// Returns the canonical snake_case representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Staff => "staff",
            UserRole::Verifier => "verifier",
            UserRole::Leader => "leader",
            UserRole::Personnel => "personnel",
        }
    }
}

impl Serialize for UserRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "admin" => Ok(UserRole::Admin),
            "staff" => Ok(UserRole::Staff),
            "verifier" => Ok(UserRole::Verifier),
            "leader" => Ok(UserRole::Leader),
            "personnel" => Ok(UserRole::Personnel),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &["admin", "staff", "verifier", "leader", "personnel"],
            )),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
/// Payload for creating a new user account.
pub struct CreateUser {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub role: UserRole,
    #[serde(default)]
    pub nrp: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
/// Payload for updating portions of an existing user.
pub struct UpdateUser {
    pub full_name: Option<String>,
    pub role: Option<UserRole>,
    pub nrp: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
/// Credentials submitted by a user attempting to authenticate.
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
/// Payload submitted when a user requests to change their password.
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
/// Payload for an administrative password reset.
pub struct ResetPasswordRequest {
    pub new_password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
/// Authentication token returned after a successful login.
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
/// Public-facing representation of a user returned by the API.
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub role: String,
    pub nrp: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            role: user.role.as_str().to_string(),
            nrp: user.nrp,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

impl User {
    /// Constructs a new active user with freshly generated identifiers.
    pub fn new(
        username: String,
        password_hash: String,
        full_name: String,
        role: UserRole,
        nrp: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            password_hash,
            full_name,
            role,
            nrp,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn user_role_serde_round_trips_snake_case() {
        let v: UserRole = serde_json::from_str("\"verifier\"").unwrap();
        assert_eq!(v, UserRole::Verifier);
        let p: UserRole = serde_json::from_str("\"personnel\"").unwrap();
        assert_eq!(p, UserRole::Personnel);

        let s = serde_json::to_value(UserRole::Staff).unwrap();
        assert_eq!(s, Value::String("staff".into()));
        let l = serde_json::to_value(UserRole::Leader).unwrap();
        assert_eq!(l, Value::String("leader".into()));
    }

    #[test]
    fn user_role_rejects_unknown_variant() {
        let result: Result<UserRole, _> = serde_json::from_str("\"superuser\"");
        assert!(result.is_err());
    }

    #[test]
    fn user_response_omits_password_hash() {
        let user = User::new(
            "budi".to_string(),
            "hash".to_string(),
            "Budi Santoso".to_string(),
            UserRole::Personnel,
            Some("11120017460989".to_string()),
        );
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "personnel");
        assert_eq!(json["nrp"], "11120017460989");
    }
}
