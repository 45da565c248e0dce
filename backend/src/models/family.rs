use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FamilyMember {
    pub id: String,
    pub personnel_id: String,
    /// Relationship to the service member (istri, suami, anak, ...).
    pub relationship: String,
    pub name: String,
    pub birth_date: Option<String>,
    pub occupation: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FamilyMember {
    pub fn new(
        personnel_id: String,
        relationship: String,
        name: String,
        birth_date: Option<String>,
        occupation: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            personnel_id,
            relationship,
            name,
            birth_date,
            occupation,
            notes,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateFamilyMember {
    pub relationship: String,
    pub name: String,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}
