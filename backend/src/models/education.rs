use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
/// Distinguishes general development courses from specialist ones.
pub enum EducationKind {
    General,
    Specialist,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EducationRecord {
    pub id: String,
    pub personnel_id: String,
    pub education_kind: EducationKind,
    pub education_name: String,
    pub year: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl EducationRecord {
    pub fn new(
        personnel_id: String,
        education_kind: EducationKind,
        education_name: String,
        year: Option<String>,
        location: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            personnel_id,
            education_kind,
            education_name,
            year,
            location,
            notes,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEducationRecord {
    pub education_kind: EducationKind,
    #[validate(length(min = 1, max = 200))]
    pub education_name: String,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}
