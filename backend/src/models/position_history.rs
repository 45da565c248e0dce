use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PositionHistory {
    pub id: String,
    pub personnel_id: String,
    pub previous_position: String,
    pub new_position: String,
    pub unit: Option<String>,
    pub effective_date: String,
    pub decree_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PositionHistory {
    pub fn new(
        personnel_id: String,
        previous_position: String,
        new_position: String,
        unit: Option<String>,
        effective_date: String,
        decree_number: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            personnel_id,
            previous_position,
            new_position,
            unit,
            effective_date,
            decree_number,
            notes,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePositionHistory {
    pub previous_position: String,
    pub new_position: String,
    #[serde(default)]
    pub unit: Option<String>,
    pub effective_date: String,
    #[serde(default)]
    pub decree_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}
