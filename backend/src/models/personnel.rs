//! Personnel master records (biographical and assignment data keyed by NRP).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema, Default)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PersonnelStatus {
    #[default]
    Active,
    Retired,
}

impl PersonnelStatus {
    pub fn db_value(&self) -> &'static str {
        match self {
            PersonnelStatus::Active => "active",
            PersonnelStatus::Retired => "retired",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Personnel {
    pub id: String,
    /// Unique service number (NRP). Immutable external identifier.
    pub nrp: String,
    pub name: String,
    /// Current rank (pangkat).
    pub rank: String,
    /// Current position (jabatan).
    pub position: String,
    /// Assigned unit (satuan).
    pub unit: Option<String>,
    /// Date the current position took effect (TMT jabatan).
    pub position_since: Option<String>,
    pub birth_date: Option<String>,
    pub achievements: Option<String>,
    /// General military education summary (dikbangum).
    pub general_education: Option<String>,
    /// Specialist education summary (dikbangspes).
    pub specialist_education: Option<String>,
    pub status: PersonnelStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Personnel {
    pub fn new(nrp: String, name: String, rank: String, position: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            nrp,
            name,
            rank,
            position,
            unit: None,
            position_since: None,
            birth_date: None,
            achievements: None,
            general_education: None,
            specialist_education: None,
            status: PersonnelStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePersonnel {
    pub nrp: String,
    pub name: String,
    pub rank: String,
    pub position: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub position_since: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub achievements: Option<String>,
    #[serde(default)]
    pub general_education: Option<String>,
    #[serde(default)]
    pub specialist_education: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
/// Partial update; absent fields keep their stored values.
pub struct UpdatePersonnel {
    pub name: Option<String>,
    pub rank: Option<String>,
    pub position: Option<String>,
    pub unit: Option<String>,
    pub position_since: Option<String>,
    pub birth_date: Option<String>,
    pub achievements: Option<String>,
    pub general_education: Option<String>,
    pub specialist_education: Option<String>,
    pub status: Option<PersonnelStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PersonnelResponse {
    pub id: String,
    pub nrp: String,
    pub name: String,
    pub rank: String,
    pub position: String,
    pub unit: Option<String>,
    pub position_since: Option<String>,
    pub birth_date: Option<String>,
    pub achievements: Option<String>,
    pub general_education: Option<String>,
    pub specialist_education: Option<String>,
    pub status: PersonnelStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Personnel> for PersonnelResponse {
    fn from(p: Personnel) -> Self {
        PersonnelResponse {
            id: p.id,
            nrp: p.nrp,
            name: p.name,
            rank: p.rank,
            position: p.position,
            unit: p.unit,
            position_since: p.position_since,
            birth_date: p.birth_date,
            achievements: p.achievements,
            general_education: p.general_education,
            specialist_education: p.specialist_education,
            status: p.status,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl UpdatePersonnel {
    /// Merges this partial update into an existing record, returning the
    /// record to persist.
    pub fn apply_to(self, mut personnel: Personnel) -> Personnel {
        if let Some(name) = self.name {
            personnel.name = name;
        }
        if let Some(rank) = self.rank {
            personnel.rank = rank;
        }
        if let Some(position) = self.position {
            personnel.position = position;
        }
        if self.unit.is_some() {
            personnel.unit = self.unit;
        }
        if self.position_since.is_some() {
            personnel.position_since = self.position_since;
        }
        if self.birth_date.is_some() {
            personnel.birth_date = self.birth_date;
        }
        if self.achievements.is_some() {
            personnel.achievements = self.achievements;
        }
        if self.general_education.is_some() {
            personnel.general_education = self.general_education;
        }
        if self.specialist_education.is_some() {
            personnel.specialist_education = self.specialist_education;
        }
        if let Some(status) = self.status {
            personnel.status = status;
        }
        personnel.updated_at = Utc::now();
        personnel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_merges_only_provided_fields() {
        let existing = Personnel::new(
            "11120017460989".to_string(),
            "Fredy Jaguar".to_string(),
            "KAPTEN".to_string(),
            "Danton".to_string(),
        );
        let update = UpdatePersonnel {
            rank: Some("MAYOR".to_string()),
            ..Default::default()
        };
        let merged = update.apply_to(existing);
        assert_eq!(merged.rank, "MAYOR");
        assert_eq!(merged.name, "Fredy Jaguar");
        assert_eq!(merged.position, "Danton");
    }

    #[test]
    fn personnel_status_serde_snake_case() {
        let s: PersonnelStatus = serde_json::from_str("\"retired\"").unwrap();
        assert_eq!(s, PersonnelStatus::Retired);
        let v = serde_json::to_value(PersonnelStatus::Active).unwrap();
        assert_eq!(v, serde_json::json!("active"));
    }
}
