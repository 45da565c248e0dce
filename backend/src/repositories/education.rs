use sqlx::PgPool;

use crate::models::education::EducationRecord;

const COLUMNS: &str =
    "id, personnel_id, education_kind, education_name, year, location, notes, created_at";

pub async fn insert_education_record(
    pool: &PgPool,
    record: &EducationRecord,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO education_records (id, personnel_id, education_kind, education_name, year, \
         location, notes, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(&record.id)
    .bind(&record.personnel_id)
    .bind(record.education_kind)
    .bind(&record.education_name)
    .bind(&record.year)
    .bind(&record.location)
    .bind(&record.notes)
    .bind(record.created_at)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn list_education_records(
    pool: &PgPool,
    personnel_id: &str,
) -> Result<Vec<EducationRecord>, sqlx::Error> {
    sqlx::query_as::<_, EducationRecord>(&format!(
        "SELECT {COLUMNS} FROM education_records WHERE personnel_id = $1 \
         ORDER BY created_at DESC, id ASC"
    ))
    .bind(personnel_id)
    .fetch_all(pool)
    .await
}
