use sqlx::PgPool;

use crate::models::position_history::PositionHistory;

const COLUMNS: &str = "id, personnel_id, previous_position, new_position, unit, effective_date, \
     decree_number, notes, created_at";

pub async fn insert_position_history(
    pool: &PgPool,
    entry: &PositionHistory,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO position_history (id, personnel_id, previous_position, new_position, unit, \
         effective_date, decree_number, notes, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(&entry.id)
    .bind(&entry.personnel_id)
    .bind(&entry.previous_position)
    .bind(&entry.new_position)
    .bind(&entry.unit)
    .bind(&entry.effective_date)
    .bind(&entry.decree_number)
    .bind(&entry.notes)
    .bind(entry.created_at)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn list_position_history(
    pool: &PgPool,
    personnel_id: &str,
) -> Result<Vec<PositionHistory>, sqlx::Error> {
    sqlx::query_as::<_, PositionHistory>(&format!(
        "SELECT {COLUMNS} FROM position_history WHERE personnel_id = $1 \
         ORDER BY created_at DESC, id ASC"
    ))
    .bind(personnel_id)
    .fetch_all(pool)
    .await
}
