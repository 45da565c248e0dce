use sqlx::PgPool;

use crate::models::rank_history::RankHistory;

const COLUMNS: &str =
    "id, personnel_id, previous_rank, new_rank, effective_date, decree_number, notes, created_at";

pub async fn insert_rank_history(pool: &PgPool, entry: &RankHistory) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO rank_history (id, personnel_id, previous_rank, new_rank, effective_date, \
         decree_number, notes, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(&entry.id)
    .bind(&entry.personnel_id)
    .bind(&entry.previous_rank)
    .bind(&entry.new_rank)
    .bind(&entry.effective_date)
    .bind(&entry.decree_number)
    .bind(&entry.notes)
    .bind(entry.created_at)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn list_rank_history(
    pool: &PgPool,
    personnel_id: &str,
) -> Result<Vec<RankHistory>, sqlx::Error> {
    sqlx::query_as::<_, RankHistory>(&format!(
        "SELECT {COLUMNS} FROM rank_history WHERE personnel_id = $1 \
         ORDER BY created_at DESC, id ASC"
    ))
    .bind(personnel_id)
    .fetch_all(pool)
    .await
}
