use sqlx::PgPool;

use crate::models::family::FamilyMember;

const COLUMNS: &str =
    "id, personnel_id, relationship, name, birth_date, occupation, notes, created_at";

pub async fn insert_family_member(
    pool: &PgPool,
    member: &FamilyMember,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO family_members (id, personnel_id, relationship, name, birth_date, \
         occupation, notes, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(&member.id)
    .bind(&member.personnel_id)
    .bind(&member.relationship)
    .bind(&member.name)
    .bind(&member.birth_date)
    .bind(&member.occupation)
    .bind(&member.notes)
    .bind(member.created_at)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn list_family_members(
    pool: &PgPool,
    personnel_id: &str,
) -> Result<Vec<FamilyMember>, sqlx::Error> {
    sqlx::query_as::<_, FamilyMember>(&format!(
        "SELECT {COLUMNS} FROM family_members WHERE personnel_id = $1 \
         ORDER BY created_at DESC, id ASC"
    ))
    .bind(personnel_id)
    .fetch_all(pool)
    .await
}
