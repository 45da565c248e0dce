//! Repository functions for personnel master records.

use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::personnel::{Personnel, PersonnelStatus};

const PERSONNEL_COLUMNS: &str = "id, nrp, name, rank, position, unit, position_since, birth_date, \
     achievements, general_education, specialist_education, status, created_at, updated_at";

#[derive(Debug, Clone, Default)]
pub struct PersonnelFilters {
    /// Case-insensitive match against name, NRP, and position.
    pub search: Option<String>,
    pub rank: Option<String>,
    pub unit: Option<String>,
    pub status: Option<PersonnelStatus>,
    /// Restricts the result to a single NRP (self-service visibility).
    pub nrp: Option<String>,
}

pub async fn insert_personnel(pool: &PgPool, personnel: &Personnel) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO personnel (id, nrp, name, rank, position, unit, position_since, birth_date, \
         achievements, general_education, specialist_education, status, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
    )
    .bind(&personnel.id)
    .bind(&personnel.nrp)
    .bind(&personnel.name)
    .bind(&personnel.rank)
    .bind(&personnel.position)
    .bind(&personnel.unit)
    .bind(&personnel.position_since)
    .bind(&personnel.birth_date)
    .bind(&personnel.achievements)
    .bind(&personnel.general_education)
    .bind(&personnel.specialist_education)
    .bind(personnel.status.db_value())
    .bind(personnel.created_at)
    .bind(personnel.updated_at)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn find_personnel_by_id(
    pool: &PgPool,
    id: &str,
) -> Result<Option<Personnel>, sqlx::Error> {
    sqlx::query_as::<_, Personnel>(&format!(
        "SELECT {PERSONNEL_COLUMNS} FROM personnel WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn find_personnel_by_nrp(
    pool: &PgPool,
    nrp: &str,
) -> Result<Option<Personnel>, sqlx::Error> {
    sqlx::query_as::<_, Personnel>(&format!(
        "SELECT {PERSONNEL_COLUMNS} FROM personnel WHERE nrp = $1"
    ))
    .bind(nrp)
    .fetch_optional(pool)
    .await
}

pub async fn list_personnel(
    pool: &PgPool,
    filters: &PersonnelFilters,
    limit: i64,
    offset: i64,
) -> Result<Vec<Personnel>, sqlx::Error> {
    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("SELECT {PERSONNEL_COLUMNS} FROM personnel"));
    apply_personnel_filters(&mut builder, filters);
    builder
        .push(" ORDER BY name ASC, id ASC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
    builder.build_query_as::<Personnel>().fetch_all(pool).await
}

pub async fn count_personnel(
    pool: &PgPool,
    filters: &PersonnelFilters,
) -> Result<i64, sqlx::Error> {
    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("SELECT COUNT(*) FROM personnel");
    apply_personnel_filters(&mut builder, filters);
    let (count,): (i64,) = builder.build_query_as().fetch_one(pool).await?;
    Ok(count)
}

fn apply_personnel_filters<'a>(
    builder: &mut QueryBuilder<'a, Postgres>,
    filters: &'a PersonnelFilters,
) {
    let mut has_clause = false;
    if let Some(ref nrp) = filters.nrp {
        push_clause(builder, &mut has_clause);
        builder.push("nrp = ").push_bind(nrp);
    }
    if let Some(ref search) = filters.search {
        push_clause(builder, &mut has_clause);
        let pattern = format!("%{}%", search);
        builder
            .push("(name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR nrp ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR position ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(ref rank) = filters.rank {
        push_clause(builder, &mut has_clause);
        builder.push("rank = ").push_bind(rank);
    }
    if let Some(ref unit) = filters.unit {
        push_clause(builder, &mut has_clause);
        builder.push("unit ILIKE ").push_bind(format!("%{}%", unit));
    }
    if let Some(status) = filters.status {
        push_clause(builder, &mut has_clause);
        builder.push("status = ").push_bind(status.db_value());
    }
}

fn push_clause(builder: &mut QueryBuilder<'_, Postgres>, has_clause: &mut bool) {
    if *has_clause {
        builder.push(" AND ");
    } else {
        builder.push(" WHERE ");
        *has_clause = true;
    }
}

pub async fn update_personnel(pool: &PgPool, personnel: &Personnel) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE personnel SET name = $1, rank = $2, position = $3, unit = $4, \
         position_since = $5, birth_date = $6, achievements = $7, general_education = $8, \
         specialist_education = $9, status = $10, updated_at = $11 WHERE id = $12",
    )
    .bind(&personnel.name)
    .bind(&personnel.rank)
    .bind(&personnel.position)
    .bind(&personnel.unit)
    .bind(&personnel.position_since)
    .bind(&personnel.birth_date)
    .bind(&personnel.achievements)
    .bind(&personnel.general_education)
    .bind(&personnel.specialist_education)
    .bind(personnel.status.db_value())
    .bind(personnel.updated_at)
    .bind(&personnel.id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Overwrites a single correctable column, selected from a fixed set so the
/// statement text never contains caller input.
pub async fn set_personnel_field(
    pool: &PgPool,
    nrp: &str,
    field_name: &str,
    value: &str,
) -> Result<u64, sqlx::Error> {
    let query = match field_name {
        "name" => "UPDATE personnel SET name = $1, updated_at = $2 WHERE nrp = $3",
        "rank" => "UPDATE personnel SET rank = $1, updated_at = $2 WHERE nrp = $3",
        "position" => "UPDATE personnel SET position = $1, updated_at = $2 WHERE nrp = $3",
        "unit" => "UPDATE personnel SET unit = $1, updated_at = $2 WHERE nrp = $3",
        "position_since" => {
            "UPDATE personnel SET position_since = $1, updated_at = $2 WHERE nrp = $3"
        }
        "birth_date" => "UPDATE personnel SET birth_date = $1, updated_at = $2 WHERE nrp = $3",
        "achievements" => "UPDATE personnel SET achievements = $1, updated_at = $2 WHERE nrp = $3",
        "general_education" => {
            "UPDATE personnel SET general_education = $1, updated_at = $2 WHERE nrp = $3"
        }
        "specialist_education" => {
            "UPDATE personnel SET specialist_education = $1, updated_at = $2 WHERE nrp = $3"
        }
        other => return Err(sqlx::Error::ColumnNotFound(other.to_string())),
    };

    let result = sqlx::query(query)
        .bind(value)
        .bind(Utc::now())
        .bind(nrp)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn set_personnel_status(
    pool: &PgPool,
    nrp: &str,
    status: PersonnelStatus,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE personnel SET status = $1, updated_at = $2 WHERE nrp = $3")
        .bind(status.db_value())
        .bind(Utc::now())
        .bind(nrp)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn set_personnel_assignment(
    pool: &PgPool,
    nrp: &str,
    position: Option<&str>,
    unit: Option<&str>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE personnel SET position = COALESCE($1, position), unit = COALESCE($2, unit), \
         updated_at = $3 WHERE nrp = $4",
    )
    .bind(position)
    .bind(unit)
    .bind(Utc::now())
    .bind(nrp)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn set_personnel_rank(
    pool: &PgPool,
    nrp: &str,
    rank: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE personnel SET rank = $1, updated_at = $2 WHERE nrp = $3")
        .bind(rank)
        .bind(Utc::now())
        .bind(nrp)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn distinct_units(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT DISTINCT unit FROM personnel WHERE unit IS NOT NULL AND unit <> '' ORDER BY unit",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|(unit,)| unit).collect())
}

pub async fn count_by_status(pool: &PgPool) -> Result<Vec<(String, i64)>, sqlx::Error> {
    sqlx::query_as("SELECT status, COUNT(*) FROM personnel GROUP BY status")
        .fetch_all(pool)
        .await
}

pub async fn count_active_by_rank(pool: &PgPool) -> Result<Vec<(String, i64)>, sqlx::Error> {
    sqlx::query_as(
        "SELECT rank, COUNT(*) FROM personnel WHERE status = 'active' \
         GROUP BY rank ORDER BY COUNT(*) DESC",
    )
    .fetch_all(pool)
    .await
}
