//! Applies the effect of an approved request to the personnel store. This
//! runs after the status flip has been persisted; a failure here leaves the
//! request verified and is surfaced to the caller as a propagation error.

use anyhow::{anyhow, Context};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::personnel::Personnel;
use crate::models::request::{
    CorrectionPayload, MutationPayload, PromotionPayload, Request, RequestPayload,
};
use crate::repositories::personnel as personnel_repo;

#[derive(Debug, Clone)]
pub struct RecordUpdateService {
    pool: PgPool,
}

impl RecordUpdateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Propagates an approved request into the subject's personnel record.
    pub async fn apply(&self, request: &Request) -> anyhow::Result<()> {
        let personnel = personnel_repo::find_personnel_by_nrp(&self.pool, &request.personnel_nrp)
            .await
            .context("failed to load personnel record")?
            .ok_or_else(|| {
                anyhow!(
                    "personnel record {} no longer exists",
                    request.personnel_nrp
                )
            })?;

        match &request.payload.0 {
            RequestPayload::Mutation(payload) => self.apply_mutation(&personnel, payload).await,
            RequestPayload::Retirement(_) => self.apply_retirement(&personnel).await,
            RequestPayload::Promotion(payload) => self.apply_promotion(&personnel, payload).await,
            RequestPayload::Correction(payload) => self.apply_correction(&personnel, payload).await,
        }
    }

    /// Moves the subject to the destination position/unit and appends the
    /// corresponding position-history entry in one transaction.
    async fn apply_mutation(
        &self,
        personnel: &Personnel,
        payload: &MutationPayload,
    ) -> anyhow::Result<()> {
        let now = Utc::now();
        let new_position = payload
            .destination_position
            .clone()
            .unwrap_or_else(|| personnel.position.clone());
        let new_unit = payload
            .destination_unit
            .clone()
            .or_else(|| personnel.unit.clone());

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "UPDATE personnel SET position = $1, unit = $2, updated_at = $3 WHERE id = $4",
        )
        .bind(&new_position)
        .bind(&new_unit)
        .bind(now)
        .bind(&personnel.id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO position_history (id, personnel_id, previous_position, new_position, \
             unit, effective_date, decree_number, notes, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&personnel.id)
        .bind(&personnel.position)
        .bind(&new_position)
        .bind(&new_unit)
        .bind(payload.effective_date.clone().unwrap_or_default())
        .bind(None::<String>)
        .bind(&payload.reason)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn apply_retirement(&self, personnel: &Personnel) -> anyhow::Result<()> {
        let updated = personnel_repo::set_personnel_status(
            &self.pool,
            &personnel.nrp,
            crate::models::personnel::PersonnelStatus::Retired,
        )
        .await?;
        if updated == 0 {
            return Err(anyhow!("personnel record {} vanished", personnel.nrp));
        }
        Ok(())
    }

    /// Promotes the subject and appends the rank-history entry in one
    /// transaction.
    async fn apply_promotion(
        &self,
        personnel: &Personnel,
        payload: &PromotionPayload,
    ) -> anyhow::Result<()> {
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE personnel SET rank = $1, updated_at = $2 WHERE id = $3")
            .bind(&payload.target_rank)
            .bind(now)
            .bind(&personnel.id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO rank_history (id, personnel_id, previous_rank, new_rank, \
             effective_date, decree_number, notes, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&personnel.id)
        .bind(&personnel.rank)
        .bind(&payload.target_rank)
        .bind(&payload.effective_date)
        .bind(&payload.decree_number)
        .bind(None::<String>)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn apply_correction(
        &self,
        personnel: &Personnel,
        payload: &CorrectionPayload,
    ) -> anyhow::Result<()> {
        let updated = personnel_repo::set_personnel_field(
            &self.pool,
            &personnel.nrp,
            &payload.field_name,
            &payload.new_value,
        )
        .await
        .context("failed to apply correction")?;
        if updated == 0 {
            return Err(anyhow!("personnel record {} vanished", personnel.nrp));
        }
        Ok(())
    }
}
