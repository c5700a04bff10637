use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::audit::AuditLog;
use crate::utils::errors::AppError;

pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Anotar una acción fuera de una transacción
    pub async fn registrar(
        &self,
        usuario: &str,
        accion: &str,
        detalle: &str,
    ) -> Result<(), AppError> {
        let mut conn = self.pool.acquire().await?;
        Self::registrar_en(&mut conn, usuario, accion, detalle).await
    }

    pub async fn find_recientes(&self, limite: i64) -> Result<Vec<AuditLog>, AppError> {
        let entradas = sqlx::query_as::<_, AuditLog>(
            "SELECT * FROM audit_logs ORDER BY fecha DESC LIMIT $1"
        )
        .bind(limite)
        .fetch_all(&self.pool)
        .await?;

        Ok(entradas)
    }

    /// Anotar una acción dentro de una transacción: la entrada de auditoría
    /// se confirma o se revierte junto con la mutación que describe.
    pub async fn registrar_en(
        conn: &mut PgConnection,
        usuario: &str,
        accion: &str,
        detalle: &str,
    ) -> Result<(), AppError> {
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO audit_logs (id, fecha, usuario, accion, detalle, created_at) VALUES ($1, $2, $3, $4, $5, $2)"
        )
        .bind(Uuid::new_v4())
        .bind(now)
        .bind(usuario)
        .bind(accion)
        .bind(detalle)
        .execute(conn)
        .await?;

        Ok(())
    }
}
