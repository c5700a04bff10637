use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::egreso::EgresoFuturo;
use crate::utils::errors::AppError;

pub struct EgresoRepository {
    pool: PgPool,
}

impl EgresoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        fecha: NaiveDate,
        tipo: String,
        categoria: String,
        descripcion: Option<String>,
        monto: Decimal,
        registrado_por: String,
        adjuntos: Vec<Uuid>,
    ) -> Result<EgresoFuturo, AppError> {
        let egreso = sqlx::query_as::<_, EgresoFuturo>(
            r#"
            INSERT INTO egresos_futuros (id, fecha, tipo, categoria, descripcion, monto, registrado_por, adjuntos, estado, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pendiente', $9)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(fecha)
        .bind(tipo)
        .bind(categoria)
        .bind(descripcion)
        .bind(monto)
        .bind(registrado_por)
        .bind(adjuntos)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(egreso)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EgresoFuturo>, AppError> {
        let egreso = sqlx::query_as::<_, EgresoFuturo>(
            "SELECT * FROM egresos_futuros WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(egreso)
    }

    pub async fn find_all(&self) -> Result<Vec<EgresoFuturo>, AppError> {
        let egresos = sqlx::query_as::<_, EgresoFuturo>(
            "SELECT * FROM egresos_futuros ORDER BY fecha, created_at"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(egresos)
    }

    pub async fn update(
        &self,
        id: Uuid,
        fecha: Option<NaiveDate>,
        tipo: Option<String>,
        categoria: Option<String>,
        descripcion: Option<String>,
        monto: Option<Decimal>,
        estado: Option<String>,
    ) -> Result<EgresoFuturo, AppError> {
        let current = self.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Egreso futuro no encontrado".to_string()))?;

        let egreso = sqlx::query_as::<_, EgresoFuturo>(
            r#"
            UPDATE egresos_futuros
            SET fecha = $2, tipo = $3, categoria = $4, descripcion = $5, monto = $6, estado = $7
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .bind(fecha.unwrap_or(current.fecha))
        .bind(tipo.unwrap_or(current.tipo))
        .bind(categoria.unwrap_or(current.categoria))
        .bind(descripcion.or(current.descripcion))
        .bind(monto.unwrap_or(current.monto))
        .bind(estado.unwrap_or(current.estado))
        .fetch_one(&self.pool)
        .await?;

        Ok(egreso)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM egresos_futuros WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Egreso futuro no encontrado".to_string()));
        }

        Ok(())
    }

    /// Marcar un egreso pendiente como pagado dentro de una transacción.
    /// La guarda `estado = 'pendiente'` hace la conversión de una sola vía:
    /// un egreso ya pagado o cancelado no genera una segunda transacción.
    pub async fn marcar_pagado_en(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<EgresoFuturo>, AppError> {
        let egreso = sqlx::query_as::<_, EgresoFuturo>(
            r#"
            UPDATE egresos_futuros
            SET estado = 'pagado'
            WHERE id = $1 AND estado = 'pendiente'
            RETURNING *
            "#
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(egreso)
    }
}
