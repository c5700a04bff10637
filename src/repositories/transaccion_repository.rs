use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::transaccion_dto::ResumenFinanciero;
use crate::models::transaccion::Transaccion;
use crate::utils::errors::AppError;

pub struct TransaccionRepository {
    pool: PgPool,
}

impl TransaccionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        fecha: NaiveDate,
        tipo: String,
        monto: Decimal,
        categoria: String,
        descripcion: Option<String>,
        registrado_por: String,
        adjuntos: Vec<Uuid>,
    ) -> Result<Transaccion, AppError> {
        let mut conn = self.pool.acquire().await?;
        Self::create_en(&mut conn, fecha, tipo, monto, categoria, descripcion, registrado_por, adjuntos).await
    }

    pub async fn find_all(
        &self,
        tipo: Option<String>,
        categoria: Option<String>,
    ) -> Result<Vec<Transaccion>, AppError> {
        let transacciones = sqlx::query_as::<_, Transaccion>(
            r#"
            SELECT * FROM transacciones
            WHERE ($1::text IS NULL OR tipo = $1)
              AND ($2::text IS NULL OR categoria = $2)
            ORDER BY fecha DESC, created_at DESC
            "#
        )
        .bind(tipo)
        .bind(categoria)
        .fetch_all(&self.pool)
        .await?;

        Ok(transacciones)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM transacciones WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Transacción no encontrada".to_string()));
        }

        Ok(())
    }

    /// Totales por tipo para el resumen financiero
    pub async fn resumen(&self) -> Result<ResumenFinanciero, AppError> {
        let (ingresos, egresos, cantidad): (Option<Decimal>, Option<Decimal>, i64) = sqlx::query_as(
            r#"
            SELECT
                SUM(monto) FILTER (WHERE tipo = 'ingreso'),
                SUM(monto) FILTER (WHERE tipo = 'egreso'),
                COUNT(*)
            FROM transacciones
            "#
        )
        .fetch_one(&self.pool)
        .await?;

        let total_ingresos = ingresos.unwrap_or(Decimal::ZERO);
        let total_egresos = egresos.unwrap_or(Decimal::ZERO);

        Ok(ResumenFinanciero {
            total_ingresos,
            total_egresos,
            balance: total_ingresos - total_egresos,
            cantidad_transacciones: cantidad,
        })
    }

    /// Insertar una transacción dentro de una transacción de base de datos
    /// (sintetizada al pagar un egreso futuro)
    pub async fn create_en(
        conn: &mut PgConnection,
        fecha: NaiveDate,
        tipo: String,
        monto: Decimal,
        categoria: String,
        descripcion: Option<String>,
        registrado_por: String,
        adjuntos: Vec<Uuid>,
    ) -> Result<Transaccion, AppError> {
        let transaccion = sqlx::query_as::<_, Transaccion>(
            r#"
            INSERT INTO transacciones (id, fecha, tipo, monto, categoria, descripcion, registrado_por, adjuntos, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(fecha)
        .bind(tipo)
        .bind(monto)
        .bind(categoria)
        .bind(descripcion)
        .bind(registrado_por)
        .bind(adjuntos)
        .bind(Utc::now())
        .fetch_one(conn)
        .await?;

        Ok(transaccion)
    }
}
