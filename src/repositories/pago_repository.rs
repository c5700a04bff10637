use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::pago::Pago;
use crate::utils::errors::AppError;

pub struct PagoRepository {
    pool: PgPool,
}

impl PagoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        cliente_id: Uuid,
        fecha_pago: NaiveDate,
        monto: Decimal,
        tipo_pago: String,
        metodo_pago: Option<String>,
        notas: Option<String>,
        comprobante_id: Option<Uuid>,
    ) -> Result<Pago, AppError> {
        let mut conn = self.pool.acquire().await?;
        Self::create_en(
            &mut conn,
            cliente_id,
            fecha_pago,
            monto,
            tipo_pago,
            metodo_pago,
            notas,
            comprobante_id,
        )
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Pago>, AppError> {
        let pago = sqlx::query_as::<_, Pago>("SELECT * FROM pagos_clientes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(pago)
    }

    pub async fn find_by_cliente(&self, cliente_id: Uuid) -> Result<Vec<Pago>, AppError> {
        let pagos = sqlx::query_as::<_, Pago>(
            "SELECT * FROM pagos_clientes WHERE cliente_id = $1 ORDER BY fecha_pago DESC, created_at DESC"
        )
        .bind(cliente_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(pagos)
    }

    pub async fn find_all(&self) -> Result<Vec<Pago>, AppError> {
        let pagos = sqlx::query_as::<_, Pago>(
            "SELECT * FROM pagos_clientes ORDER BY fecha_pago DESC, created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(pagos)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM pagos_clientes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Pago no encontrado".to_string()));
        }

        Ok(())
    }

    /// Insertar un pago dentro de una transacción (depósito inicial de la liquidación)
    pub async fn create_en(
        conn: &mut PgConnection,
        cliente_id: Uuid,
        fecha_pago: NaiveDate,
        monto: Decimal,
        tipo_pago: String,
        metodo_pago: Option<String>,
        notas: Option<String>,
        comprobante_id: Option<Uuid>,
    ) -> Result<Pago, AppError> {
        let pago = sqlx::query_as::<_, Pago>(
            r#"
            INSERT INTO pagos_clientes (id, cliente_id, fecha_pago, monto, tipo_pago, metodo_pago, notas, comprobante_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(cliente_id)
        .bind(fecha_pago)
        .bind(monto)
        .bind(tipo_pago)
        .bind(metodo_pago)
        .bind(notas)
        .bind(comprobante_id)
        .bind(Utc::now())
        .fetch_one(conn)
        .await?;

        Ok(pago)
    }

    /// Borrar todos los pagos de un cliente dentro de la transacción de
    /// cascada. Devuelve cuántas filas se eliminaron.
    pub async fn delete_por_cliente_en(
        conn: &mut PgConnection,
        cliente_id: Uuid,
    ) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM pagos_clientes WHERE cliente_id = $1")
            .bind(cliente_id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }
}
