use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::lote::Lote;
use crate::utils::errors::AppError;

pub struct LoteRepository {
    pool: PgPool,
}

impl LoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        numero_lote: String,
        area: Option<Decimal>,
        precio: Option<Decimal>,
        ubicacion: Option<String>,
        descripcion: Option<String>,
    ) -> Result<Lote, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let lote = sqlx::query_as::<_, Lote>(
            r#"
            INSERT INTO lotes (id, numero_lote, estado, area, precio, ubicacion, descripcion, created_at, updated_at)
            VALUES ($1, $2, 'disponible', $3, $4, $5, $6, $7, $7)
            RETURNING *
            "#
        )
        .bind(id)
        .bind(numero_lote)
        .bind(area)
        .bind(precio)
        .bind(ubicacion)
        .bind(descripcion)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(lote)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Lote>, AppError> {
        let lote = sqlx::query_as::<_, Lote>("SELECT * FROM lotes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(lote)
    }

    pub async fn find_all(&self) -> Result<Vec<Lote>, AppError> {
        let lotes = sqlx::query_as::<_, Lote>("SELECT * FROM lotes ORDER BY numero_lote, created_at")
            .fetch_all(&self.pool)
            .await?;

        Ok(lotes)
    }

    /// Edición directa del personal: cualquier estado a cualquier estado
    pub async fn update(
        &self,
        id: Uuid,
        numero_lote: Option<String>,
        estado: Option<String>,
        area: Option<Decimal>,
        precio: Option<Decimal>,
        ubicacion: Option<String>,
        descripcion: Option<String>,
        motivo_bloqueo: Option<String>,
    ) -> Result<Lote, AppError> {
        let current = self.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Lote no encontrado".to_string()))?;

        let lote = sqlx::query_as::<_, Lote>(
            r#"
            UPDATE lotes
            SET numero_lote = $2, estado = $3, area = $4, precio = $5,
                ubicacion = $6, descripcion = $7, motivo_bloqueo = $8, updated_at = $9
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .bind(numero_lote.unwrap_or(current.numero_lote))
        .bind(estado.unwrap_or(current.estado))
        .bind(area.or(current.area))
        .bind(precio.or(current.precio))
        .bind(ubicacion.or(current.ubicacion))
        .bind(descripcion.or(current.descripcion))
        .bind(motivo_bloqueo.or(current.motivo_bloqueo))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(lote)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM lotes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Lote no encontrado".to_string()));
        }

        Ok(())
    }

    /// Leer el lote dentro de una transacción, tomando el row lock.
    /// El lock serializa dos liquidaciones concurrentes del mismo lote.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Lote>, AppError> {
        let lote = sqlx::query_as::<_, Lote>("SELECT * FROM lotes WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(lote)
    }

    /// Marcar el lote como reservado/vendido dentro de una transacción.
    /// La guarda `estado = 'disponible'` rechaza el segundo intento
    /// concurrente en lugar de dejarlo pasar dos veces.
    pub async fn marcar_liquidado(
        conn: &mut PgConnection,
        id: Uuid,
        nuevo_estado: &str,
        cliente_id: Uuid,
        descripcion: String,
    ) -> Result<Option<Lote>, AppError> {
        let lote = sqlx::query_as::<_, Lote>(
            r#"
            UPDATE lotes
            SET estado = $2, cliente_id = $3, descripcion = $4, updated_at = $5
            WHERE id = $1 AND estado = 'disponible'
            RETURNING *
            "#
        )
        .bind(id)
        .bind(nuevo_estado)
        .bind(cliente_id)
        .bind(descripcion)
        .bind(Utc::now())
        .fetch_optional(conn)
        .await?;

        Ok(lote)
    }
}
