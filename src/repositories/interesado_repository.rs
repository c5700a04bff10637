use chrono::{NaiveDate, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::cliente::ClienteInteresado;
use crate::utils::errors::AppError;

pub struct InteresadoRepository {
    pool: PgPool,
}

impl InteresadoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        nombre: String,
        email: Option<String>,
        telefono: Option<String>,
        fecha_contacto: NaiveDate,
        notas: Option<String>,
    ) -> Result<ClienteInteresado, AppError> {
        let interesado = sqlx::query_as::<_, ClienteInteresado>(
            r#"
            INSERT INTO clientes_interesados (id, nombre, email, telefono, fecha_contacto, estado, notas, created_at)
            VALUES ($1, $2, $3, $4, $5, 'activo', $6, $7)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(nombre)
        .bind(email)
        .bind(telefono)
        .bind(fecha_contacto)
        .bind(notas)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(interesado)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ClienteInteresado>, AppError> {
        let interesado = sqlx::query_as::<_, ClienteInteresado>(
            "SELECT * FROM clientes_interesados WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(interesado)
    }

    pub async fn find_all(&self) -> Result<Vec<ClienteInteresado>, AppError> {
        let interesados = sqlx::query_as::<_, ClienteInteresado>(
            "SELECT * FROM clientes_interesados ORDER BY fecha_contacto DESC, created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(interesados)
    }

    pub async fn update(
        &self,
        id: Uuid,
        nombre: Option<String>,
        email: Option<String>,
        telefono: Option<String>,
        estado: Option<String>,
        notas: Option<String>,
    ) -> Result<ClienteInteresado, AppError> {
        let current = self.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Cliente interesado no encontrado".to_string()))?;

        let interesado = sqlx::query_as::<_, ClienteInteresado>(
            r#"
            UPDATE clientes_interesados
            SET nombre = $2, email = $3, telefono = $4, estado = $5, notas = $6
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .bind(nombre.unwrap_or(current.nombre))
        .bind(email.or(current.email))
        .bind(telefono.or(current.telefono))
        .bind(estado.unwrap_or(current.estado))
        .bind(notas.or(current.notas))
        .fetch_one(&self.pool)
        .await?;

        Ok(interesado)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM clientes_interesados WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cliente interesado no encontrado".to_string()));
        }

        Ok(())
    }

    /// Leer el interesado dentro de una transacción de conversión, con lock
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<ClienteInteresado>, AppError> {
        let interesado = sqlx::query_as::<_, ClienteInteresado>(
            "SELECT * FROM clientes_interesados WHERE id = $1 FOR UPDATE"
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(interesado)
    }

    /// Eliminar la fila del interesado dentro de la transacción de conversión.
    /// La conversión remueve el prospecto de la lista en vez de marcarlo.
    pub async fn delete_en(conn: &mut PgConnection, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM clientes_interesados WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(())
    }
}
