use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::documento_dto::DocumentoResumen;
use crate::models::documento::Documento;
use crate::utils::errors::AppError;

pub struct DocumentoRepository {
    pool: PgPool,
}

impl DocumentoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        nombre: String,
        contenido_base64: String,
        tamano_bytes: i64,
        subido_por: String,
    ) -> Result<Documento, AppError> {
        let documento = sqlx::query_as::<_, Documento>(
            r#"
            INSERT INTO documentos (id, nombre, contenido_base64, tamano_bytes, subido_por, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(nombre)
        .bind(contenido_base64)
        .bind(tamano_bytes)
        .bind(subido_por)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(documento)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Documento>, AppError> {
        let documento = sqlx::query_as::<_, Documento>("SELECT * FROM documentos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(documento)
    }

    /// Listado sin el contenido: el base64 puede pesar megas por fila
    pub async fn find_all_resumen(&self) -> Result<Vec<DocumentoResumen>, AppError> {
        let documentos = sqlx::query_as::<_, (Uuid, String, i64, String, chrono::DateTime<Utc>)>(
            "SELECT id, nombre, tamano_bytes, subido_por, created_at FROM documentos ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|(id, nombre, tamano_bytes, subido_por, created_at)| DocumentoResumen {
            id,
            nombre,
            tamano_bytes,
            subido_por,
            created_at,
        })
        .collect();

        Ok(documentos)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM documentos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Documento no encontrado".to_string()));
        }

        Ok(())
    }
}
