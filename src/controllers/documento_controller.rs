use base64::Engine;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::cliente_dto::ApiResponse;
use crate::dto::documento_dto::{CreateDocumentoRequest, DocumentoResumen};
use crate::models::documento::{Documento, TAMANO_MAXIMO_DOCUMENTO};
use crate::models::usuario::AuthUsuario;
use crate::repositories::audit_repository::AuditRepository;
use crate::repositories::documento_repository::DocumentoRepository;
use crate::utils::errors::AppError;

pub struct DocumentoController {
    repository: DocumentoRepository,
    audit: AuditRepository,
}

impl DocumentoController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DocumentoRepository::new(pool.clone()),
            audit: AuditRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        usuario: &AuthUsuario,
        request: CreateDocumentoRequest,
    ) -> Result<ApiResponse<DocumentoResumen>, AppError> {
        if request.nombre.trim().is_empty() {
            return Err(AppError::ValidationError("El nombre del documento es requerido".to_string()));
        }

        let tamano_bytes = tamano_decodificado(&request.contenido_base64)?;

        if tamano_bytes > TAMANO_MAXIMO_DOCUMENTO {
            return Err(AppError::ValidationError(format!(
                "El documento supera el tamaño máximo de {} MB",
                TAMANO_MAXIMO_DOCUMENTO / (1024 * 1024)
            )));
        }

        let documento = self.repository.create(
            request.nombre.trim().to_string(),
            request.contenido_base64,
            tamano_bytes,
            usuario.nombre.clone(),
        ).await?;

        self.audit.registrar(
            &usuario.nombre,
            "subir_documento",
            &format!("Documento '{}' subido ({} bytes)", documento.nombre, documento.tamano_bytes),
        ).await?;

        Ok(ApiResponse::success_with_message(
            DocumentoResumen {
                id: documento.id,
                nombre: documento.nombre,
                tamano_bytes: documento.tamano_bytes,
                subido_por: documento.subido_por,
                created_at: documento.created_at,
            },
            "Documento subido exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Documento, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Documento no encontrado".to_string()))
    }

    pub async fn list(&self) -> Result<Vec<DocumentoResumen>, AppError> {
        self.repository.find_all_resumen().await
    }

    pub async fn delete(&self, id: Uuid, usuario: &AuthUsuario) -> Result<(), AppError> {
        let documento = self.get_by_id(id).await?;
        self.repository.delete(id).await?;

        self.audit.registrar(
            &usuario.nombre,
            "eliminar_documento",
            &format!("Documento '{}' eliminado", documento.nombre),
        ).await?;

        Ok(())
    }
}

/// Validar el base64 y medir el tamaño decodificado sin retener los bytes
fn tamano_decodificado(contenido: &str) -> Result<i64, AppError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(contenido)
        .map_err(|_| AppError::ValidationError("El contenido no es base64 válido".to_string()))?;

    Ok(bytes.len() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;

    #[test]
    fn test_tamano_decodificado() {
        let contenido = STANDARD.encode(vec![0u8; 1024]);
        assert_eq!(tamano_decodificado(&contenido).unwrap(), 1024);
    }

    #[test]
    fn test_base64_invalido_se_rechaza() {
        assert!(tamano_decodificado("esto no es base64 %%%").is_err());
    }

    #[test]
    fn test_limite_de_tamano() {
        assert_eq!(TAMANO_MAXIMO_DOCUMENTO, 5 * 1024 * 1024);
    }
}
