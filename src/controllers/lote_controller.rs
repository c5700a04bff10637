use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::cliente_dto::ApiResponse;
use crate::dto::lote_dto::{CreateLoteRequest, LiquidacionRequest, LiquidacionResponse, UpdateLoteRequest};
use crate::models::lote::{EstadoLote, Lote};
use crate::models::usuario::AuthUsuario;
use crate::repositories::audit_repository::AuditRepository;
use crate::repositories::lote_repository::LoteRepository;
use crate::services::settlement_service::SettlementService;
use crate::utils::errors::AppError;

pub struct LoteController {
    repository: LoteRepository,
    settlement: SettlementService,
    audit: AuditRepository,
}

impl LoteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: LoteRepository::new(pool.clone()),
            settlement: SettlementService::new(pool.clone()),
            audit: AuditRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        usuario: &AuthUsuario,
        request: CreateLoteRequest,
    ) -> Result<ApiResponse<Lote>, AppError> {
        if request.numero_lote.trim().is_empty() {
            return Err(AppError::ValidationError("El número de lote es requerido".to_string()));
        }

        let lote = self.repository.create(
            request.numero_lote.trim().to_string(),
            request.area,
            request.precio,
            request.ubicacion,
            request.descripcion,
        ).await?;

        self.audit.registrar(
            &usuario.nombre,
            "crear_lote",
            &format!("Lote {} creado", lote.numero_lote),
        ).await?;

        Ok(ApiResponse::success_with_message(
            lote,
            "Lote creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Lote, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lote no encontrado".to_string()))
    }

    pub async fn list(&self) -> Result<Vec<Lote>, AppError> {
        self.repository.find_all().await
    }

    /// Edición directa del personal. A diferencia de la liquidación, puede
    /// mover el estado en cualquier dirección.
    pub async fn update(
        &self,
        id: Uuid,
        usuario: &AuthUsuario,
        request: UpdateLoteRequest,
    ) -> Result<ApiResponse<Lote>, AppError> {
        if let Some(ref estado) = request.estado {
            if EstadoLote::from_str(estado).is_none() {
                return Err(AppError::ValidationError(format!("Estado de lote inválido: {}", estado)));
            }
        }

        let lote = self.repository.update(
            id,
            request.numero_lote,
            request.estado,
            request.area,
            request.precio,
            request.ubicacion,
            request.descripcion,
            request.motivo_bloqueo,
        ).await?;

        self.audit.registrar(
            &usuario.nombre,
            "editar_lote",
            &format!("Lote {} editado (estado: {})", lote.numero_lote, lote.estado),
        ).await?;

        Ok(ApiResponse::success_with_message(
            lote,
            "Lote actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, usuario: &AuthUsuario) -> Result<(), AppError> {
        let lote = self.get_by_id(id).await?;
        self.repository.delete(id).await?;

        self.audit.registrar(
            &usuario.nombre,
            "eliminar_lote",
            &format!("Lote {} eliminado", lote.numero_lote),
        ).await?;

        Ok(())
    }

    pub async fn liquidar(
        &self,
        id: Uuid,
        usuario: &AuthUsuario,
        request: LiquidacionRequest,
    ) -> Result<ApiResponse<LiquidacionResponse>, AppError> {
        let response = self.settlement.liquidar_lote(id, &usuario.nombre, request).await?;

        Ok(ApiResponse::success_with_message(
            response,
            "Lote liquidado exitosamente".to_string(),
        ))
    }
}
