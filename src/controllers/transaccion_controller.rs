use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::cliente_dto::ApiResponse;
use crate::dto::transaccion_dto::{
    ConsejoResponse, CreateTransaccionRequest, ResumenFinanciero, TransaccionFiltro,
};
use crate::models::transaccion::{TipoTransaccion, Transaccion};
use crate::models::usuario::AuthUsuario;
use crate::repositories::audit_repository::AuditRepository;
use crate::repositories::transaccion_repository::TransaccionRepository;
use crate::services::ai_advice_service::AiAdviceService;
use crate::utils::errors::AppError;

pub struct TransaccionController {
    repository: TransaccionRepository,
    audit: AuditRepository,
}

impl TransaccionController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TransaccionRepository::new(pool.clone()),
            audit: AuditRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        usuario: &AuthUsuario,
        request: CreateTransaccionRequest,
    ) -> Result<ApiResponse<Transaccion>, AppError> {
        let tipo = TipoTransaccion::from_str(&request.tipo)
            .ok_or_else(|| AppError::ValidationError("El tipo debe ser 'ingreso' o 'egreso'".to_string()))?;

        if request.monto <= Decimal::ZERO {
            return Err(AppError::ValidationError("El monto debe ser mayor que cero".to_string()));
        }

        if request.categoria.trim().is_empty() {
            return Err(AppError::ValidationError("La categoría es requerida".to_string()));
        }

        let transaccion = self.repository.create(
            request.fecha.unwrap_or_else(|| Utc::now().date_naive()),
            tipo.as_str().to_string(),
            request.monto,
            request.categoria.trim().to_string(),
            request.descripcion,
            usuario.nombre.clone(),
            request.adjuntos.unwrap_or_default(),
        ).await?;

        self.audit.registrar(
            &usuario.nombre,
            "crear_transaccion",
            &format!("{} de {} en {}", transaccion.tipo, transaccion.monto, transaccion.categoria),
        ).await?;

        Ok(ApiResponse::success_with_message(
            transaccion,
            "Transacción registrada exitosamente".to_string(),
        ))
    }

    pub async fn list(&self, filtro: TransaccionFiltro) -> Result<Vec<Transaccion>, AppError> {
        if let Some(ref tipo) = filtro.tipo {
            if TipoTransaccion::from_str(tipo).is_none() {
                return Err(AppError::ValidationError(format!("Tipo de transacción inválido: {}", tipo)));
            }
        }

        self.repository.find_all(filtro.tipo, filtro.categoria).await
    }

    pub async fn delete(&self, id: Uuid, usuario: &AuthUsuario) -> Result<(), AppError> {
        self.repository.delete(id).await?;

        self.audit.registrar(
            &usuario.nombre,
            "eliminar_transaccion",
            &format!("Transacción {} eliminada", id),
        ).await?;

        Ok(())
    }

    pub async fn resumen(&self) -> Result<ResumenFinanciero, AppError> {
        self.repository.resumen().await
    }

    /// Consejo financiero: resumen + transacciones recientes al LLM.
    /// Si el colaborador falla, el texto de reemplazo llega igual con 200.
    pub async fn consejo(&self, ai: &AiAdviceService) -> Result<ConsejoResponse, AppError> {
        let resumen = self.repository.resumen().await?;
        let transacciones = self.repository.find_all(None, None).await?;

        let consejo = ai.generar_consejo(&resumen, &transacciones).await;

        Ok(ConsejoResponse { consejo })
    }
}
