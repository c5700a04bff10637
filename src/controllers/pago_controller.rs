use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::cliente_dto::ApiResponse;
use crate::dto::pago_dto::CreatePagoRequest;
use crate::models::pago::Pago;
use crate::models::usuario::AuthUsuario;
use crate::repositories::audit_repository::AuditRepository;
use crate::repositories::cliente_actual_repository::ClienteActualRepository;
use crate::repositories::pago_repository::PagoRepository;
use crate::utils::errors::AppError;

pub struct PagoController {
    repository: PagoRepository,
    clientes: ClienteActualRepository,
    audit: AuditRepository,
}

impl PagoController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PagoRepository::new(pool.clone()),
            clientes: ClienteActualRepository::new(pool.clone()),
            audit: AuditRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        usuario: &AuthUsuario,
        request: CreatePagoRequest,
    ) -> Result<ApiResponse<Pago>, AppError> {
        if request.monto <= Decimal::ZERO {
            return Err(AppError::ValidationError("El monto debe ser mayor que cero".to_string()));
        }

        if request.tipo_pago.trim().is_empty() {
            return Err(AppError::ValidationError("El tipo de pago es requerido".to_string()));
        }

        // El pago debe referenciar un cliente existente
        let cliente = self.clientes.find_by_id(request.cliente_id).await?
            .ok_or_else(|| AppError::NotFound("Cliente no encontrado".to_string()))?;

        let pago = self.repository.create(
            request.cliente_id,
            request.fecha_pago.unwrap_or_else(|| Utc::now().date_naive()),
            request.monto,
            request.tipo_pago.trim().to_string(),
            request.metodo_pago,
            request.notas,
            request.comprobante_id,
        ).await?;

        self.audit.registrar(
            &usuario.nombre,
            "registrar_pago",
            &format!("Pago de {} para {} ({})", pago.monto, cliente.nombre, pago.tipo_pago),
        ).await?;

        Ok(ApiResponse::success_with_message(
            pago,
            "Pago registrado exitosamente".to_string(),
        ))
    }

    pub async fn list(&self, cliente_id: Option<Uuid>) -> Result<Vec<Pago>, AppError> {
        match cliente_id {
            Some(id) => self.repository.find_by_cliente(id).await,
            None => self.repository.find_all().await,
        }
    }

    pub async fn delete(&self, id: Uuid, usuario: &AuthUsuario) -> Result<(), AppError> {
        let pago = self.repository.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Pago no encontrado".to_string()))?;

        self.repository.delete(id).await?;

        self.audit.registrar(
            &usuario.nombre,
            "eliminar_pago",
            &format!("Pago de {} eliminado ({})", pago.monto, pago.tipo_pago),
        ).await?;

        Ok(())
    }
}
