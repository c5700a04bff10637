use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::cliente_dto::ApiResponse;
use crate::dto::egreso_dto::{CreateEgresoRequest, PagoEgresoResponse, UpdateEgresoRequest};
use crate::models::egreso::{EgresoFuturo, EstadoEgreso};
use crate::models::usuario::AuthUsuario;
use crate::repositories::audit_repository::AuditRepository;
use crate::repositories::egreso_repository::EgresoRepository;
use crate::services::egreso_service::EgresoService;
use crate::utils::errors::AppError;

const TIPOS_EGRESO: [&str; 3] = ["planificado", "recurrente", "extraordinario"];

pub struct EgresoController {
    repository: EgresoRepository,
    service: EgresoService,
    audit: AuditRepository,
}

impl EgresoController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: EgresoRepository::new(pool.clone()),
            service: EgresoService::new(pool.clone()),
            audit: AuditRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        usuario: &AuthUsuario,
        request: CreateEgresoRequest,
    ) -> Result<ApiResponse<EgresoFuturo>, AppError> {
        if request.monto <= Decimal::ZERO {
            return Err(AppError::ValidationError("El monto debe ser mayor que cero".to_string()));
        }

        if request.categoria.trim().is_empty() {
            return Err(AppError::ValidationError("La categoría es requerida".to_string()));
        }

        let tipo = request.tipo.unwrap_or_else(|| "planificado".to_string());
        if !TIPOS_EGRESO.contains(&tipo.as_str()) {
            return Err(AppError::ValidationError(format!("Tipo de egreso inválido: {}", tipo)));
        }

        let egreso = self.repository.create(
            request.fecha,
            tipo,
            request.categoria.trim().to_string(),
            request.descripcion,
            request.monto,
            usuario.nombre.clone(),
            request.adjuntos.unwrap_or_default(),
        ).await?;

        self.audit.registrar(
            &usuario.nombre,
            "crear_egreso",
            &format!("Egreso futuro '{}' de {} registrado", egreso.categoria, egreso.monto),
        ).await?;

        Ok(ApiResponse::success_with_message(
            egreso,
            "Egreso futuro registrado exitosamente".to_string(),
        ))
    }

    pub async fn list(&self) -> Result<Vec<EgresoFuturo>, AppError> {
        self.repository.find_all().await
    }

    pub async fn update(
        &self,
        id: Uuid,
        usuario: &AuthUsuario,
        request: UpdateEgresoRequest,
    ) -> Result<ApiResponse<EgresoFuturo>, AppError> {
        if let Some(ref estado) = request.estado {
            if EstadoEgreso::from_str(estado).is_none() {
                return Err(AppError::ValidationError(format!("Estado de egreso inválido: {}", estado)));
            }
            // marcar 'pagado' pasa por el flujo de pago, que sintetiza la transacción
            if estado == EstadoEgreso::Pagado.as_str() {
                return Err(AppError::BadRequest(
                    "Use la operación de pago para marcar un egreso como pagado".to_string(),
                ));
            }
        }

        if let Some(monto) = request.monto {
            if monto <= Decimal::ZERO {
                return Err(AppError::ValidationError("El monto debe ser mayor que cero".to_string()));
            }
        }

        // El estado de un egreso pagado es definitivo: devolverlo a
        // 'pendiente' rearmaría el flujo de pago y duplicaría la transacción.
        if request.estado.is_some() {
            let current = self.repository.find_by_id(id).await?
                .ok_or_else(|| AppError::NotFound("Egreso futuro no encontrado".to_string()))?;
            if current.estado == EstadoEgreso::Pagado.as_str() {
                return Err(AppError::Conflict(
                    "El estado de un egreso pagado no puede modificarse".to_string(),
                ));
            }
        }

        let egreso = self.repository.update(
            id,
            request.fecha,
            request.tipo,
            request.categoria,
            request.descripcion,
            request.monto,
            request.estado,
        ).await?;

        self.audit.registrar(
            &usuario.nombre,
            "editar_egreso",
            &format!("Egreso '{}' editado (estado: {})", egreso.categoria, egreso.estado),
        ).await?;

        Ok(ApiResponse::success_with_message(
            egreso,
            "Egreso futuro actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, usuario: &AuthUsuario) -> Result<(), AppError> {
        let egreso = self.repository.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Egreso futuro no encontrado".to_string()))?;

        self.repository.delete(id).await?;

        self.audit.registrar(
            &usuario.nombre,
            "eliminar_egreso",
            &format!("Egreso '{}' eliminado", egreso.categoria),
        ).await?;

        Ok(())
    }

    pub async fn pagar(
        &self,
        id: Uuid,
        usuario: &AuthUsuario,
    ) -> Result<ApiResponse<PagoEgresoResponse>, AppError> {
        let response = self.service.marcar_egreso_pagado(id, &usuario.nombre).await?;

        Ok(ApiResponse::success_with_message(
            response,
            "Egreso pagado y transacción registrada".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::models::usuario::Rol;

    fn admin() -> AuthUsuario {
        AuthUsuario {
            id: Uuid::new_v4(),
            nombre: "admin".to_string(),
            rol: Rol::Admin,
        }
    }

    fn solicitud_egreso() -> CreateEgresoRequest {
        CreateEgresoRequest {
            fecha: NaiveDate::from_ymd_opt(2026, 4, 15).unwrap(),
            tipo: None,
            categoria: "Servicios públicos".to_string(),
            descripcion: None,
            monto: Decimal::new(50000, 2),
            adjuntos: None,
        }
    }

    #[sqlx::test]
    async fn test_egreso_pagado_no_vuelve_a_pendiente(pool: PgPool) {
        let controller = EgresoController::new(pool.clone());
        let usuario = admin();

        let creado = controller.create(&usuario, solicitud_egreso()).await.unwrap();
        let id = creado.data.unwrap().id;

        controller.pagar(id, &usuario).await.unwrap();

        let revertir = UpdateEgresoRequest {
            fecha: None,
            tipo: None,
            categoria: None,
            descripcion: None,
            monto: None,
            estado: Some(EstadoEgreso::Pendiente.as_str().to_string()),
        };
        let err = controller.update(id, &usuario, revertir).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // sin reversión no hay segundo pago ni transacción duplicada
        let err = controller.pagar(id, &usuario).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let transacciones: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM transacciones WHERE tipo = 'egreso'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(transacciones, 1);
    }

    #[sqlx::test]
    async fn test_egreso_pendiente_se_puede_editar(pool: PgPool) {
        let controller = EgresoController::new(pool.clone());
        let usuario = admin();

        let creado = controller.create(&usuario, solicitud_egreso()).await.unwrap();
        let id = creado.data.unwrap().id;

        let cancelar = UpdateEgresoRequest {
            fecha: None,
            tipo: None,
            categoria: None,
            descripcion: None,
            monto: Some(Decimal::new(75000, 2)),
            estado: Some(EstadoEgreso::Cancelado.as_str().to_string()),
        };
        let actualizado = controller.update(id, &usuario, cancelar).await.unwrap();
        let egreso = actualizado.data.unwrap();
        assert_eq!(egreso.estado, EstadoEgreso::Cancelado.as_str());
        assert_eq!(egreso.monto, Decimal::new(75000, 2));
    }
}
