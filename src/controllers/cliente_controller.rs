use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::cliente_dto::{
    ApiResponse, ClienteResponse, ConvertirInteresadoRequest, CreateInteresadoRequest,
    UpdateClienteRequest, UpdateInteresadoRequest,
};
use crate::models::cliente::{ClienteActual, ClienteInteresado, EstadoCliente};
use crate::models::usuario::AuthUsuario;
use crate::repositories::audit_repository::AuditRepository;
use crate::repositories::cliente_actual_repository::ClienteActualRepository;
use crate::repositories::interesado_repository::InteresadoRepository;
use crate::repositories::pago_repository::PagoRepository;
use crate::services::conversion_service::ConversionService;
use crate::utils::errors::AppError;

pub struct ClienteController {
    pool: PgPool,
    interesados: InteresadoRepository,
    clientes: ClienteActualRepository,
    conversion: ConversionService,
    audit: AuditRepository,
}

impl ClienteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            interesados: InteresadoRepository::new(pool.clone()),
            clientes: ClienteActualRepository::new(pool.clone()),
            conversion: ConversionService::new(pool.clone()),
            audit: AuditRepository::new(pool.clone()),
            pool,
        }
    }

    // ---- Interesados (prospectos) ----

    pub async fn create_interesado(
        &self,
        usuario: &AuthUsuario,
        request: CreateInteresadoRequest,
    ) -> Result<ApiResponse<ClienteInteresado>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        if request.nombre.trim().is_empty() {
            return Err(AppError::ValidationError("El nombre es requerido".to_string()));
        }

        let interesado = self.interesados.create(
            request.nombre.trim().to_string(),
            request.email,
            request.telefono,
            request.fecha_contacto.unwrap_or_else(|| Utc::now().date_naive()),
            request.notas,
        ).await?;

        self.audit.registrar(
            &usuario.nombre,
            "crear_interesado",
            &format!("Interesado {} registrado", interesado.nombre),
        ).await?;

        Ok(ApiResponse::success_with_message(
            interesado,
            "Cliente interesado registrado exitosamente".to_string(),
        ))
    }

    pub async fn list_interesados(&self) -> Result<Vec<ClienteInteresado>, AppError> {
        self.interesados.find_all().await
    }

    pub async fn update_interesado(
        &self,
        id: Uuid,
        usuario: &AuthUsuario,
        request: UpdateInteresadoRequest,
    ) -> Result<ApiResponse<ClienteInteresado>, AppError> {
        let interesado = self.interesados.update(
            id,
            request.nombre,
            request.email,
            request.telefono,
            request.estado,
            request.notas,
        ).await?;

        self.audit.registrar(
            &usuario.nombre,
            "editar_interesado",
            &format!("Interesado {} editado", interesado.nombre),
        ).await?;

        Ok(ApiResponse::success_with_message(
            interesado,
            "Cliente interesado actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete_interesado(&self, id: Uuid, usuario: &AuthUsuario) -> Result<(), AppError> {
        let interesado = self.interesados.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Cliente interesado no encontrado".to_string()))?;

        self.interesados.delete(id).await?;

        self.audit.registrar(
            &usuario.nombre,
            "eliminar_interesado",
            &format!("Interesado {} eliminado", interesado.nombre),
        ).await?;

        Ok(())
    }

    pub async fn convertir_interesado(
        &self,
        id: Uuid,
        usuario: &AuthUsuario,
        request: ConvertirInteresadoRequest,
    ) -> Result<ApiResponse<ClienteActual>, AppError> {
        let cliente = self.conversion.convertir_interesado(id, &usuario.nombre, request).await?;

        Ok(ApiResponse::success_with_message(
            cliente,
            "Interesado convertido a cliente exitosamente".to_string(),
        ))
    }

    // ---- Clientes actuales (compradores) ----

    pub async fn get_cliente(&self, id: Uuid) -> Result<ClienteResponse, AppError> {
        let cliente = self.clientes.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Cliente no encontrado".to_string()))?;

        let total_pagado = self.clientes.total_pagado(id).await?;

        Ok(a_response(cliente, total_pagado))
    }

    pub async fn list_clientes(&self) -> Result<Vec<ClienteResponse>, AppError> {
        let clientes = self.clientes.find_all().await?;

        let mut response = Vec::with_capacity(clientes.len());
        for cliente in clientes {
            let total_pagado = self.clientes.total_pagado(cliente.id).await?;
            response.push(a_response(cliente, total_pagado));
        }

        Ok(response)
    }

    pub async fn update_cliente(
        &self,
        id: Uuid,
        usuario: &AuthUsuario,
        request: UpdateClienteRequest,
    ) -> Result<ApiResponse<ClienteResponse>, AppError> {
        if let Some(ref estado) = request.estado {
            if EstadoCliente::from_str(estado).is_none() {
                return Err(AppError::ValidationError(format!("Estado de cliente inválido: {}", estado)));
            }
        }

        let cliente = self.clientes.update(
            id,
            request.nombre,
            request.email,
            request.telefono,
            request.cedula,
            request.estado,
            request.metodo_pago_cuotas,
            request.cuotas_personalizadas,
            request.notas_especiales,
        ).await?;

        self.audit.registrar(
            &usuario.nombre,
            "editar_cliente",
            &format!("Cliente {} editado (estado: {})", cliente.nombre, cliente.estado),
        ).await?;

        let total_pagado = self.clientes.total_pagado(id).await?;

        Ok(ApiResponse::success_with_message(
            a_response(cliente, total_pagado),
            "Cliente actualizado exitosamente".to_string(),
        ))
    }

    /// Eliminar un cliente con sus pagos en cascada. Una sola transacción:
    /// nunca quedan pagos apuntando a un cliente inexistente.
    pub async fn delete_cliente(&self, id: Uuid, usuario: &AuthUsuario) -> Result<(), AppError> {
        let cliente = self.clientes.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Cliente no encontrado".to_string()))?;

        let mut tx = self.pool.begin().await?;

        let pagos_eliminados = PagoRepository::delete_por_cliente_en(&mut tx, id).await?;
        ClienteActualRepository::delete_en(&mut tx, id).await?;

        AuditRepository::registrar_en(
            &mut tx,
            &usuario.nombre,
            "eliminar_cliente",
            &format!("Cliente {} eliminado con {} pagos", cliente.nombre, pagos_eliminados),
        ).await?;

        tx.commit().await?;

        log::info!(
            "Cliente {} eliminado con {} pagos en cascada por {}",
            cliente.nombre,
            pagos_eliminados,
            usuario.nombre
        );

        Ok(())
    }
}

fn a_response(cliente: ClienteActual, total_pagado: rust_decimal::Decimal) -> ClienteResponse {
    ClienteResponse {
        id: cliente.id,
        nombre: cliente.nombre,
        email: cliente.email,
        telefono: cliente.telefono,
        cedula: cliente.cedula,
        numero_lote: cliente.numero_lote,
        precio_lote: cliente.precio_lote,
        cuota_inicial: cliente.cuota_inicial,
        saldo_restante: cliente.saldo_restante,
        numero_cuotas: cliente.numero_cuotas,
        valor_cuota: cliente.valor_cuota,
        saldo_final: cliente.saldo_final,
        metodo_pago_inicial: cliente.metodo_pago_inicial,
        metodo_pago_cuotas: cliente.metodo_pago_cuotas,
        estado: cliente.estado,
        total_pagado,
        notas_especiales: cliente.notas_especiales,
        created_at: cliente.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::dto::lote_dto::LiquidacionRequest;
    use crate::models::usuario::Rol;
    use crate::repositories::lote_repository::LoteRepository;
    use crate::services::settlement_service::SettlementService;

    fn admin() -> AuthUsuario {
        AuthUsuario {
            id: Uuid::new_v4(),
            nombre: "admin".to_string(),
            rol: Rol::Admin,
        }
    }

    /// Vende un lote y devuelve el id del cliente creado con su pago inicial.
    async fn vender_lote(pool: &PgPool) -> Uuid {
        let lote = LoteRepository::new(pool.clone())
            .create("C-7".to_string(), None, Some(Decimal::from(40000)), None, None)
            .await
            .unwrap();

        let liquidacion = SettlementService::new(pool.clone())
            .liquidar_lote(
                lote.id,
                "admin",
                LiquidacionRequest {
                    accion: "vender".to_string(),
                    nombre_cliente: "Carlos Pérez".to_string(),
                    email: None,
                    telefono: None,
                    cedula: None,
                    cuota_inicial: Decimal::from(8000),
                    numero_cuotas: 24,
                    metodo_pago_inicial: Some("transferencia".to_string()),
                    metodo_pago_cuotas: None,
                },
            )
            .await
            .unwrap();

        liquidacion.cliente.id
    }

    #[sqlx::test]
    async fn test_eliminar_cliente_borra_sus_pagos_en_cascada(pool: PgPool) {
        let cliente_id = vender_lote(&pool).await;

        // un abono mensual además de la cuota inicial
        PagoRepository::new(pool.clone())
            .create(
                cliente_id,
                NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
                Decimal::new(133333, 2),
                "Cuota Mensual".to_string(),
                Some("efectivo".to_string()),
                None,
                None,
            )
            .await
            .unwrap();

        let controller = ClienteController::new(pool.clone());
        controller.delete_cliente(cliente_id, &admin()).await.unwrap();

        assert!(ClienteActualRepository::new(pool.clone())
            .find_by_id(cliente_id)
            .await
            .unwrap()
            .is_none());

        let pagos: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM pagos_clientes WHERE cliente_id = $1")
                .bind(cliente_id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(pagos, 0);
    }

    #[sqlx::test]
    async fn test_eliminar_cliente_inexistente_es_not_found(pool: PgPool) {
        let controller = ClienteController::new(pool);
        let err = controller
            .delete_cliente(Uuid::new_v4(), &admin())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
