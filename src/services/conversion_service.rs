//! Conversión de interesado a cliente actual
//!
//! Promueve un prospecto a comprador: inserta el cliente actual con su plan
//! calculado y elimina la fila del interesado, todo en una transacción.
//! El prospecto se remueve de la lista en vez de marcarse convertido.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::cliente_dto::ConvertirInteresadoRequest;
use crate::models::cliente::ClienteActual;
use crate::repositories::audit_repository::AuditRepository;
use crate::repositories::cliente_actual_repository::{ClienteActualRepository, NuevoClienteActual};
use crate::repositories::interesado_repository::InteresadoRepository;
use crate::services::plan_calculator;
use crate::utils::errors::AppError;

/// Validar los datos financieros de la conversión antes de escribir
pub fn validar_conversion(request: &ConvertirInteresadoRequest) -> Result<(), AppError> {
    if request.numero_lote.trim().is_empty() {
        return Err(AppError::ValidationError("El número de lote es requerido".to_string()));
    }

    if request.precio_lote <= Decimal::ZERO {
        return Err(AppError::ValidationError("El precio del lote debe ser mayor que cero".to_string()));
    }

    if request.cuota_inicial < Decimal::ZERO || request.cuota_inicial > request.precio_lote {
        return Err(AppError::ValidationError(
            "La cuota inicial debe estar entre cero y el precio del lote".to_string(),
        ));
    }

    if request.numero_cuotas < 1 {
        return Err(AppError::ValidationError("El número de cuotas debe ser al menos 1".to_string()));
    }

    Ok(())
}

pub struct ConversionService {
    pool: PgPool,
}

impl ConversionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn convertir_interesado(
        &self,
        interesado_id: Uuid,
        usuario: &str,
        request: ConvertirInteresadoRequest,
    ) -> Result<ClienteActual, AppError> {
        validar_conversion(&request)?;

        let mut tx = self.pool.begin().await?;

        let interesado = InteresadoRepository::find_for_update(&mut tx, interesado_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cliente interesado no encontrado".to_string()))?;

        let plan = plan_calculator::plan_de_pago(
            request.precio_lote,
            request.cuota_inicial,
            request.numero_cuotas,
        );

        let cliente = ClienteActualRepository::create_en(
            &mut tx,
            NuevoClienteActual {
                nombre: interesado.nombre.clone(),
                email: interesado.email.clone(),
                telefono: interesado.telefono.clone(),
                cedula: request.cedula,
                numero_lote: request.numero_lote,
                precio_lote: request.precio_lote,
                cuota_inicial: request.cuota_inicial,
                saldo_restante: plan.saldo_restante,
                numero_cuotas: plan.numero_cuotas,
                valor_cuota: plan.valor_cuota,
                saldo_final: plan.saldo_final,
                metodo_pago_inicial: request.metodo_pago_inicial,
                metodo_pago_cuotas: request.metodo_pago_cuotas,
                notas_especiales: request.notas_especiales,
            },
        )
        .await?;

        InteresadoRepository::delete_en(&mut tx, interesado_id).await?;

        AuditRepository::registrar_en(
            &mut tx,
            usuario,
            "convertir_interesado",
            &format!("{} convertido a cliente del lote {}", cliente.nombre, cliente.numero_lote),
        )
        .await?;

        tx.commit().await?;

        log::info!("Interesado {} convertido a cliente actual por {}", cliente.nombre, usuario);

        Ok(cliente)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solicitud() -> ConvertirInteresadoRequest {
        ConvertirInteresadoRequest {
            numero_lote: "L-07".to_string(),
            precio_lote: Decimal::from(30000),
            cuota_inicial: Decimal::from(5000),
            numero_cuotas: 10,
            cedula: None,
            metodo_pago_inicial: None,
            metodo_pago_cuotas: None,
            notas_especiales: None,
        }
    }

    #[test]
    fn test_conversion_valida() {
        assert!(validar_conversion(&solicitud()).is_ok());
    }

    #[test]
    fn test_precio_cero_se_rechaza() {
        let mut req = solicitud();
        req.precio_lote = Decimal::ZERO;
        assert!(validar_conversion(&req).is_err());
    }

    #[test]
    fn test_cuota_fuera_de_rango_se_rechaza() {
        let mut req = solicitud();
        req.cuota_inicial = Decimal::from(40000);
        assert!(validar_conversion(&req).is_err());
    }

    #[test]
    fn test_la_conversion_tolera_cuota_cero() {
        // a diferencia de la liquidación, aquí un plan sin depósito es válido
        let mut req = solicitud();
        req.cuota_inicial = Decimal::ZERO;
        assert!(validar_conversion(&req).is_ok());
    }
}
