//! Orquestador de liquidación de lotes
//!
//! Dado un lote disponible, los datos del comprador y la acción elegida
//! (reservar o vender), ejecuta la mutación de tres filas: crea el cliente
//! actual, marca el lote y registra el depósito inicial. Las tres escrituras
//! más la entrada de auditoría van en UNA transacción de base de datos: un
//! fallo en cualquier paso revierte todo, nunca queda un cliente huérfano ni
//! un lote vendido sin comprador.
//!
//! El doble clic / la doble venta concurrente se rechaza con la guarda
//! `estado = 'disponible'` bajo row lock: el segundo intento recibe 409.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::lote_dto::{LiquidacionRequest, LiquidacionResponse};
use crate::models::lote::{EstadoLote, Lote};
use crate::models::pago::{TIPO_PAGO_CUOTA_INICIAL, TIPO_PAGO_DEPOSITO_RESERVA};
use crate::repositories::audit_repository::AuditRepository;
use crate::repositories::cliente_actual_repository::{ClienteActualRepository, NuevoClienteActual};
use crate::repositories::lote_repository::LoteRepository;
use crate::repositories::pago_repository::PagoRepository;
use crate::services::plan_calculator;
use crate::utils::errors::AppError;

/// Acción elegida por el personal antes de calcular el plan
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AccionLiquidacion {
    Reservar,
    Vender,
}

impl AccionLiquidacion {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "reservar" => Some(AccionLiquidacion::Reservar),
            "vender" => Some(AccionLiquidacion::Vender),
            _ => None,
        }
    }

    /// Estado resultante del lote
    pub fn estado_lote(&self) -> EstadoLote {
        match self {
            AccionLiquidacion::Reservar => EstadoLote::Reservado,
            AccionLiquidacion::Vender => EstadoLote::Vendido,
        }
    }

    /// Etiqueta del pago inicial
    pub fn tipo_pago(&self) -> &'static str {
        match self {
            AccionLiquidacion::Reservar => TIPO_PAGO_DEPOSITO_RESERVA,
            AccionLiquidacion::Vender => TIPO_PAGO_CUOTA_INICIAL,
        }
    }
}

/// Validar la solicitud contra el precio del lote, ANTES de cualquier
/// escritura. Pura: sin base de datos, testeable en aislamiento.
pub fn validar_liquidacion(
    request: &LiquidacionRequest,
    precio: Decimal,
) -> Result<AccionLiquidacion, AppError> {
    let accion = AccionLiquidacion::from_str(&request.accion)
        .ok_or_else(|| AppError::ValidationError(
            "La acción debe ser 'reservar' o 'vender'".to_string(),
        ))?;

    if request.nombre_cliente.trim().is_empty() {
        return Err(AppError::ValidationError("El nombre del cliente es requerido".to_string()));
    }

    // Un depósito de exactamente 0 se rechaza, aunque el modelo de datos
    // lo tolere en otros lugares.
    if request.cuota_inicial <= Decimal::ZERO {
        return Err(AppError::ValidationError("La cuota inicial debe ser mayor que cero".to_string()));
    }

    if request.cuota_inicial > precio {
        return Err(AppError::ValidationError(
            "La cuota inicial no puede superar el precio del lote".to_string(),
        ));
    }

    if request.numero_cuotas < 1 {
        return Err(AppError::ValidationError("El número de cuotas debe ser al menos 1".to_string()));
    }

    Ok(accion)
}

pub struct SettlementService {
    pool: PgPool,
}

impl SettlementService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reservar o vender un lote con su cliente y pago inicial
    pub async fn liquidar_lote(
        &self,
        lote_id: Uuid,
        usuario: &str,
        request: LiquidacionRequest,
    ) -> Result<LiquidacionResponse, AppError> {
        let mut tx = self.pool.begin().await?;

        // Row lock: dos liquidaciones del mismo lote se serializan aquí
        let lote = LoteRepository::find_for_update(&mut tx, lote_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lote no encontrado".to_string()))?;

        let precio = lote.precio.ok_or_else(|| {
            AppError::BadRequest("El lote no tiene precio definido".to_string())
        })?;

        if lote.estado != EstadoLote::Disponible.as_str() {
            return Err(AppError::Conflict(format!(
                "El lote {} no está disponible (estado actual: {})",
                lote.numero_lote, lote.estado
            )));
        }

        // Validación completa antes de escribir nada
        let accion = validar_liquidacion(&request, precio)?;

        let plan = plan_calculator::plan_de_pago(precio, request.cuota_inicial, request.numero_cuotas);

        let cliente = ClienteActualRepository::create_en(
            &mut tx,
            NuevoClienteActual {
                nombre: request.nombre_cliente.trim().to_string(),
                email: request.email,
                telefono: request.telefono,
                cedula: request.cedula,
                numero_lote: lote.numero_lote.clone(),
                precio_lote: precio,
                cuota_inicial: request.cuota_inicial,
                saldo_restante: plan.saldo_restante,
                numero_cuotas: plan.numero_cuotas,
                valor_cuota: plan.valor_cuota,
                saldo_final: plan.saldo_final,
                metodo_pago_inicial: request.metodo_pago_inicial.clone(),
                metodo_pago_cuotas: request.metodo_pago_cuotas,
                notas_especiales: None,
            },
        )
        .await?;

        let descripcion = descripcion_liquidacion(&lote, accion, &cliente.nombre);
        let lote_actualizado = LoteRepository::marcar_liquidado(
            &mut tx,
            lote_id,
            accion.estado_lote().as_str(),
            cliente.id,
            descripcion,
        )
        .await?
        .ok_or_else(|| {
            AppError::Conflict(format!("El lote {} ya no está disponible", lote.numero_lote))
        })?;

        let pago = PagoRepository::create_en(
            &mut tx,
            cliente.id,
            Utc::now().date_naive(),
            request.cuota_inicial,
            accion.tipo_pago().to_string(),
            request.metodo_pago_inicial,
            None,
            None,
        )
        .await?;

        AuditRepository::registrar_en(
            &mut tx,
            usuario,
            match accion {
                AccionLiquidacion::Reservar => "reservar_lote",
                AccionLiquidacion::Vender => "vender_lote",
            },
            &format!(
                "Lote {} para {} con depósito de {}",
                lote.numero_lote, cliente.nombre, pago.monto
            ),
        )
        .await?;

        tx.commit().await?;

        log::info!(
            "Lote {} liquidado ({}) para cliente {} por {}",
            lote_actualizado.numero_lote,
            lote_actualizado.estado,
            cliente.nombre,
            usuario
        );

        Ok(LiquidacionResponse {
            lote: lote_actualizado,
            cliente,
            pago,
        })
    }
}

/// Resumen legible que queda en la descripción del lote
fn descripcion_liquidacion(lote: &Lote, accion: AccionLiquidacion, nombre_cliente: &str) -> String {
    let verbo = match accion {
        AccionLiquidacion::Reservar => "Reservado",
        AccionLiquidacion::Vender => "Vendido",
    };
    format!(
        "{} a {} el {}",
        verbo,
        nombre_cliente,
        Utc::now().format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solicitud(accion: &str, cuota_inicial: i64, numero_cuotas: i32) -> LiquidacionRequest {
        LiquidacionRequest {
            accion: accion.to_string(),
            nombre_cliente: "Ana Torres".to_string(),
            email: None,
            telefono: None,
            cedula: None,
            cuota_inicial: Decimal::from(cuota_inicial),
            numero_cuotas,
            metodo_pago_inicial: Some("efectivo".to_string()),
            metodo_pago_cuotas: None,
        }
    }

    #[test]
    fn test_deposito_cero_se_rechaza_antes_de_escribir() {
        let req = solicitud("vender", 0, 12);
        let err = validar_liquidacion(&req, Decimal::from(50000)).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_deposito_mayor_al_precio_se_rechaza() {
        let req = solicitud("vender", 60000, 12);
        let err = validar_liquidacion(&req, Decimal::from(50000)).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_nombre_vacio_se_rechaza() {
        let mut req = solicitud("reservar", 10000, 12);
        req.nombre_cliente = "   ".to_string();
        assert!(validar_liquidacion(&req, Decimal::from(50000)).is_err());
    }

    #[test]
    fn test_cuotas_menores_a_uno_se_rechazan() {
        let req = solicitud("vender", 10000, 0);
        assert!(validar_liquidacion(&req, Decimal::from(50000)).is_err());
    }

    #[test]
    fn test_accion_desconocida_se_rechaza() {
        let req = solicitud("alquilar", 10000, 12);
        assert!(validar_liquidacion(&req, Decimal::from(50000)).is_err());
    }

    #[test]
    fn test_venta_valida_deriva_estado_y_tipo_de_pago() {
        // precio 50000, cuota 10000, 12 cuotas, acción vender
        let req = solicitud("vender", 10000, 12);
        let accion = validar_liquidacion(&req, Decimal::from(50000)).unwrap();
        assert_eq!(accion, AccionLiquidacion::Vender);
        assert_eq!(accion.estado_lote().as_str(), "vendido");
        assert_eq!(accion.tipo_pago(), "Cuota Inicial");

        let plan = plan_calculator::plan_de_pago(
            Decimal::from(50000),
            req.cuota_inicial,
            req.numero_cuotas,
        );
        assert_eq!(plan.saldo_restante, Decimal::from(40000));
        assert_eq!(plan.valor_cuota, Decimal::new(333333, 2));
    }

    #[test]
    fn test_reserva_usa_mismo_plan_con_otras_etiquetas() {
        // mismos montos que la venta; solo cambian estado y tipo de pago
        let req = solicitud("reservar", 10000, 12);
        let accion = validar_liquidacion(&req, Decimal::from(50000)).unwrap();
        assert_eq!(accion.estado_lote().as_str(), "reservado");
        assert_eq!(accion.tipo_pago(), "Depósito de Reserva");
    }

    #[test]
    fn test_deposito_igual_al_precio_es_valido() {
        let req = solicitud("vender", 50000, 1);
        assert!(validar_liquidacion(&req, Decimal::from(50000)).is_ok());
    }

    async fn crear_lote_disponible(pool: &PgPool, numero: &str) -> Lote {
        LoteRepository::new(pool.clone())
            .create(
                numero.to_string(),
                None,
                Some(Decimal::from(50000)),
                None,
                None,
            )
            .await
            .unwrap()
    }

    #[sqlx::test]
    async fn test_venta_escribe_cliente_lote_y_pago_juntos(pool: PgPool) {
        let lote = crear_lote_disponible(&pool, "A-1").await;

        let service = SettlementService::new(pool.clone());
        let liquidacion = service
            .liquidar_lote(lote.id, "admin", solicitud("vender", 10000, 12))
            .await
            .unwrap();

        assert_eq!(liquidacion.lote.estado, EstadoLote::Vendido.as_str());
        assert_eq!(liquidacion.lote.cliente_id, Some(liquidacion.cliente.id));
        assert_eq!(liquidacion.cliente.saldo_restante, Decimal::from(40000));
        assert_eq!(liquidacion.pago.tipo_pago, TIPO_PAGO_CUOTA_INICIAL);
        assert_eq!(liquidacion.pago.monto, Decimal::from(10000));

        let pagos: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM pagos_clientes WHERE cliente_id = $1")
                .bind(liquidacion.cliente.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(pagos, 1);
    }

    #[sqlx::test]
    async fn test_liquidacion_repetida_es_conflicto(pool: PgPool) {
        let lote = crear_lote_disponible(&pool, "A-2").await;
        let service = SettlementService::new(pool.clone());

        service
            .liquidar_lote(lote.id, "admin", solicitud("reservar", 10000, 12))
            .await
            .unwrap();
        let err = service
            .liquidar_lote(lote.id, "admin", solicitud("vender", 10000, 12))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));

        // el segundo intento no creó un comprador adicional
        let clientes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clientes_actuales")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(clientes, 1);
    }

    #[sqlx::test]
    async fn test_solicitud_invalida_no_deja_escrituras(pool: PgPool) {
        let lote = crear_lote_disponible(&pool, "A-3").await;
        let service = SettlementService::new(pool.clone());

        // cuota inicial mayor al precio: falla tras tomar el row lock
        let err = service
            .liquidar_lote(lote.id, "admin", solicitud("vender", 60000, 12))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let persistido = LoteRepository::new(pool.clone())
            .find_by_id(lote.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(persistido.estado, EstadoLote::Disponible.as_str());

        let clientes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clientes_actuales")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(clientes, 0);
    }
}
