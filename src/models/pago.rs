//! Modelo de Pago
//!
//! Los pagos nunca se mutan: se crean al registrar un abono o un depósito
//! inicial, y se borran individualmente o en cascada con su cliente.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Etiquetas de tipo de pago usadas por el flujo de liquidación
pub const TIPO_PAGO_CUOTA_INICIAL: &str = "Cuota Inicial";
pub const TIPO_PAGO_DEPOSITO_RESERVA: &str = "Depósito de Reserva";

/// Pago - mapea exactamente a la tabla pagos_clientes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Pago {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub fecha_pago: NaiveDate,
    pub monto: Decimal,
    /// Texto libre: "Cuota Inicial", "Depósito de Reserva", "Cuota", "Extra"
    pub tipo_pago: String,
    pub metodo_pago: Option<String>,
    pub notas: Option<String>,
    pub comprobante_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
