//! Modelos de clientes
//!
//! `ClienteInteresado` es un prospecto que todavía no compró;
//! `ClienteActual` es un comprador con plan de pagos. La conversión de
//! interesado a actual ELIMINA la fila del interesado, así que el
//! historial de prospecto no se conserva.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Prospecto - mapea exactamente a la tabla clientes_interesados
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClienteInteresado {
    pub id: Uuid,
    pub nombre: String,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub fecha_contacto: NaiveDate,
    pub estado: String,
    pub notas: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Comprador - mapea exactamente a la tabla clientes_actuales
///
/// `saldo_restante` y `valor_cuota` son una foto del plan al momento de su
/// creación; NO se recalculan al registrar pagos. El total pagado se deriva
/// sumando pagos_clientes en cada lectura.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClienteActual {
    pub id: Uuid,
    pub nombre: String,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub cedula: Option<String>,
    /// Copia desnormalizada del número de lote; no es foreign key
    pub numero_lote: String,
    pub precio_lote: Decimal,
    pub cuota_inicial: Decimal,
    pub saldo_restante: Decimal,
    pub numero_cuotas: i32,
    pub valor_cuota: Decimal,
    pub saldo_final: Decimal,
    pub metodo_pago_inicial: Option<String>,
    pub metodo_pago_cuotas: Option<String>,
    pub documento_compra: Option<Uuid>,
    pub estado: String,
    pub cuotas_personalizadas: Option<serde_json::Value>,
    pub notas_especiales: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Estados de un comprador
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EstadoCliente {
    Activo,
    Pagado,
    Moroso,
}

impl EstadoCliente {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoCliente::Activo => "activo",
            EstadoCliente::Pagado => "pagado",
            EstadoCliente::Moroso => "moroso",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "activo" => Some(EstadoCliente::Activo),
            "pagado" => Some(EstadoCliente::Pagado),
            "moroso" => Some(EstadoCliente::Moroso),
            _ => None,
        }
    }
}
