//! Modelo de Transacción (libro contable)

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tipos de transacción
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TipoTransaccion {
    Ingreso,
    Egreso,
}

impl TipoTransaccion {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoTransaccion::Ingreso => "ingreso",
            TipoTransaccion::Egreso => "egreso",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ingreso" => Some(TipoTransaccion::Ingreso),
            "egreso" => Some(TipoTransaccion::Egreso),
            _ => None,
        }
    }
}

/// Transacción - mapea exactamente a la tabla transacciones
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaccion {
    pub id: Uuid,
    pub fecha: NaiveDate,
    pub tipo: String,
    pub monto: Decimal,
    pub categoria: String,
    pub descripcion: Option<String>,
    pub registrado_por: String,
    pub adjuntos: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}
