//! Modelo de Egreso Futuro
//!
//! Un egreso futuro es un gasto presupuestado pendiente de pago. Al marcarse
//! como pagado se sintetiza una Transacción de tipo egreso con sus mismos
//! campos; la conversión es de una sola vía y ocurre en una sola transacción
//! de base de datos.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estados de un egreso futuro
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EstadoEgreso {
    Pendiente,
    Pagado,
    Cancelado,
}

impl EstadoEgreso {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoEgreso::Pendiente => "pendiente",
            EstadoEgreso::Pagado => "pagado",
            EstadoEgreso::Cancelado => "cancelado",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pendiente" => Some(EstadoEgreso::Pendiente),
            "pagado" => Some(EstadoEgreso::Pagado),
            "cancelado" => Some(EstadoEgreso::Cancelado),
            _ => None,
        }
    }
}

/// Egreso futuro - mapea exactamente a la tabla egresos_futuros
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EgresoFuturo {
    pub id: Uuid,
    pub fecha: NaiveDate,
    /// planificado | recurrente | extraordinario
    pub tipo: String,
    pub categoria: String,
    pub descripcion: Option<String>,
    pub monto: Decimal,
    pub registrado_por: String,
    pub adjuntos: Vec<Uuid>,
    pub estado: String,
    pub created_at: DateTime<Utc>,
}
