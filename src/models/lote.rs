//! Modelo de Lote
//!
//! Mapea exactamente a la tabla `lotes`. Un lote es una parcela de terreno
//! ofrecida en venta; su estado solo pasa de disponible a reservado/vendido
//! a través del flujo de liquidación.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estados posibles de un lote
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EstadoLote {
    Disponible,
    Reservado,
    Vendido,
    Bloqueado,
}

impl EstadoLote {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoLote::Disponible => "disponible",
            EstadoLote::Reservado => "reservado",
            EstadoLote::Vendido => "vendido",
            EstadoLote::Bloqueado => "bloqueado",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "disponible" => Some(EstadoLote::Disponible),
            "reservado" => Some(EstadoLote::Reservado),
            "vendido" => Some(EstadoLote::Vendido),
            "bloqueado" => Some(EstadoLote::Bloqueado),
            _ => None,
        }
    }
}

/// Lote principal - mapea exactamente a la tabla lotes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Lote {
    pub id: Uuid,
    /// Número asignado por el personal; no necesariamente ordenable numéricamente
    pub numero_lote: String,
    pub estado: String,
    pub area: Option<Decimal>,
    pub precio: Option<Decimal>,
    pub ubicacion: Option<String>,
    pub descripcion: Option<String>,
    pub motivo_bloqueo: Option<String>,
    pub cliente_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estado_lote_roundtrip() {
        for estado in [
            EstadoLote::Disponible,
            EstadoLote::Reservado,
            EstadoLote::Vendido,
            EstadoLote::Bloqueado,
        ] {
            assert_eq!(EstadoLote::from_str(estado.as_str()), Some(estado));
        }
        assert_eq!(EstadoLote::from_str("ocupado"), None);
    }
}
