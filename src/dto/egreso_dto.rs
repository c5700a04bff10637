use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{egreso::EgresoFuturo, transaccion::Transaccion};

// Request para registrar un egreso futuro
#[derive(Debug, Deserialize)]
pub struct CreateEgresoRequest {
    pub fecha: NaiveDate,
    /// "planificado" | "recurrente" | "extraordinario"
    pub tipo: Option<String>,
    pub categoria: String,
    pub descripcion: Option<String>,
    pub monto: Decimal,
    pub adjuntos: Option<Vec<Uuid>>,
}

// Request para actualizar un egreso futuro pendiente
#[derive(Debug, Deserialize)]
pub struct UpdateEgresoRequest {
    pub fecha: Option<NaiveDate>,
    pub tipo: Option<String>,
    pub categoria: Option<String>,
    pub descripcion: Option<String>,
    pub monto: Option<Decimal>,
    pub estado: Option<String>,
}

// Response del pago de un egreso: el egreso actualizado y la transacción
// sintetizada, ambos confirmados por la misma transacción de base de datos.
#[derive(Debug, Serialize)]
pub struct PagoEgresoResponse {
    pub egreso: EgresoFuturo,
    pub transaccion: Transaccion,
}
