use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Request para registrar una transacción del libro contable
#[derive(Debug, Deserialize)]
pub struct CreateTransaccionRequest {
    pub fecha: Option<NaiveDate>,
    /// "ingreso" | "egreso"
    pub tipo: String,
    pub monto: Decimal,
    pub categoria: String,
    pub descripcion: Option<String>,
    pub adjuntos: Option<Vec<Uuid>>,
}

// Filtros de listado
#[derive(Debug, Default, Deserialize)]
pub struct TransaccionFiltro {
    pub tipo: Option<String>,
    pub categoria: Option<String>,
}

// Resumen financiero: totales por tipo
#[derive(Debug, Serialize)]
pub struct ResumenFinanciero {
    pub total_ingresos: Decimal,
    pub total_egresos: Decimal,
    pub balance: Decimal,
    pub cantidad_transacciones: i64,
}

// Response del consejo financiero generado por el LLM
#[derive(Debug, Serialize)]
pub struct ConsejoResponse {
    pub consejo: String,
}
