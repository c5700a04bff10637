use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

// Request para registrar un pago de un cliente
#[derive(Debug, Deserialize)]
pub struct CreatePagoRequest {
    pub cliente_id: Uuid,
    pub fecha_pago: Option<NaiveDate>,
    pub monto: Decimal,
    /// Texto libre: "Cuota", "Extra", etc.
    pub tipo_pago: String,
    pub metodo_pago: Option<String>,
    pub notas: Option<String>,
    pub comprobante_id: Option<Uuid>,
}
