use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{cliente::ClienteActual, lote::Lote, pago::Pago};

// Request para crear un lote
#[derive(Debug, Deserialize)]
pub struct CreateLoteRequest {
    pub numero_lote: String,
    pub area: Option<Decimal>,
    pub precio: Option<Decimal>,
    pub ubicacion: Option<String>,
    pub descripcion: Option<String>,
}

// Request para edición directa de un lote (cualquier estado a cualquier estado)
#[derive(Debug, Deserialize)]
pub struct UpdateLoteRequest {
    pub numero_lote: Option<String>,
    pub estado: Option<String>,
    pub area: Option<Decimal>,
    pub precio: Option<Decimal>,
    pub ubicacion: Option<String>,
    pub descripcion: Option<String>,
    pub motivo_bloqueo: Option<String>,
}

// Request del flujo de liquidación (reservar o vender un lote)
#[derive(Debug, Deserialize)]
pub struct LiquidacionRequest {
    /// "reservar" | "vender"
    pub accion: String,
    pub nombre_cliente: String,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub cedula: Option<String>,
    pub cuota_inicial: Decimal,
    pub numero_cuotas: i32,
    pub metodo_pago_inicial: Option<String>,
    pub metodo_pago_cuotas: Option<String>,
}

// Response de la liquidación: las tres filas confirmadas por la base de
// datos, no un parche optimista del cliente.
#[derive(Debug, Serialize)]
pub struct LiquidacionResponse {
    pub lote: Lote,
    pub cliente: ClienteActual,
    pub pago: Pago,
}
