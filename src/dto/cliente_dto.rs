use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Request para registrar un interesado
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInteresadoRequest {
    #[validate(length(min = 1, max = 200))]
    pub nombre: String,

    #[validate(email)]
    pub email: Option<String>,

    pub telefono: Option<String>,
    pub fecha_contacto: Option<NaiveDate>,
    pub notas: Option<String>,
}

// Request para actualizar un interesado
#[derive(Debug, Deserialize)]
pub struct UpdateInteresadoRequest {
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub estado: Option<String>,
    pub notas: Option<String>,
}

// Request para convertir un interesado en cliente actual.
// El plan financiero se calcula en el servidor a partir de estos campos.
#[derive(Debug, Deserialize)]
pub struct ConvertirInteresadoRequest {
    pub numero_lote: String,
    pub precio_lote: Decimal,
    pub cuota_inicial: Decimal,
    pub numero_cuotas: i32,
    pub cedula: Option<String>,
    pub metodo_pago_inicial: Option<String>,
    pub metodo_pago_cuotas: Option<String>,
    pub notas_especiales: Option<String>,
}

// Request para actualizar un cliente actual
#[derive(Debug, Deserialize)]
pub struct UpdateClienteRequest {
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub cedula: Option<String>,
    pub estado: Option<String>,
    pub metodo_pago_cuotas: Option<String>,
    pub cuotas_personalizadas: Option<serde_json::Value>,
    pub notas_especiales: Option<String>,
}

// Response de cliente actual con el total pagado derivado.
// total_pagado se recalcula en cada lectura sumando pagos_clientes;
// no es un acumulador persistido.
#[derive(Debug, Serialize)]
pub struct ClienteResponse {
    pub id: Uuid,
    pub nombre: String,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub cedula: Option<String>,
    pub numero_lote: String,
    pub precio_lote: Decimal,
    pub cuota_inicial: Decimal,
    pub saldo_restante: Decimal,
    pub numero_cuotas: i32,
    pub valor_cuota: Decimal,
    pub saldo_final: Decimal,
    pub metodo_pago_inicial: Option<String>,
    pub metodo_pago_cuotas: Option<String>,
    pub estado: String,
    pub total_pagado: Decimal,
    pub notas_especiales: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            message: Some(message),
            data: None,
        }
    }
}
