//! Modelo de Documento
//!
//! Los archivos llegan codificados en base64 y se almacenan como texto
//! opaco; el tope de 5 MB se verifica sobre el tamaño decodificado antes
//! de insertar.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tamaño máximo permitido por documento (bytes decodificados)
pub const TAMANO_MAXIMO_DOCUMENTO: i64 = 5 * 1024 * 1024;

/// Documento - mapea exactamente a la tabla documentos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Documento {
    pub id: Uuid,
    pub nombre: String,
    pub contenido_base64: String,
    pub tamano_bytes: i64,
    pub subido_por: String,
    pub created_at: DateTime<Utc>,
}
