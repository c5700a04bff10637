use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Request para subir un documento (contenido en base64)
#[derive(Debug, Deserialize)]
pub struct CreateDocumentoRequest {
    pub nombre: String,
    pub contenido_base64: String,
}

// Response de listado: metadatos sin el contenido
#[derive(Debug, Serialize)]
pub struct DocumentoResumen {
    pub id: Uuid,
    pub nombre: String,
    pub tamano_bytes: i64,
    pub subido_por: String,
    pub created_at: DateTime<Utc>,
}
