//! Modelo del registro de auditoría
//!
//! El audit log es append-only: cada mutación del sistema deja una entrada
//! legible con el usuario que la ejecutó.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Entrada de auditoría - mapea exactamente a la tabla audit_logs
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLog {
    pub id: Uuid,
    pub fecha: DateTime<Utc>,
    pub usuario: String,
    pub accion: String,
    pub detalle: String,
    pub created_at: DateTime<Utc>,
}
