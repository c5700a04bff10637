//! Modelo de Usuario del personal

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Rol {
    Admin,
    Viewer,
}

impl Rol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rol::Admin => "admin",
            Rol::Viewer => "viewer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Rol::Admin),
            "viewer" => Some(Rol::Viewer),
            _ => None,
        }
    }
}

/// Usuario - mapea exactamente a la tabla usuarios
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Usuario {
    pub id: Uuid,
    pub nombre: String,
    pub email: Option<String>,
    pub rol: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Usuario autenticado, extraído de los claims del JWT por el middleware
#[derive(Debug, Clone)]
pub struct AuthUsuario {
    pub id: Uuid,
    pub nombre: String,
    pub rol: Rol,
}

impl AuthUsuario {
    pub fn es_admin(&self) -> bool {
        self.rol == Rol::Admin
    }
}
