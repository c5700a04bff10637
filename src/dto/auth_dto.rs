use serde::{Deserialize, Serialize};
use validator::Validate;

// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub nombre: String,
    pub password: String,
}

// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: Option<String>,
    pub message: Option<String>,
    pub usuario_id: Option<String>,
    pub nombre: Option<String>,
    pub rol: Option<String>,
}

impl LoginResponse {
    pub fn success(token: String, usuario_id: String, nombre: String, rol: String) -> Self {
        Self {
            success: true,
            token: Some(token),
            message: None,
            usuario_id: Some(usuario_id),
            nombre: Some(nombre),
            rol: Some(rol),
        }
    }
}

// Request para registrar un usuario del personal
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUsuarioRequest {
    #[validate(length(min = 2, max = 100))]
    pub nombre: String,

    #[validate(email)]
    pub email: Option<String>,

    /// "admin" | "viewer"
    pub rol: String,

    #[validate(length(min = 8, max = 100))]
    pub password: String,
}
