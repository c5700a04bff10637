//! Middleware de autenticación
//!
//! Valida el JWT del header Authorization y deja el usuario autenticado en
//! las extensiones del request para los handlers.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::models::usuario::{AuthUsuario, Rol};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token, JwtConfig};

/// Middleware de autenticación
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Falta el header Authorization".to_string()))?;

    let token = extract_token_from_header(auth_header)?;

    let config = JwtConfig::from(&state.config);
    let claims = verify_token(token, &config)?;

    let usuario = AuthUsuario {
        id: Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Jwt("Subject inválido en el token".to_string()))?,
        nombre: claims.nombre,
        rol: Rol::from_str(&claims.rol)
            .ok_or_else(|| AppError::Jwt("Rol inválido en el token".to_string()))?,
    };

    request.extensions_mut().insert(usuario);

    Ok(next.run(request).await)
}

/// Exigir rol admin para una mutación. Los viewers solo leen.
pub fn exigir_admin(usuario: &AuthUsuario) -> Result<(), AppError> {
    if !usuario.es_admin() {
        return Err(AppError::Forbidden(
            "Se requiere rol de administrador para esta operación".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exigir_admin() {
        let admin = AuthUsuario {
            id: Uuid::new_v4(),
            nombre: "admin".to_string(),
            rol: Rol::Admin,
        };
        let viewer = AuthUsuario {
            id: Uuid::new_v4(),
            nombre: "viewer".to_string(),
            rol: Rol::Viewer,
        };

        assert!(exigir_admin(&admin).is_ok());
        assert!(matches!(exigir_admin(&viewer), Err(AppError::Forbidden(_))));
    }
}
