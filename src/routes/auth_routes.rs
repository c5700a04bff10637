use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterUsuarioRequest};
use crate::dto::cliente_dto::ApiResponse;
use crate::middleware::auth::exigir_admin;
use crate::models::usuario::{AuthUsuario, Usuario};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::JwtConfig;

/// Rutas públicas: no requieren token
pub fn create_public_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Rutas protegidas: registro de usuarios y perfil propio
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/me", get(me))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone());
    let jwt_config = JwtConfig::from(&state.config);
    let response = controller.login(request, &jwt_config).await?;
    Ok(Json(response))
}

async fn register(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
    Json(request): Json<RegisterUsuarioRequest>,
) -> Result<Json<ApiResponse<Usuario>>, AppError> {
    exigir_admin(&usuario)?;
    let controller = AuthController::new(state.pool.clone());
    let response = controller.register(&usuario.nombre, request).await?;
    Ok(Json(response))
}

async fn me(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
) -> Result<Json<Usuario>, AppError> {
    let controller = AuthController::new(state.pool.clone());
    let response = controller.get_by_id(usuario.id).await?;
    Ok(Json(response))
}
