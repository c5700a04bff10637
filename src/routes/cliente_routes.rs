use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::cliente_controller::ClienteController;
use crate::dto::cliente_dto::{
    ApiResponse, ClienteResponse, ConvertirInteresadoRequest, CreateInteresadoRequest,
    UpdateClienteRequest, UpdateInteresadoRequest,
};
use crate::middleware::auth::exigir_admin;
use crate::models::cliente::{ClienteActual, ClienteInteresado};
use crate::models::usuario::AuthUsuario;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_interesado_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_interesado))
        .route("/", get(list_interesados))
        .route("/:id", put(update_interesado))
        .route("/:id", delete(delete_interesado))
        .route("/:id/convertir", post(convertir_interesado))
}

pub fn create_cliente_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clientes))
        .route("/:id", get(get_cliente))
        .route("/:id", put(update_cliente))
        .route("/:id", delete(delete_cliente))
}

async fn create_interesado(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
    Json(request): Json<CreateInteresadoRequest>,
) -> Result<Json<ApiResponse<ClienteInteresado>>, AppError> {
    exigir_admin(&usuario)?;
    let controller = ClienteController::new(state.pool.clone());
    let response = controller.create_interesado(&usuario, request).await?;
    Ok(Json(response))
}

async fn list_interesados(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClienteInteresado>>, AppError> {
    let controller = ClienteController::new(state.pool.clone());
    let response = controller.list_interesados().await?;
    Ok(Json(response))
}

async fn update_interesado(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateInteresadoRequest>,
) -> Result<Json<ApiResponse<ClienteInteresado>>, AppError> {
    exigir_admin(&usuario)?;
    let controller = ClienteController::new(state.pool.clone());
    let response = controller.update_interesado(id, &usuario, request).await?;
    Ok(Json(response))
}

async fn delete_interesado(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    exigir_admin(&usuario)?;
    let controller = ClienteController::new(state.pool.clone());
    controller.delete_interesado(id, &usuario).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Cliente interesado eliminado exitosamente"
    })))
}

async fn convertir_interesado(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
    Path(id): Path<Uuid>,
    Json(request): Json<ConvertirInteresadoRequest>,
) -> Result<Json<ApiResponse<ClienteActual>>, AppError> {
    exigir_admin(&usuario)?;
    let controller = ClienteController::new(state.pool.clone());
    let response = controller.convertir_interesado(id, &usuario, request).await?;
    Ok(Json(response))
}

async fn list_clientes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClienteResponse>>, AppError> {
    let controller = ClienteController::new(state.pool.clone());
    let response = controller.list_clientes().await?;
    Ok(Json(response))
}

async fn get_cliente(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClienteResponse>, AppError> {
    let controller = ClienteController::new(state.pool.clone());
    let response = controller.get_cliente(id).await?;
    Ok(Json(response))
}

async fn update_cliente(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateClienteRequest>,
) -> Result<Json<ApiResponse<ClienteResponse>>, AppError> {
    exigir_admin(&usuario)?;
    let controller = ClienteController::new(state.pool.clone());
    let response = controller.update_cliente(id, &usuario, request).await?;
    Ok(Json(response))
}

async fn delete_cliente(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    exigir_admin(&usuario)?;
    let controller = ClienteController::new(state.pool.clone());
    controller.delete_cliente(id, &usuario).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Cliente eliminado con sus pagos exitosamente"
    })))
}
