use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::lote_controller::LoteController;
use crate::dto::cliente_dto::ApiResponse;
use crate::dto::lote_dto::{CreateLoteRequest, LiquidacionRequest, LiquidacionResponse, UpdateLoteRequest};
use crate::middleware::auth::exigir_admin;
use crate::models::lote::Lote;
use crate::models::usuario::AuthUsuario;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_lote_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_lote))
        .route("/", get(list_lotes))
        .route("/:id", get(get_lote))
        .route("/:id", put(update_lote))
        .route("/:id", delete(delete_lote))
        .route("/:id/liquidar", post(liquidar_lote))
}

async fn create_lote(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
    Json(request): Json<CreateLoteRequest>,
) -> Result<Json<ApiResponse<Lote>>, AppError> {
    exigir_admin(&usuario)?;
    let controller = LoteController::new(state.pool.clone());
    let response = controller.create(&usuario, request).await?;
    Ok(Json(response))
}

async fn list_lotes(
    State(state): State<AppState>,
) -> Result<Json<Vec<Lote>>, AppError> {
    let controller = LoteController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_lote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Lote>, AppError> {
    let controller = LoteController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_lote(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLoteRequest>,
) -> Result<Json<ApiResponse<Lote>>, AppError> {
    exigir_admin(&usuario)?;
    let controller = LoteController::new(state.pool.clone());
    let response = controller.update(id, &usuario, request).await?;
    Ok(Json(response))
}

async fn delete_lote(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    exigir_admin(&usuario)?;
    let controller = LoteController::new(state.pool.clone());
    controller.delete(id, &usuario).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Lote eliminado exitosamente"
    })))
}

async fn liquidar_lote(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
    Path(id): Path<Uuid>,
    Json(request): Json<LiquidacionRequest>,
) -> Result<Json<ApiResponse<LiquidacionResponse>>, AppError> {
    exigir_admin(&usuario)?;
    let controller = LoteController::new(state.pool.clone());
    let response = controller.liquidar(id, &usuario, request).await?;
    Ok(Json(response))
}
