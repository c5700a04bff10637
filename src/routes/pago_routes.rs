use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::controllers::pago_controller::PagoController;
use crate::dto::cliente_dto::ApiResponse;
use crate::dto::pago_dto::CreatePagoRequest;
use crate::middleware::auth::exigir_admin;
use crate::models::pago::Pago;
use crate::models::usuario::AuthUsuario;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize)]
struct PagoQuery {
    cliente_id: Option<Uuid>,
}

pub fn create_pago_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_pago))
        .route("/", get(list_pagos))
        .route("/:id", delete(delete_pago))
}

async fn create_pago(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
    Json(request): Json<CreatePagoRequest>,
) -> Result<Json<ApiResponse<Pago>>, AppError> {
    exigir_admin(&usuario)?;
    let controller = PagoController::new(state.pool.clone());
    let response = controller.create(&usuario, request).await?;
    Ok(Json(response))
}

async fn list_pagos(
    State(state): State<AppState>,
    Query(query): Query<PagoQuery>,
) -> Result<Json<Vec<Pago>>, AppError> {
    let controller = PagoController::new(state.pool.clone());
    let response = controller.list(query.cliente_id).await?;
    Ok(Json(response))
}

async fn delete_pago(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    exigir_admin(&usuario)?;
    let controller = PagoController::new(state.pool.clone());
    controller.delete(id, &usuario).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Pago eliminado exitosamente"
    })))
}
