use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::egreso_controller::EgresoController;
use crate::dto::cliente_dto::ApiResponse;
use crate::dto::egreso_dto::{CreateEgresoRequest, PagoEgresoResponse, UpdateEgresoRequest};
use crate::middleware::auth::exigir_admin;
use crate::models::egreso::EgresoFuturo;
use crate::models::usuario::AuthUsuario;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_egreso_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_egreso))
        .route("/", get(list_egresos))
        .route("/:id", put(update_egreso))
        .route("/:id", delete(delete_egreso))
        .route("/:id/pagar", post(pagar_egreso))
}

async fn create_egreso(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
    Json(request): Json<CreateEgresoRequest>,
) -> Result<Json<ApiResponse<EgresoFuturo>>, AppError> {
    exigir_admin(&usuario)?;
    let controller = EgresoController::new(state.pool.clone());
    let response = controller.create(&usuario, request).await?;
    Ok(Json(response))
}

async fn list_egresos(
    State(state): State<AppState>,
) -> Result<Json<Vec<EgresoFuturo>>, AppError> {
    let controller = EgresoController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn update_egreso(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEgresoRequest>,
) -> Result<Json<ApiResponse<EgresoFuturo>>, AppError> {
    exigir_admin(&usuario)?;
    let controller = EgresoController::new(state.pool.clone());
    let response = controller.update(id, &usuario, request).await?;
    Ok(Json(response))
}

async fn delete_egreso(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    exigir_admin(&usuario)?;
    let controller = EgresoController::new(state.pool.clone());
    controller.delete(id, &usuario).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Egreso futuro eliminado exitosamente"
    })))
}

async fn pagar_egreso(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PagoEgresoResponse>>, AppError> {
    exigir_admin(&usuario)?;
    let controller = EgresoController::new(state.pool.clone());
    let response = controller.pagar(id, &usuario).await?;
    Ok(Json(response))
}
