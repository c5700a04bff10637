use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::transaccion_controller::TransaccionController;
use crate::dto::cliente_dto::ApiResponse;
use crate::dto::transaccion_dto::{
    ConsejoResponse, CreateTransaccionRequest, ResumenFinanciero, TransaccionFiltro,
};
use crate::middleware::auth::exigir_admin;
use crate::models::transaccion::Transaccion;
use crate::models::usuario::AuthUsuario;
use crate::services::ai_advice_service::AiAdviceService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_transaccion_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_transaccion))
        .route("/", get(list_transacciones))
        .route("/resumen", get(resumen_financiero))
        .route("/consejo", post(consejo_financiero))
        .route("/:id", delete(delete_transaccion))
}

async fn create_transaccion(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
    Json(request): Json<CreateTransaccionRequest>,
) -> Result<Json<ApiResponse<Transaccion>>, AppError> {
    exigir_admin(&usuario)?;
    let controller = TransaccionController::new(state.pool.clone());
    let response = controller.create(&usuario, request).await?;
    Ok(Json(response))
}

async fn list_transacciones(
    State(state): State<AppState>,
    Query(filtro): Query<TransaccionFiltro>,
) -> Result<Json<Vec<Transaccion>>, AppError> {
    let controller = TransaccionController::new(state.pool.clone());
    let response = controller.list(filtro).await?;
    Ok(Json(response))
}

async fn resumen_financiero(
    State(state): State<AppState>,
) -> Result<Json<ResumenFinanciero>, AppError> {
    let controller = TransaccionController::new(state.pool.clone());
    let response = controller.resumen().await?;
    Ok(Json(response))
}

async fn consejo_financiero(
    State(state): State<AppState>,
) -> Result<Json<ConsejoResponse>, AppError> {
    let controller = TransaccionController::new(state.pool.clone());
    let ai = AiAdviceService::new(state.http_client.clone(), &state.config);
    let response = controller.consejo(&ai).await?;
    Ok(Json(response))
}

async fn delete_transaccion(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    exigir_admin(&usuario)?;
    let controller = TransaccionController::new(state.pool.clone());
    controller.delete(id, &usuario).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Transacción eliminada exitosamente"
    })))
}
