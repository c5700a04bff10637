use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::documento_controller::DocumentoController;
use crate::dto::cliente_dto::ApiResponse;
use crate::dto::documento_dto::{CreateDocumentoRequest, DocumentoResumen};
use crate::middleware::auth::exigir_admin;
use crate::models::documento::Documento;
use crate::models::usuario::AuthUsuario;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_documento_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_documento))
        .route("/", get(list_documentos))
        .route("/:id", get(get_documento))
        .route("/:id", delete(delete_documento))
}

async fn create_documento(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
    Json(request): Json<CreateDocumentoRequest>,
) -> Result<Json<ApiResponse<DocumentoResumen>>, AppError> {
    exigir_admin(&usuario)?;
    let controller = DocumentoController::new(state.pool.clone());
    let response = controller.create(&usuario, request).await?;
    Ok(Json(response))
}

async fn list_documentos(
    State(state): State<AppState>,
) -> Result<Json<Vec<DocumentoResumen>>, AppError> {
    let controller = DocumentoController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_documento(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Documento>, AppError> {
    let controller = DocumentoController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn delete_documento(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    exigir_admin(&usuario)?;
    let controller = DocumentoController::new(state.pool.clone());
    controller.delete(id, &usuario).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Documento eliminado exitosamente"
    })))
}
