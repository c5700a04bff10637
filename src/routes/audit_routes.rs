use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;

use crate::middleware::auth::exigir_admin;
use crate::models::audit::AuditLog;
use crate::models::usuario::AuthUsuario;
use crate::repositories::audit_repository::AuditRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;

const LIMITE_DEFECTO: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    pub limite: Option<i64>,
}

pub fn create_audit_router() -> Router<AppState> {
    Router::new().route("/", get(list_audit_logs))
}

async fn list_audit_logs(
    State(state): State<AppState>,
    Extension(usuario): Extension<AuthUsuario>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<Vec<AuditLog>>, AppError> {
    exigir_admin(&usuario)?;
    let repo = AuditRepository::new(state.pool.clone());
    let limite = query.limite.unwrap_or(LIMITE_DEFECTO).clamp(1, 500);
    let logs = repo.find_recientes(limite).await?;
    Ok(Json(logs))
}
