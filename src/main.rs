mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{middleware::from_fn_with_state, response::Json, routing::get, Router};
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use dotenvy::dotenv;
use serde_json::json;

use config::environment::EnvironmentConfig;
use database::DatabaseConnection;
use middleware::auth::auth_middleware;
use middleware::cors::cors_para_entorno;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🏗️  Gestión de Lotes - API de ventas e inversiones");
    info!("=================================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Err(e) = db_connection.run_migrations().await {
        error!("❌ Error ejecutando migraciones: {}", e);
        return Err(anyhow::anyhow!("Error de migraciones: {}", e));
    }

    let pool = db_connection.pool().clone();
    let config = EnvironmentConfig::default();
    let app_state = AppState::new(pool, config.clone());

    // Rutas protegidas por JWT
    let api_router = Router::new()
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        .nest("/api/lotes", routes::lote_routes::create_lote_router())
        .nest(
            "/api/interesados",
            routes::cliente_routes::create_interesado_router(),
        )
        .nest(
            "/api/clientes",
            routes::cliente_routes::create_cliente_router(),
        )
        .nest("/api/pagos", routes::pago_routes::create_pago_router())
        .nest(
            "/api/transacciones",
            routes::transaccion_routes::create_transaccion_router(),
        )
        .nest("/api/egresos", routes::egreso_routes::create_egreso_router())
        .nest(
            "/api/documentos",
            routes::documento_routes::create_documento_router(),
        )
        .nest("/api/audit", routes::audit_routes::create_audit_router())
        .layer(from_fn_with_state(app_state.clone(), auth_middleware));

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/auth", routes::auth_routes::create_public_auth_router())
        .merge(api_router)
        .layer(cors_para_entorno(&config))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Endpoints - Auth:");
    info!("   POST /api/auth/login - Iniciar sesión");
    info!("   POST /api/auth/register - Registrar usuario (admin)");
    info!("   GET  /api/auth/me - Usuario actual");
    info!("🏞️  Endpoints - Lotes:");
    info!("   POST /api/lotes - Crear lote");
    info!("   GET  /api/lotes - Listar lotes");
    info!("   GET  /api/lotes/:id - Obtener lote");
    info!("   PUT  /api/lotes/:id - Actualizar lote");
    info!("   DELETE /api/lotes/:id - Eliminar lote");
    info!("   POST /api/lotes/:id/liquidar - Reservar o vender lote");
    info!("👥 Endpoints - Clientes:");
    info!("   POST /api/interesados - Crear interesado");
    info!("   GET  /api/interesados - Listar interesados");
    info!("   POST /api/interesados/:id/convertir - Convertir a cliente");
    info!("   GET  /api/clientes - Listar clientes actuales");
    info!("   GET  /api/clientes/:id - Obtener cliente con total pagado");
    info!("   PUT  /api/clientes/:id - Actualizar cliente");
    info!("   DELETE /api/clientes/:id - Eliminar cliente y sus pagos");
    info!("💰 Endpoints - Pagos y finanzas:");
    info!("   POST /api/pagos - Registrar pago");
    info!("   GET  /api/pagos?cliente_id= - Listar pagos");
    info!("   POST /api/transacciones - Registrar transacción");
    info!("   GET  /api/transacciones - Listar transacciones (filtros)");
    info!("   GET  /api/transacciones/resumen - Resumen financiero");
    info!("   POST /api/transacciones/consejo - Consejo financiero (IA)");
    info!("   POST /api/egresos/:id/pagar - Pagar egreso futuro");
    info!("📄 Endpoints - Documentos y auditoría:");
    info!("   POST /api/documentos - Subir documento (máx 5 MB)");
    info!("   GET  /api/documentos - Listar documentos");
    info!("   GET  /api/audit - Registro de auditoría (admin)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "gestion-lotes",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
