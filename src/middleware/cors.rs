//! Middleware de CORS
//!
//! Este módulo maneja la configuración de CORS para permitir
//! requests desde diferentes orígenes.

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::CorsLayer;

use crate::config::environment::EnvironmentConfig;

/// Crear middleware de CORS configurado para desarrollo
/// NOTA: Permite cualquier origen - solo para desarrollo
pub fn cors_middleware() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Capa de CORS según el entorno: permisiva en desarrollo (o sin
/// CORS_ORIGINS configurado), restringida a los orígenes listados en
/// producción.
pub fn cors_para_entorno(config: &EnvironmentConfig) -> CorsLayer {
    if restringir_origenes(config) {
        cors_middleware_with_origins(config.cors_origins.clone())
    } else {
        cors_middleware()
    }
}

fn restringir_origenes(config: &EnvironmentConfig) -> bool {
    !config.is_development() && !config.cors_origins.is_empty()
}

/// Crear middleware de CORS con orígenes específicos
pub fn cors_middleware_with_origins(origins: Vec<String>) -> CorsLayer {
    let mut cors = CorsLayer::new();

    for origin in origins {
        if let Ok(header_value) = HeaderValue::from_str(&origin) {
            cors = cors.allow_origin(header_value);
        }
    }

    cors.allow_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allow_headers([
        HeaderName::from_static("authorization"),
        HeaderName::from_static("content-type"),
        HeaderName::from_static("accept"),
    ])
    .allow_credentials(true)
    .max_age(std::time::Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(environment: &str, origins: Vec<String>) -> EnvironmentConfig {
        EnvironmentConfig {
            environment: environment.to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            jwt_secret: "secreto".to_string(),
            jwt_expiration: 3600,
            cors_origins: origins,
            ai_api_url: None,
            ai_api_key: None,
        }
    }

    #[test]
    fn test_produccion_con_origenes_restringe() {
        let cfg = config("production", vec!["https://app.ejemplo.com".to_string()]);
        assert!(restringir_origenes(&cfg));
    }

    #[test]
    fn test_desarrollo_siempre_es_permisivo() {
        let cfg = config("development", vec!["https://app.ejemplo.com".to_string()]);
        assert!(!restringir_origenes(&cfg));
    }

    #[test]
    fn test_produccion_sin_origenes_queda_permisivo() {
        let cfg = config("production", Vec::new());
        assert!(!restringir_origenes(&cfg));
    }
}
