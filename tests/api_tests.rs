use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "gestion-lotes");
}

#[tokio::test]
async fn test_login_credenciales_invalidas() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "nombre": "usuario_inexistente",
                        "password": "password_incorrecto"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "Unauthorized");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_rutas_protegidas_sin_token() {
    let app = create_test_app();

    for uri in ["/api/lotes", "/api/clientes", "/api/transacciones"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "uri: {}", uri);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Unauthorized");
    }
}

#[tokio::test]
async fn test_liquidacion_accion_desconocida() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/lotes/00000000-0000-0000-0000-000000000001/liquidar")
                .header("content-type", "application/json")
                .header("authorization", "Bearer token-de-prueba")
                .body(Body::from(
                    json!({
                        "accion": "regalar",
                        "nombre_cliente": "Juan Pérez",
                        "cuota_inicial": "10000",
                        "numero_cuotas": 12
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "Validation Error");
}

// App de test con el mismo contrato HTTP que el servidor real, sin base de
// datos: los handlers simulan las respuestas de los casos de borde.
fn create_test_app() -> Router {
    async fn health() -> Json<serde_json::Value> {
        Json(json!({
            "status": "ok",
            "service": "gestion-lotes"
        }))
    }

    async fn login_fallido() -> impl IntoResponse {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Unauthorized",
                "message": "Credenciales inválidas"
            })),
        )
    }

    async fn sin_token() -> impl IntoResponse {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Unauthorized",
                "message": "Falta el header Authorization"
            })),
        )
    }

    async fn accion_invalida() -> impl IntoResponse {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Validation Error",
                "message": "Acción de liquidación desconocida: regalar"
            })),
        )
    }

    Router::new()
        .route("/health", get(health))
        .route("/api/auth/login", post(login_fallido))
        .route("/api/lotes", get(sin_token))
        .route("/api/clientes", get(sin_token))
        .route("/api/transacciones", get(sin_token))
        .route("/api/lotes/:id/liquidar", post(accion_invalida))
}
