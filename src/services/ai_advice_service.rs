//! Consejo financiero generado por LLM
//!
//! Colaborador externo: se le envía el resumen financiero y las
//! transacciones recientes, devuelve texto libre. Cualquier fallo (sin API
//! key, red, status no exitoso, cuerpo mal formado) devuelve un texto de
//! reemplazo fijo; este servicio nunca propaga errores al caller.

use serde::Deserialize;
use serde_json::json;

use crate::config::environment::EnvironmentConfig;
use crate::dto::transaccion_dto::ResumenFinanciero;
use crate::models::transaccion::Transaccion;
use crate::utils::errors::AppError;

/// Texto visible cuando el consejo no se puede generar
pub const CONSEJO_NO_DISPONIBLE: &str =
    "El consejo financiero no está disponible en este momento. Intente de nuevo más tarde.";

const MAX_TRANSACCIONES_EN_PROMPT: usize = 50;

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

pub struct AiAdviceService {
    client: reqwest::Client,
    api_url: Option<String>,
    api_key: Option<String>,
}

impl AiAdviceService {
    pub fn new(client: reqwest::Client, config: &EnvironmentConfig) -> Self {
        Self {
            client,
            api_url: config.ai_api_url.clone(),
            api_key: config.ai_api_key.clone(),
        }
    }

    /// Pedir un consejo financiero. Nunca falla: devuelve el texto de
    /// reemplazo ante cualquier problema.
    pub async fn generar_consejo(
        &self,
        resumen: &ResumenFinanciero,
        transacciones: &[Transaccion],
    ) -> String {
        match self.solicitar(resumen, transacciones).await {
            Ok(consejo) => consejo,
            Err(e) => {
                log::error!("Consejo financiero no disponible: {}", e);
                CONSEJO_NO_DISPONIBLE.to_string()
            }
        }
    }

    async fn solicitar(
        &self,
        resumen: &ResumenFinanciero,
        transacciones: &[Transaccion],
    ) -> Result<String, AppError> {
        let (Some(url), Some(key)) = (&self.api_url, &self.api_key) else {
            return Err(AppError::ExternalApi(
                "Falta AI_API_URL o AI_API_KEY en la configuración".to_string(),
            ));
        };

        let prompt = construir_prompt(resumen, transacciones);

        let body = json!({
            "model": "gpt-4o-mini",
            "messages": [
                {
                    "role": "system",
                    "content": "Eres un asesor financiero de una empresa de desarrollo de terrenos. Responde en español, breve y concreto."
                },
                { "role": "user", "content": prompt }
            ],
            "max_tokens": 400
        });

        let response = self
            .client
            .post(url)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Error llamando al endpoint de consejos: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Endpoint de consejos respondió {}",
                response.status()
            )));
        }

        let parsed = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Respuesta de consejos mal formada: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AppError::ExternalApi("Respuesta de consejos sin contenido".to_string()))
    }
}

fn construir_prompt(resumen: &ResumenFinanciero, transacciones: &[Transaccion]) -> String {
    let mut prompt = format!(
        "Resumen financiero: ingresos totales {}, egresos totales {}, balance {}, {} transacciones.\n",
        resumen.total_ingresos,
        resumen.total_egresos,
        resumen.balance,
        resumen.cantidad_transacciones
    );

    prompt.push_str("Transacciones recientes:\n");
    for t in transacciones.iter().take(MAX_TRANSACCIONES_EN_PROMPT) {
        prompt.push_str(&format!(
            "- {} {} {} ({})\n",
            t.fecha, t.tipo, t.monto, t.categoria
        ));
    }

    prompt.push_str("Da recomendaciones prácticas sobre la situación financiera.");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_prompt_incluye_los_totales() {
        let resumen = ResumenFinanciero {
            total_ingresos: Decimal::from(80000),
            total_egresos: Decimal::from(25000),
            balance: Decimal::from(55000),
            cantidad_transacciones: 14,
        };
        let prompt = construir_prompt(&resumen, &[]);
        assert!(prompt.contains("80000"));
        assert!(prompt.contains("25000"));
        assert!(prompt.contains("55000"));
    }

    #[tokio::test]
    async fn test_sin_api_key_devuelve_texto_de_reemplazo() {
        let config = crate::config::environment::EnvironmentConfig {
            environment: "test".to_string(),
            port: 3000,
            host: "localhost".to_string(),
            jwt_secret: "s".to_string(),
            jwt_expiration: 3600,
            cors_origins: vec![],
            ai_api_url: None,
            ai_api_key: None,
        };
        let service = AiAdviceService::new(reqwest::Client::new(), &config);
        let resumen = ResumenFinanciero {
            total_ingresos: Decimal::ZERO,
            total_egresos: Decimal::ZERO,
            balance: Decimal::ZERO,
            cantidad_transacciones: 0,
        };
        let consejo = service.generar_consejo(&resumen, &[]).await;
        assert_eq!(consejo, CONSEJO_NO_DISPONIBLE);
    }
}
