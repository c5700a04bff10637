//! Pago de egresos futuros
//!
//! Marcar un egreso presupuestado como pagado sintetiza una Transacción de
//! tipo egreso con su mismo monto y categoría, y voltea el estado del
//! egreso, ambos efectos en UNA transacción de base de datos. La guarda
//! `estado = 'pendiente'` hace la conversión de una sola vía.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::egreso_dto::PagoEgresoResponse;
use crate::models::egreso::EstadoEgreso;
use crate::models::transaccion::TipoTransaccion;
use crate::repositories::audit_repository::AuditRepository;
use crate::repositories::egreso_repository::EgresoRepository;
use crate::repositories::transaccion_repository::TransaccionRepository;
use crate::utils::errors::AppError;

pub struct EgresoService {
    pool: PgPool,
}

impl EgresoService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn marcar_egreso_pagado(
        &self,
        egreso_id: Uuid,
        usuario: &str,
    ) -> Result<PagoEgresoResponse, AppError> {
        let mut tx = self.pool.begin().await?;

        let egreso = EgresoRepository::marcar_pagado_en(&mut tx, egreso_id)
            .await?
            .ok_or_else(|| {
                AppError::Conflict("El egreso no existe o ya no está pendiente".to_string())
            })?;

        debug_assert_eq!(egreso.estado, EstadoEgreso::Pagado.as_str());

        let transaccion = TransaccionRepository::create_en(
            &mut tx,
            Utc::now().date_naive(),
            TipoTransaccion::Egreso.as_str().to_string(),
            egreso.monto,
            egreso.categoria.clone(),
            egreso.descripcion.clone().or_else(|| {
                Some(format!("Pago de egreso futuro ({})", egreso.categoria))
            }),
            usuario.to_string(),
            egreso.adjuntos.clone(),
        )
        .await?;

        AuditRepository::registrar_en(
            &mut tx,
            usuario,
            "pagar_egreso",
            &format!("Egreso '{}' pagado por {}", egreso.categoria, egreso.monto),
        )
        .await?;

        tx.commit().await?;

        log::info!(
            "Egreso {} ({}) marcado como pagado por {}",
            egreso.id,
            egreso.categoria,
            usuario
        );

        Ok(PagoEgresoResponse { egreso, transaccion })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::models::egreso::EgresoFuturo;

    async fn crear_egreso_pendiente(pool: &PgPool) -> EgresoFuturo {
        EgresoRepository::new(pool.clone())
            .create(
                NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                "planificado".to_string(),
                "Mantenimiento vial".to_string(),
                Some("Recebo de la vía principal".to_string()),
                Decimal::new(120000, 2),
                "tesoreria".to_string(),
                Vec::new(),
            )
            .await
            .unwrap()
    }

    #[sqlx::test]
    async fn test_pagar_egreso_sintetiza_transaccion(pool: PgPool) {
        let egreso = crear_egreso_pendiente(&pool).await;

        let service = EgresoService::new(pool.clone());
        let respuesta = service
            .marcar_egreso_pagado(egreso.id, "tesoreria")
            .await
            .unwrap();

        assert_eq!(respuesta.egreso.estado, EstadoEgreso::Pagado.as_str());
        assert_eq!(respuesta.transaccion.tipo, TipoTransaccion::Egreso.as_str());
        assert_eq!(respuesta.transaccion.monto, egreso.monto);
        assert_eq!(respuesta.transaccion.categoria, egreso.categoria);

        // ambos efectos quedaron confirmados en la base de datos
        let persistido = EgresoRepository::new(pool.clone())
            .find_by_id(egreso.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(persistido.estado, EstadoEgreso::Pagado.as_str());

        let transacciones: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM transacciones WHERE tipo = 'egreso'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(transacciones, 1);
    }

    #[sqlx::test]
    async fn test_pagar_egreso_dos_veces_es_conflicto(pool: PgPool) {
        let egreso = crear_egreso_pendiente(&pool).await;
        let service = EgresoService::new(pool.clone());

        service
            .marcar_egreso_pagado(egreso.id, "tesoreria")
            .await
            .unwrap();
        let err = service
            .marcar_egreso_pagado(egreso.id, "tesoreria")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));

        // el segundo intento no insertó un asiento duplicado
        let transacciones: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM transacciones WHERE tipo = 'egreso'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(transacciones, 1);
    }
}
