use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::cliente::ClienteActual;
use crate::utils::errors::AppError;

/// Datos de inserción de un comprador, con el plan ya calculado
#[derive(Debug, Clone)]
pub struct NuevoClienteActual {
    pub nombre: String,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub cedula: Option<String>,
    pub numero_lote: String,
    pub precio_lote: Decimal,
    pub cuota_inicial: Decimal,
    pub saldo_restante: Decimal,
    pub numero_cuotas: i32,
    pub valor_cuota: Decimal,
    pub saldo_final: Decimal,
    pub metodo_pago_inicial: Option<String>,
    pub metodo_pago_cuotas: Option<String>,
    pub notas_especiales: Option<String>,
}

pub struct ClienteActualRepository {
    pool: PgPool,
}

impl ClienteActualRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ClienteActual>, AppError> {
        let cliente = sqlx::query_as::<_, ClienteActual>(
            "SELECT * FROM clientes_actuales WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(cliente)
    }

    pub async fn find_all(&self) -> Result<Vec<ClienteActual>, AppError> {
        let clientes = sqlx::query_as::<_, ClienteActual>(
            "SELECT * FROM clientes_actuales ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clientes)
    }

    /// Total pagado por un cliente: SUM de sus pagos, recalculado en cada
    /// lectura. No hay acumulador persistido.
    pub async fn total_pagado(&self, cliente_id: Uuid) -> Result<Decimal, AppError> {
        let (total,): (Option<Decimal>,) = sqlx::query_as(
            "SELECT SUM(monto) FROM pagos_clientes WHERE cliente_id = $1"
        )
        .bind(cliente_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total.unwrap_or(Decimal::ZERO))
    }

    pub async fn update(
        &self,
        id: Uuid,
        nombre: Option<String>,
        email: Option<String>,
        telefono: Option<String>,
        cedula: Option<String>,
        estado: Option<String>,
        metodo_pago_cuotas: Option<String>,
        cuotas_personalizadas: Option<serde_json::Value>,
        notas_especiales: Option<String>,
    ) -> Result<ClienteActual, AppError> {
        let current = self.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Cliente no encontrado".to_string()))?;

        let cliente = sqlx::query_as::<_, ClienteActual>(
            r#"
            UPDATE clientes_actuales
            SET nombre = $2, email = $3, telefono = $4, cedula = $5, estado = $6,
                metodo_pago_cuotas = $7, cuotas_personalizadas = $8, notas_especiales = $9
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .bind(nombre.unwrap_or(current.nombre))
        .bind(email.or(current.email))
        .bind(telefono.or(current.telefono))
        .bind(cedula.or(current.cedula))
        .bind(estado.unwrap_or(current.estado))
        .bind(metodo_pago_cuotas.or(current.metodo_pago_cuotas))
        .bind(cuotas_personalizadas.or(current.cuotas_personalizadas))
        .bind(notas_especiales.or(current.notas_especiales))
        .fetch_one(&self.pool)
        .await?;

        Ok(cliente)
    }

    /// Insertar el comprador dentro de una transacción (liquidación o conversión)
    pub async fn create_en(
        conn: &mut PgConnection,
        datos: NuevoClienteActual,
    ) -> Result<ClienteActual, AppError> {
        let cliente = sqlx::query_as::<_, ClienteActual>(
            r#"
            INSERT INTO clientes_actuales (
                id, nombre, email, telefono, cedula, numero_lote,
                precio_lote, cuota_inicial, saldo_restante, numero_cuotas,
                valor_cuota, saldo_final, metodo_pago_inicial, metodo_pago_cuotas,
                estado, notas_especiales, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, 'activo', $15, $16)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(datos.nombre)
        .bind(datos.email)
        .bind(datos.telefono)
        .bind(datos.cedula)
        .bind(datos.numero_lote)
        .bind(datos.precio_lote)
        .bind(datos.cuota_inicial)
        .bind(datos.saldo_restante)
        .bind(datos.numero_cuotas)
        .bind(datos.valor_cuota)
        .bind(datos.saldo_final)
        .bind(datos.metodo_pago_inicial)
        .bind(datos.metodo_pago_cuotas)
        .bind(datos.notas_especiales)
        .bind(Utc::now())
        .fetch_one(conn)
        .await?;

        Ok(cliente)
    }

    /// Eliminar el comprador dentro de la transacción de borrado en cascada
    pub async fn delete_en(conn: &mut PgConnection, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM clientes_actuales WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cliente no encontrado".to_string()));
        }

        Ok(())
    }
}
