//! Calculadora del plan de pagos
//!
//! Aritmética pura del plan de financiación de un lote, sin efectos
//! secundarios. La validación de rangos (cuota inicial dentro del precio,
//! etc.) es responsabilidad del orquestador de liquidación; aquí solo se
//! calcula.
//!
//! Todos los montos usan `Decimal` (punto fijo), no floats.

use rust_decimal::Decimal;
use serde::Serialize;

/// Plan financiero derivado al crear un comprador
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanDePago {
    pub saldo_restante: Decimal,
    pub numero_cuotas: i32,
    pub valor_cuota: Decimal,
    pub saldo_final: Decimal,
}

/// Saldo restante al crear el plan: precio menos cuota inicial.
/// Es una foto, no un ledger; no se recalcula al registrar pagos.
pub fn calcular_saldo_restante(precio: Decimal, cuota_inicial: Decimal) -> Decimal {
    precio - cuota_inicial
}

/// Valor de cada cuota. Con cero cuotas devuelve 0 en lugar de fallar.
/// Se redondea a 2 decimales al crear el plan.
pub fn calcular_valor_cuota(saldo_restante: Decimal, numero_cuotas: i32) -> Decimal {
    if numero_cuotas <= 0 {
        return Decimal::ZERO;
    }
    (saldo_restante / Decimal::from(numero_cuotas)).round_dp(2)
}

/// Saldo final del plan. Definición canónica: igual al saldo restante al
/// momento de crear el plan, fijo.
pub fn calcular_saldo_final(saldo_restante: Decimal) -> Decimal {
    saldo_restante
}

/// Derivar el plan completo a partir del precio, la cuota inicial y el
/// número de cuotas.
pub fn plan_de_pago(precio: Decimal, cuota_inicial: Decimal, numero_cuotas: i32) -> PlanDePago {
    let saldo_restante = calcular_saldo_restante(precio, cuota_inicial);
    PlanDePago {
        saldo_restante,
        numero_cuotas,
        valor_cuota: calcular_valor_cuota(saldo_restante, numero_cuotas),
        saldo_final: calcular_saldo_final(saldo_restante),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(v: i64) -> Decimal {
        Decimal::from(v)
    }

    #[test]
    fn test_saldo_restante_es_precio_menos_cuota() {
        assert_eq!(calcular_saldo_restante(dec(50000), dec(10000)), dec(40000));
        assert_eq!(calcular_saldo_restante(dec(100), dec(100)), Decimal::ZERO);
        assert_eq!(calcular_saldo_restante(dec(100), Decimal::ZERO), dec(100));
    }

    #[test]
    fn test_saldo_restante_no_negativo_con_entradas_validas() {
        // para todo 0 <= cuota <= precio el saldo queda >= 0
        for (precio, cuota) in [(0i64, 0i64), (1, 0), (1, 1), (50000, 10000), (99999, 99999)] {
            let saldo = calcular_saldo_restante(dec(precio), dec(cuota));
            assert!(saldo >= Decimal::ZERO, "precio={} cuota={}", precio, cuota);
        }
    }

    #[test]
    fn test_valor_cuota_por_numero_de_cuotas_recompone_el_saldo() {
        // el redondeo a 2 decimales desvía como máximo medio centavo por cuota
        for cuotas in [1i32, 2, 3, 7, 12, 36, 360] {
            let saldo = dec(40000);
            let valor = calcular_valor_cuota(saldo, cuotas);
            let recompuesto = valor * Decimal::from(cuotas);
            let tolerancia = Decimal::new(5, 3) * Decimal::from(cuotas);
            assert!(
                (recompuesto - saldo).abs() <= tolerancia,
                "cuotas={} valor={} recompuesto={}",
                cuotas,
                valor,
                recompuesto
            );
        }
    }

    #[test]
    fn test_cero_cuotas_devuelve_cero_sin_fallar() {
        assert_eq!(calcular_valor_cuota(dec(40000), 0), Decimal::ZERO);
        assert_eq!(calcular_valor_cuota(dec(40000), -3), Decimal::ZERO);
    }

    #[test]
    fn test_saldo_final_es_el_saldo_restante() {
        assert_eq!(calcular_saldo_final(dec(40000)), dec(40000));
    }

    #[test]
    fn test_plan_escenario_de_referencia() {
        // precio 50000, cuota inicial 10000, 12 cuotas
        let plan = plan_de_pago(dec(50000), dec(10000), 12);
        assert_eq!(plan.saldo_restante, dec(40000));
        assert_eq!(plan.saldo_final, dec(40000));
        assert_eq!(plan.numero_cuotas, 12);
        assert_eq!(plan.valor_cuota, Decimal::new(333333, 2));
    }

    #[test]
    fn test_plan_con_division_exacta() {
        let plan = plan_de_pago(dec(60000), dec(12000), 12);
        assert_eq!(plan.valor_cuota, dec(4000));
        assert_eq!(plan.valor_cuota * dec(12), plan.saldo_restante);
    }
}
