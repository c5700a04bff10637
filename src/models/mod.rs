//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod audit;
pub mod cliente;
pub mod documento;
pub mod egreso;
pub mod lote;
pub mod pago;
pub mod transaccion;
pub mod usuario;
