//! Controllers del sistema
//!
//! Validación de campos y orquestación entre DTOs, repositorios y servicios.
//! Los mensajes de validación se muestran tal cual al personal, en español.

pub mod auth_controller;
pub mod cliente_controller;
pub mod documento_controller;
pub mod egreso_controller;
pub mod lote_controller;
pub mod pago_controller;
pub mod transaccion_controller;
