//! Servicios del sistema
//!
//! La lógica de negocio que coordina varias escrituras vive aquí, separada
//! del transporte HTTP para poder testearse sin red ni UI.

pub mod ai_advice_service;
pub mod conversion_service;
pub mod egreso_service;
pub mod plan_calculator;
pub mod settlement_service;
