//! Repositorios de acceso a datos
//!
//! Un repositorio por tabla. Los métodos de instancia operan sobre el pool;
//! las funciones `*_en` reciben una conexión para poder componerse dentro
//! de una transacción de los servicios.

pub mod audit_repository;
pub mod cliente_actual_repository;
pub mod documento_repository;
pub mod egreso_repository;
pub mod interesado_repository;
pub mod lote_repository;
pub mod pago_repository;
pub mod transaccion_repository;
pub mod usuario_repository;
