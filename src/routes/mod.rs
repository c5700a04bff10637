pub mod audit_routes;
pub mod auth_routes;
pub mod cliente_routes;
pub mod documento_routes;
pub mod egreso_routes;
pub mod lote_routes;
pub mod pago_routes;
pub mod transaccion_routes;
