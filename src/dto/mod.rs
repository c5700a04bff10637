pub mod auth_dto;
pub mod cliente_dto;
pub mod documento_dto;
pub mod egreso_dto;
pub mod lote_dto;
pub mod pago_dto;
pub mod transaccion_dto;
