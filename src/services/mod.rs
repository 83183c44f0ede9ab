pub mod expense_service;
pub mod fallback_service;
pub mod intent_service;
pub mod qr_service;
