pub mod auth_service;
pub mod kv_service;
pub mod skew_service;
