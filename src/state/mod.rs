pub mod app;
pub mod kv;
