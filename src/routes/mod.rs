pub mod admin_routes;
pub mod system_routes;
pub mod transfer_routes;
pub mod user_routes;
