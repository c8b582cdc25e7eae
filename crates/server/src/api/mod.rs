pub mod handlers;
pub mod routes;
pub mod transfer;

pub use routes::create_router;
