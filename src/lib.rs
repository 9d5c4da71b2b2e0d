pub mod db;
pub mod error;
pub mod media;
pub mod message;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod summary;
pub mod user;
pub mod websocket;
