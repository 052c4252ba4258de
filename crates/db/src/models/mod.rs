pub mod entity;
pub mod livestate;
pub mod state;
pub mod user;
