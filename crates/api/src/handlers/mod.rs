pub mod auth;
pub mod entities;
pub mod hosts;
pub mod metric_types;
pub mod states;
