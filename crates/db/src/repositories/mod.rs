pub mod entity_repo;
pub mod livestate_repo;
pub mod metric_type_repo;
pub mod state_repo;
pub mod user_repo;

pub use entity_repo::EntityRepo;
pub use livestate_repo::LivestateRepo;
pub use metric_type_repo::MetricTypeRepo;
pub use state_repo::StateRepo;
pub use user_repo::{RoleRepo, UserRepo};
