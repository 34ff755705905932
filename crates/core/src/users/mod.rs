pub mod users_model;
pub mod users_service;
pub mod users_traits;

#[cfg(test)]
mod users_model_tests;

pub use users_model::*;
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
