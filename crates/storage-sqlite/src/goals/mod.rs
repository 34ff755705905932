mod model;
mod repository;

pub use model::{GoalContributionDB, GoalDB};
pub use repository::GoalRepository;
