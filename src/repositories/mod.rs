pub mod attempt_row_repository;
pub mod material_repository;

pub use attempt_row_repository::{AttemptRowRepository, MongoAttemptRowRepository};
pub use material_repository::{MaterialRepository, MongoMaterialRepository};

#[cfg(test)]
pub use attempt_row_repository::MockAttemptRowRepository;
#[cfg(test)]
pub use material_repository::MockMaterialRepository;
