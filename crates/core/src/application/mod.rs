// Application Layer - Specifications, compounds and the repository

pub mod compound;
pub mod repository;
pub mod specification;
pub mod specifications;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use compound::{CompoundBuilder, SpecificationCompound};
pub use repository::{FindResult, SpecificationRepository};
pub use specification::{CallbackBuilder, CallbackQuery, Specification};
