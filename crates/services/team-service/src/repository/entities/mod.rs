//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod team;

// Re-exports for public API convenience
pub use team::{ActiveModel as TeamActiveModel, Entity as TeamEntity, Model as TeamModel};
