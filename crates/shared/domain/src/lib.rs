//! Domain layer - Core entities and value objects.
//!
//! This crate contains pure domain types with no infrastructure dependencies.
//! The persistence layer maps them to and from its storage representation.

pub mod constants;
pub mod error;
pub mod page;
pub mod sort;
pub mod team;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use page::{Page, PageRequest};
pub use sort::{Direction, Order, Sort};
pub use team::{Team, TeamId};
