//! Sort specification for read operations.
//!
//! A `Sort` is an ordered list of `(property, direction)` pairs. Properties are
//! plain names; whether a name refers to a real field is decided by the
//! repository that applies the sort.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::{SORT_DIRECTION_SEPARATOR, SORT_ORDER_SEPARATOR};
use crate::error::{DomainError, DomainResult};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(DomainError::validation(format!(
                "invalid sort direction '{}', expected 'asc' or 'desc'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Asc => write!(f, "asc"),
            Direction::Desc => write!(f, "desc"),
        }
    }
}

/// A single sort criterion
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    pub property: String,
    pub direction: Direction,
}

impl Order {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }
}

/// Ordered list of sort criteria. Empty means unsorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Sort {
    orders: Vec<Order>,
}

impl Sort {
    /// No ordering requested
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Ascending by a single property
    pub fn by(property: impl Into<String>) -> Self {
        Self {
            orders: vec![Order::asc(property)],
        }
    }

    /// Descending by a single property
    pub fn by_desc(property: impl Into<String>) -> Self {
        Self {
            orders: vec![Order::desc(property)],
        }
    }

    /// Append a tie-breaking order
    pub fn and(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }

    /// Parse a textual spec such as `name,desc;id`.
    ///
    /// Direction defaults to ascending. Blank input yields an unsorted `Sort`.
    pub fn parse(spec: &str) -> DomainResult<Self> {
        let mut orders = Vec::new();

        for part in spec.split(SORT_ORDER_SEPARATOR) {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            let (property, direction) = match part.split_once(SORT_DIRECTION_SEPARATOR) {
                Some((property, direction)) => (property.trim(), direction.parse()?),
                None => (part, Direction::Asc),
            };

            if property.is_empty() {
                return Err(DomainError::validation("sort property must not be empty"));
            }

            orders.push(Order {
                property: property.to_string(),
                direction,
            });
        }

        Ok(Self { orders })
    }
}

impl FromStr for Sort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sort::parse(s)
    }
}
