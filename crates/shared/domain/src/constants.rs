//! Domain-level constants.
//!
//! These constants define paging rules and validation requirements.

// =============================================================================
// Pagination
// =============================================================================

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Maximum allowed items per page to prevent excessive queries
pub const MAX_PAGE_SIZE: u64 = 100;

/// Default starting page number (0-indexed)
pub const DEFAULT_PAGE_NUMBER: u64 = 0;

/// Separator between orders in a textual sort spec (`name,desc;id`)
pub const SORT_ORDER_SEPARATOR: char = ';';

/// Separator between property and direction in a textual sort order
pub const SORT_DIRECTION_SEPARATOR: char = ',';

// =============================================================================
// Validation
// =============================================================================

/// Minimum team name length requirement
pub const MIN_TEAM_NAME_LENGTH: usize = 1;

/// Maximum team name length (matches the column width)
pub const MAX_TEAM_NAME_LENGTH: usize = 255;
