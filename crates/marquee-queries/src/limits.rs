//! Display caps and quota constants shared by the front ends.

/// Maximum requests one user may submit per UTC day.
pub const DAILY_REQUESTS_PER_USER: usize = 3;

/// Result caps for the different adapter views.
pub const MAX_SEARCH_RESULTS: usize = 10;
pub const MAX_LIST_RESULTS: usize = 30;
pub const MAX_ADMIN_RESULTS: usize = 50;
