pub mod display_id;
pub mod seed;

pub use display_id::{format_display_id, next_display_id, parse_display_number};
pub use seed::{
    NewSeed, Seed, SeedChanges, StatusSummary, STATUS_AVAILABLE, STATUS_EXPIRED,
    STATUS_LOW_STOCK, TRACKED_STATUSES,
};
