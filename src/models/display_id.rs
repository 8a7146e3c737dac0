//! Human-facing `S###` identifiers.
//!
//! The next id is derived from the display id of the row with the highest
//! internal id, not from the highest numeric suffix. Deleting the newest row
//! therefore frees its number for the next insert.

use crate::errors::ServiceError;

pub const DISPLAY_ID_PREFIX: char = 'S';
pub const FIRST_DISPLAY_ID: &str = "S001";
const DISPLAY_ID_WIDTH: usize = 3;

/// `S` followed by the number zero-padded to three digits; wider numbers are
/// written out in full (`S1000`).
pub fn format_display_id(number: u64) -> String {
    format!(
        "{}{:0width$}",
        DISPLAY_ID_PREFIX,
        number,
        width = DISPLAY_ID_WIDTH
    )
}

pub fn parse_display_number(display_id: &str) -> Result<u64, ServiceError> {
    display_id
        .strip_prefix(DISPLAY_ID_PREFIX)
        .and_then(|digits| digits.parse::<u64>().ok())
        .ok_or_else(|| {
            ServiceError::InternalError(format!("malformed display id {:?}", display_id))
        })
}

/// Display id to assign after `latest`, the display id of the most recently
/// inserted row (if any).
pub fn next_display_id(latest: Option<&str>) -> Result<String, ServiceError> {
    match latest {
        None => Ok(FIRST_DISPLAY_ID.to_string()),
        Some(display_id) => {
            let number = parse_display_number(display_id)?;
            let next = number.checked_add(1).ok_or_else(|| {
                ServiceError::InternalError(format!("display id {} overflows", display_id))
            })?;
            Ok(format_display_id(next))
        }
    }
}
