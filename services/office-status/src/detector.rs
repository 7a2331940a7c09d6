//! Decides whether a freshly fetched status is worth announcing

use crate::status::StatusRecord;

/// True when `current` should be announced given the last announced status.
///
/// The first observation (`previous` is `None`) is always announced; after
/// that only a flip of `is_open` counts. Changes to `changed_by` or
/// `timestamp` alone are not announced.
pub fn should_notify(previous: Option<&StatusRecord>, current: &StatusRecord) -> bool {
    match previous {
        None => true,
        Some(previous) => previous.is_open != current.is_open,
    }
}
