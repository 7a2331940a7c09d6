//! Human-readable status messages

use crate::status::StatusRecord;

/// Render the one-line announcement for a status record.
///
/// `Office is now OPEN (opened by Alice, since 14:05 UTC)`; the parenthetical
/// only lists what the record actually carries.
pub fn format_message(record: &StatusRecord) -> String {
    let (state, verb) = if record.is_open {
        ("OPEN", "opened")
    } else {
        ("CLOSED", "closed")
    };

    let mut details = Vec::with_capacity(2);
    if let Some(who) = &record.changed_by {
        details.push(format!("{} by {}", verb, who));
    }
    if let Some(ts) = &record.timestamp {
        details.push(format!("since {}", ts.format("%H:%M UTC")));
    }

    if details.is_empty() {
        format!("Office is now {}", state)
    } else {
        format!("Office is now {} ({})", state, details.join(", "))
    }
}

/// Render the announcement sent when the status source stops answering
pub fn format_outage() -> String {
    "Office status is unavailable; waiting for the sensor to come back online".to_string()
}
