//! BDD step definitions for the office status notifier

pub mod polling_steps;
pub mod webhook_steps;
