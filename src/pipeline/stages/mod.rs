//! Stages applied to a recognized document before it is sent
//!
//! 1. FormatStage - Check the format version tag against the allow-list
//! 2. TimestampStage - Reject documents older than the configured calendar months
//! 3. SignStage - Replace content with the cryptographer's signed form

pub mod format;
pub mod sign;
pub mod timestamp;

pub use format::{FormatStage, INVALID_FORMAT};
pub use sign::SignStage;
pub use timestamp::{TimestampStage, TOO_OLD};
