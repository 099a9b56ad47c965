//! Document send pipeline built from [`Outcome`](crate::outcome::Outcome) combinators
//!
//! A [`FileSender`] turns each input file into exactly one
//! [`FileSendResult`](crate::document::FileSendResult):
//!
//! ```text
//! raw file ─ recognize ─ format ─ timestamp ─ sign ─┬─ send ─ result
//!                                                   │
//!            failures here: "Can't prepare file to send. <reason>"
//!                                     failures in send: "Can't send. <reason>"
//! ```
//!
//! The checks between recognition and sending are [`PipelineStage`]s run by a
//! [`Pipeline`], which chains them with `bind` so the first failure skips the rest.
//! Batches are processed file by file with no shared state between files.

pub mod core;
pub mod executor;
pub mod sender;
pub mod stages;

pub use core::{DeliveryState, PipelineStage};
pub use executor::{Pipeline, PipelineBuilder};
pub use sender::{FileSender, RECOGNIZE_STEP, SEND_STEP};
