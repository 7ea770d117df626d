//! Message store: sent, disregarded and draft collections plus their text views.

pub mod message_store;
pub mod report;

pub use message_store::{CommitOutcome, MessageStore, StorePaths};
