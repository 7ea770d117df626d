//! Core data model types: messages and dispositions.

pub mod disposition;
pub mod message;
