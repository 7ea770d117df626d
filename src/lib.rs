//! `QuickChat`: a terminal message composer and store.
//!
//! This crate provides the message model, the persisted message store, the
//! send flow, and the interactive menu used by the `quickchat` binary.

pub mod account;
pub mod compose;
pub mod config;
pub mod error;
pub mod i18n;
pub mod model;
pub mod persist;
pub mod shell;
pub mod store;
