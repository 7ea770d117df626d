//! Persistence of sent messages and drafts as flat JSON record lists.

pub mod codec;
pub mod format;
