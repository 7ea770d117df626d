//! On-disk record shape shared by the sent-messages and drafts files.
//!
//! ```text
//! [
//!   {
//!     "MessageID": "0838884567",
//!     "Sender": "kyl_1",
//!     "MessageHash": "08:0:HITONIGHT",
//!     "Recipient": "+27718693002",
//!     "Message": "Hi Mike, can you join us for dinner tonight"
//!   }
//! ]
//! ```
//!
//! Keys keep this order on write. Missing keys read back as empty strings and
//! unknown keys are ignored, so older hand-edited files still load. Replay of
//! the sent file reads [`ReplayRecord`] instead, which keeps a missing
//! `MessageID` or `Sender` apart from an empty one.

use serde::{Deserialize, Serialize};

use crate::model::message::Message;

/// One flat string-keyed record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    #[serde(rename = "MessageID")]
    pub message_id: String,
    #[serde(rename = "Sender")]
    pub sender: String,
    #[serde(rename = "MessageHash")]
    pub message_hash: String,
    #[serde(rename = "Recipient")]
    pub recipient: String,
    #[serde(rename = "Message")]
    pub message: String,
}

/// A sent-file entry as read back on replay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReplayRecord {
    /// `None` when the key is absent (or `null`).
    #[serde(rename = "MessageID")]
    pub message_id: Option<String>,
    #[serde(rename = "Sender")]
    pub sender: Option<String>,
    #[serde(rename = "Recipient")]
    pub recipient: String,
    #[serde(rename = "Message")]
    pub message: String,
}

impl From<&Message> for Record {
    fn from(m: &Message) -> Self {
        Self {
            message_id: m.message_id().to_string(),
            sender: m.sender().to_string(),
            message_hash: m.hash().to_string(),
            recipient: m.recipient().to_string(),
            message: m.text().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_message_keeps_hash() {
        let m = Message::new("AB1", "kyl_1", "+27718693002", "Hello world", 2);
        let r = Record::from(&m);
        assert_eq!(r.message_id, "AB1");
        assert_eq!(r.sender, "kyl_1");
        assert_eq!(r.message_hash, "AB:2:HELLOWORLD");
        assert_eq!(r.recipient, "+27718693002");
        assert_eq!(r.message, "Hello world");
    }

    #[test]
    fn test_key_order_on_write() {
        let r = Record {
            message_id: "1".into(),
            sender: "2".into(),
            message_hash: "3".into(),
            recipient: "4".into(),
            message: "5".into(),
        };
        let json = serde_json::to_string(&r).expect("serialize");
        assert_eq!(
            json,
            r#"{"MessageID":"1","Sender":"2","MessageHash":"3","Recipient":"4","Message":"5"}"#
        );
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let r: Record =
            serde_json::from_str(r#"{ "MessageID":"A1", "Recipient":"+2783", "Extra":"x" }"#)
                .expect("parse");
        assert_eq!(r.message_id, "A1");
        assert_eq!(r.recipient, "+2783");
        assert_eq!(r.sender, "");
        assert_eq!(r.message_hash, "");
    }
}
