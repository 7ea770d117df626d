//! The message value type and its derived hash.

use std::fmt;

use rand::Rng;

/// Shortest recipient accepted by [`Message::check_recipient_cell`], `+` included.
pub const RECIPIENT_MIN_LEN: usize = 10;

/// Longest recipient accepted by [`Message::check_recipient_cell`], `+` included.
pub const RECIPIENT_MAX_LEN: usize = 13;

/// Longest message ID considered valid by [`Message::check_message_id`].
pub const MESSAGE_ID_MAX_LEN: usize = 10;

/// Outcome of the recipient shape check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipientShape {
    Valid,
    Invalid,
}

/// A single composed message.
///
/// The hash is computed once by [`message_hash`] when the message is built
/// and never recomputed, so a message keeps the fingerprint it was created
/// with even after other messages are deleted around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    message_id: String,
    sender: String,
    recipient: String,
    text: String,
    sequence: usize,
    hash: String,
}

impl Message {
    /// Build a message and derive its hash.
    ///
    /// Neither the ID length nor the recipient shape is enforced here; callers
    /// run [`check_message_id`](Self::check_message_id) and
    /// [`check_recipient_cell`](Self::check_recipient_cell) as needed.
    pub fn new(
        message_id: impl Into<String>,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        text: impl Into<String>,
        sequence: usize,
    ) -> Self {
        let message_id = message_id.into();
        let text = text.into();
        let hash = message_hash(&message_id, sequence, &text);
        Self {
            message_id,
            sender: sender.into(),
            recipient: recipient.into(),
            text,
            sequence,
            hash,
        }
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Position of the message in the sent collection when it was created.
    pub fn sequence(&self) -> usize {
        self.sequence
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Length of the text in characters.
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }

    /// `true` if the ID is at most [`MESSAGE_ID_MAX_LEN`] characters long.
    pub fn check_message_id(&self) -> bool {
        self.message_id.chars().count() <= MESSAGE_ID_MAX_LEN
    }

    /// Check that the recipient looks like an international cell number:
    /// a leading `+`, 10 to 13 characters in total, digits after the `+`.
    ///
    /// This is looser than the registration phone rule in
    /// [`crate::account::check_cellphone`], which only accepts `+27` numbers.
    pub fn check_recipient_cell(&self) -> RecipientShape {
        recipient_shape(&self.recipient)
    }

    /// Multi-line dump of every field, shown after a message is committed.
    pub fn details(&self) -> String {
        format!(
            "MessageID: {}\nSender: {}\nMessageHash: {}\nRecipient: {}\nMessage: {}",
            self.message_id, self.sender, self.hash, self.recipient, self.text
        )
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message_id, self.hash)
    }
}

/// Recipient shape rule shared by [`Message::check_recipient_cell`] and the send flow.
pub fn recipient_shape(recipient: &str) -> RecipientShape {
    let Some(rest) = recipient.strip_prefix('+') else {
        return RecipientShape::Invalid;
    };
    let len = recipient.chars().count();
    if !(RECIPIENT_MIN_LEN..=RECIPIENT_MAX_LEN).contains(&len) {
        return RecipientShape::Invalid;
    }
    if rest.chars().all(|c| c.is_ascii_digit()) {
        RecipientShape::Valid
    } else {
        RecipientShape::Invalid
    }
}

/// Derive the human-readable fingerprint of a message.
///
/// Format: `<first two ID chars>:<sequence>:<first word><last word>`, all
/// uppercase, where the words keep only ASCII letters and digits. Words are
/// separated by runs of space, tab, line feed, vertical tab, form feed or
/// carriage return, after control characters and spaces are trimmed from both
/// ends; other Unicode spaces stay inside a word. IDs shorter than two
/// characters contribute `00`. A single-word text uses that word as both first
/// and last word. Collisions are expected.
///
/// ```
/// use quickchat::model::message::message_hash;
/// assert_eq!(message_hash("0012345678", 0, "Hi Mike, can you join us for dinner tonight"), "00:0:HITONIGHT");
/// ```
pub fn message_hash(message_id: &str, sequence: usize, text: &str) -> String {
    let id_prefix: String = if message_id.chars().count() >= 2 {
        message_id.chars().take(2).collect()
    } else {
        "00".to_string()
    };

    let words: Vec<&str> = text
        .trim_matches(|c: char| c <= '\u{20}')
        .split(is_word_separator)
        .filter(|w| !w.is_empty())
        .collect();
    let first = words.first().map(|w| alphanumeric(w)).unwrap_or_default();
    let last = if words.len() >= 2 {
        words.last().map(|w| alphanumeric(w)).unwrap_or_default()
    } else {
        first.clone()
    };

    format!("{id_prefix}:{sequence}:{first}{last}").to_uppercase()
}

/// Random decimal message ID of `len` digits. Uniqueness is not checked.
pub fn generate_message_id(len: usize) -> String {
    generate_message_id_with(&mut rand::thread_rng(), len)
}

/// Same as [`generate_message_id`] with a caller-supplied generator.
pub fn generate_message_id_with<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

fn is_word_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

fn alphanumeric(word: &str) -> String {
    word.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_prefix_and_sequence() {
        let m = Message::new("ab12345678", "S", "+27831234567", "hello there world", 3);
        assert!(m.hash().starts_with("AB:3:"));
        assert_eq!(m.hash(), "AB:3:HELLOWORLD");
    }

    #[test]
    fn test_hash_short_id_uses_zeros() {
        let m = Message::new("X", "S", "+27831234567", "Draft", 1);
        assert_eq!(m.hash(), "00:1:DRAFTDRAFT");
    }

    #[test]
    fn test_hash_strips_punctuation() {
        let hash = message_hash("1234567890", 0, "  Hi, Mike! can you join us tonight?  ");
        assert_eq!(hash, "12:0:HITONIGHT");
    }

    #[test]
    fn test_hash_only_ascii_whitespace_splits() {
        // No-break and em spaces do not separate words.
        assert_eq!(
            message_hash("1234567890", 0, "Hello\u{00A0}World"),
            "12:0:HELLOWORLDHELLOWORLD"
        );
        assert_eq!(
            message_hash("1234567890", 0, "Good\u{2003}morning friend"),
            "12:0:GOODMORNINGFRIEND"
        );
        assert_eq!(
            message_hash("1234567890", 0, "one\ttwo\x0Bthree\x0Cfour\r\nfive"),
            "12:0:ONEFIVE"
        );
        // Control characters at the ends are trimmed, not kept as a word.
        assert_eq!(message_hash("1234567890", 0, "Hi there \x01"), "12:0:HITHERE");
    }

    #[test]
    fn test_hash_empty_text() {
        assert_eq!(message_hash("99", 4, ""), "99:4:");
        assert_eq!(message_hash("99", 4, "   "), "99:4:");
    }

    #[test]
    fn test_hash_is_frozen_at_construction() {
        let m = Message::new("ID1", "S", "+27", "One", 0);
        let copy = m.clone();
        assert_eq!(m.hash(), copy.hash());
        assert_eq!(m.sequence(), 0);
    }

    #[test]
    fn test_check_message_id() {
        assert!(Message::new("1234567890", "S", "+1", "t", 0).check_message_id());
        assert!(!Message::new("12345678901", "S", "+1", "t", 0).check_message_id());
        assert!(Message::new("", "S", "+1", "t", 0).check_message_id());
    }

    #[test]
    fn test_recipient_shape() {
        assert_eq!(recipient_shape("+27831234567"), RecipientShape::Valid);
        assert_eq!(recipient_shape("0831234567"), RecipientShape::Invalid);
        assert_eq!(recipient_shape("+123"), RecipientShape::Invalid);
        assert_eq!(recipient_shape("+123456789"), RecipientShape::Valid);
        assert_eq!(recipient_shape("+123456789012"), RecipientShape::Valid);
        assert_eq!(recipient_shape("+1234567890123"), RecipientShape::Invalid);
        assert_eq!(recipient_shape("+2783a234567"), RecipientShape::Invalid);
    }

    #[test]
    fn test_generated_id_is_digits() {
        let id = generate_message_id(10);
        assert_eq!(id.len(), 10);
        assert!(id.chars().all(|c| c.is_ascii_digit()));
        assert!(Message::new(id, "S", "+1", "t", 0).check_message_id());
    }

    #[test]
    fn test_details_lists_every_field() {
        let m = Message::new("X", "S", "+99", "ABC", 0);
        let d = m.details();
        assert!(d.contains("MessageID: X"));
        assert!(d.contains("Sender: S"));
        assert!(d.contains("MessageHash: 00:0:ABCABC"));
        assert!(d.contains("Recipient: +99"));
        assert!(d.contains("Message: ABC"));
    }
}
