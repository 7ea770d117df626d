//! In-memory message store backed by the sent-messages and drafts files.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::StorageConfig;
use crate::error::Result;
use crate::i18n;
use crate::model::disposition::Disposition;
use crate::model::message::{generate_message_id, Message};
use crate::persist::codec;
use crate::persist::format::{Record, ReplayRecord};

/// Digits in the ID given to replayed records that have none.
const REPLAY_ID_LEN: usize = 6;

/// Locations of the two persisted files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    /// Every sent message, rewritten in full on each send or delete.
    pub sent: PathBuf,
    /// Stored drafts, rewritten in full on each store.
    pub drafts: PathBuf,
}

impl StorePaths {
    /// Resolve the configured file names inside `dir`.
    pub fn in_dir(dir: &Path, storage: &StorageConfig) -> Self {
        Self {
            sent: dir.join(&storage.sent_file),
            drafts: dir.join(&storage.drafts_file),
        }
    }
}

/// Result of committing a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Sent,
    Stored,
    Disregarded,
    /// The choice did not name a disposition; nothing was changed.
    InvalidAction,
}

impl CommitOutcome {
    /// Status text shown to the user.
    pub fn status(self) -> &'static str {
        match self {
            Self::Sent => i18n::status_sent(),
            Self::Stored => i18n::status_stored(),
            Self::Disregarded => i18n::status_disregarded(),
            Self::InvalidAction => i18n::status_invalid_action(),
        }
    }

    /// `true` unless the action was invalid.
    pub fn is_committed(self) -> bool {
        self != Self::InvalidAction
    }
}

/// Owns the sent, disregarded and draft collections for one session.
///
/// `sent` is the only authoritative collection. The hash and ID indices are
/// projections of it ([`hash_index`](Self::hash_index),
/// [`id_index`](Self::id_index)), so they always line up with `sent`.
///
/// Every mutation of `sent` or the drafts rewrites the whole backing file
/// before returning. A failed write is returned as an error but the
/// in-memory change is kept.
#[derive(Debug)]
pub struct MessageStore {
    paths: StorePaths,
    sent: Vec<Message>,
    disregarded: Vec<Message>,
    drafts: Vec<Record>,
}

impl MessageStore {
    /// Create an empty store without touching the disk.
    pub fn new(paths: StorePaths) -> Self {
        Self {
            paths,
            sent: Vec::new(),
            disregarded: Vec::new(),
            drafts: Vec::new(),
        }
    }

    /// Open a store by replaying the sent-messages file and loading drafts.
    ///
    /// Replayed messages get their replay position as sequence number and a
    /// freshly computed hash. Records without a `MessageID` key get a random
    /// ID, records without a `Sender` key get `default_sender`. Keys present
    /// with an empty value are kept as they are.
    pub fn open(paths: StorePaths, default_sender: &str) -> Self {
        let mut store = Self::new(paths);
        for record in codec::read_as::<ReplayRecord>(&store.paths.sent) {
            let id = record.message_id.unwrap_or_else(|| {
                let id = generate_message_id(REPLAY_ID_LEN);
                warn!(id = %id, "Replayed record had no MessageID, generated one");
                id
            });
            let sender = record
                .sender
                .unwrap_or_else(|| default_sender.to_string());
            let sequence = store.sent.len();
            store
                .sent
                .push(Message::new(id, sender, record.recipient, record.message, sequence));
        }
        store.load_drafts();
        info!(
            sent = store.sent.len(),
            drafts = store.drafts.len(),
            "Message store opened"
        );
        store
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// Sent messages in insertion order.
    pub fn sent(&self) -> &[Message] {
        &self.sent
    }

    /// Messages disregarded during this session.
    pub fn disregarded(&self) -> &[Message] {
        &self.disregarded
    }

    /// Drafts as last loaded from the drafts file.
    pub fn drafts(&self) -> &[Record] {
        &self.drafts
    }

    /// Sequence number for the next composed message.
    pub fn next_sequence(&self) -> usize {
        self.sent.len()
    }

    /// Hashes of the sent messages, position for position.
    pub fn hash_index(&self) -> Vec<&str> {
        self.sent.iter().map(Message::hash).collect()
    }

    /// IDs of the sent messages, position for position.
    pub fn id_index(&self) -> Vec<&str> {
        self.sent.iter().map(Message::message_id).collect()
    }

    /// Commit a message under the given disposition.
    pub fn commit(&mut self, message: Message, disposition: Disposition) -> Result<CommitOutcome> {
        debug!(id = %message.message_id(), action = %disposition, "Committing message");
        match disposition {
            Disposition::Send => {
                self.sent.push(message);
                self.persist_sent()?;
                Ok(CommitOutcome::Sent)
            }
            Disposition::Store => {
                let mut drafts = codec::read_records(&self.paths.drafts);
                drafts.push(Record::from(&message));
                codec::write_records(&self.paths.drafts, &drafts)?;
                self.load_drafts();
                Ok(CommitOutcome::Stored)
            }
            Disposition::Disregard => {
                self.disregarded.push(message);
                Ok(CommitOutcome::Disregarded)
            }
        }
    }

    /// Commit using the numbered menu choice. Unknown choices change nothing.
    pub fn commit_choice(&mut self, message: Message, choice: u32) -> Result<CommitOutcome> {
        match Disposition::from_choice(choice) {
            Some(disposition) => self.commit(message, disposition),
            None => {
                debug!(choice, "Ignoring invalid action");
                Ok(CommitOutcome::InvalidAction)
            }
        }
    }

    /// The sent message with the longest text; the earliest one wins ties.
    pub fn find_longest(&self) -> Option<&Message> {
        let mut best: Option<&Message> = None;
        for m in &self.sent {
            match best {
                Some(b) if m.text_len() <= b.text_len() => {}
                _ => best = Some(m),
            }
        }
        best
    }

    /// First sent message with exactly this ID.
    pub fn find_by_id(&self, id: &str) -> Option<&Message> {
        self.sent.iter().find(|m| m.message_id() == id)
    }

    /// Every sent message to exactly this recipient, in insertion order.
    pub fn find_by_recipient(&self, recipient: &str) -> Vec<&Message> {
        self.sent
            .iter()
            .filter(|m| m.recipient() == recipient)
            .collect()
    }

    /// Remove the first sent message with this hash and rewrite the sent file.
    ///
    /// Returns `Ok(false)` without touching the disk when nothing matches.
    pub fn delete_by_hash(&mut self, hash: &str) -> Result<bool> {
        let Some(pos) = self.sent.iter().position(|m| m.hash() == hash) else {
            debug!(hash, "No sent message with this hash");
            return Ok(false);
        };
        let removed = self.sent.remove(pos);
        info!(id = %removed.message_id(), hash, "Deleted sent message");
        self.persist_sent()?;
        Ok(true)
    }

    /// Replace the in-memory drafts with the contents of the drafts file.
    pub fn load_drafts(&mut self) {
        self.drafts = codec::read_records(&self.paths.drafts);
        debug!(count = self.drafts.len(), "Drafts loaded");
    }

    fn persist_sent(&self) -> Result<()> {
        let records: Vec<Record> = self.sent.iter().map(Record::from).collect();
        codec::write_records(&self.paths.sent, &records)
    }
}
