//! Text renderings of store queries, as shown by the shell and the CLI.

use crate::i18n;
use crate::model::message::Message;

use super::message_store::MessageStore;

/// `Sender: s | Recipient: r`, one line per sent message.
pub fn sender_recipient_pairs(store: &MessageStore) -> String {
    if store.sent().is_empty() {
        return i18n::store_no_sent_available().to_string();
    }
    store
        .sent()
        .iter()
        .map(|m| format!("Sender: {} | Recipient: {}\n", m.sender(), m.recipient()))
        .collect()
}

/// The longest sent message with its ID, or a not-found text.
pub fn longest(store: &MessageStore) -> String {
    match store.find_longest() {
        Some(m) => format!(
            "{} (ID: {}):\n{}",
            i18n::store_longest(),
            m.message_id(),
            m.text()
        ),
        None => i18n::store_no_sent().to_string(),
    }
}

/// Recipient and text of the message with this ID, or a not-found text.
pub fn by_id(store: &MessageStore, id: &str) -> String {
    match store.find_by_id(id) {
        Some(m) => format!("Recipient: {}\nMessage: {}", m.recipient(), m.text()),
        None => i18n::store_id_not_found().to_string(),
    }
}

/// Every message sent to `recipient`, or a not-found text naming it.
pub fn by_recipient(store: &MessageStore, recipient: &str) -> String {
    let found = store.find_by_recipient(recipient);
    if found.is_empty() {
        return format!("{} {recipient}", i18n::store_no_recipient_messages());
    }
    found
        .iter()
        .map(|m| {
            format!(
                "MessageID: {}\nSender: {}\nMessage: {}\n\n",
                m.message_id(),
                m.sender(),
                m.text()
            )
        })
        .collect()
}

/// One line per sent message with hash, ID, sender, recipient and text.
pub fn full_report(store: &MessageStore) -> String {
    if store.sent().is_empty() {
        return i18n::store_no_report().to_string();
    }
    store.sent().iter().map(report_line).collect()
}

fn report_line(m: &Message) -> String {
    format!(
        "MessageHash: {} | MessageID: {} | Sender: {} | Recipient: {} | Message: {}\n",
        m.hash(),
        m.message_id(),
        m.sender(),
        m.recipient(),
        m.text()
    )
}

/// The loaded drafts, or a text naming the empty drafts file.
pub fn drafts(store: &MessageStore) -> String {
    if store.drafts().is_empty() {
        let file = store
            .paths()
            .drafts
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        return format!("{} {file}", i18n::store_no_drafts());
    }
    let mut out = format!("{}\n\n", i18n::store_drafts_loaded());
    for d in store.drafts() {
        out.push_str(&format!(
            "MessageID: {}\nSender: {}\nRecipient: {}\nMessage: {}\n\n",
            d.message_id, d.sender, d.recipient, d.message
        ));
    }
    out
}

/// Outcome text of a delete-by-hash.
pub fn delete_status(deleted: bool) -> &'static str {
    if deleted {
        i18n::store_deleted()
    } else {
        i18n::store_hash_not_found()
    }
}

/// Closing summary shown on quit.
pub fn quit_summary(store: &MessageStore) -> String {
    format!("{} {}", i18n::store_total_sent(), store.sent().len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use crate::model::disposition::Disposition;
    use crate::store::message_store::StorePaths;

    fn store_with(messages: &[(&str, &str, &str, &str)]) -> (tempfile::TempDir, MessageStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store =
            MessageStore::new(StorePaths::in_dir(dir.path(), &StorageConfig::default()));
        for (id, sender, recipient, text) in messages {
            let m = Message::new(*id, *sender, *recipient, *text, store.next_sequence());
            store.commit(m, Disposition::Send).expect("send");
        }
        (dir, store)
    }

    #[test]
    fn test_empty_texts_say_no() {
        let (_dir, store) = store_with(&[]);
        assert!(longest(&store).contains("No"));
        assert!(full_report(&store).contains("No"));
        assert!(sender_recipient_pairs(&store).contains("No"));
        assert!(by_recipient(&store, "").contains("No"));
        assert!(drafts(&store).contains("stored_messages.json"));
    }

    #[test]
    fn test_longest_names_id() {
        let (_dir, store) = store_with(&[
            ("1", "S", "+27", "12345"),
            ("2", "S", "+27", "ABCDE"),
        ]);
        let out = longest(&store);
        assert!(out.contains("ID: 1"));
        assert!(out.contains("12345"));
        assert!(!out.contains("ABCDE"));
    }

    #[test]
    fn test_by_id() {
        let (_dir, store) = store_with(&[("X9", "S", "+2783000", "Found me")]);
        let out = by_id(&store, "X9");
        assert!(out.contains("Recipient: +2783000"));
        assert!(out.contains("Message: Found me"));
        assert!(by_id(&store, "nope").contains("not found"));
    }

    #[test]
    fn test_by_recipient() {
        let (_dir, store) = store_with(&[
            ("1", "S", "+2783000", "MSG1"),
            ("2", "S", "+111", "A"),
            ("3", "S", "+2783000", "MSG2"),
        ]);
        let out = by_recipient(&store, "+2783000");
        let first = out.find("MSG1").expect("MSG1");
        let second = out.find("MSG2").expect("MSG2");
        assert!(first < second);
        assert!(!out.contains("Message: A\n"));
        assert!(by_recipient(&store, "+000").contains("+000"));
    }

    #[test]
    fn test_report_lists_all_fields() {
        let (_dir, store) = store_with(&[("X", "SenderA", "+99", "ABC")]);
        let out = full_report(&store);
        assert!(out.contains("SenderA"));
        assert!(out.contains("MessageID: X"));
        assert!(out.contains("Recipient: +99"));
        assert!(out.contains("Message: ABC"));
        assert!(out.contains("MessageHash: 00:0:ABCABC"));
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_pairs_and_summary() {
        let (_dir, store) = store_with(&[("1", "kyl_1", "+27718693002", "Hi")]);
        assert_eq!(
            sender_recipient_pairs(&store),
            "Sender: kyl_1 | Recipient: +27718693002\n"
        );
        assert_eq!(quit_summary(&store), "Total sent messages: 1");
    }

    #[test]
    fn test_drafts_listing() {
        let (_dir, mut store) = store_with(&[]);
        let m = Message::new("D1", "S", "+27831234567", "Later", 0);
        store.commit(m, Disposition::Store).expect("store");
        let out = drafts(&store);
        assert!(out.starts_with("Stored messages loaded:"));
        assert!(out.contains("MessageID: D1"));
        assert!(out.contains("Message: Later"));
    }
}
