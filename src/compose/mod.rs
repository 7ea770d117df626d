//! Send flow: build a message from caller input, validate it and commit it.
//!
//! The interactive flow talks to the caller only through [`Prompter`], so the
//! shell, the CLI and tests can all drive it. Any prompt answered with `None`
//! cancels the flow without touching the store.

use tracing::{debug, error};

use crate::config::Config;
use crate::error::{ChatError, Result};
use crate::i18n;
use crate::model::disposition::Disposition;
use crate::model::message::{generate_message_id, Message, RecipientShape};
use crate::store::{CommitOutcome, MessageStore};

/// Source of user input and sink for status texts.
pub trait Prompter {
    /// Ask for a value. `None` means the user cancelled.
    fn ask(&mut self, prompt: &str) -> Option<String>;

    /// Show a status text to the user.
    fn show(&mut self, text: &str);
}

/// Per-session composition settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeSettings {
    /// Sender recorded on every composed message.
    pub sender: String,
    pub max_message_chars: usize,
    pub message_id_len: usize,
}

impl ComposeSettings {
    /// Settings for `session_user`, falling back to the configured default sender.
    pub fn from_config(config: &Config, session_user: Option<&str>) -> Self {
        let sender = match session_user {
            Some(user) if !user.is_empty() => user.to_string(),
            _ => config.general.default_sender.clone(),
        };
        Self {
            sender,
            max_message_chars: config.compose.max_message_chars,
            message_id_len: config.compose.message_id_len,
        }
    }
}

/// How one pass through the send flow ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// The caller declined a prompt.
    Cancelled,
    /// Input failed validation; the text says why.
    Rejected(String),
    /// The message was committed under a disposition.
    Committed {
        outcome: CommitOutcome,
        message: Message,
    },
    /// The commit ran but its file could not be written. A sent message
    /// stays in memory.
    Failed(String),
}

impl FlowOutcome {
    /// Whether this pass used up one slot of the session quota.
    ///
    /// Only a commit whose write succeeded counts. A failed write leaves a
    /// sent message in memory without using a slot.
    pub fn consumed_slot(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

/// Generate an ID and build a validated message.
///
/// Text longer than `max_message_chars` and recipients without the
/// international cell shape are rejected.
pub fn build_message(
    store: &MessageStore,
    settings: &ComposeSettings,
    recipient: &str,
    text: &str,
) -> Result<Message> {
    let message_id = generate_message_id(settings.message_id_len);
    let len = text.chars().count();
    if len > settings.max_message_chars {
        return Err(ChatError::MessageTooLong {
            len,
            max: settings.max_message_chars,
        });
    }
    let message = Message::new(
        message_id,
        settings.sender.as_str(),
        recipient.trim(),
        text,
        store.next_sequence(),
    );
    if message.check_recipient_cell() == RecipientShape::Invalid {
        return Err(ChatError::InvalidRecipient(message.recipient().to_string()));
    }
    Ok(message)
}

/// Build, validate and commit a message without prompting.
pub fn compose(
    store: &mut MessageStore,
    settings: &ComposeSettings,
    recipient: &str,
    text: &str,
    disposition: Disposition,
) -> Result<(CommitOutcome, Message)> {
    let message = build_message(store, settings, recipient, text)?;
    let outcome = store.commit(message.clone(), disposition)?;
    Ok((outcome, message))
}

/// Status text plus the field dump shown after a successful commit.
pub fn commit_report(outcome: CommitOutcome, message: &Message) -> String {
    format!(
        "{}\n\n{}\n{}",
        outcome.status(),
        i18n::flow_details(),
        message.details()
    )
}

/// Run one interactive pass: recipient, text, validation, action, commit.
pub fn run_send_flow(
    store: &mut MessageStore,
    prompter: &mut dyn Prompter,
    settings: &ComposeSettings,
) -> FlowOutcome {
    let Some(recipient) = prompter.ask(i18n::flow_prompt_recipient()) else {
        return cancelled(prompter);
    };
    let Some(text) = prompter.ask(i18n::flow_prompt_message()) else {
        return cancelled(prompter);
    };

    let message = match build_message(store, settings, &recipient, &text) {
        Ok(m) => m,
        Err(e) => {
            let reason = match e {
                ChatError::MessageTooLong { .. } => i18n::flow_too_long(),
                _ => i18n::flow_bad_recipient(),
            };
            debug!(error = %e, "Message rejected");
            prompter.show(reason);
            return FlowOutcome::Rejected(reason.to_string());
        }
    };

    let Some(choice) = prompter.ask(i18n::flow_prompt_action()) else {
        return cancelled(prompter);
    };
    let Some(disposition) = choice
        .trim()
        .parse::<u32>()
        .ok()
        .and_then(Disposition::from_choice)
    else {
        prompter.show(i18n::flow_invalid_action());
        return FlowOutcome::Rejected(i18n::flow_invalid_action().to_string());
    };

    match store.commit(message.clone(), disposition) {
        Ok(outcome) => {
            prompter.show(&commit_report(outcome, &message));
            FlowOutcome::Committed { outcome, message }
        }
        Err(e) => {
            error!(error = %e, "Could not persist message");
            let text = format!("{}: {e}", i18n::err_write_failed());
            prompter.show(&text);
            FlowOutcome::Failed(text)
        }
    }
}

fn cancelled(prompter: &mut dyn Prompter) -> FlowOutcome {
    prompter.show(i18n::flow_cancelled());
    FlowOutcome::Cancelled
}
