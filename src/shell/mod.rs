//! Interactive numbered menu over stdin/stdout.
//!
//! End of input at any prompt counts as cancelling that prompt; at the menu
//! prompt it ends the session.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::account::{self, AccountStore, Registration};
use crate::compose::{run_send_flow, ComposeSettings, Prompter};
use crate::config::Config;
use crate::i18n;
use crate::store::{report, MessageStore};

/// [`Prompter`] reading answers line by line from `input`.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for Console<R, W> {
    fn ask(&mut self, prompt: &str) -> Option<String> {
        writeln!(self.output, "{prompt}").ok()?;
        self.output.flush().ok()?;
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    fn show(&mut self, text: &str) {
        // Output errors are not actionable here; the next prompt will fail too.
        let _ = writeln!(self.output, "{text}\n");
    }
}

/// Menu entries, numbered as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Send,
    Pairs,
    Longest,
    SearchId,
    SearchRecipient,
    DeleteHash,
    Drafts,
    Report,
    Quit,
}

impl MenuChoice {
    pub fn from_number(n: u32) -> Option<Self> {
        Some(match n {
            1 => Self::Send,
            2 => Self::Pairs,
            3 => Self::Longest,
            4 => Self::SearchId,
            5 => Self::SearchRecipient,
            6 => Self::DeleteHash,
            7 => Self::Drafts,
            8 => Self::Report,
            9 => Self::Quit,
            _ => return None,
        })
    }
}

/// One interactive session over a store.
pub struct Session<'a> {
    store: &'a mut MessageStore,
    settings: ComposeSettings,
    quota: usize,
    composed: usize,
}

impl<'a> Session<'a> {
    pub fn new(store: &'a mut MessageStore, settings: ComposeSettings, quota: usize) -> Self {
        Self {
            store,
            settings,
            quota,
            composed: 0,
        }
    }

    /// Messages composed so far that used up a quota slot.
    pub fn composed(&self) -> usize {
        self.composed
    }

    /// Run the menu until the user quits or input ends.
    pub fn run(&mut self, prompter: &mut dyn Prompter) {
        loop {
            let Some(answer) = prompter.ask(i18n::shell_menu()) else {
                debug!("Input closed, leaving menu");
                return;
            };
            let Ok(n) = answer.trim().parse::<u32>() else {
                prompter.show(i18n::shell_not_a_number());
                continue;
            };
            let Some(choice) = MenuChoice::from_number(n) else {
                prompter.show(i18n::shell_invalid_choice());
                continue;
            };
            if !self.handle(choice, prompter) {
                return;
            }
        }
    }

    /// Carry out one menu choice. Returns `false` when the session should end.
    pub fn handle(&mut self, choice: MenuChoice, prompter: &mut dyn Prompter) -> bool {
        debug!(?choice, "Menu choice");
        match choice {
            MenuChoice::Send => {
                if self.composed >= self.quota {
                    prompter.show(&format!("{} ({}).", i18n::shell_limit_reached(), self.quota));
                } else if run_send_flow(self.store, prompter, &self.settings).consumed_slot() {
                    self.composed += 1;
                }
            }
            MenuChoice::Pairs => prompter.show(&report::sender_recipient_pairs(self.store)),
            MenuChoice::Longest => prompter.show(&report::longest(self.store)),
            MenuChoice::SearchId => match non_blank(prompter.ask(i18n::shell_prompt_id())) {
                Some(id) => prompter.show(&report::by_id(self.store, &id)),
                None => prompter.show(i18n::shell_no_id()),
            },
            MenuChoice::SearchRecipient => {
                match non_blank(prompter.ask(i18n::shell_prompt_recipient())) {
                    Some(r) => prompter.show(&report::by_recipient(self.store, &r)),
                    None => prompter.show(i18n::shell_no_recipient()),
                }
            }
            MenuChoice::DeleteHash => match non_blank(prompter.ask(i18n::shell_prompt_hash())) {
                Some(hash) => match self.store.delete_by_hash(&hash) {
                    Ok(deleted) => prompter.show(report::delete_status(deleted)),
                    Err(e) => prompter.show(&format!("{}: {e}", i18n::err_write_failed())),
                },
                None => prompter.show(i18n::shell_no_hash()),
            },
            MenuChoice::Drafts => {
                self.store.load_drafts();
                prompter.show(&report::drafts(self.store));
            }
            MenuChoice::Report => prompter.show(&report::full_report(self.store)),
            MenuChoice::Quit => {
                prompter.show(&report::quit_summary(self.store));
                return false;
            }
        }
        true
    }
}

fn non_blank(answer: Option<String>) -> Option<String> {
    answer
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
}

/// Optional register-then-login step. Returns the logged-in username.
pub fn sign_in(accounts: &mut AccountStore, prompter: &mut dyn Prompter) -> Option<String> {
    let username = non_blank(prompter.ask(i18n::shell_prompt_username()))?;
    let form = Registration {
        full_name: prompter.ask(i18n::shell_prompt_full_name())?,
        username: username.clone(),
        password: prompter.ask(i18n::shell_prompt_password())?,
        confirm_password: prompter.ask(i18n::shell_prompt_confirm())?,
        phone: prompter.ask(i18n::shell_prompt_phone())?.trim().to_string(),
    };
    match accounts.register(&form) {
        Ok(text) | Err(text) => prompter.show(&text),
    }
    let ok = accounts.login(&username, &form.password);
    prompter.show(&account::login_status(ok, &username));
    ok.then_some(username)
}

/// Ask for the session quota. `None` if cancelled or invalid.
pub fn ask_quota(prompter: &mut dyn Prompter, default: usize) -> Option<usize> {
    let answer = prompter.ask(&format!("{} [{default}]", i18n::shell_prompt_quota()))?;
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        return Some(default);
    }
    match trimmed.parse::<usize>() {
        Ok(0) => {
            prompter.show(i18n::shell_quota_min());
            None
        }
        Ok(n) => Some(n),
        Err(_) => {
            prompter.show(i18n::shell_quota_invalid());
            None
        }
    }
}

/// Full interactive session: welcome, optional sign-in, quota, menu.
///
/// Returns the number of messages composed.
pub fn run_shell<R: BufRead, W: Write>(
    store: &mut MessageStore,
    console: &mut Console<R, W>,
    config: &Config,
    quota: Option<usize>,
) -> usize {
    console.show(i18n::shell_welcome());

    let mut accounts = AccountStore::new();
    let user = sign_in(&mut accounts, console);
    let settings = ComposeSettings::from_config(config, user.as_deref());

    let quota = match quota {
        Some(q) if q >= 1 => q,
        Some(_) => {
            console.show(i18n::shell_quota_min());
            return 0;
        }
        None => match ask_quota(console, config.compose.default_quota) {
            Some(q) => q,
            None => return 0,
        },
    };

    info!(sender = %settings.sender, quota, "Starting session");
    let mut session = Session::new(store, settings, quota);
    session.run(console);
    session.composed()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::config::StorageConfig;
    use crate::store::StorePaths;

    fn run(script: &str, quota: Option<usize>) -> (tempfile::TempDir, MessageStore, String, usize) {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store =
            MessageStore::new(StorePaths::in_dir(dir.path(), &StorageConfig::default()));
        let mut console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let composed = run_shell(&mut store, &mut console, &Config::default(), quota);
        let out = String::from_utf8(console.into_output()).expect("utf8");
        (dir, store, out, composed)
    }

    #[test]
    fn test_menu_choice_numbers() {
        assert_eq!(MenuChoice::from_number(1), Some(MenuChoice::Send));
        assert_eq!(MenuChoice::from_number(9), Some(MenuChoice::Quit));
        assert_eq!(MenuChoice::from_number(0), None);
        assert_eq!(MenuChoice::from_number(10), None);
    }

    #[test]
    fn test_guest_send_and_quit() {
        let script = "\n2\n1\n+27718693002\nHi Mike, dinner tonight?\n1\n9\n";
        let (_dir, store, out, composed) = run(script, None);
        assert_eq!(composed, 1);
        assert_eq!(store.sent().len(), 1);
        assert_eq!(store.sent()[0].sender(), "Developer");
        assert!(out.contains("Message successfully sent."));
        assert!(out.contains("Total sent messages: 1"));
    }

    #[test]
    fn test_registered_user_is_sender() {
        let script = "kyl_1\nKyle Lee\nCh&&sec@ke99!\nCh&&sec@ke99!\n+27838968976\n\
                      1\n+27718693002\nhello\n1\n9\n";
        let (_dir, store, out, _) = run(script, Some(3));
        assert!(out.contains("Registration successful."));
        assert!(out.contains("Welcome kyl ,1"));
        assert_eq!(store.sent()[0].sender(), "kyl_1");
    }

    #[test]
    fn test_quota_limit() {
        let script = "\n1\n+27718693002\none\n3\n1\n9\n";
        let (_dir, store, out, composed) = run(script, Some(1));
        assert_eq!(composed, 1);
        assert_eq!(store.disregarded().len(), 1);
        assert!(out.contains("You reached the limit (1)."));
    }

    #[test]
    fn test_write_failure_does_not_count_against_quota() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("messages.json")).expect("mkdir");
        let mut store =
            MessageStore::new(StorePaths::in_dir(dir.path(), &StorageConfig::default()));
        let script = "\n1\n+27718693002\none\n1\n1\n+27718693002\ntwo\n1\n9\n";
        let mut console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let composed = run_shell(&mut store, &mut console, &Config::default(), Some(1));
        let out = String::from_utf8(console.into_output()).expect("utf8");

        // Both sends reach memory and neither uses the single slot.
        assert_eq!(composed, 0);
        assert_eq!(store.sent().len(), 2);
        assert!(!out.contains("You reached the limit"));
    }

    #[test]
    fn test_invalid_menu_input() {
        let script = "\nabc\n42\n9\n";
        let (_dir, _store, out, _) = run(script, Some(2));
        assert!(out.contains("Please enter a number between 1 and 9."));
        assert!(out.contains("Invalid choice. Enter 1-9."));
    }

    #[test]
    fn test_searches_and_delete() {
        let script = "\n1\n+27718693002\nfind me\n1\n5\n+27718693002\n4\n\n6\nNOPE\n8\n9\n";
        let (_dir, store, out, _) = run(script, Some(5));
        assert!(out.contains("Message: find me"));
        assert!(out.contains("No ID entered."));
        assert!(out.contains("Message hash not found."));
        assert!(out.contains(&format!("MessageHash: {}", store.sent()[0].hash())));
    }

    #[test]
    fn test_delete_by_hash_from_menu() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store =
            MessageStore::new(StorePaths::in_dir(dir.path(), &StorageConfig::default()));
        let settings = ComposeSettings::from_config(&Config::default(), None);
        crate::compose::compose(
            &mut store,
            &settings,
            "+27718693002",
            "bye",
            crate::model::disposition::Disposition::Send,
        )
        .expect("send");
        let hash = store.sent()[0].hash().to_string();

        let mut console = Console::new(Cursor::new(format!("{hash}\n").into_bytes()), Vec::new());
        let mut session = Session::new(&mut store, settings, 1);
        assert!(session.handle(MenuChoice::DeleteHash, &mut console));
        let out = String::from_utf8(console.into_output()).expect("utf8");
        assert!(out.contains("Message deleted successfully."));
        assert!(store.sent().is_empty());
    }

    #[test]
    fn test_input_end_leaves_menu() {
        let (_dir, store, _out, composed) = run("\n", Some(1));
        assert_eq!(composed, 0);
        assert!(store.sent().is_empty());
    }

    #[test]
    fn test_zero_quota_rejected() {
        let (_dir, _store, out, composed) = run("\n0\n", None);
        assert_eq!(composed, 0);
        assert!(out.contains("Number must be at least 1."));
    }
}
