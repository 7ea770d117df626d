//! In-memory user accounts: registration rules, login and welcome texts.
//!
//! The logged-in username becomes the sender of composed messages.

use std::collections::HashMap;

use tracing::info;

use crate::i18n;

/// `true` if the username contains an underscore and is at most 5 characters.
pub fn check_username(username: &str) -> bool {
    username.contains('_') && username.chars().count() <= 5
}

/// `true` if the password has at least 8 characters, an uppercase letter,
/// a digit and a character that is neither letter nor digit.
pub fn check_password_complexity(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(char::is_uppercase)
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric())
}

/// `true` for a South African cell number: `+27` followed by exactly 9 digits.
///
/// Registration uses this stricter rule; message recipients are checked with
/// [`crate::model::message::recipient_shape`] instead.
pub fn check_cellphone(phone: &str) -> bool {
    phone
        .strip_prefix("+27")
        .is_some_and(|rest| rest.len() == 9 && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// Fields collected by the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub full_name: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub full_name: String,
    pub username: String,
    password: String,
    pub phone: String,
}

/// Registered users keyed by username.
#[derive(Debug, Default)]
pub struct AccountStore {
    users: HashMap<String, User>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a registration and store the user on success.
    ///
    /// Returns `Ok` with the success text, or `Err` with the first failing
    /// rule's text. Blank fields are reported together before any rule runs.
    pub fn register(&mut self, form: &Registration) -> Result<String, String> {
        let missing: Vec<&str> = [
            (form.full_name.as_str(), i18n::field_full_name()),
            (form.username.as_str(), i18n::field_username()),
            (form.phone.as_str(), i18n::field_phone()),
            (form.password.as_str(), i18n::field_password()),
            (form.confirm_password.as_str(), i18n::field_confirm_password()),
        ]
        .into_iter()
        .filter(|(value, _)| value.trim().is_empty())
        .map(|(_, label)| label)
        .collect();

        match missing.len() {
            0 => {}
            1 => return Err(format!("{} {}.", i18n::account_fill_field(), missing[0])),
            _ => {
                return Err(format!(
                    "{} {}.",
                    i18n::account_fill_fields(),
                    missing.join(", ")
                ))
            }
        }

        if !check_username(&form.username) {
            return Err(i18n::account_bad_username().to_string());
        }
        if !check_password_complexity(&form.password) {
            return Err(i18n::account_bad_password().to_string());
        }
        if !check_cellphone(&form.phone) {
            return Err(i18n::account_bad_phone().to_string());
        }
        if form.password != form.confirm_password {
            return Err(i18n::account_password_mismatch().to_string());
        }
        if self.users.contains_key(&form.username) {
            return Err(i18n::account_username_taken().to_string());
        }

        self.users.insert(
            form.username.clone(),
            User {
                full_name: form.full_name.clone(),
                username: form.username.clone(),
                password: form.password.clone(),
                phone: form.phone.clone(),
            },
        );
        info!(username = %form.username, "Registered user");
        Ok(i18n::account_registered().to_string())
    }

    /// `true` if the username exists and the password matches.
    pub fn login(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|u| u.password == password)
    }

    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }
}

/// Welcome or failure text after a login attempt.
///
/// The username is split on its first underscore into first and last name.
pub fn login_status(success: bool, username: &str) -> String {
    if !success {
        return i18n::account_login_failed().to_string();
    }
    let (first, last) = username.split_once('_').unwrap_or((username, ""));
    format!(
        "{} {first} ,{last} {}",
        i18n::account_welcome(),
        i18n::account_welcome_tail()
    )
}
