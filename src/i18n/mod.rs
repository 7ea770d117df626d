//! Internationalization (i18n) module.
//!
//! Provides localized strings for the CLI, the interactive shell and every
//! status text returned by the store. English is the default language;
//! Spanish is available as an alternative.

use std::sync::OnceLock;

static CURRENT_LANG: OnceLock<Lang> = OnceLock::new();

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    /// English (default)
    En,
    /// Spanish
    Es,
}

impl Lang {
    /// Parse a language code string (e.g. "en", "es", "en_US", "es_ES").
    /// Returns `None` for unrecognized codes.
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.to_lowercase();
        let prefix = normalized.split(['_', '-']).next().unwrap_or("");
        match prefix {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    /// Return the ISO 639-1 code for this language.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }
}

/// Initialize the global language. Call once at startup.
/// If already initialized, this is a no-op.
pub fn set_lang(lang: Lang) {
    let _ = CURRENT_LANG.set(lang);
}

/// Get the currently configured language (defaults to English).
pub fn lang() -> Lang {
    CURRENT_LANG.get().copied().unwrap_or(Lang::En)
}

/// Detect language from the `QUICKCHAT_LANG` / `LC_MESSAGES` / `LANG` environment variables.
pub fn detect_system_lang() -> Lang {
    std::env::var("QUICKCHAT_LANG")
        .ok()
        .and_then(|v| Lang::from_code(&v))
        .or_else(|| {
            std::env::var("LC_MESSAGES")
                .ok()
                .and_then(|v| Lang::from_code(&v))
        })
        .or_else(|| std::env::var("LANG").ok().and_then(|v| Lang::from_code(&v)))
        .unwrap_or(Lang::En)
}

/// Macro for defining translatable message functions.
/// Each function returns a `&'static str` based on the current language.
macro_rules! msg {
    ($name:ident, $en:expr, $es:expr) => {
        /// Returns a localized string for the current language.
        pub fn $name() -> &'static str {
            match lang() {
                Lang::En => $en,
                Lang::Es => $es,
            }
        }
    };
}

// ── General ──────────────────────────────────────────────────────

msg!(app_name, "QuickChat", "QuickChat");
msg!(
    app_about,
    "QuickChat \u{2014} Compose, send, store and search short text messages from the terminal.",
    "QuickChat \u{2014} Redacta, env\u{ed}a, guarda y busca mensajes cortos desde la terminal."
);
msg!(
    app_long_about,
    "QuickChat \u{2014} Compose, send, store and search short text messages.\nSent messages and drafts are kept in two JSON files in the data directory.",
    "QuickChat \u{2014} Redacta, env\u{ed}a, guarda y busca mensajes cortos.\nLos mensajes enviados y los borradores se guardan en dos ficheros JSON en el directorio de datos."
);
msg!(
    app_after_help,
    "Run without a subcommand to open the interactive menu.",
    "Ejecuta sin subcomando para abrir el men\u{fa} interactivo."
);

// ── CLI help strings ─────────────────────────────────────────────

msg!(
    help_cmd_chat,
    "Open the interactive QuickChat menu (default if no subcommand given)",
    "Abrir el men\u{fa} interactivo de QuickChat (por defecto si no se da subcomando)"
);
msg!(help_cmd_send, "Compose and commit one message", "Redactar y confirmar un mensaje");
msg!(
    help_cmd_pairs,
    "List sender and recipient of every sent message",
    "Listar remitente y destinatario de cada mensaje enviado"
);
msg!(help_cmd_longest, "Show the longest sent message", "Mostrar el mensaje enviado m\u{e1}s largo");
msg!(help_cmd_find, "Search a sent message by ID", "Buscar un mensaje enviado por ID");
msg!(
    help_cmd_recipient,
    "Search sent messages by recipient",
    "Buscar mensajes enviados por destinatario"
);
msg!(help_cmd_delete, "Delete a sent message by hash", "Eliminar un mensaje enviado por hash");
msg!(help_cmd_drafts, "Load and list stored drafts", "Cargar y listar los borradores guardados");
msg!(help_cmd_report, "Show the full report of sent messages", "Mostrar el informe completo de mensajes enviados");
msg!(
    help_cmd_completions,
    "Generate shell completions",
    "Generar autocompletado para la shell"
);
msg!(help_cmd_manpage, "Generate a man page", "Generar una p\u{e1}gina de manual");
msg!(
    help_cmd_config,
    "Write the current settings to the config file",
    "Guardar la configuraci\u{f3}n actual en el archivo de configuraci\u{f3}n"
);

// ── Store status ─────────────────────────────────────────────────

msg!(status_sent, "Message successfully sent.", "Mensaje enviado correctamente.");
msg!(status_stored, "Message successfully stored.", "Mensaje guardado correctamente.");
msg!(status_disregarded, "Message disregarded.", "Mensaje descartado.");
msg!(status_invalid_action, "Invalid action.", "Acci\u{f3}n no v\u{e1}lida.");
msg!(store_no_sent, "No sent messages.", "No hay mensajes enviados.");
msg!(
    store_no_sent_available,
    "No sent messages available.",
    "No hay mensajes enviados disponibles."
);
msg!(
    store_no_report,
    "No sent messages to report.",
    "No hay mensajes enviados para el informe."
);
msg!(
    store_id_not_found,
    "Message ID not found in sent messages.",
    "No se encontr\u{f3} el ID entre los mensajes enviados."
);
msg!(
    store_no_recipient_messages,
    "No sent messages to recipient:",
    "No hay mensajes enviados al destinatario:"
);
msg!(store_longest, "Longest message", "Mensaje m\u{e1}s largo");
msg!(
    store_no_drafts,
    "No stored messages found in",
    "No hay mensajes guardados en"
);
msg!(store_drafts_loaded, "Stored messages loaded:", "Mensajes guardados cargados:");
msg!(store_total_sent, "Total sent messages:", "Total de mensajes enviados:");
msg!(
    store_deleted,
    "Message deleted successfully.",
    "Mensaje eliminado correctamente."
);
msg!(store_hash_not_found, "Message hash not found.", "No se encontr\u{f3} el hash del mensaje.");

// ── Send flow ────────────────────────────────────────────────────

msg!(flow_cancelled, "Cancelled.", "Cancelado.");
msg!(
    flow_prompt_recipient,
    "Enter Recipient (include international code, e.g. +27831234567):",
    "Introduce el destinatario (con prefijo internacional, p. ej. +27831234567):"
);
msg!(
    flow_prompt_message,
    "Enter message (250 chars max):",
    "Introduce el mensaje (m\u{e1}ximo 250 caracteres):"
);
msg!(
    flow_too_long,
    "Message exceeds the character limit. Entry cancelled.",
    "El mensaje supera el l\u{ed}mite de caracteres. Entrada cancelada."
);
msg!(
    flow_bad_recipient,
    "Cell phone number is incorrectly formatted. Please include international code.",
    "El n\u{fa}mero de m\u{f3}vil no tiene un formato correcto. Incluye el prefijo internacional."
);
msg!(
    flow_prompt_action,
    "Choose action:\n1. Send Message\n2. Store Message\n3. Disregard Message\nEnter 1-3:",
    "Elige una acci\u{f3}n:\n1. Enviar mensaje\n2. Guardar mensaje\n3. Descartar mensaje\nIntroduce 1-3:"
);
msg!(
    flow_invalid_action,
    "Invalid action. Use 1-3.",
    "Acci\u{f3}n no v\u{e1}lida. Usa 1-3."
);
msg!(flow_details, "Message Details:", "Detalles del mensaje:");

// ── Interactive shell ────────────────────────────────────────────

msg!(shell_welcome, "Welcome to QuickChat.", "Bienvenido a QuickChat.");
msg!(
    shell_prompt_quota,
    "How many messages will you enter?",
    "\u{bf}Cu\u{e1}ntos mensajes vas a introducir?"
);
msg!(shell_quota_min, "Number must be at least 1.", "El n\u{fa}mero debe ser al menos 1.");
msg!(shell_quota_invalid, "Invalid number entered.", "N\u{fa}mero no v\u{e1}lido.");
msg!(
    shell_menu,
    "QuickChat Menu\n\n1. Send Messages\n2. Display Sender & Recipient\n3. Display Longest Message\n4. Search Message by ID\n5. Search Message by Recipient\n6. Delete Message by Hash\n7. Load Stored Messages\n8. Display Full Report\n9. Quit\n\nEnter your choice (1-9):",
    "Men\u{fa} de QuickChat\n\n1. Enviar mensajes\n2. Mostrar remitente y destinatario\n3. Mostrar el mensaje m\u{e1}s largo\n4. Buscar mensaje por ID\n5. Buscar mensaje por destinatario\n6. Eliminar mensaje por hash\n7. Cargar mensajes guardados\n8. Mostrar informe completo\n9. Salir\n\nIntroduce tu opci\u{f3}n (1-9):"
);
msg!(
    shell_not_a_number,
    "Please enter a number between 1 and 9.",
    "Introduce un n\u{fa}mero entre 1 y 9."
);
msg!(shell_invalid_choice, "Invalid choice. Enter 1-9.", "Opci\u{f3}n no v\u{e1}lida. Introduce 1-9.");
msg!(shell_limit_reached, "You reached the limit", "Has alcanzado el l\u{ed}mite");
msg!(
    shell_prompt_id,
    "Enter Message ID to search:",
    "Introduce el ID del mensaje a buscar:"
);
msg!(shell_no_id, "No ID entered.", "No se introdujo ning\u{fa}n ID.");
msg!(
    shell_prompt_recipient,
    "Enter Recipient to search (full number):",
    "Introduce el destinatario a buscar (n\u{fa}mero completo):"
);
msg!(shell_no_recipient, "No recipient entered.", "No se introdujo ning\u{fa}n destinatario.");
msg!(
    shell_prompt_hash,
    "Enter Message Hash to delete (exact):",
    "Introduce el hash del mensaje a eliminar (exacto):"
);
msg!(shell_no_hash, "No hash entered.", "No se introdujo ning\u{fa}n hash.");
msg!(
    shell_prompt_username,
    "Username (leave blank to continue without an account):",
    "Usuario (d\u{e9}jalo vac\u{ed}o para continuar sin cuenta):"
);
msg!(shell_prompt_full_name, "Full Name:", "Nombre completo:");
msg!(shell_prompt_password, "Password:", "Contrase\u{f1}a:");
msg!(shell_prompt_confirm, "Confirm Password:", "Confirmar contrase\u{f1}a:");
msg!(shell_prompt_phone, "Phone:", "Tel\u{e9}fono:");

// ── Accounts ─────────────────────────────────────────────────────

msg!(
    account_fill_fields,
    "Please fill in the following fields:",
    "Rellena los siguientes campos:"
);
msg!(account_fill_field, "Please fill in the", "Rellena el campo");
msg!(
    account_bad_username,
    "Username is not correctly formatted. Please ensure that username has a underscore and is no more than five characters in length.",
    "El usuario no tiene un formato correcto. Debe contener un guion bajo y tener como m\u{e1}ximo cinco caracteres."
);
msg!(
    account_bad_password,
    "Password is not correctly formatted. Must be eight characters long, contain a capital letter, number and special character.",
    "La contrase\u{f1}a no tiene un formato correcto. Debe tener ocho caracteres, una may\u{fa}scula, un n\u{fa}mero y un car\u{e1}cter especial."
);
msg!(
    account_bad_phone,
    "Cellphone number incorrectly formatted or doesn't contain international code.",
    "El n\u{fa}mero de m\u{f3}vil no tiene un formato correcto o no contiene el prefijo internacional."
);
msg!(
    account_password_mismatch,
    "Passwords do not match. Please re-enter your password.",
    "Las contrase\u{f1}as no coinciden. Vuelve a introducir la contrase\u{f1}a."
);
msg!(
    account_username_taken,
    "This username is already taken. Please choose a different one.",
    "Este usuario ya existe. Elige otro."
);
msg!(account_registered, "Registration successful.", "Registro completado.");
msg!(
    account_login_failed,
    "Username or password incorrect, please try again.",
    "Usuario o contrase\u{f1}a incorrectos, int\u{e9}ntalo de nuevo."
);
msg!(account_welcome, "Welcome", "Bienvenido");
msg!(
    account_welcome_tail,
    "it is great to see you again.",
    "qu\u{e9} alegr\u{ed}a verte de nuevo."
);

// ── Field labels ─────────────────────────────────────────────────

msg!(field_full_name, "Full Name", "Nombre completo");
msg!(field_username, "Username", "Usuario");
msg!(field_phone, "Phone Number", "N\u{fa}mero de tel\u{e9}fono");
msg!(field_password, "Password", "Contrase\u{f1}a");
msg!(field_confirm_password, "Confirm Password", "Confirmar contrase\u{f1}a");

// ── Errors ───────────────────────────────────────────────────────

msg!(
    err_write_failed,
    "Could not save messages",
    "No se pudieron guardar los mensajes"
);
