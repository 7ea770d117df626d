//! CLI entry point for `QuickChat`.

use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};

use quickchat::compose::{self, ComposeSettings};
use quickchat::config::Config;
use quickchat::i18n;
use quickchat::model::disposition::Disposition;
use quickchat::model::message::Message;
use quickchat::shell::{self, Console};
use quickchat::store::{report, MessageStore, StorePaths};

#[derive(Parser)]
#[command(name = "quickchat", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory holding the sent-messages and drafts files
    #[arg(long, global = true, value_name = "DIR", env = "QUICKCHAT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Language (en, es). Defaults to system locale.
    #[arg(long, value_name = "LANG")]
    lang: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive menu
    Chat {
        /// Number of messages that may be composed in this session
        #[arg(long)]
        quota: Option<usize>,
    },
    /// Compose and commit one message
    Send {
        recipient: String,
        message: String,
        /// send, store or disregard (or 1, 2, 3)
        #[arg(short, long, default_value = "send")]
        action: String,
        /// Sender name (defaults to the configured default sender)
        #[arg(long)]
        sender: Option<String>,
    },
    /// List sender and recipient of every sent message
    Pairs,
    /// Show the longest sent message
    Longest,
    /// Search a sent message by ID
    Find {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Search sent messages by recipient
    Recipient {
        recipient: String,
        #[arg(long)]
        json: bool,
    },
    /// Delete a sent message by hash
    Delete { hash: String },
    /// Load and list stored drafts
    Drafts,
    /// Show the full report of sent messages
    Report {
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Write the current settings to the config file
    Config,
    /// Generate a man page
    Manpage,
}

/// Detect language early from --lang arg or system env, before clap processes --help.
fn detect_lang_early() -> i18n::Lang {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--lang" {
            if let Some(lang) = args.get(i + 1).and_then(|code| i18n::Lang::from_code(code)) {
                return lang;
            }
        }
        if let Some(lang) = args[i]
            .strip_prefix("--lang=")
            .and_then(i18n::Lang::from_code)
        {
            return lang;
        }
    }
    i18n::detect_system_lang()
}

/// Build a localized clap Command using i18n strings.
fn build_localized_command() -> clap::Command {
    let mut cmd = Cli::command()
        .about(i18n::app_about())
        .long_about(i18n::app_long_about())
        .after_help(i18n::app_after_help());

    let subcommands: Vec<clap::Command> = cmd
        .get_subcommands()
        .map(|sub| {
            let about = match sub.get_name() {
                "chat" => i18n::help_cmd_chat(),
                "send" => i18n::help_cmd_send(),
                "pairs" => i18n::help_cmd_pairs(),
                "longest" => i18n::help_cmd_longest(),
                "find" => i18n::help_cmd_find(),
                "recipient" => i18n::help_cmd_recipient(),
                "delete" => i18n::help_cmd_delete(),
                "drafts" => i18n::help_cmd_drafts(),
                "report" => i18n::help_cmd_report(),
                "completions" => i18n::help_cmd_completions(),
                "config" => i18n::help_cmd_config(),
                "manpage" => i18n::help_cmd_manpage(),
                _ => return sub.clone(),
            };
            sub.clone().about(about)
        })
        .collect();

    for sub in subcommands {
        cmd = cmd.mut_subcommand(sub.get_name(), |_| sub.clone());
    }

    cmd
}

fn main() -> anyhow::Result<()> {
    i18n::set_lang(detect_lang_early());

    let matches = build_localized_command().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    let mut config = quickchat::config::load_config();
    if let Some(dir) = cli.data_dir {
        config.general.data_dir = Some(dir);
    }

    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level);

    match cli.command {
        None => cmd_chat(&config, None),
        Some(Commands::Chat { quota }) => cmd_chat(&config, quota),
        Some(Commands::Send {
            recipient,
            message,
            action,
            sender,
        }) => cmd_send(&config, &recipient, &message, &action, sender.as_deref()),
        Some(Commands::Pairs) => {
            println!("{}", report::sender_recipient_pairs(&open_store(&config)));
            Ok(())
        }
        Some(Commands::Longest) => {
            println!("{}", report::longest(&open_store(&config)));
            Ok(())
        }
        Some(Commands::Find { id, json }) => {
            let store = open_store(&config);
            if json {
                let found: Vec<&Message> = store.find_by_id(&id).into_iter().collect();
                print_messages_json(&found)
            } else {
                println!("{}", report::by_id(&store, &id));
                Ok(())
            }
        }
        Some(Commands::Recipient { recipient, json }) => {
            let store = open_store(&config);
            if json {
                print_messages_json(&store.find_by_recipient(&recipient))
            } else {
                println!("{}", report::by_recipient(&store, &recipient));
                Ok(())
            }
        }
        Some(Commands::Delete { hash }) => {
            let mut store = open_store(&config);
            let deleted = store.delete_by_hash(&hash)?;
            println!("{}", report::delete_status(deleted));
            Ok(())
        }
        Some(Commands::Drafts) => {
            println!("{}", report::drafts(&open_store(&config)));
            Ok(())
        }
        Some(Commands::Report { json }) => {
            let store = open_store(&config);
            if json {
                let all: Vec<&Message> = store.sent().iter().collect();
                print_messages_json(&all)
            } else {
                println!("{}", report::full_report(&store));
                Ok(())
            }
        }
        Some(Commands::Completions { shell }) => cmd_completions(shell),
        Some(Commands::Config) => {
            let path = quickchat::config::save_config(&config)?;
            println!("{}", path.display());
            Ok(())
        }
        Some(Commands::Manpage) => cmd_manpage(),
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let log_dir = quickchat::config::log_dir();
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "quickchat.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

fn open_store(config: &Config) -> MessageStore {
    let dir = quickchat::config::data_dir(config);
    MessageStore::open(
        StorePaths::in_dir(&dir, &config.storage),
        &config.general.default_sender,
    )
}

/// Run the interactive menu on stdin/stdout.
fn cmd_chat(config: &Config, quota: Option<usize>) -> anyhow::Result<()> {
    let mut store = open_store(config);
    let stdin = std::io::stdin();
    let mut console = Console::new(stdin.lock(), std::io::stdout());
    shell::run_shell(&mut store, &mut console, config, quota);
    Ok(())
}

/// Compose one message from the command line.
fn cmd_send(
    config: &Config,
    recipient: &str,
    message: &str,
    action: &str,
    sender: Option<&str>,
) -> anyhow::Result<()> {
    let disposition: Disposition = action.parse()?;
    let mut store = open_store(config);
    let settings = ComposeSettings::from_config(config, sender);
    let (outcome, message) =
        compose::compose(&mut store, &settings, recipient, message, disposition)?;
    println!("{}", compose::commit_report(outcome, &message));
    Ok(())
}

/// Print messages as JSON using the on-disk key names.
fn print_messages_json(messages: &[&Message]) -> anyhow::Result<()> {
    let items: Vec<serde_json::Value> = messages
        .iter()
        .map(|m| {
            serde_json::json!({
                "MessageID": m.message_id(),
                "Sender": m.sender(),
                "MessageHash": m.hash(),
                "Recipient": m.recipient(),
                "Message": m.text(),
                "sequence": m.sequence(),
            })
        })
        .collect();

    let output = serde_json::json!({
        "result_count": items.len(),
        "results": items,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "quickchat", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}
