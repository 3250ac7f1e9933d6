// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use std::io::stdin;
use std::io::stdout;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use clap::Subcommand;
use tokio::select;
use tokio::signal;
use tokio::task::spawn_blocking;
use vocab_core::clock::Clock;
use vocab_core::clock::SystemClock;
use vocab_core::error::Fallible;
use vocab_core::error::fail;
use vocab_core::rng::TinyRng;
use vocab_core::types::entry::WordId;
use vocab_core::types::entry::WordPatch;
use vocab_core::types::level::Level;

use crate::cmd::OutputFormat;
use crate::cmd::add::NewWord;
use crate::cmd::add::add_word;
use crate::cmd::delete::delete_word;
use crate::cmd::edit::edit_word;
use crate::cmd::list::list_words;
use crate::cmd::practice::practice;
use crate::cmd::session::run_session;
use crate::cmd::show::show_word;
use crate::cmd::stats::print_stats;
use crate::config::Config;
use crate::db::Database;
use crate::prompt::TerminalPrompter;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the SQLite database. Overrides VOCAB_DB and the config file. Default is data/vocab.db.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Path to a TOML config file. By default, vocab.toml in the working directory is used if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a word. It is due for review immediately.
    Add {
        /// The word to learn.
        word: String,
        #[arg(short, long)]
        translation: Option<String>,
        /// An example sentence using the word.
        #[arg(short, long)]
        example: Option<String>,
        /// One of beginner, intermediate, advanced.
        #[arg(short, long)]
        level: Option<Level>,
    },
    /// List all words, sorted alphabetically.
    List {
        /// Which output format to use.
        #[arg(long, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show a single word and its review state.
    Show { id: WordId },
    /// Change some fields of a word. Its review state is kept.
    Edit {
        id: WordId,
        #[arg(short, long)]
        word: Option<String>,
        #[arg(short, long)]
        translation: Option<String>,
        #[arg(short, long)]
        example: Option<String>,
        #[arg(short, long)]
        level: Option<Level>,
    },
    /// Delete a word.
    Delete { id: WordId },
    /// Quiz a single random word that is due today.
    Practice,
    /// Review the words due today, one after another.
    Session {
        /// Maximum number of words to review. Default is 10, or session_size from the config file.
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// Print vocabulary statistics and today's progress.
    Stats {
        /// Which output format to use.
        #[arg(long, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Add { .. } => "add",
            Command::List { .. } => "list",
            Command::Show { .. } => "show",
            Command::Edit { .. } => "edit",
            Command::Delete { .. } => "delete",
            Command::Practice => "practice",
            Command::Session { .. } => "session",
            Command::Stats { .. } => "stats",
        }
    }

    /// What to print when the user interrupts the command.
    fn interrupted_message(&self) -> &'static str {
        match self {
            Command::Practice | Command::Session { .. } => "Session cancelled.",
            _ => "Cancelled.",
        }
    }
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Cli = Cli::parse();
    let name = cli.command.name();
    let interrupted_message = cli.command.interrupted_message();
    // Commands block on the terminal, so they run off the async workers and
    // Ctrl+C is watched here.
    let task = spawn_blocking(move || run(cli));
    select! {
        joined = task => match joined {
            Ok(result) => result.map_err(|e| e.in_command(name)),
            Err(e) => fail(format!("{name}: {e}")),
        },
        _ = interrupted() => {
            // The blocking task may be stuck reading stdin, which would keep
            // the runtime from shutting down.
            println!();
            println!("{interrupted_message}");
            exit(0)
        }
    }
}

async fn interrupted() {
    if let Err(e) = signal::ctrl_c().await {
        log::warn!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
}

fn run(cli: Cli) -> Fallible<()> {
    let config = Config::from_env(cli.db, cli.config.as_deref())?;
    log::debug!("Using database {}", config.database.display());
    let db = Database::open(&config.database)?;
    let clock = SystemClock;
    let mut out = stdout().lock();
    match cli.command {
        Command::Add {
            word,
            translation,
            example,
            level,
        } => {
            let new = NewWord {
                word,
                translation,
                example,
                level,
            };
            add_word(&db, clock.today(), &new, &mut out)?;
            Ok(())
        }
        Command::List { format } => list_words(&db, format, &mut out),
        Command::Show { id } => show_word(&db, id, &mut out),
        Command::Edit {
            id,
            word,
            translation,
            example,
            level,
        } => {
            let patch = WordPatch {
                word,
                translation,
                example,
                level,
            };
            edit_word(&db, id, &patch, &mut out)
        }
        Command::Delete { id } => delete_word(&db, id, &mut out),
        Command::Practice => {
            let mut prompter = TerminalPrompter::new(stdin().lock(), out);
            let mut rng = TinyRng::from_time();
            practice(&db, &clock, &mut rng, &mut prompter)?;
            Ok(())
        }
        Command::Session { count } => {
            let mut prompter = TerminalPrompter::new(stdin().lock(), out);
            let count = count.unwrap_or(config.session_size);
            run_session(&db, &db, &clock, count, &mut prompter)?;
            Ok(())
        }
        Command::Stats { format } => print_stats(&db, &db, clock.today(), format, &mut out),
    }
}
