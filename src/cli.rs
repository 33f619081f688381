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

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

use crate::cmd::add::add_card;
use crate::cmd::delete::delete_card;
use crate::cmd::due::print_due;
use crate::cmd::focus::print_focus_sessions;
use crate::cmd::focus::record_focus;
use crate::cmd::list::print_cards;
use crate::cmd::review::review_card;
use crate::cmd::serve::server::ServerConfig;
use crate::cmd::serve::server::start_server;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::config::Config;
use crate::db::Database;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file. By default, `studyhub.toml` in the current directory is used if it exists.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Path to the SQLite database. Overrides the configuration file.
    #[arg(long, global = true)]
    database: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Author a new flashcard.
    Add {
        /// The course the card belongs to.
        #[arg(long)]
        course: String,
        /// The question side.
        #[arg(long)]
        front: String,
        /// The answer side.
        #[arg(long)]
        back: String,
        /// The material the card was written from.
        #[arg(long)]
        source: Option<String>,
    },
    /// List flashcards in creation order.
    List {
        /// Only list cards from this course.
        #[arg(long)]
        course: Option<String>,
    },
    /// List the cards due for review, most overdue first.
    Due {
        /// Maximum number of cards to list. Overrides the configuration file.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Record a review of a card.
    Review {
        /// The card's ID.
        id: i64,
        /// Recall quality, from 0 (total blackout) to 5 (perfect).
        #[arg(allow_negative_numbers = true)]
        quality: i64,
    },
    /// Delete a card and its review history.
    Delete {
        /// The card's ID.
        id: i64,
    },
    /// Print collection statistics.
    Stats {
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
        /// How many days to include in the due forecast. Overrides the configuration file.
        #[arg(long)]
        days: Option<u32>,
    },
    /// Commands relating to focus sessions.
    Focus {
        #[command(subcommand)]
        command: FocusCommand,
    },
    /// Serve the JSON API.
    Serve {
        /// The host address to bind to. Overrides the configuration file.
        #[arg(long)]
        host: Option<String>,
        /// The port to use for the web server. Overrides the configuration file.
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Subcommand)]
enum FocusCommand {
    /// Record a finished focus session.
    Record {
        /// Length of the session in minutes.
        minutes: u32,
        /// The session was cut short.
        #[arg(long)]
        interrupted: bool,
    },
    /// List recorded focus sessions, newest first.
    List {
        /// Maximum number of sessions to list.
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Cli = Cli::parse();
    let mut config: Config = Config::load(cli.config.as_deref())?;
    if let Some(database) = cli.database {
        config.database = database;
    }
    let open = || Database::new(&config.database);
    match cli.command {
        Command::Add {
            course,
            front,
            back,
            source,
        } => add_card(&open()?, course, front, back, source),
        Command::List { course } => print_cards(&open()?, course.as_deref()),
        Command::Due { limit } => print_due(&open()?, limit.or(config.due_limit)),
        Command::Review { id, quality } => review_card(&open()?, id, quality),
        Command::Delete { id } => delete_card(&open()?, id),
        Command::Stats { format, days } => print_stats(
            &open()?,
            format,
            days.unwrap_or(config.forecast_days),
        ),
        Command::Focus { command } => match command {
            FocusCommand::Record {
                minutes,
                interrupted,
            } => record_focus(&open()?, minutes, interrupted),
            FocusCommand::List { limit } => print_focus_sessions(&open()?, limit),
        },
        Command::Serve { host, port } => {
            let server_config = ServerConfig {
                database: config.database.clone(),
                host: host.unwrap_or_else(|| config.host.clone()),
                port: port.unwrap_or(config.port),
                forecast_days: config.forecast_days,
            };
            start_server(server_config).await
        }
    }
}
