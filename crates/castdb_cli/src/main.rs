//! Command-line front end for the cast database.
//!
//! # Responsibility
//! - Map command-line flags and environment onto `castdb_core` calls.
//! - Print results as JSON and exit non-zero on any repository error.
//!
//! Usage: castdb [--db PATH] [--populate] <get|store|delete|list> ...

use castdb_core::{
    default_log_level, init_logging, open_db, populate, Character, CharacterFilter,
    CharacterRepository, SqliteCharacterRepository,
};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::PathBuf;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Debug, Parser)]
#[command(name = "castdb")]
#[command(about = "Query and edit the characters of a cast database", long_about = None)]
struct Cli {
    /// SQLite database file, created when missing
    #[arg(long, env = "CASTDB_DB", default_value = "castdb.sqlite3")]
    db: PathBuf,

    /// Load the bundled Holy Grail cast before running the command
    #[arg(long)]
    populate: bool,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "CASTDB_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off without it
    #[arg(long, env = "CASTDB_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print one character as JSON
    Get { id: i64 },
    /// Insert a character, or update it when --id is given
    Store(StoreArgs),
    /// Delete one character
    Delete { id: i64 },
    /// Print matching characters as JSON
    List(ListArgs),
}

#[derive(Debug, Args)]
struct StoreArgs {
    #[arg(long, default_value_t = 0)]
    id: i64,

    #[arg(long)]
    actor_id: i64,

    #[arg(long)]
    name: String,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Exact actor id; overrides --actor-name
    #[arg(long, default_value_t = 0)]
    actor_id: i64,

    /// Case-insensitive substring of the actor name
    #[arg(long, default_value = "")]
    actor_name: String,

    /// Case-insensitive substring of the character name
    #[arg(long, default_value = "")]
    name: String,

    /// Scene the character appears in
    #[arg(long, default_value_t = 0)]
    scene: i64,
}

impl From<ListArgs> for CharacterFilter {
    fn from(args: ListArgs) -> Self {
        CharacterFilter::default()
            .with_actor_id(args.actor_id)
            .with_actor_name(args.actor_name)
            .with_name(args.name)
            .with_scene_number(args.scene)
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let mut conn = open_db(&cli.db)?;
    if cli.populate {
        populate(&mut conn)?;
    }
    let repo = SqliteCharacterRepository::try_new(&conn)?;

    match cli.command {
        Command::Get { id } => match repo.get_character(id)? {
            Some(character) => println!("{}", serde_json::to_string_pretty(&character)?),
            None => return Err(format!("no character with id {id}").into()),
        },
        Command::Store(args) => {
            let mut character = Character {
                id: args.id,
                actor_id: args.actor_id,
                name: args.name,
            };
            let id = repo.store_character(&mut character)?;
            info!("event=cli_store module=cli status=ok id={id}");
            println!("{}", serde_json::to_string_pretty(&character)?);
        }
        Command::Delete { id } => {
            repo.delete_character(id)?;
            info!("event=cli_delete module=cli status=ok id={id}");
            println!("deleted {id}");
        }
        Command::List(args) => {
            let filter = CharacterFilter::from(args);
            let characters = repo.list_characters(Some(&filter))?;
            println!("{}", serde_json::to_string_pretty(&characters)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use castdb_core::CharacterFilter;
    use clap::Parser;

    #[test]
    fn list_arguments_map_onto_filter() {
        let cli = Cli::try_parse_from([
            "castdb",
            "--db",
            "grail.sqlite3",
            "list",
            "--actor-name",
            "Sandy",
            "--scene",
            "3",
        ])
        .unwrap();

        let Command::List(args) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(
            CharacterFilter::from(args),
            CharacterFilter::default()
                .with_actor_name("Sandy")
                .with_scene_number(3)
        );
    }

    #[test]
    fn store_requires_actor_and_name() {
        assert!(Cli::try_parse_from(["castdb", "store", "--name", "Zoot"]).is_err());

        let cli =
            Cli::try_parse_from(["castdb", "store", "--actor-id", "8", "--name", "Zoot"]).unwrap();
        let Command::Store(args) = cli.command else {
            panic!("expected store command");
        };
        assert_eq!(args.id, 0);
        assert_eq!(args.actor_id, 8);
    }
}
