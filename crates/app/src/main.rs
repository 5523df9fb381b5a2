mod terminal;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use catemino_core::model::{CategoryKey, GameSettings};
use services::{AppServices, Clock, GameDriver};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::terminal::{BellObserver, SoundSwitch, Terminal};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidSeconds { raw: String },
    InvalidSeed { raw: String },
    InvalidCategory { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidSeconds { raw } => {
                write!(f, "invalid --seconds value: {raw} (expected 5-120)")
            }
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidCategory { raw } => {
                write!(f, "invalid --category value: {raw} (cultura, futbol, rodeo)")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

#[derive(Debug)]
struct Args {
    db_url: String,
    settings: GameSettings,
    seed: Option<u64>,
    player: Option<String>,
    category: Option<CategoryKey>,
    mute: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--db <sqlite_url>] [--seconds <5-120>] [--seed <u64>] [--name <player>] [--category <key>] [--mute]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:catemino.sqlite3");
    eprintln!("  --seconds 15");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CATEMINO_DB_URL, CATEMINO_SECONDS, CATEMINO_SEED, CATEMINO_PLAYER, RUST_LOG");
}

fn parse_seconds(raw: String) -> Result<GameSettings, ArgsError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .and_then(|seconds| GameSettings::default().with_seconds_per_question(seconds).ok())
        .ok_or(ArgsError::InvalidSeconds { raw })
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidSeed { raw })
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("CATEMINO_DB_URL")
            .ok()
            .map_or_else(|| normalize_sqlite_url("sqlite:catemino.sqlite3".into()), normalize_sqlite_url);
        let mut settings = match std::env::var("CATEMINO_SECONDS") {
            Ok(raw) => parse_seconds(raw)?,
            Err(_) => GameSettings::default(),
        };
        let mut seed = std::env::var("CATEMINO_SEED").ok().map(parse_seed).transpose()?;
        let mut player = std::env::var("CATEMINO_PLAYER")
            .ok()
            .filter(|name| !name.trim().is_empty());
        let mut category = None;
        let mut mute = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--seconds" => settings = parse_seconds(require_value(args, "--seconds")?)?,
                "--seed" => seed = Some(parse_seed(require_value(args, "--seed")?)?),
                "--name" => player = Some(require_value(args, "--name")?),
                "--category" => {
                    let value = require_value(args, "--category")?;
                    let parsed = value
                        .parse::<CategoryKey>()
                        .map_err(|_| ArgsError::InvalidCategory { raw: value.clone() })?;
                    category = Some(parsed);
                }
                "--mute" => mute = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            settings,
            seed,
            player,
            category,
            mute,
        })
    }
}

/// Turns `path`, `sqlite:path` or `sqlite://path` into an absolute `sqlite://` URL.
/// In-memory URLs pass through untouched.
fn normalize_sqlite_url(raw: String) -> String {
    let raw = raw.trim();
    if raw == "sqlite::memory:" || raw.contains("mode=memory") {
        return raw.to_owned();
    }

    let path = raw
        .strip_prefix("sqlite://")
        .or_else(|| raw.strip_prefix("sqlite:"))
        .unwrap_or(raw);
    let absolute = std::path::absolute(path).unwrap_or_else(|_| PathBuf::from(path));
    format!("sqlite://{}", absolute.display())
}

/// Creates the directory holding the database file. `SQLite` creates the file itself.
fn ensure_db_dir(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = db_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    if let Some(parent) = Path::new(path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

// Logs go to stderr so they never interleave with the board on stdout.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();
    info!(db = %args.db_url, seconds = args.settings.seconds_per_question(), "starting catemino");

    ensure_db_dir(&args.db_url)?;
    let services = AppServices::new_sqlite(&args.db_url, Clock::system()).await?;

    let mut game = services.game_service(args.settings, args.seed);
    if let Some(name) = args.player {
        game = game.with_player_name(name);
    }
    let sound = SoundSwitch::new(!args.mute);
    game = game.with_observer(Arc::new(BellObserver::new(sound.clone())));

    let (handle, driver) = GameDriver::spawn(game);
    Terminal::new(handle, services.bank(), services.leaderboard(), sound)
        .run(args.category)
        .await?;
    driver.await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_string());
        Args::parse(&mut iter)
    }

    #[test]
    fn flags_override_defaults() {
        let args = parse(&[
            "--db",
            "sqlite::memory:",
            "--seconds",
            "30",
            "--seed",
            "7",
            "--name",
            "Rosa",
            "--category",
            "rodeo",
            "--mute",
        ])
        .unwrap();
        assert_eq!(args.db_url, "sqlite::memory:");
        assert_eq!(args.settings.seconds_per_question(), 30);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.player.as_deref(), Some("Rosa"));
        assert_eq!(args.category, Some(CategoryKey::Rodeo));
        assert!(args.mute);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(parse(&["--seconds", "2"]), Err(ArgsError::InvalidSeconds { .. })));
        assert!(matches!(parse(&["--seed", "x"]), Err(ArgsError::InvalidSeed { .. })));
        assert!(matches!(parse(&["--category", "tenis"]), Err(ArgsError::InvalidCategory { .. })));
        assert!(matches!(parse(&["--db"]), Err(ArgsError::MissingValue { flag: "--db" })));
        assert!(matches!(parse(&["--bogus"]), Err(ArgsError::UnknownArg(_))));
    }

    #[test]
    fn relative_sqlite_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/catemino.sqlite3".into());
        assert!(url.starts_with("sqlite://"));
        assert!(url.ends_with("data/catemino.sqlite3"));
        assert!(Path::new(url.trim_start_matches("sqlite://")).is_absolute());
        assert_eq!(normalize_sqlite_url(" sqlite::memory: ".into()), "sqlite::memory:");
    }

    #[test]
    fn memory_urls_need_no_directory() {
        assert!(ensure_db_dir("sqlite::memory:").is_ok());
        assert!(ensure_db_dir("sqlite://").is_err());
    }
}
