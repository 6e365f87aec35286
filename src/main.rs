//! Terminal front end for Study Buddy.
//!
//! `studybuddy study` runs a session in the foreground. While it runs,
//! type `stop` to end it, or `y`/`n` to answer a distraction prompt.

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "the terminal is this binary's user interface"
)]

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::{debug, info};
use std::io::BufRead;
use std::process::ExitCode;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use studybuddy_lib::blacklist::BlacklistProvider;
use studybuddy_lib::clock::SystemClock;
use studybuddy_lib::config::{default_config_path, AppConfig};
use studybuddy_lib::constants::{DATE_KEY_FORMAT, LONG_DATE_FORMAT};
use studybuddy_lib::foreground::{DistractionPrompt, Foreground};
use studybuddy_lib::platform::NativeSampler;
use studybuddy_lib::session::{ControllerParts, DecisionReply, SessionController, SessionMode, SessionSummary};
use studybuddy_lib::store::FileStore;
use studybuddy_lib::{safe_lock, AppError, Result};

/// How often the input loop checks whether the session ended on its own
const INPUT_POLL: Duration = Duration::from_millis(200);

#[derive(Parser, Debug)]
#[command(name = "studybuddy")]
#[command(about = "Earn pet coins for undistracted study time", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start a study session and keep it in the foreground
    Study {
        /// Session mode (focus, casual)
        #[arg(short, long, default_value = "focus")]
        mode: SessionMode,
    },

    /// Show the coin balance
    Balance,

    /// Show the record of one day (default: today)
    Review {
        /// Date in MM-DD-YYYY form
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Spend coins from the wallet
    Spend {
        amount: u64,
    },

    /// Show the pet and its cosmetics
    Pet,
}

/// Prints session events and holds the outstanding prompt until the user
/// answers it on stdin.
#[derive(Default)]
struct TerminalForeground {
    pending: Mutex<Option<DecisionReply>>,
}

impl TerminalForeground {
    fn take_pending(&self) -> Option<DecisionReply> {
        safe_lock(&self.pending, "Pending prompt").take()
    }
}

impl Foreground for TerminalForeground {
    fn report_status(&self, text: &str) {
        println!("{text}");
    }

    fn prompt_yes_no(&self, prompt: DistractionPrompt, reply: DecisionReply) {
        println!("{}: {}", prompt.title, prompt.body);
        println!("  y = {}", prompt.yes_label);
        println!("  n = {}", prompt.no_label);
        *safe_lock(&self.pending, "Pending prompt") = Some(reply);
    }

    fn report_final_summary(&self, summary: &SessionSummary) {
        println!("{summary}");
    }
}

fn main() -> ExitCode {
    // Reads RUST_LOG on top of an info default
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = default_config_path()?;
    let config = AppConfig::load(&config_path)?;
    if !config_path.exists() {
        config.save(&config_path)?;
        info!("Wrote default config to {}", config_path.display());
    }
    let store = FileStore::open(config.data_dir()?)?;
    info!("Using data directory {}", store.root().display());

    let foreground = Arc::new(TerminalForeground::default());
    let shared_foreground: Arc<dyn Foreground> = Arc::<TerminalForeground>::clone(&foreground);
    let blacklist = config.blacklist();
    debug!("Watching for {:?}", blacklist.names());

    let mut controller = SessionController::new(ControllerParts {
        store: Arc::new(store),
        clock: Arc::new(SystemClock),
        sampler: Arc::new(NativeSampler::new()),
        blacklist: Arc::new(blacklist),
        foreground: shared_foreground,
        poll_interval: config.poll_interval(),
    })?;

    match cli.command {
        Commands::Study { mode } => study(&mut controller, &foreground, mode),
        Commands::Balance => {
            println!("Balance: {} Coins", controller.balance());
            Ok(())
        }
        Commands::Review { date: None } => {
            println!("{}", controller.today()?);
            Ok(())
        }
        Commands::Review { date: Some(text) } => {
            let date = parse_date(&text)?;
            match controller.review(date)? {
                Some(record) => println!("{record}"),
                None => println!("No information for {}", date.format(LONG_DATE_FORMAT)),
            }
            Ok(())
        }
        Commands::Spend { amount } => {
            if controller.spend(amount)? {
                println!("Spent {amount} Coins. Balance: {} Coins", controller.balance());
            } else {
                println!("Not enough coins. Balance: {} Coins", controller.balance());
            }
            Ok(())
        }
        Commands::Pet => {
            println!("{}", controller.pet());
            Ok(())
        }
    }
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_KEY_FORMAT).map_err(|e| AppError::InvalidInput {
        field: "date",
        reason: format!("expected MM-DD-YYYY ({e})"),
    })
}

/// Run one session, feeding stdin lines to it until it ends.
fn study(controller: &mut SessionController, foreground: &TerminalForeground, mode: SessionMode) -> Result<()> {
    let (lines_tx, lines_rx) = mpsc::channel::<String>();
    thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines().map_while(std::result::Result::ok) {
                if lines_tx.send(line).is_err() {
                    break;
                }
            }
        })
        .map_err(AppError::Spawn)?;

    controller.start(mode)?;
    println!("Type 'stop' to end the session.");

    loop {
        if !controller.is_running() {
            break;
        }
        match lines_rx.recv_timeout(INPUT_POLL) {
            Ok(line) => match line.trim().to_ascii_lowercase().as_str() {
                "stop" => {
                    controller.stop()?;
                    return Ok(());
                }
                "y" | "yes" => answer(foreground, true),
                "n" | "no" => answer(foreground, false),
                "" => {}
                other => println!("Unknown input '{other}'. Type 'stop', 'y' or 'n'."),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    controller.shutdown()?;
    Ok(())
}

fn answer(foreground: &TerminalForeground, keep_studying: bool) {
    let Some(reply) = foreground.take_pending() else {
        println!("Nothing to answer.");
        return;
    };
    let accepted = if keep_studying { reply.resume() } else { reply.terminate() };
    if !accepted {
        debug!("Prompt was already settled");
    }
}
