use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use coding_mentor::config::{HintMode, SettingsRecord};
use coding_mentor::messaging::{MentorContext, Port, Request, Response, mailbox};
use coding_mentor::problem::{self, Platform};
use coding_mentor::stats::{Dashboard, PopupSummary};
use coding_mentor::storage::Store;
use coding_mentor::worker::{CannedMentor, LogNotifier, Worker};
use coding_mentor::{App, Config, mentor};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mentor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a saved problem page in the mentor widget
    Open {
        /// Saved HTML of the problem page
        page: PathBuf,
        /// URL the page was saved from
        #[arg(short, long)]
        url: String,
    },
    /// Print the worker's hints for a saved problem page
    Hints {
        page: PathBuf,
        #[arg(short, long)]
        url: String,
    },
    /// Ask the mentor a question
    Ask {
        question: String,
        /// Problem the question is about
        #[arg(long)]
        title: Option<String>,
    },
    /// Show today's stats and settings
    Stats {
        /// Page the popup would be opened on
        #[arg(short, long)]
        url: Option<String>,
    },
    /// Show the learning dashboard
    Dashboard,
    /// View or change mentor settings
    Settings {
        /// click or timed
        #[arg(long)]
        hint_mode: Option<HintMode>,
        /// Seconds between automatic hints in timed mode
        #[arg(long)]
        timed_delay: Option<u64>,
        #[arg(long)]
        notifications: Option<bool>,
        #[arg(long)]
        track_progress: Option<bool>,
    },
    /// Mark a problem solved
    Solved {
        /// Problem id, as shown by `mentor hints`
        problem_id: String,
    },
    /// Write default settings
    Install,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "coding_mentor=info".into());

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory {:?}", parent))?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(std::sync::Mutex::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}

/// Start a worker for a one-shot command
fn spawn_worker(config: &Config, store: &Store) -> Result<Port> {
    let (port, inbox) = mailbox("worker");
    let backend = CannedMentor::new(config.hint_delay(), config.answer_delay());
    let mut worker = Worker::new(store.clone(), backend, LogNotifier);
    worker.on_installed()?;
    worker.spawn(inbox);
    Ok(port)
}

fn read_page(page: &Path) -> Result<String> {
    std::fs::read_to_string(page).with_context(|| format!("Failed to read page {:?}", page))
}

fn print_wrapped(text: &str) {
    let options = textwrap::Options::new(78).initial_indent("   ").subsequent_indent("   ");
    println!("{}", textwrap::fill(text, options));
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    // The TUI owns the terminal, so it only ever logs to a file
    match &cli.command {
        Commands::Open { .. } if config.log_to_file => init_logging(Some(&Config::log_path()?))?,
        Commands::Open { .. } => {}
        _ => init_logging(None)?,
    }

    let store = Store::open_default()?;

    match cli.command {
        Commands::Open { page, url } => {
            let html = read_page(&page)?;
            let mut app = App::new(config, store, url, html)?;
            app.run().await?;
        }
        Commands::Hints { page, url } => {
            let html = read_page(&page)?;
            let record = problem::extract(Platform::detect(&url), &html);
            if !record.is_detected() {
                bail!("No problem found in {:?}", page);
            }
            println!("{} ({})", record.title, problem::problem_id(&url, &record));

            let worker = spawn_worker(&config, &store)?;
            let reply = worker.request(Request::GetProblemHints { problem_data: record }).await?;
            let Response::Hints { hints } = reply else {
                bail!("Unexpected reply from the worker");
            };
            for hint in hints.iter() {
                println!("\n{}. {}", hint.level, hint.title);
                print_wrapped(&hint.content);
            }
        }
        Commands::Ask { question, title } => {
            let Some(question) = mentor::validate_question(&question) else {
                bail!("Nothing to ask");
            };
            let worker = spawn_worker(&config, &store)?;
            let request = Request::AskMentorQuestion {
                question: question.to_string(),
                context: MentorContext { problem_title: title, url: None },
            };
            match worker.request(request).await? {
                Response::MentorAnswer { response } => print_wrapped(&response),
                _ => bail!("Unexpected reply from the worker"),
            }
        }
        Commands::Stats { url } => {
            let platform = url.as_deref().map(Platform::detect).unwrap_or_default();
            let summary = PopupSummary::load(&store, platform, None, Local::now().date_naive());
            println!("Platform:        {}", summary.platform);
            println!("Active problem:  {}", summary.active_problem);
            println!("Hints today:     {}", summary.hints_today);
            println!("Problems solved: {}", summary.problems_solved);
            println!("Progress:        {:.0}%", summary.learning_progress);
            println!("{}", summary.progress_message());
        }
        Commands::Dashboard => {
            let dashboard = Dashboard::load(&store, Local::now().date_naive());
            println!("Problems solved:  {}", dashboard.totals.problems_solved);
            println!("Hints used:       {}", dashboard.totals.total_hints);
            println!("Questions asked:  {}", dashboard.totals.questions_asked);
            println!("Time spent:       {}m", dashboard.totals.total_time / 60);
            println!("Efficiency:       {:.0}%", dashboard.efficiency);
            println!("Study streak:     {} days", dashboard.streak);
            println!(
                "This week:        {} solved, {} hints, {:.0}% efficiency",
                dashboard.weekly.problems, dashboard.weekly.hints, dashboard.weekly.efficiency
            );

            println!("\nSkills");
            for skill in &dashboard.skills {
                println!("  {:<22}{:>4} ({:.0}%)", skill.area.label(), skill.count, skill.percent);
            }

            println!("\nAchievements");
            for achievement in &dashboard.achievements {
                let mark = if achievement.unlocked { "x" } else { " " };
                println!("  [{}] {}: {}", mark, achievement.name, achievement.description);
            }

            if !dashboard.recent.is_empty() {
                println!("\nRecent activity");
                for event in &dashboard.recent {
                    let title = event.problem_title.as_deref().unwrap_or("Unknown problem");
                    println!("  Hint {} on {}", event.hint_level, title);
                }
            }

            if !dashboard.problems.is_empty() {
                println!("\nProblems");
                for progress in &dashboard.problems {
                    let mark = if progress.solved { "x" } else { " " };
                    let title =
                        if progress.title.is_empty() { &progress.problem_id } else { &progress.title };
                    println!(
                        "  [{}] {:<32} {} hints, {} attempts, {}m",
                        mark,
                        title,
                        progress.hints_used,
                        progress.attempts,
                        progress.time_spent_secs / 60
                    );
                }
            }
        }
        Commands::Settings { hint_mode, timed_delay, notifications, track_progress } => {
            let mut settings = SettingsRecord::load(&store);
            let changed = hint_mode.is_some()
                || timed_delay.is_some()
                || notifications.is_some()
                || track_progress.is_some();

            if let Some(mode) = hint_mode {
                settings.hint_mode = mode;
            }
            if let Some(delay) = timed_delay {
                settings.timed_delay = delay;
            }
            if let Some(flag) = notifications {
                settings.enable_notifications = flag;
            }
            if let Some(flag) = track_progress {
                settings.track_progress = flag;
            }
            if changed {
                settings.save(&store).context("Failed to save settings")?;
            }

            println!("Hint mode:      {}", settings.hint_mode);
            println!("Timed delay:    {}s", settings.timed_delay);
            println!("Notifications:  {}", on_off(settings.enable_notifications));
            println!("Track progress: {}", on_off(settings.track_progress));
        }
        Commands::Solved { problem_id } => {
            let solved = store
                .solve_problem(&problem_id, Utc::now().timestamp_millis(), Local::now().date_naive())
                .with_context(|| format!("Failed to mark {} solved", problem_id))?;
            if solved {
                println!("Marked {} as solved", problem_id);
            } else {
                println!("{} was already marked as solved", problem_id);
            }
        }
        Commands::Install => {
            let mut worker = Worker::new(store, CannedMentor::immediate(), LogNotifier);
            if worker.on_installed()? {
                println!("Default settings written");
            } else {
                println!("Settings already present");
            }
        }
    }

    Ok(())
}
