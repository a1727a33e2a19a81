use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use waypoint_core::stage_windows;

mod config;
mod report;
mod session;
mod state;
mod tracker;

use config::{init_config, load_config};
use report::{render_entries, render_plan, render_status};
use tracker::Tracker;

#[derive(Parser, Debug)]
#[command(
    name = "waypoint",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("WAYPOINT_BUILD_SHA"), ")"),
    about = "Log daily distances, unlock milestones, pace a ramp plan"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log a distance for today (or --date)
    Log {
        distance: String,

        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Change the distance of the most recently logged entry
    EditLast { distance: String },

    /// Delete the most recently logged entry
    Undo,

    /// Delete an entry by id
    Delete { id: String },

    /// Progress, milestones and pace
    Status {
        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List logged entries
    Entries {
        /// Newest date first instead of logging order
        #[arg(long, default_value_t = false)]
        by_date: bool,
    },

    /// Goal distance and date
    Goal {
        #[command(subcommand)]
        command: GoalCommand,
    },

    /// Ramp plan settings
    Plan {
        #[command(subcommand)]
        command: PlanCommand,
    },

    /// Preferences in ~/.waypoint/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Interactive logging session
    Session,
}

#[derive(Subcommand, Debug)]
enum GoalCommand {
    Show,
    Set {
        #[arg(long)]
        distance: Option<String>,

        /// YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum PlanCommand {
    /// Show the stage schedule on the calendar
    Show,
    Enable,
    Disable,
    /// Change plan parameters (values are clamped to their allowed ranges)
    Set {
        /// YYYY-MM-DD
        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        cap: Option<f64>,

        #[arg(long)]
        active_days: Option<u8>,
    },
    Stage {
        #[command(subcommand)]
        command: StageCommand,
    },
}

#[derive(Subcommand, Debug)]
enum StageCommand {
    /// Append a stage after the existing ones
    Add {
        #[arg(long)]
        weeks: u32,

        #[arg(long)]
        rate: f64,
    },
    /// Remove all stages (the plan then runs at cap)
    Clear,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write default config.toml if missing
    Init,
    Show,
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // config commands must work even when config.toml names a bad table
    if let Command::Config { command } = cli.command {
        return run_config(command);
    }

    let mut tracker = Tracker::open(load_config()?)?;
    run_command(&mut tracker, cli.command)
}

fn run_config(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Init => init_config()?,
        ConfigCommand::Show => {
            let cfg = load_config()?;
            print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
        }
    }
    Ok(())
}

fn run_command(tracker: &mut Tracker, command: Command) -> Result<()> {
    let unit = tracker.cfg.unit.clone();

    match command {
        Command::Log { distance, date } => {
            let notice = tracker.log(&distance, date.as_deref())?;
            print_logged(tracker, notice);
        }

        Command::EditLast { distance } => {
            let notice = tracker.edit_last(&distance)?;
            print_logged(tracker, notice);
        }

        Command::Undo => match tracker.undo()? {
            Some(e) => println!("Removed {:.2} {unit} from {}", e.distance, e.date),
            None => println!("Nothing to undo."),
        },

        Command::Delete { id } => match tracker.delete(&id)? {
            Some(e) => println!("Removed {:.2} {unit} from {}", e.distance, e.date),
            None => println!("No entry with id {id}"),
        },

        Command::Status { json } => {
            let report = tracker.report();
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_status(&report, &unit));
            }
        }

        Command::Entries { by_date } => {
            let ledger = &tracker.state.entries;
            if by_date {
                print!("{}", render_entries(ledger.by_date_desc(), &unit));
            } else {
                print!("{}", render_entries(ledger.entries(), &unit));
            }
        }

        Command::Goal { command } => match command {
            GoalCommand::Show => print_goal(tracker),
            GoalCommand::Set { distance, date } => {
                tracker.set_goal(distance.as_deref(), date.as_deref())?;
                print_goal(tracker);
            }
        },

        Command::Plan { command } => {
            match command {
                PlanCommand::Show => {}
                PlanCommand::Enable => tracker.set_plan_enabled(true)?,
                PlanCommand::Disable => tracker.set_plan_enabled(false)?,
                PlanCommand::Set {
                    start,
                    cap,
                    active_days,
                } => tracker.set_plan(start.as_deref(), cap, active_days)?,
                PlanCommand::Stage { command } => match command {
                    StageCommand::Add { weeks, rate } => tracker.add_stage(weeks, rate)?,
                    StageCommand::Clear => tracker.clear_stages()?,
                },
            }
            let plan = &tracker.state.plan;
            print!("{}", render_plan(plan, &stage_windows(plan), &unit));
        }

        Command::Session => session::run_session(tracker)?,

        Command::Config { command } => run_config(command)?,
    }

    Ok(())
}

fn print_logged(tracker: &Tracker, notice: Option<String>) {
    let r = tracker.report();
    println!(
        "Total: {:.1} {} ({:.1}% of goal)",
        r.total_distance, tracker.cfg.unit, r.percent_to_goal
    );
    if let Some(n) = notice {
        println!("\n{n}");
        println!("{}", r.current_milestone.narrative);
    }
}

fn print_goal(tracker: &Tracker) {
    let goal = &tracker.state.goal;
    println!(
        "Goal: {:.1} {} by {}",
        goal.target_distance, tracker.cfg.unit, goal.target_date
    );
}
