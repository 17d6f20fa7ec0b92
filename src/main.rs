//! `rover-squad` - deploy a squad of rovers from a protocol message.
//!
//! Reads a squad message from a file, stdin, or an interactive prompt and
//! prints the coordinator's reply. Exits non-zero when the deployment is
//! rejected.

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use rover_squad::{
    NavConfig, PathBounds, RoverSession, SquadConfig, SquadCoordinator, SquadReport, init_tracing,
    parse_squad_message,
};
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, info};

const RULE: &str = "------------------------";

#[derive(Parser)]
#[command(name = "rover-squad")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate and deploy a squad of grid rovers", long_about = None)]
struct Cli {
    /// Read the message from this file instead of stdin
    #[arg(short, long, conflicts_with = "interactive")]
    input: Option<PathBuf>,

    /// Build the message by answering prompts
    #[arg(long)]
    interactive: bool,

    /// Treat the message as a single rover (landing line + commands, no grid)
    #[arg(long, conflicts_with = "interactive")]
    single: bool,

    /// Check waypoint y coordinates against the grid's x bound
    #[arg(long)]
    legacy_path_bounds: bool,

    /// Grid cells covered by one move command
    #[arg(long, default_value_t = 1)]
    step: i32,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json_logs: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    init_tracing(cli.json_logs, level);

    if cli.step < 1 {
        bail!("--step must be at least 1, got {}", cli.step);
    }
    let nav = NavConfig {
        step_length: cli.step,
    };

    if cli.single {
        let message = read_message(cli.input.as_ref())?;
        let session = RoverSession::new(nav);
        let reply = session.read_message(&message);
        println!("{reply}");
        return Ok(exit_code(!reply.starts_with("ERROR:")));
    }

    let config = SquadConfig {
        nav,
        path_bounds: if cli.legacy_path_bounds {
            PathBounds::LegacyXAxis
        } else {
            PathBounds::Grid
        },
    };
    let coordinator = SquadCoordinator::new(config);

    if cli.interactive {
        return cmd_interactive(&coordinator);
    }

    let message = read_message(cli.input.as_ref())?;
    match cli.format {
        Format::Text => {
            let reply = coordinator.process(&message);
            println!("{reply}");
            Ok(exit_code(!reply.starts_with("ERROR:")))
        }
        Format::Json => cmd_json(&coordinator, &message),
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn read_message(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read message from {}", path.display())),
        None => {
            let mut message = String::new();
            io::stdin()
                .read_to_string(&mut message)
                .context("Failed to read message from stdin")?;
            Ok(message)
        }
    }
}

/// Prints the full plan alongside the report so paths can be inspected.
fn cmd_json(coordinator: &SquadCoordinator, message: &str) -> Result<ExitCode> {
    let (value, deployed) = match parse_squad_message(message) {
        Ok(parsed) => {
            let plan = coordinator.plan(&parsed);
            let report = coordinator.report(&plan);
            let deployed = report.is_deployed();
            let value = serde_json::json!({
                "plan": plan,
                "report": report,
            });
            (value, deployed)
        }
        Err(err) => (serde_json::json!({ "error": err.to_string() }), false),
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&value).context("Failed to serialize report")?
    );
    Ok(exit_code(deployed))
}

fn cmd_interactive(coordinator: &SquadCoordinator) -> Result<ExitCode> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut ask = |prompt: &str| -> Result<String> {
        print!("{prompt}");
        io::stdout().flush().context("Failed to flush prompt")?;
        match lines.next() {
            Some(line) => Ok(line.context("Failed to read answer")?),
            None => bail!("input closed while waiting for: {}", prompt.trim()),
        }
    };

    println!("You're about to deploy one or more rovers.");
    println!("Please tell us the size of the area to explore:");
    let grid_x = ask("Grid size - X: ")?;
    let grid_y = ask("Grid size - Y: ")?;

    let rover_count = loop {
        let answer = ask("Number of rovers to deploy: ")?;
        if let Ok(count) = answer.trim().parse::<usize>() {
            break count;
        }
    };

    let mut parts = vec![format!("{} {}", grid_x.trim(), grid_y.trim())];
    for idx in 0..rover_count {
        parts.push(ask(&format!("Rover [{idx}] coordinates and heading [X Y H]: "))?);
        parts.push(ask(&format!("Rover [{idx}] MOVE commands: "))?);
    }
    let message = parts.join("\n");
    info!(rovers = rover_count, "composed squad message");

    println!("The message to be sent:\n{RULE}\n{message}\n{RULE}");

    let deployed = match coordinator.deploy(&message) {
        Ok(report) => {
            println!("Squad response:\n{RULE}\n{report}\n{RULE}");
            matches!(report, SquadReport::Deployed(_))
        }
        Err(err) => {
            println!("Squad response:\n{RULE}\nERROR: {err}\n{RULE}");
            false
        }
    };
    Ok(exit_code(deployed))
}
