use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use loadbal::config::{GlobalConfig, load_config};
use loadbal::console::{Console, Reply, parse_line, render_log, render_state};
use loadbal::simulation::{SimulationController, UniformWeights};

mod cli;

use cli::Cli;
use cli::commands::Commands;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("loadbal")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("loadbal.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &GlobalConfig) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        None => run_console(None, config),
        Some(Commands::Run { script }) => run_console(script.as_deref(), config),
        Some(Commands::Demo { tasks, steps, seed }) => run_demo(*tasks, *steps, *seed, config),
        Some(Commands::Config) => {
            print!("{}", config.to_yaml()?);
            Ok(())
        }
    }
}

/// Print a reply; returns false when the session should end.
fn print_reply(reply: Reply, console: &Console) -> bool {
    match reply {
        Reply::Applied(msg) => {
            println!("{}", msg.green());
            println!("{}", render_state(console.controller()));
        }
        Reply::NoEffect(msg) => println!("{}", msg.yellow()),
        Reply::Output(text) => println!("{}", text),
        Reply::Quit => return false,
    }
    true
}

fn run_console(script: Option<&Path>, config: &GlobalConfig) -> Result<()> {
    let mut console = Console::from_config(config).context("Failed to build simulation")?;

    let input: Box<dyn BufRead> = match script {
        Some(path) => {
            info!("Running script {}", path.display());
            let file = fs::File::open(path).context(format!("Failed to open script {}", path.display()))?;
            Box::new(io::BufReader::new(file))
        }
        None => {
            println!("{}", "loadbal console - type 'help' for commands".cyan());
            Box::new(io::stdin().lock())
        }
    };
    let interactive = script.is_none();

    let mut lines = input.lines();
    loop {
        if interactive {
            print!("{} ", "loadbal>".cyan());
            io::stdout().flush().context("Failed to flush stdout")?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read input")?;

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{} {}", "Error:".red(), e);
                continue;
            }
        };

        if !interactive {
            println!("{} {}", ">".cyan(), line.trim());
        }

        match console.execute(command) {
            Ok(reply) => {
                if !print_reply(reply, &console) {
                    break;
                }
            }
            Err(e) => println!("{} {}", "Error:".red(), e),
        }
    }

    info!("Console session ended");
    Ok(())
}

fn run_demo(tasks: usize, steps: usize, seed: Option<u64>, config: &GlobalConfig) -> Result<()> {
    info!("Running demo: tasks={} steps={} seed={:?}", tasks, steps, seed);
    let mut controller = SimulationController::from_config(config).context("Failed to build simulation")?;

    if let Some(seed) = seed {
        let weights = UniformWeights::seeded(config.tasks.min_weight, config.tasks.max_weight, seed)?;
        controller = controller.with_weights(Box::new(weights));
    }

    controller.start();
    let added = controller.enqueue_random(tasks)?;
    println!("{} {} task(s)", "Enqueued".green(), added.len());

    let mut taken = 0;
    while taken < steps && controller.can_advance() {
        controller.advance();
        taken += 1;
    }

    println!("{} {} step(s)", "Advanced".green(), taken);
    println!("{}", render_state(&controller));
    println!();
    println!("{}", render_log(controller.log(), usize::MAX));
    Ok(())
}

fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = load_config(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
