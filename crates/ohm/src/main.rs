use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;

mod solve;
mod tutorial;

#[derive(Parser)]
#[command(name = "ohm")]
#[command(about = "Ohm's law calculator for voltage, current, resistance and power", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true, hide = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve for the unknown quantities
    #[command(alias = "s")]
    Solve(solve::SolveArgs),

    /// Open the Ohm's law video tutorial
    Tutorial(tutorial::TutorialArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Default level depends on --debug, RUST_LOG overrides
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    env_logger::Builder::from_env(env).init();

    match cli.command {
        Commands::Solve(args) => solve::execute(args),
        Commands::Tutorial(args) => tutorial::execute(args),
    }
}
