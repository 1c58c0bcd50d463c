use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use inquire::Text;
use ohm_core::{DEFAULT_DIGITS, Quantity, QuantitySet, RawInputs, calculate, format_reading};
use serde::Serialize;

#[derive(Args, Debug)]
#[command(about = "Solve Ohm's law and the power equations from the known values")]
pub struct SolveArgs {
    /// Known values as QUANTITY=VALUE, e.g. `V=10 I=2` or `R=4k7 P=250mW`.
    /// Unknowns can be left out or given empty (`P=`).
    #[arg(value_name = "QUANTITY=VALUE", value_parser = parse_assignment)]
    pub values: Vec<(Quantity, String)>,

    /// Prompt for each quantity in turn
    #[arg(short, long, conflicts_with = "values")]
    pub interactive: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Significant digits shown in human output
    #[arg(long, default_value_t = DEFAULT_DIGITS, value_parser = clap::value_parser!(u32).range(1..=15))]
    pub digits: u32,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

fn parse_assignment(s: &str) -> Result<(Quantity, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected QUANTITY=VALUE, got '{}'", s))?;
    Ok((name.parse()?, value.to_string()))
}

fn collect_assignments(values: Vec<(Quantity, String)>) -> Result<RawInputs> {
    let mut raw = RawInputs::new();
    for (quantity, value) in values {
        if raw.insert(quantity, value).is_some() {
            anyhow::bail!("{} given more than once", quantity.symbol());
        }
    }
    Ok(raw)
}

fn prompt_inputs() -> Result<RawInputs> {
    if !(std::io::stdin().is_terminal() && std::io::stdout().is_terminal()) {
        anyhow::bail!("--interactive needs a terminal; pass QUANTITY=VALUE arguments instead");
    }

    println!("Enter known values (leave unknowns empty):");
    let mut raw = RawInputs::new();
    for quantity in Quantity::ALL {
        let answer = Text::new(quantity.label())
            .with_help_message("e.g. 10, 4.7k, 250mA; empty if unknown")
            .prompt()
            .with_context(|| format!("Failed to read {}", quantity))?;
        raw.insert(quantity, answer);
    }
    Ok(raw)
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let raw = if args.interactive {
        prompt_inputs()?
    } else {
        collect_assignments(args.values)?
    };

    let results = calculate(&raw)?;

    match args.format {
        OutputFormat::Human => print_human_readable(&results, args.digits),
        OutputFormat::Json => print_json(&results)?,
    }
    Ok(())
}

fn print_human_readable(results: &QuantitySet, digits: u32) {
    println!("{}", "Calculation Results:".green().bold());
    for (quantity, value) in results.iter() {
        match value {
            Some(value) => println!(
                "{}: {}",
                quantity.label().bold(),
                format_reading(quantity, value, digits)
            ),
            None => println!(
                "{}: {}",
                quantity.label().bold(),
                "Cannot determine".dimmed()
            ),
        }
    }
}

fn print_json<T: Serialize>(results: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    println!("{json}");
    Ok(())
}
