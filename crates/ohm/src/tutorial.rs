use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

pub const VIDEO_URL: &str = "https://www.youtube.com/watch?v=_rSHqvjDksg";

#[derive(Args, Debug)]
#[command(about = "Watch an explanation of Ohm's law fundamentals")]
pub struct TutorialArgs {
    /// Only print the link, don't launch a browser
    #[arg(long)]
    pub no_open: bool,
}

pub fn execute(args: TutorialArgs) -> Result<()> {
    println!("{}", "Learn Ohm's Law fundamentals".blue().bold());
    println!("Watch this explanation by The Organic Chemistry Tutor:");
    println!("{}", VIDEO_URL.cyan());

    if !args.no_open {
        log::debug!("opening {}", VIDEO_URL);
        open::that(VIDEO_URL).context("Failed to open the tutorial in a browser")?;
    }
    Ok(())
}
