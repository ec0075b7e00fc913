pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "haru",
    about = "Haru operator CLI",
    long_about = "Inspect Haru configuration and run a preference conversation in the terminal.",
    after_help = "Examples:\n  haru config\n  haru chat --people 2 --category 카페 --category 음식점\n  haru chat --offline --category 콘텐츠"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Collect preferences interactively and print the recommendations")]
    Chat {
        #[arg(long, default_value_t = 1, help = "Number of people in the group")]
        people: u32,
        #[arg(
            long = "category",
            required = true,
            help = "Activity category to plan, in order (카페, 음식점, 콘텐츠)"
        )]
        categories: Vec<String>,
        #[arg(long, help = "Tag messages locally instead of calling the LLM")]
        offline: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Chat { people, categories, offline } => {
            commands::chat::run(people, &categories, offline)
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
