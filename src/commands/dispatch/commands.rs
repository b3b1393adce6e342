//! Routes parsed subcommands to their implementations

use crate::cli::{Commands, ConfigCommands};
use crate::commands::dispatch::command::{Command, CommandContext};
use crate::commands::{auto, config, run};
use recap_core::error::Result;
use tracing::debug;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let result = match self {
            Commands::Run { kind, today } => run::execute(ctx, *kind, *today),
            Commands::Auto { at } => auto::execute(ctx, *at),
            Commands::Config { command } => match command {
                ConfigCommands::Show => config::show(ctx),
                ConfigCommands::Init => config::init(ctx),
                ConfigCommands::Path => config::path(ctx),
            },
        };
        debug!(elapsed = ?ctx.start.elapsed(), "command_complete");
        result
    }
}
