//! Command trait and context for dispatching commands

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::{Cli, OutputFormat};
use recap_core::config::RecapConfig;
use recap_core::error::Result;
use recap_core::store::FsStore;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub vault: &'a Path,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, vault: &'a Path, start: Instant) -> Self {
        Self { cli, vault, start }
    }

    /// `--config`, else the vault's default location
    pub fn config_path(&self) -> PathBuf {
        self.cli
            .config
            .clone()
            .unwrap_or_else(|| RecapConfig::default_path(self.vault))
    }

    /// File config (or defaults) with environment overrides applied
    pub fn load_config(&self) -> Result<RecapConfig> {
        let mut config = RecapConfig::load_or_default(&self.config_path())?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn open_store(&self) -> Result<FsStore> {
        FsStore::open(self.vault)
    }

    pub fn format(&self) -> OutputFormat {
        self.cli.format
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("recap {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Weekly and monthly digests of dated Markdown notes.");
        println!();
        println!("Run `recap --help` for usage information.");
        Ok(())
    }
}
