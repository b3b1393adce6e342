//! `recap config show|init|path`

use serde_json::json;

use crate::cli::OutputFormat;
use crate::commands::dispatch::CommandContext;
use crate::commands::format::print_json;
use recap_core::config::RecapConfig;
use recap_core::error::Result;

/// Print the effective config, API key masked
pub fn show(ctx: &CommandContext) -> Result<()> {
    let path = ctx.config_path();
    let config = ctx.load_config()?.redacted();

    match ctx.format() {
        OutputFormat::Json => print_json(&json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        })),
        OutputFormat::Human => {
            if !ctx.quiet() {
                if path.exists() {
                    println!("# {}", path.display());
                } else {
                    println!("# {} (not found, showing defaults)", path.display());
                }
            }
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// Write the default config unless one is already there
pub fn init(ctx: &CommandContext) -> Result<()> {
    let path = ctx.config_path();
    let created = !path.exists();
    if created {
        RecapConfig::default().save(&path)?;
        tracing::info!(path = %path.display(), "wrote default config");
    }

    match ctx.format() {
        OutputFormat::Json => print_json(&json!({
            "path": path.display().to_string(),
            "created": created,
        })),
        OutputFormat::Human => {
            if !ctx.quiet() {
                if created {
                    println!("Created {}", path.display());
                } else {
                    println!("Config already exists at {}", path.display());
                }
            }
            Ok(())
        }
    }
}

pub fn path(ctx: &CommandContext) -> Result<()> {
    let path = ctx.config_path();
    match ctx.format() {
        OutputFormat::Json => print_json(&json!({ "path": path.display().to_string() })),
        OutputFormat::Human => {
            println!("{}", path.display());
            Ok(())
        }
    }
}
