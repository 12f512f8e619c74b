//! Command line flags and settings resolution for the desktop client.

use std::path::PathBuf;

use clap::Parser;
use client_core::{load_settings, ClientSettings};

#[derive(Parser, Debug, Default)]
#[command(name = "profile_cards", version, about = "Browse user profile cards")]
pub struct Args {
    /// Settings file; defaults to `<config dir>/profile_cards/settings.toml` when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub users_url: Option<String>,
    #[arg(long)]
    pub avatar_base_url: Option<String>,
    /// Avatar format path segment, e.g. `png` or `jpg`.
    #[arg(long)]
    pub avatar_format: Option<String>,
    #[arg(long)]
    pub profile_limit: Option<usize>,
    #[arg(long)]
    pub load_delay_ms: Option<u64>,
}

impl Args {
    pub fn apply_overrides(&self, settings: &mut ClientSettings) {
        if let Some(v) = &self.users_url {
            settings.users_url = v.clone();
        }
        if let Some(v) = &self.avatar_base_url {
            settings.avatar_base_url = v.clone();
        }
        if let Some(v) = &self.avatar_format {
            settings.avatar_format = v.clone();
        }
        if let Some(v) = self.profile_limit {
            settings.profile_limit = v;
        }
        if let Some(v) = self.load_delay_ms {
            settings.load_delay = std::time::Duration::from_millis(v);
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("profile_cards").join("settings.toml"))
}

/// Defaults, then settings file, then environment, then flags.
pub fn resolve_settings(args: &Args) -> anyhow::Result<ClientSettings> {
    let mut settings = match &args.config {
        Some(path) => load_settings(Some(path), true)?,
        None => load_settings(default_config_path().as_deref(), false)?,
    };
    args.apply_overrides(&mut settings);
    Ok(settings)
}
