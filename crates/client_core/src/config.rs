use std::{collections::BTreeMap, fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

pub const ENV_PREFIX: &str = "PROFILE_CARDS__";

pub const DEFAULT_USERS_URL: &str = "https://jsonplaceholder.typicode.com/users";
pub const DEFAULT_AVATAR_BASE_URL: &str = "https://api.dicebear.com/9.x/avataaars";
pub const DEFAULT_PROFILE_LIMIT: usize = 10;
pub const DEFAULT_LOAD_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub users_url: String,
    pub avatar_base_url: String,
    /// Path segment appended to the avatar base URL, e.g. `png`.
    pub avatar_format: String,
    pub avatar_size: u32,
    /// Sent as `backgroundColor`; omitted when empty.
    pub avatar_background: String,
    /// Extra style query parameters appended in key order.
    pub avatar_params: BTreeMap<String, String>,
    pub profile_limit: usize,
    pub load_delay: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            users_url: DEFAULT_USERS_URL.into(),
            avatar_base_url: DEFAULT_AVATAR_BASE_URL.into(),
            avatar_format: "png".into(),
            avatar_size: 200,
            avatar_background: "transparent".into(),
            avatar_params: BTreeMap::from([
                ("eyes".to_string(), "happy".to_string()),
                ("mouth".to_string(), "smile".to_string()),
            ]),
            profile_limit: DEFAULT_PROFILE_LIMIT,
            load_delay: DEFAULT_LOAD_DELAY,
            request_timeout: Duration::from_secs(20),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    users_url: Option<String>,
    avatar_base_url: Option<String>,
    avatar_format: Option<String>,
    avatar_size: Option<u32>,
    avatar_background: Option<String>,
    avatar_params: Option<BTreeMap<String, String>>,
    profile_limit: Option<usize>,
    load_delay_ms: Option<u64>,
    request_timeout_secs: Option<u64>,
}

impl ClientSettings {
    pub fn apply_toml(&mut self, raw: &str) -> anyhow::Result<()> {
        let file_cfg: FileSettings = toml::from_str(raw).context("invalid settings file")?;

        if let Some(v) = file_cfg.users_url {
            self.users_url = v;
        }
        if let Some(v) = file_cfg.avatar_base_url {
            self.avatar_base_url = v;
        }
        if let Some(v) = file_cfg.avatar_format {
            self.avatar_format = v;
        }
        if let Some(v) = file_cfg.avatar_size {
            self.avatar_size = v;
        }
        if let Some(v) = file_cfg.avatar_background {
            self.avatar_background = v;
        }
        if let Some(v) = file_cfg.avatar_params {
            self.avatar_params = v;
        }
        if let Some(v) = file_cfg.profile_limit {
            self.profile_limit = v;
        }
        if let Some(v) = file_cfg.load_delay_ms {
            self.load_delay = Duration::from_millis(v);
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            self.request_timeout = Duration::from_secs(v);
        }
        Ok(())
    }

    /// Applies `PROFILE_CARDS__*` overrides. Unparseable numbers are logged and skipped.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(v) = var("USERS_URL") {
            self.users_url = v;
        }
        if let Some(v) = var("AVATAR_BASE_URL") {
            self.avatar_base_url = v;
        }
        if let Some(v) = var("AVATAR_FORMAT") {
            self.avatar_format = v;
        }
        if let Some(v) = parsed_var(&var, "AVATAR_SIZE") {
            self.avatar_size = v;
        }
        if let Some(v) = var("AVATAR_BACKGROUND") {
            self.avatar_background = v;
        }
        if let Some(v) = parsed_var(&var, "PROFILE_LIMIT") {
            self.profile_limit = v;
        }
        if let Some(v) = parsed_var(&var, "LOAD_DELAY_MS") {
            self.load_delay = Duration::from_millis(v);
        }
        if let Some(v) = parsed_var(&var, "REQUEST_TIMEOUT_SECS") {
            self.request_timeout = Duration::from_secs(v);
        }
    }
}

fn parsed_var<T: std::str::FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Option<T> {
    let raw = var(name)?;
    match raw.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(
                variable = %format!("{ENV_PREFIX}{name}"),
                value = %raw,
                "ignoring unparseable setting"
            );
            None
        }
    }
}

/// Resolves settings from defaults, then the settings file, then the environment.
///
/// A missing file is only an error when `required` is set (an explicit
/// `--config` path); the per-user default location is optional.
pub fn load_settings(path: Option<&Path>, required: bool) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    if let Some(path) = path {
        match fs::read_to_string(path) {
            Ok(raw) => settings
                .apply_toml(&raw)
                .with_context(|| format!("failed to apply settings from '{}'", path.display()))?,
            Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read settings file '{}'", path.display()));
            }
        }
    }

    settings.apply_env(|name| std::env::var(name).ok());
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
