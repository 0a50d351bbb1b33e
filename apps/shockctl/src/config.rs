use anyhow::Context;
use serde::Deserialize;
use shock_protocol::{Channel, Intensity, Operation};
use std::fs;
use std::path::Path;

/// Transmissions per send unless configured otherwise.
pub const DEFAULT_REPEAT: u32 = 4;

/// Optional YAML file for `shockctl send`. Command-line flags win over file values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SenderConfig {
    #[serde(default)]
    pub driver: Option<String>,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    #[serde(default)]
    pub channel: Option<Channel>,
    #[serde(default)]
    pub operation: Option<Operation>,
    #[serde(default)]
    pub intensity: Option<Intensity>,
}

fn default_repeat() -> u32 {
    DEFAULT_REPEAT
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            driver: None,
            repeat: DEFAULT_REPEAT,
            channel: None,
            operation: None,
            intensity: None,
        }
    }
}

pub fn parse_config(raw: &str) -> anyhow::Result<SenderConfig> {
    let cfg: SenderConfig = serde_yaml::from_str(raw).context("decoding sender config")?;
    if cfg.repeat == 0 {
        anyhow::bail!("repeat must be at least 1");
    }
    Ok(cfg)
}

pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<SenderConfig> {
    let path = path.as_ref();
    let raw =
        fs::read_to_string(path).with_context(|| format!("reading config: {}", path.display()))?;
    parse_config(&raw).with_context(|| format!("parsing config: {}", path.display()))
}
