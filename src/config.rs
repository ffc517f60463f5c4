use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::Result;

/// 100 MiB
pub const DEFAULT_MEMORY_CEILING: usize = 100 * 1024 * 1024;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
  #[serde(default)]
  pub decoder: DecoderConfig,
}

impl Config {
  /// Reads `path`, writing a default configuration there when it is missing.
  pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
    Ok(confy::load_path(path.as_ref())?)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecoderConfig {
  /// Largest buffer, in bytes, a full decode accepts
  pub memory_ceiling: usize,
  /// Decode the messages of a buffer on the rayon pool
  pub parallel: bool,
  /// Stop framing after this many messages
  pub max_messages: Option<usize>,
}

impl Default for DecoderConfig {
  fn default() -> Self {
    DecoderConfig {
      memory_ceiling: DEFAULT_MEMORY_CEILING,
      parallel: true,
      max_messages: None,
    }
  }
}
