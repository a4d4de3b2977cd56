//! Embed document template handling
//!
//! The player page ships as an HTML template carrying a single substitution
//! token that receives the JSON parameter document. The default template is
//! compiled into the crate; hosts may point at their own file instead.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

/// Token the parameter document is substituted for.
pub const PARAMS_TOKEN: &str = "__PLAYER_PARAMS__";

const BUILTIN_TEMPLATE: &str = include_str!("../assets/player.html");

/// Where the embed template comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateSource {
  /// The template bundled with the crate.
  #[default]
  Builtin,
  /// A template file on disk, read at load time.
  Path(PathBuf),
}

/// Failure locating or preparing the embed template.
#[derive(Debug, Error)]
pub enum TemplateError {
  /// The template file could not be read.
  #[error("could not read embed template {path:?}: {source}")]
  Missing {
    path: PathBuf,
    source: std::io::Error,
  },
  /// The template text has no substitution token.
  #[error("embed template is missing the __PLAYER_PARAMS__ token")]
  MissingToken,
}

impl TemplateSource {
  /// Fetch the raw template text.
  pub(crate) fn read(&self) -> Result<String, TemplateError> {
    match self {
      TemplateSource::Builtin => Ok(BUILTIN_TEMPLATE.to_owned()),
      TemplateSource::Path(path) => {
        fs::read_to_string(path).map_err(|source| TemplateError::Missing {
          path: path.clone(),
          source,
        })
      }
    }
  }
}

/// Substitute the parameter document into the template.
pub(crate) fn render(template: &str, params_json: &str) -> Result<String, TemplateError> {
  if !template.contains(PARAMS_TOKEN) {
    return Err(TemplateError::MissingToken);
  }
  Ok(template.replace(PARAMS_TOKEN, params_json))
}
