//! Abstraction over the embedded web view hosting the player page
//!
//! The bridge drives the player through exactly two operations: executing a
//! script inside the page and loading a new document. The host supplies the
//! concrete web view; this crate never touches UI toolkit types.

use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Error reported by the embedded widget for a script execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("widget script error: {message}")]
pub struct WidgetError {
  /// Description supplied by the host web view.
  pub message: String,
}

impl WidgetError {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }
}

/// Result of one script execution inside the player page.
///
/// A script may legitimately evaluate to nothing, hence the inner `Option`.
pub type ScriptOutcome = Result<Option<Value>, WidgetError>;

/// Completion callback for an asynchronous script execution.
pub type ScriptCompletion = Box<dyn FnOnce(ScriptOutcome) + Send>;

/// What the host's navigation handler should do with an intercepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPolicy {
  /// Perform the navigation; the request was not a player callback.
  Allow,
  /// Swallow the navigation; the request was a callback envelope.
  Cancel,
}

/// The embedded web view, reduced to the two operations the bridge needs.
pub trait PlayerWidget {
  /// Run a script inside the player page.
  ///
  /// Execution is asynchronous: the widget invokes `completion` with the
  /// script's result, or an error, once the page has evaluated it. No
  /// ordering is guaranteed between consecutive requests.
  fn execute_script(&mut self, script: &str, completion: ScriptCompletion);

  /// Replace the widget's document with a rendered embed page.
  fn load_document(&mut self, html: String, base_origin: Url);
}
