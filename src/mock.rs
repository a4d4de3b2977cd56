//! Recording widget for tests and headless demos
//!
//! `MockWidget` stands in for a real web view: it records every script and
//! document the bridge hands it and invokes script completions synchronously
//! with a canned outcome.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use url::Url;

use crate::widget::{PlayerWidget, ScriptCompletion, ScriptOutcome};

/// One document the widget was asked to load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
  pub html: String,
  pub base_origin: Url,
}

/// A widget that records what the bridge asks of it.
///
/// Clones share the same recording, so a test can keep a handle while the
/// bridge owns the widget.
#[derive(Debug, Clone, Default)]
pub struct MockWidget {
  inner: Arc<Mutex<MockInner>>,
}

#[derive(Debug, Default)]
struct MockInner {
  scripts: Vec<String>,
  documents: Vec<LoadedDocument>,
  outcomes: VecDeque<ScriptOutcome>,
}

impl MockWidget {
  pub fn new() -> Self {
    Self::default()
  }

  /// Scripts executed so far, in dispatch order.
  pub fn scripts(&self) -> Vec<String> {
    self.lock().scripts.clone()
  }

  /// Documents loaded so far, in dispatch order.
  pub fn documents(&self) -> Vec<LoadedDocument> {
    self.lock().documents.clone()
  }

  /// Queue the outcome handed to the next script completion.
  ///
  /// Without a queued outcome, completions receive `Ok(None)`.
  pub fn queue_outcome(&self, outcome: ScriptOutcome) {
    self.lock().outcomes.push_back(outcome);
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, MockInner> {
    self.inner.lock().expect("mock widget state poisoned")
  }
}

impl PlayerWidget for MockWidget {
  fn execute_script(&mut self, script: &str, completion: ScriptCompletion) {
    let outcome = {
      let mut inner = self.lock();
      inner.scripts.push(script.to_owned());
      inner.outcomes.pop_front().unwrap_or(Ok(None))
    };
    completion(outcome);
  }

  fn load_document(&mut self, html: String, base_origin: Url) {
    self.lock().documents.push(LoadedDocument { html, base_origin });
  }
}
