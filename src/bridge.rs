//! The player bridge: command surface and callback dispatch
//!
//! `PlayerBridge` owns the embedded widget, the observer, and the current
//! playback state. Commands go out as script-execution requests; callbacks
//! come back as intercepted `ytplayer://` navigations and are dispatched to
//! the observer synchronously.

use log::debug;
use thiserror::Error;
use url::Url;

use crate::callback::{self, CallbackEvent, PlayerCallback, CALLBACK_SCHEME};
use crate::observer::{LoadingPlaceholder, PlayerObserver};
use crate::params::{PlayerParameters, PlayerVars};
use crate::state::{PlayerError, PlayerState};
use crate::template::{self, TemplateError, TemplateSource};
use crate::widget::{NavigationPolicy, PlayerWidget};

/// Failure preparing an embed load.
///
/// When `load` returns an error, the widget has not been touched.
#[derive(Debug, Error)]
pub enum LoadError {
  #[error(transparent)]
  Template(#[from] TemplateError),
  #[error("could not serialize player parameters: {0}")]
  Params(#[from] serde_json::Error),
}

/// Typed facade over an embedded player page.
pub struct PlayerBridge<W: PlayerWidget> {
  widget: W,
  observer: Box<dyn PlayerObserver>,
  state: PlayerState,
  placeholder: Option<Box<dyn LoadingPlaceholder>>,
  template: TemplateSource,
}

impl<W: PlayerWidget> PlayerBridge<W> {
  pub fn new(widget: W, observer: Box<dyn PlayerObserver>) -> Self {
    Self {
      widget,
      observer,
      state: PlayerState::Unknown,
      placeholder: None,
      template: TemplateSource::Builtin,
    }
  }

  /// Use a different embed template for subsequent loads.
  pub fn with_template(mut self, template: TemplateSource) -> Self {
    self.template = template;
    self
  }

  /// State most recently reported by the player page.
  pub fn state(&self) -> PlayerState {
    self.state
  }

  /// Embed a video with the given player variables.
  pub fn load(
    &mut self,
    video_id: impl Into<String>,
    vars: PlayerVars,
  ) -> Result<(), LoadError> {
    self.load_with_params(PlayerParameters::new(video_id, vars))
  }

  /// Embed a video from a fully specified parameter document.
  ///
  /// Renders the embed template, asks the observer for a loading
  /// placeholder, resets the state to [`PlayerState::Unknown`], and hands
  /// the document to the widget. On error nothing is embedded.
  pub fn load_with_params(&mut self, params: PlayerParameters) -> Result<(), LoadError> {
    let html = template::render(&self.template.read()?, &params.to_json()?)?;
    let origin = params.origin();

    self.dismiss_placeholder();
    self.placeholder = self.observer.loading_placeholder();
    self.state = PlayerState::Unknown;
    self.widget.load_document(html, origin);
    Ok(())
  }

  /// Start or resume playback.
  pub fn play(&mut self) {
    self.run_script("player.playVideo();");
  }

  /// Pause playback.
  pub fn pause(&mut self) {
    self.run_script("player.pauseVideo();");
  }

  /// Stop playback completely.
  pub fn stop(&mut self) {
    self.run_script("player.stopVideo();");
  }

  /// Handle a navigation request intercepted by the host web view.
  ///
  /// Requests with the `ytplayer` scheme are callback envelopes: they are
  /// decoded, dispatched, and cancelled. Everything else passes through
  /// untouched.
  pub fn handle_navigation(&mut self, url: &Url) -> NavigationPolicy {
    if url.scheme() != CALLBACK_SCHEME {
      return NavigationPolicy::Allow;
    }
    if let Some(event) = callback::decode(url) {
      self.dispatch(event);
    }
    NavigationPolicy::Cancel
  }

  fn dispatch(&mut self, event: CallbackEvent) {
    match event.kind {
      PlayerCallback::OnReady => {
        self.dismiss_placeholder();
        self.observer.on_ready();
      }
      PlayerCallback::OnStateChange => {
        if let Some(code) = event.payload {
          self.state = PlayerState::from_code(&code);
          self.observer.on_state_changed(self.state);
        } else {
          debug!("state change callback without a payload");
        }
      }
      PlayerCallback::OnPlaybackQualityChange => {
        // The page reports quality changes but no observer method exists
        // for them yet.
        debug!("quality change callback: {:?}", event.payload);
      }
      PlayerCallback::OnError => {
        if let Some(code) = event.payload {
          self.observer.on_error(PlayerError::from_code(&code));
        } else {
          debug!("error callback without a payload");
        }
      }
      PlayerCallback::OnPlayTime => {
        if let Some(raw) = event.payload {
          let seconds = raw.parse::<f32>().unwrap_or(0.0);
          self.observer.on_play_time(seconds);
        } else {
          debug!("play time callback without a payload");
        }
      }
      PlayerCallback::Unknown => {
        self.dismiss_placeholder();
      }
    }
  }

  fn dismiss_placeholder(&mut self) {
    if let Some(mut placeholder) = self.placeholder.take() {
      placeholder.dismiss();
    }
  }

  // Fire-and-forget: completion results are dropped, errors only traced.
  fn run_script(&mut self, script: &str) {
    let name = script.to_owned();
    self.widget.execute_script(
      script,
      Box::new(move |outcome| {
        if let Err(err) = outcome {
          debug!("script {:?} failed: {}", name, err);
        }
      }),
    );
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;
  use std::sync::atomic::{AtomicBool, Ordering};
  use std::sync::{Arc, Mutex};

  use super::*;
  use crate::mock::MockWidget;
  use crate::widget::WidgetError;

  #[derive(Debug, Default)]
  struct Notes {
    ready: u32,
    states: Vec<PlayerState>,
    errors: Vec<PlayerError>,
    times: Vec<f32>,
  }

  #[derive(Clone, Default)]
  struct Recorder {
    notes: Arc<Mutex<Notes>>,
    placeholder_dismissed: Arc<AtomicBool>,
    offers_placeholder: bool,
  }

  impl Recorder {
    fn with_placeholder() -> Self {
      Self {
        offers_placeholder: true,
        ..Self::default()
      }
    }

    fn notes(&self) -> std::sync::MutexGuard<'_, Notes> {
      self.notes.lock().unwrap()
    }

    fn placeholder_dismissed(&self) -> bool {
      self.placeholder_dismissed.load(Ordering::SeqCst)
    }
  }

  struct Flag(Arc<AtomicBool>);

  impl LoadingPlaceholder for Flag {
    fn dismiss(&mut self) {
      self.0.store(true, Ordering::SeqCst);
    }
  }

  impl PlayerObserver for Recorder {
    fn on_ready(&mut self) {
      self.notes().ready += 1;
    }

    fn on_state_changed(&mut self, state: PlayerState) {
      self.notes().states.push(state);
    }

    fn on_error(&mut self, error: PlayerError) {
      self.notes().errors.push(error);
    }

    fn on_play_time(&mut self, seconds: f32) {
      self.notes().times.push(seconds);
    }

    fn loading_placeholder(&mut self) -> Option<Box<dyn LoadingPlaceholder>> {
      if self.offers_placeholder {
        Some(Box::new(Flag(self.placeholder_dismissed.clone())))
      } else {
        None
      }
    }
  }

  fn bridge() -> (PlayerBridge<MockWidget>, MockWidget, Recorder) {
    let widget = MockWidget::new();
    let recorder = Recorder::default();
    let bridge = PlayerBridge::new(widget.clone(), Box::new(recorder.clone()));
    (bridge, widget, recorder)
  }

  fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
  }

  #[test]
  fn commands_issue_their_scripts() {
    let (mut bridge, widget, _) = bridge();
    bridge.play();
    bridge.pause();
    bridge.stop();
    assert_eq!(
      widget.scripts(),
      vec![
        "player.playVideo();",
        "player.pauseVideo();",
        "player.stopVideo();",
      ]
    );
  }

  #[test]
  fn pause_does_not_synthesize_notifications() {
    let (mut bridge, _, recorder) = bridge();
    bridge.pause();
    assert!(recorder.notes().states.is_empty());
  }

  #[test]
  fn script_errors_are_swallowed() {
    let (mut bridge, widget, recorder) = bridge();
    widget.queue_outcome(Err(WidgetError::new("page gone")));
    bridge.play();
    assert!(recorder.notes().errors.is_empty());
  }

  #[test]
  fn state_change_updates_state_and_notifies() {
    let (mut bridge, _, recorder) = bridge();
    assert_eq!(
      bridge.handle_navigation(&url("ytplayer://onStateChange?data=1")),
      NavigationPolicy::Cancel
    );
    assert_eq!(bridge.state(), PlayerState::Playing);
    assert_eq!(recorder.notes().states, vec![PlayerState::Playing]);
  }

  #[test]
  fn state_change_without_payload_leaves_state_unchanged() {
    let (mut bridge, _, recorder) = bridge();
    bridge.handle_navigation(&url("ytplayer://onStateChange?data=2"));
    bridge.handle_navigation(&url("ytplayer://onStateChange"));
    assert_eq!(bridge.state(), PlayerState::Paused);
    assert_eq!(recorder.notes().states, vec![PlayerState::Paused]);
  }

  #[test]
  fn error_callbacks_report_mapped_errors() {
    let (mut bridge, _, recorder) = bridge();
    bridge.handle_navigation(&url("ytplayer://onError?data=150"));
    bridge.handle_navigation(&url("ytplayer://onError?data=100"));
    assert_eq!(
      recorder.notes().errors,
      vec![PlayerError::VideoNotEmbeddable, PlayerError::VideoNotFound]
    );
    // Errors never touch the state field.
    assert_eq!(bridge.state(), PlayerState::Unknown);
  }

  #[test]
  fn play_time_callbacks_report_seconds() {
    let (mut bridge, _, recorder) = bridge();
    bridge.handle_navigation(&url("ytplayer://onPlayTime?data=12.5"));
    assert_eq!(recorder.notes().times, vec![12.5]);
  }

  #[test]
  fn unparseable_play_time_degrades_to_zero() {
    let (mut bridge, _, recorder) = bridge();
    bridge.handle_navigation(&url("ytplayer://onPlayTime?data=soon"));
    assert_eq!(recorder.notes().times, vec![0.0]);
  }

  #[test]
  fn payloadless_error_and_time_callbacks_are_no_ops() {
    let (mut bridge, _, recorder) = bridge();
    bridge.handle_navigation(&url("ytplayer://onError"));
    bridge.handle_navigation(&url("ytplayer://onPlayTime"));
    let notes = recorder.notes();
    assert!(notes.errors.is_empty());
    assert!(notes.times.is_empty());
  }

  #[test]
  fn foreign_schemes_pass_through_untouched() {
    let (mut bridge, _, recorder) = bridge();
    assert_eq!(
      bridge.handle_navigation(&url("https://www.youtube.com/watch?v=x")),
      NavigationPolicy::Allow
    );
    assert_eq!(recorder.notes().ready, 0);
    assert_eq!(bridge.state(), PlayerState::Unknown);
  }

  #[test]
  fn ready_dismisses_placeholder_and_notifies() {
    let widget = MockWidget::new();
    let recorder = Recorder::with_placeholder();
    let mut bridge = PlayerBridge::new(widget, Box::new(recorder.clone()));
    bridge.load("M7lc1UVf-VE", PlayerVars::default()).unwrap();
    assert!(!recorder.placeholder_dismissed());

    bridge.handle_navigation(&url("ytplayer://onReady"));
    assert!(recorder.placeholder_dismissed());
    assert_eq!(recorder.notes().ready, 1);
  }

  #[test]
  fn unknown_callback_dismisses_placeholder_without_notifying() {
    let widget = MockWidget::new();
    let recorder = Recorder::with_placeholder();
    let mut bridge = PlayerBridge::new(widget, Box::new(recorder.clone()));
    bridge.load("M7lc1UVf-VE", PlayerVars::default()).unwrap();

    bridge.handle_navigation(&url("ytplayer://somethingNew"));
    assert!(recorder.placeholder_dismissed());
    assert_eq!(recorder.notes().ready, 0);
  }

  #[test]
  fn load_renders_params_into_the_document() {
    let (mut bridge, widget, _) = bridge();
    bridge
      .load(
        "M7lc1UVf-VE",
        PlayerVars {
          playsinline: Some(1),
          ..PlayerVars::default()
        },
      )
      .unwrap();

    let documents = widget.documents();
    assert_eq!(documents.len(), 1);
    assert!(documents[0].html.contains("\"videoId\": \"M7lc1UVf-VE\""));
    assert!(documents[0].html.contains("\"playsinline\": 1"));
    assert!(!documents[0].html.contains(crate::template::PARAMS_TOKEN));
    assert_eq!(documents[0].base_origin.as_str(), "about:blank");
  }

  #[test]
  fn load_honors_the_origin_player_variable() {
    let (mut bridge, widget, _) = bridge();
    bridge
      .load(
        "M7lc1UVf-VE",
        PlayerVars {
          origin: Some("https://example.com".to_owned()),
          ..PlayerVars::default()
        },
      )
      .unwrap();
    assert_eq!(
      widget.documents()[0].base_origin.as_str(),
      "https://example.com/"
    );
  }

  #[test]
  fn failed_load_leaves_the_widget_untouched() {
    let widget = MockWidget::new();
    let bridge = PlayerBridge::new(widget.clone(), Box::new(Recorder::default()));
    let mut bridge =
      bridge.with_template(TemplateSource::Path(PathBuf::from("/nonexistent/player.html")));

    let result = bridge.load("M7lc1UVf-VE", PlayerVars::default());
    assert!(matches!(
      result,
      Err(LoadError::Template(TemplateError::Missing { .. }))
    ));
    assert!(widget.documents().is_empty());
  }

  #[test]
  fn load_resets_state_to_unknown() {
    let (mut bridge, _, _) = bridge();
    bridge.handle_navigation(&url("ytplayer://onStateChange?data=1"));
    assert_eq!(bridge.state(), PlayerState::Playing);

    bridge.load("M7lc1UVf-VE", PlayerVars::default()).unwrap();
    assert_eq!(bridge.state(), PlayerState::Unknown);
  }
}
