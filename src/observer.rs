//! Observer interface for decoded player notifications
//!
//! Every method has a default no-op body, so implementors opt in to exactly
//! the notifications they care about.

use crate::state::{PlayerError, PlayerState};

/// Host-side placeholder shown while the player page is loading.
///
/// The bridge requests one placeholder per load and dismisses (then drops)
/// it once the player reports ready.
pub trait LoadingPlaceholder: Send {
  /// Remove the placeholder from view.
  fn dismiss(&mut self);
}

/// Receives notifications decoded from player callbacks.
pub trait PlayerObserver: Send {
  /// The player page finished loading and accepts commands.
  fn on_ready(&mut self) {}

  /// The player moved to a new playback state.
  fn on_state_changed(&mut self, _state: PlayerState) {}

  /// The player reported a playback error.
  fn on_error(&mut self, _error: PlayerError) {}

  /// Periodic playback time update, in seconds.
  fn on_play_time(&mut self, _seconds: f32) {}

  /// Placeholder to show while the player page loads, if any.
  fn loading_placeholder(&mut self) -> Option<Box<dyn LoadingPlaceholder>> {
    None
  }
}
