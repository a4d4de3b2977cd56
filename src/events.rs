//! Events emitted by the embedded player
//!
//! These events are sent from the player worker thread to the host thread
//! to communicate decoded player callbacks.

use crate::state::{PlayerError, PlayerState};

/// Events emitted by the player worker
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
  /// The player page finished loading and accepts commands
  Ready,

  /// The player moved to a new playback state
  StateChanged {
    /// The state the player reported
    state: PlayerState,
  },

  /// The player reported a playback error
  ErrorReceived {
    /// The error the player reported
    error: PlayerError,
  },

  /// Periodic playback time update
  PlayTime {
    /// Current playback position in seconds
    seconds: f32,
  },

  /// A load command failed before anything was embedded
  LoadFailed {
    /// Description of the failure
    message: String,
  },

  /// Player worker has shut down
  Shutdown,
}

impl PlayerEvent {
  /// Returns true if this is a ready event
  pub fn is_ready(&self) -> bool {
    matches!(self, PlayerEvent::Ready)
  }

  /// Returns true if this is an error or load-failure event
  pub fn is_error(&self) -> bool {
    matches!(
      self,
      PlayerEvent::ErrorReceived { .. } | PlayerEvent::LoadFailed { .. }
    )
  }

  /// Returns true if this is a shutdown event
  pub fn is_shutdown(&self) -> bool {
    matches!(self, PlayerEvent::Shutdown)
  }
}
