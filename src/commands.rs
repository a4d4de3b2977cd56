//! Commands for controlling the embedded player
//!
//! These commands are sent from the host thread to the player worker thread.

use crate::params::PlayerVars;

/// Commands that can be sent to the player worker
#[derive(Debug, Clone)]
pub enum PlayerCommand {
  /// Embed a video with the given player variables
  Load {
    /// Identifier of the video to embed
    video_id: String,
    /// Player variables forwarded to the player page
    vars: PlayerVars,
  },

  /// Start/resume playback
  Play,

  /// Pause playback
  Pause,

  /// Stop playback completely
  Stop,

  /// Shutdown the player worker
  Shutdown,
}

impl PlayerCommand {
  /// Create a load command with default player variables
  pub fn load(video_id: impl Into<String>) -> Self {
    Self::Load {
      video_id: video_id.into(),
      vars: PlayerVars::default(),
    }
  }

  /// Create a load command with explicit player variables
  pub fn load_with(video_id: impl Into<String>, vars: PlayerVars) -> Self {
    Self::Load {
      video_id: video_id.into(),
      vars,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn load_defaults_the_player_variables() {
    let cmd = PlayerCommand::load("M7lc1UVf-VE");
    match cmd {
      PlayerCommand::Load { video_id, vars } => {
        assert_eq!(video_id, "M7lc1UVf-VE");
        assert_eq!(vars, PlayerVars::default());
      }
      other => panic!("unexpected command: {:?}", other),
    }
  }

  #[test]
  fn load_with_keeps_the_given_variables() {
    let vars = PlayerVars {
      autoplay: Some(1),
      ..PlayerVars::default()
    };
    match PlayerCommand::load_with("x", vars.clone()) {
      PlayerCommand::Load { vars: kept, .. } => assert_eq!(kept, vars),
      other => panic!("unexpected command: {:?}", other),
    }
  }
}
