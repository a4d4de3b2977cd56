//! Playback states and player errors reported by the embedded player
//!
//! The player page reports state transitions and failures as numeric codes
//! carried inside callback URLs. Both mappings are total: a code this crate
//! does not recognize resolves to the `Unknown` variant instead of failing.

use std::fmt;

/// Playback state of the embedded player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
  /// Playback has not started yet (code `-1`)
  Unstarted,
  /// The current video has finished (code `0`)
  Ended,
  /// The player is playing (code `1`)
  Playing,
  /// The player is paused (code `2`)
  Paused,
  /// The player is buffering (code `5`)
  Buffering,
  /// A video is cued and waiting to play (code `3`)
  Queued,
  /// Any state code this crate does not recognize
  #[default]
  Unknown,
}

impl PlayerState {
  /// Map a status code reported by the player page to a state.
  ///
  /// Unrecognized codes resolve to [`PlayerState::Unknown`].
  pub fn from_code(code: &str) -> Self {
    match code {
      "-1" => PlayerState::Unstarted,
      "0" => PlayerState::Ended,
      "1" => PlayerState::Playing,
      "2" => PlayerState::Paused,
      "3" => PlayerState::Queued,
      "5" => PlayerState::Buffering,
      _ => PlayerState::Unknown,
    }
  }
}

impl fmt::Display for PlayerState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      PlayerState::Unstarted => "unstarted",
      PlayerState::Ended => "ended",
      PlayerState::Playing => "playing",
      PlayerState::Paused => "paused",
      PlayerState::Buffering => "buffering",
      PlayerState::Queued => "queued",
      PlayerState::Unknown => "unknown",
    };
    f.write_str(name)
  }
}

/// Playback error reported by the embedded player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerError {
  /// The request contained an invalid parameter value (code `2`)
  InvalidParameter,
  /// The requested content cannot be played in an HTML5 player (code `5`)
  HtmlError,
  /// The requested video was not found (code `100`)
  VideoNotFound,
  /// The video owner does not allow embedded playback (codes `101` and `150`)
  VideoNotEmbeddable,
  /// The video cannot be found (code `105`)
  CannotFindVideo,
  /// Any error code this crate does not recognize
  Unknown,
}

impl PlayerError {
  /// Map an error code reported by the player page to an error.
  ///
  /// Codes `101` and `150` both describe a video whose owner has disabled
  /// embedding, and both resolve to [`PlayerError::VideoNotEmbeddable`].
  /// Unrecognized codes resolve to [`PlayerError::Unknown`].
  pub fn from_code(code: &str) -> Self {
    match code {
      "2" => PlayerError::InvalidParameter,
      "5" => PlayerError::HtmlError,
      "100" => PlayerError::VideoNotFound,
      "101" | "150" => PlayerError::VideoNotEmbeddable,
      "105" => PlayerError::CannotFindVideo,
      _ => PlayerError::Unknown,
    }
  }
}

impl fmt::Display for PlayerError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      PlayerError::InvalidParameter => "invalid parameter",
      PlayerError::HtmlError => "html error",
      PlayerError::VideoNotFound => "video not found",
      PlayerError::VideoNotEmbeddable => "video not embeddable",
      PlayerError::CannotFindVideo => "cannot find video",
      PlayerError::Unknown => "unknown",
    };
    f.write_str(name)
  }
}
