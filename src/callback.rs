//! Decoding of callback URLs emitted by the player page
//!
//! The player page reports events by navigating to pseudo-URLs of the form
//! `ytplayer://<callbackName>?data=<payload>`. The host segment names the
//! callback and the query carries an optional payload. These URLs are
//! message envelopes, never resources to fetch.

use log::debug;
use url::Url;

/// URL scheme the player page uses for callback navigations.
pub const CALLBACK_SCHEME: &str = "ytplayer";

/// Callback kinds the player page can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlayerCallback {
  OnReady,
  OnStateChange,
  OnPlaybackQualityChange,
  OnError,
  OnPlayTime,
  Unknown,
}

impl PlayerCallback {
  /// Map a callback name from the URL host segment to a kind.
  ///
  /// Unrecognized names resolve to [`PlayerCallback::Unknown`].
  fn from_name(name: &str) -> Self {
    match name {
      "onReady" => PlayerCallback::OnReady,
      "onStateChange" => PlayerCallback::OnStateChange,
      "onPlaybackQualityChange" => PlayerCallback::OnPlaybackQualityChange,
      "onError" => PlayerCallback::OnError,
      "onPlayTime" => PlayerCallback::OnPlayTime,
      _ => PlayerCallback::Unknown,
    }
  }
}

/// One decoded callback: what happened, plus the raw payload if any.
///
/// Exists only for the duration of a single dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CallbackEvent {
  pub kind: PlayerCallback,
  pub payload: Option<String>,
}

/// Decode a callback URL into a [`CallbackEvent`].
///
/// Returns `None` when the URL exposes no host component; such a URL names
/// no callback and is silently ignored. The payload is the second
/// `=`-separated component of the raw query string; a query without `=`
/// yields no payload.
pub(crate) fn decode(url: &Url) -> Option<CallbackEvent> {
  let host = match url.host_str() {
    Some(host) => host,
    None => {
      debug!("ignoring callback url without a host: {}", url);
      return None;
    }
  };

  let payload = url
    .query()
    .and_then(|query| query.split('=').nth(1))
    .map(str::to_owned);

  Some(CallbackEvent {
    kind: PlayerCallback::from_name(host),
    payload,
  })
}
