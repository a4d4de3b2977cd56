//! Typed player parameters for the embed document
//!
//! The embed template receives one JSON document describing the video, the
//! iframe geometry, the player variables, and the fixed event-name bindings
//! the page installs. `PlayerVars` names the variables the crate knows
//! about and carries everything else in an open extension map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

/// Iframe size used when the caller does not pick one.
pub const DEFAULT_SIZE: &str = "100%";

/// Player variables controlling playback UI behavior.
///
/// Unset fields are omitted from the parameter document. Variables without
/// a named field go into `extra` and are serialized alongside the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerVars {
  /// Start playback as soon as the player loads (`0`/`1`).
  #[serde(skip_serializing_if = "Option::is_none")]
  pub autoplay: Option<u8>,
  /// Show the player chrome (`0`/`1`).
  #[serde(skip_serializing_if = "Option::is_none")]
  pub controls: Option<u8>,
  /// Play inline rather than fullscreen on handheld devices (`0`/`1`).
  #[serde(skip_serializing_if = "Option::is_none")]
  pub playsinline: Option<u8>,
  /// Reduce player branding (`0`/`1`).
  #[serde(skip_serializing_if = "Option::is_none")]
  pub modestbranding: Option<u8>,
  /// Show video title and uploader before playback (`0`/`1`).
  #[serde(skip_serializing_if = "Option::is_none")]
  pub showinfo: Option<u8>,
  /// Allow the page to drive the player through scripts (`0`/`1`).
  #[serde(skip_serializing_if = "Option::is_none")]
  pub enablejsapi: Option<u8>,
  /// Show related videos when playback ends (`0`/`1`).
  #[serde(skip_serializing_if = "Option::is_none")]
  pub rel: Option<u8>,
  /// Playback start offset in whole seconds.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub start: Option<u32>,
  /// Playback end offset in whole seconds.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub end: Option<u32>,
  /// Origin the embed document is served against.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub origin: Option<String>,
  /// Forward-compatible extension variables, serialized inline.
  #[serde(flatten)]
  pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The full parameter document handed to the embed template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerParameters {
  /// Identifier of the video to embed.
  pub video_id: String,
  /// Iframe width, a CSS size string.
  pub width: String,
  /// Iframe height, a CSS size string.
  pub height: String,
  /// Player variables forwarded to the player page.
  pub player_vars: PlayerVars,
  // Always the fixed bindings table; the constructor is the only writer.
  events: BTreeMap<&'static str, &'static str>,
}

impl PlayerParameters {
  /// Build a parameter document with default geometry and event bindings.
  pub fn new(video_id: impl Into<String>, player_vars: PlayerVars) -> Self {
    Self {
      video_id: video_id.into(),
      width: DEFAULT_SIZE.to_owned(),
      height: DEFAULT_SIZE.to_owned(),
      player_vars,
      events: event_bindings(),
    }
  }

  /// Serialize the document for template substitution.
  pub fn to_json(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(self)
  }

  /// Origin the rendered document is loaded against.
  pub fn origin(&self) -> Url {
    resolve_origin(&self.player_vars)
  }
}

/// Fixed event-name bindings the embed template installs.
///
/// The page registers its error handler under `onPlayerError`, not under
/// the event's own name.
fn event_bindings() -> BTreeMap<&'static str, &'static str> {
  BTreeMap::from([
    ("onReady", "onReady"),
    ("onStateChange", "onStateChange"),
    ("onPlayerQualityChange", "onPlayerQualityChange"),
    ("onError", "onPlayerError"),
  ])
}

/// Resolve the embedding origin from the player variables.
///
/// A present, URL-parseable `origin` wins; an absent or invalid one falls
/// back to a blank origin.
pub(crate) fn resolve_origin(vars: &PlayerVars) -> Url {
  vars
    .origin
    .as_deref()
    .and_then(|origin| Url::parse(origin).ok())
    .unwrap_or_else(blank_origin)
}

/// `about:blank`, the origin used when none is configured.
pub(crate) fn blank_origin() -> Url {
  Url::parse("about:blank").expect("about:blank is a valid url")
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::{json, Value};

  #[test]
  fn geometry_defaults_to_full_size() {
    let params = PlayerParameters::new("M7lc1UVf-VE", PlayerVars::default());
    assert_eq!(params.width, "100%");
    assert_eq!(params.height, "100%");
  }

  #[test]
  fn document_shape_matches_the_embed_contract() {
    let vars = PlayerVars {
      playsinline: Some(1),
      controls: Some(0),
      ..PlayerVars::default()
    };
    let params = PlayerParameters::new("M7lc1UVf-VE", vars);
    let doc: Value = serde_json::from_str(&params.to_json().unwrap()).unwrap();

    assert_eq!(doc["videoId"], "M7lc1UVf-VE");
    assert_eq!(doc["width"], "100%");
    assert_eq!(doc["height"], "100%");
    assert_eq!(doc["playerVars"], json!({ "playsinline": 1, "controls": 0 }));
    assert_eq!(
      doc["events"],
      json!({
        "onReady": "onReady",
        "onStateChange": "onStateChange",
        "onPlayerQualityChange": "onPlayerQualityChange",
        "onError": "onPlayerError",
      })
    );
  }

  #[test]
  fn unset_vars_serialize_to_an_empty_object() {
    let params = PlayerParameters::new("x", PlayerVars::default());
    let doc: Value = serde_json::from_str(&params.to_json().unwrap()).unwrap();
    assert_eq!(doc["playerVars"], json!({}));
  }

  #[test]
  fn extension_vars_serialize_inline() {
    let mut vars = PlayerVars::default();
    vars.extra.insert("cc_load_policy".to_owned(), json!(1));
    let params = PlayerParameters::new("x", vars);
    let doc: Value = serde_json::from_str(&params.to_json().unwrap()).unwrap();
    assert_eq!(doc["playerVars"]["cc_load_policy"], json!(1));
  }

  #[test]
  fn valid_origin_is_used_as_given() {
    let vars = PlayerVars {
      origin: Some("https://example.com".to_owned()),
      ..PlayerVars::default()
    };
    assert_eq!(resolve_origin(&vars).as_str(), "https://example.com/");
  }

  #[test]
  fn absent_or_invalid_origin_falls_back_to_blank() {
    assert_eq!(
      resolve_origin(&PlayerVars::default()).as_str(),
      "about:blank"
    );

    let vars = PlayerVars {
      origin: Some("not a url".to_owned()),
      ..PlayerVars::default()
    };
    assert_eq!(resolve_origin(&vars).as_str(), "about:blank");
  }

  #[test]
  fn vars_files_deserialize_with_extensions() {
    let vars: PlayerVars =
      serde_yaml::from_str("autoplay: 1\ncc_load_policy: 1\n").unwrap();
    assert_eq!(vars.autoplay, Some(1));
    assert_eq!(vars.extra["cc_load_policy"], json!(1));
  }
}
