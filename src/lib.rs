//! Typed command/event bridge for the YouTube IFrame player embedded in a
//! native web view
//!
//! The host owns the web view; this crate owns the protocol between the host
//! and the player page. Commands (`play`, `pause`, `stop`, `load`) are
//! serialized to script-execution requests, and the pseudo-URL callbacks the
//! page emits (`ytplayer://onStateChange?data=1` and friends) are decoded
//! into typed notifications for a [`PlayerObserver`].
//!
//! The web view itself is abstracted behind [`PlayerWidget`], two operations
//! wide, so the crate stays free of UI toolkit types. Hosts that keep their
//! web view on another thread can use [`spawn_player_worker`] and talk to
//! the bridge over channels instead.

pub mod bridge;
mod callback;
pub mod commands;
pub mod events;
pub mod mock;
pub mod observer;
pub mod params;
pub mod state;
pub mod template;
pub mod widget;
pub mod worker;

pub use bridge::{LoadError, PlayerBridge};
pub use callback::CALLBACK_SCHEME;
pub use commands::PlayerCommand;
pub use events::PlayerEvent;
pub use mock::{LoadedDocument, MockWidget};
pub use observer::{LoadingPlaceholder, PlayerObserver};
pub use params::{PlayerParameters, PlayerVars, DEFAULT_SIZE};
pub use state::{PlayerError, PlayerState};
pub use template::{TemplateError, TemplateSource, PARAMS_TOKEN};
pub use widget::{
  NavigationPolicy, PlayerWidget, ScriptCompletion, ScriptOutcome, WidgetError,
};
pub use worker::{
  spawn_player_worker, ChannelObserver, PlayerHandle, PlayerSnapshot, PlayerWorker,
};
