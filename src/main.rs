//! Headless demo driving the bridge against a recording widget
//!
//! Loads a video through the worker facade, replays the callback sequence a
//! live player page would produce, and prints every decoded event.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{arg, command, value_parser};
use url::Url;

use ytframe::{
  spawn_player_worker, MockWidget, PlayerCommand, PlayerVars, TemplateSource,
};

const DEFAULT_VIDEO_ID: &str = "M7lc1UVf-VE";

fn main() -> Result<()> {
  let matches = command!()
    .about("Drive the embedded-player bridge against a recording widget")
    .arg(arg!(--video <ID> "YouTube video id to embed").default_value(DEFAULT_VIDEO_ID))
    .arg(arg!(--vars <FILE> "YAML file of player variables").value_parser(value_parser!(PathBuf)))
    .arg(
      arg!(--template <FILE> "Embed page template overriding the builtin one")
        .value_parser(value_parser!(PathBuf)),
    )
    .get_matches();

  env_logger::init();

  let video_id = matches
    .get_one::<String>("video")
    .cloned()
    .unwrap_or_else(|| DEFAULT_VIDEO_ID.to_owned());

  let vars: PlayerVars = match matches.get_one::<PathBuf>("vars") {
    Some(path) => {
      let text = fs::read_to_string(path)
        .with_context(|| format!("could not read player vars file {}", path.display()))?;
      serde_yaml::from_str(&text)
        .with_context(|| format!("invalid player vars in {}", path.display()))?
    }
    None => demo_vars(),
  };

  let template = matches
    .get_one::<PathBuf>("template")
    .map(|path| TemplateSource::Path(path.clone()))
    .unwrap_or_default();

  let widget = MockWidget::new();
  let recorder = widget.clone();
  let mut handle = spawn_player_worker(widget, template);

  handle
    .send_command(PlayerCommand::load_with(video_id.clone(), vars))
    .context("player worker is gone")?;
  handle.send_command(PlayerCommand::Play)?;

  // The callback sequence a live player page would produce after a load.
  for raw in [
    "ytplayer://onReady",
    "ytplayer://onStateChange?data=1",
    "ytplayer://onPlayTime?data=12.5",
  ] {
    handle.forward_navigation(Url::parse(raw)?)?;
  }

  handle.send_command(PlayerCommand::Shutdown)?;

  while let Some(event) = handle.recv_event() {
    println!("event: {:?}", event);
    handle.state.apply_event(&event);
    if event.is_shutdown() {
      break;
    }
  }

  println!(
    "player {} ready={} state={} play_time={:.1}s",
    video_id, handle.state.is_ready, handle.state.last_state, handle.state.last_play_time
  );
  for script in recorder.scripts() {
    println!("script executed: {}", script);
  }
  println!("documents loaded: {}", recorder.documents().len());

  Ok(())
}

/// Player variables the demo uses when no vars file is given.
fn demo_vars() -> PlayerVars {
  PlayerVars {
    playsinline: Some(1),
    showinfo: Some(0),
    controls: Some(0),
    modestbranding: Some(1),
    enablejsapi: Some(1),
    ..PlayerVars::default()
  }
}
