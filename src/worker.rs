//! Player worker that runs the bridge in a background thread
//!
//! Hosts whose web view lives on another thread drive the bridge through
//! channels: commands in, intercepted callback navigations in, decoded
//! events out. The worker serializes all bridge access on one loop, so the
//! single-threaded callback model of the bridge is preserved.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use log::{debug, warn};
use url::Url;

use crate::bridge::PlayerBridge;
use crate::commands::PlayerCommand;
use crate::events::PlayerEvent;
use crate::observer::PlayerObserver;
use crate::state::{PlayerError, PlayerState};
use crate::template::TemplateSource;
use crate::widget::PlayerWidget;

/// Observer that forwards every notification as a [`PlayerEvent`].
pub struct ChannelObserver {
  event_tx: mpsc::Sender<PlayerEvent>,
}

impl ChannelObserver {
  pub fn new(event_tx: mpsc::Sender<PlayerEvent>) -> Self {
    Self { event_tx }
  }
}

impl PlayerObserver for ChannelObserver {
  fn on_ready(&mut self) {
    let _ = self.event_tx.send(PlayerEvent::Ready);
  }

  fn on_state_changed(&mut self, state: PlayerState) {
    let _ = self.event_tx.send(PlayerEvent::StateChanged { state });
  }

  fn on_error(&mut self, error: PlayerError) {
    let _ = self.event_tx.send(PlayerEvent::ErrorReceived { error });
  }

  fn on_play_time(&mut self, seconds: f32) {
    let _ = self.event_tx.send(PlayerEvent::PlayTime { seconds });
  }
}

/// The player worker that owns a bridge and pumps its channels
pub struct PlayerWorker<W: PlayerWidget> {
  /// The bridge this worker drives
  bridge: PlayerBridge<W>,
  /// Channel to receive commands from the host thread
  command_rx: mpsc::Receiver<PlayerCommand>,
  /// Channel to receive intercepted callback navigations from the host
  navigation_rx: mpsc::Receiver<Url>,
  /// Channel to send events to the host thread
  event_tx: mpsc::Sender<PlayerEvent>,
}

impl<W: PlayerWidget> PlayerWorker<W> {
  pub fn new(
    bridge: PlayerBridge<W>,
    command_rx: mpsc::Receiver<PlayerCommand>,
    navigation_rx: mpsc::Receiver<Url>,
    event_tx: mpsc::Sender<PlayerEvent>,
  ) -> Self {
    Self {
      bridge,
      command_rx,
      navigation_rx,
      event_tx,
    }
  }

  /// Run the player worker event loop
  pub async fn run(&mut self) {
    loop {
      // Check for commands from the host thread (non-blocking)
      match self.command_rx.try_recv() {
        Ok(cmd) => {
          debug!("received command: {:?}", cmd);
          if self.handle_command(cmd) {
            break; // Shutdown requested
          }
        }
        Err(mpsc::TryRecvError::Empty) => {}
        Err(mpsc::TryRecvError::Disconnected) => {
          debug!("command channel disconnected, exiting");
          break;
        }
      }

      // Dispatch intercepted callback navigations
      while let Ok(url) = self.navigation_rx.try_recv() {
        self.bridge.handle_navigation(&url);
      }

      // Small sleep to prevent busy-waiting
      tokio::time::sleep(Duration::from_millis(10)).await;
    }

    // Send shutdown event
    let _ = self.event_tx.send(PlayerEvent::Shutdown);
  }

  fn handle_command(&mut self, cmd: PlayerCommand) -> bool {
    match cmd {
      PlayerCommand::Load { video_id, vars } => {
        if let Err(err) = self.bridge.load(&video_id, vars) {
          warn!("failed to load video {}: {}", video_id, err);
          let _ = self.event_tx.send(PlayerEvent::LoadFailed {
            message: err.to_string(),
          });
        }
      }
      PlayerCommand::Play => self.bridge.play(),
      PlayerCommand::Pause => self.bridge.pause(),
      PlayerCommand::Stop => self.bridge.stop(),
      PlayerCommand::Shutdown => return true,
    }
    false
  }
}

/// Handle for controlling the player worker from the host thread
pub struct PlayerHandle {
  /// Sender to send commands to the player worker thread
  pub command_tx: mpsc::Sender<PlayerCommand>,
  /// Sender to forward intercepted callback navigations to the worker
  pub navigation_tx: mpsc::Sender<Url>,
  /// Receiver to receive events from the player worker thread
  pub event_rx: mpsc::Receiver<PlayerEvent>,
  /// Snapshot of what the events received so far add up to
  pub state: PlayerSnapshot,
}

impl PlayerHandle {
  /// Send a command to the player worker
  pub fn send_command(&self, cmd: PlayerCommand) -> Result<(), mpsc::SendError<PlayerCommand>> {
    self.command_tx.send(cmd)
  }

  /// Forward an intercepted navigation to the player worker
  pub fn forward_navigation(&self, url: Url) -> Result<(), mpsc::SendError<Url>> {
    self.navigation_tx.send(url)
  }

  /// Try to receive an event from the player worker (non-blocking)
  pub fn try_recv_event(&self) -> Option<PlayerEvent> {
    self.event_rx.try_recv().ok()
  }

  /// Receive an event from the player worker, blocking until one arrives
  /// or the worker is gone
  pub fn recv_event(&self) -> Option<PlayerEvent> {
    self.event_rx.recv().ok()
  }
}

/// Rolling summary of the events a handle has seen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerSnapshot {
  /// Whether the player page has reported ready
  pub is_ready: bool,
  /// Last playback state the player reported
  pub last_state: PlayerState,
  /// Last playback position the player reported, in seconds
  pub last_play_time: f32,
}

impl PlayerSnapshot {
  /// Fold one received event into the snapshot
  pub fn apply_event(&mut self, event: &PlayerEvent) {
    match event {
      PlayerEvent::Ready => self.is_ready = true,
      PlayerEvent::StateChanged { state } => self.last_state = *state,
      PlayerEvent::PlayTime { seconds } => self.last_play_time = *seconds,
      PlayerEvent::ErrorReceived { .. }
      | PlayerEvent::LoadFailed { .. }
      | PlayerEvent::Shutdown => {}
    }
  }
}

/// Spawn the player worker in a dedicated thread
///
/// Returns a handle for communication with the worker. The widget moves
/// into the worker thread; hosts keep their own side channel to it (the
/// mock widget, for instance, is cloneable).
pub fn spawn_player_worker<W>(widget: W, template: TemplateSource) -> PlayerHandle
where
  W: PlayerWidget + Send + 'static,
{
  let (command_tx, command_rx) = mpsc::channel();
  let (navigation_tx, navigation_rx) = mpsc::channel();
  let (event_tx, event_rx) = mpsc::channel();

  let bridge = PlayerBridge::new(widget, Box::new(ChannelObserver::new(event_tx.clone())))
    .with_template(template);
  let mut worker = PlayerWorker::new(bridge, command_rx, navigation_rx, event_tx);

  thread::spawn(move || {
    let rt = tokio::runtime::Builder::new_current_thread()
      .enable_all()
      .build()
      .expect("Failed to create tokio runtime for player worker");

    rt.block_on(worker.run());
  });

  PlayerHandle {
    command_tx,
    navigation_tx,
    event_rx,
    state: PlayerSnapshot::default(),
  }
}
