//! Periodic gesture polling and command dispatch
//!
//! The poller owns the last known gesture and is its only writer. Each tick
//! starts a poll without waiting for earlier ones, so a hung request never
//! delays the timer. Poll results are applied in completion order. Commands
//! are sent best-effort: at most once per change, result logged and dropped.

use super::bindings::GestureCommandMap;
use super::tracker::{GestureTracker, Observation};
use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use gesture_sdk::{BackendClient, Gesture, PlaybackCommand};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Default time between polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Reports the classifier's current gesture
#[async_trait]
pub trait GestureSource: Send + Sync {
    async fn current_gesture(&self) -> gesture_sdk::Result<Option<Gesture>>;
}

/// Accepts playback commands
#[async_trait]
pub trait CommandSink: Send + Sync {
    async fn send_command(&self, command: PlaybackCommand) -> gesture_sdk::Result<()>;
}

#[async_trait]
impl GestureSource for BackendClient {
    async fn current_gesture(&self) -> gesture_sdk::Result<Option<Gesture>> {
        BackendClient::current_gesture(self).await
    }
}

#[async_trait]
impl CommandSink for BackendClient {
    async fn send_command(&self, command: PlaybackCommand) -> gesture_sdk::Result<()> {
        BackendClient::send_command(self, command).await
    }
}

/// Polls a [`GestureSource`] and forwards gesture changes to a [`CommandSink`]
pub struct GesturePoller {
    source: Arc<dyn GestureSource>,
    sink: Arc<dyn CommandSink>,
    tracker: GestureTracker,
    interval: Duration,
    current: watch::Sender<Option<Gesture>>,
}

impl GesturePoller {
    pub fn new(
        source: Arc<dyn GestureSource>,
        sink: Arc<dyn CommandSink>,
        commands: GestureCommandMap,
        interval: Duration,
    ) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            source,
            sink,
            tracker: GestureTracker::new(commands),
            interval,
            current,
        }
    }

    /// Watch the stored gesture. Updated on every change, including to
    /// gestures with no bound command.
    pub fn subscribe(&self) -> watch::Receiver<Option<Gesture>> {
        self.current.subscribe()
    }

    /// Run on a background task until `shutdown` is cancelled
    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    /// Poll every interval until `shutdown` is cancelled
    ///
    /// The first poll happens one full interval after start. Cancellation
    /// suppresses future ticks and abandons polls still in flight; commands
    /// already dispatched run to completion.
    pub async fn run(mut self, shutdown: CancellationToken) {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut in_flight = FuturesUnordered::new();

        info!("Polling for gestures every {:?}", self.interval);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    info!("Gesture polling stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let source = Arc::clone(&self.source);
                    in_flight.push(async move { source.current_gesture().await });
                }
                Some(result) = in_flight.next(), if !in_flight.is_empty() => {
                    self.apply(result);
                }
            }
        }
    }

    fn apply(&mut self, result: gesture_sdk::Result<Option<Gesture>>) {
        let gesture = match result {
            Ok(gesture) => gesture,
            Err(e) => {
                error!("Error fetching gesture: {}", e);
                return;
            }
        };

        let Observation::Changed { gesture, command } = self.tracker.observe(gesture) else {
            return;
        };

        match (&gesture, command) {
            (Some(gesture), Some(command)) => {
                info!("Gesture changed to '{}', sending {}", gesture, command);
                self.dispatch(command);
            }
            (Some(gesture), None) => debug!("Gesture '{}' has no bound command", gesture),
            (None, _) => debug!("Gesture cleared"),
        }

        self.current.send_replace(self.tracker.current().cloned());
    }

    fn dispatch(&self, command: PlaybackCommand) {
        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            if let Err(e) = sink.send_command(command).await {
                warn!("Playback command '{}' failed: {}", command, e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_sdk::{ApiError, StatusCode};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    const TICK: Duration = Duration::from_millis(2000);

    /// Replays a fixed script of poll results, then fails
    struct ScriptedSource {
        script: Mutex<VecDeque<gesture_sdk::Result<Option<Gesture>>>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(script: Vec<gesture_sdk::Result<Option<Gesture>>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GestureSource for ScriptedSource {
        async fn current_gesture(&self) -> gesture_sdk::Result<Option<Gesture>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(unavailable()))
        }
    }

    struct ChannelSink(mpsc::UnboundedSender<PlaybackCommand>);

    #[async_trait]
    impl CommandSink for ChannelSink {
        async fn send_command(&self, command: PlaybackCommand) -> gesture_sdk::Result<()> {
            let _ = self.0.send(command);
            Ok(())
        }
    }

    fn unavailable() -> ApiError {
        ApiError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "classifier offline".to_string(),
        }
    }

    fn seen(label: &str) -> gesture_sdk::Result<Option<Gesture>> {
        Ok(Some(Gesture::from(label)))
    }

    fn poller(
        source: Arc<ScriptedSource>,
    ) -> (GesturePoller, mpsc::UnboundedReceiver<PlaybackCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let poller = GesturePoller::new(
            source,
            Arc::new(ChannelSink(tx)),
            GestureCommandMap::default(),
            TICK,
        );
        (poller, rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<PlaybackCommand>) -> Vec<PlaybackCommand> {
        let mut commands = Vec::new();
        while let Ok(command) = rx.try_recv() {
            commands.push(command);
        }
        commands
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatches_once_per_change() {
        let source = ScriptedSource::new(vec![
            seen("play"),
            seen("play"),
            seen("pause"),
            seen("pause"),
            seen("next"),
        ]);
        let (poller, mut rx) = poller(source.clone());
        let gesture = poller.subscribe();
        let shutdown = CancellationToken::new();
        let handle = poller.spawn(shutdown.clone());

        tokio::time::sleep(TICK * 5 + TICK / 4).await;
        shutdown.cancel();
        handle.await.unwrap();

        assert_eq!(source.calls(), 5);
        assert_eq!(
            drain(&mut rx),
            vec![
                PlaybackCommand::Play,
                PlaybackCommand::Pause,
                PlaybackCommand::Next
            ]
        );
        assert_eq!(*gesture.borrow(), Some(Gesture::from("next")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unrecognized_gesture_is_stored_without_dispatch() {
        let source = ScriptedSource::new(vec![seen("spin")]);
        let (poller, mut rx) = poller(source.clone());
        let gesture = poller.subscribe();
        let shutdown = CancellationToken::new();
        let handle = poller.spawn(shutdown.clone());

        tokio::time::sleep(TICK + TICK / 4).await;
        shutdown.cancel();
        handle.await.unwrap();

        assert_eq!(*gesture.borrow(), Some(Gesture::from("spin")));
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_poll_keeps_gesture_and_next_tick_fires() {
        let source = ScriptedSource::new(vec![seen("play"), Err(unavailable()), seen("pause")]);
        let (poller, mut rx) = poller(source.clone());
        let gesture = poller.subscribe();
        let shutdown = CancellationToken::new();
        let handle = poller.spawn(shutdown.clone());

        tokio::time::sleep(TICK * 2 + TICK / 4).await;
        assert_eq!(source.calls(), 2);
        assert_eq!(*gesture.borrow(), Some(Gesture::from("play")));

        tokio::time::sleep(TICK).await;
        assert_eq!(source.calls(), 3);
        assert_eq!(*gesture.borrow(), Some(Gesture::from("pause")));

        shutdown.cancel();
        handle.await.unwrap();
        assert_eq!(
            drain(&mut rx),
            vec![PlaybackCommand::Play, PlaybackCommand::Pause]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_poll_before_first_interval() {
        let source = ScriptedSource::new(vec![seen("play")]);
        let (poller, _rx) = poller(source.clone());
        let shutdown = CancellationToken::new();
        let handle = poller.spawn(shutdown.clone());

        tokio::time::sleep(TICK / 2).await;
        assert_eq!(source.calls(), 0);

        shutdown.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_stops_future_ticks() {
        let source = ScriptedSource::new(vec![seen("play"), seen("pause")]);
        let (poller, mut rx) = poller(source.clone());
        let shutdown = CancellationToken::new();
        let handle = poller.spawn(shutdown.clone());

        tokio::time::sleep(TICK + TICK / 4).await;
        shutdown.cancel();
        handle.await.unwrap();

        tokio::time::sleep(TICK * 3).await;
        assert_eq!(source.calls(), 1);
        assert_eq!(drain(&mut rx), vec![PlaybackCommand::Play]);
    }

    /// A poll that never resolves must not hold up later ticks
    struct StallingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GestureSource for StallingSource {
        async fn current_gesture(&self) -> gesture_sdk::Result<Option<Gesture>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == 0 {
                futures::future::pending::<()>().await;
            }
            Ok(Some(Gesture::from("like")))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_poll_does_not_block_timer() {
        let source = Arc::new(StallingSource {
            calls: AtomicUsize::new(0),
        });
        let (tx, mut rx) = mpsc::unbounded_channel();
        let poller = GesturePoller::new(
            source.clone(),
            Arc::new(ChannelSink(tx)),
            GestureCommandMap::default(),
            TICK,
        );
        let shutdown = CancellationToken::new();
        let handle = poller.spawn(shutdown.clone());

        tokio::time::sleep(TICK * 3 + TICK / 4).await;
        shutdown.cancel();
        handle.await.unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
        assert_eq!(drain(&mut rx), vec![PlaybackCommand::Like]);
    }
}
