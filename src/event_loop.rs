//! Single sequential event queue for the discovery screen.
//!
//! Terminal input and animation-frame ticks are produced on separate tasks
//! and merged into one channel. The consumer of [`EventPump::next`] is the
//! only code allowed to touch the swipe controller.

use crossterm::event::{self, Event};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// How long the input reader blocks before checking for shutdown.
const INPUT_POLL: Duration = Duration::from_millis(50);

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Terminal input (keys, mouse, resize, focus)
    Input(Event),
    /// One animation frame; carries the time since the previous one
    Tick(Duration),
    /// The input source failed and has stopped
    InputError(String),
}

/// Anything that can deliver terminal events.
pub trait InputSource: Send + 'static {
    /// Waits up to `timeout` for the next event.
    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<Event>>;
}

/// Reads events from the real terminal through crossterm.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }
}

/// Receiving end of the merged input/tick stream. Dropping it stops both
/// producers.
pub struct EventPump {
    rx: mpsc::Receiver<AppEvent>,
    shutdown: Arc<AtomicBool>,
}

impl EventPump {
    /// Spawns the producers. Must be called from within a tokio runtime.
    pub fn spawn<S: InputSource>(source: S, frame_interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let shutdown = Arc::new(AtomicBool::new(false));

        tokio::spawn(Self::ticker(tx.clone(), frame_interval));

        let input_shutdown = Arc::clone(&shutdown);
        tokio::task::spawn_blocking(move || Self::reader(source, tx, input_shutdown));

        debug!(?frame_interval, "event pump started");
        Self { rx, shutdown }
    }

    /// Next event in arrival order, or `None` once every producer is gone.
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    async fn ticker(tx: mpsc::Sender<AppEvent>, frame_interval: Duration) {
        let mut interval = tokio::time::interval(frame_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut last = Instant::now();
        loop {
            interval.tick().await;
            let now = Instant::now();
            if tx.send(AppEvent::Tick(now - last)).await.is_err() {
                break;
            }
            last = now;
        }
    }

    fn reader<S: InputSource>(
        mut source: S,
        tx: mpsc::Sender<AppEvent>,
        shutdown: Arc<AtomicBool>,
    ) {
        while !shutdown.load(Ordering::Relaxed) {
            match source.poll_event(INPUT_POLL) {
                Ok(Some(event)) => {
                    if tx.blocking_send(AppEvent::Input(event)).is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(error = %e, "input source failed");
                    let _ = tx.blocking_send(AppEvent::InputError(e.to_string()));
                    break;
                }
            }
        }
    }
}

impl Drop for EventPump {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::collections::VecDeque;

    /// Replays a fixed list of events, then stays quiet.
    struct ScriptedInput {
        events: VecDeque<io::Result<Event>>,
    }

    impl ScriptedInput {
        fn new(events: Vec<io::Result<Event>>) -> Self {
            Self {
                events: events.into(),
            }
        }
    }

    impl InputSource for ScriptedInput {
        fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
            match self.events.pop_front() {
                Some(event) => event.map(Some),
                None => {
                    std::thread::sleep(timeout);
                    Ok(None)
                }
            }
        }
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    async fn next_input(pump: &mut EventPump) -> Option<AppEvent> {
        loop {
            match tokio::time::timeout(Duration::from_secs(2), pump.next()).await {
                Ok(Some(AppEvent::Tick(_))) => continue,
                Ok(other) => return other,
                Err(_) => return None,
            }
        }
    }

    #[tokio::test]
    async fn test_inputs_arrive_in_order() {
        let source = ScriptedInput::new(vec![Ok(key('a')), Ok(key('b'))]);
        let mut pump = EventPump::spawn(source, Duration::from_millis(10));

        match next_input(&mut pump).await {
            Some(AppEvent::Input(event)) => assert_eq!(event, key('a')),
            other => panic!("unexpected event: {:?}", other),
        }
        match next_input(&mut pump).await {
            Some(AppEvent::Input(event)) => assert_eq!(event, key('b')),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_ticks_are_produced() {
        let mut pump = EventPump::spawn(ScriptedInput::new(vec![]), Duration::from_millis(5));

        let mut ticks = 0;
        while ticks < 3 {
            let event = tokio::time::timeout(Duration::from_secs(2), pump.next())
                .await
                .unwrap();
            if let Some(AppEvent::Tick(_)) = event {
                ticks += 1;
            }
        }
        assert_eq!(ticks, 3);
    }

    #[tokio::test]
    async fn test_input_error_is_reported() {
        let failure = io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone");
        let source = ScriptedInput::new(vec![Err(failure)]);
        let mut pump = EventPump::spawn(source, Duration::from_millis(10));

        match next_input(&mut pump).await {
            Some(AppEvent::InputError(message)) => assert!(message.contains("terminal gone")),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
