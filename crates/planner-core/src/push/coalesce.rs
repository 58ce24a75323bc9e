//! Debounced refresh scheduling.
//!
//! The first frame opens a short window. Frames arriving while the window is
//! open are dropped and a single refresh runs for the first frame's plan.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::debug;

use super::message::{RefreshPlan, classify};

/// Delay between the first frame and the refresh it triggers.
pub const COALESCE_WINDOW: Duration = Duration::from_millis(150);

/// Turns a stream of raw push frames into debounced refresh plans.
#[derive(Debug)]
pub struct Coalescer {
    frames: mpsc::Receiver<String>,
    window: Duration,
}

impl Coalescer {
    /// Wraps the receiving end of a frame channel.
    #[must_use]
    pub const fn new(frames: mpsc::Receiver<String>, window: Duration) -> Self {
        Self { frames, window }
    }

    /// Waits for the next refresh to run.
    ///
    /// Returns `None` once every sender is gone and no frame is pending.
    pub async fn next(&mut self) -> Option<RefreshPlan> {
        let first = self.frames.recv().await?;
        let plan = classify(&first);
        debug!("Push frame scheduled refresh {plan:?}");

        let deadline = Instant::now() + self.window;
        let mut dropped = 0usize;
        loop {
            tokio::select! {
                () = tokio::time::sleep_until(deadline) => break,
                frame = self.frames.recv() => match frame {
                    Some(_) => dropped += 1,
                    None => break,
                },
            }
        }
        if dropped > 0 {
            debug!("Dropped {dropped} push frame(s) while a refresh was pending");
        }
        Some(plan)
    }
}
