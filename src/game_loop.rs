//! Frame-driven game loop
//!
//! The loop is a two-state machine (Running, GameOver) that owns the handle
//! of the one frame it has asked the host for. Each fired frame runs one
//! tick: clear, draw ball, draw paddle, physics step, then either schedule
//! the next frame or stop.
//!
//! Restarting always cancels the pending frame first, so two loops can never
//! drive the same entities.

use std::collections::VecDeque;

use crate::renderer::{Palette, Surface2d, draw_ball, draw_paddle};
use crate::sim::{GameState, ReflectMode, StepOutcome};

/// Host-issued id for a requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Per-display-frame callback source
pub trait FrameScheduler {
    /// Ask for one callback on the next frame. `None` if the host refused.
    fn request_frame(&mut self) -> Option<FrameHandle>;
    /// Drop a request that has not fired yet
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Terminal until the session restarts the loop
    GameOver,
}

/// Tick scheduler and state machine
#[derive(Debug)]
pub struct GameLoop {
    state: LoopState,
    /// Frame requested but not yet fired
    pending: Option<FrameHandle>,
    /// Ticks run since the last restart
    ticks: u64,
}

impl GameLoop {
    /// A loop that has never been started. It schedules nothing and ignores
    /// frames until [`GameLoop::restart`].
    pub fn idle() -> Self {
        Self {
            state: LoopState::GameOver,
            pending: None,
            ticks: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Whether a frame is currently requested
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Cancel the pending frame, if any
    pub fn cancel<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
            log::debug!("Cancelled frame {:?}", handle);
        }
    }

    /// Enter Running with a fresh tick count and exactly one frame pending
    pub fn restart<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.cancel(scheduler);
        self.state = LoopState::Running;
        self.ticks = 0;
        self.schedule(scheduler);
    }

    fn schedule<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        debug_assert!(self.pending.is_none(), "frame already pending");
        self.pending = scheduler.request_frame();
        if self.pending.is_none() {
            log::error!("Host refused to schedule a frame, loop stalled");
        }
    }

    /// Handle a fired frame.
    ///
    /// Returns `None` when no frame was pending (a stale callback from a
    /// cancelled request) or the loop is over.
    pub fn run_frame<D, S>(
        &mut self,
        state: &mut GameState,
        palette: &Palette,
        mode: ReflectMode,
        surface: &mut D,
        scheduler: &mut S,
    ) -> Option<StepOutcome>
    where
        D: Surface2d + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        if self.pending.take().is_none() {
            log::warn!("Ignoring frame with nothing scheduled");
            return None;
        }
        if self.state == LoopState::GameOver {
            return None;
        }

        surface.clear(state.bounds.width, state.bounds.height);
        draw_ball(surface, &state.ball, palette.ball);
        draw_paddle(surface, &state.paddle, palette.paddle);

        let outcome = state.step(mode);
        self.ticks += 1;

        if outcome.game_over {
            self.state = LoopState::GameOver;
            log::info!(
                "Game over after {} ticks, score {}",
                self.ticks,
                state.score.value()
            );
        } else {
            self.schedule(scheduler);
        }

        Some(outcome)
    }
}

/// Scheduler that queues requests until they are fired by hand.
///
/// Drives the loop without a display: tests and the native build fire frames
/// one at a time with [`QueuedFrames::fire`].
#[derive(Debug, Default)]
pub struct QueuedFrames {
    next_id: i32,
    queue: VecDeque<FrameHandle>,
    requested: u64,
    cancelled: u64,
}

impl QueuedFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests not yet fired or cancelled
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn requested(&self) -> u64 {
        self.requested
    }

    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }

    /// Pop the oldest request. Returns `None` when nothing is queued.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.queue.pop_front()
    }
}

impl FrameScheduler for QueuedFrames {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_id += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next_id);
        self.queue.push_back(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.queue.len();
        self.queue.retain(|h| *h != handle);
        if self.queue.len() < before {
            self.cancelled += 1;
        }
    }
}
