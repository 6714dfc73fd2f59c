//! Game session
//!
//! Owns the ball, paddle, score and loop. Everything else borrows them for
//! the length of one call: the loop for a tick, the input mapper for a
//! pointer event.

use crate::config::GameConfig;
use crate::game_loop::{FrameScheduler, GameLoop, LoopState};
use crate::platform::input::{PointerSample, SurfaceRect, move_paddle};
use crate::renderer::Surface2d;
use crate::sim::{Bounds, GameState, StepOutcome};
use crate::ui::Hud;

pub struct Session {
    config: GameConfig,
    state: GameState,
    game_loop: GameLoop,
}

impl Session {
    /// Create a session and start its first round
    pub fn new<S, H>(config: GameConfig, bounds: Bounds, scheduler: &mut S, hud: &mut H) -> Self
    where
        S: FrameScheduler + ?Sized,
        H: Hud + ?Sized,
    {
        let state = GameState::new(&config, bounds);
        let mut session = Self {
            config,
            state,
            game_loop: GameLoop::idle(),
        };
        session.initialize(scheduler, hud);
        session
    }

    /// Start a new round: cancel any pending frame, reset score and
    /// entities, hide game over, and schedule the first tick.
    ///
    /// Calling this twice in a row leaves the same state as calling it once.
    pub fn initialize<S, H>(&mut self, scheduler: &mut S, hud: &mut H)
    where
        S: FrameScheduler + ?Sized,
        H: Hud + ?Sized,
    {
        self.game_loop.cancel(scheduler);

        self.state = GameState::new(&self.config, self.state.bounds);
        hud.show_score(self.state.score.value());
        hud.set_game_over(false);

        self.game_loop.restart(scheduler);
        log::info!(
            "Session initialized on {}x{} surface",
            self.state.bounds.width,
            self.state.bounds.height
        );
    }

    /// Run the tick for a fired frame and push any score or game-over change
    /// to the HUD.
    pub fn on_frame<D, S, H>(
        &mut self,
        surface: &mut D,
        scheduler: &mut S,
        hud: &mut H,
    ) -> Option<StepOutcome>
    where
        D: Surface2d + ?Sized,
        S: FrameScheduler + ?Sized,
        H: Hud + ?Sized,
    {
        let outcome = self.game_loop.run_frame(
            &mut self.state,
            &self.config.palette,
            self.config.reflect_mode,
            surface,
            scheduler,
        )?;

        if outcome.paddle_hit {
            hud.show_score(self.state.score.value());
        }
        if outcome.game_over {
            hud.set_game_over(true);
        }
        Some(outcome)
    }

    /// Move the paddle under a pointer sample
    pub fn on_pointer(&mut self, rect: &SurfaceRect, sample: PointerSample) {
        move_paddle(
            &mut self.state.paddle,
            rect,
            sample,
            self.state.bounds.width,
        );
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn loop_state(&self) -> LoopState {
        self.game_loop.state()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_loop.state() == LoopState::GameOver
    }

    /// Ticks since the last `initialize`
    pub fn ticks(&self) -> u64 {
        self.game_loop.ticks()
    }

    pub fn score(&self) -> u32 {
        self.state.score.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_loop::QueuedFrames;
    use crate::renderer::ShapeBatch;
    use crate::ui::LogHud;
    use glam::Vec2;

    const BOUNDS: Bounds = Bounds::new(480.0, 400.0);

    struct Harness {
        session: Session,
        frames: QueuedFrames,
        hud: LogHud,
        surface: ShapeBatch,
    }

    impl Harness {
        fn new() -> Self {
            let mut frames = QueuedFrames::new();
            let mut hud = LogHud::default();
            let session = Session::new(GameConfig::default(), BOUNDS, &mut frames, &mut hud);
            Self {
                session,
                frames,
                hud,
                surface: ShapeBatch::new(),
            }
        }

        /// Fire every queued frame once. Returns how many fired.
        fn fire_pending(&mut self) -> usize {
            let mut fired = 0;
            for _ in 0..self.frames.pending() {
                if self.frames.fire().is_some() {
                    self.session
                        .on_frame(&mut self.surface, &mut self.frames, &mut self.hud);
                    fired += 1;
                }
            }
            fired
        }

        fn run(&mut self, n: usize) {
            for _ in 0..n {
                self.fire_pending();
            }
        }

        fn restart(&mut self) {
            self.session.initialize(&mut self.frames, &mut self.hud);
        }

        fn pointer_at(&mut self, x: f32) {
            let rect = SurfaceRect {
                left: 0.0,
                top: 0.0,
                width: BOUNDS.width,
                height: BOUNDS.height,
            };
            self.session.on_pointer(&rect, PointerSample::new(x, 0.0));
        }
    }

    #[test]
    fn test_startup_runs() {
        let h = Harness::new();
        assert_eq!(h.session.loop_state(), LoopState::Running);
        assert_eq!(h.frames.pending(), 1);
        assert_eq!(h.session.score(), 0);
        assert!(!h.hud.game_over);
    }

    #[test]
    fn test_n_frames_n_ticks() {
        let mut h = Harness::new();
        h.run(50);
        assert_eq!(h.session.ticks(), 50);
        assert_eq!(h.frames.pending(), 1);
    }

    #[test]
    fn test_restart_mid_session_resets_everything() {
        let mut h = Harness::new();
        let initial = h.session.state().clone();

        h.pointer_at(30.0);
        h.run(40);
        assert_ne!(h.session.state(), &initial);

        h.restart();
        assert_eq!(h.session.state(), &initial);
        assert_eq!(h.session.score(), 0);
        assert_eq!(h.hud.score, 0);
        assert_eq!(h.frames.pending(), 1);

        // One loop only: N fired frames are N ticks, not 2N
        h.run(30);
        assert_eq!(h.session.ticks(), 30);
        let expected = initial.ball.pos + initial.ball.vel * 30.0;
        assert_eq!(h.session.state().ball.pos, expected);
    }

    #[test]
    fn test_initialize_twice_same_as_once() {
        let mut once = Harness::new();
        once.run(10);
        once.restart();

        let mut twice = Harness::new();
        twice.run(10);
        twice.restart();
        twice.restart();

        assert_eq!(once.session.state(), twice.session.state());
        assert_eq!(once.frames.pending(), 1);
        assert_eq!(twice.frames.pending(), 1);

        once.run(20);
        twice.run(20);
        assert_eq!(once.session.state(), twice.session.state());
        assert_eq!(twice.session.ticks(), 20);
    }

    #[test]
    fn test_missed_ball_ends_game_until_restart() {
        let mut h = Harness::new();
        // Park the paddle in the right corner; the ball comes down on the left
        h.pointer_at(480.0);

        let mut frames = 0;
        while !h.session.is_game_over() {
            assert_eq!(h.fire_pending(), 1);
            frames += 1;
            assert!(frames < 2000, "game never ended");
        }

        assert!(h.hud.game_over);
        assert_eq!(h.frames.pending(), 0);
        let frozen = h.session.state().clone();
        let ticks = h.session.ticks();

        // Nothing runs while game over
        h.run(10);
        assert_eq!(h.session.state(), &frozen);
        assert_eq!(h.session.ticks(), ticks);

        h.restart();
        assert!(!h.hud.game_over);
        assert_eq!(h.session.loop_state(), LoopState::Running);
        h.run(5);
        assert_eq!(h.session.ticks(), 5);
    }

    #[test]
    fn test_tracking_paddle_scores() {
        let mut h = Harness::new();
        let mut last_score = 0;

        for _ in 0..1500 {
            let x = h.session.state().ball.pos.x;
            h.pointer_at(x);
            h.fire_pending();

            let score = h.session.score();
            assert!(score >= last_score);
            last_score = score;
        }

        assert!(!h.session.is_game_over());
        assert!(h.session.score() > 0);
        assert_eq!(h.hud.score, h.session.score());
    }

    #[test]
    fn test_pointer_only_moves_paddle_x() {
        let mut h = Harness::new();
        h.pointer_at(100.0);
        assert_eq!(h.session.state().paddle.pos, Vec2::new(60.0, 380.0));
        assert_eq!(h.session.state().ball, GameState::new(&GameConfig::default(), BOUNDS).ball);
    }
}
