//! The mirror's render loop: one mosaic frame per display refresh.

use rand::Rng;

use super::clock::{Clock, MonotonicClock};
use super::scheduler::{Scheduler, TickHandle};
use crate::chaos::ChaosLevel;
use crate::mosaic::{FrameSkip, MosaicRenderer, RenderStats};
use crate::source::{FrameSource, SourceError};
use crate::surface::Surface;

/// Lifecycle of a [`RenderLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Constructed, not started.
    Idle,
    /// Source acquired; ticks are being scheduled.
    Running,
    /// Torn down. Terminal.
    Stopped,
    /// Source could not be acquired; nothing was ever drawn. Terminal.
    Failed,
}

/// Drives frame source -> mosaic renderer -> surface, once per tick.
///
/// Everything external is injected: the frame source, the output surface,
/// the tick scheduler, the random source and the clock. Tests can
/// substitute fakes and call [`RenderLoop::tick`] directly.
pub struct RenderLoop<F: FrameSource, S: Surface, K: Scheduler, R: Rng> {
    source: F,
    surface: S,
    scheduler: K,
    renderer: MosaicRenderer<R>,
    clock: Box<dyn Clock>,
    chaos: ChaosLevel,
    pending: Option<TickHandle>,
    state: LoopState,
    frames_drawn: u64,
    last_stats: Option<RenderStats>,
}

impl<F: FrameSource, S: Surface, K: Scheduler, R: Rng> RenderLoop<F, S, K, R> {
    pub fn new(source: F, surface: S, scheduler: K, rng: R, chaos: ChaosLevel) -> Self {
        Self {
            source,
            surface,
            scheduler,
            renderer: MosaicRenderer::new(rng),
            clock: Box::new(MonotonicClock::new()),
            chaos,
            pending: None,
            state: LoopState::Idle,
            frames_drawn: 0,
            last_stats: None,
        }
    }

    /// Replace the clock that feeds glyph flicker.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Acquire the frame source and schedule the first tick.
    ///
    /// On failure nothing is scheduled, the loop is `Failed`, and the
    /// error is handed back for the caller to show. Starting a running
    /// loop is a no-op; a `Failed` or `Stopped` loop cannot be restarted.
    pub fn start(&mut self) -> Result<(), SourceError> {
        match self.state {
            LoopState::Idle => {}
            LoopState::Running => {
                log::debug!("Render loop already running");
                return Ok(());
            }
            LoopState::Stopped | LoopState::Failed => {
                log::warn!("Render loop cannot restart from {:?}", self.state);
                return Err(SourceError::AlreadyAcquired(self.source.state()));
            }
        }

        if let Err(e) = self.source.acquire() {
            self.state = LoopState::Failed;
            return Err(e);
        }

        log::info!(
            "Mirror running on {} (chaos {}, {}px cells)",
            self.source.label(),
            self.chaos,
            self.chaos.cell_size()
        );
        self.state = LoopState::Running;
        self.pending = Some(self.scheduler.request_tick());
        Ok(())
    }

    /// Run the tick identified by `handle` if it is still the pending one.
    ///
    /// Returns false for stale handles, e.g. ones that fire after `stop`.
    pub fn fire(&mut self, handle: TickHandle) -> bool {
        if self.pending != Some(handle) {
            log::trace!("Ignoring stale tick {}", handle.id());
            return false;
        }
        self.tick();
        true
    }

    /// Draw one frame if possible, then schedule the next tick.
    ///
    /// A missing or undecoded frame, or a grid that would be empty, skips
    /// drawing for this tick only. Returns what was drawn.
    pub fn tick(&mut self) -> Option<RenderStats> {
        if self.state != LoopState::Running {
            return None;
        }
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_tick(handle);
        }

        let drawn = self.draw();
        self.pending = Some(self.scheduler.request_tick());
        drawn
    }

    fn draw(&mut self) -> Option<RenderStats> {
        let Some(frame) = self.source.current_frame() else {
            log::trace!("{}", FrameSkip::NotReady);
            return None;
        };

        match self
            .renderer
            .render(&frame, self.chaos, self.clock.seconds(), &mut self.surface)
        {
            Ok(stats) => {
                self.frames_drawn += 1;
                self.last_stats = Some(stats);
                Some(stats)
            }
            Err(skip) => {
                log::debug!("Frame skipped: {}", skip);
                None
            }
        }
    }

    /// Cancel the pending tick and release the frame source. Idempotent.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_tick(handle);
        }
        self.source.release();
        if self.state == LoopState::Running || self.state == LoopState::Idle {
            log::info!("Mirror stopped after {} frame(s)", self.frames_drawn);
            self.state = LoopState::Stopped;
        }
    }

    pub fn chaos(&self) -> ChaosLevel {
        self.chaos
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn has_pending_tick(&self) -> bool {
        self.pending.is_some()
    }

    /// Frames actually drawn so far (skipped ticks excluded).
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn last_stats(&self) -> Option<RenderStats> {
        self.last_stats
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn source(&self) -> &F {
        &self.source
    }
}

impl<F: FrameSource, S: Surface, K: Scheduler, R: Rng> Drop for RenderLoop<F, S, K, R> {
    fn drop(&mut self) {
        self.stop();
    }
}
