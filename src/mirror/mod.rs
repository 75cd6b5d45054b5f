//! Render loop plumbing: tick scheduling, time, and the loop itself.

mod clock;
mod render_loop;
mod scheduler;

pub use clock::{Clock, MonotonicClock};
pub use render_loop::{LoopState, RenderLoop};
pub use scheduler::{RefreshScheduler, Scheduler, TickHandle};
