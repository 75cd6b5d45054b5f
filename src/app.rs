//! Terminal driver for the mirror.
//!
//! Runs on a current-thread tokio runtime. A refresh interval fires the
//! render loop's pending tick and draws the canvas; key presses, resize
//! events and Ctrl+C are handled in the same `select!`.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::time::MissedTickBehavior;

use crate::camera::CameraSettings;
use crate::chaos::ChaosLevel;
use crate::config::Config;
use crate::error::MirrorError;
use crate::mirror::{RefreshScheduler, RenderLoop};
use crate::source::{CameraSource, FrameSource, StillSource};
use crate::surface::Canvas;
use crate::terminal::{StatusBar, Tui};

/// Where frames come from for this session.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceChoice {
    Camera(CameraSettings),
    Image { path: PathBuf, mirror: bool },
}

impl SourceChoice {
    fn build(&self) -> Box<dyn FrameSource> {
        match self {
            SourceChoice::Camera(settings) => Box::new(CameraSource::new(settings.clone())),
            SourceChoice::Image { path, mirror } => {
                Box::new(StillSource::from_path(path).mirrored(*mirror))
            }
        }
    }
}

/// Everything a mirror session needs, resolved from config and CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct MirrorOptions {
    pub chaos: ChaosLevel,
    pub fps: u32,
    pub seed: Option<u64>,
    pub source: SourceChoice,
    pub status_bar: bool,
}

impl MirrorOptions {
    /// `image` replaces the camera when given.
    pub fn from_config(config: &Config, image: Option<PathBuf>) -> Self {
        let source = match image {
            Some(path) => SourceChoice::Image {
                path,
                mirror: config.camera.mirror,
            },
            None => SourceChoice::Camera(config.camera_settings()),
        };

        Self {
            chaos: config.chaos(),
            fps: config.mirror.fps.max(1),
            seed: config.mirror.seed,
            source,
            status_bar: config.ui.status_bar,
        }
    }

    fn refresh_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Quit on `q`, `Esc`, or `Ctrl+C` while the terminal is in raw mode.
pub fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn setup_ctrlc_handler() -> Result<Arc<AtomicBool>, ctrlc::Error> {
    let received = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&received);
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })?;
    Ok(received)
}

/// Run the mirror until the user quits.
///
/// # Errors
/// Returns [`MirrorError::Source`] when the frame source cannot be
/// acquired; the terminal is restored before returning.
pub fn run(options: MirrorOptions) -> Result<(), MirrorError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_mirror(options))
}

async fn run_mirror(options: MirrorOptions) -> Result<(), MirrorError> {
    let interrupted = setup_ctrlc_handler()?;

    let source = options.source.build();
    let label = source.label();
    let scheduler = RefreshScheduler::new();
    let mut mirror = RenderLoop::new(
        source,
        Canvas::default(),
        scheduler.clone(),
        options.rng(),
        options.chaos,
    );

    let mut tui = Tui::new()?;
    let status_bar = StatusBar::with_visibility(options.status_bar);

    let status = status_bar
        .visible
        .then(|| status_bar.format(options.chaos, &label));
    tui.draw_mirror(None, status.as_deref())?;

    if let Err(e) = mirror.start() {
        tui.restore()?;
        return Err(e.into());
    }
    // Cameras report their negotiated resolution once streaming
    let label = mirror.source().label();

    let mut refresh = tokio::time::interval(options.refresh_period());
    refresh.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut events = EventStream::new();

    loop {
        if interrupted.load(Ordering::SeqCst) {
            log::info!("Interrupted");
            break;
        }

        tokio::select! {
            _ = refresh.tick() => {
                if let Some(handle) = scheduler.take_due() {
                    mirror.fire(handle);
                }
                let canvas = (mirror.frames_drawn() > 0).then(|| mirror.surface());
                let status = status_bar
                    .visible
                    .then(|| status_bar.format(mirror.chaos(), &label));
                tui.draw_mirror(canvas, status.as_deref())?;
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if is_quit_key(&key) => break,
                Some(Ok(Event::Resize(..))) => tui.resize()?,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    log::warn!("Terminal event error: {}", e);
                    break;
                }
                None => break,
            },
        }
    }

    // Source first, then the terminal
    mirror.stop();
    tui.restore()?;
    Ok(())
}
