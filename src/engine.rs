//! Per-frame orchestration: input, audio, state advance, render, present.
//!
//! `AnimationContext` exclusively owns every piece of visual state for the
//! frame in progress - viewport, fractal parameters, palette morph, kick -
//! replacing the original scripts' module-level globals with one explicit
//! struct. `AnimationLoop` drives the fixed-rate frame cycle around it; the
//! display surface stays behind the [`FrameSink`] trait and the audio
//! producer is reached only through its hand-off cell.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use ndarray::Array2;
use tracing::{debug, info};

use crate::complex::Complex;
use crate::compositor::{compose, KickState};
use crate::features::AudioFeatureSample;
use crate::kernel::{escape_grid, FamilyParams, FractalParams};
use crate::palette::PaletteMorphState;
use crate::producer::LatestCell;
use crate::viewport::{ViewportController, PAN_STEP};

/// The entire keyboard contract, mapped to direct state mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Pan(PanDirection),
    /// Add a fixed step to the rotation speed (degrees per tick).
    AdjustRotation(f64),
    /// Flip rotation speed between zero and the configured base speed.
    ToggleRotation,
    TriggerKick,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Slow drift applied to the Julia constant, tied to the zoom progress
/// counter so the set morphs while the camera dives.
#[derive(Clone, Copy, Debug)]
pub struct ConstantDrift {
    pub base: Complex,
    pub per_tick: Complex,
}

/// Exclusively owned animation state for the frame in progress.
pub struct AnimationContext {
    width: usize,
    height: usize,
    pub viewport: ViewportController,
    pub params: FractalParams,
    pub morph: PaletteMorphState,
    pub kick: KickState,
    julia_motion: Option<ConstantDrift>,
    base_rotation_speed: f64,
    grid: Array2<u32>,
    frame: Vec<u8>,
    quit: bool,
}

impl AnimationContext {
    pub fn new(
        width: usize,
        height: usize,
        viewport: ViewportController,
        params: FractalParams,
        morph: PaletteMorphState,
        kick: KickState,
        julia_motion: Option<ConstantDrift>,
    ) -> Self {
        let base_rotation_speed = params.rotation_speed;
        Self {
            width,
            height,
            viewport,
            params,
            morph,
            kick,
            julia_motion,
            base_rotation_speed,
            grid: Array2::zeros((height, width)),
            frame: Vec::with_capacity(width * height * 3),
            quit: false,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True once a `Quit` event has been consumed.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Advance every animation subsystem by one tick and render the frame.
    ///
    /// `audio` is the latest feature snapshot, if any arrived since the
    /// previous frame; `None` is the normal no-new-data case and mutates
    /// nothing.
    pub fn advance_frame(
        &mut self,
        events: &[InputEvent],
        audio: Option<&AudioFeatureSample>,
    ) -> &[u8] {
        for event in events {
            self.apply_event(*event);
        }

        if let Some(sample) = audio {
            if sample.kick_detected {
                self.kick.trigger();
            }
        }

        self.params.tick_rotation();
        self.drift_constant();
        self.morph.tick();
        self.viewport.tick();

        self.grid = escape_grid(self.viewport.viewport(), self.width, self.height, &self.params);
        compose(
            &self.grid,
            self.morph.current_table(),
            &mut self.kick,
            &mut self.frame,
        );
        &self.frame
    }

    /// The most recently composed frame, row-major RGB8.
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    fn apply_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pan(direction) => {
                let (dx, dy) = match direction {
                    PanDirection::Left => (-PAN_STEP, 0.0),
                    PanDirection::Right => (PAN_STEP, 0.0),
                    PanDirection::Up => (0.0, -PAN_STEP),
                    PanDirection::Down => (0.0, PAN_STEP),
                };
                self.viewport.pan(dx, dy);
            }
            InputEvent::AdjustRotation(delta) => {
                self.params.rotation_speed += delta;
            }
            InputEvent::ToggleRotation => {
                self.params.rotation_speed = if self.params.rotation_speed != 0.0 {
                    0.0
                } else {
                    self.base_rotation_speed
                };
            }
            InputEvent::TriggerKick => self.kick.trigger(),
            InputEvent::Quit => {
                debug!("quit requested");
                self.quit = true;
            }
        }
    }

    fn drift_constant(&mut self) {
        if let (Some(drift), FamilyParams::Julia { constant }) =
            (&self.julia_motion, &mut self.params.family)
        {
            let ticks = self.viewport.zoom_iteration() as f64;
            *constant = drift.base.add(drift.per_tick.scale(ticks));
        }
    }
}

/// Display collaborator: receives each composed frame.
pub trait FrameSink {
    fn present(&mut self, frame: &[u8], width: usize, height: usize);
}

/// Fixed-rate frame loop around an [`AnimationContext`].
pub struct AnimationLoop {
    ctx: AnimationContext,
    audio: Option<Arc<LatestCell<AudioFeatureSample>>>,
    frame_interval: Duration,
}

impl AnimationLoop {
    pub fn new(ctx: AnimationContext, fps: u32) -> Self {
        debug_assert!(fps > 0, "frame rate must be positive");
        Self {
            ctx,
            audio: None,
            frame_interval: Duration::from_secs(1) / fps,
        }
    }

    /// Attach the audio producer's hand-off cell.
    pub fn with_audio(mut self, cell: Arc<LatestCell<AudioFeatureSample>>) -> Self {
        self.audio = Some(cell);
        self
    }

    pub fn context(&self) -> &AnimationContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut AnimationContext {
        &mut self.ctx
    }

    /// Run frames until a `Quit` event is consumed.
    ///
    /// `poll_events` is called once per frame (the windowing collaborator's
    /// event pump); the audio cell is polled non-blocking and an empty poll
    /// is a no-op. Pacing sleeps off whatever remains of the frame budget.
    pub fn run<F, S>(&mut self, mut poll_events: F, sink: &mut S)
    where
        F: FnMut() -> Vec<InputEvent>,
        S: FrameSink,
    {
        info!(
            width = self.ctx.width(),
            height = self.ctx.height(),
            "animation loop started"
        );
        let (width, height) = (self.ctx.width, self.ctx.height);
        while !self.ctx.should_quit() {
            let start = Instant::now();
            let events = poll_events();
            let audio = self.audio.as_ref().and_then(|cell| cell.take());

            let frame = self.ctx.advance_frame(&events, audio.as_deref());
            sink.present(frame, width, height);

            let elapsed = start.elapsed();
            if elapsed < self.frame_interval {
                thread::sleep(self.frame_interval - elapsed);
            }
        }
        info!("animation loop stopped");
    }
}
