use fractal_pulse::complex::Complex;
use fractal_pulse::compositor::KickState;
use fractal_pulse::engine::{
    AnimationContext, AnimationLoop, ConstantDrift, FrameSink, InputEvent, PanDirection,
};
use fractal_pulse::features::AudioFeatureSample;
use fractal_pulse::kernel::{FamilyParams, FractalParams};
use fractal_pulse::palette::{ColorTable, PaletteMorphState};
use fractal_pulse::viewport::{Viewport, ViewportController};

const WIDTH: usize = 16;
const HEIGHT: usize = 12;

fn tiny_context(family: FamilyParams, drift: Option<ConstantDrift>) -> AnimationContext {
    let viewport = ViewportController::new(Viewport::new(-2.0, 2.0, -2.0, 2.0), 0.985, (0.0, 0.0), 60);
    let params = FractalParams {
        max_iterations: 24,
        rotation_degrees: 0.0,
        rotation_speed: 0.3,
        family,
    };
    let tables = vec![
        ColorTable::from_control_points(&[[0.0, 0.0, 0.0], [255.0, 255.0, 255.0]], 24),
        ColorTable::from_control_points(&[[0.0, 0.0, 0.0], [255.0, 64.0, 32.0]], 24),
    ];
    AnimationContext::new(
        WIDTH,
        HEIGHT,
        viewport,
        params,
        PaletteMorphState::new(tables, 50),
        KickState::new(3),
        drift,
    )
}

fn julia_family() -> FamilyParams {
    FamilyParams::Julia {
        constant: Complex::new(-0.8, 0.156),
    }
}

fn snapshot(kick: bool) -> AudioFeatureSample {
    AudioFeatureSample {
        amplitude: 0.5,
        rms: 0.3,
        kick_detected: kick,
        bass_density: 100.0,
    }
}

#[test]
fn advance_frame_yields_full_rgb_buffer() {
    let mut ctx = tiny_context(FamilyParams::Mandelbrot, None);
    let frame = ctx.advance_frame(&[], None);
    assert_eq!(frame.len(), WIDTH * HEIGHT * 3);
}

#[test]
fn quit_event_sets_the_flag() {
    let mut ctx = tiny_context(FamilyParams::Mandelbrot, None);
    assert!(!ctx.should_quit());
    ctx.advance_frame(&[InputEvent::Quit], None);
    assert!(ctx.should_quit());
}

#[test]
fn audio_kick_triggers_the_pulse() {
    let mut ctx = tiny_context(julia_family(), None);
    ctx.advance_frame(&[], Some(&snapshot(false)));
    assert!(!ctx.kick.is_active());
    // Trigger loads the full pulse; composing the frame decays it once.
    ctx.advance_frame(&[], Some(&snapshot(true)));
    assert!(ctx.kick.is_active());
}

#[test]
fn manual_kick_event_matches_audio_kick() {
    let mut ctx = tiny_context(julia_family(), None);
    ctx.advance_frame(&[InputEvent::TriggerKick], None);
    assert!(ctx.kick.is_active());
}

#[test]
fn julia_constant_drifts_with_zoom_progress() {
    let base = Complex::new(-0.8, 0.156);
    let per_tick = Complex::new(3e-5, -1e-5);
    let mut ctx = tiny_context(julia_family(), Some(ConstantDrift { base, per_tick }));
    // Drift reads the zoom counter before the viewport advances, so the
    // second frame sees one elapsed tick.
    ctx.advance_frame(&[], None);
    ctx.advance_frame(&[], None);
    match ctx.params.family {
        FamilyParams::Julia { constant } => {
            assert!((constant.re - (base.re + per_tick.re)).abs() < 1e-12);
            assert!((constant.im - (base.im + per_tick.im)).abs() < 1e-12);
        }
        FamilyParams::Mandelbrot => panic!("family changed"),
    }
}

#[test]
fn rotation_toggle_flips_between_zero_and_base_speed() {
    let mut ctx = tiny_context(julia_family(), None);
    ctx.advance_frame(&[InputEvent::ToggleRotation], None);
    assert_eq!(ctx.params.rotation_speed, 0.0);
    ctx.advance_frame(&[InputEvent::ToggleRotation], None);
    assert_eq!(ctx.params.rotation_speed, 0.3);
}

#[test]
fn rotation_adjustment_accumulates() {
    let mut ctx = tiny_context(julia_family(), None);
    ctx.advance_frame(&[InputEvent::AdjustRotation(0.1)], None);
    assert!((ctx.params.rotation_speed - 0.4).abs() < 1e-12);
    ctx.advance_frame(&[InputEvent::AdjustRotation(-0.2)], None);
    assert!((ctx.params.rotation_speed - 0.2).abs() < 1e-12);
}

#[test]
fn pan_event_shifts_the_viewport() {
    let mut ctx = tiny_context(FamilyParams::Mandelbrot, None);
    let before = *ctx.viewport.viewport();
    ctx.advance_frame(&[InputEvent::Pan(PanDirection::Right)], None);
    assert!(ctx.viewport.viewport().x_min > before.x_min);
}

struct CountingSink {
    frames: usize,
}

impl FrameSink for CountingSink {
    fn present(&mut self, frame: &[u8], width: usize, height: usize) {
        assert_eq!(frame.len(), width * height * 3);
        self.frames += 1;
    }
}

#[test]
fn loop_runs_until_quit() {
    let ctx = tiny_context(FamilyParams::Mandelbrot, None);
    let mut animation = AnimationLoop::new(ctx, 1_000);
    let mut sink = CountingSink { frames: 0 };
    let mut polls = 0;
    animation.run(
        || {
            polls += 1;
            if polls >= 3 {
                vec![InputEvent::Quit]
            } else {
                Vec::new()
            }
        },
        &mut sink,
    );
    assert_eq!(sink.frames, 3);
    assert!(animation.context().should_quit());
}
