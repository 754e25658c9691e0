//! Audio-reactive escape-time fractal animation engine.
//!
//! This crate centralises the real-time core of the visualizer:
//!
//! 1. **Kernels** – escape-time computation for the Mandelbrot and Julia
//!    families over the current viewport, row-parallel with no cross-pixel
//!    state.
//! 2. **Animation state** – the viewport zoom/bounce state machine, palette
//!    construction and morphing, and the transient kick pulse, all owned by
//!    one explicit context struct and advanced once per frame.
//! 3. **Audio features** – a producer thread that turns capture blocks into
//!    smoothed loudness and kick-onset snapshots, handed to the render loop
//!    through a single-slot newest-wins cell.
//!
//! Window/display creation, input polling and audio device capture stay
//! outside the crate; they plug in through the [`engine::FrameSink`] and
//! [`producer::AudioSource`] traits.

pub mod complex;
pub mod compositor;
pub mod config;
pub mod engine;
pub mod features;
pub mod gradients;
pub mod kernel;
pub mod palette;
pub mod producer;
pub mod viewport;
