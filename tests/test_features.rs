use fractal_pulse::features::{
    amplitude, rms, AudioFeatureSample, BassAnalyzer, FeatureTracker, BASS_WINDOW,
};

const SAMPLE_RATE: u32 = 48_000;
const BLOCK_LEN: usize = 4_800; // 0.1 s, 10 Hz bin resolution

fn sine_block(freq: f64, gain: f32) -> Vec<f32> {
    (0..BLOCK_LEN)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE as f64;
            ((2.0 * std::f64::consts::PI * freq * t).sin() as f32) * gain
        })
        .collect()
}

#[test]
fn amplitude_is_peak_absolute_value_clamped() {
    assert_eq!(amplitude(&[]), 0.0);
    assert!((amplitude(&[0.25, -0.5, 0.1]) - 0.5).abs() < 1e-9);
    assert_eq!(amplitude(&[3.0, -4.0]), 1.0);
}

#[test]
fn rms_of_a_constant_signal_is_its_magnitude() {
    assert_eq!(rms(&[]), 0.0);
    assert!((rms(&[0.5; 1024]) - 0.5).abs() < 1e-6);
    assert_eq!(rms(&[2.0; 16]), 1.0);
}

#[test]
fn bass_density_prefers_low_frequencies() {
    let mut analyzer = BassAnalyzer::new(SAMPLE_RATE);
    let bass = analyzer.bass_density(&sine_block(100.0, 0.8));
    let treble = analyzer.bass_density(&sine_block(2_000.0, 0.8));
    assert!(bass > 10.0 * treble.max(1e-9));
}

#[test]
fn bass_density_scales_with_gain() {
    let mut analyzer = BassAnalyzer::new(SAMPLE_RATE);
    let quiet = analyzer.bass_density(&sine_block(60.0, 0.1));
    let loud = analyzer.bass_density(&sine_block(60.0, 0.8));
    assert!(loud > 5.0 * quiet);
}

#[test]
fn no_kick_while_history_is_warming_up() {
    let mut tracker = FeatureTracker::new(SAMPLE_RATE);
    let block = sine_block(100.0, 0.9);
    for _ in 0..BASS_WINDOW - 1 {
        let sample = tracker.process_block(&block);
        assert!(!sample.kick_detected, "kick before the window filled");
    }
}

#[test]
fn loud_bass_after_warm_up_fires_a_kick() {
    let mut tracker = FeatureTracker::new(SAMPLE_RATE);
    let quiet = sine_block(100.0, 0.01);
    for _ in 0..BASS_WINDOW {
        tracker.process_block(&quiet);
    }
    let sample = tracker.process_block(&sine_block(100.0, 0.9));
    assert!(sample.kick_detected);
}

#[test]
fn steady_signal_never_reads_as_a_kick() {
    // A constant-energy signal cannot beat the margin against its own history.
    let mut tracker = FeatureTracker::new(SAMPLE_RATE);
    let block = sine_block(100.0, 0.5);
    for _ in 0..BASS_WINDOW + 20 {
        let sample = tracker.process_block(&block);
        assert!(!sample.kick_detected);
    }
}

#[test]
fn features_are_finite_for_noise() {
    let mut tracker = FeatureTracker::new(SAMPLE_RATE);
    let noise: Vec<f32> = (0..BLOCK_LEN)
        .map(|_| rand::random::<f32>() * 2.0 - 1.0)
        .collect();
    for _ in 0..8 {
        let sample = tracker.process_block(&noise);
        assert!(sample.amplitude.is_finite());
        assert!(sample.rms.is_finite());
        assert!(sample.bass_density.is_finite());
        assert!(sample.amplitude <= 1.0 && sample.rms <= 1.0);
    }
}

#[test]
fn snapshot_round_trips_through_json() {
    let sample = AudioFeatureSample {
        amplitude: 0.7,
        rms: 0.4,
        kick_detected: true,
        bass_density: 1234.5,
    };
    let json = serde_json::to_string(&sample).unwrap();
    let back: AudioFeatureSample = serde_json::from_str(&json).unwrap();
    assert_eq!(sample, back);
}
