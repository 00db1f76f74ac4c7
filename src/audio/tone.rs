// Tone generator - pulse trains for audible cues
// Sample-accurate, allocation-free once constructed: safe to run inside the
// audio callback.

use std::f32::consts::PI;

/// Length of one pulse (and spacing between pulse starts) in seconds
pub const PULSE_SECONDS: f32 = 0.25;

/// Linear attack length in seconds
const ATTACK_SECONDS: f32 = 0.04;

/// Envelope peak reached at the end of the attack
const PEAK_GAIN: f32 = 0.15;

/// Envelope floor reached at the end of the pulse
const FLOOR_GAIN: f32 = 0.001;

/// Gain of a pulse `t` seconds after its start
/// Linear ramp 0 -> peak over the attack, then exponential decay to the floor
/// at the end of the pulse, silence afterwards.
pub fn pulse_envelope(t: f32) -> f32 {
    if !(0.0..PULSE_SECONDS).contains(&t) {
        return 0.0;
    }
    if t < ATTACK_SECONDS {
        return PEAK_GAIN * t / ATTACK_SECONDS;
    }
    let decay_progress = (t - ATTACK_SECONDS) / (PULSE_SECONDS - ATTACK_SECONDS);
    PEAK_GAIN * (FLOOR_GAIN / PEAK_GAIN).powf(decay_progress)
}

/// Active pulse train
#[derive(Debug, Clone, Copy)]
struct PulseTrain {
    frequency: f32,
    pulses: u32,
    position: usize, // Samples since the first pulse started
}

/// Pulse train generator
/// A new trigger replaces whatever train is still playing.
#[derive(Debug, Clone)]
pub struct ToneGenerator {
    sample_rate: f32,
    pulse_samples: usize,
    volume: f32,
    current: Option<PulseTrain>,
}

impl ToneGenerator {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            pulse_samples: (PULSE_SECONDS * sample_rate) as usize,
            volume: 1.0,
            current: None,
        }
    }

    /// Set output volume (0.0 to 1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Samples in one pulse
    pub fn pulse_samples(&self) -> usize {
        self.pulse_samples
    }

    /// Start a train of `pulses` tones at `frequency` Hz
    pub fn trigger(&mut self, pulses: u32, frequency: f32) {
        if pulses == 0 {
            return;
        }
        self.current = Some(PulseTrain {
            frequency,
            pulses,
            position: 0,
        });
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Process one sample of output (0.0 when idle)
    pub fn process_sample(&mut self) -> f32 {
        let Some(ref mut train) = self.current else {
            return 0.0;
        };

        let pulse_index = train.position / self.pulse_samples;
        if pulse_index >= train.pulses as usize {
            // Train finished
            self.current = None;
            return 0.0;
        }

        let offset = train.position % self.pulse_samples;
        let t = offset as f32 / self.sample_rate;
        let sample = (2.0 * PI * train.frequency * t).sin() * pulse_envelope(t) * self.volume;

        train.position += 1;
        sample
    }

    /// Fill a buffer with output
    pub fn process_buffer(&mut self, output: &mut [f32]) {
        for sample in output.iter_mut() {
            *sample = self.process_sample();
        }
    }
}
