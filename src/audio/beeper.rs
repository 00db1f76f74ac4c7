// Beeper - audible cue output over a CPAL stream
//
// The UI thread pushes `BeepRequest`s into a lock-free ringbuffer; the audio
// callback pops them and renders pulse trains with `ToneGenerator`. Stream
// errors travel back to the UI through the notification channel.
//
// Supported device sample formats: F32, I16, U16. Everything is rendered in
// f32 and converted per frame while writing the output buffer.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, Sample, SampleFormat, SizedSample, Stream, StreamConfig};
use ringbuf::traits::{Consumer, Producer};

use crate::audio::tone::ToneGenerator;
use crate::messaging::channels::{
    BeepConsumer, BeepProducer, BeepRequest, NotificationProducer, create_beep_channel,
};
use crate::messaging::notification::{Notification, NotificationCategory};
use crate::sequencer::state::Cue;

/// Pending beep requests the audio thread can lag behind by
const BEEP_QUEUE_CAPACITY: usize = 16;

/// Audio output errors
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("No audio output device found")]
    NoDevice,

    #[error("Audio configuration error: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),

    #[error("Error in stream creation: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("Cannot start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("Unsupported sample format: {0}. Supported formats: F32, I16, U16")]
    UnsupportedFormat(String),
}

/// Something that can sound cues
/// Fire-and-forget: implementations swallow their own failures.
pub trait CueEmitter {
    /// Play `pulses` short tones at `frequency` Hz, 0.25 s apart
    fn beep(&mut self, pulses: u32, frequency: f32);

    fn emit(&mut self, cue: Cue) {
        self.beep(cue.pulses(), cue.frequency());
    }
}

/// Emitter used when audio is disabled or unavailable
#[derive(Debug, Default)]
pub struct SilentBeeper;

impl CueEmitter for SilentBeeper {
    fn beep(&mut self, pulses: u32, frequency: f32) {
        tracing::trace!(pulses, frequency, "beep (silent)");
    }
}

/// CPAL-backed cue emitter
pub struct Beeper {
    _device: Device,
    _stream: Stream,
    beep_tx: BeepProducer,
}

impl Beeper {
    /// Open the default output device and start a stream
    pub fn new(volume: f32, notification_tx: NotificationProducer) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;

        let supported_config = device.default_output_config()?;
        let sample_format = supported_config.sample_format();
        let sample_rate = supported_config.sample_rate().0 as f32;
        let channels = supported_config.channels() as usize;
        let config: StreamConfig = supported_config.into();

        tracing::info!(
            device = %device.name().unwrap_or_else(|_| "Unknown".to_string()),
            sample_rate,
            channels,
            format = ?sample_format,
            "audio output"
        );

        let (beep_tx, beep_rx) = create_beep_channel(BEEP_QUEUE_CAPACITY);
        let mut tone = ToneGenerator::new(sample_rate);
        tone.set_volume(volume);

        let stream = match sample_format {
            SampleFormat::F32 => {
                Self::build_stream::<f32>(&device, &config, channels, beep_rx, tone, notification_tx)
            }
            SampleFormat::I16 => {
                Self::build_stream::<i16>(&device, &config, channels, beep_rx, tone, notification_tx)
            }
            SampleFormat::U16 => {
                Self::build_stream::<u16>(&device, &config, channels, beep_rx, tone, notification_tx)
            }
            other => return Err(AudioError::UnsupportedFormat(format!("{:?}", other))),
        }?;

        stream.play()?;

        Ok(Self {
            _device: device,
            _stream: stream,
            beep_tx,
        })
    }

    fn build_stream<T>(
        device: &Device,
        config: &StreamConfig,
        channels: usize,
        mut beep_rx: BeepConsumer,
        mut tone: ToneGenerator,
        mut notification_tx: NotificationProducer,
    ) -> Result<Stream, AudioError>
    where
        T: SizedSample + FromSample<f32> + Send + 'static,
    {
        let stream = device.build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                // No allocations, no I/O, no locks in here
                while let Some(request) = beep_rx.try_pop() {
                    tone.trigger(request.pulses, request.frequency);
                }

                for frame in data.chunks_mut(channels) {
                    write_mono_frame(tone.process_sample(), frame);
                }
            },
            move |err| {
                // Runs outside the real-time callback: I/O is fine
                tracing::error!(error = %err, "audio stream error");
                let notif = Notification::error(
                    NotificationCategory::Audio,
                    format!("Audio stream error: {}", err),
                );
                let _ = notification_tx.try_push(notif);
            },
            None,
        )?;

        Ok(stream)
    }
}

impl CueEmitter for Beeper {
    fn beep(&mut self, pulses: u32, frequency: f32) {
        if self.beep_tx.try_push(BeepRequest { pulses, frequency }).is_err() {
            tracing::debug!(pulses, frequency, "beep queue full, dropping cue");
        }
    }
}

/// Write one mono sample to every channel of an interleaved frame
#[inline]
fn write_mono_frame<T>(sample: f32, frame: &mut [T])
where
    T: Sample + FromSample<f32>,
{
    for channel_sample in frame.iter_mut() {
        *channel_sample = Sample::from_sample::<f32>(sample);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(u32, f32)>);

    impl CueEmitter for Recorder {
        fn beep(&mut self, pulses: u32, frequency: f32) {
            self.0.push((pulses, frequency));
        }
    }

    #[test]
    fn test_emit_maps_cue_to_beep() {
        let mut recorder = Recorder::default();
        recorder.emit(Cue::Warning);
        recorder.emit(Cue::Complete);
        assert_eq!(recorder.0, vec![(1, 440.0), (3, 620.0)]);
    }

    #[test]
    fn test_silent_beeper_accepts_cues() {
        let mut silent = SilentBeeper;
        silent.emit(Cue::Transition);
    }

    #[test]
    fn test_write_mono_frame() {
        let mut stereo = [0.0f32; 2];
        write_mono_frame(0.5, &mut stereo);
        assert_eq!(stereo, [0.5, 0.5]);

        let mut ints = [0i16; 2];
        write_mono_frame(0.5, &mut ints);
        assert!(ints[0] > 0);
        assert_eq!(ints[0], ints[1]);
    }
}
