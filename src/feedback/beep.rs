//! cpal tone generator
//!
//! Plays a short sine cue on the default output device. The stream is set
//! up on a detached thread so `emit` returns immediately.

use crate::feedback::FeedbackCue;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::time::Duration;

const CUE_FREQUENCY_HZ: f32 = 880.0;
const CUE_DURATION: Duration = Duration::from_millis(150);

/// Synthesize the cue as f32 samples at `sample_rate`
///
/// Amplitude scales linearly with `volume`; zero volume yields no samples.
pub fn tone_samples(volume: f32, sample_rate: u32) -> Vec<f32> {
    let volume = volume.clamp(0.0, 1.0);
    if volume == 0.0 {
        return Vec::new();
    }

    let total = (sample_rate as f32 * CUE_DURATION.as_secs_f32()) as usize;
    (0..total)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            volume * (2.0 * std::f32::consts::PI * CUE_FREQUENCY_HZ * t).sin()
        })
        .collect()
}

/// Default-output-device cue playback
#[derive(Debug, Default, Clone, Copy)]
pub struct CpalBeeper;

impl CpalBeeper {
    pub fn new() -> Self {
        Self
    }
}

impl FeedbackCue for CpalBeeper {
    fn emit(&self, volume: f32) {
        // Zero volume short-circuits before touching any device.
        if volume <= 0.0 {
            return;
        }

        std::thread::spawn(move || {
            if let Err(e) = play_cue(volume) {
                tracing::warn!("Feedback cue skipped: {e}");
            }
        });
    }
}

fn play_cue(volume: f32) -> Result<(), anyhow::Error> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("no output device"))?;
    let config = device.default_output_config()?;

    if config.sample_format() != cpal::SampleFormat::F32 {
        anyhow::bail!("unsupported output sample format {:?}", config.sample_format());
    }

    let stream_config: cpal::StreamConfig = config.into();
    let sample_rate = stream_config.sample_rate.0;
    let channels = stream_config.channels as usize;
    let samples = tone_samples(volume, sample_rate);
    let mut cursor = 0usize;

    let stream = device.build_output_stream(
        &stream_config,
        move |out: &mut [f32], _| {
            for frame in out.chunks_mut(channels) {
                let s = samples.get(cursor).copied().unwrap_or(0.0);
                cursor += 1;
                for sample in frame {
                    *sample = s;
                }
            }
        },
        |e| tracing::warn!("Cue stream error: {e}"),
        None,
    )?;

    stream.play()?;
    std::thread::sleep(CUE_DURATION + Duration::from_millis(50));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_volume_is_silent() {
        assert!(tone_samples(0.0, 48_000).is_empty());
    }

    #[test]
    fn test_amplitude_scales_with_volume() {
        let peak = |v: f32| {
            tone_samples(v, 48_000)
                .iter()
                .fold(0.0f32, |m, s| m.max(s.abs()))
        };

        let quarter = peak(0.25);
        let half = peak(0.5);
        let full = peak(1.0);

        assert!(quarter < half && half < full);
        assert!((full - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_volume_clamped_above_one() {
        let over = tone_samples(3.0, 48_000);
        assert!(over.iter().all(|s| s.abs() <= 1.0));
    }
}
