/// Audio output: the sink trait, the cpal device sink and an in-memory sink
use std::sync::mpsc::{channel, Sender};
use std::thread;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SampleRate, SizedSample, StreamConfig};
use log::{debug, info};

use crate::error::AudioError;

/// Receives a finished mono buffer and renders it somewhere.
pub trait AudioSink {
    fn render(&mut self, sample_rate: u32, samples: Vec<f32>) -> Result<(), AudioError>;
}

/// Keeps the last buffer it was given.
#[derive(Debug, Default)]
pub struct BufferSink {
    sample_rate: Option<u32>,
    samples: Vec<f32>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample_rate(&self) -> Option<u32> {
        self.sample_rate
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

impl AudioSink for BufferSink {
    fn render(&mut self, sample_rate: u32, samples: Vec<f32>) -> Result<(), AudioError> {
        self.sample_rate = Some(sample_rate);
        self.samples = samples;
        Ok(())
    }
}

enum StreamEvent {
    Finished,
    Failed(String),
}

/// Plays buffers on the default output device, blocking until done.
pub struct CpalSink {
    /// Extra wait after the last sample is handed over, so the device can
    /// flush its own buffer before the stream is dropped
    drain: Duration,
}

impl CpalSink {
    pub fn new() -> Self {
        Self {
            drain: Duration::from_millis(200),
        }
    }

    pub fn with_drain(drain: Duration) -> Self {
        Self { drain }
    }
}

impl Default for CpalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSink for CpalSink {
    fn render(&mut self, sample_rate: u32, samples: Vec<f32>) -> Result<(), AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| AudioError::DeviceUnavailable("no default output device".to_string()))?;
        let default_config = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceUnavailable(e.to_string()))?;

        let sample_format = default_config.sample_format();
        let channels = default_config.channels();
        let device_rate = if supports_rate(&device, channels, sample_format, sample_rate) {
            sample_rate
        } else {
            default_config.sample_rate().0
        };

        info!(
            "Output device: {} ({} Hz, {} channels, {:?})",
            device.name().unwrap_or_else(|_| "unknown".to_string()),
            device_rate,
            channels,
            sample_format
        );

        if samples.is_empty() {
            debug!("Nothing to play");
            return Ok(());
        }

        let samples = if device_rate != sample_rate {
            debug!("Resampling {} Hz -> {} Hz", sample_rate, device_rate);
            resample_linear(&samples, sample_rate, device_rate)
        } else {
            samples
        };

        let config = StreamConfig {
            channels,
            sample_rate: SampleRate(device_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let (sender, receiver) = channel();
        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, samples, sender)?,
            SampleFormat::I16 => build_stream::<i16>(&device, &config, samples, sender)?,
            SampleFormat::U16 => build_stream::<u16>(&device, &config, samples, sender)?,
            other => {
                return Err(AudioError::Stream(format!(
                    "unsupported sample format {:?}",
                    other
                )))
            }
        };

        stream
            .play()
            .map_err(|e| AudioError::Stream(e.to_string()))?;

        match receiver.recv() {
            Ok(StreamEvent::Finished) => {
                thread::sleep(self.drain);
                Ok(())
            }
            Ok(StreamEvent::Failed(message)) => Err(AudioError::Stream(message)),
            Err(_) => Err(AudioError::Stream("stream closed unexpectedly".to_string())),
        }
    }
}

fn supports_rate(
    device: &cpal::Device,
    channels: u16,
    sample_format: SampleFormat,
    sample_rate: u32,
) -> bool {
    match device.supported_output_configs() {
        Ok(mut configs) => configs.any(|range| {
            range.channels() == channels
                && range.sample_format() == sample_format
                && range.min_sample_rate().0 <= sample_rate
                && sample_rate <= range.max_sample_rate().0
        }),
        Err(_) => false,
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    samples: Vec<f32>,
    events: Sender<StreamEvent>,
) -> Result<cpal::Stream, AudioError>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;
    let error_events = events.clone();
    let mut position = 0;
    let mut finished = false;

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                fill_frames(data, channels, &samples, &mut position);

                if !finished && position >= samples.len() {
                    finished = true;
                    let _ = events.send(StreamEvent::Finished);
                }
            },
            move |err| {
                let _ = error_events.send(StreamEvent::Failed(err.to_string()));
            },
            None,
        )
        .map_err(|e| AudioError::Stream(e.to_string()))
}

/// Copies mono `samples` from `position` into every channel of `data`,
/// padding with silence once they run out.
fn fill_frames<T>(data: &mut [T], channels: usize, samples: &[f32], position: &mut usize)
where
    T: Sample + FromSample<f32>,
{
    for frame in data.chunks_mut(channels) {
        let value = match samples.get(*position) {
            Some(sample) => {
                *position += 1;
                *sample
            }
            None => 0.0,
        };
        let value = <T as Sample>::from_sample(value);
        for out in frame.iter_mut() {
            *out = value;
        }
    }
}

/// Linear-interpolation resampler for devices that reject the synthesis rate.
pub fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate || samples.is_empty() || from_rate == 0 || to_rate == 0 {
        return samples.to_vec();
    }

    let last = samples.len() - 1;
    let out_len = (samples.len() as f64 * to_rate as f64 / from_rate as f64).round() as usize;
    let step = from_rate as f64 / to_rate as f64;

    (0..out_len)
        .map(|i| {
            let position = i as f64 * step;
            let index = (position.floor() as usize).min(last);
            let fraction = (position - index as f64) as f32;
            let a = samples[index];
            let b = samples[(index + 1).min(last)];
            a + (b - a) * fraction
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sink_records() {
        let mut sink = BufferSink::new();
        assert_eq!(sink.sample_rate(), None);

        sink.render(8000, vec![0.1, -0.2]).unwrap();
        assert_eq!(sink.sample_rate(), Some(8000));
        assert_eq!(sink.samples(), [0.1_f32, -0.2].as_slice());

        sink.render(16000, vec![0.5]).unwrap();
        assert_eq!(sink.into_samples(), vec![0.5]);
    }

    #[test]
    fn test_fill_frames_duplicates_channels() {
        let samples = [0.5_f32, -0.25, 1.0];
        let mut position = 0;

        let mut data = [0.0_f32; 4];
        fill_frames(&mut data, 2, &samples, &mut position);
        assert_eq!(data, [0.5, 0.5, -0.25, -0.25]);
        assert_eq!(position, 2);

        fill_frames(&mut data, 2, &samples, &mut position);
        assert_eq!(data, [1.0, 1.0, 0.0, 0.0]);
        assert_eq!(position, 3);
    }

    #[test]
    fn test_fill_frames_integer_silence() {
        let mut position = 0;
        let mut signed = [1_i16; 3];
        fill_frames(&mut signed, 1, &[], &mut position);
        assert_eq!(signed, [<i16 as Sample>::EQUILIBRIUM; 3]);

        let mut unsigned = [0_u16; 2];
        fill_frames(&mut unsigned, 2, &[], &mut position);
        assert_eq!(unsigned, [<u16 as Sample>::EQUILIBRIUM; 2]);
        assert_eq!(position, 0);
    }

    #[test]
    fn test_resample_same_rate() {
        let samples = vec![0.0, 0.5, -0.5];
        assert_eq!(resample_linear(&samples, 8000, 8000), samples);
    }

    #[test]
    fn test_resample_upsample_interpolates() {
        let out = resample_linear(&[0.0, 1.0], 8000, 16000);
        assert_eq!(out, vec![0.0, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn test_resample_downsample_length() {
        let samples: Vec<f32> = (0..480).map(|i| i as f32 / 480.0).collect();
        let out = resample_linear(&samples, 48000, 8000);
        assert_eq!(out.len(), 80);
        assert_eq!(out[1], samples[6]);
    }

    #[test]
    fn test_resample_empty() {
        assert!(resample_linear(&[], 8000, 44100).is_empty());
    }
}
