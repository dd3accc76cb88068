use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::{anyhow, bail, Context};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use log::error;

const PITCH_HZ: f32 = 440.0;

/// A tone that is always streaming; `set_beeping` gates it between the sine
/// wave and silence so the cycle loop never waits on the audio device.
pub struct Sound {
    _stream: cpal::Stream,
    beeping: Arc<AtomicBool>,
}

impl Sound {
    pub fn new() -> anyhow::Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("no output device available"))?;
        let supported_config = device
            .default_output_config()
            .context("error while querying configs")?;
        let sample_format = supported_config.sample_format();
        let config: cpal::StreamConfig = supported_config.into();
        let beeping = Arc::new(AtomicBool::new(false));

        let stream = match sample_format {
            cpal::SampleFormat::I8 => Self::build::<i8>(&device, &config, &beeping),
            cpal::SampleFormat::I16 => Self::build::<i16>(&device, &config, &beeping),
            cpal::SampleFormat::I32 => Self::build::<i32>(&device, &config, &beeping),
            cpal::SampleFormat::I64 => Self::build::<i64>(&device, &config, &beeping),
            cpal::SampleFormat::U8 => Self::build::<u8>(&device, &config, &beeping),
            cpal::SampleFormat::U16 => Self::build::<u16>(&device, &config, &beeping),
            cpal::SampleFormat::U32 => Self::build::<u32>(&device, &config, &beeping),
            cpal::SampleFormat::U64 => Self::build::<u64>(&device, &config, &beeping),
            cpal::SampleFormat::F32 => Self::build::<f32>(&device, &config, &beeping),
            cpal::SampleFormat::F64 => Self::build::<f64>(&device, &config, &beeping),
            sample_format => bail!("Unsupported sample format '{sample_format}'"),
        }?;
        stream.play().context("starting audio stream")?;

        Ok(Self {
            _stream: stream,
            beeping,
        })
    }

    pub fn set_beeping(&self, on: bool) {
        self.beeping.store(on, Ordering::Relaxed);
    }

    fn build<T>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        beeping: &Arc<AtomicBool>,
    ) -> anyhow::Result<cpal::Stream>
    where
        T: SizedSample + FromSample<f32>,
    {
        let sample_rate = config.sample_rate.0 as f32;
        let channels = config.channels as usize;
        let beeping = Arc::clone(beeping);

        // Produce a sinusoid of maximum amplitude.
        let mut sample_clock = 0f32;
        let mut next_value = move || {
            sample_clock = (sample_clock + 1.0) % sample_rate;
            (sample_clock * PITCH_HZ * 2.0 * std::f32::consts::PI / sample_rate).sin()
        };

        let err_fn = |err: cpal::StreamError| error!("an error occurred on stream: {}", err);

        let stream = device.build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                if beeping.load(Ordering::Relaxed) {
                    write_data(data, channels, &mut next_value)
                } else {
                    data.fill(T::EQUILIBRIUM);
                }
            },
            err_fn,
            None,
        )?;
        Ok(stream)
    }
}

fn write_data<T>(output: &mut [T], channels: usize, next_sample: &mut dyn FnMut() -> f32)
where
    T: Sample + FromSample<f32>,
{
    for frame in output.chunks_mut(channels) {
        let value: T = T::from_sample(next_sample());
        for sample in frame.iter_mut() {
            *sample = value;
        }
    }
}
