//! Sound output and microphone capture on the system audio device.
//!
//! With the `audio-device` feature the weapon sound plays through rodio and
//! the intro records through cpal. Without it, or when a device cannot be
//! opened, cues are only logged and recording reports no microphone.

use paranoid_core::enums::BulletSource;
use paranoid_core::events::AudioEvent;
use paranoid_voice::recorder::{Microphone, NoMicrophone};
use paranoid_voice::wav::Clip;
use paranoid_voice::WeaponSound;

/// Somewhere to send clips.
pub trait Playback {
    fn play(&mut self, clip: &Clip);
}

/// Drops every clip.
#[derive(Debug, Default)]
pub struct Silent;

impl Playback for Silent {
    fn play(&mut self, _clip: &Clip) {}
}

/// Play one frame's worth of cues. Each ship shot plays the weapon sound;
/// everything else is logged. Returns true if the ship fired.
pub fn play_cues<P: Playback + ?Sized>(
    player: &mut P,
    weapon: Option<&WeaponSound>,
    events: &[AudioEvent],
) -> bool {
    let mut ship_fired = false;
    for event in events {
        match event {
            AudioEvent::ShotFired {
                source: BulletSource::Ship,
            } => {
                ship_fired = true;
                if let Some(weapon) = weapon {
                    player.play(&weapon.clip);
                }
            }
            other => log::debug!("cue {:?}", other),
        }
    }
    ship_fired
}

/// The default output device, or [`Silent`] if there is none.
pub fn open_speaker() -> Box<dyn Playback> {
    #[cfg(feature = "audio-device")]
    {
        match device::Speaker::open() {
            Ok(speaker) => return Box::new(speaker),
            Err(e) => log::warn!("No audio output, weapon sound disabled: {:#}", e),
        }
    }
    Box::new(Silent)
}

/// The default input device, or [`NoMicrophone`] if there is none.
pub fn open_microphone() -> Box<dyn Microphone> {
    #[cfg(feature = "audio-device")]
    {
        match device::CpalMicrophone::open() {
            Ok(mic) => return Box::new(mic),
            Err(e) => log::warn!("No microphone, recording disabled: {:#}", e),
        }
    }
    Box::new(NoMicrophone)
}

/// Average interleaved frames down to mono.
pub fn downmix<T: Copy>(data: &[T], channels: usize, convert: impl Fn(T) -> i16) -> Vec<i16> {
    data.chunks(channels.max(1))
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| convert(s) as i32).sum();
            (sum / frame.len() as i32) as i16
        })
        .collect()
}

pub fn sample_from_f32(s: f32) -> i16 {
    (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

pub fn sample_from_u16(s: u16) -> i16 {
    (s as i32 - 32_768) as i16
}

#[cfg(feature = "audio-device")]
mod device {
    use std::sync::{Arc, Mutex};

    use anyhow::Context;
    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
    use cpal::SampleFormat;
    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use paranoid_voice::recorder::Microphone;
    use paranoid_voice::wav::Clip;
    use paranoid_voice::VoiceError;

    use super::{downmix, sample_from_f32, sample_from_u16, Playback};

    pub struct Speaker {
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl Speaker {
        pub fn open() -> anyhow::Result<Self> {
            let (stream, handle) =
                OutputStream::try_default().context("failed to create audio stream")?;
            Ok(Self {
                _stream: stream,
                handle,
            })
        }
    }

    impl Playback for Speaker {
        /// Each clip gets its own detached sink so rapid shots overlap.
        fn play(&mut self, clip: &Clip) {
            if clip.is_empty() || clip.sample_rate == 0 {
                return;
            }
            let samples: Vec<f32> = clip
                .samples
                .iter()
                .map(|&s| s as f32 / i16::MAX as f32)
                .collect();
            match Sink::try_new(&self.handle) {
                Ok(sink) => {
                    sink.append(SamplesBuffer::new(1, clip.sample_rate, samples));
                    sink.detach();
                }
                Err(e) => log::warn!("Failed to play weapon sound: {}", e),
            }
        }
    }

    /// Records mono 16-bit samples from the default input device.
    pub struct CpalMicrophone {
        device: cpal::Device,
        config: cpal::SupportedStreamConfig,
        captured: Arc<Mutex<Vec<i16>>>,
        stream: Option<cpal::Stream>,
    }

    impl CpalMicrophone {
        pub fn open() -> anyhow::Result<Self> {
            let device = cpal::default_host()
                .default_input_device()
                .context("no input device")?;
            let config = device
                .default_input_config()
                .context("input device has no usable format")?;
            log::info!(
                "Microphone: {} ({} Hz, {} ch, {:?})",
                device.name().unwrap_or_default(),
                config.sample_rate().0,
                config.channels(),
                config.sample_format()
            );
            Ok(Self {
                device,
                config,
                captured: Arc::new(Mutex::new(Vec::new())),
                stream: None,
            })
        }

        fn build_stream(&self) -> Result<cpal::Stream, cpal::BuildStreamError> {
            let stream_config = self.config.config();
            let channels = stream_config.channels as usize;
            let captured = Arc::clone(&self.captured);
            let on_error = |e: cpal::StreamError| log::error!("Microphone stream error: {}", e);

            match self.config.sample_format() {
                SampleFormat::I16 => self.device.build_input_stream(
                    &stream_config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        append(&captured, downmix(data, channels, |s| s))
                    },
                    on_error,
                    None,
                ),
                SampleFormat::U16 => self.device.build_input_stream(
                    &stream_config,
                    move |data: &[u16], _: &cpal::InputCallbackInfo| {
                        append(&captured, downmix(data, channels, sample_from_u16))
                    },
                    on_error,
                    None,
                ),
                SampleFormat::F32 => self.device.build_input_stream(
                    &stream_config,
                    move |data: &[f32], _: &cpal::InputCallbackInfo| {
                        append(&captured, downmix(data, channels, sample_from_f32))
                    },
                    on_error,
                    None,
                ),
                _ => Err(cpal::BuildStreamError::StreamConfigNotSupported),
            }
        }
    }

    fn append(captured: &Mutex<Vec<i16>>, samples: Vec<i16>) {
        if let Ok(mut captured) = captured.lock() {
            captured.extend(samples);
        }
    }

    impl Microphone for CpalMicrophone {
        fn start(&mut self) -> Result<(), VoiceError> {
            if let Ok(mut captured) = self.captured.lock() {
                captured.clear();
            }
            let stream = self
                .build_stream()
                .map_err(|e| VoiceError::Microphone(e.to_string()))?;
            stream
                .play()
                .map_err(|e| VoiceError::Microphone(e.to_string()))?;
            self.stream = Some(stream);
            Ok(())
        }

        fn stop(&mut self) -> Result<Clip, VoiceError> {
            let stream = self
                .stream
                .take()
                .ok_or_else(|| VoiceError::Microphone("not recording".into()))?;
            // Dropping the stream stops the callback.
            drop(stream);

            let samples = self
                .captured
                .lock()
                .map(|mut captured| std::mem::take(&mut *captured))
                .map_err(|_| VoiceError::Microphone("capture buffer poisoned".into()))?;
            Ok(Clip::new(samples, self.config.sample_rate().0))
        }
    }
}
