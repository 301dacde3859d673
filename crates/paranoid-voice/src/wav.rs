//! In-memory WAV encoding and decoding of recorded and returned audio.

use std::io::Cursor;

use crate::error::VoiceError;

/// Mono 16-bit PCM audio.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Clip {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

impl Clip {
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Length of the clip in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.samples.len() as u64 * 1000 / self.sample_rate as u64
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Encode as a WAV file, ready to upload.
    pub fn to_wav(&self) -> Result<Vec<u8>, VoiceError> {
        encode(self)
    }
}

/// Encode a clip as a 16-bit mono WAV file.
pub fn encode(clip: &Clip) -> Result<Vec<u8>, VoiceError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: clip.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| VoiceError::Decode(format!("failed to start WAV: {}", e)))?;
        for &sample in &clip.samples {
            writer
                .write_sample(sample)
                .map_err(|e| VoiceError::Decode(format!("failed to write sample: {}", e)))?;
        }
        writer
            .finalize()
            .map_err(|e| VoiceError::Decode(format!("failed to finalize WAV: {}", e)))?;
    }
    Ok(cursor.into_inner())
}

/// Decode a WAV file into a mono clip. Multi-channel audio is mixed down and
/// float or wider integer samples are converted to 16-bit.
pub fn decode(bytes: &[u8]) -> Result<Clip, VoiceError> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes))
        .map_err(|e| VoiceError::Decode(format!("not a WAV file: {}", e)))?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<i16> = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .collect::<Result<_, _>>()
            .map_err(|e| VoiceError::Decode(e.to_string()))?,
        (hound::SampleFormat::Int, bits) if bits <= 32 => {
            let shift = bits.saturating_sub(16);
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| (v >> shift) as i16))
                .collect::<Result<_, _>>()
                .map_err(|e| VoiceError::Decode(e.to_string()))?
        }
        (hound::SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .map(|s| s.map(|v| (v.clamp(-1.0, 1.0) * i16::MAX as f32) as i16))
            .collect::<Result<_, _>>()
            .map_err(|e| VoiceError::Decode(e.to_string()))?,
        (format, bits) => {
            return Err(VoiceError::Decode(format!(
                "unsupported sample format {:?} at {} bits",
                format, bits
            )))
        }
    };

    let samples = if channels == 1 {
        interleaved
    } else {
        interleaved
            .chunks(channels)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                (sum / frame.len() as i32) as i16
            })
            .collect()
    };

    Ok(Clip::new(samples, spec.sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration() {
        let clip = Clip::new(vec![0; 8000], 16_000);
        assert_eq!(clip.duration_ms(), 500);
        assert_eq!(Clip::new(vec![0; 10], 0).duration_ms(), 0);
    }

    #[test]
    fn test_encoded_header() {
        let bytes = encode(&Clip::new(vec![1, -1, 300], 16_000)).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        // 44-byte canonical header plus 3 samples of 2 bytes.
        assert_eq!(bytes.len(), 44 + 6);
    }

    #[test]
    fn test_decode_stereo_mixes_down() {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 8_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for s in [100i16, 300, -200, 0] {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }

        let clip = decode(&cursor.into_inner()).unwrap();
        assert_eq!(clip.sample_rate, 8_000);
        assert_eq!(clip.samples, vec![200, -100]);
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(decode(b"definitely not audio"), Err(VoiceError::Decode(_))));
    }
}
