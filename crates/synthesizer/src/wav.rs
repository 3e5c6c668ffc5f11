//! WAV file I/O utilities.

use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::{self, Seek, Write};
use std::path::Path;
use tts_core::{TtsError, TtsResult, Waveform};

fn spec_for(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Write a waveform to a 16-bit mono WAV file.
pub fn write_wav(path: impl AsRef<Path>, waveform: &Waveform) -> TtsResult<()> {
    let mut writer = WavWriter::create(path.as_ref(), spec_for(waveform.sample_rate))
        .map_err(|e| TtsError::audio_encode(e.to_string()))?;
    write_samples(&mut writer, &waveform.samples)?;
    writer
        .finalize()
        .map_err(|e| TtsError::audio_encode(e.to_string()))?;
    Ok(())
}

/// Write a waveform as WAV into any seekable writer.
pub fn write_wav_to_writer<W: Write + Seek>(writer: W, waveform: &Waveform) -> TtsResult<()> {
    let mut writer = WavWriter::new(writer, spec_for(waveform.sample_rate))
        .map_err(|e| TtsError::audio_encode(e.to_string()))?;
    write_samples(&mut writer, &waveform.samples)?;
    writer
        .finalize()
        .map_err(|e| TtsError::audio_encode(e.to_string()))?;
    Ok(())
}

fn write_samples<W: Write + Seek>(
    writer: &mut WavWriter<W>,
    samples: &[f32],
) -> TtsResult<()> {
    for &sample in samples {
        let sample_i16 = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer
            .write_sample(sample_i16)
            .map_err(|e| TtsError::audio_encode(e.to_string()))?;
    }
    Ok(())
}

/// Read a WAV file back into a waveform.
pub fn read_wav(path: impl AsRef<Path>) -> TtsResult<Waveform> {
    let mut reader = hound::WavReader::open(path.as_ref())
        .map_err(|e| TtsError::Io(io::Error::other(e.to_string())))?;

    let spec = reader.spec();
    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| TtsError::Io(io::Error::other(e.to_string())))?
        }
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| TtsError::Io(io::Error::other(e.to_string())))?,
    };

    Ok(Waveform::new(samples, spec.sample_rate))
}
