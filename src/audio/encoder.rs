use std::io::{Cursor, Seek, Write};

use anyhow::{Context, Result};

use crate::types::AudioData;

fn pcm16_spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Encode AudioData as mono 16-bit PCM WAV bytes
pub fn encode_wav_bytes(audio: &AudioData) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    write_wav(audio, &mut cursor)?;
    Ok(cursor.into_inner())
}

fn write_wav<W: Write + Seek>(audio: &AudioData, sink: W) -> Result<()> {
    let mut writer = hound::WavWriter::new(sink, pcm16_spec(audio.sample_rate))
        .context("Failed to start WAV stream")?;
    for &sample in &audio.samples {
        let scaled = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer
            .write_sample(scaled)
            .context("Failed to write audio sample")?;
    }
    writer.finalize().context("Failed to finalize WAV stream")?;
    Ok(())
}
