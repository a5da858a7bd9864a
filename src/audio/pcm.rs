use std::io::Cursor;

use anyhow::{ensure, Context, Result};

use crate::types::AudioData;

/// Read normalized mono 16-bit PCM WAV bytes into f32 samples.
pub fn read_wav(bytes: &[u8]) -> Result<AudioData> {
    let mut reader =
        hound::WavReader::new(Cursor::new(bytes)).context("Failed to parse WAV header")?;
    let spec = reader.spec();
    ensure!(
        spec.channels == 1,
        "expected mono PCM, found {} channels",
        spec.channels
    );
    ensure!(
        spec.sample_format == hound::SampleFormat::Int && spec.bits_per_sample == 16,
        "expected 16-bit integer PCM, found {}-bit {:?}",
        spec.bits_per_sample,
        spec.sample_format
    );
    ensure!(spec.sample_rate > 0, "WAV header reports a zero sample rate");

    let pcm = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<i16>, _>>()
        .context("Failed to read PCM samples")?;
    Ok(AudioData::from_pcm16(&pcm, spec.sample_rate))
}
