pub mod decoder;
pub mod encoder;
pub mod normalizer;
pub mod pcm;
pub mod resample;
