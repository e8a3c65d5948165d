//! Encoded audio clips
//!
//! The background loader only reads bytes and checks the container header;
//! decoding is left to the playback backend.

use std::fmt;

use crate::assets::{Asset, AssetError};

/// Container format of a clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    /// RIFF/WAVE
    Wav,
    /// Ogg Vorbis
    Ogg,
    /// MPEG layer 3, with or without an ID3 tag
    Mp3,
    /// FLAC
    Flac,
}

impl AudioFormat {
    /// Recognize a container from its first bytes
    pub fn sniff(header: &[u8]) -> Option<Self> {
        match header.get(..4)? {
            b"RIFF" => Some(Self::Wav),
            b"OggS" => Some(Self::Ogg),
            b"fLaC" => Some(Self::Flac),
            [b'I', b'D', b'3', _] | [0xFF, 0xFB | 0xFA | 0xF3 | 0xF2, _, _] => Some(Self::Mp3),
            _ => None,
        }
    }
}

/// Clip bytes as read from disk
#[derive(Clone)]
pub struct AudioAsset {
    bytes: Vec<u8>,
    format: AudioFormat,
}

impl AudioAsset {
    /// Wrap already-identified clip bytes
    pub fn new(bytes: Vec<u8>, format: AudioFormat) -> Self {
        Self { bytes, format }
    }

    /// Encoded bytes, handed to the backend as is
    pub fn data(&self) -> &[u8] {
        &self.bytes
    }

    /// Container format
    pub fn format(&self) -> AudioFormat {
        self.format
    }
}

impl fmt::Debug for AudioAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AudioAsset({:?}, {} bytes)", self.format, self.bytes.len())
    }
}

impl Asset for AudioAsset {
    fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        if bytes.is_empty() {
            return Err(AssetError::InvalidData("Empty audio file".to_string()));
        }
        let format = AudioFormat::sniff(bytes)
            .ok_or_else(|| AssetError::InvalidData("Unrecognized audio container".to_string()))?;
        Ok(Self::new(bytes.to_vec(), format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_known_containers() {
        assert_eq!(AudioFormat::sniff(b"RIFF....WAVE"), Some(AudioFormat::Wav));
        assert_eq!(AudioFormat::sniff(b"OggS\0\x02"), Some(AudioFormat::Ogg));
        assert_eq!(AudioFormat::sniff(b"fLaC"), Some(AudioFormat::Flac));
        assert_eq!(AudioFormat::sniff(&[0xFF, 0xFB, 0x90, 0x64]), Some(AudioFormat::Mp3));
    }

    #[test]
    fn test_sniff_rejects_short_or_foreign_headers() {
        assert_eq!(AudioFormat::sniff(b"Ogg"), None);
        assert_eq!(AudioFormat::sniff(b"\x89PNG"), None);
    }

    #[test]
    fn test_empty_and_unrecognized_files_fail() {
        assert!(matches!(AudioAsset::from_bytes(&[]), Err(AssetError::InvalidData(_))));
        assert!(matches!(
            AudioAsset::from_bytes(b"<html>not audio</html>"),
            Err(AssetError::InvalidData(_))
        ));
    }

    #[test]
    fn test_mp3_with_id3_tag() {
        let asset = AudioAsset::from_bytes(b"ID3\x04rest-of-file").unwrap();
        assert_eq!(asset.format(), AudioFormat::Mp3);
        assert_eq!(asset.data().len(), 16);
    }
}
