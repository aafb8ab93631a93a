//! Pre-announce splice loading
//!
//! A splice is a pre-recorded clip (a tone, a station ID) played between the
//! lead silence and the speech. Raw PCM files are read as-is; anything else
//! is converted to 8kHz mono through sox.

use super::bytes_to_samples;
use crate::speech::sox;
use crate::{AnnounceError, Result};
use log::{debug, info};
use std::path::Path;

/// Extensions treated as headerless 8kHz 16-bit mono PCM in host order
const RAW_EXTENSIONS: &[&str] = &["raw", "pcm"];

/// Whether a splice file is read directly instead of through sox
pub fn is_raw_pcm(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| RAW_EXTENSIONS.iter().any(|raw| ext.eq_ignore_ascii_case(raw)))
        .unwrap_or(false)
}

/// Load a splice file as 8kHz mono samples
pub fn load_splice(path: &Path) -> Result<Vec<i16>> {
    if !path.exists() {
        return Err(AnnounceError::Audio(format!(
            "Pre-announce file not found: {}",
            path.display()
        )));
    }

    let samples = if is_raw_pcm(path) {
        debug!("Reading raw PCM splice from {:?}", path);
        bytes_to_samples(&std::fs::read(path)?)
    } else {
        sox::convert_file(path)?
    };

    info!(
        "Loaded pre-announce splice {:?}: {} samples",
        path,
        samples.len()
    );
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::samples_to_bytes;
    use std::io::Write;

    #[test]
    fn test_is_raw_pcm() {
        assert!(is_raw_pcm(Path::new("tone.raw")));
        assert!(is_raw_pcm(Path::new("/tmp/ID.PCM")));
        assert!(!is_raw_pcm(Path::new("tone.wav")));
        assert!(!is_raw_pcm(Path::new("tone")));
    }

    #[test]
    fn test_load_raw_splice() {
        let mut file = tempfile::Builder::new()
            .suffix(".raw")
            .tempfile()
            .unwrap();
        file.write_all(&samples_to_bytes(&[1, -2, 300])).unwrap();
        file.flush().unwrap();

        let samples = load_splice(file.path()).unwrap();
        assert_eq!(samples, vec![1, -2, 300]);
    }

    #[test]
    fn test_missing_splice() {
        let err = load_splice(Path::new("/nonexistent/tone.raw")).unwrap_err();
        assert!(matches!(err, AnnounceError::Audio(_)));
    }
}
