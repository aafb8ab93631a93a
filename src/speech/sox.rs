//! sox conversion to DVMBridge PCM
//!
//! Every engine hands its output to sox, which resamples to 8kHz 16-bit mono
//! raw PCM on stdout.

use crate::audio::{bytes_to_samples, SAMPLE_RATE};
use crate::{AnnounceError, Result};
use log::debug;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Arguments describing sox's raw 8kHz mono output on stdout
pub fn output_args() -> Vec<String> {
    vec![
        "-r".to_string(),
        SAMPLE_RATE.to_string(),
        "-b".to_string(),
        "16".to_string(),
        "-c".to_string(),
        "1".to_string(),
        "-t".to_string(),
        "raw".to_string(),
        "-".to_string(),
    ]
}

/// Build a sox command reading `input` (a path, or `-` for stdin)
pub fn command(input_type: Option<&str>, input: &str) -> Command {
    let mut cmd = Command::new("sox");
    if let Some(kind) = input_type {
        cmd.arg("-t").arg(kind);
    }
    cmd.arg(input).args(output_args());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd
}

/// Convert any file sox can read into 8kHz mono samples
pub fn convert_file(path: &Path) -> Result<Vec<i16>> {
    let input = path.to_str().ok_or_else(|| {
        AnnounceError::Audio(format!("Non UTF-8 path: {}", path.display()))
    })?;
    debug!("Converting {:?} with sox", path);

    let output = command(None, input)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| AnnounceError::Audio(format!("Failed to start sox: {}", e)))?;
    decode_output("sox", output).map_err(|e| match e {
        AnnounceError::Speech(msg) => AnnounceError::Audio(msg),
        other => other,
    })
}

/// Check a finished converter's status and decode its stdout
pub fn decode_output(program: &str, output: Output) -> Result<Vec<i16>> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AnnounceError::Speech(format!(
            "{} exited with {}: {}",
            program,
            output.status,
            stderr.trim()
        )));
    }
    Ok(decode_raw_pcm(&output.stdout))
}

/// Interpret raw sox output as host-order i16 samples
pub fn decode_raw_pcm(bytes: &[u8]) -> Vec<i16> {
    if bytes.len() % 2 != 0 {
        debug!("Dropping trailing odd byte from sox output");
    }
    bytes_to_samples(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_args() {
        assert_eq!(
            output_args().join(" "),
            "-r 8000 -b 16 -c 1 -t raw -"
        );
    }

    #[test]
    fn test_command_args() {
        let cmd = command(Some("wav"), "-");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args.join(" "), "-t wav - -r 8000 -b 16 -c 1 -t raw -");
        assert_eq!(cmd.get_program(), "sox");
    }

    #[test]
    fn test_decode_raw_pcm() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&100i16.to_ne_bytes());
        bytes.extend_from_slice(&(-100i16).to_ne_bytes());
        bytes.push(1);
        assert_eq!(decode_raw_pcm(&bytes), vec![100, -100]);
    }
}
