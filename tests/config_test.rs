//! Configuration loading tests
//!
//! Tests that announcer configuration loads from disk, falls back to
//! defaults and rejects broken files

use std::fs;
use time_announce::config::Config;
use time_announce::speech::TtsEngine;
use time_announce::AnnounceError;

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(dir.path().join("absent.ini")).expect("Missing config is not fatal");

    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(config.port().unwrap(), 32001);
    assert_eq!(config.engine(), TtsEngine::Espeak);
}

#[test]
fn test_load_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("announce.ini");
    fs::write(
        &path,
        "[network]\nhost = 192.168.1.20\nport = 32010\n\n\
         [audio]\nlead_silence = 2.5\npre_announce = /srv/tones/id.wav\n\n\
         [tts]\nengine = pico\n\n\
         [pico]\nlanguage = en-GB\n\n\
         [announcement]\nprefix = Station Nine\nuse_12_hour = false\n",
    )
    .unwrap();

    let config = Config::load(&path).expect("Failed to load config");
    assert_eq!(config.path(), &path);
    assert_eq!(config.host(), "192.168.1.20");
    assert_eq!(config.port().unwrap(), 32010);
    assert_eq!(config.lead_silence(), 2.5);
    // Not in the file
    assert_eq!(config.trail_silence(), 1.0);
    assert_eq!(
        config.pre_announce().unwrap().to_str(),
        Some("/srv/tones/id.wav")
    );
    assert_eq!(config.engine(), TtsEngine::Pico);
    assert_eq!(config.pico_language(), "en-GB");

    let format = config.announcement_format();
    assert_eq!(format.prefix, "Station Nine");
    assert!(!format.use_12_hour);
    assert!(format.include_ampm);
}

#[test]
fn test_write_default_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("default.ini");

    Config::write_default(&path).unwrap();
    assert!(path.exists());

    let config = Config::load(&path).unwrap();
    let espeak = config.espeak_settings();
    assert_eq!(espeak.voice, "en-us+m3");
    assert_eq!(espeak.pitch, 40);
    assert_eq!(espeak.speed, 140);
    assert_eq!(espeak.amplitude, 100);
    assert_eq!(config.announcement_format().prefix, "West Comm, time is");
}

#[test]
fn test_unparsable_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.ini");
    fs::write(&path, "[network\nhost = x\n").unwrap();

    match Config::load(&path) {
        Err(AnnounceError::IniParse(_)) => {}
        Err(e) => panic!("unexpected error: {}", e),
        Ok(_) => panic!("broken config should not load"),
    }
}
