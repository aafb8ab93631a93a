//! Configuration management

use crate::announcement::AnnouncementFormat;
use crate::speech::{EspeakSettings, TtsEngine};
use crate::{AnnounceError, Result};
use ini::Ini;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "time-announce.ini";

/// Announcer configuration
///
/// Holds the DVMBridge destination, silence padding, TTS engine settings
/// and the announcement wording. Missing keys fall back to defaults.
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path
    path: PathBuf,
}

impl Config {
    /// Load configuration from `path`
    ///
    /// A missing file is not an error: a warning is logged and defaults are
    /// used. A file that exists but cannot be parsed is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            let ini = Ini::load_from_file(&path)
                .map_err(|e| AnnounceError::IniParse(format!("Failed to load config: {}", e)))?;
            info!("Config loaded from {}", path.display());
            ini
        } else {
            warn!(
                "Could not load config file {}, using defaults",
                path.display()
            );
            Self::default_config()
        };

        Ok(Self { ini, path })
    }

    /// In-memory default configuration
    pub fn defaults() -> Self {
        Self {
            ini: Self::default_config(),
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
        }
    }

    /// Write a fresh default config file to `path`
    pub fn write_default(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self {
            ini: Self::default_config(),
            path: path.as_ref().to_path_buf(),
        };
        config.save()?;
        info!("Wrote default config to {}", config.path.display());
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| AnnounceError::Config(format!("Failed to save config: {}", e)))
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("network"))
            .set("host", "127.0.0.1")
            .set("port", "32001");

        ini.with_section(Some("audio"))
            .set("lead_silence", "5.0")
            .set("trail_silence", "1.0");

        ini.with_section(Some("tts")).set("engine", "espeak");

        ini.with_section(Some("espeak"))
            .set("voice", "en-us+m3")
            .set("pitch", "40")
            .set("speed", "140")
            .set("amplitude", "100");

        ini.with_section(Some("pico")).set("language", "en-US");

        ini.with_section(Some("announcement"))
            .set("prefix", "West Comm, time is")
            .set("use_12_hour", "true")
            .set("include_ampm", "true");

        ini
    }

    /// Get a boolean value from config
    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Get an integer value from config
    pub fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Get a float value from config
    pub fn get_float(&self, section: &str, key: &str, default: f32) -> f32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    // Announcer-specific configuration getters

    /// DVMBridge host
    pub fn host(&self) -> String {
        self.get_string("network", "host", "127.0.0.1")
    }

    /// DVMBridge UDP port
    pub fn port(&self) -> Result<u16> {
        let port = self.get_int("network", "port", 32001);
        u16::try_from(port)
            .ok()
            .filter(|&p| p != 0)
            .ok_or_else(|| AnnounceError::Config(format!("Invalid port: {}", port)))
    }

    /// Seconds of silence before the announcement (never negative)
    pub fn lead_silence(&self) -> f32 {
        self.get_float("audio", "lead_silence", 5.0).max(0.0)
    }

    /// Seconds of silence after the announcement (never negative)
    pub fn trail_silence(&self) -> f32 {
        self.get_float("audio", "trail_silence", 1.0).max(0.0)
    }

    /// Audio file spliced in before the speech, if any
    pub fn pre_announce(&self) -> Option<PathBuf> {
        self.ini
            .get_from(Some("audio"), "pre_announce")
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    /// Selected TTS engine
    pub fn engine(&self) -> TtsEngine {
        TtsEngine::from_name(&self.get_string("tts", "engine", "espeak"))
    }

    /// espeak voice parameters
    pub fn espeak_settings(&self) -> EspeakSettings {
        let defaults = EspeakSettings::default();
        EspeakSettings {
            voice: self.get_string("espeak", "voice", &defaults.voice),
            pitch: self.get_u32("espeak", "pitch", defaults.pitch),
            speed: self.get_u32("espeak", "speed", defaults.speed),
            amplitude: self.get_u32("espeak", "amplitude", defaults.amplitude),
        }
    }

    /// pico2wave language
    pub fn pico_language(&self) -> String {
        self.get_string("pico", "language", "en-US")
    }

    /// Announcement wording
    pub fn announcement_format(&self) -> AnnouncementFormat {
        let defaults = AnnouncementFormat::default();
        AnnouncementFormat {
            prefix: self.get_string("announcement", "prefix", &defaults.prefix),
            use_12_hour: self.get_bool("announcement", "use_12_hour", defaults.use_12_hour),
            include_ampm: self.get_bool("announcement", "include_ampm", defaults.include_ampm),
        }
    }

    fn get_u32(&self, section: &str, key: &str, default: u32) -> u32 {
        u32::try_from(self.get_int(section, key, default as i64)).unwrap_or(default)
    }
}
