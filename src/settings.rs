//! Game settings and preferences
//!
//! Persisted in the same key/value store as progression, one key per field.
//! Every setter clamps, then writes and flushes immediately.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Mixer level used for silence
pub const SILENT_DB: f32 = -80.0;

const MASTER_VOLUME_KEY: &str = "MasterVolume";
const MUSIC_VOLUME_KEY: &str = "MusicVolume";
const SFX_VOLUME_KEY: &str = "SFXVolume";
const MUTE_KEY: &str = "IsMuted";
const QUALITY_KEY: &str = "QualityLevel";
const FULLSCREEN_KEY: &str = "IsFullscreen";

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
    Ultra,
}

impl QualityPreset {
    pub const ALL: [QualityPreset; 4] = [
        QualityPreset::Low,
        QualityPreset::Medium,
        QualityPreset::High,
        QualityPreset::Ultra,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
            QualityPreset::Ultra => "Ultra",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            "ultra" => Some(QualityPreset::Ultra),
            _ => None,
        }
    }

    /// Dropdown index
    pub fn index(&self) -> i64 {
        match self {
            QualityPreset::Low => 0,
            QualityPreset::Medium => 1,
            QualityPreset::High => 2,
            QualityPreset::Ultra => 3,
        }
    }

    /// Out-of-range indices clamp to the nearest preset
    pub fn from_index(index: i64) -> Self {
        match index {
            i64::MIN..=0 => QualityPreset::Low,
            1 => QualityPreset::Medium,
            2 => QualityPreset::High,
            _ => QualityPreset::Ultra,
        }
    }
}

/// Linear volume (0..1) to mixer decibels
pub fn volume_db(volume: f32) -> f32 {
    if volume > 0.0 {
        20.0 * volume.log10()
    } else {
        SILENT_DB
    }
}

/// Decibel levels for the audio mixer's three groups
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixerLevels {
    pub master_db: f32,
    pub music_db: f32,
    pub sfx_db: f32,
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    master_volume: f32,
    /// Music volume (0.0 - 1.0)
    music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    sfx_volume: f32,
    muted: bool,
    /// Graphics quality preset
    quality: QualityPreset,
    fullscreen: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            music_volume: 0.7,
            sfx_volume: 0.8,
            muted: false,
            quality: QualityPreset::Medium,
            fullscreen: false,
        }
    }
}

impl Settings {
    /// Read every field, falling back to defaults for missing keys
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let defaults = Self::default();
        let settings = Self {
            master_volume: store
                .get_float(MASTER_VOLUME_KEY, defaults.master_volume)
                .clamp(0.0, 1.0),
            music_volume: store
                .get_float(MUSIC_VOLUME_KEY, defaults.music_volume)
                .clamp(0.0, 1.0),
            sfx_volume: store
                .get_float(SFX_VOLUME_KEY, defaults.sfx_volume)
                .clamp(0.0, 1.0),
            muted: store.get_bool(MUTE_KEY, defaults.muted),
            quality: QualityPreset::from_index(
                store.get_int(QUALITY_KEY, defaults.quality.index()),
            ),
            fullscreen: store.get_bool(FULLSCREEN_KEY, defaults.fullscreen),
        };
        log::info!(
            "Loaded settings: volume {:.2}, quality {}",
            settings.master_volume,
            settings.quality.as_str()
        );
        settings
    }

    /// Write every field and flush. Failures are logged, not returned.
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        store.set_float(MASTER_VOLUME_KEY, self.master_volume);
        store.set_float(MUSIC_VOLUME_KEY, self.music_volume);
        store.set_float(SFX_VOLUME_KEY, self.sfx_volume);
        store.set_bool(MUTE_KEY, self.muted);
        store.set_int(QUALITY_KEY, self.quality.index());
        store.set_bool(FULLSCREEN_KEY, self.fullscreen);
        if let Err(e) = store.flush() {
            log::warn!("Failed to save settings: {e}");
        }
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    pub fn sfx_volume(&self) -> f32 {
        self.sfx_volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn quality(&self) -> QualityPreset {
        self.quality
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn set_master_volume(&mut self, volume: f32, store: &mut dyn KeyValueStore) {
        self.master_volume = clamp_volume(volume);
        self.save(store);
    }

    pub fn set_music_volume(&mut self, volume: f32, store: &mut dyn KeyValueStore) {
        self.music_volume = clamp_volume(volume);
        self.save(store);
    }

    pub fn set_sfx_volume(&mut self, volume: f32, store: &mut dyn KeyValueStore) {
        self.sfx_volume = clamp_volume(volume);
        self.save(store);
    }

    pub fn set_muted(&mut self, muted: bool, store: &mut dyn KeyValueStore) {
        self.muted = muted;
        self.save(store);
    }

    pub fn set_quality(&mut self, quality: QualityPreset, store: &mut dyn KeyValueStore) {
        self.quality = quality;
        self.save(store);
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool, store: &mut dyn KeyValueStore) {
        self.fullscreen = fullscreen;
        self.save(store);
    }

    /// Mixer levels. Muting silences the master group only.
    pub fn mixer_levels(&self) -> MixerLevels {
        MixerLevels {
            master_db: if self.muted {
                SILENT_DB
            } else {
                volume_db(self.master_volume)
            },
            music_db: volume_db(self.music_volume),
            sfx_db: volume_db(self.sfx_volume),
        }
    }
}

/// NaN counts as silence
fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults_from_empty_store() {
        let store = MemoryStore::new();
        let settings = Settings::load(&store);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.master_volume(), 0.8);
        assert_eq!(settings.music_volume(), 0.7);
        assert_eq!(settings.sfx_volume(), 0.8);
    }

    #[test]
    fn test_setters_clamp_and_persist() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::default();
        settings.set_master_volume(1.7, &mut store);
        settings.set_sfx_volume(-0.2, &mut store);
        settings.set_music_volume(f32::NAN, &mut store);
        settings.set_quality(QualityPreset::Ultra, &mut store);
        settings.set_fullscreen(true, &mut store);
        assert_eq!(store.flush_count(), 5);

        let reloaded = Settings::load(&store);
        assert_eq!(reloaded.master_volume(), 1.0);
        assert_eq!(reloaded.sfx_volume(), 0.0);
        assert_eq!(reloaded.music_volume(), 0.0);
        assert_eq!(reloaded.quality(), QualityPreset::Ultra);
        assert!(reloaded.is_fullscreen());
    }

    #[test]
    fn test_volume_db() {
        assert_eq!(volume_db(0.0), SILENT_DB);
        assert!(volume_db(1.0).abs() < 1e-6);
        assert!((volume_db(0.1) + 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_mute_silences_master_only() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::default();
        settings.set_muted(true, &mut store);
        let levels = settings.mixer_levels();
        assert_eq!(levels.master_db, SILENT_DB);
        assert!(levels.music_db > SILENT_DB);
        assert!(Settings::load(&store).is_muted());
    }

    #[test]
    fn test_quality_index_clamps() {
        assert_eq!(QualityPreset::from_index(-3), QualityPreset::Low);
        assert_eq!(QualityPreset::from_index(9), QualityPreset::Ultra);
        for preset in QualityPreset::ALL {
            assert_eq!(QualityPreset::from_index(preset.index()), preset);
            assert_eq!(QualityPreset::from_str(preset.as_str()), Some(preset));
        }
    }
}
