//! Game settings and preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::persistence;
use crate::renderer::RenderOptions;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Next preset in the Low -> Medium -> High cycle
    pub fn next(self) -> Self {
        match self {
            QualityPreset::Low => QualityPreset::Medium,
            QualityPreset::Medium => QualityPreset::High,
            QualityPreset::High => QualityPreset::Low,
        }
    }

    /// Twinkling stars in the backdrop
    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => 60,
            QualityPreset::Medium => 150,
            QualityPreset::High => 220,
        }
    }

    /// Drifting dust motes
    pub fn dust_count(&self) -> usize {
        match self {
            QualityPreset::Low => 0,
            QualityPreset::Medium => 30,
            QualityPreset::High => 45,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (jump dust, debris, coin sparkle)
    pub particles: bool,

    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            master_volume: 1.0,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "space_jump_settings";

    /// Apply a quality preset; particles are off only on Low
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        self.particles = preset != QualityPreset::Low;
    }

    /// Step to the next quality preset. Returns the new preset.
    pub fn cycle_quality(&mut self) -> QualityPreset {
        self.apply_preset(self.quality.next());
        self.quality
    }

    /// Flip mute. Returns true if now muted.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// What the renderer should draw
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            star_count: self.quality.star_count(),
            dust_count: self.quality.dust_count(),
            particles: self.particles,
        }
    }

    /// Final gain for a sound effect with the given base volume
    pub fn effective_volume(&self, base: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            (base * self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0))
                .clamp(0.0, 1.0)
        }
    }

    pub fn load() -> Self {
        match persistence::load_json::<Settings>(Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        if persistence::save_json(Self::STORAGE_KEY, self) {
            log::info!("Settings saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_classic_backdrop() {
        let options = Settings::default().render_options();
        assert_eq!(options.star_count, 150);
        assert_eq!(options.dust_count, 30);
        assert!(options.particles);
    }

    #[test]
    fn test_low_preset_trims_effects() {
        let mut settings = Settings::default();
        settings.apply_preset(QualityPreset::Low);
        let options = settings.render_options();
        assert_eq!(options.dust_count, 0);
        assert!(!options.particles);
        assert!(options.star_count < 150);
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert!((settings.effective_volume(0.3) - 0.3).abs() < 1e-6);
        settings.master_volume = 0.5;
        assert!((settings.effective_volume(0.4) - 0.2).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_volume(0.4), 0.0);
    }

    #[test]
    fn test_settings_json_round_trip_and_partial() {
        let settings = Settings {
            quality: QualityPreset::High,
            particles: false,
            master_volume: 0.25,
            sfx_volume: 0.5,
            muted: true,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);

        // Older saves with missing fields fall back per field
        let partial: Settings = serde_json::from_str(r#"{"muted": true}"#).unwrap();
        assert!(partial.muted);
        assert_eq!(partial.quality, QualityPreset::Medium);
        assert!(partial.particles);
    }

    #[test]
    fn test_cycle_quality_wraps_and_restores_particles() {
        let mut settings = Settings::default();
        assert_eq!(settings.cycle_quality(), QualityPreset::High);
        assert_eq!(settings.render_options().star_count, 220);

        assert_eq!(settings.cycle_quality(), QualityPreset::Low);
        assert!(!settings.particles);

        assert_eq!(settings.cycle_quality(), QualityPreset::Medium);
        assert!(settings.particles);
        assert_eq!(settings.quality.as_str(), "Medium");
    }

    #[test]
    fn test_toggle_mute() {
        let mut settings = Settings::default();
        assert!(settings.toggle_mute());
        assert_eq!(settings.effective_volume(0.3), 0.0);
        assert!(!settings.toggle_mute());
        assert!(settings.effective_volume(0.3) > 0.0);
    }

    #[test]
    fn test_save_then_load_without_storage() {
        // Native builds have no LocalStorage: saving is a no-op and loading
        // falls back to defaults
        let mut settings = Settings::default();
        settings.toggle_mute();
        settings.save();
        assert_eq!(Settings::load(), Settings::default());
    }
}
