//! Game settings and preferences
//!
//! Supplied by the host (JSON or URL query); never persisted.

use serde::{Deserialize, Serialize};

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

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 256,
            QualityPreset::High => 1024,
        }
    }

    /// Segments used when tessellating a full circle
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 12,
            QualityPreset::Medium => 24,
            QualityPreset::High => 40,
        }
    }
}

/// Errors from reading host-supplied settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown quality preset: {0}")]
    UnknownQuality(String),

    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Ambience ===
    /// Draw the rain field
    pub rain: bool,
    /// Skyline drifts with the catcher
    pub parallax: bool,

    // === Effects ===
    /// Confetti bursts on valuable catches
    pub confetti: bool,
    /// Decorative marks on the penalty overlay
    pub splatter_marks: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (no drawn shake, no splatter marks)
    pub reduced_motion: bool,

    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            rain: true,
            parallax: true,

            confetti: true,
            splatter_marks: true,

            show_fps: false,

            reduced_motion: false,

            seed: None,
        }
    }
}

impl Settings {
    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset sheds the purely cosmetic extras
        if preset == QualityPreset::Low {
            self.confetti = false;
            self.parallax = false;
        }
    }

    /// Parse settings from a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Apply a `key=value` override such as `quality=low`
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        match key {
            "quality" => {
                let preset = QualityPreset::from_str(value)
                    .ok_or_else(|| SettingsError::UnknownQuality(value.to_string()))?;
                self.apply_preset(preset);
            }
            "seed" => self.seed = value.parse().ok(),
            "fps" => self.show_fps = value != "0",
            "reduced_motion" => self.reduced_motion = value != "0",
            _ => log::debug!("Ignoring unknown setting {}", key),
        }
        Ok(())
    }

    /// Apply every `key=value` pair of a URL query string (`?a=b&c=d`)
    pub fn apply_query(&mut self, query: &str) -> Result<(), SettingsError> {
        for pair in query.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, "1"));
            self.apply_override(key, value)?;
        }
        Ok(())
    }

    /// Effective shake drawing (respects reduced_motion)
    pub fn effective_shake(&self) -> bool {
        !self.reduced_motion
    }

    /// Effective splatter marks (respects reduced_motion)
    pub fn effective_splatter_marks(&self) -> bool {
        self.splatter_marks && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        self.quality.max_particles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parsing() {
        assert_eq!(QualityPreset::from_str("LOW"), Some(QualityPreset::Low));
        assert_eq!(QualityPreset::from_str(" med "), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        assert_eq!(QualityPreset::High.as_str(), "High");
    }

    #[test]
    fn test_json_defaults_missing_fields() {
        let settings = Settings::from_json(r#"{"quality":"High","seed":7}"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.seed, Some(7));
        assert!(settings.rain);
        assert_eq!(settings.max_particles(), 1024);
    }

    #[test]
    fn test_json_roundtrip_and_errors() {
        let mut settings = Settings::default();
        settings.apply_preset(QualityPreset::Low);
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_query_overrides() {
        let mut settings = Settings::default();
        settings.apply_query("?quality=low&seed=42&fps").unwrap();
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(!settings.confetti);
        assert_eq!(settings.seed, Some(42));
        assert!(settings.show_fps);

        let err = settings.apply_query("quality=ultra").unwrap_err();
        assert!(matches!(err, SettingsError::UnknownQuality(ref q) if q == "ultra"));
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("money-catcher-settings-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"quality":"Low","reduced_motion":true}"#).unwrap();
        let settings = Settings::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(settings.reduced_motion);

        assert!(matches!(
            Settings::from_file(&path),
            Err(SettingsError::Io(_))
        ));
    }

    #[test]
    fn test_reduced_motion() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_shake());
        assert!(!settings.effective_splatter_marks());
    }
}
