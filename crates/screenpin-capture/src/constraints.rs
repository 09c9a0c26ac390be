use serde::{Deserialize, Serialize};

/// Video-only capture request handed to a [`crate::CaptureProvider`].
///
/// All hints are optional; a provider without a matching mode picks the
/// nearest one it can serve.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptureConstraints {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub framerate: Option<u32>,
}

impl CaptureConstraints {
    /// A plain video request with no hints, the common case.
    pub fn video() -> Self {
        Self::default()
    }

    /// Build constraints from a named quality preset.
    pub fn from_preset(preset_name: &str) -> Option<Self> {
        quality_presets()
            .into_iter()
            .find(|p| p.name == preset_name)
            .map(|p| Self {
                width: Some(p.width),
                height: Some(p.height),
                framerate: Some(p.framerate),
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityPreset {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub framerate: u32,
}

pub fn quality_presets() -> Vec<QualityPreset> {
    vec![
        QualityPreset {
            name: "720p30".to_string(),
            width: 1280,
            height: 720,
            framerate: 30,
        },
        QualityPreset {
            name: "1080p30".to_string(),
            width: 1920,
            height: 1080,
            framerate: 30,
        },
        QualityPreset {
            name: "1080p60".to_string(),
            width: 1920,
            height: 1080,
            framerate: 60,
        },
        QualityPreset {
            name: "4k30".to_string(),
            width: 3840,
            height: 2160,
            framerate: 30,
        },
    ]
}
