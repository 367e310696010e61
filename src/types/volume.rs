use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeDirection {
    Increasing,
    Decreasing,
    Unknown,
}

impl VolumeDirection {
    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            VolumeDirection::Increasing => "increasing",
            VolumeDirection::Decreasing => "decreasing",
            VolumeDirection::Unknown => "unknown",
        }
    }
}

/// Recent vs. older average volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeTrend {
    pub direction: VolumeDirection,
    pub percent_change: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub older_average: Option<f64>,
}

impl VolumeTrend {
    /// Trend reported when no volume history is available.
    pub fn unknown() -> Self {
        Self {
            direction: VolumeDirection::Unknown,
            percent_change: 0.0,
            recent_average: None,
            older_average: None,
        }
    }
}
