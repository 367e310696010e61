//! Volume trend: recent vs. older average volume.

use tracing::debug;

use super::signals::indicators::rolling::mean;
use crate::error::{AnalysisError, Result};
use crate::types::{VolumeDirection, VolumeSample, VolumeTrend};

/// Compare the mean of the last `window` samples with the mean of the first
/// `window` samples.
///
/// An empty history is a normal outcome and yields an `Unknown` trend. A
/// non-finite or negative volume is rejected.
pub fn analyze_volume(samples: &[VolumeSample], window: usize) -> Result<VolumeTrend> {
    if let Some((idx, sample)) = samples
        .iter()
        .enumerate()
        .find(|(_, s)| !s.volume.is_finite() || s.volume < 0.0)
    {
        return Err(AnalysisError::InvalidSeries(format!(
            "volume sample {} has invalid volume {}",
            idx, sample.volume
        )));
    }

    if samples.is_empty() || window == 0 {
        debug!("No volume history, trend unknown");
        return Ok(VolumeTrend::unknown());
    }

    let take = window.min(samples.len());
    let average = |slice: &[VolumeSample]| {
        let volumes: Vec<f64> = slice.iter().map(|s| s.volume).collect();
        mean(&volumes)
    };

    let (Some(recent), Some(older)) = (
        average(&samples[samples.len() - take..]),
        average(&samples[..take]),
    ) else {
        debug!("Volume averages overflowed, trend unknown");
        return Ok(VolumeTrend::unknown());
    };

    let direction = if recent > older {
        VolumeDirection::Increasing
    } else {
        VolumeDirection::Decreasing
    };

    let percent_change = if older > 0.0 {
        (recent - older) / older * 100.0
    } else {
        0.0
    };

    Ok(VolumeTrend {
        direction,
        percent_change,
        recent_average: Some(recent),
        older_average: Some(older),
    })
}
