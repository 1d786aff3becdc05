//! Motion trace types.
//!
//! A trace is the frame-by-frame record of a simulation run, written as
//! JSONL: one `# {header}` comment line followed by one sample per line.

use serde::{Deserialize, Serialize};

use crate::object::ObjectId;

/// Current trace schema version.
pub const TRACE_SCHEMA_VERSION: &str = "1.0";

/// Which target an object is currently springing toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverPhase {
    /// Not hovered: heading for (or sitting at) rest height.
    #[default]
    Resting,
    /// Hovered: heading for rest height plus lift.
    Lifted,
}

impl HoverPhase {
    pub fn from_hovered(hovered: bool) -> Self {
        if hovered {
            HoverPhase::Lifted
        } else {
            HoverPhase::Resting
        }
    }
}

/// One object's state after one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    /// Zero-based frame index.
    pub frame: u64,

    /// Simulated time at the end of the frame (seconds).
    #[serde(rename = "t")]
    pub time_secs: f64,

    pub id: ObjectId,

    /// Vertical position after the update.
    pub height: f64,

    /// Vertical velocity after the update.
    pub velocity: f64,

    pub hovered: bool,

    pub phase: HoverPhase,

    /// Whether this frame ended in a ground bounce.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bounced: bool,
}

/// Metadata written at the top of a trace file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time the trace was produced (RFC 3339).
    pub recorded_at: String,

    /// Fixed simulation rate.
    pub fps: u32,

    /// Simulated duration (seconds).
    pub duration_secs: f64,
}

impl TraceHeader {
    /// Header stamped with the current wall-clock time.
    pub fn now(fps: u32, duration_secs: f64) -> Self {
        Self {
            schema_version: TRACE_SCHEMA_VERSION.to_string(),
            recorded_at: chrono::Utc::now().to_rfc3339(),
            fps,
            duration_secs,
        }
    }
}

/// Serialize a header and samples to JSONL.
pub fn serialize_trace(
    header: &TraceHeader,
    samples: &[MotionSample],
) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    output.push_str("# ");
    output.push_str(&serde_json::to_string(header)?);
    output.push('\n');
    for sample in samples {
        output.push_str(&serde_json::to_string(sample)?);
        output.push('\n');
    }
    Ok(output)
}

/// Parse samples from JSONL, skipping blank and `#` lines.
pub fn parse_samples(jsonl: &str) -> Result<Vec<MotionSample>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Parse the `# {header}` line if present.
pub fn parse_header(jsonl: &str) -> Option<TraceHeader> {
    let first = jsonl.lines().next()?.trim();
    let body = first.strip_prefix('#')?.trim();
    serde_json::from_str(body).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(frame: u64, height: f64, bounced: bool) -> MotionSample {
        MotionSample {
            frame,
            time_secs: (frame + 1) as f64 / 60.0,
            id: ObjectId::new("books"),
            height,
            velocity: 0.0,
            hovered: false,
            phase: HoverPhase::Resting,
            bounced,
        }
    }

    #[test]
    fn test_trace_file_layout() {
        let header = TraceHeader {
            schema_version: TRACE_SCHEMA_VERSION.to_string(),
            recorded_at: "2026-01-01T00:00:00+00:00".to_string(),
            fps: 60,
            duration_secs: 1.0,
        };
        let samples = vec![sample(0, 0.5, false), sample(1, 0.5, true)];
        let jsonl = serialize_trace(&header, &samples).unwrap();

        assert!(jsonl.starts_with("# {"));
        assert_eq!(parse_header(&jsonl), Some(header));
        assert_eq!(parse_samples(&jsonl).unwrap(), samples);
    }

    #[test]
    fn test_sample_json_format() {
        let json = serde_json::to_string(&sample(3, 0.75, false)).unwrap();
        assert!(json.contains("\"frame\":3"));
        assert!(json.contains("\"id\":\"books\""));
        assert!(json.contains("\"phase\":\"resting\""));
        // Only bounce frames carry the flag
        assert!(!json.contains("bounced"));

        let json = serde_json::to_string(&sample(4, 0.5, true)).unwrap();
        assert!(json.contains("\"bounced\":true"));
    }

    #[test]
    fn test_header_missing() {
        assert_eq!(parse_header("{\"frame\":0}"), None);
        assert_eq!(parse_header(""), None);
    }

    #[test]
    fn test_phase_from_hovered() {
        assert_eq!(HoverPhase::from_hovered(true), HoverPhase::Lifted);
        assert_eq!(HoverPhase::from_hovered(false), HoverPhase::Resting);
    }
}
