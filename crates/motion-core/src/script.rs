//! Scripted hover input for headless runs.
//!
//! A hover window is written `START..END` in seconds; a cue optionally
//! names its target as `ID@START..END`. Cues without a target apply to
//! every object.

use std::fmt;
use std::str::FromStr;

use levitate_common::error::LevitateError;
use levitate_scene_model::object::ObjectId;

/// Half-open interval `[start, end)` during which an object is hovered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverWindow {
    pub start_secs: f64,
    pub end_secs: f64,
}

impl HoverWindow {
    pub fn new(start_secs: f64, end_secs: f64) -> Result<Self, LevitateError> {
        let input = format!("{start_secs}..{end_secs}");
        if !start_secs.is_finite() || !end_secs.is_finite() {
            return Err(LevitateError::invalid_hover_window(
                input,
                "bounds must be finite",
            ));
        }
        if start_secs < 0.0 {
            return Err(LevitateError::invalid_hover_window(
                input,
                "start must not be negative",
            ));
        }
        if end_secs <= start_secs {
            return Err(LevitateError::invalid_hover_window(
                input,
                "end must be after start",
            ));
        }
        Ok(Self {
            start_secs,
            end_secs,
        })
    }

    pub fn contains(&self, time_secs: f64) -> bool {
        time_secs >= self.start_secs && time_secs < self.end_secs
    }
}

impl FromStr for HoverWindow {
    type Err = LevitateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once("..")
            .ok_or_else(|| LevitateError::invalid_hover_window(s, "expected START..END"))?;
        let parse = |part: &str| {
            part.trim().parse::<f64>().map_err(|e| {
                LevitateError::invalid_hover_window(s, format!("bad number '{part}': {e}"))
            })
        };
        // Report the text the user wrote, not the reformatted numbers
        Self::new(parse(start)?, parse(end)?).map_err(|e| match e {
            LevitateError::InvalidHoverWindow { message, .. } => {
                LevitateError::invalid_hover_window(s, message)
            }
            other => other,
        })
    }
}

impl fmt::Display for HoverWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start_secs, self.end_secs)
    }
}

/// A hover window, optionally aimed at one object.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverCue {
    pub target: Option<ObjectId>,
    pub window: HoverWindow,
}

impl HoverCue {
    pub fn applies_to(&self, id: &ObjectId) -> bool {
        self.target.as_ref().map_or(true, |target| target == id)
    }
}

impl FromStr for HoverCue {
    type Err = LevitateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('@') {
            Some((id, window)) => {
                let id = id.trim();
                if id.is_empty() {
                    return Err(LevitateError::invalid_hover_window(s, "empty object id"));
                }
                Ok(Self {
                    target: Some(ObjectId::new(id)),
                    window: window.parse()?,
                })
            }
            None => Ok(Self {
                target: None,
                window: s.parse()?,
            }),
        }
    }
}

/// All hover windows for one object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoverScript {
    windows: Vec<HoverWindow>,
}

impl HoverScript {
    pub fn new(mut windows: Vec<HoverWindow>) -> Self {
        windows.sort_by(|a, b| a.start_secs.total_cmp(&b.start_secs));
        Self { windows }
    }

    /// Collect the windows from `cues` that apply to `id`.
    pub fn for_object(cues: &[HoverCue], id: &ObjectId) -> Self {
        Self::new(
            cues.iter()
                .filter(|cue| cue.applies_to(id))
                .map(|cue| cue.window)
                .collect(),
        )
    }

    pub fn is_hovered(&self, time_secs: f64) -> bool {
        self.windows.iter().any(|w| w.contains(time_secs))
    }

    pub fn windows(&self) -> &[HoverWindow] {
        &self.windows
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
