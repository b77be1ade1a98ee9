//! Scripted replay of gallery interactions.
//!
//! A script is a JSON document:
//!
//! ```json
//! {
//!   "slides": 3,
//!   "config": { "zoom_scale": 2.0 },
//!   "steps": [
//!     { "op": "command", "command": "next" },
//!     { "op": "command", "command": "toggle_zoom" },
//!     { "op": "drag", "slide": 1, "from": [0, 0], "to": [30, -10] },
//!     { "op": "select", "index": -1 }
//!   ]
//! }
//! ```

use std::fmt;
use std::path::Path;
use std::time::Duration;

use galleria_core::input::Instant;
use galleria_core::{Gallery, GalleryCommand, GalleryConfig, GalleryError, PointerEvent, PointerKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error("Step {step} failed: {source}")]
    Step {
        step: usize,
        #[source]
        source: GalleryError,
    },
    #[error(transparent)]
    Gallery(#[from] GalleryError),
}

/// A replay script.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    pub slides: usize,
    #[serde(default)]
    pub config: GalleryConfig,
    #[serde(default)]
    pub steps: Vec<ReplayStep>,
}

/// One scripted interaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ReplayStep {
    Command { command: GalleryCommand },
    Select { index: isize },
    /// Press at `from`, move to `to`, release.
    Drag {
        slide: usize,
        from: [f64; 2],
        to: [f64; 2],
    },
}

/// Final state of one slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideReport {
    pub index: usize,
    pub selected: bool,
    pub zoomed: bool,
    pub transform: String,
}

/// Final state of the gallery after a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub selected: usize,
    pub events: usize,
    pub slides: Vec<SlideReport>,
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "selected: {} ({} events)", self.selected, self.events)?;
        for slide in &self.slides {
            let mut flags = Vec::new();
            if slide.selected {
                flags.push("selected");
            }
            if slide.zoomed {
                flags.push("zoomed");
            }
            writeln!(f, "  [{}] {} {}", slide.index, slide.transform, flags.join(","))?;
        }
        Ok(())
    }
}

/// Replay a parsed script.
///
/// Steps run on a synthetic clock that advances past the double click window
/// after each step, so two drags from the same point stay two drags.
pub fn run(script: &ReplayScript) -> Result<ReplayReport, ReplayError> {
    let mut gallery = Gallery::new(script.slides, script.config.clone())?;
    let step_gap = Duration::from_millis(script.config.double_click_ms.saturating_add(1));
    let mut now = Instant::now();
    let mut events = 0;

    for (step, action) in script.steps.iter().enumerate() {
        log::debug!("Step {}: {:?}", step, action);
        apply_step(&mut gallery, action, now)
            .map_err(|source| ReplayError::Step { step, source })?;
        events += gallery.drain_events().len();
        now = now.checked_add(step_gap).unwrap_or(now);
    }

    let slides = gallery
        .slides()
        .iter()
        .enumerate()
        .map(|(index, slide)| SlideReport {
            index,
            selected: slide.is_selected(),
            zoomed: slide.is_zoomed(),
            transform: slide.transform().to_css(),
        })
        .collect();

    Ok(ReplayReport {
        selected: gallery.selected(),
        events,
        slides,
    })
}

/// Replay a script from a JSON string.
pub fn run_json(json: &str) -> Result<ReplayReport, ReplayError> {
    let script: ReplayScript = serde_json::from_str(json)?;
    run(&script)
}

/// Replay a script file.
pub fn run_file(path: impl AsRef<Path>) -> Result<ReplayReport, ReplayError> {
    let json = std::fs::read_to_string(path)?;
    run_json(&json)
}

fn apply_step(gallery: &mut Gallery, step: &ReplayStep, now: Instant) -> Result<(), GalleryError> {
    match step {
        ReplayStep::Command { command } => gallery.apply(*command),
        ReplayStep::Select { index } => gallery.select_slide(*index).map(drop),
        ReplayStep::Drag { slide, from, to } => {
            let kind = PointerKind::Mouse;
            let from = Point::new(from[0], from[1]);
            let to = Point::new(to[0], to[1]);
            gallery.handle_pointer_at(*slide, PointerEvent::Down { position: from, kind }, now)?;
            gallery.handle_pointer_at(*slide, PointerEvent::Move { position: to, kind }, now)?;
            gallery.handle_pointer_at(*slide, PointerEvent::Up { position: to, kind }, now)
        }
    }
}
