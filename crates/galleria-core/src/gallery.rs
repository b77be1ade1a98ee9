//! The gallery state machine: navigation, zoom, rotation and drag-to-pan.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

use crate::config::GalleryConfig;
use crate::error::{GalleryError, GalleryResult};
use crate::event::GalleryEvent;
use crate::input::{Gesture, GestureTracker, Instant, PointerEvent};
use crate::shortcuts::GalleryCommand;
use crate::slide::Slide;
use crate::transform::TransformData;

/// Rotation direction for [`Gallery::rotate_slide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotateDirection {
    /// Counter-clockwise.
    Left,
    /// Clockwise.
    Right,
}

/// Where to move the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Navigation {
    Next,
    Prev,
    /// Jump to an index. Out-of-range values wrap as `|index % len|`.
    To(isize),
}

/// Headless image gallery.
///
/// Owns an ordered list of slides, tracks which one is selected, and applies
/// navigation, zoom, rotation and drag input to per-slide transforms. Every
/// visible change is queued as a [`GalleryEvent`]; the host drains them with
/// [`Gallery::drain_events`] and updates the document.
#[derive(Debug, Clone)]
pub struct Gallery {
    slides: Vec<Slide>,
    selected: usize,
    config: GalleryConfig,
    gestures: GestureTracker,
    /// Slide the current pointer sequence started on.
    pointer_slide: Option<usize>,
    events: Vec<GalleryEvent>,
}

impl Gallery {
    /// Create a gallery of `slide_count` fresh slides.
    pub fn new(slide_count: usize, config: GalleryConfig) -> GalleryResult<Self> {
        Self::with_slides((0..slide_count).map(|_| Slide::new()).collect(), config)
    }

    /// Create a gallery from existing slides. The first slide is selected.
    pub fn with_slides(mut slides: Vec<Slide>, config: GalleryConfig) -> GalleryResult<Self> {
        config.validate()?;
        for (i, slide) in slides.iter_mut().enumerate() {
            slide.set_selected(i == 0);
        }
        log::debug!("Created gallery with {} slides", slides.len());
        Ok(Self {
            slides,
            selected: 0,
            gestures: GestureTracker::new(&config),
            pointer_slide: None,
            config,
            events: Vec::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Index of the selected slide.
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide(&self, index: usize) -> GalleryResult<&Slide> {
        self.check_index(index)?;
        Ok(&self.slides[index])
    }

    /// Transform of a slide; the identity if it was never modified.
    pub fn transform(&self, index: usize) -> GalleryResult<TransformData> {
        self.slide(index).map(Slide::transform)
    }

    /// CSS `transform` value for a slide's image.
    pub fn transform_css(&self, index: usize) -> GalleryResult<String> {
        self.transform(index).map(|t| t.to_css())
    }

    /// Take all events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<GalleryEvent> {
        std::mem::take(&mut self.events)
    }

    /// Move the selection forward, wrapping at the end.
    pub fn next_slide(&mut self) -> GalleryResult<usize> {
        self.navigate(Navigation::Next)
    }

    /// Move the selection backward, wrapping at the start.
    pub fn prev_slide(&mut self) -> GalleryResult<usize> {
        self.navigate(Navigation::Prev)
    }

    /// Select a slide by index.
    pub fn select_slide(&mut self, index: isize) -> GalleryResult<usize> {
        self.navigate(Navigation::To(index))
    }

    /// Change the selected slide and return the new index.
    ///
    /// Any drag on the previously selected slide ends. Zoom, pan and rotation
    /// stay with their slide.
    pub fn navigate(&mut self, navigation: Navigation) -> GalleryResult<usize> {
        let len = self.non_empty_len()?;
        let previous = self.selected;
        let (reverse, target) = match navigation {
            Navigation::Next => (false, (previous + 1) % len),
            Navigation::Prev => (true, (previous + len - 1) % len),
            Navigation::To(index) => (false, wrap_index(index, len)),
        };

        self.release_pointer();
        self.slides[previous].set_drag_anchor(None);
        self.slides[previous].set_selected(false);
        self.slides[target].set_selected(true);
        self.selected = target;

        log::debug!("Slide changed {} -> {} (reverse: {})", previous, target, reverse);
        self.events.push(GalleryEvent::SlideChanged {
            reverse,
            selected: target,
            previous,
        });
        Ok(target)
    }

    /// Toggle zoom on the selected slide and return whether it is now zoomed.
    ///
    /// Zooming in sets the configured scale and enables drag-to-pan. Zooming
    /// out restores scale 1, recenters the image and ends any drag.
    pub fn toggle_zoom(&mut self) -> GalleryResult<bool> {
        self.non_empty_len()?;
        let index = self.selected;
        let zoom_scale = self.config.zoom_scale;
        let slide = &mut self.slides[index];

        let zoomed = !slide.is_zoomed();
        slide.set_zoomed(zoomed);
        let transform = slide.transform_mut();
        if zoomed {
            transform.scale = zoom_scale;
        } else {
            transform.scale = 1.0;
            transform.position = Vec2::ZERO;
        }
        let transform = *transform;

        log::debug!("Slide {} zoom {}", index, if zoomed { "on" } else { "off" });
        self.events.push(GalleryEvent::ZoomChanged {
            slide: index,
            zoomed,
        });
        self.events.push(GalleryEvent::TransformChanged {
            slide: index,
            transform,
        });
        Ok(zoomed)
    }

    /// Rotate the selected slide by one step.
    pub fn rotate_slide(&mut self, direction: RotateDirection) -> GalleryResult<TransformData> {
        self.non_empty_len()?;
        let index = self.selected;
        let step = match direction {
            RotateDirection::Right => self.config.rotation_step,
            RotateDirection::Left => -self.config.rotation_step,
        };

        let transform = self.slides[index].transform_mut();
        transform.rotate_by(step);
        let transform = *transform;

        log::debug!("Slide {} rotated to {}deg", index, transform.rotation);
        self.events.push(GalleryEvent::TransformChanged {
            slide: index,
            transform,
        });
        Ok(transform)
    }

    /// Restore the selected slide to an unzoomed identity transform.
    pub fn reset_slide(&mut self) -> GalleryResult<()> {
        self.non_empty_len()?;
        let index = self.selected;
        let slide = &mut self.slides[index];

        let was_zoomed = slide.is_zoomed();
        slide.set_zoomed(false);
        *slide.transform_mut() = TransformData::default();

        if was_zoomed {
            self.events.push(GalleryEvent::ZoomChanged {
                slide: index,
                zoomed: false,
            });
        }
        self.events.push(GalleryEvent::TransformChanged {
            slide: index,
            transform: TransformData::default(),
        });
        Ok(())
    }

    /// Start panning a zoomed slide from a pointer position.
    ///
    /// Returns `false` when the slide is not zoomed.
    pub fn begin_drag(&mut self, index: usize, pointer: Point) -> GalleryResult<bool> {
        self.check_index(index)?;
        let sensitivity = self.config.pan_sensitivity;
        let slide = &mut self.slides[index];
        if !slide.is_zoomed() {
            return Ok(false);
        }
        let anchor = pointer.to_vec2() * sensitivity - slide.transform().position;
        slide.set_drag_anchor(Some(anchor));
        Ok(true)
    }

    /// Pan a dragged slide to follow the pointer.
    ///
    /// Returns the new transform, or `None` when no drag is active.
    pub fn drag_to(&mut self, index: usize, pointer: Point) -> GalleryResult<Option<TransformData>> {
        self.check_index(index)?;
        let sensitivity = self.config.pan_sensitivity;
        let limit = self.config.pan_limit;
        let slide = &mut self.slides[index];

        let Some(anchor) = slide.drag_anchor() else {
            return Ok(None);
        };
        let transform = slide.transform_mut();
        transform.set_position(pointer.to_vec2() * sensitivity - anchor, limit);
        let transform = *transform;

        self.events.push(GalleryEvent::TransformChanged {
            slide: index,
            transform,
        });
        Ok(Some(transform))
    }

    /// Stop panning. Returns whether a drag was active.
    pub fn end_drag(&mut self, index: usize) -> GalleryResult<bool> {
        self.check_index(index)?;
        let slide = &mut self.slides[index];
        let was_dragging = slide.is_dragging();
        slide.set_drag_anchor(None);
        Ok(was_dragging)
    }

    /// Route raw pointer input on a slide container.
    ///
    /// Drags pan the slide; a double click or double tap on the selected
    /// slide toggles its zoom. Double taps on other slides are ignored.
    pub fn handle_pointer(&mut self, index: usize, event: PointerEvent) -> GalleryResult<()> {
        self.handle_pointer_at(index, event, Instant::now())
    }

    /// Like [`Gallery::handle_pointer`] with an explicit timestamp.
    ///
    /// A press binds the pointer sequence to `index`. Moves and the release
    /// go to that slide even when the host reports them on another one, and
    /// a press on a different slide starts a fresh sequence.
    pub fn handle_pointer_at(
        &mut self,
        index: usize,
        event: PointerEvent,
        now: Instant,
    ) -> GalleryResult<()> {
        self.check_index(index)?;
        if matches!(event, PointerEvent::Down { .. }) && self.pointer_slide != Some(index) {
            self.release_pointer();
            self.pointer_slide = Some(index);
        }
        let target = self.pointer_slide.unwrap_or(index);

        for gesture in self.gestures.handle_at(event, now) {
            match gesture {
                Gesture::DragStart(position) => {
                    self.begin_drag(target, position)?;
                }
                Gesture::DragMove(position) => {
                    self.drag_to(target, position)?;
                }
                Gesture::DragEnd => {
                    self.end_drag(target)?;
                }
                Gesture::DoubleTap(_) if target == self.selected => {
                    self.toggle_zoom()?;
                }
                Gesture::DoubleTap(_) => {
                    log::debug!("Ignoring double tap on unselected slide {}", target);
                }
            }
        }
        Ok(())
    }

    /// Run a button or keyboard command.
    pub fn apply(&mut self, command: GalleryCommand) -> GalleryResult<()> {
        match command {
            GalleryCommand::Next => self.next_slide().map(drop),
            GalleryCommand::Prev => self.prev_slide().map(drop),
            GalleryCommand::ToggleZoom => self.toggle_zoom().map(drop),
            GalleryCommand::RotateLeft => self.rotate_slide(RotateDirection::Left).map(drop),
            GalleryCommand::RotateRight => self.rotate_slide(RotateDirection::Right).map(drop),
            GalleryCommand::Reset => self.reset_slide(),
        }
    }

    /// Drop the pointer sequence and any drag it started.
    fn release_pointer(&mut self) {
        if let Some(slide) = self.pointer_slide.take().and_then(|i| self.slides.get_mut(i)) {
            slide.set_drag_anchor(None);
        }
        self.gestures.reset();
    }

    fn non_empty_len(&self) -> GalleryResult<usize> {
        if self.slides.is_empty() {
            log::warn!("Ignoring operation on empty gallery");
            return Err(GalleryError::Empty);
        }
        Ok(self.slides.len())
    }

    fn check_index(&self, index: usize) -> GalleryResult<()> {
        let len = self.non_empty_len()?;
        if index >= len {
            log::warn!("Slide index {} out of range ({} slides)", index, len);
            return Err(GalleryError::SlideOutOfRange { index, len });
        }
        Ok(())
    }
}

/// `|index % len|`: negative indices mirror onto the positive side.
fn wrap_index(index: isize, len: usize) -> usize {
    let len = isize::try_from(len).unwrap_or(isize::MAX);
    (index % len).unsigned_abs()
}
