//! Slide containers and their visual state.

use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::transform::TransformData;

/// Unique identifier for a slide.
pub type SlideId = Uuid;

/// Class carried by every slide container.
pub const CLASS_SLIDE_CONTAINER: &str = "slide-container";
/// Class marking the selected slide.
pub const CLASS_SELECTED: &str = "container-selected";
/// Class marking a zoomed slide.
pub const CLASS_ZOOM_ACTIVE: &str = "zoom-active";

/// One slide container wrapping an image.
///
/// The transform record is only allocated once something writes to it;
/// until then reads see the identity transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slide {
    id: SlideId,
    transform: Option<TransformData>,
    selected: bool,
    zoomed: bool,
    /// Pointer position minus slide position, captured when a drag starts.
    drag_anchor: Option<Vec2>,
}

impl Default for Slide {
    fn default() -> Self {
        Self::new()
    }
}

impl Slide {
    /// Create an unselected, unzoomed slide with a fresh id.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Create a slide with a known id.
    pub fn with_id(id: SlideId) -> Self {
        Self {
            id,
            transform: None,
            selected: false,
            zoomed: false,
            drag_anchor: None,
        }
    }

    pub fn id(&self) -> SlideId {
        self.id
    }

    /// Current transform, or the identity if none has been stored yet.
    pub fn transform(&self) -> TransformData {
        self.transform.unwrap_or_default()
    }

    /// Mutable transform, created on first access.
    pub fn transform_mut(&mut self) -> &mut TransformData {
        self.transform.get_or_insert_with(TransformData::default)
    }

    /// Whether the transform record has been created.
    pub fn has_transform(&self) -> bool {
        self.transform.is_some()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn set_zoomed(&mut self, zoomed: bool) {
        self.zoomed = zoomed;
        if !zoomed {
            self.drag_anchor = None;
        }
    }

    pub(crate) fn drag_anchor(&self) -> Option<Vec2> {
        self.drag_anchor
    }

    pub(crate) fn set_drag_anchor(&mut self, anchor: Option<Vec2>) {
        self.drag_anchor = anchor;
    }

    /// CSS classes the container element should carry.
    pub fn class_list(&self) -> Vec<&'static str> {
        let mut classes = vec![CLASS_SLIDE_CONTAINER];
        if self.selected {
            classes.push(CLASS_SELECTED);
        }
        if self.zoomed {
            classes.push(CLASS_ZOOM_ACTIVE);
        }
        classes
    }
}
