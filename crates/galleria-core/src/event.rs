//! Events emitted by the gallery for the host to render.

use serde::{Deserialize, Serialize};

use crate::transform::TransformData;

/// A state change the host should reflect in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GalleryEvent {
    /// The selected slide changed.
    SlideChanged {
        /// Whether navigation went backwards.
        reverse: bool,
        selected: usize,
        previous: usize,
    },
    /// A slide was zoomed in or out.
    ZoomChanged { slide: usize, zoomed: bool },
    /// A slide's transform changed and must be re-applied.
    TransformChanged {
        slide: usize,
        transform: TransformData,
    },
}

impl GalleryEvent {
    /// Index of the slide this event is about.
    pub fn slide(&self) -> usize {
        match self {
            Self::SlideChanged { selected, .. } => *selected,
            Self::ZoomChanged { slide, .. } | Self::TransformChanged { slide, .. } => *slide,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_accessor() {
        let event = GalleryEvent::SlideChanged {
            reverse: true,
            selected: 2,
            previous: 3,
        };
        assert_eq!(event.slide(), 2);

        let event = GalleryEvent::ZoomChanged {
            slide: 4,
            zoomed: true,
        };
        assert_eq!(event.slide(), 4);
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let event = GalleryEvent::ZoomChanged {
            slide: 1,
            zoomed: false,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "zoom_changed");
        assert_eq!(json["slide"], 1);
        assert_eq!(json["zoomed"], false);
    }
}
