//! Galleria Core Library
//!
//! Platform-agnostic transform state machine for the Galleria image gallery:
//! slide navigation, zoom, drag-to-pan and rotation, tracked per slide.

pub mod config;
pub mod error;
pub mod event;
pub mod gallery;
pub mod input;
pub mod shortcuts;
pub mod slide;
pub mod transform;

pub use config::GalleryConfig;
pub use error::{GalleryError, GalleryResult};
pub use event::GalleryEvent;
pub use gallery::{Gallery, Navigation, RotateDirection};
pub use input::{Gesture, GestureTracker, PointerEvent, PointerKind};
pub use shortcuts::{GalleryCommand, Shortcut, ShortcutRegistry};
pub use slide::{Slide, SlideId};
pub use transform::{TransformData, clamp_position};
