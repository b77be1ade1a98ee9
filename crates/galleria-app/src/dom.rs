//! Translation of gallery events into concrete DOM mutations.
//!
//! Kept free of `web-sys` so the planning logic runs (and is tested) on
//! every target; `web.rs` only executes the planned effects.

use galleria_core::slide::{CLASS_SELECTED, CLASS_ZOOM_ACTIVE};
use galleria_core::{Gallery, GalleryEvent};
use serde::Serialize;

pub use galleria_core::slide::CLASS_SLIDE_CONTAINER;

/// Class added to the gallery root element.
pub const CLASS_GALLERY: &str = "image-gallery";
/// Class of the "next slide" button inside the root.
pub const CLASS_BUTTON_NEXT: &str = "slide-button-next";
/// Class of the "previous slide" button inside the root.
pub const CLASS_BUTTON_PREV: &str = "slide-button-prev";
/// Custom event dispatched on the root after every navigation.
pub const SLIDE_CHANGE_EVENT: &str = "slideChangeEvent";
/// Optional root attribute holding a JSON [`GalleryConfig`](galleria_core::GalleryConfig).
pub const CONFIG_ATTRIBUTE: &str = "data-gallery-config";

/// `detail` payload of [`SLIDE_CHANGE_EVENT`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideChangeDetail {
    pub reverse: bool,
    pub slide_selected: usize,
}

/// A single DOM mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomEffect {
    /// Add a class to a slide container.
    AddClass { slide: usize, class: &'static str },
    /// Remove a class from a slide container.
    RemoveClass { slide: usize, class: &'static str },
    /// Set `style.transform` on the container's `img`.
    SetTransform { slide: usize, css: String },
    /// Dispatch a custom event on the gallery root.
    Dispatch {
        name: &'static str,
        detail: SlideChangeDetail,
    },
}

/// Effects for a single gallery event.
pub fn plan_effects(event: &GalleryEvent) -> Vec<DomEffect> {
    match event {
        GalleryEvent::SlideChanged {
            reverse,
            selected,
            previous,
        } => vec![
            DomEffect::RemoveClass {
                slide: *previous,
                class: CLASS_SELECTED,
            },
            DomEffect::AddClass {
                slide: *selected,
                class: CLASS_SELECTED,
            },
            DomEffect::Dispatch {
                name: SLIDE_CHANGE_EVENT,
                detail: SlideChangeDetail {
                    reverse: *reverse,
                    slide_selected: *selected,
                },
            },
        ],
        GalleryEvent::ZoomChanged { slide, zoomed } => {
            let slide = *slide;
            if *zoomed {
                vec![DomEffect::AddClass {
                    slide,
                    class: CLASS_ZOOM_ACTIVE,
                }]
            } else {
                vec![DomEffect::RemoveClass {
                    slide,
                    class: CLASS_ZOOM_ACTIVE,
                }]
            }
        }
        GalleryEvent::TransformChanged { slide, transform } => vec![DomEffect::SetTransform {
            slide: *slide,
            css: transform.to_css(),
        }],
    }
}

/// Effects for a batch of events, in order.
pub fn plan_all(events: &[GalleryEvent]) -> Vec<DomEffect> {
    events.iter().flat_map(plan_effects).collect()
}

/// Effects that bring freshly collected containers in line with the gallery.
///
/// Markup may ship with stale state classes, so every container is
/// explicitly synced.
pub fn initial_effects(gallery: &Gallery) -> Vec<DomEffect> {
    let mut effects = Vec::new();
    for (slide, state) in gallery.slides().iter().enumerate() {
        for (class, on) in [
            (CLASS_SELECTED, state.is_selected()),
            (CLASS_ZOOM_ACTIVE, state.is_zoomed()),
        ] {
            effects.push(if on {
                DomEffect::AddClass { slide, class }
            } else {
                DomEffect::RemoveClass { slide, class }
            });
        }
        if state.has_transform() {
            effects.push(DomEffect::SetTransform {
                slide,
                css: state.transform().to_css(),
            });
        }
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use galleria_core::{GalleryConfig, RotateDirection};

    #[test]
    fn test_slide_change_effects() {
        let effects = plan_effects(&GalleryEvent::SlideChanged {
            reverse: true,
            selected: 0,
            previous: 1,
        });
        assert_eq!(
            effects,
            vec![
                DomEffect::RemoveClass {
                    slide: 1,
                    class: CLASS_SELECTED,
                },
                DomEffect::AddClass {
                    slide: 0,
                    class: CLASS_SELECTED,
                },
                DomEffect::Dispatch {
                    name: SLIDE_CHANGE_EVENT,
                    detail: SlideChangeDetail {
                        reverse: true,
                        slide_selected: 0,
                    },
                },
            ]
        );
    }

    #[test]
    fn test_detail_uses_dom_field_names() {
        let detail = SlideChangeDetail {
            reverse: false,
            slide_selected: 3,
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json, serde_json::json!({"reverse": false, "slideSelected": 3}));
    }

    #[test]
    fn test_zoom_round_trip_effects() {
        let mut gallery = Gallery::new(2, GalleryConfig::default()).unwrap();
        gallery.toggle_zoom().unwrap();
        gallery.toggle_zoom().unwrap();

        let effects = plan_all(&gallery.drain_events());
        assert_eq!(
            effects,
            vec![
                DomEffect::AddClass {
                    slide: 0,
                    class: CLASS_ZOOM_ACTIVE,
                },
                DomEffect::SetTransform {
                    slide: 0,
                    css: "translate(0%, 0%) rotate(0deg) scale(2.2)".to_string(),
                },
                DomEffect::RemoveClass {
                    slide: 0,
                    class: CLASS_ZOOM_ACTIVE,
                },
                DomEffect::SetTransform {
                    slide: 0,
                    css: "translate(0%, 0%) rotate(0deg) scale(1)".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_initial_effects_sync_state_classes() {
        let mut gallery = Gallery::new(2, GalleryConfig::default()).unwrap();
        gallery.rotate_slide(RotateDirection::Right).unwrap();

        let effects = initial_effects(&gallery);
        assert!(effects.contains(&DomEffect::AddClass {
            slide: 0,
            class: CLASS_SELECTED,
        }));
        assert!(effects.contains(&DomEffect::RemoveClass {
            slide: 1,
            class: CLASS_SELECTED,
        }));
        assert!(effects.contains(&DomEffect::SetTransform {
            slide: 0,
            css: "translate(0%, 0%) rotate(90deg) scale(1)".to_string(),
        }));
        assert!(!effects
            .iter()
            .any(|e| matches!(e, DomEffect::SetTransform { slide: 1, .. })));
    }
}
