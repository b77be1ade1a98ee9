//! Galleria Application
//!
//! Browser binding for the gallery state machine, plus a native replay tool
//! for exercising it from scripts.

pub mod dom;
pub mod replay;

pub use dom::{DomEffect, SlideChangeDetail, initial_effects, plan_all, plan_effects};
pub use replay::{ReplayError, ReplayReport, ReplayScript, ReplayStep};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{WebGallery, start};
