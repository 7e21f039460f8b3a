//! Mo Zen core crate.
//!
//! Pointer movement over a dark canvas leaves a trail of white-ink
//! characters, flowers, leaves and splats that bleed outward and fade. The
//! page shell (buttons, panels) stays in JS; it mounts an [`InkCanvas`],
//! feeds it trail text and asks the Zen master for new insights through
//! [`generate_zen_content`].
//!
//! The simulation (`ink`, `store`, `emission`, `canvas`) never touches the
//! browser and runs headless against [`RecordingSurface`]; `web` binds it to
//! a real `<canvas>`.

use wasm_bindgen::prelude::*;

pub mod canvas;
pub mod config;
pub mod emission;
pub mod error;
pub mod ink;
pub mod oracle;
pub mod rng;
pub mod store;
pub mod surface;
pub mod web;

pub use canvas::ZenCanvas;
pub use config::InkConfig;
pub use error::{GenerationError, MountError};
pub use ink::{Particle, ParticleKind};
pub use oracle::{generate_zen_content, InsightHistory, OracleClient, ZenMode};
pub use store::ParticleStore;
pub use surface::{InkSurface, RecordingSurface};
pub use web::{InkCanvas, DEFAULT_TRAIL_TEXT, VOID_TEXT};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // Err only if a logger is already installed (hot reload).
    console_log::init_with_level(log::Level::Info).ok();
}

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

/// Mount on the default full-viewport canvas.
#[wasm_bindgen]
pub fn start_zen() -> Result<InkCanvas, JsValue> {
    InkCanvas::mount(None)
}
