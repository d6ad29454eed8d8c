//! Yari Dojo - an arithmetic quiz gate followed by a spear-throwing minigame
//!
//! Core modules:
//! - `quiz`: question generation and the quiz session state machine
//! - `sim`: deterministic throwing-phase simulation (target, spears, collisions)
//! - `renderer`: canvas 2D drawing (wasm only)
//! - `audio`: procedural Web Audio cues (wasm only)
//! - `settings`: user preferences persisted to LocalStorage

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod quiz;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the cadence the tuning values assume)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Logical playfield dimensions (scaled to the canvas on resize)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Target defaults
    pub const TARGET_Y: f32 = 80.0;
    pub const TARGET_RADIUS: f32 = 40.0;
    /// Horizontal target speed in pixels/sec (2 px per 60 Hz tick)
    pub const TARGET_SPEED: f32 = 120.0;

    /// The launcher sits at this fraction of the field height
    pub const LAUNCHER_Y_FRACTION: f32 = 0.8;

    /// Spear climb speed in pixels/sec (7 px per 60 Hz tick)
    pub const PROJECTILE_SPEED: f32 = 420.0;
    /// Spears are culled this far past the top edge
    pub const PROJECTILE_EXIT_MARGIN: f32 = 20.0;

    /// Quiz length
    pub const TOTAL_QUESTIONS: usize = 10;
}
