//! Deterministic throwing-phase simulation
//!
//! All gameplay logic for the minigame lives here. This module must be pure:
//! - Fixed timestep only
//! - Stable iteration order (by entity id)
//! - State in, events out; no rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{ResolveOutcome, projectile_hits_target, resolve_hits};
pub use state::{GameEvent, GamePhase, GameSession, Launcher, Projectile, Target};
pub use tick::tick;
