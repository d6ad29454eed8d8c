//! Game state and core simulation types
//!
//! Everything the throwing phase mutates per tick lives here. The quiz hands a
//! single spear count across at the phase boundary; the two phases share no
//! other state.

use glam::Vec2;

use crate::consts::*;

/// Current phase of the throwing minigame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Ticks advance the simulation
    Running,
    /// Out of spears with none in flight; final score reported
    Ended,
}

/// The moving circular target
#[derive(Debug, Clone)]
pub struct Target {
    pub pos: Vec2,
    pub radius: f32,
    /// Horizontal velocity; flips sign on playfield bound contact
    pub vx: f32,
}

impl Target {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(FIELD_WIDTH / 2.0, TARGET_Y),
            radius: TARGET_RADIUS,
            vx: TARGET_SPEED,
        }
    }

    /// Advance horizontally with an elastic reflection at either bound.
    /// The disc edge, not the center, is what touches the bound.
    pub fn advance(&mut self, dt: f32) {
        self.pos.x += self.vx * dt;
        if self.pos.x + self.radius > FIELD_WIDTH || self.pos.x - self.radius < 0.0 {
            self.vx = -self.vx;
        }
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed rack the player throws spears from
#[derive(Debug, Clone)]
pub struct Launcher {
    pub pos: Vec2,
    /// Reserved for aiming; currently every spear flies straight up
    pub angle: f32,
}

impl Launcher {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT * LAUNCHER_Y_FRACTION),
            angle: 0.0,
        }
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new()
    }
}

/// A spear in flight
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub angle: f32,
}

impl Projectile {
    /// Constant climb toward the target's side of the field
    pub fn advance(&mut self, dt: f32) {
        self.pos.y -= PROJECTILE_SPEED * dt;
    }

    /// True once the spear has left the playfield past the top edge.
    /// An exit is a plain miss, never a score penalty.
    pub fn out_of_bounds(&self) -> bool {
        self.pos.y < -PROJECTILE_EXIT_MARGIN
    }
}

/// Something the presentation layer should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A spear struck the target; `score` already includes the point
    Hit { score: u32 },
    /// Simulation finished; report the final score
    Ended { score: u32 },
}

/// Complete throwing-phase state
#[derive(Debug, Clone)]
pub struct GameSession {
    pub score: u32,
    /// Spears left to throw, earned one per correct quiz answer
    pub ammo: u32,
    /// In-flight spears, ordered by id
    pub projectiles: Vec<Projectile>,
    pub target: Target,
    pub launcher: Launcher,
    pub phase: GamePhase,
    /// Next entity ID
    next_id: u32,
}

impl GameSession {
    /// Start the throwing phase with the ammunition earned in the quiz
    pub fn new(ammo: u32) -> Self {
        Self {
            score: 0,
            ammo,
            projectiles: Vec::new(),
            target: Target::new(),
            launcher: Launcher::new(),
            phase: GamePhase::Running,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Throw one spear from the launcher, if any remain.
    ///
    /// This is the authoritative ammunition gate: the decrement and the spawn
    /// happen together, and the call is safe between ticks. Returns the new
    /// spear's id, or `None` when out of spears or already ended.
    pub fn fire(&mut self) -> Option<u32> {
        if self.phase == GamePhase::Ended || self.ammo == 0 {
            return None;
        }
        self.ammo -= 1;
        let id = self.next_entity_id();
        self.projectiles.push(Projectile {
            id,
            pos: self.launcher.pos,
            angle: self.launcher.angle,
        });
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    #[test]
    fn fire_gate_is_authoritative() {
        let mut session = GameSession::new(3);

        // Four rapid calls with no ticks in between
        assert!(session.fire().is_some());
        assert!(session.fire().is_some());
        assert!(session.fire().is_some());
        assert!(session.fire().is_none());

        assert_eq!(session.ammo, 0);
        assert_eq!(session.projectiles.len(), 3);
    }

    #[test]
    fn fire_rejected_after_end() {
        let mut session = GameSession::new(5);
        session.phase = GamePhase::Ended;
        assert!(session.fire().is_none());
        assert_eq!(session.ammo, 5);
        assert!(session.projectiles.is_empty());
    }

    #[test]
    fn fired_spears_get_distinct_ids() {
        let mut session = GameSession::new(4);
        let ids: Vec<_> = (0..4).filter_map(|_| session.fire()).collect();
        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(ids.len(), 4);
        assert_eq!(ids, deduped);
    }

    #[test]
    fn target_reflects_at_bounds() {
        let mut target = Target::new();
        let mut flipped = 0;
        let mut prev_vx = target.vx;

        for _ in 0..100_000 {
            target.advance(SIM_DT);
            if target.vx.signum() != prev_vx.signum() {
                flipped += 1;
                prev_vx = target.vx;
            }
            // One step of overshoot is allowed before the flip takes effect
            let slack = TARGET_SPEED * SIM_DT;
            assert!(target.pos.x - target.radius >= -slack);
            assert!(target.pos.x + target.radius <= FIELD_WIDTH + slack);
        }

        assert!(flipped >= 2, "target never bounced off both bounds");
    }

    #[test]
    fn projectile_exits_past_top_margin() {
        let mut p = Projectile {
            id: 1,
            pos: glam::Vec2::new(400.0, 10.0),
            angle: 0.0,
        };
        assert!(!p.out_of_bounds());
        while !p.out_of_bounds() {
            p.advance(SIM_DT);
        }
        assert!(p.pos.y < -PROJECTILE_EXIT_MARGIN);
    }
}
