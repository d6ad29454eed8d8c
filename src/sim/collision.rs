//! Hit detection between spears and the moving target
//!
//! A spear counts as a point at its center and hits when strictly inside the
//! target disc. The hit set is built over an immutable pass first; the caller
//! filters afterwards, so removal can never skip or double-count a later spear.

use super::state::{Projectile, Target};

/// Result of one resolution pass
#[derive(Debug, Clone, Default)]
pub struct ResolveOutcome {
    /// Ids of spears that struck the target this tick
    pub hits: Vec<u32>,
    /// One point per hit
    pub score_delta: u32,
}

/// True when the spear center lies strictly inside the target disc.
/// A center at distance exactly equal to the radius is a miss.
pub fn projectile_hits_target(projectile: &Projectile, target: &Target) -> bool {
    projectile.pos.distance_squared(target.pos) < target.radius * target.radius
}

/// Evaluate every in-flight spear against the target exactly once
pub fn resolve_hits(target: &Target, projectiles: &[Projectile]) -> ResolveOutcome {
    let mut outcome = ResolveOutcome::default();
    for projectile in projectiles {
        if projectile_hits_target(projectile, target) {
            outcome.hits.push(projectile.id);
            outcome.score_delta += 1;
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn target_at(x: f32, y: f32, radius: f32) -> Target {
        Target {
            pos: Vec2::new(x, y),
            radius,
            vx: 0.0,
        }
    }

    fn spear_at(id: u32, x: f32, y: f32) -> Projectile {
        Projectile {
            id,
            pos: Vec2::new(x, y),
            angle: 0.0,
        }
    }

    #[test]
    fn dead_center_is_a_hit() {
        let target = target_at(400.0, 80.0, 40.0);
        let spear = spear_at(1, 400.0, 80.0);
        assert!(projectile_hits_target(&spear, &target));
    }

    #[test]
    fn just_inside_is_a_hit() {
        let target = target_at(400.0, 80.0, 40.0);
        let spear = spear_at(1, 400.0, 81.0);
        assert!(projectile_hits_target(&spear, &target));
    }

    #[test]
    fn exact_radius_is_a_miss() {
        // Strict inequality boundary: distance == radius does not count
        let target = target_at(400.0, 80.0, 40.0);
        let spear = spear_at(1, 440.0, 80.0);
        assert!(!projectile_hits_target(&spear, &target));
    }

    #[test]
    fn outside_is_a_miss() {
        let target = target_at(400.0, 80.0, 40.0);
        let spear = spear_at(1, 500.0, 80.0);
        assert!(!projectile_hits_target(&spear, &target));
    }

    #[test]
    fn simultaneous_hits_each_resolve_once() {
        let target = target_at(400.0, 80.0, 40.0);
        let spears = vec![
            spear_at(1, 390.0, 80.0),
            spear_at(2, 700.0, 80.0),
            spear_at(3, 405.0, 85.0),
            spear_at(4, 400.0, 300.0),
        ];

        let outcome = resolve_hits(&target, &spears);
        assert_eq!(outcome.hits, vec![1, 3]);
        assert_eq!(outcome.score_delta, 2);
    }

    #[test]
    fn empty_field_resolves_to_nothing() {
        let target = target_at(400.0, 80.0, 40.0);
        let outcome = resolve_hits(&target, &[]);
        assert!(outcome.hits.is_empty());
        assert_eq!(outcome.score_delta, 0);
    }
}
