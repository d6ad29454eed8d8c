//! Fixed timestep simulation tick
//!
//! Advances the throwing phase deterministically in a fixed order: target
//! first, then spears, then hit resolution, then the end-of-game check.

use super::collision::resolve_hits;
use super::state::{GameEvent, GamePhase, GameSession};

/// Advance the session by one timestep (`dt` in seconds).
///
/// Pure function of session state and a no-op once the phase is Ended, so the
/// host may keep invoking it from a frame callback without guards.
pub fn tick(session: &mut GameSession, dt: f32) -> Vec<GameEvent> {
    if session.phase == GamePhase::Ended {
        return Vec::new();
    }

    let mut events = Vec::new();

    session.target.advance(dt);

    for projectile in &mut session.projectiles {
        projectile.advance(dt);
    }
    // Spears that left the field are plain misses, no penalty
    session.projectiles.retain(|p| !p.out_of_bounds());

    let outcome = resolve_hits(&session.target, &session.projectiles);
    if !outcome.hits.is_empty() {
        session.projectiles.retain(|p| !outcome.hits.contains(&p.id));
        for _ in &outcome.hits {
            session.score += 1;
            events.push(GameEvent::Hit {
                score: session.score,
            });
        }
    }

    if session.ammo == 0 && session.projectiles.is_empty() {
        session.phase = GamePhase::Ended;
        events.push(GameEvent::Ended {
            score: session.score,
        });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FIELD_HEIGHT, PROJECTILE_SPEED, SIM_DT};
    use glam::Vec2;

    /// Upper bound on ticks for any spear to cross the whole field
    fn ticks_to_cross_field() -> u32 {
        (FIELD_HEIGHT / (PROJECTILE_SPEED * SIM_DT)).ceil() as u32 + 60
    }

    #[test]
    fn ends_immediately_without_ammo_or_spears() {
        let mut session = GameSession::new(0);

        let events = tick(&mut session, SIM_DT);
        assert_eq!(events, vec![GameEvent::Ended { score: 0 }]);
        assert_eq!(session.phase, GamePhase::Ended);

        // Ended sessions are inert
        assert!(tick(&mut session, SIM_DT).is_empty());
    }

    #[test]
    fn hit_scores_and_removes_the_spear() {
        let mut session = GameSession::new(1);
        session.fire();

        // Park the spear just below the target center so the next step
        // carries it inside the disc
        let step = PROJECTILE_SPEED * SIM_DT;
        session.projectiles[0].pos = session.target.pos + Vec2::new(0.0, step / 2.0);

        let events = tick(&mut session, SIM_DT);
        assert_eq!(session.score, 1);
        assert!(session.projectiles.is_empty());
        // Last spear consumed and resolved, so the game ends the same tick
        assert_eq!(
            events,
            vec![
                GameEvent::Hit { score: 1 },
                GameEvent::Ended { score: 1 }
            ]
        );
    }

    #[test]
    fn miss_exits_top_without_penalty() {
        let mut session = GameSession::new(1);
        session.fire();
        // Park the target far from the spear's column so it can only miss
        session.target.pos.x = 100.0;
        session.target.vx = 0.0;
        session.projectiles[0].pos.x = 700.0;

        let mut ended = false;
        for _ in 0..ticks_to_cross_field() {
            for event in tick(&mut session, SIM_DT) {
                if let GameEvent::Ended { score } = event {
                    assert_eq!(score, 0);
                    ended = true;
                }
            }
        }

        assert!(ended, "session never terminated");
        assert_eq!(session.score, 0);
    }

    #[test]
    fn terminates_after_every_spear_resolves() {
        let mut session = GameSession::new(3);

        // Throw everything up front; each spear either hits or exits
        while session.fire().is_some() {}
        assert_eq!(session.ammo, 0);

        let mut ended = false;
        for _ in 0..ticks_to_cross_field() {
            for event in tick(&mut session, SIM_DT) {
                if matches!(event, GameEvent::Ended { .. }) {
                    ended = true;
                }
            }
        }

        assert!(ended, "session never terminated");
        assert_eq!(session.phase, GamePhase::Ended);
        assert!(session.projectiles.is_empty());
    }

    #[test]
    fn keeps_running_while_ammo_remains() {
        let mut session = GameSession::new(2);

        for _ in 0..ticks_to_cross_field() {
            assert!(tick(&mut session, SIM_DT).is_empty());
        }
        assert_eq!(session.phase, GamePhase::Running);
    }

    #[test]
    fn simultaneous_hits_resolve_in_one_tick() {
        let mut session = GameSession::new(2);
        session.fire();
        session.fire();

        let step = PROJECTILE_SPEED * SIM_DT;
        session.projectiles[0].pos = session.target.pos + Vec2::new(-5.0, step / 2.0);
        session.projectiles[1].pos = session.target.pos + Vec2::new(5.0, step / 2.0);

        let events = tick(&mut session, SIM_DT);
        assert_eq!(session.score, 2);
        assert_eq!(
            events,
            vec![
                GameEvent::Hit { score: 1 },
                GameEvent::Hit { score: 2 },
                GameEvent::Ended { score: 2 }
            ]
        );
    }
}
