//! Tests for the simulation engine, level state machine and combat rules.

use hecs::Entity;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use paranoid_core::commands::PlayerCommand;
use paranoid_core::components::{Asteroid, Bouncy, Bullet, Ship, Ufo};
use paranoid_core::constants::*;
use paranoid_core::enums::*;
use paranoid_core::events::AudioEvent;
use paranoid_core::levels::{LevelConfig, LevelTable};
use paranoid_core::types::{Arena, Position, Velocity};

use crate::engine::{SimConfig, SimulationEngine};
use crate::timers::TimerKind;
use crate::world_setup::{self, BulletSpec};

// ---- Helpers ----

/// A level with the asteroids parked on the ring and the ship under control.
fn fixed_level(asteroid_count: u32, duration_ms: u64) -> LevelConfig {
    LevelConfig {
        duration_ms,
        asteroid_count,
        ship_control: true,
        asteroids_bullets: false,
        ship_rotates: true,
        asteroid_movement: false,
        asteroid_splits: true,
        ufo_spawn: false,
    }
}

fn engine_with(levels: Vec<LevelConfig>) -> SimulationEngine {
    SimulationEngine::new(SimConfig {
        levels: LevelTable::new(levels).unwrap(),
        ..Default::default()
    })
}

fn count<T: hecs::Component>(engine: &SimulationEngine) -> usize {
    let mut q = engine.world().query::<&T>();
    q.iter().count()
}

fn ship(engine: &SimulationEngine) -> (Entity, Position) {
    let mut q = engine.world().query::<(&Ship, &Position)>();
    q.iter()
        .next()
        .map(|(e, (_, pos))| (e, *pos))
        .expect("ship should exist")
}

fn ufo(engine: &SimulationEngine) -> (Entity, Position) {
    let mut q = engine.world().query::<(&Ufo, &Position)>();
    q.iter()
        .next()
        .map(|(e, (_, pos))| (e, *pos))
        .expect("UFO should exist")
}

/// Park a motionless bullet at `at`.
fn stage_bullet(engine: &mut SimulationEngine, at: Position, source: BulletSource) -> Entity {
    let level = engine.session().level;
    world_setup::spawn_bullet(
        engine.world_mut(),
        BulletSpec {
            origin: at,
            facing: 0.0,
            speed: 0.0,
            source,
            muzzle_offset: 0.0,
            level,
        },
    )
}

fn clear_asteroids(engine: &mut SimulationEngine) {
    let asteroids: Vec<Entity> = {
        let mut q = engine.world().query::<&Asteroid>();
        q.iter().map(|(e, _)| e).collect()
    };
    for e in asteroids {
        engine.world_mut().despawn(e).unwrap();
    }
}

fn ufo_timers(engine: &SimulationEngine) -> usize {
    engine
        .scheduler()
        .count_where(|k| matches!(k, TimerKind::UfoFire { .. }))
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::BeginPlay);
    engine_b.queue_command(PlayerCommand::BeginPlay);

    for i in 0..400 {
        if i % 15 == 0 {
            engine_a.queue_command(PlayerCommand::Fire);
            engine_b.queue_command(PlayerCommand::Fire);
        }
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::BeginPlay);
    engine_b.queue_command(PlayerCommand::BeginPlay);

    // Level 1 asteroids spawn at random positions.
    let snap_a = engine_a.tick();
    let snap_b = engine_b.tick();
    assert_ne!(snap_a.asteroids, snap_b.asteroids);
}

// ---- Phase flow ----

#[test]
fn test_starts_in_intro() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Intro);
    assert!(snap.ship.is_none());
    assert!(snap.asteroids.is_empty());
    assert_eq!(snap.time.tick, 0, "Time should not run on the intro screen");
}

#[test]
fn test_begin_play_enters_level_one() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::BeginPlay);
    let snap = engine.tick();

    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.hud.level, 1);
    assert_eq!(snap.hud.lives, STARTING_LIVES);
    assert_eq!(snap.hud.score, 0);
    assert!(snap.ship.is_some());
    assert!(snap
        .audio_events
        .contains(&AudioEvent::LevelStarted { level: 1 }));
}

#[test]
fn test_begin_play_ignored_outside_intro() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.force_level(3);
    engine.queue_command(PlayerCommand::BeginPlay);
    let snap = engine.tick();

    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.hud.level, 3, "BeginPlay must not restart a running game");
}

#[test]
fn test_every_level_entry_matches_table() {
    let table = LevelTable::default();
    for level in 1..=table.last_level() {
        let config = table.get(level).unwrap().clone();
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.force_level(level);

        assert_eq!(engine.phase(), GamePhase::Playing);
        assert_eq!(engine.session().level, level);
        assert_eq!(engine.session().lives, 3);
        assert_eq!(engine.session().score, 0);
        assert_eq!(
            count::<Asteroid>(&engine),
            config.asteroid_count as usize,
            "level {level} asteroid count"
        );
        assert_eq!(count::<Ship>(&engine), 1, "level {level} ship count");
        assert_eq!(
            count::<Ufo>(&engine),
            usize::from(config.ufo_spawn),
            "level {level} UFO count"
        );

        let snap = engine.tick();
        assert!(snap.hud.time_left_secs * 1000 <= config.duration_ms);
        assert!(snap.hud.time_left_secs > 0);
        assert_eq!(snap.ship.as_ref().map(|s| s.movable), Some(config.ship_control));
    }
}

#[test]
fn test_fixed_level_asteroids_on_ring() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.force_level(2);

    let center = engine.arena().center();
    let radius = engine.arena().width.min(engine.arena().height) * ASTEROID_RING_FACTOR;
    let mut q = engine.world().query::<(&Asteroid, &Position, &Velocity)>();
    for (_, (_, pos, vel)) in q.iter() {
        assert!((pos.distance_to(&center) - radius).abs() < 1e-6);
        assert_eq!(*vel, Velocity::default());
    }
}

// ---- Combat ----

#[test]
fn test_shot_splits_ring_asteroid() {
    // Ship at the centre faces +x; ring slot 0 sits 480 px to its right.
    let mut engine = engine_with(vec![fixed_level(7, 60_000)]);
    engine.force_level(1);
    assert_eq!(count::<Asteroid>(&engine), 7);

    engine.queue_command(PlayerCommand::Fire);
    let snap = engine.tick();
    assert_eq!(snap.bullets.len(), 1);
    assert!(snap.audio_events.contains(&AudioEvent::ShotFired {
        source: BulletSource::Ship
    }));

    let mut last = snap;
    for _ in 0..45 {
        last = engine.tick();
    }

    assert_eq!(count::<Asteroid>(&engine), 8, "one asteroid became two");
    assert_eq!(count::<Bullet>(&engine), 0);
    assert_eq!(last.hud.score, ASTEROID_POINTS);
    assert_eq!(last.hud.run_score, ASTEROID_POINTS);
    assert_eq!(last.hud.lives, 3);

    let small = last
        .asteroids
        .iter()
        .filter(|a| (a.scale - ASTEROID_SCALE * SPLIT_SHRINK).abs() < 1e-9)
        .count();
    assert_eq!(small, 2);
}

#[test]
fn test_no_split_level_destroys_outright() {
    let mut config = fixed_level(7, 60_000);
    config.asteroid_splits = false;
    let mut engine = engine_with(vec![config]);
    engine.force_level(1);

    engine.queue_command(PlayerCommand::Fire);
    for _ in 0..46 {
        engine.tick();
    }
    assert_eq!(count::<Asteroid>(&engine), 6);
    assert_eq!(engine.session().score, ASTEROID_POINTS);
}

#[test]
fn test_smallest_asteroid_is_not_split() {
    let mut engine = engine_with(vec![fixed_level(1, 60_000)]);
    engine.force_level(1);
    clear_asteroids(&mut engine);

    let at = Position::new(200.0, 200.0);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    world_setup::spawn_asteroid_at(
        engine.world_mut(),
        &mut rng,
        at,
        Velocity::default(),
        0.08,
    );
    stage_bullet(&mut engine, at, BulletSource::Ship);
    engine.tick();

    assert_eq!(count::<Asteroid>(&engine), 0);
    assert_eq!(engine.session().score, ASTEROID_POINTS);
}

#[test]
fn test_level_two_ship_contact_is_harmless() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.force_level(2);
    let (_, ship_pos) = ship(&engine);

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let asteroid = world_setup::spawn_asteroid_at(
        engine.world_mut(),
        &mut rng,
        ship_pos,
        Velocity::default(),
        ASTEROID_SCALE,
    );
    let snap = engine.tick();

    assert_eq!(snap.hud.lives, 3);
    assert!(engine.world().contains(asteroid));
    assert_eq!(snap.phase, GamePhase::Playing);
}

#[test]
fn test_level_two_hostile_bullet_costs_life() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.force_level(2);
    let (_, ship_pos) = ship(&engine);

    let bullet = stage_bullet(&mut engine, ship_pos, BulletSource::Asteroid);
    let snap = engine.tick();

    assert_eq!(snap.hud.lives, 2);
    assert!(!engine.world().contains(bullet));
    assert!(snap
        .audio_events
        .contains(&AudioEvent::ShipHit { lives_left: 2 }));
}

#[test]
fn test_ship_contact_costs_life_with_control() {
    let mut engine = engine_with(vec![fixed_level(1, 60_000)]);
    engine.force_level(1);
    let (_, ship_pos) = ship(&engine);

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let asteroid = world_setup::spawn_asteroid_at(
        engine.world_mut(),
        &mut rng,
        ship_pos,
        Velocity::default(),
        ASTEROID_SCALE,
    );
    engine.tick();

    assert_eq!(engine.session().lives, 2);
    assert!(!engine.world().contains(asteroid));
}

#[test]
fn test_own_bullet_does_not_hit_ship() {
    let mut engine = engine_with(vec![fixed_level(1, 60_000)]);
    engine.force_level(1);
    let (_, ship_pos) = ship(&engine);

    stage_bullet(&mut engine, ship_pos, BulletSource::Ship);
    engine.tick();
    assert_eq!(engine.session().lives, 3);
}

#[test]
fn test_hostile_bullet_passes_through_asteroids() {
    let mut engine = engine_with(vec![fixed_level(1, 60_000)]);
    engine.force_level(1);

    let asteroid_pos = {
        let mut q = engine.world().query::<(&Asteroid, &Position)>();
        q.iter().next().map(|(_, (_, p))| *p).unwrap()
    };
    let bullet = stage_bullet(&mut engine, asteroid_pos, BulletSource::Ufo);
    engine.tick();

    assert_eq!(count::<Asteroid>(&engine), 1);
    assert!(engine.world().contains(bullet));
    assert_eq!(engine.session().score, 0);
}

// ---- Game over vs deadline ----

#[test]
fn test_last_life_beats_deadline_on_same_tick() {
    let mut engine = engine_with(vec![fixed_level(1, 100), fixed_level(1, 100)]);
    engine.force_level(1);
    engine.session_mut().lives = 1;

    // The deadline (6 ticks) comes due on the seventh tick.
    for _ in 0..6 {
        engine.tick();
    }
    assert_eq!(engine.phase(), GamePhase::Playing);

    let (_, ship_pos) = ship(&engine);
    stage_bullet(&mut engine, ship_pos, BulletSource::Asteroid);
    let snap = engine.tick();

    assert_eq!(snap.phase, GamePhase::GameOver);
    assert_eq!(snap.hud.level, 1, "deadline must not advance after game over");
    assert!(snap.audio_events.contains(&AudioEvent::GameOver { run_score: 0 }));
    assert!(!snap
        .audio_events
        .iter()
        .any(|e| matches!(e, AudioEvent::LevelStarted { .. })));
    assert!(engine.session().level_timer.is_none());
    assert!(engine.scheduler().is_empty());
    assert_eq!(count::<Ship>(&engine), 0);
}

#[test]
fn test_deadline_advances_level() {
    let mut engine = engine_with(vec![fixed_level(1, 100), fixed_level(2, 100)]);
    engine.force_level(1);
    engine.session_mut().award(30);

    let mut snap = engine.tick();
    for _ in 0..6 {
        snap = engine.tick();
    }

    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.hud.level, 2);
    assert_eq!(snap.hud.score, 0, "score resets per level");
    assert_eq!(snap.hud.run_score, 30);
    assert_eq!(snap.hud.lives, 3);
    assert_eq!(count::<Asteroid>(&engine), 2);
    assert_eq!(count::<Ship>(&engine), 1);
}

#[test]
fn test_lives_reset_on_level_entry() {
    let mut engine = engine_with(vec![fixed_level(1, 100), fixed_level(1, 100)]);
    engine.force_level(1);
    engine.session_mut().lives = 1;
    for _ in 0..7 {
        engine.tick();
    }
    assert_eq!(engine.session().level, 2);
    assert_eq!(engine.session().lives, STARTING_LIVES);
}

#[test]
fn test_last_level_deadline_completes() {
    let mut engine = engine_with(vec![fixed_level(1, 100)]);
    engine.force_level(1);

    let mut snap = engine.tick();
    for _ in 0..6 {
        snap = engine.tick();
    }

    assert_eq!(snap.phase, GamePhase::Completed);
    assert!(snap
        .audio_events
        .contains(&AudioEvent::GameCompleted { run_score: 0 }));
    assert!(snap.ship.is_none());
    assert!(snap.asteroids.is_empty());
    assert_eq!(snap.hud.time_left_secs, 0);

    // Terminal: nothing moves until restart.
    let tick = engine.time().tick;
    engine.tick();
    assert_eq!(engine.time().tick, tick);
}

#[test]
fn test_time_left_counts_down() {
    let mut engine = engine_with(vec![fixed_level(1, 5000)]);
    engine.force_level(1);

    let first = engine.tick();
    assert_eq!(first.hud.time_left_secs, 5);
    for _ in 0..120 {
        engine.tick();
    }
    let later = engine.tick();
    assert_eq!(later.hud.time_left_secs, 3);
}

// ---- UFO ----

#[test]
fn test_ufo_fires_at_ship() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.force_level(5);
    clear_asteroids(&mut engine);
    assert_eq!(ufo_timers(&engine), 1);

    let mut fired = false;
    for _ in 0..=ms_to_ticks(UFO_FIRE_INTERVAL_MS) {
        let snap = engine.tick();
        fired |= snap.bullets.iter().any(|b| b.source == BulletSource::Ufo);
    }
    assert!(fired, "UFO should fire once its interval elapses");
}

#[test]
fn test_ufo_shot_down_cancels_fire_timer() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.force_level(5);
    clear_asteroids(&mut engine);

    let (ufo_entity, ufo_pos) = ufo(&engine);
    stage_bullet(&mut engine, ufo_pos, BulletSource::Ship);
    let snap = engine.tick();

    assert!(!engine.world().contains(ufo_entity));
    assert!(snap.ufo.is_none());
    assert_eq!(snap.hud.score, UFO_POINTS);
    assert_eq!(ufo_timers(&engine), 0);
    assert!(snap.audio_events.contains(&AudioEvent::UfoDestroyed));

    for _ in 0..200 {
        let snap = engine.tick();
        assert!(!snap.bullets.iter().any(|b| b.source == BulletSource::Ufo));
    }
}

#[test]
fn test_ufo_ramming_costs_life_and_cancels_timer() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.force_level(5);
    clear_asteroids(&mut engine);

    let (ufo_entity, ufo_pos) = ufo(&engine);
    let (ship_entity, _) = ship(&engine);
    *engine.world_mut().get::<&mut Position>(ship_entity).unwrap() = ufo_pos;
    engine.tick();

    assert!(!engine.world().contains(ufo_entity));
    assert_eq!(engine.session().lives, 2);
    assert_eq!(ufo_timers(&engine), 0);
}

#[test]
fn test_level_change_cancels_ufo_timer() {
    let mut config = fixed_level(1, 100);
    config.ufo_spawn = true;
    let mut engine = engine_with(vec![config, fixed_level(1, 100)]);
    engine.force_level(1);
    assert_eq!(ufo_timers(&engine), 1);

    for _ in 0..7 {
        engine.tick();
    }
    assert_eq!(engine.session().level, 2);
    assert_eq!(ufo_timers(&engine), 0);
    assert_eq!(count::<Ufo>(&engine), 0);
}

// ---- Bounce level ----

#[test]
fn test_bounce_level_bullets_ricochet_into_ship() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.force_level(BOUNCE_LEVEL);
    clear_asteroids(&mut engine);

    engine.queue_command(PlayerCommand::Fire);
    for _ in 0..100 {
        engine.tick();
    }

    // Well past the normal lifespan, and already off the far wall.
    {
        let mut q = engine.world().query::<(&Bullet, &Bouncy)>();
        let bullets: Vec<Bullet> = q.iter().map(|(_, (b, _))| *b).collect();
        assert_eq!(bullets.len(), 1);
        assert!(bullets[0].bounces >= 1);
    }
    assert_eq!(engine.session().lives, 3);

    for _ in 0..30 {
        engine.tick();
    }
    assert_eq!(engine.session().lives, 2, "ricochet should hit the ship");
    assert_eq!(count::<Bullet>(&engine), 0);
}

#[test]
fn test_normal_bullets_expire() {
    let mut engine = engine_with(vec![fixed_level(0, 60_000)]);
    engine.force_level(1);

    let bullet = stage_bullet(&mut engine, Position::new(100.0, 100.0), BulletSource::Ship);
    let lifespan = ms_to_ticks(BULLET_LIFESPAN_MS);
    for _ in 1..lifespan {
        engine.tick();
    }
    assert!(engine.world().contains(bullet));

    engine.tick();
    assert!(!engine.world().contains(bullet));
}

// ---- Controls ----

#[test]
fn test_ship_rotates_and_thrusts() {
    let mut engine = engine_with(vec![fixed_level(0, 60_000)]);
    engine.force_level(1);
    engine.queue_command(PlayerCommand::SetControls {
        rotate_left: false,
        rotate_right: true,
        thrust: true,
    });
    let snap = engine.tick();

    let ship_view = snap.ship.unwrap();
    assert!((ship_view.rotation - SHIP_TURN_DEG_PER_TICK.to_radians()).abs() < 1e-12);
    assert!(ship_view.position.x > engine.arena().center().x);
}

#[test]
fn test_level_two_steers_asteroids_not_ship() {
    let mut steered = SimulationEngine::new(SimConfig::default());
    let mut idle = SimulationEngine::new(SimConfig::default());
    steered.force_level(2);
    idle.force_level(2);

    steered.queue_command(PlayerCommand::SetControls {
        rotate_left: true,
        rotate_right: false,
        thrust: true,
    });
    let a = steered.tick();
    let b = idle.tick();

    let turn = SHIP_TURN_DEG_PER_TICK.to_radians();
    for (sa, sb) in a.asteroids.iter().zip(b.asteroids.iter()) {
        assert!((sb.rotation - sa.rotation - turn).abs() < 1e-12);
    }
    let ship_view = a.ship.unwrap();
    assert_eq!(ship_view.rotation, 0.0);
    assert_eq!(ship_view.position, steered.arena().center());
}

#[test]
fn test_level_two_fire_shoots_from_every_asteroid() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.force_level(2);
    engine.queue_command(PlayerCommand::Fire);
    let snap = engine.tick();

    assert_eq!(snap.bullets.len(), 8);
    assert!(snap
        .bullets
        .iter()
        .all(|b| b.source == BulletSource::Asteroid));
}

#[test]
fn test_fire_is_edge_triggered() {
    let mut engine = engine_with(vec![fixed_level(0, 60_000)]);
    engine.force_level(1);
    engine.queue_command(PlayerCommand::Fire);
    engine.tick();
    engine.tick();
    engine.tick();
    assert_eq!(count::<Bullet>(&engine), 1);
}

// ---- Pause / restart ----

#[test]
fn test_pause_freezes_deadline() {
    let mut engine = engine_with(vec![fixed_level(1, 100), fixed_level(1, 100)]);
    engine.force_level(1);
    engine.tick();
    engine.tick();

    engine.queue_command(PlayerCommand::Pause);
    let tick = engine.time().tick;
    for _ in 0..100 {
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Paused);
    }
    assert_eq!(engine.time().tick, tick);
    assert_eq!(engine.session().level, 1);

    engine.queue_command(PlayerCommand::Fire);
    engine.tick();
    assert_eq!(count::<Bullet>(&engine), 0, "fire is rejected while paused");

    engine.queue_command(PlayerCommand::Resume);
    for _ in 0..5 {
        engine.tick();
    }
    assert_eq!(engine.session().level, 2);
}

#[test]
fn test_restart_from_game_over() {
    let mut engine = engine_with(vec![fixed_level(1, 60_000)]);
    engine.force_level(1);
    engine.session_mut().award(40);
    engine.session_mut().lives = 1;
    let (_, ship_pos) = ship(&engine);
    stage_bullet(&mut engine, ship_pos, BulletSource::Ufo);
    assert_eq!(engine.tick().phase, GamePhase::GameOver);

    engine.queue_command(PlayerCommand::Restart);
    let snap = engine.tick();

    assert_eq!(snap.phase, GamePhase::Intro);
    assert_eq!(snap.hud.level, 1);
    assert_eq!(snap.hud.lives, STARTING_LIVES);
    assert_eq!(snap.hud.score, 0);
    assert_eq!(snap.hud.run_score, 0);
    assert!(snap.ship.is_none());
    assert!(engine.scheduler().is_empty());

    engine.queue_command(PlayerCommand::BeginPlay);
    assert_eq!(engine.tick().phase, GamePhase::Playing);
}

#[test]
fn test_restart_rejected_while_playing() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.force_level(1);
    engine.queue_command(PlayerCommand::Restart);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Playing);
}

// ---- Failure recovery ----

#[test]
fn test_invalid_arena_recovers_to_intro() {
    let mut engine = SimulationEngine::new(SimConfig {
        arena: Arena::new(0.0, 600.0),
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::BeginPlay);
    let snap = engine.tick();

    assert_eq!(snap.phase, GamePhase::Intro);
    assert!(snap.message.as_deref().unwrap_or("").contains("could not start"));
    assert!(engine.scheduler().is_empty());
    assert_eq!(count::<Ship>(&engine), 0);
}

#[test]
fn test_unknown_level_recovers_to_intro() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.force_level(9);
    assert_eq!(engine.phase(), GamePhase::Intro);
    assert!(engine.session().message.is_some());
}

#[test]
fn test_snapshot_serializes() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.force_level(5);
    let snap = engine.tick();
    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("\"phase\":\"Playing\""));
    assert!(json.contains("\"ufo\":{"));
}
