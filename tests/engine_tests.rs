//! Integration tests for the tick loop: full games driven through the public API

use brickfall::core::{EngineConfig, FieldEvent, Figure, GameEngine, Phase, TickOutcome, Timers};
use brickfall::types::{Brick, Coordinate, FigureKind, InputSnapshot};

const FRAME: f64 = 1.0 / 60.0;

/// Deterministic input script: a little of everything, varying with the tick.
fn scripted_input(i: usize) -> InputSnapshot {
    InputSnapshot {
        drop_fast_held: i % 7 < 3,
        rotate_right_edge: i % 11 == 0,
        move_left_held: i % 13 < 2,
        move_right_held: i % 17 < 3,
    }
}

/// Grid rebuilt from tick events only.
struct Mirror {
    width: usize,
    rows: Vec<Vec<Option<u32>>>,
}

impl Mirror {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            rows: vec![vec![None; width]; height],
        }
    }

    fn apply(&mut self, event: &FieldEvent) {
        match *event {
            FieldEvent::Spawned { .. } => {}
            FieldEvent::Stamped {
                figure_id, cells, ..
            } => {
                for c in cells {
                    self.rows[c.y as usize][c.x as usize] = Some(figure_id);
                }
            }
            FieldEvent::RowRemoved { row } => {
                self.rows.remove(row);
                self.rows.push(vec![None; self.width]);
            }
            FieldEvent::Cleared => {
                for row in &mut self.rows {
                    row.fill(None);
                }
            }
        }
    }

    fn matches(&self, engine: &GameEngine) -> bool {
        self.rows.iter().enumerate().all(|(y, row)| {
            row.iter().enumerate().all(|(x, id)| {
                let cell = engine
                    .playfield()
                    .get(Coordinate::new(x as i32, y as i32))
                    .flatten();
                cell.map(|b| b.figure_id) == *id
            })
        })
    }
}

#[test]
fn test_same_seed_same_game() {
    let mut a = GameEngine::seeded(EngineConfig::default(), 2024).unwrap();
    let mut b = GameEngine::seeded(EngineConfig::default(), 2024).unwrap();

    for i in 0..3_000 {
        let oa = a.tick(FRAME, scripted_input(i));
        let ob = b.tick(FRAME, scripted_input(i));
        assert_eq!(oa, ob, "tick {}", i);
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_current_figure_never_overlaps() {
    let mut engine = GameEngine::seeded(EngineConfig::default(), 99).unwrap();

    for i in 0..5_000 {
        engine.tick(FRAME, scripted_input(i));
        let Some(figure) = engine.current() else {
            continue;
        };
        let bbox = figure.world_bounding_box();
        assert!(bbox.x_min >= 0 && bbox.x_max < 10 && bbox.y_min >= 0);
        // A figure spawned onto a full top row may overlap until its first fall ends the round.
        if figure.position().y < 20 {
            assert!(
                !engine.playfield().is_collision(figure),
                "tick {}: {:?}",
                i,
                figure
            );
        }
    }
}

#[test]
fn test_events_rebuild_the_grid() {
    let config = EngineConfig::default();
    let mut engine = GameEngine::seeded(config, 7).unwrap();
    let mut mirror = Mirror::new(config.field_width, config.field_height);

    for i in 0..8_000 {
        let outcome = engine.tick(FRAME, scripted_input(i));
        for event in &outcome.events {
            mirror.apply(event);
        }
        assert!(mirror.matches(&engine), "diverged at tick {}", i);
    }
}

#[test]
fn test_unattended_game_is_lost_and_restarts() {
    let mut engine = GameEngine::seeded(EngineConfig::default(), 31337).unwrap();
    let fast = InputSnapshot {
        drop_fast_held: true,
        ..InputSnapshot::default()
    };

    let mut lost: Option<TickOutcome> = None;
    for _ in 0..50_000 {
        let outcome = engine.tick(0.11, fast);
        if outcome.lost {
            lost = Some(outcome);
            break;
        }
    }

    let outcome = lost.expect("a game without steering fills up");
    assert_eq!(outcome.events.last(), Some(&FieldEvent::Cleared));
    assert!(engine.playfield().is_empty());
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.level(), 0);
    assert_eq!(engine.phase(), Phase::NoActiveFigure);

    let outcome = engine.tick(0.11, fast);
    assert!(outcome.spawned);
    assert_eq!(engine.phase(), Phase::FigureActive);
}

#[test]
fn test_restored_timers_fire_strictly_past_the_threshold() {
    let mut recorded = GameEngine::seeded(EngineConfig::default(), 11).unwrap();
    for _ in 0..100 {
        recorded.tick(FRAME, InputSnapshot::default());
    }
    let figure = *recorded.current().unwrap();
    let timers = recorded.timers();
    assert!(timers.next_fall > recorded.clock());

    let mut resumed = GameEngine::seeded(EngineConfig::default(), 11).unwrap();
    resumed.replace_current(Some(figure));
    resumed.set_timers(timers);
    assert_eq!(resumed.timers(), timers);

    resumed.tick_at(timers.next_fall, InputSnapshot::default());
    assert_eq!(resumed.current().unwrap().position(), figure.position());

    let past = timers.next_fall + 1e-6;
    resumed.tick_at(past, InputSnapshot::default());
    assert_eq!(resumed.current().unwrap().position().y, figure.position().y - 1);
    assert_eq!(
        resumed.timers(),
        Timers {
            next_fall: past + timers.fall_interval,
            next_fast_fall: past + EngineConfig::default().fast_fall_interval,
            ..timers
        }
    );
}

#[test]
fn test_figure_ids_increase() {
    let mut engine = GameEngine::seeded(EngineConfig::default(), 5).unwrap();
    let fast = InputSnapshot {
        drop_fast_held: true,
        ..InputSnapshot::default()
    };

    let mut ids = Vec::new();
    for _ in 0..2_000 {
        for event in engine.tick(0.11, fast).events {
            if let FieldEvent::Spawned { figure_id, .. } = event {
                ids.push(figure_id);
            }
        }
    }
    assert!(ids.len() > 10);
    assert!(ids.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn test_spawned_figure_matches_preview() {
    let mut engine = GameEngine::seeded(EngineConfig::default(), 77).unwrap();
    engine.tick(0.0, InputSnapshot::default());

    for _ in 0..30 {
        let preview = *engine.next();
        engine.replace_current(None);
        let outcome = engine.tick(0.0, InputSnapshot::default());
        assert!(outcome.spawned);
        let current = engine.current().unwrap();
        assert_eq!(current.kind(), preview.kind());
        assert_eq!(current.rotation_steps(), preview.rotation_steps());
        assert_eq!(current.position().y, 20);
    }
}

#[test]
fn test_triple_clear_from_vertical_i() {
    let mut engine = GameEngine::seeded(EngineConfig::default(), 1).unwrap();
    let filler = Some(Brick {
        kind: FigureKind::J,
        figure_id: 0,
    });
    for y in 0..3 {
        for x in 1..10 {
            engine.playfield_mut().set(Coordinate::new(x, y), filler);
        }
    }
    // Vertical I spans local y -1..=2; anchored at y = 1 it covers rows 0..=3.
    engine.replace_current(Some(Figure::at(FigureKind::I, 1, Coordinate::new(0, 1))));

    let outcome = engine.tick(0.1, InputSnapshot::default());

    assert!(outcome.locked);
    assert_eq!(outcome.lines_cleared, 3);
    assert_eq!(engine.score(), 77);
    // Only the top brick of the I survives, now on the floor.
    assert_eq!(engine.playfield().occupied_count(), 1);
    assert!(engine.playfield().is_occupied(Coordinate::new(0, 0)));
}

#[test]
fn test_custom_field_size() {
    let mut engine = GameEngine::seeded(EngineConfig::with_field(6, 12), 3).unwrap();
    engine.tick(0.0, InputSnapshot::default());

    let figure = engine.current().unwrap();
    assert_eq!(figure.position().y, 12);
    let bbox = figure.world_bounding_box();
    assert!(bbox.x_min >= 0 && bbox.x_max < 6);

    let snap = engine.snapshot();
    assert_eq!((snap.width, snap.height), (6, 12));
    assert_eq!(snap.cells.len(), 72);
}
