use grid_pathviz::{
    solver::{dijkstra::DijkstraSolver, GridSolver},
    AnimationEvent, Animator, CellKind, Clock, Grid, GridConfig, ManualClock, Marker, Phase,
    Position, SearchResult, Session, SessionSeed, TimerId,
};

fn session(start: Position, end: Position) -> Session<ManualClock> {
    let seed = SessionSeed {
        grid_size: 20,
        start,
        end,
    };
    Session::new(GridConfig::default(), seed, ManualClock::new()).unwrap()
}

#[test]
fn cancel_mid_reveal_keeps_applied_steps_only() {
    let mut clock = ManualClock::new();
    let mut grid = Grid::new(12, Position::new(0, 0), Position::new(11, 11)).unwrap();
    let visited_order = (0..10).map(|col| Position::new(1, col)).collect::<Vec<_>>();
    let result = SearchResult {
        visited_order: visited_order.clone(),
        path: vec![],
    };
    let mut animator = Animator::new();
    assert!(animator.start(&mut clock, result, 4, 50).is_empty());
    let mut fired = Vec::new();
    for timer in clock.advance(12) {
        fired.push(timer);
        animator.fire(&mut clock, timer, &mut grid);
    }
    assert_eq!(fired.len(), 3);
    animator.cancel(&mut clock);
    assert_eq!(animator.phase(), Phase::Idle);
    let snapshot = grid.clone();

    // Nothing is left to come due, and replaying old timers changes nothing.
    assert_eq!(clock.next_due(), None);
    assert!(clock.advance(1000).is_empty());
    for timer in fired.into_iter().chain((0..20).map(TimerId)) {
        assert!(animator.fire(&mut clock, timer, &mut grid).is_empty());
    }
    assert_eq!(grid, snapshot);
    assert_eq!(grid.count(CellKind::Considered), 3);
    for (i, p) in visited_order.iter().enumerate() {
        let expected = if i < 3 {
            CellKind::Considered
        } else {
            CellKind::Empty
        };
        assert_eq!(grid.kind(*p), Some(expected));
    }
}

#[test]
fn session_cancel_stops_the_reveal() {
    let start = Position::new(2, 2);
    let end = Position::new(2, 8);
    let mut session = session(start, end);
    let expected = DijkstraSolver::from_config(session.config())
        .solve(session.grid(), start, end)
        .unwrap();
    session.run().unwrap();
    let interval = session.config().reveal_interval_for(session.size());
    let frames = session.advance(interval * 3);
    assert_eq!(frames.len(), 3);
    session.cancel();
    assert!(!session.is_animating());
    assert_eq!(session.clock().pending(), 0);
    let snapshot = session.snapshot();
    assert!(session.advance(10_000).is_empty());
    assert!(session.finish().is_empty());
    assert_eq!(session.grid(), &snapshot);

    // The start is visited first and stays a marker.
    let considered = session
        .grid()
        .cells()
        .filter(|c| c.kind == CellKind::Considered)
        .map(|c| c.position)
        .collect::<Vec<_>>();
    assert_eq!(considered.len(), 2);
    assert!(expected.visited_order[1..3]
        .iter()
        .all(|p| considered.contains(p)));
    assert_eq!(session.grid().kind(start), Some(CellKind::Start));
}

#[test]
fn unreachable_end_reveals_then_reports_no_path() {
    let mut session = session(Position::new(2, 2), Position::new(0, 0));
    session.set_obstacle(Position::new(0, 1), true).unwrap();
    session.set_obstacle(Position::new(1, 0), true).unwrap();
    assert!(session.run().unwrap().is_empty());
    let events = session.finish();
    assert_eq!(events.last(), Some(&AnimationEvent::NoPath));
    assert_eq!(events.len(), 397 + 1);
    assert_eq!(session.grid().count(CellKind::Path), 0);
    assert_eq!(session.grid().count(CellKind::Considered), 396);
    assert!(!session.is_animating());
}

#[test]
fn rerun_replaces_the_previous_visualization() {
    let mut session = session(Position::new(5, 5), Position::new(5, 9));
    session.run().unwrap();
    session.finish();
    let first = session.snapshot();
    session.run().unwrap();
    assert_eq!(session.grid().count(CellKind::Considered), 0);
    assert_eq!(session.grid().count(CellKind::Path), 0);
    session.finish();
    assert!(first.count(CellKind::Path) > 0);
    assert_eq!(session.grid(), &first);
}

#[test]
fn clear_visualization_is_idempotent() {
    let mut session = session(Position::new(5, 5), Position::new(12, 9));
    session.toggle_obstacle(Position::new(6, 6)).unwrap();
    session.run().unwrap();
    session.advance(200);
    session.clear_visualization();
    let once = session.snapshot();
    session.clear_visualization();
    assert_eq!(session.grid(), &once);
    assert_eq!(once.clear_decorations(), once);
    assert_eq!(once.count(CellKind::Considered), 0);
    assert_eq!(once.kind(Position::new(6, 6)), Some(CellKind::Obstacle));
    assert_eq!(once.kind(Position::new(12, 9)), Some(CellKind::End));
}

#[test]
fn edits_during_animation_keep_earlier_snapshots() {
    let mut session = session(Position::new(0, 0), Position::new(19, 19));
    let before = session.snapshot();
    session.run().unwrap();
    session.advance(100);
    session.move_marker(Marker::Start, Position::new(3, 3)).unwrap();
    assert!(!session.is_animating());
    assert_eq!(before.kind(Position::new(0, 0)), Some(CellKind::Start));
    assert_eq!(before.count(CellKind::Considered), 0);
    assert_eq!(session.grid().kind(Position::new(0, 0)), Some(CellKind::Empty));
}

#[test]
fn stored_seed_is_clamped() {
    let config = GridConfig::default();
    let seed: SessionSeed = serde_json::from_str(
        r#"{"grid_size": 250, "start": {"row": 120, "col": 3}, "end": {"row": 99, "col": 1}}"#,
    )
    .unwrap();
    let seed = seed.sanitized(&config);
    assert_eq!(seed.grid_size, 100);
    assert_eq!(seed.start, Position::new(99, 3));
    assert_eq!(seed.end, Position::new(99, 1));

    let seed: SessionSeed = serde_json::from_str(
        r#"{"grid_size": 20, "start": {"row": 150, "col": 150}, "end": {"row": 19, "col": 40}}"#,
    )
    .unwrap();
    let session = Session::new(config, seed, ManualClock::new()).unwrap();
    assert_eq!(session.start(), Position::new(19, 19));
    assert_eq!(session.end(), Position::new(18, 19));
    assert_eq!(session.grid().kind(Position::new(18, 19)), Some(CellKind::End));
}

#[test]
fn config_fills_missing_fields_with_defaults() {
    let config: GridConfig =
        serde_json::from_str(r#"{"default_size": 50, "path_interval": 5}"#).unwrap();
    assert_eq!(config.default_size, 50);
    assert_eq!(config.path_interval, 5);
    assert_eq!(config.min_size, GridConfig::default().min_size);
    let session = Session::with_defaults(ManualClock::new()).unwrap();
    let json = serde_json::to_string(&session.seed()).unwrap();
    let seed: SessionSeed = serde_json::from_str(&json).unwrap();
    assert_eq!(seed, session.seed());
}

#[test]
fn manual_clock_schedules_through_the_trait() {
    fn schedule_twice<C: Clock>(clock: &mut C) -> (TimerId, TimerId) {
        (clock.schedule(3), clock.schedule(1))
    }
    let mut clock = ManualClock::new();
    let (late, early) = schedule_twice(&mut clock);
    assert_eq!(clock.advance(3), vec![early, late]);
}
