//! Integration tests for the Pentaline game engine.
//!
//! These tests drive complete games through the public command surface
//! and check the event streams a view layer would consume.

use pentaline_core::*;
use pretty_assertions::assert_eq;

fn started_model() -> GameModel {
    let mut model = GameModel::new(GameConfig::default()).unwrap();
    model.start().unwrap();
    model
}

/// Positions for O that never touch the given X line.
fn filler_positions(avoid: &[Position]) -> Vec<Position> {
    let mut spots = Vec::new();
    for row in 1..=5 {
        for col in 1..=5 {
            let pos = Position::new(col, row);
            if !avoid.contains(&pos) {
                spots.push(pos);
            }
        }
    }
    spots
}

/// Alternate X along `line` with O filling elsewhere; returns the events
/// of X's final, winning placement.
fn play_line_for_x(model: &mut GameModel, line: [Position; 5]) -> Vec<GameEvent> {
    let fillers = filler_positions(&line);
    let mut filler = fillers.iter();
    for pos in line.iter().take(4) {
        model.place_label(*pos).unwrap();
        model.place_label(*filler.next().unwrap()).unwrap();
    }
    model.place_label(line[4]).unwrap()
}

#[test]
fn test_diagonal_win_end_to_end() {
    let mut model = started_model();
    let diagonal = [
        Position::new(1, 1),
        Position::new(2, 2),
        Position::new(3, 3),
        Position::new(4, 4),
        Position::new(5, 5),
    ];
    let events = play_line_for_x(&mut model, diagonal);

    assert_eq!(model.winner(), Some(0));
    assert!(matches!(events[0], GameEvent::LabelPlaced { player: 0, .. }));
    assert!(matches!(events[1], GameEvent::GameFinished { winner: 0 }));
    // No further turn is issued after the game finishes.
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::TurnChanged { .. })));
}

#[test]
fn test_wins_in_every_orientation() {
    let lines: [[Position; 5]; 4] = [
        // Row
        [1, 2, 3, 4, 5].map(|col| Position::new(col, 2)),
        // Column
        [1, 2, 3, 4, 5].map(|row| Position::new(2, row)),
        // Falling diagonal
        [1, 2, 3, 4, 5].map(|i| Position::new(i, i)),
        // Rising diagonal
        [1, 2, 3, 4, 5].map(|i| Position::new(i, 6 - i)),
    ];

    for line in lines {
        let mut model = started_model();
        play_line_for_x(&mut model, line);
        assert_eq!(model.winner(), Some(0), "line {:?} should win", line);
    }
}

#[test]
fn test_four_in_a_row_is_not_a_win() {
    let mut model = started_model();
    for col in 1..=4 {
        model.place_label(Position::new(col, 1)).unwrap();
        model.place_label(Position::new(col, 3)).unwrap();
    }
    assert!(!model.is_finished());
    assert_eq!(model.winner(), None);
}

#[test]
fn test_delegated_labels_score_for_the_opponent() {
    let mut model = started_model();

    // X keeps delegating, so every label X places belongs to O. O places
    // in a separate row. O's own four placements plus one delegated mark
    // complete O's line.
    let o_line = [1, 2, 3, 4].map(|col| Position::new(col, 1));
    for pos in o_line {
        model.set_active_label_kind(LabelKind::Delegated).unwrap();
        model.place_label(Position::new(pos.col, 3)).unwrap(); // X places for O
        model.place_label(pos).unwrap(); // O places for O
    }
    // X's delegated placement at (5,1) extends O's row to five.
    model.set_active_label_kind(LabelKind::Delegated).unwrap();
    let events = model.place_label(Position::new(5, 1)).unwrap();

    assert_eq!(model.winner(), Some(1));
    assert!(matches!(events[1], GameEvent::GameFinished { winner: 1 }));

    let placed = model.field().label(Position::new(5, 1)).unwrap();
    assert_eq!(placed.owner(), 1);
    assert_eq!(placed.placed_by(), Some(0));
}

#[test]
fn test_hidden_labels_still_win() {
    let mut model = started_model();
    let row = [1, 2, 3, 4, 5].map(|col| Position::new(col, 1));
    let fillers = filler_positions(&row);
    let mut filler = fillers.iter();

    for pos in row.iter().take(4) {
        model.set_active_label_kind(LabelKind::Hidden).unwrap();
        model.place_label(*pos).unwrap();
        model.place_label(*filler.next().unwrap()).unwrap();
    }
    model.set_active_label_kind(LabelKind::Hidden).unwrap();
    model.place_label(row[4]).unwrap();

    assert_eq!(model.winner(), Some(0));
    for pos in row {
        assert_eq!(model.field().label(pos).unwrap().symbol(), HIDDEN_MASK);
    }
}

#[test]
fn test_secret_game_end_to_end() {
    let mut model = started_model();
    model.set_secret_mode_enabled(true).unwrap();

    let diagonal = [1, 2, 3, 4, 5].map(|i| Position::new(i, i));
    let fillers = filler_positions(&diagonal);
    let mut filler = fillers.iter();

    for pos in diagonal.iter().take(4) {
        assert_eq!(
            model.active_player().active_label().unwrap().symbol(),
            SECRET_MASK
        );
        model.place_label(*pos).unwrap();
        model.place_label(*filler.next().unwrap()).unwrap();
    }
    model.place_label(diagonal[4]).unwrap();

    assert_eq!(model.winner(), Some(0));
    // The field holds revealed labels, never wrappers.
    for label in model.field().labels() {
        assert!(!label.is_secret());
    }
}

#[test]
fn test_pass_budgets_across_a_game() {
    let mut model = started_model();

    // Both players spend their single pass.
    model.pass_turn().unwrap(); // X
    model.pass_turn().unwrap(); // O

    // Budgets exhausted: further passes fail for both.
    assert!(model.pass_turn().is_err()); // X
    model.place_label(Position::new(1, 1)).unwrap();
    assert!(model.pass_turn().is_err()); // O

    // A new game restores the budgets.
    model.start().unwrap();
    assert_eq!(model.passes_left_for(0), 1);
    assert_eq!(model.passes_left_for(1), 1);
    model.pass_turn().unwrap();
}

#[test]
fn test_event_stream_of_a_short_game() {
    let config = GameConfig {
        width: 3,
        height: 3,
        win_length: 3,
        ..GameConfig::default()
    };
    let mut model = GameModel::new(config).unwrap();

    let mut log = model.start().unwrap();
    log.extend(model.place_label(Position::new(1, 1)).unwrap());
    log.extend(model.place_label(Position::new(1, 2)).unwrap());
    log.extend(model.place_label(Position::new(2, 1)).unwrap());
    log.extend(model.place_label(Position::new(2, 2)).unwrap());
    log.extend(model.place_label(Position::new(3, 1)).unwrap());

    let turn_changes: Vec<PlayerId> = log
        .iter()
        .filter_map(|e| match e {
            GameEvent::TurnChanged { player } => Some(*player),
            _ => None,
        })
        .collect();
    assert_eq!(turn_changes, vec![0, 1, 0, 1, 0]);

    let placements = log
        .iter()
        .filter(|e| matches!(e, GameEvent::LabelPlaced { .. }))
        .count();
    assert_eq!(placements, 5);

    assert!(matches!(
        log.last(),
        Some(GameEvent::GameFinished { winner: 0 })
    ));
    assert_eq!(log.last().unwrap().player(), 0);
}

#[test]
fn test_view_queries_match_events() {
    let mut model = started_model();
    let events = model.place_label(Position::new(2, 3)).unwrap();

    // The placed label reported in the event is the one on the field.
    let placed = events.iter().find_map(|e| match e {
        GameEvent::LabelPlaced { label, .. } => Some(label),
        _ => None,
    });
    assert_eq!(
        placed.and_then(|l| l.cell()),
        Some(Position::new(2, 3))
    );
    assert_eq!(
        model.field().label(Position::new(2, 3)),
        placed
    );

    // The received label reported in the event is the active one.
    let received = events.iter().find_map(|e| match e {
        GameEvent::LabelReceived { label, .. } => Some(label),
        _ => None,
    });
    assert_eq!(model.active_player().active_label(), received);
}

#[test]
fn test_snapshot_tracks_a_game() {
    let mut model = started_model();
    model.place_label(Position::new(1, 1)).unwrap();
    model.set_active_label_kind(LabelKind::Hidden).unwrap();
    model.place_label(Position::new(5, 5)).unwrap();

    let snap = model.snapshot();
    assert_eq!(snap.labels.len(), 2);
    assert_eq!(snap.labels[0].position, Position::new(1, 1));
    assert_eq!(snap.labels[0].symbol, "X");
    assert_eq!(snap.labels[1].symbol, HIDDEN_MASK);
    assert_eq!(snap.labels[1].owner, None);

    let restored = FieldSnapshot::from_json(&snap.to_json().unwrap()).unwrap();
    assert_eq!(restored, snap);
}
