use grid_snake::config::GameConfig;
use grid_snake::game::{GameEvent, GameSimulation, GameStatus, TickOutcome};
use grid_snake::input::{Direction, GameInput};
use grid_snake::snake::Position;

fn chase_food(sim: &mut GameSimulation, max_ticks: usize) -> Option<TickOutcome> {
    for _ in 0..max_ticks {
        let head = sim.snake().head();
        let food = sim.food().position;
        let wanted = if head.x != food.x {
            Direction::Right
        } else {
            Direction::Down
        };
        sim.set_direction(wanted);

        match sim.tick().expect("placement succeeds") {
            Some(outcome @ TickOutcome::Ate { .. }) => return Some(outcome),
            Some(outcome @ TickOutcome::GameOver { .. }) => return Some(outcome),
            Some(TickOutcome::Moved(_)) => {}
            None => panic!("simulation stopped running"),
        }
    }
    None
}

#[test]
fn idle_round_waits_for_start() {
    let mut sim = GameSimulation::new_with_seed(GameConfig::with_grid(10, 10), 1)
        .expect("valid config");

    sim.apply_input(GameInput::Direction(Direction::Up))
        .expect("input applies");
    assert_eq!(sim.tick().expect("tick succeeds"), None);

    sim.apply_input(GameInput::Confirm).expect("start succeeds");
    assert_eq!(sim.status(), GameStatus::Running);
    assert_eq!(sim.drain_events(), vec![GameEvent::Started]);
}

#[test]
fn non_eating_ticks_keep_length_and_eating_grows_by_one() {
    let mut sim = GameSimulation::new_with_seed(GameConfig::with_grid(12, 12), 42)
        .expect("valid config");
    sim.start().expect("start succeeds");

    for _ in 0..3 {
        let before_len = sim.snake().len();
        let before_score = sim.current_score();

        let outcome = chase_food(&mut sim, 200).expect("food is reachable");

        let TickOutcome::Ate { board, score, .. } = outcome else {
            panic!("snake chasing food should eat before dying");
        };
        assert_eq!(board.snake.len(), before_len + 1);
        assert_eq!(score, before_score + 5);
        assert!(!board.snake.contains(&board.food));
        assert!(!board.walls.contains(&board.food));
    }
}

#[test]
fn reverse_input_keeps_heading() {
    let mut sim = GameSimulation::new_with_seed(GameConfig::with_grid(10, 10), 5)
        .expect("valid config");
    sim.start().expect("start succeeds");
    let start = sim.snake().head();

    sim.set_direction(Direction::Left);
    let outcome = sim.tick().expect("tick succeeds");

    assert!(outcome.is_some());
    assert_eq!(sim.direction(), Direction::Right);
    assert_eq!(sim.snake().head(), Position::new(start.x + 1, start.y));
}

#[test]
fn pause_toggle_round_trip() {
    let mut sim = GameSimulation::new_with_seed(GameConfig::with_grid(10, 10), 9)
        .expect("valid config");
    sim.start().expect("start succeeds");

    sim.apply_input(GameInput::Pause).expect("pause applies");
    let frozen = sim.snapshot();
    assert!(sim.is_paused());
    assert_eq!(sim.tick().expect("tick succeeds"), None);
    assert_eq!(sim.snapshot(), frozen);

    sim.apply_input(GameInput::Pause).expect("resume applies");
    assert!(!sim.is_paused());
    assert!(sim.tick().expect("tick succeeds").is_some());
}

#[test]
fn restart_after_game_over_keeps_high_scores() {
    // On a one-row board, turning vertically wraps the head back onto its
    // own cell, so a two-segment snake bites itself on the next tick.
    let mut sim = GameSimulation::new_with_seed(GameConfig::with_grid(12, 1), 42)
        .expect("valid config");
    sim.start().expect("start succeeds");
    chase_food(&mut sim, 20).expect("food is reachable");
    assert_eq!(sim.current_score(), 5);
    assert_eq!(sim.snake().len(), 2);

    sim.set_direction(Direction::Down);
    let outcome = sim.tick().expect("tick succeeds");

    assert_eq!(
        outcome,
        Some(TickOutcome::GameOver {
            final_score: 5,
            high_scores: vec![5],
        })
    );
    assert_eq!(sim.status(), GameStatus::GameOver);

    sim.restart().expect("restart succeeds");

    assert_eq!(sim.status(), GameStatus::Idle);
    assert_eq!(sim.current_score(), 0);
    assert_eq!(sim.current_speed_multiplier(), 1.0);
    assert_eq!(sim.snake().len(), 1);
    assert_eq!(sim.snake().head(), Position::new(6, 0));
    assert_eq!(sim.high_scores(), &[5]);

    sim.start().expect("second round starts");
    assert_eq!(sim.high_scores(), &[5]);
}
