use battlesheep::{
    Board, Cell, Direction, Game, GameError, Phase, Ship, ShipKind, Shot, ShotOutcome,
    StateReason,
};

fn destroyer_game() -> Game {
    let mut game = Game::new();
    game.place_ship(&Ship::new(ShipKind::Destroyer, 0, 0, Direction::East))
        .unwrap();
    game
}

#[test]
fn test_single_destroyer_game_runs_to_finish() {
    let mut game = destroyer_game();
    assert_eq!(game.phase(), Phase::Setup);

    assert_eq!(game.fire_shot(0, 0).unwrap(), ShotOutcome::Hit);
    assert_eq!(game.board().get(0, 0).unwrap(), Cell::Hit);
    assert!(game.started());
    assert!(!game.ended());

    assert_eq!(game.fire_shot(1, 0).unwrap(), ShotOutcome::Hit);
    assert_eq!(game.board().rows()[1][0], Cell::Hit);
    assert!(game.ended());
    assert_eq!(game.phase(), Phase::Finished);
}

#[test]
fn test_miss_on_empty_board_never_ends() {
    let mut game = Game::new();
    assert_eq!(game.fire_shot(5, 5).unwrap(), ShotOutcome::Miss);
    assert_eq!(game.board().rows()[5][5].symbol(), ' ');
    assert!(game.started());
    assert!(!game.ended());
}

#[test]
fn test_hit_does_not_end_while_ships_remain() {
    let mut game = destroyer_game();
    game.place_ship(&Ship::new(ShipKind::Cruiser, 5, 5, Direction::North))
        .unwrap();
    game.fire_shot(0, 0).unwrap();
    game.fire_shot(1, 0).unwrap();
    assert_eq!(game.phase(), Phase::Active);
}

#[test]
fn test_duplicate_shot_rejected_without_change() {
    let mut game = destroyer_game();
    game.fire_shot(4, 4).unwrap();
    let before = game;
    assert_eq!(
        game.fire_shot(4, 4).unwrap_err(),
        GameError::DuplicateShot { x: 4, y: 4 }
    );
    assert_eq!(game, before);
}

#[test]
fn test_out_of_bounds_shot_does_not_start_game() {
    let mut game = destroyer_game();
    assert_eq!(
        game.fire_shot(-1, 3).unwrap_err(),
        GameError::OutOfBounds { x: -1, y: 3 }
    );
    assert_eq!(game.phase(), Phase::Setup);
}

#[test]
fn test_ship_layout_frozen_after_first_shot() {
    let mut game = destroyer_game();
    let ship = Ship::new(ShipKind::Destroyer, 0, 0, Direction::East);
    game.fire_shot(9, 9).unwrap();

    assert_eq!(
        game.place_ship(&Ship::new(ShipKind::Cruiser, 5, 5, Direction::South))
            .unwrap_err(),
        GameError::State(StateReason::NotInSetup)
    );
    assert_eq!(
        game.remove_ship(&ship).unwrap_err(),
        GameError::State(StateReason::AlreadyStarted)
    );
    assert_eq!(game.board().get(0, 0).unwrap(), Cell::Ship(ShipKind::Destroyer));
}

#[test]
fn test_remove_ship_in_setup_restores_empty_cells() {
    let mut game = destroyer_game();
    let ship = Ship::new(ShipKind::Destroyer, 0, 0, Direction::East);
    game.remove_ship(&ship).unwrap();
    assert_eq!(*game.board(), Board::new());
    assert_eq!(game.board().rows()[0][0].symbol(), '*');
    assert_eq!(game.board().rows()[1][0].symbol(), '*');
}

#[test]
fn test_remove_shot_forbidden_once_started() {
    let mut game = destroyer_game();
    game.fire_shot(3, 3).unwrap();
    assert_eq!(
        game.remove_shot(&Shot::new(3, 3)).unwrap_err(),
        GameError::State(StateReason::AlreadyStarted)
    );
    assert_eq!(game.board().get(3, 3).unwrap(), Cell::Miss);

    game.fire_shot(0, 0).unwrap();
    game.fire_shot(1, 0).unwrap();
    assert_eq!(
        game.remove_shot(&Shot::new(3, 3)).unwrap_err(),
        GameError::State(StateReason::AlreadyEnded)
    );
}

#[test]
fn test_finished_game_refuses_everything() {
    let mut game = destroyer_game();
    game.fire_shot(0, 0).unwrap();
    game.fire_shot(1, 0).unwrap();
    let finished = game;

    let ended = GameError::State(StateReason::AlreadyEnded);
    assert_eq!(game.fire_shot(5, 5).unwrap_err(), ended);
    assert_eq!(
        game.place_ship(&Ship::new(ShipKind::Cruiser, 5, 5, Direction::South))
            .unwrap_err(),
        ended
    );
    assert_eq!(
        game.remove_ship(&Ship::new(ShipKind::Destroyer, 0, 0, Direction::East))
            .unwrap_err(),
        ended
    );
    assert_eq!(game, finished);
}

#[test]
fn test_from_parts_keeps_phase() {
    let game = destroyer_game();
    let rebuilt = Game::from_parts(*game.board(), Phase::Active);
    assert!(rebuilt.started());
    assert_eq!(rebuilt.board(), game.board());
}

#[test]
fn test_error_messages() {
    assert_eq!(
        GameError::State(StateReason::AlreadyStarted).to_string(),
        "Invalid game state: already-started"
    );
    assert_eq!(
        GameError::Overlap { x: 1, y: 2 }.to_string(),
        "Position [1, 2] already contains a ship"
    );
    assert_eq!(StateReason::NotInSetup.as_str(), "not-in-setup");
}
