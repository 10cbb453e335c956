use std::sync::Arc;

use battlesheep::{
    Cell, Direction, GameError, GameStore, Phase, Ship, ShipKind, ShotOutcome, StateReason,
    StoreError,
};

fn destroyer() -> Ship {
    Ship::new(ShipKind::Destroyer, 0, 0, Direction::East)
}

#[tokio::test]
async fn test_game_lifecycle_through_store() -> anyhow::Result<()> {
    let store = GameStore::new();
    let game = store.create_game().await?;
    assert!(!game.started && !game.ended);

    let ship = store.add_ship(game.id, destroyer()).await?;
    assert_eq!(store.ship(game.id, ship.id).await?, ship);

    let first = store.fire(game.id, 0, 0).await?;
    assert_eq!(first.outcome, ShotOutcome::Hit);
    let detail = store.game(game.id).await?;
    assert!(detail.started && !detail.ended);
    assert_eq!(detail.board.get(0, 0)?, Cell::Hit);

    let second = store.fire(game.id, 1, 0).await?;
    assert_eq!(second.outcome, ShotOutcome::Hit);
    assert!(store.game(game.id).await?.ended);
    assert_eq!(store.phase(game.id).await?, Phase::Finished);

    let shots = store.shots(game.id).await?;
    assert_eq!(shots, vec![second, first]);
    Ok(())
}

#[tokio::test]
async fn test_rejected_calls_persist_nothing() -> anyhow::Result<()> {
    let store = GameStore::new();
    let game = store.create_game().await?;
    store.add_ship(game.id, destroyer()).await?;

    let overlapping = Ship::new(ShipKind::Cruiser, 1, 0, Direction::South);
    assert_eq!(
        store.add_ship(game.id, overlapping).await.unwrap_err(),
        StoreError::Game(GameError::Overlap { x: 1, y: 0 })
    );
    assert_eq!(store.ships(game.id).await?.len(), 1);

    store.fire(game.id, 5, 5).await?;
    assert_eq!(
        store.fire(game.id, 5, 5).await.unwrap_err(),
        StoreError::Game(GameError::DuplicateShot { x: 5, y: 5 })
    );
    assert_eq!(store.shots(game.id).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_ship_removal_only_in_setup() -> anyhow::Result<()> {
    let store = GameStore::new();
    let game = store.create_game().await?;
    let ship = store.add_ship(game.id, destroyer()).await?;
    let keep = store
        .add_ship(game.id, Ship::new(ShipKind::Submarine, 4, 4, Direction::West))
        .await?;

    store.remove_ship(game.id, ship.id).await?;
    let detail = store.game(game.id).await?;
    assert_eq!(detail.board.get(0, 0)?, Cell::Empty);
    assert_eq!(detail.board.get(1, 0)?, Cell::Empty);
    assert_eq!(
        store.ship(game.id, ship.id).await.unwrap_err(),
        StoreError::UnknownShip { game: game.id, ship: ship.id }
    );

    let shot = store.fire(game.id, 9, 9).await?;
    assert_eq!(
        store.remove_ship(game.id, keep.id).await.unwrap_err(),
        StoreError::Game(GameError::State(StateReason::AlreadyStarted))
    );
    assert_eq!(
        store.remove_shot(game.id, shot.id).await.unwrap_err(),
        StoreError::Game(GameError::State(StateReason::AlreadyStarted))
    );
    assert_eq!(store.ships(game.id).await?, vec![keep]);
    assert_eq!(store.shots(game.id).await?, vec![shot]);
    Ok(())
}

#[tokio::test]
async fn test_listing_is_newest_first_and_delete_cascades() -> anyhow::Result<()> {
    let store = GameStore::new();
    let a = store.create_game().await?;
    let b = store.create_game().await?;
    let c = store.create_game().await?;
    let ids: Vec<_> = store.list_games().await?.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![c.id, b.id, a.id]);

    store.add_ship(b.id, destroyer()).await?;
    store.fire(b.id, 3, 3).await?;
    store.delete_game(b.id).await?;

    let ids: Vec<_> = store.list_games().await?.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![c.id, a.id]);
    assert_eq!(
        store.ships(b.id).await.unwrap_err(),
        StoreError::UnknownGame(b.id)
    );
    assert_eq!(
        store.delete_game(b.id).await.unwrap_err(),
        StoreError::UnknownGame(b.id)
    );
    Ok(())
}

#[tokio::test]
async fn test_random_game_places_every_kind() -> anyhow::Result<()> {
    let store = GameStore::new();
    let game = store.random_game(Some(7)).await?;
    let ships = store.ships(game.id).await?;
    let mut kinds: Vec<_> = ships.iter().map(|s| s.ship.kind).collect();
    kinds.sort();
    assert_eq!(
        kinds,
        vec![
            ShipKind::AircraftCarrier,
            ShipKind::Battleship,
            ShipKind::Cruiser,
            ShipKind::Submarine,
            ShipKind::Destroyer,
        ]
    );
    assert_eq!(store.game(game.id).await?.board.unhit_cells(), 17);

    // same seed, same layout
    let again = store.random_game(Some(7)).await?;
    assert_eq!(
        store.game(game.id).await?.board,
        store.game(again.id).await?.board
    );
    Ok(())
}

#[tokio::test]
async fn test_board_view_text() -> anyhow::Result<()> {
    let store = GameStore::new();
    let game = store.create_game().await?;
    store.add_ship(game.id, destroyer()).await?;
    let view = store.board_view(game.id).await?;
    let lines: Vec<_> = view.lines().collect();
    assert_eq!(lines.len(), 10);
    assert!(lines[0].starts_with("d * "));
    assert!(lines[1].starts_with("d * "));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_placements_never_overlap() -> anyhow::Result<()> {
    let store = Arc::new(GameStore::new());
    let game = store.create_game().await?;

    // every candidate covers (5, 5); at most one may win
    let mut handles = Vec::new();
    for direction in Direction::ALL {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .add_ship(game.id, Ship::new(ShipKind::Cruiser, 5, 5, direction))
                .await
        }));
    }
    let mut placed = 0;
    for handle in handles {
        if handle.await?.is_ok() {
            placed += 1;
        }
    }
    assert_eq!(placed, 1);
    assert_eq!(store.game(game.id).await?.board.unhit_cells(), 3);
    Ok(())
}

#[tokio::test]
async fn test_snapshot_roundtrip() -> anyhow::Result<()> {
    let store = GameStore::new();
    let game = store.create_game().await?;
    store.add_ship(game.id, destroyer()).await?;
    store.fire(game.id, 0, 0).await?;
    store.random_game(Some(3)).await?;

    let bytes = store.snapshot().await?;
    let restored = GameStore::restore(&bytes)?;
    assert_eq!(restored.list_games().await?, store.list_games().await?);
    assert_eq!(restored.game(game.id).await?, store.game(game.id).await?);
    assert_eq!(restored.shots(game.id).await?, store.shots(game.id).await?);

    // ids continue where the original left off
    let next = restored.create_game().await?;
    assert_eq!(next.id, store.create_game().await?.id);
    Ok(())
}

#[tokio::test]
async fn test_restore_rejects_garbage() {
    assert!(GameStore::restore(&[0xff, 0x00, 0x13]).is_err());
}

#[tokio::test]
async fn test_shot_outcomes_match_board_cells() -> anyhow::Result<()> {
    let store = GameStore::new();
    let game = store.create_game().await?;
    store.add_ship(game.id, destroyer()).await?;
    let miss = store.fire(game.id, 4, 4).await?;
    let hit = store.fire(game.id, 1, 0).await?;
    assert_eq!(miss.outcome, ShotOutcome::Miss);
    assert_eq!(hit.outcome, ShotOutcome::Hit);

    let board = store.game(game.id).await?.board;
    let restored = GameStore::restore(&store.snapshot().await?)?;
    for shots in [store.shots(game.id).await?, restored.shots(game.id).await?] {
        assert_eq!(shots, vec![hit, miss]);
        for shot in shots {
            assert_eq!(board.get(shot.x, shot.y)?.outcome(), Some(shot.outcome));
        }
    }
    assert_eq!(store.shot(game.id, hit.id).await?, hit);
    Ok(())
}
