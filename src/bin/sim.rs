use battlesheep::{
    transport::in_memory::InMemoryTransport, GameApi, GameStore, ShotOutcome, Skeleton, Stub,
    BOARD_SIZE,
};
use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <seed>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;

    let (server_transport, client_transport) = InMemoryTransport::pair();
    let server = tokio::spawn(async move {
        let mut skeleton = Skeleton::new(GameStore::new(), server_transport);
        skeleton.run().await
    });
    let client = Stub::new(client_transport);

    let game = client.random_game(Some(seed)).await?;

    let n = BOARD_SIZE as i32;
    let mut targets: Vec<(i32, i32)> = (0..n).flat_map(|x| (0..n).map(move |y| (x, y))).collect();
    let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(1));
    targets.shuffle(&mut rng);

    let (mut hits, mut misses) = (0usize, 0usize);
    for (x, y) in targets {
        let shot = client.fire(game.id, x, y).await?;
        match shot.outcome {
            ShotOutcome::Hit => hits += 1,
            ShotOutcome::Miss => misses += 1,
        }
        if client.game(game.id).await?.ended {
            break;
        }
    }
    let detail = client.game(game.id).await?;

    drop(client);
    server.await??;

    let result = json!({
        "game": detail.id,
        "shots": hits + misses,
        "hits": hits,
        "misses": misses,
        "ended": detail.ended,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
