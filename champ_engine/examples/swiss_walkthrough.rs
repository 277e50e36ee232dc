//! Swiss Championship Example
//!
//! Runs a small Swiss event from registration to the final standings, storing
//! the championship between every step the way a web handler would.
//!
//! Run with `RUST_LOG=debug` to see the engine's log output.

use champ_engine::championship::MatchResult;
use champ_engine::{ChampionshipConfig, ChampionshipStore, MemoryStore, Variant};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== Swiss Championship Example ===\n");

    let store = MemoryStore::new();
    let config = ChampionshipConfig::from_env()?;
    let id = store.create(Variant::Swiss, config)?.id();
    println!("Created championship {id}");

    let players = ["Ana", "Bo", "Cy", "Dee", "Eli", "Fay"];
    store.update(id, |championship| {
        for (seat, name) in players.iter().enumerate() {
            championship.add_player(name, Some(seat as u32 + 1))?;
        }
        Ok(())
    })?;
    println!("Registered {} players\n", players.len());

    let mut round = store.update(id, |championship| championship.advance_round())?;
    while !round.is_empty() {
        println!("Round {}:", round.round);

        // First-listed player wins, every third game is drawn
        let results: Vec<MatchResult> = round
            .pairings
            .iter()
            .enumerate()
            .map(|(idx, pairing)| {
                let (a, b) = if idx % 3 == 2 { (1, 1) } else { (2, 1) };
                println!("  {pairing}: {a} - {b}");
                MatchResult::new(pairing.player_a.clone(), pairing.player_b.clone(), a, b)
            })
            .collect();
        for name in &round.unpaired {
            println!("  {name} sits out");
        }

        round = store.update(id, |championship| championship.submit_round(&results))?;
    }

    let championship = store
        .load(id)?
        .ok_or_else(|| anyhow::anyhow!("championship {id} disappeared"))?;

    println!("\nFinal standings after {} rounds:", championship.round() - 1);
    for standing in championship.standings() {
        println!(
            "  {}. {} ({} pts)",
            standing.position, standing.name, standing.score
        );
    }
    if let Some(champion) = championship.champion() {
        println!("\nChampion: {champion}");
    }

    println!("\nStandings as JSON:");
    println!("{}", serde_json::to_string_pretty(&championship.standings())?);

    Ok(())
}
