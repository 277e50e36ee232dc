//! Persistence round-trip tests.
//!
//! A championship saved mid-round and restored must be indistinguishable from
//! the original, both in its observable state and in how it continues.

use champ_engine::championship::{MatchResult, SNAPSHOT_VERSION};
use champ_engine::store::StoredChampionship;
use champ_engine::{
    Championship, ChampionshipConfig, ChampionshipError, ChampionshipStore, MemoryStore, Variant,
};

fn mid_round_swiss() -> Championship {
    let mut championship = Championship::new(Variant::Swiss);
    championship.set_id(3);
    for (idx, name) in ["A", "B", "C", "D", "E", "F"].iter().enumerate() {
        championship.add_player(name, Some(idx as u32 + 10)).unwrap();
    }
    championship.advance_round().unwrap();
    championship.record_result("A", "B", 2, 0).unwrap();
    championship.record_result("C", "D", 1, 1).unwrap();
    championship.record_result("E", "F", 0, 3).unwrap();
    championship.advance_round().unwrap();

    let first = championship.pending_pairings()[0].clone();
    championship
        .record_result(&first.player_a, &first.player_b, 1, 0)
        .unwrap();
    championship
}

#[test]
fn test_restore_mid_round_is_identical() {
    let original = mid_round_swiss();
    let blob = original.to_blob().unwrap();

    let restored = Championship::restore(original.id(), "Swiss", &blob).unwrap();

    assert_eq!(restored.standings(), original.standings());
    assert_eq!(restored.pending_pairings(), original.pending_pairings());
    assert_eq!(restored.results(1), original.results(1));
    assert_eq!(restored.results(2), original.results(2));
    assert_eq!(restored.match_history(), original.match_history());
    assert_eq!(restored.round(), 2);
    assert_eq!(restored.list_players(champ_engine::PlayerFilter::All)[0].number, Some(10));
    assert_eq!(restored.to_blob().unwrap(), blob);
}

#[test]
fn test_restored_championship_continues_the_same_way() {
    let mut original = mid_round_swiss();
    let mut restored = Championship::from_blob(&original.to_blob().unwrap()).unwrap();

    let remaining: Vec<MatchResult> = original
        .unresolved_pairings()
        .into_iter()
        .map(|p| MatchResult::new(p.player_a.clone(), p.player_b.clone(), 0, 2))
        .collect();

    let next_original = original.submit_round(&remaining).unwrap();
    let next_restored = restored.submit_round(&remaining).unwrap();
    assert_eq!(next_original, next_restored);
    assert_eq!(original, restored);
}

#[test]
fn test_elimination_bracket_survives_round_trip() {
    let mut championship = Championship::new(Variant::SingleElimination);
    for name in ["A", "B", "C", "D", "E", "F", "G", "H"] {
        championship.add_player(name, None).unwrap();
    }
    let seeded = championship.advance_round().unwrap();

    let blob = championship.to_blob().unwrap();
    let mut restored = Championship::restore(9, "SingleElimination", &blob).unwrap();
    assert_eq!(restored.pending_pairings(), seeded.pairings.as_slice());
    assert_eq!(restored.variant(), Variant::SingleElimination);

    let results: Vec<MatchResult> = seeded
        .pairings
        .iter()
        .map(|p| MatchResult::new(p.player_a.clone(), p.player_b.clone(), 1, 0))
        .collect();
    championship.submit_round(&results).unwrap();
    restored.submit_round(&results).unwrap();
    assert_eq!(championship.pending_pairings(), restored.pending_pairings());
}

#[test]
fn test_blob_header_carries_version() {
    let blob = Championship::new(Variant::Swiss).to_blob().unwrap();
    // bincode's standard config writes small integers as a single byte
    assert_eq!(blob[0] as u16, SNAPSHOT_VERSION);
}

#[test]
fn test_store_lifecycle() {
    let store = MemoryStore::new();
    let id = store
        .create(Variant::Swiss, ChampionshipConfig::default())
        .unwrap()
        .id();

    store
        .update(id, |c| {
            for name in ["A", "B", "C", "D"] {
                c.add_player(name, None)?;
            }
            Ok(())
        })
        .unwrap();
    let round = store.update(id, |c| c.advance_round()).unwrap();
    assert_eq!(round.pairings.len(), 2);

    let results: Vec<MatchResult> = round
        .pairings
        .iter()
        .map(|p| MatchResult::new(p.player_a.clone(), p.player_b.clone(), 3, 0))
        .collect();
    store.update(id, |c| c.submit_round(&results)).unwrap();

    let loaded = store.load(id).unwrap().unwrap();
    assert_eq!(loaded.round(), 2);
    assert_eq!(loaded.results(1).len(), 2);

    let row = store.row(id).unwrap();
    assert_eq!(row.variant, "Swiss");
    assert_eq!(row.restore().unwrap(), loaded);
    assert_eq!(StoredChampionship::from_championship(&loaded).unwrap(), row);
}

#[test]
fn test_store_rejects_corrupt_row() {
    let store = MemoryStore::new();
    let championship = store
        .create(Variant::SingleElimination, ChampionshipConfig::default())
        .unwrap();

    let mut row = store.row(championship.id()).unwrap();
    row.variant = "Swiss".to_string();
    let err = row.restore().unwrap_err();
    assert!(matches!(err, ChampionshipError::Snapshot(_)));
    assert_eq!(err.client_message(), "Championship data could not be read");
}
