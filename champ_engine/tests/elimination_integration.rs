//! Integration tests for single elimination championships.
//!
//! Verifies seeding, loser removal, byes for odd fields and the champion of a
//! finished bracket.

use champ_engine::championship::{ChampionshipError, PlayerFilter, PlayerStatus};
use champ_engine::{Championship, ChampionshipConfig, Variant};

fn bracket(names: &[&str], seed: u64) -> Championship {
    let config = ChampionshipConfig::default().with_seed(seed);
    let mut championship = Championship::with_config(Variant::SingleElimination, config)
        .expect("Failed to create championship");
    for name in names {
        championship.add_player(name, None).unwrap();
    }
    championship
}

/// First player of every pending pairing wins; returns the winners
fn play_out_round(championship: &mut Championship) -> Vec<String> {
    let pairings = championship.pending_pairings().to_vec();
    pairings
        .into_iter()
        .map(|pairing| {
            championship
                .record_result(&pairing.player_a, &pairing.player_b, 2, 1)
                .unwrap();
            pairing.player_a
        })
        .collect()
}

#[test]
fn test_four_player_bracket() {
    let mut championship = bracket(&["Ana", "Bo", "Cy", "Dee"], 11);

    let first = championship.advance_round().unwrap();
    assert_eq!(first.round, 1);
    assert_eq!(first.pairings.len(), 2);
    assert!(first.unpaired.is_empty());
    let winners = play_out_round(&mut championship);

    let final_round = championship.advance_round().unwrap();
    assert_eq!(final_round.pairings.len(), 1);
    assert!(final_round.pairings[0].is_between(&winners[0], &winners[1]));
    assert_eq!(championship.list_players(PlayerFilter::Active).len(), 2);
    assert_eq!(championship.list_players(PlayerFilter::Removed).len(), 2);

    let champion = play_out_round(&mut championship).remove(0);
    let last = championship.advance_round().unwrap();
    assert!(last.is_empty());
    assert!(championship.is_finished());
    assert_eq!(championship.champion(), Some(champion.clone()));

    let remaining = championship.list_players(PlayerFilter::Active);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, champion);
    assert_eq!(championship.standings()[0].name, champion);
    assert_eq!(championship.standings()[0].score, 6);
}

#[test]
fn test_same_seed_same_bracket() {
    let names = ["P1", "P2", "P3", "P4", "P5", "P6", "P7", "P8"];
    let mut first = bracket(&names, 2024);
    let mut second = bracket(&names, 2024);

    assert_eq!(
        first.advance_round().unwrap(),
        second.advance_round().unwrap()
    );
}

#[test]
fn test_every_player_appears_once_per_round() {
    let names = ["P1", "P2", "P3", "P4", "P5", "P6", "P7", "P8"];
    let mut championship = bracket(&names, 5);

    let round = championship.advance_round().unwrap();
    let mut seen: Vec<&str> = round
        .pairings
        .iter()
        .flat_map(|p| [p.player_a.as_str(), p.player_b.as_str()])
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, names.to_vec());
}

#[test]
fn test_odd_field_gives_bye() {
    let mut championship = bracket(&["A", "B", "C", "D", "E"], 8);

    let first = championship.advance_round().unwrap();
    assert_eq!(first.pairings.len(), 2);
    assert_eq!(first.unpaired.len(), 1);
    let bye = first.unpaired[0].clone();
    assert!(first.pairings.iter().all(|p| !p.involves(&bye)));
    play_out_round(&mut championship);

    // Bye player advances without points
    assert_eq!(championship.player(&bye).unwrap().score, 0);
    assert_eq!(championship.player(&bye).unwrap().status, PlayerStatus::Active);

    // The round 1 bye plays in round 2
    let second = championship.advance_round().unwrap();
    assert_eq!(second.pairings.len(), 1);
    assert_eq!(second.unpaired.len(), 1);
    assert_ne!(second.unpaired[0], bye);
    assert!(second.pairings[0].involves(&bye));
    play_out_round(&mut championship);

    let third = championship.advance_round().unwrap();
    assert_eq!(third.pairings.len(), 1);
    assert!(third.unpaired.is_empty());
    play_out_round(&mut championship);

    assert!(championship.advance_round().unwrap().is_empty());
    assert!(championship.champion().is_some());
    assert_eq!(championship.list_players(PlayerFilter::Removed).len(), 4);
}

#[test]
fn test_registration_closes_after_seeding() {
    let mut championship = bracket(&["A", "B", "C", "D"], 1);
    championship.advance_round().unwrap();
    play_out_round(&mut championship);

    assert!(matches!(
        championship.add_player("Late", None),
        Err(ChampionshipError::RegistrationClosed(Variant::SingleElimination))
    ));
    assert!(championship.player("Late").is_none());

    let second = championship.advance_round().unwrap();
    assert_eq!(second.pairings.len(), 1);
    assert!(second.unpaired.is_empty());
    assert!(second.pairings.iter().all(|p| !p.involves("Late")));
}

#[test]
fn test_draw_rejected_and_round_stays_open() {
    let mut championship = bracket(&["A", "B"], 1);
    championship.advance_round().unwrap();

    assert!(matches!(
        championship.record_result("A", "B", 0, 0),
        Err(ChampionshipError::DrawNotAllowed)
    ));
    assert!(matches!(
        championship.advance_round(),
        Err(ChampionshipError::InvalidRoundState { pending: 1 })
    ));

    championship.record_result("B", "A", 1, 0).unwrap();
    assert!(championship.advance_round().unwrap().is_empty());
    assert_eq!(championship.champion().as_deref(), Some("B"));
}

#[test]
fn test_withdrawn_player_skipped_next_round() {
    let mut championship = bracket(&["A", "B", "C", "D"], 3);
    championship.advance_round().unwrap();
    let winners = play_out_round(&mut championship);

    championship.remove_player(&winners[0]).unwrap();
    let round = championship.advance_round().unwrap();

    // Only one winner left standing: the bracket is decided
    assert!(round.is_empty());
    assert_eq!(championship.champion(), Some(winners[1].clone()));
}

#[test]
fn test_single_player_and_empty_bracket() {
    let mut empty = bracket(&[], 1);
    assert!(empty.advance_round().unwrap().is_empty());
    assert!(empty.is_finished());
    assert!(empty.champion().is_none());

    let mut solo = bracket(&["A"], 1);
    assert!(solo.advance_round().unwrap().is_empty());
    assert_eq!(solo.champion().as_deref(), Some("A"));
}
