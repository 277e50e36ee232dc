//! Pairing strategies for each championship variant.
//!
//! The variants share the registry and ledger owned by the championship and
//! differ only in how the next round is drawn, dispatched through
//! [`PairingFormat`] on the [`Format`] enum.

use enum_dispatch::enum_dispatch;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use super::{
    errors::ChampionshipResult,
    ledger::Ledger,
    models::{Pairing, RoundPairings, Variant},
    registry::Registry,
};
use crate::{
    config::{ChampionshipConfig, SwissWeighting},
    matching::{WeightedEdge, matched_pairs, max_weight_matching},
};

/// Variant-specific behaviour of a championship
#[enum_dispatch]
pub trait PairingFormat {
    fn variant(&self) -> Variant;

    /// Whether a drawn match is an acceptable result
    fn allows_draws(&self) -> bool;

    /// Whether players may join after the first round was drawn
    fn allows_late_registration(&self) -> bool;

    /// Draw the pairings for the round after `ledger.round()`.
    ///
    /// Called only once every pairing of the current round has a result.
    /// May update the registry (elimination drops the losers here).
    fn next_pairings(
        &mut self,
        registry: &mut Registry,
        ledger: &Ledger,
        config: &ChampionshipConfig,
    ) -> ChampionshipResult<RoundPairings>;

    /// Winner of a finished championship
    fn champion(&self, registry: &Registry) -> Option<String>;
}

/// Championship format, holding the variant's pairing strategy
#[enum_dispatch(PairingFormat)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    SingleElimination(SingleElimination),
    Swiss(Swiss),
}

impl From<Variant> for Format {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::SingleElimination => Format::SingleElimination(SingleElimination),
            Variant::Swiss => Format::Swiss(Swiss),
        }
    }
}

/// Losers leave after every round; winners meet in their current order.
///
/// With an odd field the last player sits out. That player then moves to the
/// front of the order so the bye passes to someone else next round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SingleElimination;

impl PairingFormat for SingleElimination {
    fn variant(&self) -> Variant {
        Variant::SingleElimination
    }

    fn allows_draws(&self) -> bool {
        false
    }

    fn allows_late_registration(&self) -> bool {
        false
    }

    fn next_pairings(
        &mut self,
        registry: &mut Registry,
        ledger: &Ledger,
        config: &ChampionshipConfig,
    ) -> ChampionshipResult<RoundPairings> {
        if ledger.round() == 0 {
            let active = registry.active_mut();
            match config.seed {
                Some(seed) => active.shuffle(&mut StdRng::seed_from_u64(seed)),
                None => active.shuffle(&mut rand::rng()),
            }
        } else {
            for result in ledger.current_results() {
                match result.loser() {
                    Some(loser) if registry.is_active(loser) => registry.remove(loser)?,
                    Some(_) => {}
                    None => log::warn!(
                        "Drawn elimination match {} vs {}, both players advance",
                        result.player_a,
                        result.player_b
                    ),
                }
            }
        }

        let active = registry.active();
        let mut round = RoundPairings {
            round: ledger.round() + 1,
            ..Default::default()
        };
        if active.len() < 2 {
            return Ok(round);
        }

        let mut chunks = active.chunks_exact(2);
        round.pairings = chunks
            .by_ref()
            .map(|pair| Pairing::new(pair[0].clone(), pair[1].clone()))
            .collect();
        round.unpaired = chunks.remainder().to_vec();
        if let Some(name) = round.unpaired.first() {
            log::warn!("{name} receives a bye in round {}", round.round);
            let active = registry.active_mut();
            if let Some(last) = active.pop() {
                active.insert(0, last);
            }
        }
        Ok(round)
    }

    fn champion(&self, registry: &Registry) -> Option<String> {
        match registry.active() {
            [winner] => Some(winner.clone()),
            _ => None,
        }
    }
}

/// Everyone plays every round against an opponent they have not met,
/// chosen by maximum-weight matching over score differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Swiss;

impl Swiss {
    /// Candidate games between active players who have not met yet.
    ///
    /// Indices refer to `active`. The score term dominates; among equally
    /// scored matchings, players registered closer together are preferred so
    /// the result is deterministic.
    fn candidate_edges(
        active: &[String],
        registry: &Registry,
        ledger: &Ledger,
        weighting: SwissWeighting,
    ) -> Vec<WeightedEdge> {
        let n = active.len();
        let scores: Vec<i64> = active
            .iter()
            .map(|name| registry.score(name).unwrap_or_default())
            .collect();
        let max_gap = match (scores.iter().max(), scores.iter().min()) {
            (Some(max), Some(min)) => max - min,
            _ => 0,
        };
        let scale = (n * n).max(1) as i64;

        let mut edges = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if ledger.has_played(&active[i], &active[j]) {
                    continue;
                }
                let gap = (scores[i] - scores[j]).abs();
                let primary = match weighting {
                    SwissWeighting::ScoreProximity => max_gap - gap,
                    SwissWeighting::ScoreGap => gap,
                };
                let tiebreak = (n - (j - i)) as i64;
                edges.push((i, j, primary * scale + tiebreak));
            }
        }
        edges
    }
}

impl PairingFormat for Swiss {
    fn variant(&self) -> Variant {
        Variant::Swiss
    }

    fn allows_draws(&self) -> bool {
        true
    }

    fn allows_late_registration(&self) -> bool {
        true
    }

    fn next_pairings(
        &mut self,
        registry: &mut Registry,
        ledger: &Ledger,
        config: &ChampionshipConfig,
    ) -> ChampionshipResult<RoundPairings> {
        let active = registry.active();
        let edges = Self::candidate_edges(active, registry, ledger, config.swiss_weighting);
        let mate = max_weight_matching(active.len(), &edges, true);

        let mut round = RoundPairings {
            round: ledger.round() + 1,
            ..Default::default()
        };
        round.pairings = matched_pairs(&mate)
            .into_iter()
            .map(|(i, j)| Pairing::new(active[i].clone(), active[j].clone()))
            .collect();
        if !round.pairings.is_empty() {
            round.unpaired = mate
                .iter()
                .enumerate()
                .filter(|(_, m)| m.is_none())
                .map(|(i, _)| active[i].clone())
                .collect();
        }

        if !round.unpaired.is_empty() {
            log::warn!(
                "Swiss round {} left {} player(s) unpaired: {:?}",
                round.round,
                round.unpaired.len(),
                round.unpaired
            );
        }
        Ok(round)
    }

    fn champion(&self, registry: &Registry) -> Option<String> {
        registry.standings().into_iter().next().map(|s| s.name)
    }
}
