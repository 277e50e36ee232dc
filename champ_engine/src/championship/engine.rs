//! The championship aggregate: registry, ledger, pending pairings and format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{
    errors::{ChampionshipError, ChampionshipResult},
    formats::{Format, PairingFormat},
    ledger::Ledger,
    models::{
        ChampionshipId, MatchResult, Pairing, Player, PlayerFilter, RoundPairings, Standing,
        Variant,
    },
    registry::Registry,
};
use crate::config::ChampionshipConfig;

/// A single championship instance.
///
/// All mutation goes through `&mut self`; callers that persist the state
/// between requests must load, mutate and save it as one critical section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Championship {
    id: ChampionshipId,
    format: Format,
    config: ChampionshipConfig,
    registry: Registry,
    ledger: Ledger,
    /// Pairings of the current round, empty before round 1 and once finished
    pending: Vec<Pairing>,
    /// Players without an opponent in the current round
    unpaired: Vec<String>,
    finished: bool,
}

impl Championship {
    /// Create a championship with default scoring
    pub fn new(variant: Variant) -> Self {
        Self {
            id: 0,
            format: Format::from(variant),
            config: ChampionshipConfig::default(),
            registry: Registry::default(),
            ledger: Ledger::default(),
            pending: Vec::new(),
            unpaired: Vec::new(),
            finished: false,
        }
    }

    /// Create a championship with custom scoring, weighting or seed
    pub fn with_config(variant: Variant, config: ChampionshipConfig) -> ChampionshipResult<Self> {
        config.validate()?;
        let mut championship = Self::new(variant);
        championship.config = config;
        Ok(championship)
    }

    pub fn id(&self) -> ChampionshipId {
        self.id
    }

    pub fn set_id(&mut self, id: ChampionshipId) {
        self.id = id;
    }

    pub fn variant(&self) -> Variant {
        self.format.variant()
    }

    pub fn config(&self) -> &ChampionshipConfig {
        &self.config
    }

    pub fn round(&self) -> u32 {
        self.ledger.round()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Register a new active player with a score of zero.
    ///
    /// Elimination brackets close registration once round 1 is drawn.
    pub fn add_player(&mut self, name: &str, number: Option<u32>) -> ChampionshipResult<()> {
        if self.ledger.round() > 0 && !self.format.allows_late_registration() {
            return Err(ChampionshipError::RegistrationClosed(self.variant()));
        }
        self.registry.add(name, number)
    }

    /// Move an active player to the removed set. Their history and score stay.
    pub fn remove_player(&mut self, name: &str) -> ChampionshipResult<()> {
        self.registry.remove(name)
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.registry.get(name)
    }

    /// Players matching `filter`, in registration order
    pub fn list_players(&self, filter: PlayerFilter) -> Vec<&Player> {
        self.registry.list(filter)
    }

    /// Record the score of a pairing in the current round and award points.
    ///
    /// # Errors
    ///
    /// - `NoActiveRound` before the first round was generated
    /// - `UnknownPlayer` if either name is not registered
    /// - `NotPaired` if the two are not scheduled against each other
    /// - `AlreadyRecorded` if this pairing already has a result
    /// - `DrawNotAllowed` for a tied elimination match
    pub fn record_result(
        &mut self,
        player_a: &str,
        player_b: &str,
        score_a: u32,
        score_b: u32,
    ) -> ChampionshipResult<()> {
        if self.ledger.round() == 0 {
            return Err(ChampionshipError::NoActiveRound);
        }
        for name in [player_a, player_b] {
            if !self.registry.contains(name) {
                return Err(ChampionshipError::UnknownPlayer(name.to_string()));
            }
        }
        if !self.pending.iter().any(|p| p.is_between(player_a, player_b)) {
            return Err(ChampionshipError::NotPaired {
                player_a: player_a.to_string(),
                player_b: player_b.to_string(),
            });
        }
        if self.ledger.current_result(player_a, player_b).is_some() {
            return Err(ChampionshipError::AlreadyRecorded {
                player_a: player_a.to_string(),
                player_b: player_b.to_string(),
            });
        }
        if score_a == score_b && !self.format.allows_draws() {
            return Err(ChampionshipError::DrawNotAllowed);
        }

        let (points_a, points_b) = self.config.scoring.points_for(score_a, score_b);
        self.registry.add_points(player_a, points_a)?;
        self.registry.add_points(player_b, points_b)?;
        self.ledger
            .record(MatchResult::new(player_a, player_b, score_a, score_b));
        log::debug!(
            "Round {}: {player_a} {score_a} - {score_b} {player_b}",
            self.ledger.round()
        );
        Ok(())
    }

    /// Pairings of the current round still waiting for a result
    pub fn unresolved_pairings(&self) -> Vec<&Pairing> {
        self.pending
            .iter()
            .filter(|p| {
                self.ledger
                    .current_result(&p.player_a, &p.player_b)
                    .is_none()
            })
            .collect()
    }

    /// Generate the next round's pairings and make them pending.
    ///
    /// An empty pairing list means the championship is over; it is then
    /// marked finished.
    ///
    /// # Errors
    ///
    /// - `AlreadyFinished` once the championship has concluded
    /// - `InvalidRoundState` while current pairings lack results
    pub fn advance_round(&mut self) -> ChampionshipResult<RoundPairings> {
        if self.finished {
            return Err(ChampionshipError::AlreadyFinished);
        }
        let pending = self.unresolved_pairings().len();
        if pending > 0 {
            return Err(ChampionshipError::InvalidRoundState { pending });
        }

        let round = self
            .format
            .next_pairings(&mut self.registry, &self.ledger, &self.config)?;
        self.ledger.open_round();
        self.pending = round.pairings.clone();
        self.unpaired = round.unpaired.clone();

        if round.is_empty() {
            self.finished = true;
            log::info!(
                "Championship {} ({}) finished after round {}",
                self.id,
                self.variant(),
                self.ledger.round() - 1
            );
        } else {
            log::info!(
                "Championship {} round {}: {} pairing(s)",
                self.id,
                round.round,
                round.pairings.len()
            );
        }
        Ok(round)
    }

    /// Record every result of the current round, then advance.
    ///
    /// `results` must cover exactly the pending pairings; otherwise nothing is
    /// recorded and `InvalidRoundState` is returned.
    pub fn submit_round(&mut self, results: &[MatchResult]) -> ChampionshipResult<RoundPairings> {
        if self.ledger.round() == 0 {
            return Err(ChampionshipError::NoActiveRound);
        }
        let unresolved = self.unresolved_pairings();
        let covers_all = results.len() == unresolved.len()
            && unresolved.iter().all(|p| {
                results
                    .iter()
                    .any(|r| p.is_between(&r.player_a, &r.player_b))
            });
        if !covers_all {
            return Err(ChampionshipError::InvalidRoundState {
                pending: unresolved.len(),
            });
        }
        if !self.format.allows_draws() && results.iter().any(|r| r.score_a == r.score_b) {
            return Err(ChampionshipError::DrawNotAllowed);
        }

        for result in results {
            self.record_result(
                &result.player_a,
                &result.player_b,
                result.score_a,
                result.score_b,
            )?;
        }
        self.advance_round()
    }

    /// Pairings of the current round
    pub fn pending_pairings(&self) -> &[Pairing] {
        &self.pending
    }

    /// Active players left without an opponent this round
    pub fn unpaired_players(&self) -> &[String] {
        &self.unpaired
    }

    /// All players, highest score first, ties in registration order
    pub fn standings(&self) -> Vec<Standing> {
        self.registry.standings()
    }

    /// Results recorded in `round`
    pub fn results(&self, round: u32) -> &[MatchResult] {
        self.ledger.results(round)
    }

    /// Every pair of players that has met, as sorted name pairs
    pub fn match_history(&self) -> &BTreeSet<(String, String)> {
        self.ledger.history()
    }

    /// Winner once the championship is finished
    pub fn champion(&self) -> Option<String> {
        if !self.finished {
            return None;
        }
        self.format.champion(&self.registry)
    }
}
