//! Append-only record of rounds, results and the pairs that already met.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::models::{MatchResult, pair_key};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ledger {
    /// Current round, 0 before the first pairing
    round: u32,
    /// Results per round, one entry for every round from 1
    results: BTreeMap<u32, Vec<MatchResult>>,
    /// Unordered pairs that have played each other
    history: BTreeSet<(String, String)>,
}

impl Ledger {
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Move to the next round with an empty result list
    pub fn open_round(&mut self) -> u32 {
        self.round += 1;
        self.results.insert(self.round, Vec::new());
        self.round
    }

    /// Append a result to the current round and the global history
    pub fn record(&mut self, result: MatchResult) {
        self.history
            .insert(pair_key(&result.player_a, &result.player_b));
        self.results.entry(self.round).or_default().push(result);
    }

    pub fn results(&self, round: u32) -> &[MatchResult] {
        self.results.get(&round).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn current_results(&self) -> &[MatchResult] {
        self.results(self.round)
    }

    /// Result for `a` vs `b` in the current round, in either order
    pub fn current_result(&self, a: &str, b: &str) -> Option<&MatchResult> {
        self.current_results()
            .iter()
            .find(|r| r.pairing().is_between(a, b))
    }

    pub fn has_played(&self, a: &str, b: &str) -> bool {
        self.history.contains(&pair_key(a, b))
    }

    pub fn history(&self) -> &BTreeSet<(String, String)> {
        &self.history
    }

    /// Every recorded result in round order
    pub fn all_results(&self) -> impl Iterator<Item = (u32, &MatchResult)> {
        self.results
            .iter()
            .flat_map(|(round, results)| results.iter().map(move |r| (*round, r)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_round_allocates_empty_results() {
        let mut ledger = Ledger::default();
        assert_eq!(ledger.round(), 0);
        assert!(ledger.current_results().is_empty());

        assert_eq!(ledger.open_round(), 1);
        assert_eq!(ledger.open_round(), 2);
        assert!(ledger.results(1).is_empty());
        assert!(ledger.results(2).is_empty());
    }

    #[test]
    fn test_record_updates_round_and_history() {
        let mut ledger = Ledger::default();
        ledger.open_round();
        ledger.record(MatchResult::new("Bo", "Ana", 2, 1));

        assert_eq!(ledger.results(1).len(), 1);
        assert!(ledger.has_played("Ana", "Bo"));
        assert!(ledger.has_played("Bo", "Ana"));
        assert!(!ledger.has_played("Ana", "Cy"));
        assert!(ledger.current_result("Ana", "Bo").is_some());

        ledger.open_round();
        assert!(ledger.current_result("Ana", "Bo").is_none());
        assert!(ledger.has_played("Ana", "Bo"));
    }

    #[test]
    fn test_all_results_in_round_order() {
        let mut ledger = Ledger::default();
        ledger.open_round();
        ledger.record(MatchResult::new("Ana", "Bo", 1, 0));
        ledger.open_round();
        ledger.record(MatchResult::new("Ana", "Cy", 0, 1));

        let rounds: Vec<u32> = ledger.all_results().map(|(round, _)| round).collect();
        assert_eq!(rounds, vec![1, 2]);
    }
}
