//! Player registry: who is registered, who is still active, and their scores.

use serde::{Deserialize, Serialize};

use super::{
    errors::{ChampionshipError, ChampionshipResult},
    models::{Player, PlayerFilter, PlayerStatus, Standing},
};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Registry {
    /// Every player ever registered, in registration order
    players: Vec<Player>,
    /// Active players in pairing order (shuffled once by elimination seeding)
    active: Vec<String>,
}

impl Registry {
    pub fn add(&mut self, name: &str, number: Option<u32>) -> ChampionshipResult<()> {
        if self.get(name).is_some() {
            return Err(ChampionshipError::DuplicatePlayer(name.to_string()));
        }
        self.players.push(Player::new(name.to_string(), number));
        self.active.push(name.to_string());
        log::debug!("Registered player {name}");
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> ChampionshipResult<()> {
        let position = self
            .active
            .iter()
            .position(|active| active == name)
            .ok_or_else(|| ChampionshipError::UnknownPlayer(name.to_string()))?;
        self.active.remove(position);
        if let Some(player) = self.get_mut(name) {
            player.status = PlayerStatus::Removed;
        }
        log::debug!("Removed player {name}");
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.get(name).is_some_and(Player::is_active)
    }

    /// Players matching `filter`, in registration order
    pub fn list(&self, filter: PlayerFilter) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| match filter {
                PlayerFilter::All => true,
                PlayerFilter::Active => p.status == PlayerStatus::Active,
                PlayerFilter::Removed => p.status == PlayerStatus::Removed,
            })
            .collect()
    }

    /// Active player names in pairing order
    pub fn active(&self) -> &[String] {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut Vec<String> {
        &mut self.active
    }

    pub fn score(&self, name: &str) -> Option<i64> {
        self.get(name).map(|p| p.score)
    }

    pub fn add_points(&mut self, name: &str, points: i64) -> ChampionshipResult<()> {
        let player = self
            .get_mut(name)
            .ok_or_else(|| ChampionshipError::UnknownPlayer(name.to_string()))?;
        player.score += points;
        Ok(())
    }

    /// Every player sorted by score, highest first. Ties keep registration order.
    pub fn standings(&self) -> Vec<Standing> {
        let mut ranked: Vec<&Player> = self.players.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
            .into_iter()
            .enumerate()
            .map(|(idx, p)| Standing {
                position: idx + 1,
                name: p.name.clone(),
                number: p.number,
                score: p.score,
                status: p.status,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
