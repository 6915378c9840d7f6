//! Serialization support for trained learners.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use super::agent::{LearnerState, LearningAgent};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedLearner {
    pub version: u32,
    state: LearnerState,
}

impl SavedLearner {
    pub const VERSION: u32 = 1;

    pub fn from_agent(agent: &LearningAgent) -> Self {
        Self {
            version: Self::VERSION,
            state: agent.export_state(),
        }
    }

    /// Rounds the saved learner had completed
    pub fn rounds(&self) -> u64 {
        self.state.rounds
    }

    pub fn to_agent(&self) -> Result<LearningAgent> {
        if self.version != Self::VERSION {
            return Err(anyhow!(
                "Unsupported learner save format version: {}. Expected {}",
                self.version,
                Self::VERSION
            ));
        }
        LearningAgent::from_state(self.state.clone()).context("Saved learner config is invalid")
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create file: {}", path.as_ref().display()))?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, self).context("Failed to serialize learner")?;

        log::info!(
            "saved learner after {} rounds to {}",
            self.state.rounds,
            path.as_ref().display()
        );
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;
        let reader = BufReader::new(file);

        rmp_serde::decode::from_read(reader).context("Failed to deserialize learner")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        agents::RandomAgent,
        ports::Agent,
        td::LearnerConfig,
        tictactoe::{Game, Player},
    };

    fn trained() -> LearningAgent {
        let mut agent =
            LearningAgent::new(Player::O, LearnerConfig::default().with_seed(21)).unwrap();
        let mut opponent = RandomAgent::with_seed(Player::X, 22);
        for _ in 0..20 {
            let mut game = Game::new(vec![&mut agent, &mut opponent]).unwrap();
            game.initialize_agents().unwrap();
            while !game.finished() {
                game.next().unwrap();
            }
            let outcome = game.result().unwrap();
            game.finalize_agents(outcome).unwrap();
        }
        agent
    }

    #[test]
    fn test_learner_roundtrip() -> Result<()> {
        let agent = trained();
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("learner.msgpack");

        SavedLearner::from_agent(&agent).save_to_file(&path)?;
        let loaded = SavedLearner::load_from_file(&path)?;
        assert_eq!(loaded.rounds(), 20);

        let restored = loaded.to_agent()?;
        assert_eq!(restored.player(), Player::O);
        assert_eq!(restored.rounds(), agent.rounds());
        assert_eq!(restored.values(), agent.values());
        assert_eq!(restored.config(), agent.config());
        Ok(())
    }

    #[test]
    fn test_rejects_unknown_version() {
        let mut saved = SavedLearner::from_agent(&trained());
        saved.version = SavedLearner::VERSION + 1;
        assert!(saved.to_agent().is_err());
    }
}
