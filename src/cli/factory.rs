//! Builds boxed agents from command-line choices

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result, anyhow};

use super::config::{AgentKind, LearnerOverrides};
use crate::{
    agents::{BlendedAgent, FixedOrderAgent, HumanAgent, LookupAgent, RandomAgent, StdinInput},
    ports::Agent,
    solver::{SavedTable, Solver, TableKind},
    td::{LearnerConfig, LearningAgent, SavedLearner},
    tictactoe::Player,
    value_table::ValueTable,
};

/// Creates agents on demand, loading or solving the shared table once
pub struct AgentFactory {
    table_path: Option<PathBuf>,
    table: Option<Arc<ValueTable>>,
    trigger: usize,
    learner_path: Option<PathBuf>,
    learner_overrides: LearnerOverrides,
}

impl AgentFactory {
    pub fn new(table_path: Option<PathBuf>, trigger: usize) -> Self {
        Self {
            table_path,
            table: None,
            trigger,
            learner_path: None,
            learner_overrides: LearnerOverrides::default(),
        }
    }

    /// Load learners from a saved file instead of starting fresh
    pub fn with_learner_path(mut self, path: Option<PathBuf>) -> Self {
        self.learner_path = path;
        self
    }

    /// Settings applied over the defaults, or over a restored learner's own
    pub fn with_learner_overrides(mut self, overrides: LearnerOverrides) -> Self {
        self.learner_overrides = overrides;
        self
    }

    /// The solved table, read from disk when a path was given
    pub fn table(&mut self) -> Result<Arc<ValueTable>> {
        if let Some(table) = &self.table {
            return Ok(Arc::clone(table));
        }
        let table = match &self.table_path {
            Some(path) => SavedTable::load_from_file(path)?.into_table(TableKind::Solved)?,
            None => {
                log::info!("no table file given, solving in memory");
                Solver::new().solve()
            }
        };
        let table = Arc::new(table);
        self.table = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Build a fresh or restored learner for `player`
    pub fn learner(&self, player: Player) -> Result<LearningAgent> {
        let agent = match &self.learner_path {
            Some(path) => SavedLearner::load_from_file(path)?.to_agent()?,
            None => {
                let config = self.learner_overrides.apply(LearnerConfig::default());
                return Ok(LearningAgent::new(player, config)?);
            }
        };
        if agent.player() != player {
            return Err(anyhow!(
                "Saved learner plays {}, but it was seated as {player}",
                agent.player()
            ));
        }
        let config = self.learner_overrides.apply(agent.config().clone());
        agent
            .with_config(config)
            .context("Invalid learner settings for the restored learner")
    }

    pub fn build(&mut self, kind: AgentKind, player: Player) -> Result<Box<dyn Agent>> {
        let agent: Box<dyn Agent> = match kind {
            AgentKind::Human => Box::new(HumanAgent::new(player, Box::new(StdinInput::new()))),
            AgentKind::Fixed => Box::new(FixedOrderAgent::new(player)),
            AgentKind::Random => Box::new(RandomAgent::new(player)),
            AgentKind::Lookup => Box::new(LookupAgent::new(player, self.table()?)),
            AgentKind::Blended => Box::new(
                BlendedAgent::new(player, self.table()?, self.trigger)
                    .context("Invalid blended trigger cell")?,
            ),
            AgentKind::Learner => Box::new(self.learner(player)?),
        };
        Ok(agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_every_non_interactive_kind() -> Result<()> {
        let mut factory = AgentFactory::new(None, 4);
        for kind in [
            AgentKind::Fixed,
            AgentKind::Random,
            AgentKind::Lookup,
            AgentKind::Blended,
            AgentKind::Learner,
        ] {
            let agent = factory.build(kind, Player::X)?;
            assert_eq!(agent.player(), Player::X);
        }
        Ok(())
    }

    #[test]
    fn test_reads_saved_table() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("solved.msgpack");
        SavedTable::solved(Solver::new().solve()).save_to_file(&path)?;

        let mut factory = AgentFactory::new(Some(path), 4);
        assert_eq!(factory.table()?.len(), 5478);
        Ok(())
    }

    #[test]
    fn test_rejects_bad_trigger() {
        let mut factory = AgentFactory::new(None, 11);
        assert!(factory.build(AgentKind::Blended, Player::O).is_err());
    }
}
