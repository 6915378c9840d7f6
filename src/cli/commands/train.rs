//! Train command - train a temporal-difference learner against an opponent

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use crate::{
    cli::{
        config::{AgentKind, TrainConfig, parse_player},
        factory::AgentFactory,
        output::{format_number, print_kv, print_report, print_section},
    },
    pipeline::{LogObserver, Processor, ProcessorConfig, ProgressObserver},
    ports::Agent,
    solver::SavedTable,
    td::{LearnerConfig, LearningRate, SavedLearner},
    tictactoe::{Game, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Train a learner")]
pub struct TrainArgs {
    /// JSON file with a full training configuration; flags override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of training episodes
    #[arg(long, short = 'g')]
    pub episodes: Option<usize>,

    /// Episodes per reporting window
    #[arg(long, short = 'w')]
    pub window: Option<usize>,

    /// Opponent to train against
    #[arg(long, value_enum)]
    pub opponent: Option<AgentKind>,

    /// Which mark the learner places (`o` or `x`)
    #[arg(long, value_parser = parse_player)]
    pub player: Option<Player>,

    /// Probability of exploiting instead of exploring
    #[arg(long)]
    pub greedy: Option<f64>,

    /// Constant learning rate, replacing the decay schedule
    #[arg(long)]
    pub rate: Option<f64>,

    /// Trigger cell for a blended opponent
    #[arg(long)]
    pub trigger: Option<usize>,

    /// Solved table for lookup and blended opponents
    #[arg(long)]
    pub table: Option<PathBuf>,

    /// Continue training a saved learner
    #[arg(long)]
    pub resume: Option<PathBuf>,

    /// Output file for the trained learner
    #[arg(long, short = 'O')]
    pub save: Option<PathBuf>,

    /// Output file for the learned values as a table
    #[arg(long)]
    pub export_values: Option<PathBuf>,

    /// Optional path for writing a JSON run report
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide the progress bar
    #[arg(long)]
    pub quiet: bool,
}

impl TrainArgs {
    /// Merge the optional config file with command-line overrides
    pub fn resolve(&self) -> Result<TrainConfig> {
        let mut config = match &self.config {
            Some(path) => TrainConfig::load_from_file(path)?,
            None => TrainConfig::default(),
        };
        if let Some(episodes) = self.episodes {
            config.episodes = episodes;
        }
        if let Some(window) = self.window {
            config.window = window;
        }
        if let Some(opponent) = self.opponent {
            config.opponent = opponent;
        }
        if let Some(player) = self.player {
            config.player = player;
        }
        if let Some(greedy) = self.greedy {
            config.learner.greedy = Some(greedy);
        }
        if let Some(rate) = self.rate {
            config.learner.learning_rate = Some(LearningRate::constant(rate));
        }
        if let Some(trigger) = self.trigger {
            config.trigger = trigger;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
            config.learner.seed = Some(seed);
        }
        config.learner.apply(LearnerConfig::default()).validate()?;
        Ok(config)
    }
}

fn agent_factory(args: &TrainArgs, config: &TrainConfig) -> AgentFactory {
    AgentFactory::new(args.table.clone(), config.trigger)
        .with_learner_path(args.resume.clone())
        .with_learner_overrides(config.learner.clone())
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.resolve()?;
    if config.opponent == AgentKind::Human {
        return Err(anyhow!("Training against a human opponent is not supported"));
    }

    let mut factory = agent_factory(&args, &config);
    let mut learner = factory.learner(config.player)?;
    let mut opponent = factory.build(config.opponent, config.player.opponent())?;

    print_section("Training");
    print_kv("Learner", learner.name());
    print_kv("Opponent", opponent.name());
    print_kv("Episodes", &format_number(config.episodes));
    print_kv("Rounds so far", &format_number(learner.rounds() as usize));

    let mut processor_config = ProcessorConfig::default()
        .with_window(config.window)
        .with_tracked(config.player);
    if let Some(seed) = config.seed {
        processor_config = processor_config.with_seed(seed);
    }
    let mut processor = Processor::new(processor_config)?
        .with_observer(Box::new(LogObserver::new(config.player)));
    if !args.quiet {
        processor = processor.with_observer(Box::new(ProgressObserver::new(config.player)));
    }

    let report = {
        let agents: Vec<&mut dyn Agent> = match config.player {
            Player::O => vec![&mut learner, opponent.as_mut()],
            Player::X => vec![opponent.as_mut(), &mut learner],
        };
        let mut game = Game::new(agents)?;
        processor.run(&mut game, config.episodes)?
    };

    print_report(&report);
    print_kv("Final rate", &format!("{:.4}", learner.current_rate()));

    if let Some(path) = &args.report {
        report
            .save(path)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        print_kv("Report", &path.display().to_string());
    }
    if let Some(path) = &args.save {
        SavedLearner::from_agent(&learner).save_to_file(path)?;
        print_kv("Learner saved", &path.display().to_string());
    }
    if let Some(path) = &args.export_values {
        SavedTable::learned(learner.into_values()).save_to_file(path)?;
        print_kv("Values saved", &path.display().to_string());
    }
    Ok(())
}
