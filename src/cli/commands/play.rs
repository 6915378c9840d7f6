//! Play command - seat two agents and play one or more games

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;

use crate::{
    cli::{
        config::AgentKind,
        factory::AgentFactory,
        output::{print_report, print_section},
    },
    pipeline::{LogObserver, Observer, Processor, ProcessorConfig},
    tictactoe::{Board, Game, GameOutcome, Move, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Play games between two agents")]
pub struct PlayArgs {
    /// Agent playing O (moves first)
    #[arg(long, value_enum, default_value = "human")]
    pub first: AgentKind,

    /// Agent playing X
    #[arg(long, value_enum, default_value = "lookup")]
    pub second: AgentKind,

    /// Solved table; solved in memory when omitted
    #[arg(long)]
    pub table: Option<PathBuf>,

    /// Trigger cell for blended agents
    #[arg(long, default_value_t = 4)]
    pub trigger: usize,

    /// Saved learner to seat for `learner` agents
    #[arg(long)]
    pub learner: Option<PathBuf>,

    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 1)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Runs of up to this many games print every final board
const SHOWN_GAMES: usize = 5;

/// Prints the final board and result of every game
#[derive(Default)]
struct ShowGames {
    board: Board,
}

impl Observer for ShowGames {
    fn on_episode_start(&mut self, _episode: usize) -> crate::Result<()> {
        self.board = Board::new();
        Ok(())
    }

    fn on_move(&mut self, _episode: usize, _step: usize, before: &Board, mv: Move) -> crate::Result<()> {
        self.board = before.with_mark(mv.position, mv.player);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, outcome: GameOutcome) -> crate::Result<()> {
        println!("\nGame {}\n{}", episode + 1, self.board.render());
        match outcome {
            GameOutcome::Win(winner) => println!("{winner} wins"),
            GameOutcome::Draw => println!("draw"),
        }
        Ok(())
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    if args.games == 0 {
        return Err(anyhow!("--games must be at least 1"));
    }

    let mut factory =
        AgentFactory::new(args.table.clone(), args.trigger).with_learner_path(args.learner.clone());
    let mut first = factory.build(args.first, Player::O)?;
    let mut second = factory.build(args.second, Player::X)?;

    print_section(&format!("{} vs {}", first.name(), second.name()));

    let mut game = Game::new(vec![first.as_mut(), second.as_mut()])?;
    let mut config = ProcessorConfig::default().with_window(args.games);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    let mut processor =
        Processor::new(config)?.with_observer(Box::new(LogObserver::new(Player::O)));

    let interactive = args.first == AgentKind::Human || args.second == AgentKind::Human;
    if interactive || args.games <= SHOWN_GAMES {
        processor = processor.with_observer(Box::new(ShowGames::default()));
    }

    let report = processor.run(&mut game, args.games)?;
    if args.games > 1 {
        print_report(&report);
    }
    Ok(())
}
