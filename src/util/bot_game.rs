//! Utilities to run bots against each other and report the results.
//!
//! Mostly used to check that the difficulty levels are actually ordered by strength,
//! see [run_difficulty_match].
use std::fmt::Write;
use std::fmt::{Debug, Formatter};
use std::sync::Mutex;
use std::time::Instant;

use log::info;
use rayon::iter::IntoParallelIterator;
use rayon::iter::ParallelIterator;

use crate::ai::difficulty::{Difficulty, DifficultyBot, SearchConfig};
use crate::ai::Bot;
use crate::board::{Board, Mark, Outcome, PlayError};
use crate::games::uttt::GameState;
use crate::util::rating::elo_from_wdl;
use crate::util::tiny::seeded_rng;
use crate::wdl::{POV, WDL};

/// Run bots built by `bot_l` against bots built by `bot_r`, starting every game from `start`.
///
/// `games_per_side` games are played with each bot moving first, so `2 * games_per_side` games in total.
/// The bot constructors get the index of the game, which can be used to seed their rng.
pub fn run<B: Board, L: Bot<B>, R: Bot<B>>(
    start: &B,
    bot_l: impl Fn(u32) -> L + Sync,
    bot_r: impl Fn(u32) -> R + Sync,
    games_per_side: u32,
) -> Result<BotGameResult<B>, PlayError> {
    // this instantiates both at least once so we catch errors before starting a bunch of threads
    let debug_l = debug_to_string(&bot_l(0));
    let debug_r = debug_to_string(&bot_r(0));

    let game_count = 2 * games_per_side;
    let partial_wdl = Mutex::new(WDL::<u32>::default());

    let replays: Vec<Replay<B>> = (0..game_count)
        .into_par_iter()
        .panic_fuse()
        .map(|game_i| -> Result<Replay<B>, PlayError> {
            let flip = game_i % 2 == 1;
            let replay = play_single_game(start, flip, &mut bot_l(game_i), &mut bot_r(game_i))?;

            let mut partial_wdl = partial_wdl.lock().unwrap();
            *partial_wdl += replay.outcome.pov(replay.mark_l).to_wdl();
            info!("finished game {}, left {:?}", game_i, *partial_wdl);

            Ok(replay)
        })
        .collect::<Result<_, PlayError>>()?;

    let total_time_l = replays.iter().map(|r| r.total_time_l).sum::<f32>();
    let total_time_r = replays.iter().map(|r| r.total_time_r).sum::<f32>();
    let move_count_l = replays.iter().map(|r| r.move_count_l).sum::<u32>();
    let move_count_r = replays.iter().map(|r| r.move_count_r).sum::<u32>();

    Ok(BotGameResult {
        game_count,
        average_game_length: replays.iter().map(|r| r.moves.len() as f32).sum::<f32>() / game_count as f32,
        wdl_l: replays.iter().map(|r| r.outcome.pov(r.mark_l).to_wdl()).sum(),
        time_l: total_time_l / move_count_l.max(1) as f32,
        time_r: total_time_r / move_count_r.max(1) as f32,
        debug_l,
        debug_r,
        replays,
    })
}

/// Play two difficulty levels against each other from the empty board.
/// Every game gets its own seeded rng so the match is reproducible.
pub fn run_difficulty_match(
    config: &SearchConfig,
    left: Difficulty,
    right: Difficulty,
    max_moves: Option<u32>,
    games_per_side: u32,
    seed: u64,
) -> Result<BotGameResult<GameState>, PlayError> {
    let start = GameState::new().with_max_moves(max_moves);
    run(
        &start,
        |i| DifficultyBot::new(left, config.clone(), seeded_rng(seed.wrapping_add(2 * i as u64))),
        |i| DifficultyBot::new(right, config.clone(), seeded_rng(seed.wrapping_add(2 * i as u64 + 1))),
        games_per_side,
    )
}

fn play_single_game<B: Board>(
    start: &B,
    flip: bool,
    bot_l: &mut impl Bot<B>,
    bot_r: &mut impl Bot<B>,
) -> Result<Replay<B>, PlayError> {
    let mut board = start.clone();
    let mark_l = if flip {
        board.next_player().other()
    } else {
        board.next_player()
    };

    let mut total_time_l = 0.0;
    let mut total_time_r = 0.0;
    let mut move_count_l: u32 = 0;
    let mut move_count_r: u32 = 0;
    let mut moves = vec![];

    loop {
        match board.outcome() {
            None => {
                let start_time = Instant::now();
                let mv = if board.next_player() == mark_l {
                    let mv = bot_l.select_move(&board)?;
                    total_time_l += start_time.elapsed().as_secs_f32();
                    move_count_l += 1;
                    mv
                } else {
                    let mv = bot_r.select_move(&board)?;
                    total_time_r += start_time.elapsed().as_secs_f32();
                    move_count_r += 1;
                    mv
                };

                moves.push(mv);
                board.play(mv)?;
            }
            Some(outcome) => {
                return Ok(Replay {
                    start: start.clone(),
                    mark_l,
                    moves,
                    outcome,
                    total_time_l,
                    total_time_r,
                    move_count_l,
                    move_count_r,
                });
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Replay<B: Board> {
    pub start: B,
    pub mark_l: Mark,

    pub moves: Vec<B::Move>,
    pub outcome: Outcome,

    pub total_time_l: f32,
    pub total_time_r: f32,
    pub move_count_l: u32,
    pub move_count_r: u32,
}

/// Structure returned by [run].
pub struct BotGameResult<B: Board> {
    pub game_count: u32,
    pub replays: Vec<Replay<B>>,

    pub average_game_length: f32,
    pub wdl_l: WDL<u32>,

    // time per move in seconds
    pub time_l: f32,
    pub time_r: f32,

    pub debug_l: String,
    pub debug_r: String,
}

impl<B: Board> BotGameResult<B> {
    pub fn elo_l(&self) -> f32 {
        elo_from_wdl(self.wdl_l.cast::<f32>())
    }
}

impl<B: Board> Debug for BotGameResult<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "BotGameResult {{")?;
        writeln!(
            f,
            "  {} games, average length {}",
            self.game_count, self.average_game_length
        )?;
        writeln!(f, "  left      {:?}", self.wdl_l)?;
        writeln!(
            f,
            "  left      {:.3?}",
            self.wdl_l.cast::<f32>() / self.game_count as f32
        )?;
        writeln!(f, "  left elo: {:.1}", self.elo_l())?;
        writeln!(f, "  time_l:   {:.4}, time_r: {:.4}", self.time_l, self.time_r)?;
        writeln!(f, "  left:     {}", self.debug_l)?;
        writeln!(f, "  right:    {}", self.debug_r)?;
        writeln!(f, "}}")?;

        Ok(())
    }
}

fn debug_to_string(d: &impl Debug) -> String {
    let mut s = String::new();
    write!(&mut s, "{:?}", d).unwrap();
    s
}
