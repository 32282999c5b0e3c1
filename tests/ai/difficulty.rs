use std::collections::HashSet;

use ultimate_ttt::ai::difficulty::{choose_move, Difficulty, DifficultyBot, SearchConfig};
use ultimate_ttt::ai::simple::RandomBot;
use ultimate_ttt::ai::Bot;
use ultimate_ttt::board::{Board, BoardDone, Mark, Outcome};
use ultimate_ttt::config::ConfigError;
use ultimate_ttt::games::uttt::{apply_move, legal_moves, GameState, Move};
use ultimate_ttt::util::game_stats::average_game_stats;
use ultimate_ttt::util::tiny::{consistent_rng, seeded_rng};

use crate::ai::{o_can_win_sub_board, state_with};
use crate::util::init_logger;

#[test]
fn hard_takes_sub_board_win() {
    init_logger();
    let state = o_can_win_sub_board();
    let before = state.clone();

    let mv = choose_move(&state, Mark::O, Difficulty::Hard, &mut consistent_rng());
    assert_eq!(mv, Some(Move::new(2, 2)));
    assert_eq!(state, before, "search modified the state");
}

#[test]
fn medium_takes_sub_board_win() {
    let mv = choose_move(&o_can_win_sub_board(), Mark::O, Difficulty::Medium, &mut consistent_rng());
    assert_eq!(mv, Some(Move::new(2, 2)));
}

#[test]
fn hard_is_deterministic() {
    let state = apply_move(&GameState::new(), Move::new(4, 4), Mark::X).unwrap();

    let first = choose_move(&state, Mark::O, Difficulty::Hard, &mut seeded_rng(1));
    for seed in 2..6 {
        assert_eq!(choose_move(&state, Mark::O, Difficulty::Hard, &mut seeded_rng(seed)), first);
    }
    assert_eq!(first, Some(Move::new(4, 0)));
}

#[test]
fn easy_is_random() {
    let state = GameState::new();
    let mut rng = consistent_rng();

    let moves: HashSet<Move> = (0..100)
        .map(|_| choose_move(&state, Mark::X, Difficulty::Easy, &mut rng).unwrap())
        .collect();
    assert!(moves.len() > 1, "easy bot always played {:?}", moves);

    let legal = legal_moves(&state);
    assert!(moves.iter().all(|mv| legal.contains(mv)));
}

#[test]
fn easy_without_randomness_searches() {
    let config = SearchConfig {
        easy_random_move_probability: 0.0,
        ..SearchConfig::default()
    };
    let mut rng = consistent_rng();

    for _ in 0..10 {
        let mv = config.choose_move(&o_can_win_sub_board(), Mark::O, Difficulty::Easy, &mut rng);
        assert_eq!(mv, Some(Move::new(2, 2)));
    }
}

#[test]
fn easy_search_sees_the_reply() {
    // O can win sub-board 4 at cell 2, but that sends X to sub-board 2 where (2, 5) wins the game
    let state = GameState::from_compact_str(
        "xxx....../xxx....../...xx..../o......../oo......./........./........./........./......... 4 o",
    )
    .unwrap();
    let config = SearchConfig {
        easy_random_move_probability: 0.0,
        ..SearchConfig::default()
    };

    let mv = config
        .choose_move(&state, Mark::O, Difficulty::Easy, &mut consistent_rng())
        .unwrap();
    assert_ne!(mv, Move::new(4, 2));
    assert_eq!(mv, Move::new(4, 4));

    let after = apply_move(&state, mv, Mark::O).unwrap();
    for reply in legal_moves(&after) {
        let next = apply_move(&after, reply, Mark::X).unwrap();
        assert_ne!(next.outcome(), Some(Outcome::WonBy(Mark::X)), "X wins with {:?}", reply);
    }
}

#[test]
fn always_legal_from_forced_board() {
    let state = state_with(&[(4, 4, Mark::X), (4, 0, Mark::O)], Some(0), Mark::X);
    let legal = legal_moves(&state);
    let mut rng = consistent_rng();

    for difficulty in Difficulty::ALL {
        for _ in 0..10 {
            let mv = choose_move(&state, Mark::X, difficulty, &mut rng).unwrap();
            assert!(legal.contains(&mv), "{:?} picked illegal move {:?}", difficulty, mv);
        }
    }
}

#[test]
fn done_state_has_no_move() {
    let marks: Vec<_> = (0..3).flat_map(|b| (0..3).map(move |c| (b, c, Mark::X))).collect();
    let state = state_with(&marks, None, Mark::O);

    for difficulty in Difficulty::ALL {
        assert_eq!(choose_move(&state, Mark::O, difficulty, &mut consistent_rng()), None);
    }

    let mut bot = DifficultyBot::new(Difficulty::Hard, SearchConfig::default(), consistent_rng());
    assert_eq!(bot.select_move(&state), Err(BoardDone));
}

#[test]
#[should_panic]
fn wrong_mark_panics() {
    choose_move(&GameState::new(), Mark::O, Difficulty::Hard, &mut consistent_rng());
}

#[test]
fn config_depths() {
    let config = SearchConfig::default();
    assert_eq!(config.depth(Difficulty::Easy), 1);
    assert_eq!(config.depth(Difficulty::Medium), 2);
    assert_eq!(config.depth(Difficulty::Hard), 3);
    assert_eq!(config.random_move_probability(Difficulty::Easy), 0.7);
    assert_eq!(config.random_move_probability(Difficulty::Hard), 0.0);
    assert!(config.validate().is_ok());

    let zero = SearchConfig {
        medium_depth: 0,
        ..SearchConfig::default()
    };
    assert!(matches!(zero.validate(), Err(ConfigError::ZeroDepth(Difficulty::Medium))));

    let probability = SearchConfig {
        easy_random_move_probability: 1.5,
        ..SearchConfig::default()
    };
    assert!(matches!(probability.validate(), Err(ConfigError::InvalidProbability(_))));
}

#[test]
fn bot_games_finish() {
    let start = GameState::new().with_max_moves(Some(200));

    let stats = average_game_stats(&start, RandomBot::new(consistent_rng()), 20).unwrap();
    println!("random: {:?}", stats);
    assert!(stats.game_length > 0.0 && stats.game_length <= 200.0);
    assert!(stats.available_moves >= 1.0);

    let bot = DifficultyBot::new(Difficulty::Medium, SearchConfig::default(), consistent_rng());
    let stats = average_game_stats(&start, bot, 2).unwrap();
    println!("medium: {:?}", stats);
    assert!(stats.game_length <= 200.0);
}
