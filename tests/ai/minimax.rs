use ultimate_ttt::ai::minimax::{minimax, minimax_value, Heuristic};
use ultimate_ttt::board::{Board, Mark};
use ultimate_ttt::games::uttt::{apply_move, legal_moves, GameState, Move};
use ultimate_ttt::heuristic::uttt::{HeuristicWeights, UtttHeuristic, WIN_VALUE};
use ultimate_ttt::util::tiny::consistent_rng;

use crate::ai::{o_can_win_sub_board, state_with};

fn heuristic(pov: Mark) -> UtttHeuristic {
    UtttHeuristic::new(pov, HeuristicWeights::default())
}

#[test]
fn heuristic_empty_is_zero() {
    let state = GameState::new();
    assert_eq!(heuristic(Mark::X).evaluate(&state, 0), 0);
    assert_eq!(heuristic(Mark::O).evaluate(&state, 0), 0);
}

#[test]
fn heuristic_line_patterns() {
    let state = apply_move(&GameState::new(), Move::new(4, 4), Mark::X).unwrap();

    // the center cell lies on four lines
    assert_eq!(heuristic(Mark::X).evaluate(&state, 0), 4 * 2);
    assert_eq!(heuristic(Mark::O).evaluate(&state, 0), -4 * 3);

    // `value` is from the POV of the player to move, which is O
    assert_eq!(heuristic(Mark::X).value(&state, 0), -4 * 2);
    assert_eq!(heuristic(Mark::O).value(&state, 0), -4 * 3);
}

#[test]
fn heuristic_won_boards() {
    let weights = HeuristicWeights::default();
    let marks: Vec<_> = (0..3).map(|c| (4, c, Mark::O)).chain((0..3).map(|c| (8, c, Mark::X))).collect();
    let state = state_with(&marks, None, Mark::X);

    let center = weights.won_board + weights.center;
    let corner = weights.won_board + weights.corner;
    assert_eq!(heuristic(Mark::O).evaluate(&state, 0), center - corner);
    assert_eq!(heuristic(Mark::X).evaluate(&state, 0), corner - center);
}

#[test]
fn heuristic_prefers_faster_wins() {
    let marks: Vec<_> = (0..3).flat_map(|b| (0..3).map(move |c| (b, c, Mark::X))).collect();
    let state = state_with(&marks, None, Mark::O);
    assert!(state.is_done());

    assert_eq!(heuristic(Mark::X).evaluate(&state, 1), WIN_VALUE - 1);
    assert_eq!(heuristic(Mark::X).evaluate(&state, 3), WIN_VALUE - 3);
    assert_eq!(heuristic(Mark::O).evaluate(&state, 3), -(WIN_VALUE - 3));
}

#[test]
fn takes_sub_board_win() {
    let state = o_can_win_sub_board();
    let h = heuristic(Mark::O);

    let result = minimax(&state, &h, 1);
    assert_eq!(result.best_move, Some(Move::new(2, 2)));
    assert_eq!(result.value, 230);

    for depth in 2..=3 {
        let result = minimax(&state, &h, depth);
        assert_eq!(result.best_move, Some(Move::new(2, 2)), "depth {}", depth);
        assert!(result.value > 200, "depth {}: {}", depth, result.value);
    }
}

#[test]
fn blocks_sub_board_threat() {
    let state = state_with(
        &[(2, 0, Mark::O), (2, 3, Mark::X), (2, 4, Mark::X), (0, 2, Mark::X)],
        Some(2),
        Mark::O,
    );

    for depth in 1..=3 {
        let result = minimax(&state, &heuristic(Mark::O), depth);
        assert_eq!(result.best_move, Some(Move::new(2, 5)), "depth {}", depth);
    }
}

#[test]
fn takes_game_win() {
    let mut marks: Vec<_> = (0..2).flat_map(|b| (0..3).map(move |c| (b, c, Mark::X))).collect();
    marks.extend([(2, 3, Mark::X), (2, 4, Mark::X), (5, 0, Mark::O), (5, 1, Mark::O), (3, 0, Mark::O)]);
    let state = state_with(&marks, Some(2), Mark::X);

    for depth in 1..=3 {
        let result = minimax(&state, &heuristic(Mark::X), depth);
        assert_eq!(result.best_move, Some(Move::new(2, 5)), "depth {}", depth);
        assert_eq!(result.value, WIN_VALUE - 1, "depth {}", depth);
    }
}

#[test]
fn ties_pick_first_move() {
    // every center cell is worth the same, the first one in move order wins
    let result = minimax(&GameState::new(), &heuristic(Mark::X), 1);
    assert_eq!(result.best_move, Some(Move::new(0, 4)));
    assert_eq!(result.value, 8);
}

#[test]
fn depth_zero_and_done() {
    let state = GameState::new();
    let result = minimax(&state, &heuristic(Mark::X), 0);
    assert_eq!(result.best_move, None);
    assert_eq!(result.value, 0);

    let marks: Vec<_> = (0..3).flat_map(|b| (0..3).map(move |c| (b, c, Mark::X))).collect();
    let done = state_with(&marks, None, Mark::O);
    let result = minimax(&done, &heuristic(Mark::O), 3);
    assert_eq!(result.best_move, None);
    assert_eq!(result.value, -WIN_VALUE);
}

#[test]
fn alpha_beta_matches_full_search() {
    let mut rng = consistent_rng();

    for _ in 0..20 {
        let mut state = GameState::new();
        for _ in 0..12 {
            if state.is_done() {
                break;
            }
            let mv = state.random_available_move(&mut rng).unwrap();
            state.play(mv).unwrap();
        }
        if state.is_done() {
            continue;
        }

        let h = heuristic(state.next_player());
        for depth in 1..=3 {
            let expected = full_search(&h, &state, 0, depth);
            let result = minimax(&state, &h, depth);

            assert_eq!(expected, (result.value, result.best_move), "depth {} on {:?}", depth, state);
            assert_eq!(expected.0, minimax_value(&state, &h, depth));
        }
    }
}

/// Plain negamax without pruning, picking the first strictly better move.
fn full_search(h: &UtttHeuristic, state: &GameState, length: u32, depth: u32) -> (i32, Option<Move>) {
    if depth == 0 || state.is_done() {
        return (h.value(state, length), None);
    }

    let mut best: Option<(i32, Move)> = None;
    for mv in legal_moves(state) {
        let child = state.clone_and_play(mv).unwrap();
        let value = -full_search(h, &child, length + 1, depth - 1).0;
        if best.map_or(true, |(best, _)| value > best) {
            best = Some((value, mv));
        }
    }

    let (value, mv) = best.unwrap();
    (value, Some(mv))
}
