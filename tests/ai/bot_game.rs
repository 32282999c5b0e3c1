use ultimate_ttt::ai::difficulty::{Difficulty, SearchConfig};
use ultimate_ttt::ai::simple::RandomBot;
use ultimate_ttt::board::{Mark, Outcome};
use ultimate_ttt::games::uttt::GameState;
use ultimate_ttt::util::bot_game;
use ultimate_ttt::util::rating::elo_from_wdl;
use ultimate_ttt::util::tiny::seeded_rng;
use ultimate_ttt::wdl::{OutcomeWDL, POV, WDL};

#[test]
fn hard_beats_easy() {
    let result = bot_game::run_difficulty_match(
        &SearchConfig::default(),
        Difficulty::Hard,
        Difficulty::Easy,
        Some(200),
        2,
        0,
    )
    .unwrap();
    println!("{:?}", result);

    assert_eq!(result.game_count, 4);
    assert_eq!(result.replays.len(), 4);
    assert_eq!(result.wdl_l.sum(), 4);
    assert!(result.wdl_l.win > result.wdl_l.loss);
    assert!(result.elo_l() > 0.0);

    // sides alternate between games
    let first_movers: Vec<Mark> = result.replays.iter().map(|r| r.mark_l).collect();
    assert_eq!(first_movers, vec![Mark::X, Mark::O, Mark::X, Mark::O]);
    assert!(result.replays.iter().all(|r| r.moves.len() <= 200));
}

#[test]
fn random_match_is_reproducible() {
    let start = GameState::new().with_max_moves(Some(200));
    let run = || {
        bot_game::run(
            &start,
            |i| RandomBot::new(seeded_rng(2 * i as u64)),
            |i| RandomBot::new(seeded_rng(2 * i as u64 + 1)),
            4,
        )
        .unwrap()
    };

    let first = run();
    let second = run();

    assert_eq!(first.wdl_l, second.wdl_l);
    for (a, b) in first.replays.iter().zip(&second.replays) {
        assert_eq!(a.moves, b.moves);
        assert_eq!(a.outcome, b.outcome);
    }
}

#[test]
fn wdl_and_elo() {
    assert_eq!(Outcome::WonBy(Mark::X).pov(Mark::X), OutcomeWDL::Win);
    assert_eq!(Outcome::WonBy(Mark::X).pov(Mark::O), OutcomeWDL::Loss);
    assert_eq!(Outcome::Draw.pov(Mark::O), OutcomeWDL::Draw);
    assert_eq!(OutcomeWDL::Loss.un_pov(Mark::O), Outcome::WonBy(Mark::X));

    let wdl: WDL<u32> = [OutcomeWDL::Win, OutcomeWDL::Win, OutcomeWDL::Draw]
        .iter()
        .map(|o| o.to_wdl())
        .sum();
    assert_eq!(wdl, WDL::new(2, 1, 0));

    assert_eq!(elo_from_wdl(WDL::new(1.0, 0.0, 1.0)), 0.0);
    assert!(elo_from_wdl(WDL::new(3.0, 0.0, 1.0)) > 0.0);
    assert!(elo_from_wdl(WDL::new(1.0, 0.0, 3.0)) < 0.0);
}
