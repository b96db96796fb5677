use internal_iterator::InternalIterator;

use chair_game::ai::minimax::SearchError;
use chair_game::ai::simple::RandomBot;
use chair_game::ai::{Bot, SelectError};
use chair_game::games::chairs::DefaultChairBoard;
use chair_game::games::dummy::DummyGame;
use chair_game::position::{Position, PositionMoves};
use chair_game::util::board_gen::RandomPositionIterator;
use chair_game::util::tiny::consistent_rng;

use crate::util::test_sampler_uniform;

#[test]
fn random_moves_are_operators() {
    let mut bot = RandomBot::new(consistent_rng());
    let positions = RandomPositionIterator::new(DefaultChairBoard::default(), consistent_rng()).unwrap();

    for board in positions.take(500).filter(|b| !b.is_terminal()) {
        let mv = bot.select_move(&board).unwrap().unwrap();
        assert!(board.is_applicable(mv), "{} not applicable on {}", mv, board);
    }
}

#[test]
fn random_uniform() {
    let game: DummyGame = "(AB=(AB)A)".parse().unwrap();
    let expected: Vec<usize> = game.operators().collect();

    let mut bot = RandomBot::new(consistent_rng());
    test_sampler_uniform(&expected, || bot.select_move(&game).unwrap());
}

#[test]
fn random_terminal() {
    let game: DummyGame = "A".parse().unwrap();
    let mut bot = RandomBot::new(consistent_rng());
    assert!(matches!(
        bot.select_move(&game),
        Err(SelectError::Illegal(SearchError::Terminal))
    ));
}
