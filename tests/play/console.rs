use std::io::Cursor;

use chair_game::ai::minimax::{MiniMaxBot, SearchError};
use chair_game::ai::{Bot, SelectError};
use chair_game::console::{rules, ConsolePlayer};
use chair_game::games::chairs::{ChairBoard, DefaultChairBoard, Sit};
use chair_game::heuristic::chairs::OpenChairsHeuristic;
use chair_game::position::{Identity, Position};
use chair_game::util::bot_game::{play_game, GameObserver};

fn player(identity: Identity, input: &str) -> ConsolePlayer<Cursor<&[u8]>, Vec<u8>> {
    ConsolePlayer::new("Alice", identity, Cursor::new(input.as_bytes()), Vec::new())
}

#[test]
fn valid_move() {
    let mut alice = player(Identity::First, "5\n");
    let board = DefaultChairBoard::default();

    assert_eq!(alice.select_move(&board).unwrap(), Some(Sit::new(4)));
    assert!(Bot::<DefaultChairBoard>::is_interactive(&alice));
    assert_eq!(alice.name(), "Alice");
    assert_eq!(alice.identity(), Identity::First);

    let (_, output) = alice.into_inner();
    assert_eq!(String::from_utf8(output).unwrap(), "Alice's turn: ");
}

#[test]
fn surrounding_whitespace() {
    let mut alice = player(Identity::First, "  14 \r\n");
    assert_eq!(
        alice.select_move(&DefaultChairBoard::default()).unwrap(),
        Some(Sit::new(13))
    );
}

#[test]
fn invalid_input() {
    let board = DefaultChairBoard::default();

    for input in ["abc\n", "0\n", "15\n", "-1\n", "\n", "1 2\n"] {
        let mut alice = player(Identity::First, input);
        let result = alice.select_move(&board);
        match result {
            Err(e @ SelectError::InvalidInput(_)) => assert!(e.is_recoverable()),
            other => panic!("expected invalid input for {:?}, got {:?}", input, other),
        }
    }
}

#[test]
fn unavailable_chair() {
    let board = DefaultChairBoard::default().clone_and_apply(Sit::new(0)).unwrap();
    let mut bob = player(Identity::Second, "2\n14\n1\n");

    for _ in 0..3 {
        match bob.select_move(&board) {
            Err(e @ SelectError::UnavailableMove(_)) => assert!(e.is_recoverable()),
            other => panic!("expected unavailable move, got {:?}", other),
        }
    }
}

#[test]
fn invalid_utf8_is_invalid_input() {
    let mut alice = ConsolePlayer::new("Alice", Identity::First, Cursor::new(&b"\xff\xfe\n5\n"[..]), Vec::new());
    let board = DefaultChairBoard::default();

    match alice.select_move(&board) {
        Err(e @ SelectError::InvalidInput(_)) => assert!(e.is_recoverable()),
        other => panic!("expected invalid input, got {:?}", other),
    }
    assert_eq!(alice.select_move(&board).unwrap(), Some(Sit::new(4)));
}

#[test]
fn game_continues_after_invalid_utf8() {
    let start = ChairBoard::<3>::new();
    let mut alice = ConsolePlayer::new("Alice", Identity::First, Cursor::new(&b"\xff\xfe\n2\n"[..]), Vec::new());
    let mut computer = MiniMaxBot::<ChairBoard<3>, _>::new(Identity::Second, 3, OpenChairsHeuristic);
    let mut recorder = Recorder::default();

    let replay = play_game(&start, &mut alice, &mut computer, &mut recorder).unwrap();

    assert_eq!(recorder.rejected, 1);
    assert_eq!(replay.moves, vec![Sit::new(1)]);
    assert_eq!(replay.winner, Some(Identity::First));
}

#[test]
fn rules_mention_chair_count() {
    assert!(rules(14).contains("There are 14 chairs"));
    assert!(rules(5).contains("There are 5 chairs"));
    assert!(rules(5).contains("from 1 to 5"));
}

#[test]
fn end_of_input() {
    let mut alice = player(Identity::First, "");
    assert_eq!(alice.select_move(&DefaultChairBoard::default()).unwrap(), None);
}

#[test]
fn not_own_turn() {
    let mut bob = player(Identity::Second, "1\n");
    let result = bob.select_move(&DefaultChairBoard::default());
    assert!(matches!(
        result,
        Err(SelectError::Illegal(SearchError::NotOwnTurn {
            expected: Identity::Second,
            actual: Identity::First,
        }))
    ));
    assert!(!result.unwrap_err().is_recoverable());
}

#[derive(Default)]
struct Recorder {
    moves: Vec<(Identity, Sit)>,
    rejected: usize,
}

impl<const N: usize> GameObserver<ChairBoard<N>> for Recorder {
    fn moved(&mut self, _: &ChairBoard<N>, player: Identity, mv: Sit) {
        self.moves.push((player, mv));
    }

    fn rejected(&mut self, player: Identity, _: &SelectError) {
        assert_eq!(player, Identity::First);
        self.rejected += 1;
    }
}

#[test]
fn game_retries_bad_input() {
    let start = ChairBoard::<3>::new();
    let mut alice = player(Identity::First, "x\n4\n2\n");
    let mut computer = MiniMaxBot::<ChairBoard<3>, _>::new(Identity::Second, 3, OpenChairsHeuristic);
    let mut recorder = Recorder::default();

    let replay = play_game(&start, &mut alice, &mut computer, &mut recorder).unwrap();

    assert_eq!(recorder.rejected, 2);
    assert_eq!(recorder.moves, vec![(Identity::First, Sit::new(1))]);
    assert_eq!(replay.moves, vec![Sit::new(1)]);
    assert_eq!(replay.winner, Some(Identity::First));
    assert_eq!(replay.move_count_first, 1);
    assert_eq!(replay.move_count_second, 0);
}

#[test]
fn game_aborted_on_end_of_input() {
    let start = DefaultChairBoard::default();
    let mut computer = MiniMaxBot::<DefaultChairBoard, _>::new(Identity::First, 2, OpenChairsHeuristic);
    let mut bob = player(Identity::Second, "");
    let mut recorder = Recorder::default();

    let replay = play_game(&start, &mut computer, &mut bob, &mut recorder).unwrap();

    assert_eq!(replay.winner, None);
    assert_eq!(replay.moves.len(), 1);
    assert_eq!(recorder.moves.len(), 1);
    assert!(!replay.end.is_terminal());
}
