use std::collections::HashSet;

use internal_iterator::InternalIterator;

use chair_game::position::{Operator, PlayError, Position, TerminalPosition};
use chair_game::util::tiny::consistent_rng;

use crate::util::test_sampler_uniform;


/// Upper bound on the number of `all_possible_moves` that are checked, some games have infinitely many.
const MAX_CHECKED_MOVES: usize = 64;

pub fn position_test_main<P: Position>(position: &P) {
    position_test_main_impl(position, true)
}

pub fn position_test_main_without_uniform<P: Position>(position: &P) {
    position_test_main_impl(position, false)
}

fn position_test_main_impl<P: Position>(position: &P, random_uniform: bool) {
    println!("Currently testing position\n{:?}\n{}", position, position);

    if position.is_terminal() {
        test_terminal_position(position);
    } else {
        test_operators_match(position);
        test_apply_unavailable(position);

        if random_uniform {
            test_random_operator_uniform(position);
        }
    }
}

/// The first `all_possible_moves`, at most [MAX_CHECKED_MOVES] of them.
fn possible_moves<P: Position>() -> Vec<P::Move> {
    let mut moves = vec![];
    P::all_possible_moves().find_map(|mv| {
        moves.push(mv);
        if moves.len() >= MAX_CHECKED_MOVES {
            Some(())
        } else {
            None
        }
    });
    moves
}

fn test_terminal_position<P: Position>(position: &P) {
    assert!(position.is_terminal(), "bug in test implementation, expected terminal position");

    assert_eq!(position.operators().count(), 0);
    assert_eq!(position.outcome(), Some(position.winner()));
    assert_eq!(position.random_operator(&mut consistent_rng()), Err(TerminalPosition));
    assert_eq!(position.clone().apply_random_operator(&mut consistent_rng()), Err(TerminalPosition));

    for mv in possible_moves::<P>() {
        assert!(!position.is_applicable(mv));
        assert!(!mv.is_applicable_to(position));

        let mut next = position.clone();
        assert_eq!(next.apply(mv), Err(PlayError::Terminal));
        assert_eq!(&next, position, "failed apply changed the position");
        assert_eq!(mv.apply_to(position), Err(PlayError::Terminal));
    }
}

fn test_operators_match<P: Position>(position: &P) {
    println!("operators and is_applicable match:");

    let all = possible_moves::<P>();
    let operators: Vec<P::Move> = position.operators().collect();

    assert_eq!(operators.len(), position.operators().count(), "operators count mismatch");
    assert!(!operators.is_empty(), "non-terminal position must have operators");
    assert_eq!(position.outcome(), None);

    assert_eq!(operators.len(), operators.iter().collect::<HashSet<_>>().len(), "found duplicate operator");
    assert_eq!(all.len(), all.iter().collect::<HashSet<_>>().len(), "found duplicate possible move");

    for &mv in &operators {
        assert!(position.is_applicable(mv), "generated move {} is not applicable", mv);
        assert!(mv.is_applicable_to(position));
        assert!(all.contains(&mv), "generated move {} is not in all_possible_moves", mv);
    }

    for &mv in &all {
        if position.is_applicable(mv) {
            assert!(operators.contains(&mv), "applicable move {} was not generated", mv);
        } else {
            assert!(!operators.contains(&mv), "non-applicable move {} was generated", mv);
        }
    }

    // operators are enumerated in a consistent order
    let sorted: Vec<P::Move> = all.iter().copied().filter(|mv| operators.contains(mv)).collect();
    assert_eq!(operators, sorted);

    for &mv in &operators {
        let original = position.clone();
        let child = position.clone_and_apply(mv).unwrap();
        println!("Applying {}", mv);
        println!("{}", child);

        assert_eq!(&original, position, "clone_and_apply changed the original");
        assert_ne!(&child, position);
        assert_eq!(child.next_player(), position.next_player().opponent());
        assert_eq!(mv.apply_to(position).unwrap(), child);

        let mut in_place = position.clone();
        in_place.apply(mv).unwrap();
        assert_eq!(in_place, child);
    }
}

fn test_apply_unavailable<P: Position>(position: &P) {
    for mv in possible_moves::<P>() {
        if position.is_applicable(mv) {
            continue;
        }

        let mut next = position.clone();
        assert_eq!(next.apply(mv), Err(PlayError::UnavailableMove));
        assert_eq!(&next, position, "failed apply changed the position");
        assert_eq!(position.clone_and_apply(mv), Err(PlayError::UnavailableMove));
    }
}

fn test_random_operator_uniform<P: Position>(position: &P) {
    println!("random_operator uniform:");

    let expected: Vec<_> = position.operators().collect();
    let mut rng = consistent_rng();
    test_sampler_uniform(&expected, || Some(position.random_operator(&mut rng).unwrap()));
}
