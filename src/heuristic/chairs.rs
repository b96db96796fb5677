use crate::ai::minimax::Heuristic;
use crate::games::chairs::ChairBoard;
use crate::position::Identity;

/// Rewards keeping room to expand around the chairs a player already occupies.
///
/// For every chair taken by the player, each empty neighbour is worth 1 point,
/// and 2 more if the chair after that neighbour (in the same direction) is empty too.
/// The opponent's chairs are not counted.
#[derive(Debug, Default, Copy, Clone)]
pub struct OpenChairsHeuristic;

impl<const N: usize> Heuristic<ChairBoard<N>> for OpenChairsHeuristic {
    fn value(&self, position: &ChairBoard<N>, player: Identity) -> i32 {
        if !player.is_player() {
            return 0;
        }

        let mut total = 0;
        for i in 0..N {
            if position.cell(i) != player {
                continue;
            }

            if position.right(i) == Identity::None {
                total += 1;
                if position.second_right(i) == Identity::None {
                    total += 2;
                }
            }
            if position.left(i) == Identity::None {
                total += 1;
                if position.second_left(i) == Identity::None {
                    total += 2;
                }
            }
        }

        total
    }
}
