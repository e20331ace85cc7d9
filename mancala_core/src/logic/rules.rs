use crate::engine::move_list::PitList;
use crate::logic::board::{Board, Side};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("pit {pit} is out of range for a row of {pits} pits")]
    OutOfBounds { pit: usize, pits: usize },
    #[error("pit {pit} on the {side} row is empty")]
    EmptyPit { pit: usize, side: Side },
    #[error("the game is already over")]
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Landing {
    Store,
    Pit(Side, usize),
}

/// The only legality gate: `pit` is on the board and holds stones.
pub fn is_viable_move<const N: usize>(board: &Board<N>, pit: usize, side: Side) -> bool {
    board.pit(side, pit).is_some_and(|stones| stones > 0)
}

/// A game (or search subtree) ends as soon as either row is empty.
pub fn is_terminal<const N: usize>(board: &Board<N>) -> bool {
    board.is_row_empty(Side::Top) || board.is_row_empty(Side::Bottom)
}

/// Viable pits for `side` in ascending index order.
pub fn legal_moves<const N: usize>(board: &Board<N>, side: Side) -> PitList<N> {
    let mut moves = PitList::new();
    for pit in 0..N {
        if is_viable_move(board, pit, side) {
            moves.push(pit);
        }
    }
    moves
}

/// Plays `pit` for `side` and returns the successor board.
///
/// Sowing skips the opponent's store. A last stone in the mover's store sets
/// `bonus_turn`; a last stone in an empty pit of the mover's own row captures
/// it together with the facing pit. If either row ends up empty, every
/// remaining stone is swept into its row owner's store and the bonus turn is
/// cancelled.
pub fn apply_move<const N: usize>(
    board: &Board<N>,
    pit: usize,
    side: Side,
) -> Result<Board<N>, MoveError> {
    let stones = match board.pit(side, pit) {
        None => return Err(MoveError::OutOfBounds { pit, pits: N }),
        Some(0) => return Err(MoveError::EmptyPit { pit, side }),
        Some(stones) => stones,
    };

    let mut next = *board;
    next.bonus_turn = false;
    next.captured = 0;
    if let Some(slot) = next.row_mut(side).get_mut(pit) {
        *slot = 0;
    }

    let landing = sow(&mut next, side, pit, stones);
    match landing {
        Landing::Store => next.bonus_turn = true,
        Landing::Pit(row, landed) if row == side => capture(&mut next, side, landed),
        Landing::Pit(..) => {}
    }

    if is_terminal(&next) {
        sweep(&mut next);
    }

    debug_assert_eq!(next.total_stones(), board.total_stones());
    log::trace!(
        "{side} played pit {pit}: stores {}-{}, bonus={}, captured={}",
        next.top_score,
        next.bottom_score,
        next.bonus_turn,
        next.captured
    );

    Ok(next)
}

fn sow<const N: usize>(board: &mut Board<N>, mover: Side, pit: usize, mut stones: u16) -> Landing {
    let mut row = mover;
    let mut next = pit + 1;
    let mut landing = Landing::Pit(mover, pit);

    while stones > 0 {
        if let Some(slot) = board.row_mut(row).get_mut(next) {
            *slot += 1;
            stones -= 1;
            landing = Landing::Pit(row, next);
            next += 1;
            continue;
        }

        // Past the end of a row: only the mover's own store takes a stone.
        if row == mover {
            *board.store_mut(mover) += 1;
            stones -= 1;
            landing = Landing::Store;
        }
        row = row.opposite();
        next = 0;
    }

    landing
}

fn capture<const N: usize>(board: &mut Board<N>, side: Side, pit: usize) {
    let facing = N - 1 - pit;
    let landed = board.pit(side, pit).unwrap_or(0);
    let opposite = board.pit(side.opposite(), facing).unwrap_or(0);
    if landed != 1 || opposite == 0 {
        return;
    }

    if let Some(slot) = board.row_mut(side).get_mut(pit) {
        *slot = 0;
    }
    if let Some(slot) = board.row_mut(side.opposite()).get_mut(facing) {
        *slot = 0;
    }

    let taken = landed + opposite;
    *board.store_mut(side) += taken;
    board.captured = taken;
}

fn sweep<const N: usize>(board: &mut Board<N>) {
    for side in Side::ALL {
        let remaining = board
            .row(side)
            .iter()
            .fold(0u16, |acc, &stones| acc.saturating_add(stones));
        *board.store_mut(side) += remaining;
        *board.row_mut(side) = [0; N];
    }
    board.bonus_turn = false;
}
