//! Star-shaped ray casting.
//!
//! Walks the eight compass directions from an origin, one cell at a time,
//! and stops each ray at the first cell the predicate rejects. Supply lines,
//! fire ranges and cavalry charges are all built on this primitive.

use crate::board::{Board, CellId, Unit, DIRECTIONS};

/// Casts rays from `origin` covering distances `min..=max`.
///
/// Returns one row of cell ids per direction, nearest first, omitting
/// directions whose first cell was rejected. With `min == 0` every row
/// starts with the origin itself.
pub fn star_search<F>(board: &Board, origin: CellId, min: usize, max: usize, pred: F) -> Vec<Vec<CellId>>
where
    F: Fn(Option<&Unit>, CellId) -> bool,
{
    let mut rows = Vec::with_capacity(DIRECTIONS.len());
    if !board.size.contains(origin) {
        return rows;
    }

    for dir in DIRECTIONS {
        let mut row = Vec::new();
        for n in min..=max {
            match board.size.offset(origin, dir, n as i32) {
                Some(id) if pred(board.unit(id), id) => row.push(id),
                _ => break,
            }
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }

    rows
}

/// Casts rays and flattens the result, deduplicated and ascending.
pub fn star_cells<F>(board: &Board, origin: CellId, min: usize, max: usize, pred: F) -> Vec<CellId>
where
    F: Fn(Option<&Unit>, CellId) -> bool,
{
    let mut cells: Vec<CellId> = star_search(board, origin, min, max, pred)
        .into_iter()
        .flatten()
        .collect();
    cells.sort_unstable();
    cells.dedup();
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardSize, Side, Stronghold, StrongholdKind, UnitKind};

    fn open_board() -> Board {
        Board::empty(BoardSize::new(7, 7))
    }

    #[test]
    fn unbounded_rays_reach_the_edges() {
        let board = open_board();
        let origin = board.size.cell_at(3, 3).unwrap();
        let rows = star_search(&board, origin, 0, board.size.max_extent(), |_, _| true);
        assert_eq!(rows.len(), 8);
        for row in &rows {
            assert_eq!(row[0], origin);
            assert_eq!(row.len(), 4);
        }
        // 8 directions x 3 cells + the origin.
        assert_eq!(star_cells(&board, origin, 0, 7, |_, _| true).len(), 25);
    }

    #[test]
    fn ray_stops_at_first_rejected_cell() {
        let mut board = open_board();
        let origin = board.size.cell_at(0, 0).unwrap();
        let block = board.size.cell_at(2, 0).unwrap();
        board.set_stronghold(block, Some(Stronghold::neutral(StrongholdKind::Mountain)));
        let beyond = board.size.cell_at(4, 0).unwrap();

        let cells = star_cells(&board, origin, 0, 7, |_, id| !board.is_mountain(id));
        assert!(cells.contains(&board.size.cell_at(1, 0).unwrap()));
        assert!(!cells.contains(&block));
        assert!(!cells.contains(&beyond));
    }

    #[test]
    fn bounded_rays_respect_min_and_max() {
        let board = open_board();
        let origin = board.size.cell_at(3, 3).unwrap();
        let cells = star_cells(&board, origin, 1, 2, |_, _| true);
        assert!(!cells.contains(&origin));
        assert_eq!(cells.len(), 16);
        assert!(cells.contains(&board.size.cell_at(5, 5).unwrap()));
        assert!(!cells.contains(&board.size.cell_at(6, 6).unwrap()));
    }

    #[test]
    fn predicate_sees_units() {
        let mut board = open_board();
        let origin = board.size.cell_at(0, 3).unwrap();
        board.set_unit(board.size.cell_at(1, 3).unwrap(), Some(crate::board::Unit::new(UnitKind::Cavalry, Side::South)));
        board.set_unit(board.size.cell_at(2, 3).unwrap(), Some(crate::board::Unit::new(UnitKind::Cavalry, Side::South)));
        let rows = star_search(&board, origin, 1, 4, |u, _| u.is_some_and(|u| u.kind.is_cavalry()));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 2);
    }

    #[test]
    fn off_board_origin_yields_nothing() {
        let board = open_board();
        assert!(star_search(&board, 49, 0, 3, |_, _| true).is_empty());
    }
}
