//! Dense cell grid mapping coordinates to object handles.

use skirmish_core::{CellCoord, GameObjectId, ScenarioError, MAX_MAP_CELLS};

#[derive(Clone, Debug, Default)]
pub(crate) struct OccupancyGrid {
    columns: u32,
    rows: u32,
    cells: Vec<Option<GameObjectId>>,
}

impl OccupancyGrid {
    /// Allocates an empty grid, refusing sizes beyond [`MAX_MAP_CELLS`].
    pub(crate) fn new(columns: u32, rows: u32) -> Result<Self, ScenarioError> {
        let too_large = ScenarioError::MapTooLarge { columns, rows };
        let cells = u64::from(columns) * u64::from(rows);
        if cells > MAX_MAP_CELLS {
            return Err(too_large);
        }
        let capacity = usize::try_from(cells).map_err(|_| too_large.clone())?;
        Ok(Self {
            columns,
            rows,
            cells: vec![None; capacity],
        })
    }

    pub(crate) fn occupant(&self, cell: CellCoord) -> Option<GameObjectId> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }

    pub(crate) fn is_free(&self, cell: CellCoord) -> bool {
        self.index(cell).is_some_and(|index| self.cells[index].is_none())
    }

    pub(crate) fn occupy(&mut self, id: GameObjectId, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            self.cells[index] = Some(id);
        }
    }

    pub(crate) fn vacate(&mut self, cell: CellCoord) -> Option<GameObjectId> {
        self.index(cell)
            .and_then(|index| self.cells.get_mut(index))
            .and_then(Option::take)
    }

    pub(crate) fn contains(&self, cell: CellCoord) -> bool {
        cell.is_within(self.columns, self.rows)
    }

    /// Occupied cells in row-major order.
    pub(crate) fn occupied(&self) -> impl Iterator<Item = (CellCoord, GameObjectId)> + '_ {
        let width = self.columns as usize;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(index, slot)| {
                let id = (*slot)?;
                let x = i32::try_from(index % width).ok()?;
                let y = i32::try_from(index / width).ok()?;
                Some((CellCoord::new(x, y), id))
            })
    }

    pub(crate) fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.y()).ok()?;
        let column = usize::try_from(cell.x()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }

    pub(crate) fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupancy_round_trips_through_cells() {
        let mut grid = OccupancyGrid::new(4, 3).expect("small grid");
        let cell = CellCoord::new(3, 2);
        assert!(grid.is_free(cell));

        grid.occupy(GameObjectId::new(9), cell);
        assert_eq!(grid.occupant(cell), Some(GameObjectId::new(9)));
        assert!(!grid.is_free(cell));

        assert_eq!(grid.vacate(cell), Some(GameObjectId::new(9)));
        assert!(grid.is_free(cell));
        assert_eq!(grid.vacate(cell), None);
    }

    #[test]
    fn out_of_bounds_cells_are_never_free() {
        let grid = OccupancyGrid::new(4, 3).expect("small grid");
        assert!(!grid.is_free(CellCoord::new(4, 0)));
        assert!(!grid.is_free(CellCoord::new(-1, 0)));
        assert_eq!(grid.index(CellCoord::new(0, 3)), None);
        assert_eq!(grid.index(CellCoord::new(1, 2)), Some(9));
    }

    #[test]
    fn oversized_grid_is_refused() {
        assert_eq!(
            OccupancyGrid::new(u32::MAX, u32::MAX).map(|grid| grid.dimensions()),
            Err(ScenarioError::MapTooLarge {
                columns: u32::MAX,
                rows: u32::MAX,
            })
        );
        let empty = OccupancyGrid::default();
        assert!(!empty.contains(CellCoord::new(0, 0)));
    }

    #[test]
    fn occupied_cells_iterate_in_row_major_order() {
        let mut grid = OccupancyGrid::new(3, 3).expect("small grid");
        grid.occupy(GameObjectId::new(1), CellCoord::new(2, 2));
        grid.occupy(GameObjectId::new(2), CellCoord::new(0, 1));
        grid.occupy(GameObjectId::new(3), CellCoord::new(1, 0));

        let occupied: Vec<_> = grid.occupied().collect();
        assert_eq!(
            occupied,
            vec![
                (CellCoord::new(1, 0), GameObjectId::new(3)),
                (CellCoord::new(0, 1), GameObjectId::new(2)),
                (CellCoord::new(2, 2), GameObjectId::new(1)),
            ]
        );
        assert_eq!(grid.dimensions(), (3, 3));
    }
}
