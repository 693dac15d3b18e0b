use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Cells touched by one flip: the clicked cell and up to four neighbors.
pub type Footprint = SmallVec<[CellIndex; 5]>;

/// Square board of two-tone cells, addressed by flat index `x + y * edge`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Cell>", try_from = "Vec<Cell>")]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// All cells off. The edge is clamped into `MIN_EDGE..=MAX_EDGE`.
    pub fn new(edge: Edge) -> Self {
        let edge = usize::from(edge.clamp(MIN_EDGE, MAX_EDGE));
        Self {
            cells: Array2::default([edge, edge]),
        }
    }

    /// Builds a grid from cells listed in index order, the edge is inferred from the length.
    pub fn from_cells(cells: Vec<Cell>) -> Result<Self> {
        let len = cells.len();
        let edge = edge_for_len(len).ok_or(GameError::InvalidGridShape { len })?;
        let edge = usize::from(edge);
        let cells = Array2::from_shape_vec((edge, edge), cells)
            .map_err(|_| GameError::InvalidGridShape { len })?;
        Ok(Self { cells })
    }

    pub fn from_values(values: &[CellValue]) -> Result<Self> {
        let cells = values
            .iter()
            .map(|&value| Cell::try_from(value))
            .collect::<Result<Vec<_>>>()?;
        Self::from_cells(cells)
    }

    pub fn edge(&self) -> Edge {
        // the constructors keep the edge within MAX_EDGE
        self.cells.nrows() as Edge
    }

    pub fn cell_count(&self) -> CellCount {
        cell_count(self.edge())
    }

    /// Reallocates the board for a new edge. Cell values do not carry over.
    pub fn resize(&mut self, edge: Edge) {
        *self = Self::new(edge);
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Off);
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        let cells = self.cell_count();
        if index < cells {
            Ok(index)
        } else {
            Err(GameError::OutOfRange { index, cells })
        }
    }

    pub fn get(&self, index: CellIndex) -> Result<Cell> {
        let index = self.validate_index(index)?;
        Ok(self.cell_at(index_to_coords(index, self.edge())))
    }

    pub fn set(&mut self, index: CellIndex, cell: Cell) -> Result<()> {
        let index = self.validate_index(index)?;
        let coords = index_to_coords(index, self.edge());
        self.cells[coords.to_nd_index()] = cell;
        Ok(())
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    /// Indices a flip at `index` toggles, the clicked cell first.
    pub fn footprint(&self, index: CellIndex) -> Result<Footprint> {
        let index = self.validate_index(index)?;
        Ok(self.footprint_of(index))
    }

    /// Toggles the cell at `index` and its existing orthogonal neighbors.
    ///
    /// A flip is its own inverse: flipping the same index twice restores the grid.
    pub fn flip(&mut self, index: CellIndex) -> Result<()> {
        let index = self.validate_index(index)?;
        self.flip_valid(index);
        Ok(())
    }

    /// Flip for an index the caller already checked against this grid.
    pub(crate) fn flip_valid(&mut self, index: CellIndex) {
        let edge = self.edge();
        for target in self.footprint_of(index) {
            let coords = index_to_coords(target, edge);
            self.cells[coords.to_nd_index()].flip();
        }
        log::trace!("Flipped around {} on a {}x{} grid", index, edge, edge);
    }

    fn footprint_of(&self, index: CellIndex) -> Footprint {
        let edge = self.edge();
        let center = index_to_coords(index, edge);
        let mut footprint = Footprint::new();
        footprint.push(index);
        footprint.extend(NeighborIter::new(center, edge).map(|coords| coords_to_index(coords, edge)));
        footprint
    }

    /// Every cell shares the state of the first one, either all off or all on.
    pub fn is_won(&self) -> bool {
        let mut cells = self.cells.iter();
        match cells.next() {
            Some(first) => cells.all(|cell| cell == first),
            None => true,
        }
    }

    /// Cells in index order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    pub fn to_values(&self) -> Vec<CellValue> {
        self.iter().map(Cell::value).collect()
    }
}

impl From<Grid> for Vec<Cell> {
    fn from(grid: Grid) -> Self {
        grid.iter().collect()
    }
}

impl TryFrom<Vec<Cell>> for Grid {
    type Error = GameError;

    fn try_from(cells: Vec<Cell>) -> Result<Self> {
        Self::from_cells(cells)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(MIN_EDGE)
    }
}

/// Edge of a square grid holding `len` cells, if it is a supported size.
pub fn edge_for_len(len: usize) -> Option<Edge> {
    (MIN_EDGE..=MAX_EDGE).find(|&edge| usize::from(cell_count(edge)) == len)
}
