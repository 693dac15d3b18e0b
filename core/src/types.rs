pub use flip_protocol::{CellIndex, CellValue};

/// Grid side length.
pub type Edge = u8;

/// Single coordinate axis, column or row.
pub type Coord = u8;

/// Count type used for total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    /// Row-major, so the standard layout of the array walks cells in index order.
    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

pub const fn cell_count(edge: Edge) -> CellCount {
    let edge = edge as CellCount;
    edge.saturating_mul(edge)
}

pub const fn index_to_coords(index: CellIndex, edge: Edge) -> Coord2 {
    let edge = edge as CellIndex;
    ((index % edge) as Coord, (index / edge) as Coord)
}

pub const fn coords_to_index((x, y): Coord2, edge: Edge) -> CellIndex {
    x as CellIndex + y as CellIndex * edge as CellIndex
}

/// Left, up, right, down. No diagonals, no wraparound.
const DISPLACEMENTS: [(i8, i8); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), edge: Edge) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= edge {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= edge {
        return None;
    }

    Some((next_x, next_y))
}

/// Orthogonal neighbors of a cell that exist on a square grid.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    edge: Edge,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, edge: Edge) -> Self {
        Self {
            center,
            edge,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, *delta, self.edge) {
                return Some(next_item);
            }
        }
    }
}
