//! Spatial Grid
//!
//! Bounded W×H grid with multi-occupancy cells and a configurable
//! neighborhood kernel (Moore or von Neumann, with or without the center
//! cell). Neighborhoods clip at the edges rather than wrapping.

use rand::rngs::SmallRng;
use rand::Rng;

/// Neighborhood kernel configuration
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// 8-connected when true, 4-connected otherwise
    pub moore: bool,
    /// Whether the center cell counts as its own neighbor
    pub include_center: bool,
}

/// Bounded 2D grid. Each cell holds the indices of the agents standing on
/// it; any number of agents may share a cell.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    width: u32,
    height: u32,
    kernel: Kernel,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(width: u32, height: u32, kernel: Kernel) -> Self {
        Self {
            width,
            height,
            kernel,
            cells: vec![Vec::new(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn cell_index(&self, (x, y): (u32, u32)) -> usize {
        (y * self.width + x) as usize
    }

    /// Put an agent on a cell. Used once per agent at world construction.
    pub fn place(&mut self, agent_index: usize, pos: (u32, u32)) {
        let cell = self.cell_index(pos);
        self.cells[cell].push(agent_index);
    }

    /// Move an agent from one cell to another.
    pub fn relocate(&mut self, agent_index: usize, from: (u32, u32), to: (u32, u32)) {
        let from_cell = self.cell_index(from);
        self.cells[from_cell].retain(|&i| i != agent_index);
        let to_cell = self.cell_index(to);
        self.cells[to_cell].push(agent_index);
    }

    /// Indices of all agents standing on the given cell.
    pub fn contents(&self, pos: (u32, u32)) -> &[usize] {
        &self.cells[self.cell_index(pos)]
    }

    /// Cells adjacent to `pos` under the configured kernel, clipped at the
    /// grid boundary.
    pub fn neighborhood(&self, (x, y): (u32, u32)) -> Vec<(u32, u32)> {
        let mut cells = Vec::with_capacity(9);
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    if !self.kernel.include_center {
                        continue;
                    }
                } else if !self.kernel.moore && dx != 0 && dy != 0 {
                    continue;
                }
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if nx < 0 || ny < 0 || nx >= self.width as i64 || ny >= self.height as i64 {
                    continue;
                }
                cells.push((nx as u32, ny as u32));
            }
        }
        cells
    }

    /// Pick a destination cell uniformly at random from the neighborhood.
    /// A degenerate kernel with no candidate cells leaves the agent in
    /// place.
    pub fn random_neighbor(&self, rng: &mut SmallRng, pos: (u32, u32)) -> (u32, u32) {
        let options = self.neighborhood(pos);
        if options.is_empty() {
            return pos;
        }
        options[rng.gen_range(0..options.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const MOORE: Kernel = Kernel {
        moore: true,
        include_center: false,
    };

    #[test]
    fn test_moore_neighborhood_interior() {
        let grid = SpatialGrid::new(5, 5, MOORE);
        assert_eq!(grid.neighborhood((2, 2)).len(), 8);
    }

    #[test]
    fn test_von_neumann_neighborhood_interior() {
        let kernel = Kernel {
            moore: false,
            include_center: false,
        };
        let grid = SpatialGrid::new(5, 5, kernel);
        let cells = grid.neighborhood((2, 2));
        assert_eq!(cells.len(), 4);
        assert!(cells.contains(&(1, 2)));
        assert!(cells.contains(&(3, 2)));
        assert!(cells.contains(&(2, 1)));
        assert!(cells.contains(&(2, 3)));
    }

    #[test]
    fn test_corner_clips_at_boundary() {
        let grid = SpatialGrid::new(5, 5, MOORE);
        assert_eq!(grid.neighborhood((0, 0)).len(), 3);
        assert_eq!(grid.neighborhood((4, 4)).len(), 3);
    }

    #[test]
    fn test_include_center_adds_own_cell() {
        let kernel = Kernel {
            moore: true,
            include_center: true,
        };
        let grid = SpatialGrid::new(5, 5, kernel);
        let cells = grid.neighborhood((2, 2));
        assert_eq!(cells.len(), 9);
        assert!(cells.contains(&(2, 2)));
    }

    #[test]
    fn test_relocate_moves_between_cells() {
        let mut grid = SpatialGrid::new(3, 3, MOORE);
        grid.place(7, (0, 0));
        grid.place(8, (0, 0));
        assert_eq!(grid.contents((0, 0)), &[7, 8]);

        grid.relocate(7, (0, 0), (1, 1));
        assert_eq!(grid.contents((0, 0)), &[8]);
        assert_eq!(grid.contents((1, 1)), &[7]);
    }

    #[test]
    fn test_random_neighbor_stays_in_bounds() {
        let grid = SpatialGrid::new(4, 4, MOORE);
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let (x, y) = grid.random_neighbor(&mut rng, (0, 3));
            assert!(x < 4 && y < 4);
        }
    }

    #[test]
    fn test_degenerate_grid_stays_put() {
        // 1x1 grid without the center cell has no candidate destinations
        let grid = SpatialGrid::new(1, 1, MOORE);
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(grid.random_neighbor(&mut rng, (0, 0)), (0, 0));
    }
}
