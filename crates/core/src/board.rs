//! Board module - manages the puzzle grid
//!
//! The board is a square grid of colors plus a parallel grid of obstacle tags
//! and a set of wall edges. Both grids use flat row-major storage
//! (`row * size + col`).
//!
//! The flood region is every traversable cell connected to the origin `(0, 0)`
//! through cells of the origin's color. A move recolors that region and absorbs
//! every traversable neighbor that already has the new color, transitively.
//!
//! Walls are shape data only: flood adjacency does not consult them.

use std::collections::{BTreeSet, VecDeque};

use arrayvec::ArrayVec;

use crate::error::BoardError;
use crate::rng::SplitMix64;
use crate::types::{CellTag, Color, Direction, Position, WallEdge, MAX_GRID_SIZE};

/// One BFS layer of absorbed cells, in visiting order
pub type Wave = Vec<Position>;

/// What a committed flood changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FloodReport {
    /// Cells that joined the region (excludes the pre-move region itself)
    pub absorbed: usize,
    /// Ice cells that lost a layer, in visiting order
    pub cracked_ice: Vec<Position>,
}

/// The puzzle board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    colors: Vec<Color>,
    tags: Vec<CellTag>,
    walls: BTreeSet<WallEdge>,
}

impl Board {
    /// Create a board filled with a single color and no obstacles
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0 or exceeds [`MAX_GRID_SIZE`].
    pub fn new(size: usize, fill: Color) -> Self {
        assert_size(size);
        Self {
            size,
            colors: vec![fill; size * size],
            tags: vec![CellTag::Normal; size * size],
            walls: BTreeSet::new(),
        }
    }

    /// Build a board from explicit rows of colors
    pub fn from_rows(rows: Vec<Vec<Color>>) -> Result<Self, BoardError> {
        let size = rows.len();
        if size == 0 {
            return Err(BoardError::Empty);
        }
        if size > MAX_GRID_SIZE {
            return Err(BoardError::TooLarge(size));
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(BoardError::RaggedRow {
                row,
                len: r.len(),
                expected: size,
            });
        }

        Ok(Self {
            size,
            colors: rows.into_iter().flatten().collect(),
            tags: vec![CellTag::Normal; size * size],
            walls: BTreeSet::new(),
        })
    }

    /// Fill every cell independently and uniformly from `palette`.
    ///
    /// A pure function of its arguments: identical inputs give identical grids.
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0 or exceeds [`MAX_GRID_SIZE`], or if `palette` is empty.
    pub fn generate(size: usize, palette: &[Color], seed: u64) -> Self {
        assert_size(size);
        assert!(!palette.is_empty(), "cannot generate a board from an empty palette");

        let mut rng = SplitMix64::new(seed);
        let colors = (0..size * size)
            .map(|_| palette[rng.next_index(palette.len())])
            .collect();

        Self {
            size,
            colors,
            tags: vec![CellTag::Normal; size * size],
            walls: BTreeSet::new(),
        }
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Position) -> usize {
        assert!(
            pos.in_bounds(self.size),
            "position ({}, {}) outside {}x{} board",
            pos.row,
            pos.col,
            self.size,
            self.size
        );
        pos.row * self.size + pos.col
    }

    #[inline(always)]
    fn position(&self, idx: usize) -> Position {
        Position::new(idx / self.size, idx % self.size)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn color_at(&self, pos: Position) -> Color {
        self.colors[self.index(pos)]
    }

    pub fn tag_at(&self, pos: Position) -> CellTag {
        self.tags[self.index(pos)]
    }

    /// Color at `pos`, or `None` if out of bounds
    pub fn get(&self, pos: Position) -> Option<Color> {
        pos.in_bounds(self.size)
            .then(|| self.colors[pos.row * self.size + pos.col])
    }

    pub fn set_color(&mut self, pos: Position, color: Color) {
        let idx = self.index(pos);
        self.colors[idx] = color;
    }

    pub fn set_tag(&mut self, pos: Position, tag: CellTag) {
        let idx = self.index(pos);
        self.tags[idx] = tag;
    }

    pub fn is_playable(&self, pos: Position) -> bool {
        self.tag_at(pos).is_playable()
    }

    pub fn can_flood_traverse(&self, pos: Position) -> bool {
        self.tag_at(pos).can_flood_traverse()
    }

    /// Color of the origin cell, which is the region color
    pub fn region_color(&self) -> Color {
        self.color_at(Position::ORIGIN)
    }

    /// In-bounds 4-neighbors in [`Direction::ALL`] order
    pub fn neighbors(&self, pos: Position) -> ArrayVec<Position, 4> {
        Direction::ALL
            .iter()
            .filter_map(|&dir| pos.step(dir, self.size))
            .collect()
    }

    /// Mark the current flood region. Empty when the origin itself is blocked.
    fn region_mask(&self) -> Vec<bool> {
        let mut visited = vec![false; self.colors.len()];
        if !self.can_flood_traverse(Position::ORIGIN) {
            return visited;
        }

        visited[0] = true;
        let mut queue = VecDeque::from([Position::ORIGIN]);
        self.expand(&mut visited, &mut queue, self.region_color());
        visited
    }

    /// BFS from `queue` over unvisited traversable cells of `color`.
    /// Returns the number of newly marked cells.
    fn expand(&self, visited: &mut [bool], queue: &mut VecDeque<Position>, color: Color) -> usize {
        let mut added = 0;
        while let Some(pos) = queue.pop_front() {
            for next in self.neighbors(pos) {
                let idx = self.index(next);
                if visited[idx] || !self.tags[idx].can_flood_traverse() || self.colors[idx] != color
                {
                    continue;
                }
                visited[idx] = true;
                added += 1;
                queue.push_back(next);
            }
        }
        added
    }

    /// Positions of the current flood region
    pub fn flood_region(&self) -> BTreeSet<Position> {
        let mask = self.region_mask();
        (0..mask.len())
            .filter(|&idx| mask[idx])
            .map(|idx| self.position(idx))
            .collect()
    }

    /// True when every traversable cell shares the origin's color.
    ///
    /// Stone, Void and layered Ice cells are ignored whatever their color.
    pub fn is_complete(&self) -> bool {
        let target = self.region_color();
        self.colors
            .iter()
            .zip(&self.tags)
            .all(|(color, tag)| !tag.can_flood_traverse() || *color == target)
    }

    /// Recolor the flood region and absorb matching neighbors.
    ///
    /// Ice adjacent to the final region loses one layer (at most once per move);
    /// a single remaining layer thaws the cell back to Normal.
    pub fn flood(&mut self, new_color: Color) -> FloodReport {
        let mut absorbed = self.region_mask();

        let mut queue = VecDeque::new();
        for idx in 0..absorbed.len() {
            if absorbed[idx] {
                self.colors[idx] = new_color;
                queue.push_back(self.position(idx));
            }
        }

        let added = self.expand(&mut absorbed, &mut queue, new_color);

        for (color, inside) in self.colors.iter_mut().zip(&absorbed) {
            if *inside {
                *color = new_color;
            }
        }

        let cracked_ice = self.crack_adjacent_ice(&absorbed);

        FloodReport {
            absorbed: added,
            cracked_ice,
        }
    }

    fn crack_adjacent_ice(&mut self, absorbed: &[bool]) -> Vec<Position> {
        let mut seen = vec![false; absorbed.len()];
        let mut cracked = Vec::new();

        for idx in (0..absorbed.len()).filter(|&i| absorbed[i]) {
            for next in self.neighbors(self.position(idx)) {
                let nidx = self.index(next);
                if absorbed[nidx] || seen[nidx] {
                    continue;
                }
                if let CellTag::Ice { layers } = self.tags[nidx] {
                    seen[nidx] = true;
                    self.tags[nidx] = if layers <= 1 {
                        CellTag::Normal
                    } else {
                        CellTag::Ice { layers: layers - 1 }
                    };
                    cracked.push(next);
                }
            }
        }

        cracked
    }

    /// Preview the cells `new_color` would absorb, as BFS waves.
    ///
    /// Wave 0 holds the matching cells touching the current region; wave k+1
    /// holds matching cells touching wave k. Empty when nothing would be
    /// absorbed, which includes `new_color == region_color()`. Does not
    /// mutate the board, and matches what [`Board::flood`] absorbs.
    pub fn cells_absorbed_by(&self, new_color: Color) -> Vec<Wave> {
        let mut visited = self.region_mask();
        let mut frontier: Vec<Position> = (0..visited.len())
            .filter(|&i| visited[i])
            .map(|i| self.position(i))
            .collect();

        let mut waves = Vec::new();
        loop {
            let mut wave = Vec::new();
            for &pos in &frontier {
                for next in self.neighbors(pos) {
                    let idx = self.index(next);
                    if visited[idx]
                        || !self.tags[idx].can_flood_traverse()
                        || self.colors[idx] != new_color
                    {
                        continue;
                    }
                    visited[idx] = true;
                    wave.push(next);
                }
            }

            if wave.is_empty() {
                break;
            }
            frontier = wave.clone();
            waves.push(wave);
        }

        waves
    }

    /// Whether flooding with `new_color` would finish the board.
    /// Simulated on a private copy.
    pub fn would_complete(&self, new_color: Color) -> bool {
        let mut scratch = self.clone();
        scratch.flood(new_color);
        scratch.is_complete()
    }

    /// Decrement every running countdown by one, saturating at 0.
    /// Returns how many countdowns ticked.
    pub fn tick_countdowns(&mut self) -> usize {
        let mut ticked = 0;
        for tag in &mut self.tags {
            if let CellTag::Countdown { moves_left } = tag {
                if *moves_left > 0 {
                    *moves_left -= 1;
                    ticked += 1;
                }
            }
        }
        ticked
    }

    /// Block the edge between `pos` and its neighbor in `dir`, on both sides.
    /// No-op when either cell is off the board.
    pub fn add_wall(&mut self, pos: Position, dir: Direction) {
        if !pos.in_bounds(self.size) {
            return;
        }
        let Some(neighbor) = pos.step(dir, self.size) else {
            return;
        };
        self.walls.insert(WallEdge::new(pos, dir));
        self.walls.insert(WallEdge::new(neighbor, dir.opposite()));
    }

    pub fn has_wall(&self, pos: Position, dir: Direction) -> bool {
        self.walls.contains(&WallEdge::new(pos, dir))
    }

    /// Every stored wall edge, mirrored edges included
    pub fn walls(&self) -> impl Iterator<Item = &WallEdge> {
        self.walls.iter()
    }

    /// Number of Stone/Void-free cells
    pub fn playable_cells(&self) -> usize {
        self.tags.iter().filter(|t| t.is_playable()).count()
    }

    /// Every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.colors.len()).map(|idx| self.position(idx))
    }

    /// Colors as rows (for display and snapshots)
    pub fn rows(&self) -> Vec<Vec<Color>> {
        self.colors.chunks(self.size).map(|r| r.to_vec()).collect()
    }

    /// Tags as rows (for display and snapshots)
    pub fn tag_rows(&self) -> Vec<Vec<CellTag>> {
        self.tags.chunks(self.size).map(|r| r.to_vec()).collect()
    }

    /// Row-major color slice
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

fn assert_size(size: usize) {
    assert!(
        (1..=MAX_GRID_SIZE).contains(&size),
        "grid size must be in 1..={}, got {}",
        MAX_GRID_SIZE,
        size
    );
}
