use std::{
    fmt,
    ops::Range,
    sync::atomic::{AtomicU8, Ordering},
};

use itertools::Itertools;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use super::{pos::Position, rule::Rule};

/// What a board has to offer for the simulation to drive it.
pub trait LifeBoard {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Anything outside the board reads as dead.
    fn is_alive(&self, pos: Position) -> bool;

    /// Out-of-range positions are ignored.
    fn set_alive(&mut self, pos: Position);

    /// Out-of-range positions are ignored.
    fn set_dead(&mut self, pos: Position);

    fn toggle(&mut self, pos: Position) {
        if self.is_alive(pos) {
            self.set_dead(pos);
        } else {
            self.set_alive(pos);
        }
    }

    fn alive_count(&self) -> usize;

    fn clear(&mut self);

    fn next_generation(&mut self, rule: &Rule);

    /// A fully independent copy of the board.
    fn snapshot(&self) -> Self
    where
        Self: Sized;
}

/// Fixed-size dense board.
///
/// The first and last rows never receive neighbour contributions, so they
/// stay dead unless set directly. The outer columns take part like any
/// other column.
#[derive(Debug)]
pub struct GameBoard {
    width: usize,
    height: usize,
    tiles: Vec<TileState>,
    neighbours: Vec<AtomicU8>,
    alive_count: usize,
    workers: usize,
}

impl GameBoard {
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        let tiles = vec![TileState::default(); width * height];
        Self::with_tiles(width, height, tiles)
    }

    /// # Panics
    ///
    /// Panics if either dimension is zero or `tiles` doesn't hold exactly
    /// `width * height` entries.
    pub fn with_tiles(width: usize, height: usize, tiles: Vec<TileState>) -> Self {
        assert!(width > 0 && height > 0, "Board dimensions must be positive");

        let mut board = Self {
            width,
            height,
            tiles: Vec::new(),
            neighbours: Vec::new(),
            alive_count: 0,
            workers: 1,
        };
        board.replace_tiles(tiles);
        board
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Number of column partitions aggregated concurrently per generation.
    pub fn set_workers(&mut self, workers: usize) {
        self.workers = workers.max(1);
    }

    pub fn tile<P>(&self, pos: P) -> Option<&TileState>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        self.tiles.get(index)
    }

    pub fn enumerate_tiles(&self) -> impl Iterator<Item = (Position, &TileState)> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| (self.index_to_pos(index), tile))
    }

    /// Bulk replacement. Neighbour counts start over from zero and the alive
    /// count is rescanned.
    ///
    /// # Panics
    ///
    /// Panics if `tiles` doesn't hold exactly `width * height` entries.
    pub fn replace_tiles(&mut self, tiles: Vec<TileState>) {
        assert_eq!(
            tiles.len(),
            self.width * self.height,
            "Tile count doesn't match board dimensions"
        );

        self.alive_count = tiles
            .iter()
            .filter(|tile| **tile == TileState::Alive)
            .count();
        self.neighbours = (0..tiles.len()).map(|_| AtomicU8::new(0)).collect();
        self.tiles = tiles;
    }

    pub fn neighbour_count<P>(&self, pos: P) -> Option<u8>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        Some(self.neighbours[index].load(Ordering::Relaxed))
    }

    pub fn reset_neighbour_count<P>(&self, pos: P)
    where
        P: Into<Position>,
    {
        if let Some(index) = self.pos_to_index(pos) {
            self.neighbours[index].store(0, Ordering::Relaxed);
        }
    }

    pub fn increment_neighbour_count<P>(&self, pos: P)
    where
        P: Into<Position>,
    {
        if let Some(index) = self.pos_to_index(pos) {
            self.neighbours[index].fetch_add(1, Ordering::Relaxed);
        }
    }

    fn reset_neighbour_counts(&self) {
        for count in &self.neighbours {
            count.store(0, Ordering::Relaxed);
        }
    }

    /// Recounts every neighbour from scratch on the calling thread.
    pub fn aggregate_neighbours(&self) {
        self.reset_neighbour_counts();
        self.aggregate_columns(0..self.width);
    }

    /// Recounts every neighbour with one rayon task per column range.
    ///
    /// `partitions` must be disjoint; together they should cover
    /// `0..width` for the result to match [`Self::aggregate_neighbours`].
    pub fn aggregate_neighbours_partitioned(&self, partitions: &[Range<usize>]) {
        self.reset_neighbour_counts();

        partitions
            .par_iter()
            .for_each(|columns| self.aggregate_columns(columns.clone()));
    }

    /// Adds the contributions of the alive cells in `columns` to the counts
    /// of their neighbours. Does not reset anything first.
    ///
    /// Safe to call concurrently for disjoint ranges. Contributions land in
    /// columns `start - 1 ..= end`; the two columns on either side of each
    /// range edge may also be written by the neighbouring range and are
    /// updated atomically, everything strictly inside is owned by this call.
    pub fn aggregate_columns(&self, columns: Range<usize>) {
        let columns = columns.start..columns.end.min(self.width);

        if self.height < 3 || columns.is_empty() {
            return;
        }

        let last_interior_row = self.height - 2;

        for x in columns.clone() {
            for y in 1..=last_interior_row {
                if self.tiles[x + y * self.width] != TileState::Alive {
                    continue;
                }

                let neighbour_columns = x.saturating_sub(1)..=(x + 1).min(self.width - 1);
                let neighbour_rows = (y - 1).max(1)..=(y + 1).min(last_interior_row);

                for (nx, ny) in neighbour_columns.cartesian_product(neighbour_rows) {
                    if (nx, ny) == (x, y) {
                        continue;
                    }

                    let count = &self.neighbours[nx + ny * self.width];

                    if nx <= columns.start || nx + 1 >= columns.end {
                        count.fetch_add(1, Ordering::Relaxed);
                    } else {
                        count.store(count.load(Ordering::Relaxed) + 1, Ordering::Relaxed);
                    }
                }
            }
        }
    }

    /// The next generation's tiles, computed into a fresh buffer from the
    /// current neighbour counts.
    pub fn apply_rule(&self, rule: &Rule) -> Vec<TileState> {
        self.tiles
            .iter()
            .zip(&self.neighbours)
            .map(|(tile, count)| {
                let alive_neighbour_count = count.load(Ordering::Relaxed) as usize;

                let alive = match tile {
                    TileState::Alive => rule.is_survival(alive_neighbour_count),
                    TileState::Dead => rule.is_birth(alive_neighbour_count),
                };

                if alive {
                    TileState::Alive
                } else {
                    TileState::Dead
                }
            })
            .collect()
    }

    fn pos_to_index<P>(&self, pos: P) -> Option<usize>
    where
        P: Into<Position>,
    {
        let Position { x, y } = pos.into();

        if x >= self.width {
            return None;
        }

        if y >= self.height {
            return None;
        }

        Some(x + (y * self.width))
    }

    fn index_to_pos(&self, index: usize) -> Position {
        let y = index / self.width;
        let x = index % self.width;
        Position { x, y }
    }
}

impl LifeBoard for GameBoard {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn is_alive(&self, pos: Position) -> bool {
        self.tile(pos) == Some(&TileState::Alive)
    }

    fn set_alive(&mut self, pos: Position) {
        let Some(index) = self.pos_to_index(pos) else {
            return;
        };

        if self.tiles[index] == TileState::Dead {
            self.tiles[index] = TileState::Alive;
            self.alive_count += 1;
        }
    }

    fn set_dead(&mut self, pos: Position) {
        let Some(index) = self.pos_to_index(pos) else {
            return;
        };

        if self.tiles[index] == TileState::Alive {
            self.tiles[index] = TileState::Dead;
            self.alive_count -= 1;
        }
    }

    fn alive_count(&self) -> usize {
        self.alive_count
    }

    fn clear(&mut self) {
        self.tiles.fill(TileState::Dead);
        self.reset_neighbour_counts();
        self.alive_count = 0;
    }

    fn next_generation(&mut self, rule: &Rule) {
        if self.workers > 1 {
            let partitions = column_partitions(self.width, self.workers);
            self.aggregate_neighbours_partitioned(&partitions);
        } else {
            self.aggregate_neighbours();
        }

        let next_tiles = self.apply_rule(rule);
        self.replace_tiles(next_tiles);
    }

    fn snapshot(&self) -> Self {
        self.clone()
    }
}

impl Clone for GameBoard {
    fn clone(&self) -> Self {
        let mut board = Self::with_tiles(self.width, self.height, self.tiles.clone());
        board.workers = self.workers;
        board
    }
}

impl PartialEq for GameBoard {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.tiles == other.tiles
    }
}

impl Eq for GameBoard {}

impl fmt::Display for GameBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.width) {
            for tile in row {
                f.write_str(match tile {
                    TileState::Alive => "O",
                    TileState::Dead => ".",
                })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Splits `0..width` into at most `workers` contiguous ranges whose lengths
/// differ by at most one.
pub fn column_partitions(width: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.clamp(1, width.max(1));
    let base_len = width / workers;
    let longer_partitions = width % workers;

    let mut start = 0;
    (0..workers)
        .map(|partition| {
            let len = base_len + usize::from(partition < longer_partitions);
            let columns = start..start + len;
            start += len;
            columns
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileState {
    Alive,

    #[default]
    Dead,
}
