use board::{GameBoard, LifeBoard, TileState};
use pattern::Pattern;
use pos::Position;
use rule::Rule;

pub mod board;
pub mod error;
pub mod pattern;
pub mod pos;
pub mod rule;

/// A board together with the rule that evolves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation<B = GameBoard>
where
    B: LifeBoard,
{
    board: B,
    rule: Rule,
    generation: u64,
}

impl<B> Simulation<B>
where
    B: LifeBoard,
{
    pub fn new(board: B, rule: Rule) -> Self {
        Self {
            board,
            rule,
            generation: 0,
        }
    }

    pub fn next_generation(&mut self) {
        self.board.next_generation(&self.rule);
        self.generation += 1;
    }

    pub fn is_cell_alive<P>(&self, pos: P) -> bool
    where
        P: Into<Position>,
    {
        self.board.is_alive(pos.into())
    }

    pub fn toggle_cell<P>(&mut self, pos: P)
    where
        P: Into<Position>,
    {
        self.board.toggle(pos.into());
    }

    pub fn set_cell_alive<P>(&mut self, pos: P)
    where
        P: Into<Position>,
    {
        self.board.set_alive(pos.into());
    }

    pub fn set_cell_dead<P>(&mut self, pos: P)
    where
        P: Into<Position>,
    {
        self.board.set_dead(pos.into());
    }

    /// Copies `pattern` onto the board with its top-left corner at `origin`.
    ///
    /// Every cell of the pattern's bounding box is overwritten, cells
    /// outside it are left alone, and whatever hangs off the board is
    /// dropped.
    pub fn import_pattern<P>(&mut self, pattern: &Pattern, origin: P)
    where
        P: Into<Position>,
    {
        let origin = origin.into();

        for (pattern_pos, tile) in pattern.enumerate_tiles() {
            let Some(pos) = pattern_pos.translated(origin) else {
                continue;
            };

            match tile {
                TileState::Alive => self.board.set_alive(pos),
                TileState::Dead => self.board.set_dead(pos),
            }
        }
    }

    pub fn clear(&mut self) {
        self.board.clear();
        self.generation = 0;
    }

    pub fn snapshot(&self) -> B {
        self.board.snapshot()
    }

    pub fn live_cell_count(&self) -> usize {
        self.board.alive_count()
    }

    pub fn grid_width(&self) -> usize {
        self.board.width()
    }

    pub fn grid_height(&self) -> usize {
        self.board.height()
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn set_rule(&mut self, rule: Rule) {
        self.rule = rule;
    }

    /// Generations advanced since creation or the last [`Self::clear`].
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }
}
