use alloc::vec;
use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    HitMine,
    /// Number of cells newly opened by this call, flood included.
    Opened(CellCount),
}

impl OpenOutcome {
    pub const fn hit_mine(self) -> bool {
        matches!(self, Self::HitMine)
    }

    pub const fn has_update(self) -> bool {
        match self {
            Self::HitMine => true,
            Self::Opened(count) => count > 0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// The minefield and the player's progress on it.
///
/// `opened_count` only counts safe cells and `flagged_count` only counts
/// unopened flagged cells. Both are maintained incrementally.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
    opened_count: CellCount,
    flagged_count: CellCount,
}

impl Grid {
    /// Places `config.mines()` mines uniformly at random, without replacement.
    pub fn new<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Self {
        let (height, width) = config.size();
        let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());

        let picks = rand::seq::index::sample(
            rng,
            config.total_cells().into(),
            config.mines().into(),
        );
        for index in picks.iter() {
            let width = usize::from(width);
            mine_mask[[index / width, index % width]] = true;
        }

        log::debug!(
            "new {}x{} grid with {} mines",
            height,
            width,
            config.mines()
        );
        Self::from_mine_mask(&mine_mask, config.mines())
    }

    /// Builds a grid with mines at exactly `mines`; duplicates count once.
    pub fn with_mines(size: Coord2, mines: &[Coord2]) -> Result<Self> {
        if size.0 < MIN_SIDE || size.1 < MIN_SIDE {
            return Err(GameError::InvalidDimensions);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mines {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        let config = GameConfig::new(
            size,
            mine_count.try_into().map_err(|_| GameError::InvalidMineCount {
                max: GameConfig::max_mines(size),
            })?,
        )?;
        Ok(Self::from_mine_mask(&mine_mask, config.mines()))
    }

    fn from_mine_mask(mine_mask: &Array2<bool>, mine_count: CellCount) -> Self {
        let cells = Array2::from_shape_fn(mine_mask.dim(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            Cell::new(mine_mask[[row, col]], count_adjacent(mine_mask, coords))
        });

        Self {
            cells,
            mine_count,
            opened_count: 0,
            flagged_count: 0,
        }
    }

    pub fn size(&self) -> Coord2 {
        let (height, width) = self.cells.dim();
        (height as Coord, width as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn opened_count(&self) -> CellCount {
        self.opened_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn total_cells(&self) -> CellCount {
        let (height, width) = self.size();
        mult(height, width)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    /// Mines not yet accounted for by a flag; negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flagged_count as isize)
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        let (height, width) = self.size();
        row < height && col < width
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        self.cells
            .get(coords.to_nd_index())
            .copied()
            .ok_or(GameError::InvalidCoords)
    }

    /// Every mine flagged and every safe cell opened.
    pub fn is_won(&self) -> bool {
        self.flagged_count == self.mine_count && self.opened_count == self.safe_cell_count()
    }

    /// Opens a cell, cascading through zero-count regions.
    ///
    /// Opening a mine changes nothing and reports [`OpenOutcome::HitMine`].
    /// Opening a flagged safe cell removes its flag.
    pub fn open_cell(&mut self, coords: Coord2) -> Result<OpenOutcome> {
        let coords = self.validate_coords(coords)?;

        if self[coords].is_mine() {
            log::debug!("mine hit at {:?}", coords);
            return Ok(OpenOutcome::HitMine);
        }

        let opened_before = self.opened_count;
        self.open_single_cell(coords);

        if self[coords].adjacent_mines() == 0 {
            self.flood_open(coords);
        }

        let opened = self.opened_count - opened_before;
        log::trace!("opened {} cells from {:?}", opened, coords);
        Ok(OpenOutcome::Opened(opened))
    }

    /// Toggles the flag of an unopened cell.
    pub fn set_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        if cell.is_opened() {
            return Ok(FlagOutcome::NoChange);
        }

        Ok(if cell.toggle_flag() {
            self.flagged_count += 1;
            FlagOutcome::Flagged
        } else {
            self.flagged_count -= 1;
            FlagOutcome::Unflagged
        })
    }

    /// Classifies a cell for display; mines only show when `reveal_mines` is set.
    pub fn cell_view(&self, coords: Coord2, reveal_mines: bool) -> Result<CellView> {
        self.cell(coords)
            .map(|cell| classify(cell, reveal_mines))
    }

    /// Rows of cell classifications, top to bottom.
    pub fn rows(
        &self,
        reveal_mines: bool,
    ) -> impl Iterator<Item = impl Iterator<Item = CellView> + '_> + '_ {
        self.cells.rows().into_iter().map(move |row| {
            row.into_iter()
                .map(move |&cell| classify(cell, reveal_mines))
        })
    }

    /// Verifies counters, adjacency and mine placement agree with each other.
    ///
    /// Used to reject damaged saved games before they are played.
    pub fn check_consistency(&self) -> Result<()> {
        let (height, width) = self.cells.dim();
        let max_side = usize::from(Coord::MAX);
        let min_side = usize::from(MIN_SIDE);
        if !(min_side..=max_side).contains(&height) || !(min_side..=max_side).contains(&width) {
            return Err(GameError::CorruptState);
        }
        let size = self.size();

        let mine_mask = self.cells.map(|cell| cell.is_mine());
        let mut mines: CellCount = 0;
        let mut opened: CellCount = 0;
        let mut flagged: CellCount = 0;

        for ((row, col), cell) in self.cells.indexed_iter() {
            let coords = (row as Coord, col as Coord);
            if cell.adjacent_mines() != count_adjacent(&mine_mask, coords) {
                return Err(GameError::CorruptState);
            }
            if cell.is_opened() && (cell.is_mine() || cell.is_flagged()) {
                return Err(GameError::CorruptState);
            }
            mines += CellCount::from(cell.is_mine());
            opened += CellCount::from(cell.is_opened());
            flagged += CellCount::from(cell.is_flagged());
        }

        let consistent = mines == self.mine_count
            && GameConfig::new(size, mines).is_ok()
            && opened == self.opened_count
            && flagged == self.flagged_count;
        if consistent {
            Ok(())
        } else {
            Err(GameError::CorruptState)
        }
    }

    /// Opens one safe cell. Returns whether it was newly opened.
    fn open_single_cell(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_opened() || cell.is_mine() {
            return false;
        }

        if cell.open() {
            self.flagged_count -= 1;
        }
        self.opened_count += 1;
        true
    }

    /// Worklist flood from a zero-count cell; each cell is opened at most once.
    fn flood_open(&mut self, start: Coord2) {
        let mut to_visit = vec![start];

        while let Some(coords) = to_visit.pop() {
            for pos in self.iter_neighbors(coords) {
                if self.open_single_cell(pos) && self[pos].adjacent_mines() == 0 {
                    to_visit.push(pos);
                }
            }
        }
    }

    fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

fn count_adjacent(mine_mask: &Array2<bool>, coords: Coord2) -> u8 {
    let (height, width) = mine_mask.dim();
    NeighborIter::new(coords, (height as Coord, width as Coord))
        .filter(|&pos| mine_mask[pos.to_nd_index()])
        .count() as u8
}

const fn classify(cell: Cell, reveal_mines: bool) -> CellView {
    if cell.is_opened() {
        CellView::Opened(cell.adjacent_mines())
    } else if reveal_mines && cell.is_mine() {
        CellView::Mine
    } else if cell.is_flagged() {
        CellView::Flagged
    } else {
        CellView::Hidden
    }
}
