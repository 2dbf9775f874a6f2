use std::collections::VecDeque;

use hashbrown::HashSet;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::placement;
use crate::*;

/// Valid transitions:
/// - Ready -> Active (first primary action seeds the board)
/// - Active -> Lost (primary action on a mine)
/// - Lost -> Ready (acknowledged defeat, board reset)
///
/// There is no terminal win state: clearing every safe cell leaves the
/// engine `Active`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Active,
    Lost,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_lost(self) -> bool {
        matches!(self, Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Outcome of a primary action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The clicked cell (and possibly a cascaded region) is now shown.
    Revealed,
    /// The clicked cell held a mine. The defeat must be acknowledged
    /// before the engine accepts new moves.
    Defeat,
}

/// Per-action buffer of display patches; most actions touch few cells.
pub type PatchList = SmallVec<[CellPatch; 8]>;

/// Display updates produced by one primary action. On `Defeat` the list
/// already carries every mine tagged `Bomb`, the clicked one first.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealUpdate {
    pub outcome: RevealOutcome,
    pub patches: PatchList,
}

/// One game of Minesweeper from first click to (at most) defeat. Owns the
/// board outright; the View drives it through [`primary_action`],
/// [`secondary_action`] and [`acknowledge_defeat`], and renders from the
/// returned patches.
///
/// [`primary_action`]: GameEngine::primary_action
/// [`secondary_action`]: GameEngine::secondary_action
/// [`acknowledge_defeat`]: GameEngine::acknowledge_defeat
#[derive(Clone, Debug)]
pub struct GameEngine {
    board: Board,
    state: EngineState,
    mine_count: Option<u8>,
    // one counter for the whole board, advanced by every secondary action
    // regardless of target cell, and kept across board resets
    annotation_counter: u8,
    rng: SmallRng,
}

impl GameEngine {
    /// Engine with an entropy-seeded mine generator.
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Engine with a deterministic mine generator.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            board: Board::new(),
            state: EngineState::Ready,
            mine_count: None,
            annotation_counter: 0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Engine over a predetermined mine layout, already seeded and
    /// counted. Used for replays and tests.
    pub fn with_mines(mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Board::new();
        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            let cell = &mut board[coords];
            cell.mine = true;
            cell.adjacent_mines = MINE_SENTINEL;
        }
        placement::tally_adjacent_mines(&mut board);

        let mine_count = board.mine_cell_count();
        Ok(Self {
            board,
            state: EngineState::Active,
            mine_count: Some(mine_count),
            annotation_counter: 0,
            rng: SmallRng::seed_from_u64(0),
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Mines on the current board; `None` until the first primary action
    /// of a game has seeded them.
    pub fn mine_count(&self) -> Option<u8> {
        self.mine_count
    }

    /// Handles a primary (reveal) action at `coords`. The very first one
    /// of a game marks the clicked cell revealed, seeds the mines around
    /// it and tallies adjacency before the cascade runs.
    pub fn primary_action(&mut self, coords: Coord2) -> Result<RevealUpdate> {
        let coords = self.board.validate_coords(coords)?;
        self.check_not_lost()?;

        if self.state.is_ready() {
            // revealing the clicked cell first is what keeps it out of
            // the mine draw
            self.board[coords].revealed = true;
            let mine_count = placement::seed_mines(&mut self.board, &mut self.rng);
            placement::tally_adjacent_mines(&mut self.board);
            self.mine_count = Some(mine_count);
            self.state = EngineState::Active;
            log::debug!("first reveal at {:?} started the game", coords);
        }

        let mut patches = PatchList::new();
        self.reveal_from(coords, &mut patches);

        if self.board[coords].is_mine() {
            self.expose_remaining_mines(coords, &mut patches);
            self.state = EngineState::Lost;
            log::debug!("mine hit at {:?}, defeat pending", coords);
            return Ok(RevealUpdate {
                outcome: RevealOutcome::Defeat,
                patches,
            });
        }

        Ok(RevealUpdate {
            outcome: RevealOutcome::Revealed,
            patches,
        })
    }

    /// Handles a secondary (annotate) action at `coords`: advances the
    /// shared counter and retags the target cell. Independent of reveal
    /// state; revealed and hidden cells alike take the new tag.
    pub fn secondary_action(&mut self, coords: Coord2) -> Result<CellPatch> {
        let coords = self.board.validate_coords(coords)?;
        self.check_not_lost()?;

        self.annotation_counter = (self.annotation_counter + 1) % 3;
        let tag = AnnotationTag::from_counter(self.annotation_counter);
        self.board[coords].annotation = tag;
        Ok(CellPatch::new(coords, tag.visual_tag()))
    }

    /// Completes a lost game: clears the board and returns to `Ready`.
    /// The annotation counter is engine-wide state and is not reset.
    pub fn acknowledge_defeat(&mut self) -> Result<()> {
        if !self.state.is_lost() {
            return Err(GameError::NotDefeated);
        }
        self.board.reset();
        self.mine_count = None;
        self.state = EngineState::Ready;
        log::debug!("board reset after defeat");
        Ok(())
    }

    /// Display tag for a full re-render of one cell: the revealed tag for
    /// revealed cells, the annotation tag otherwise.
    pub fn tag_at(&self, coords: Coord2) -> Result<VisualTag> {
        let coords = self.board.validate_coords(coords)?;
        let cell = self.board[coords];
        Ok(if cell.is_revealed() {
            cell.revealed_tag()
        } else {
            cell.annotation().visual_tag()
        })
    }

    /// Work-queue flood fill. Opens the origin unconditionally; from a
    /// blank origin it cascades through the blank-connected region and
    /// opens its numbered border. Mine neighbors carry the sentinel count
    /// and match neither branch, so the cascade can only ever expose the
    /// origin itself.
    fn reveal_from(&mut self, origin: Coord2, patches: &mut PatchList) {
        self.open_single(origin, patches);

        if self.board[origin].adjacent_mines != 0 {
            return;
        }

        let mut visited: HashSet<Coord2> = HashSet::from_iter([origin]);
        let mut frontier: VecDeque<Coord2> = neighbors(origin)
            .filter(|&pos| !self.board[pos].revealed)
            .collect();

        while let Some(pos) = frontier.pop_front() {
            if !visited.insert(pos) {
                continue;
            }
            if self.board[pos].revealed {
                continue;
            }

            match self.board[pos].adjacent_mines {
                0 => {
                    self.open_single(pos, patches);
                    frontier.extend(
                        neighbors(pos)
                            .filter(|&next| !self.board[next].revealed)
                            .filter(|next| !visited.contains(next)),
                    );
                }
                count if count > 0 => self.open_single(pos, patches),
                _ => {}
            }
        }
    }

    fn open_single(&mut self, coords: Coord2, patches: &mut PatchList) {
        let cell = &mut self.board[coords];
        cell.revealed = true;
        let tag = cell.revealed_tag();
        log::trace!("opened {:?} as {:?}", coords, tag);
        patches.push(CellPatch::new(coords, tag));
    }

    fn expose_remaining_mines(&mut self, hit: Coord2, patches: &mut PatchList) {
        for coords in Board::iter_coords() {
            if coords == hit {
                continue;
            }
            if self.board[coords].is_mine() {
                patches.push(CellPatch::new(coords, VisualTag::Bomb));
            }
        }
    }

    fn check_not_lost(&self) -> Result<()> {
        if self.state.is_lost() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}
