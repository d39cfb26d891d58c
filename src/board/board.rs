//! Board structure with move history

use super::bitboard::Bitboard;
use super::{Pos, Stone, BOARD_SIZE, MAX_BOARD_SIZE};

/// Result of applying a move through [`Board::make_move`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub success: bool,
    /// Raw win detection. Callers finalise the game themselves (see `AIEngine::has_any_gaps`).
    pub game_over: bool,
    pub winner: Option<Stone>,
}

/// Result of a raw win check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinCheck {
    pub is_win: bool,
    /// Stones of one connecting chain, start edge first (empty when no win)
    pub path: Vec<Pos>,
}

/// Game board. Stones are never removed once placed.
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    /// Black stones bitboard
    pub black: Bitboard,
    /// White stones bitboard
    pub white: Bitboard,
    /// Every placed stone in order; its length is the move count
    history: Vec<(Pos, Stone)>,
}

impl Board {
    /// Canonical 15x15 board
    pub fn new() -> Self {
        Self::with_size(BOARD_SIZE)
    }

    /// Board of the given size, clamped to 5..=19
    pub fn with_size(size: usize) -> Self {
        let size = size.clamp(5, MAX_BOARD_SIZE);
        Self {
            size,
            black: Bitboard::new(),
            white: Bitboard::new(),
            history: Vec::with_capacity(size * size),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of stones placed so far
    #[inline]
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Placed stones in order
    #[inline]
    pub fn history(&self) -> &[(Pos, Stone)] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<(Pos, Stone)> {
        self.history.last().copied()
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.black.contains(pos) {
            Stone::Black
        } else if self.white.contains(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Stone at signed coordinates; out-of-board reads as Empty
    #[inline]
    pub fn get_at(&self, row: i32, col: i32) -> Stone {
        match self.pos_at(row, col) {
            Some(pos) => self.get(pos),
            None => Stone::Empty,
        }
    }

    /// Convert signed coordinates into an on-board position
    #[inline]
    pub fn pos_at(&self, row: i32, col: i32) -> Option<Pos> {
        if self.is_valid_position(row, col) {
            Some(Pos::new(row as u8, col as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn is_valid_position(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.size as i32 && col >= 0 && col < self.size as i32
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        (pos.row as usize) < self.size && (pos.col as usize) < self.size
    }

    /// On the board and empty
    #[inline]
    pub fn is_valid_move(&self, row: i32, col: i32) -> bool {
        self.pos_at(row, col).is_some_and(|pos| self.is_empty(pos))
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.black.contains(pos) && !self.white.contains(pos)
    }

    /// Place a stone without any rule checks. Used for setting up positions.
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) {
        if !self.contains(pos) || !self.is_empty(pos) {
            return;
        }
        match stone {
            Stone::Black => self.black.insert(pos),
            Stone::White => self.white.insert(pos),
            Stone::Empty => return,
        }
        self.history.push((pos, stone));
    }

    /// Apply a game move: the cell must be on the board and empty.
    pub fn make_move(&mut self, pos: Pos, stone: Stone) -> MoveOutcome {
        if !stone.is_player() || !self.is_valid_move(pos.row as i32, pos.col as i32) {
            return MoveOutcome {
                success: false,
                game_over: false,
                winner: None,
            };
        }

        self.place_stone(pos, stone);
        let win = self.check_win(stone);
        MoveOutcome {
            success: true,
            game_over: win.is_win,
            winner: win.is_win.then_some(stone),
        }
    }

    /// Raw connection check for a player
    pub fn check_win(&self, stone: Stone) -> WinCheck {
        match crate::rules::find_winning_path(self, stone) {
            Some(path) => WinCheck { is_win: true, path },
            None => WinCheck {
                is_win: false,
                path: Vec::new(),
            },
        }
    }

    /// Stone set of a player (None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        }
    }

    /// All positions owned by a player, row-major
    pub fn player_positions(&self, stone: Stone) -> Vec<Pos> {
        self.stones(stone)
            .map(|bb| bb.iter().collect())
            .unwrap_or_default()
    }

    #[inline]
    pub fn stone_count(&self, stone: Stone) -> u32 {
        self.stones(stone).map_or(0, |bb| bb.len())
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.history.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.history.len() >= self.size * self.size
    }

    /// Every on-board position, row-major
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let size = self.size as u8;
        (0..size).flat_map(move |r| (0..size).map(move |c| Pos::new(r, c)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
