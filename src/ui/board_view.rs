//! Board rendering for the GUI

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::analysis::GapRegistry;
use crate::geometry::neighbors8;
use crate::rules::{is_diagonal_crossed, is_legal_move};
use crate::{Board, Pos, Stone};

use super::theme::*;

/// What the board view should draw on top of the stones
pub struct Overlay<'a> {
    pub last_move: Option<Pos>,
    pub winning_path: &'a [Pos],
    /// Registered patterns of both players
    pub patterns: Option<&'a GapRegistry>,
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
    size: usize,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 30.0,
            board_rect: Rect::NOTHING,
            size: crate::BOARD_SIZE,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked cell, if legal for `current_turn`
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        board: &Board,
        current_turn: Stone,
        overlay: &Overlay<'_>,
        interactive: bool,
    ) -> Option<Pos> {
        let available_size = ui.available_size();
        self.size = board.size();

        let board_px = available_size.x.min(available_size.y) - 20.0;
        self.cell_size = (board_px - 2.0 * BOARD_MARGIN) / (self.size as f32 - 1.0).max(1.0);

        let (response, painter) =
            ui.allocate_painter(Vec2::new(board_px, board_px), Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);
        self.draw_goal_edges(&painter);
        self.draw_grid(&painter);
        self.draw_coordinates(&painter);

        if let Some(registry) = overlay.patterns {
            self.draw_patterns(&painter, registry);
        }
        self.draw_links(&painter, board);
        self.draw_stones(&painter, board);

        if let Some(pos) = overlay.last_move {
            self.draw_last_move_marker(&painter, pos);
        }
        if !overlay.winning_path.is_empty() {
            self.draw_winning_path(&painter, overlay.winning_path);
        }

        let mut clicked_pos = None;
        if interactive {
            if let Some(pointer_pos) = response.hover_pos() {
                if let Some(board_pos) = self.screen_to_board(pointer_pos) {
                    let is_valid = is_legal_move(board, board_pos, current_turn);
                    self.draw_hover_preview(&painter, board_pos, current_turn, is_valid);

                    if response.clicked() && is_valid {
                        clicked_pos = Some(board_pos);
                    }
                }
            }
        }

        clicked_pos
    }

    fn last_line(&self) -> f32 {
        BOARD_MARGIN + (self.size as f32 - 1.0) * self.cell_size
    }

    /// Black's goal edges above and below the grid, White's left and right
    fn draw_goal_edges(&self, painter: &Painter) {
        let min = self.board_rect.min;
        let near = BOARD_MARGIN * 0.5;
        let far = self.last_line() + BOARD_MARGIN * 0.5;
        let (from, to) = (BOARD_MARGIN, self.last_line());

        let black = Stroke::new(EDGE_WIDTH, BLACK_EDGE);
        painter.line_segment([min + Vec2::new(from, near), min + Vec2::new(to, near)], black);
        painter.line_segment([min + Vec2::new(from, far), min + Vec2::new(to, far)], black);

        let white = Stroke::new(EDGE_WIDTH, WHITE_EDGE);
        painter.line_segment([min + Vec2::new(near, from), min + Vec2::new(near, to)], white);
        painter.line_segment([min + Vec2::new(far, from), min + Vec2::new(far, to)], white);
    }

    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let end = self.last_line();

        for i in 0..self.size {
            let offset = BOARD_MARGIN + i as f32 * self.cell_size;

            let start = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN);
            let stop = self.board_rect.min + Vec2::new(offset, end);
            painter.line_segment([start, stop], stroke);

            let start = self.board_rect.min + Vec2::new(BOARD_MARGIN, offset);
            let stop = self.board_rect.min + Vec2::new(end, offset);
            painter.line_segment([start, stop], stroke);
        }
    }

    /// Column letters across the top, row numbers down the left
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(11.0);

        for col in 0..self.size {
            let letter = (b'A' + col as u8) as char;
            let x = self.board_rect.min.x + BOARD_MARGIN + col as f32 * self.cell_size;
            let pos = Pos2::new(x, self.board_rect.min.y + 8.0);
            painter.text(pos, egui::Align2::CENTER_CENTER, letter, font.clone(), GRID_LINE);
        }

        for row in 0..self.size {
            let y = self.board_rect.min.y + BOARD_MARGIN + row as f32 * self.cell_size;
            let pos = Pos2::new(self.board_rect.min.x + 8.0, y);
            painter.text(
                pos,
                egui::Align2::CENTER_CENTER,
                format!("{}", row + 1),
                font.clone(),
                GRID_LINE,
            );
        }
    }

    /// Thin lines between pattern endpoints, coloured by safety
    fn draw_patterns(&self, painter: &Painter, registry: &GapRegistry) {
        for gap in registry.gaps() {
            let (a, b) = gap.endpoints();
            let color = if gap.threatened { GAP_THREATENED } else { GAP_SAFE };
            painter.line_segment(
                [self.board_to_screen(a), self.board_to_screen(b)],
                Stroke::new(GAP_WIDTH, color),
            );
            for &cell in &gap.usable_cells {
                painter.circle_stroke(self.board_to_screen(cell), 3.0, Stroke::new(1.0, color));
            }
        }
    }

    /// Lines between touching stones of one colour, crossed diagonals left out
    fn draw_links(&self, painter: &Painter, board: &Board) {
        for stone in [Stone::Black, Stone::White] {
            let color = if stone == Stone::Black { BLACK_LINK } else { WHITE_LINK };
            let stroke = Stroke::new(LINK_WIDTH, color);
            for pos in board.player_positions(stone) {
                for n in neighbors8(pos, board.size()) {
                    if n <= pos || board.get(n) != stone {
                        continue;
                    }
                    if is_diagonal_crossed(board, pos, n, stone) {
                        continue;
                    }
                    painter.line_segment([self.board_to_screen(pos), self.board_to_screen(n)], stroke);
                }
            }
        }
    }

    fn draw_stones(&self, painter: &Painter, board: &Board) {
        for pos in board.positions() {
            let stone = board.get(pos);
            if stone != Stone::Empty {
                self.draw_stone(painter, pos, stone);
            }
        }
    }

    /// Draw a single stone with visual polish
    fn draw_stone(&self, painter: &Painter, pos: Pos, stone: Stone) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * STONE_RADIUS_RATIO;
        let shadow_offset = Vec2::new(2.0, 2.0);

        match stone {
            Stone::Black => {
                painter.circle_filled(
                    center + shadow_offset,
                    radius,
                    Color32::from_rgba_unmultiplied(0, 0, 0, 60),
                );
                painter.circle_filled(center, radius, BLACK_STONE);
                let highlight_offset = Vec2::new(-radius * 0.3, -radius * 0.3);
                painter.circle_filled(center + highlight_offset, radius * 0.2, BLACK_STONE_HIGHLIGHT);
            }
            Stone::White => {
                painter.circle_filled(
                    center + shadow_offset,
                    radius,
                    Color32::from_rgba_unmultiplied(0, 0, 0, 40),
                );
                painter.circle_filled(center, radius, WHITE_STONE);
                painter.circle_stroke(
                    center,
                    radius * 0.85,
                    Stroke::new(radius * 0.1, WHITE_STONE_SHADOW),
                );
            }
            Stone::Empty => {}
        }
    }

    fn draw_last_move_marker(&self, painter: &Painter, pos: Pos) {
        let center = self.board_to_screen(pos);
        painter.circle_filled(center, LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
    }

    fn draw_winning_path(&self, painter: &Painter, path: &[Pos]) {
        let stroke = Stroke::new(4.0, WIN_HIGHLIGHT);
        for pair in path.windows(2) {
            painter.line_segment(
                [self.board_to_screen(pair[0]), self.board_to_screen(pair[1])],
                stroke,
            );
        }
        let radius = self.cell_size * STONE_RADIUS_RATIO + 3.0;
        for &pos in path {
            painter.circle_stroke(self.board_to_screen(pos), radius, stroke);
        }
    }

    fn draw_hover_preview(&self, painter: &Painter, pos: Pos, turn: Stone, is_valid: bool) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * STONE_RADIUS_RATIO;

        let color = if is_valid {
            match turn {
                Stone::Black => Color32::from_rgba_unmultiplied(20, 20, 20, 80),
                Stone::White => Color32::from_rgba_unmultiplied(240, 240, 240, 80),
                Stone::Empty => hover_valid(),
            }
        } else {
            hover_invalid()
        };

        painter.circle_filled(center, radius, color);
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min;
        let x = (relative.x - BOARD_MARGIN + self.cell_size * 0.5) / self.cell_size;
        let y = (relative.y - BOARD_MARGIN + self.cell_size * 0.5) / self.cell_size;

        let col = x.floor() as i32;
        let row = y.floor() as i32;

        if col >= 0 && col < self.size as i32 && row >= 0 && row < self.size as i32 {
            Some(Pos::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Convert board position to screen coordinates
    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        let x = self.board_rect.min.x + BOARD_MARGIN + pos.col as f32 * self.cell_size;
        let y = self.board_rect.min.y + BOARD_MARGIN + pos.row as f32 * self.cell_size;
        Pos2::new(x, y)
    }
}
