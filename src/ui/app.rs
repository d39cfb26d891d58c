//! Main application for the GUI

use std::time::{Duration, Instant};

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, ScrollArea, SidePanel, TopBottomPanel};

use super::board_view::{BoardView, Overlay};
use super::game_state::{GameMode, GameResult, GameState};
use super::theme::*;
use crate::{Personality, Stone};

/// Pause between moves when two engines play each other
const AUTO_PLAY_DELAY: Duration = Duration::from_millis(300);

/// Main application
pub struct BridgesApp {
    state: GameState,
    board_view: BoardView,
    show_debug: bool,
    show_patterns: bool,
    verbose_logging: bool,
    auto_play: bool,
    last_auto_move: Instant,
}

impl BridgesApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, personality: Personality) -> Self {
        Self {
            state: GameState::new(GameMode::default(), personality),
            board_view: BoardView::default(),
            show_debug: true,
            show_patterns: false,
            verbose_logging: false,
            auto_play: false,
            last_auto_move: Instant::now(),
        }
    }

    fn new_game(&mut self, mode: GameMode) {
        self.auto_play = false;
        self.state.set_mode(mode);
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (play Black)").clicked() {
                        self.new_game(GameMode::PvE {
                            human_color: Stone::Black,
                        });
                        ui.close_menu();
                    }
                    if ui.button("New Game (play White)").clicked() {
                        self.new_game(GameMode::PvE {
                            human_color: Stone::White,
                        });
                        ui.close_menu();
                    }
                    if ui.button("New Game (AI vs AI)").clicked() {
                        self.new_game(GameMode::EvE);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Undo").clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                    ui.checkbox(&mut self.show_patterns, "Pattern Overlay (P)");
                    if ui.checkbox(&mut self.verbose_logging, "Verbose engine log").changed() {
                        self.state.set_debug_mode(self.verbose_logging);
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = match self.state.mode {
                        GameMode::PvE { human_color } => format!("You: {}", human_color.name()),
                        GameMode::EvE => "AI vs AI".to_string(),
                    };
                    ui.label(mode_text);
                    ui.label(
                        RichText::new(format!("AI: {}", self.state.personality().name))
                            .color(TEXT_SECONDARY),
                    );
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(260.0)
            .max_width(320.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ScrollArea::vertical().show(ui, |ui| {
                    ui.add_space(12.0);
                    self.render_title_card(ui);
                    ui.add_space(12.0);

                    self.render_turn_card(ui);
                    ui.add_space(10.0);

                    self.render_actions_card(ui);

                    if self.show_debug {
                        ui.add_space(10.0);
                        self.render_debug_card(ui);
                    }

                    if let Some(result) = self.state.game_over.clone() {
                        ui.add_space(10.0);
                        self.render_game_over_card(ui, &result);
                    }

                    if let Some(msg) = self.state.message.clone() {
                        ui.add_space(10.0);
                        Self::render_message_card(ui, &msg);
                    }
                });
            });
    }

    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("BRIDGES").size(22.0).strong().color(TEXT_PRIMARY));
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(
                RichText::new("Black: top to bottom / White: left to right")
                    .size(11.0)
                    .color(TEXT_MUTED),
            );
        });
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let turn = self.state.current_turn;
            ui.label(RichText::new(turn.name().to_uppercase()).size(18.0).strong().color(TEXT_PRIMARY));

            let status = if self.state.game_over.is_some() {
                ("Game Over", WIN_HIGHLIGHT)
            } else if self.state.is_human_turn() {
                ("Your turn", TIMER_NORMAL)
            } else {
                ("AI to move", TIMER_WARNING)
            };
            ui.label(RichText::new(status.0).size(12.0).color(status.1));

            if let Some(winner) = self.state.provisional_winner {
                ui.label(
                    RichText::new(format!("{} connected, gaps open", winner.name()))
                        .size(11.0)
                        .color(TIMER_WARNING),
                );
            }

            ui.add_space(4.0);
            let elapsed = self.state.move_timer.elapsed();
            ui.label(
                RichText::new(format!("{:.1}s", elapsed.as_secs_f32()))
                    .size(20.0)
                    .color(TEXT_PRIMARY),
            );
            if let Some(ai_time) = self.state.move_timer.ai_thinking_time {
                ui.label(
                    RichText::new(format!("Last AI: {:.3}s", ai_time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui.button("Undo").clicked() {
                    self.state.undo();
                }
                if ui.button("New Game").clicked() {
                    self.auto_play = false;
                    self.state.reset();
                }
                if self.state.mode == GameMode::EvE {
                    if ui.button("Step").clicked() {
                        self.state.play_ai_turn();
                    }
                    ui.checkbox(&mut self.auto_play, "Auto");
                }
            });

            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Move #{}", self.state.move_history.len()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    /// Last move descriptor and engine stats, as JSON
    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            match &self.state.last_descriptor {
                Some(mv) => {
                    ui.label(
                        RichText::new(format!("{} -> {}", mv.move_type.name(), mv.pos()))
                            .size(12.0)
                            .strong()
                            .color(WIN_HIGHLIGHT),
                    );
                    ui.label(RichText::new(&mv.reason).size(10.0).color(TEXT_SECONDARY));
                    if let Ok(json) = serde_json::to_string_pretty(mv) {
                        ui.label(RichText::new(json).monospace().size(9.0).color(TEXT_MUTED));
                    }
                }
                None => {
                    ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                }
            }

            if let Some(stats) = &self.state.last_stats {
                ui.add_space(6.0);
                if let Ok(json) = serde_json::to_string_pretty(stats) {
                    ui.label(RichText::new(json).monospace().size(9.0).color(TEXT_MUTED));
                }
            }
        });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui, result: &GameResult) {
        let headline = match result.winner {
            Some(stone) => format!("{} WINS!", stone.name().to_uppercase()),
            None => "NO WINNER".to_string(),
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(18.0).strong().color(TEXT_PRIMARY));
                    if !result.winning_path.is_empty() {
                        ui.label(
                            RichText::new(format!("{} stones in the chain", result.winning_path.len()))
                                .size(11.0)
                                .color(TEXT_SECONDARY),
                        );
                    }
                    ui.add_space(12.0);
                    if ui.button("New Game").clicked() {
                        self.auto_play = false;
                        self.state.reset();
                    }
                });
            });
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.style_mut().visuals.panel_fill = egui::Color32::from_rgb(40, 42, 46);

            let winning_path = self.state.winning_path();
            let patterns = if self.show_patterns {
                self.state.engine(self.state.current_turn).registry()
            } else {
                None
            };
            let overlay = Overlay {
                last_move: self.state.last_move,
                winning_path: &winning_path,
                patterns,
            };
            let interactive = self.state.game_over.is_none() && self.state.is_human_turn();

            let clicked = self.board_view.show(
                ui,
                &self.state.board,
                self.state.current_turn,
                &overlay,
                interactive,
            );

            if let Some(pos) = clicked {
                if let Err(err) = self.state.try_place_stone(pos) {
                    self.state.message = Some(err.to_string());
                }
            }
        });
    }

    fn handle_input(&mut self, ctx: &Context) {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::D) {
                self.show_debug = !self.show_debug;
            }
            if i.key_pressed(egui::Key::P) {
                self.show_patterns = !self.show_patterns;
            }
            if i.key_pressed(egui::Key::U) {
                self.state.undo();
            }
            if i.key_pressed(egui::Key::N) {
                self.auto_play = false;
                self.state.reset();
            }
        });
    }
}

impl eframe::App for BridgesApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        match self.state.mode {
            GameMode::PvE { .. } => {
                if self.state.is_ai_turn() {
                    self.state.play_ai_turn();
                }
            }
            GameMode::EvE => {
                if self.auto_play && self.state.is_ai_turn() {
                    if self.last_auto_move.elapsed() >= AUTO_PLAY_DELAY {
                        self.state.play_ai_turn();
                        self.last_auto_move = Instant::now();
                    }
                    ctx.request_repaint_after(AUTO_PLAY_DELAY);
                }
            }
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);
    }
}
