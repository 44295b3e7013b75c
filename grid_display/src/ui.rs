// ui.rs - Drawing the mirrored board and wiring buttons / keys to the engine

use eframe::egui;
use egui::{Color32, Key, Rect, Stroke, Vec2};

use conway::KeyPress;

use crate::grid::GRID_SIZE;
use crate::{GameOfLife, patterns};

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_events();

        // s = save, q = quit, p = pause
        let pressed = ctx.input(|i| {
            [(Key::S, KeyPress::Save), (Key::Q, KeyPress::Quit), (Key::P, KeyPress::Pause)]
                .into_iter()
                .filter(|(key, _)| i.key_pressed(*key))
                .map(|(_, press)| press)
                .collect::<Vec<_>>()
        });
        for key in pressed {
            self.press(key);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life (Parallel Row Bands)");

            // Controls
            ui.horizontal(|ui| {
                let idle = !self.is_running();

                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.add_enabled(idle, egui::Button::new("▶ Run Pattern")).clicked() {
                    self.start_pattern();
                }
                if ui.add_enabled(idle, egui::Button::new("🎲 Run Random")).clicked() {
                    self.start_random();
                }

                ui.separator();

                if ui.add_enabled(!idle, egui::Button::new("💾 Save")).clicked() {
                    self.press(KeyPress::Save);
                }
                if ui.add_enabled(!idle, egui::Button::new("⏹ Quit")).clicked() {
                    self.press(KeyPress::Quit);
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label(format!("Turn: {}", self.completed_turns));
                ui.separator();
                let running = self.is_running();
                match self.state {
                    Some(state) => ui.label(format!("State: {state}")),
                    None if running => ui.label("State: Executing"),
                    None => ui.label("State: idle"),
                };
                ui.separator();
                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.separator();

            ui.label("Keys: S saves a snapshot, Q saves and quits after the current turn, P is reserved.");

            ui.separator();

            // Draw the board
            let box_size = 11.0;
            let spacing = 0.5;

            let start_pos = ui.cursor().min;
            let total_size = Vec2::splat((box_size + spacing) * GRID_SIZE as f32 - spacing);

            let (_response, painter) = ui.allocate_painter(total_size, egui::Sense::hover());

            // Fill background
            painter.rect_filled(
                Rect::from_min_size(start_pos, total_size),
                0.0,
                Color32::BLACK,
            );

            for row in 0..GRID_SIZE {
                for col in 0..GRID_SIZE {
                    let x = start_pos.x + col as f32 * (box_size + spacing);
                    let y = start_pos.y + row as f32 * (box_size + spacing);

                    let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(box_size));

                    let cell_color = if self.board[row * GRID_SIZE + col] {
                        self.live_color
                    } else {
                        self.dead_color
                    };

                    painter.rect_filled(rect, 1.0, cell_color);
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                }
            }

            ui.separator();

            // Statistics
            let live_cells = self.board.iter().filter(|&&alive| alive).count();
            let total = (GRID_SIZE * GRID_SIZE) as f32;

            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {live_cells}"));
                ui.label(format!("Population: {:.1}%", (live_cells as f32 / total) * 100.0));
                if let Some(count) = self.alive_count {
                    ui.label(format!("Last report: {count}"));
                }
                if let Some(count) = self.final_alive {
                    ui.label(format!("Final: {count} alive"));
                }
            });

            if !self.snapshots.is_empty() {
                ui.label(format!("Snapshots: {}", self.snapshots.join(", ")));
            }
        });

        // Keep pulling events while the engine is running
        if self.is_running() {
            ctx.request_repaint();
        }
    }
}
