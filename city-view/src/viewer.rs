//! Interactive night-city viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the simulation state
//! (a [`GrowthEngine`]) and implements [`eframe::App`] to render the
//! intensity grid through a night-satellite palette and control the
//! simulation through an egui UI.

use city_core::config::Config;
use city_core::engine::GrowthEngine;
use eframe::App;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Simulation grid size; matches the original 240×135 display 1:1.
const GRID_W: usize = 240;
const GRID_H: usize = 135;

/// Engine steps per rendered frame for each speed preset.
const SPEED_STEPS: [u32; 4] = [1, 5, 20, 60];
/// Display names for the speed presets.
const SPEED_NAMES: [&str; 4] = ["Slow", "Med", "Fast", "Turbo"];

/// Maps an intensity byte to a "night satellite" RGB color.
///
/// Cells below 10 are near-black background, the road-glow region up
/// to 80 is a cool blue, and everything above shifts into warm white
/// city light.
fn night_color(v: u8) -> [u8; 3] {
    if v < 10 {
        return [0, 0, 6];
    }

    if v < 80 {
        return [0, 4 + v / 10, 10 + v / 3];
    }

    let x = (v - 80) as u32; // 0..=175
    let r = (30 + x).min(255) as u8;
    let g = (22 + x * 7 / 10).min(255) as u8;
    let b = (10 + x * 2 / 10).min(255) as u8;
    [r, g, b]
}

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The simulation core: a [`GrowthEngine`] on a seeded-from-OS RNG.
/// - UI state (run/pause, speed preset, grid texture).
/// - eframe/egui callbacks for drawing and user interaction.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions (run controls, config edits).
/// 2. If `running`, advance the engine by the preset step count.
/// 3. Upload the grid as a texture and paint it scaled to fit.
///
/// ### Fields
/// - `engine` - The growth simulation being displayed.
/// - `texture` - GPU texture holding the palette-mapped grid.
/// - `running` - Whether the simulation auto-advances each frame.
/// - `speed` - Index into [`SPEED_STEPS`] / [`SPEED_NAMES`].
pub struct Viewer {
    engine: GrowthEngine<StdRng>,
    texture: Option<egui::TextureHandle>,
    running: bool,
    speed: usize,
}

impl Viewer {
    /// Creates a viewer with a freshly reset engine on the
    /// original-sized grid, paused at the slowest speed.
    pub fn new() -> Self {
        let engine = GrowthEngine::new(GRID_W, GRID_H, Config::default(), StdRng::from_os_rng());

        Self {
            engine,
            texture: None,
            running: false,
            speed: 0,
        }
    }

    /// Palette-maps the whole grid into an RGB image.
    fn grid_image(&self) -> egui::ColorImage {
        let mut rgb = Vec::with_capacity(GRID_W * GRID_H * 3);
        for &v in self.engine.grid.cells() {
            rgb.extend_from_slice(&night_color(v));
        }
        egui::ColorImage::from_rgb([GRID_W, GRID_H], &rgb)
    }

    /// Helper to draw a labeled `u8` [`egui::DragValue`].
    fn labeled_drag_u8(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut u8,
        range: std::ops::RangeInclusive<u8>,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(1.0));
        });
    }

    /// Helper to draw a labeled `u32` [`egui::DragValue`].
    fn labeled_drag_u32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut u32,
        range: std::ops::RangeInclusive<u32>,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(1.0));
        });
    }

    /// Helper to draw a labeled `u64` [`egui::DragValue`].
    fn labeled_drag_u64(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut u64,
        range: std::ops::RangeInclusive<u64>,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(1.0));
        });
    }

    /// Builds the top panel UI (run controls, stepping, speed presets).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Step").clicked() {
                    self.engine.step();
                }

                if ui.button("Reset").clicked() {
                    self.engine.reset();
                }

                ui.separator();
                for (i, name) in SPEED_NAMES.iter().enumerate() {
                    if ui.selectable_label(self.speed == i, *name).clicked() {
                        self.speed = i;
                    }
                }
            });
        });
    }

    /// Builds the bottom status bar (step counter, agent counts).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("next district @ {}", self.engine.next_bright_node_step()));
                ui.separator();
                ui.label(format!("slots = {}", self.engine.agents.len()));
                ui.label(format!("alive = {}", self.engine.alive_count()));
                ui.separator();
                ui.label(format!("step = {}", self.engine.steps()));
            });
        });
    }

    /// Builds the right-hand configuration panel for live tuning.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                ui.label("Deposits");
                Self::labeled_drag_u8(
                    ui,
                    "road_strength:",
                    &mut self.engine.cfg.road_strength,
                    0..=255,
                );
                Self::labeled_drag_u8(
                    ui,
                    "light_strength:",
                    &mut self.engine.cfg.light_strength,
                    0..=255,
                );
                Self::labeled_drag_u32(
                    ui,
                    "light_chance %:",
                    &mut self.engine.cfg.light_chance_pct,
                    0..=100,
                );

                ui.separator();
                ui.label("Movement");
                Self::labeled_drag_u32(
                    ui,
                    "turn_chance ‰:",
                    &mut self.engine.cfg.turn_chance_pm,
                    0..=500,
                );
                Self::labeled_drag_u32(
                    ui,
                    "branch_chance ‰:",
                    &mut self.engine.cfg.branch_chance_pm,
                    0..=1000,
                );
                Self::labeled_drag_u32(
                    ui,
                    "respawn_chance %:",
                    &mut self.engine.cfg.respawn_chance_pct,
                    0..=100,
                );

                ui.separator();
                ui.label("Fade");
                Self::labeled_drag_u8(
                    ui,
                    "decay_amount:",
                    &mut self.engine.cfg.decay_amount,
                    0..=16,
                );
                Self::labeled_drag_u64(
                    ui,
                    "decay_interval:",
                    &mut self.engine.cfg.decay_interval,
                    0..=5000,
                );

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    self.engine.cfg = Config::default();
                }
            });
    }

    /// Builds the central panel where the city grid is painted.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            painter.rect_filled(rect, egui::CornerRadius::ZERO, egui::Color32::BLACK);

            // Advance the simulation for this frame.
            if self.running {
                for _ in 0..SPEED_STEPS[self.speed] {
                    self.engine.step();
                }
                ctx.request_repaint();
            }

            // Upload the palette-mapped grid and paint it scaled to
            // fit, preserving the aspect ratio. NEAREST keeps the
            // crisp one-cell-per-pixel look when upscaled.
            let image = self.grid_image();
            match &mut self.texture {
                Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
                None => {
                    self.texture =
                        Some(ctx.load_texture("city_grid", image, egui::TextureOptions::NEAREST));
                }
            }

            if let Some(texture) = &self.texture {
                let scale =
                    (rect.width() / GRID_W as f32).min(rect.height() / GRID_H as f32);
                let size = egui::vec2(GRID_W as f32 * scale, GRID_H as f32 * scale);
                let target = egui::Rect::from_center_size(rect.center(), size);
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                painter.image(texture.id(), target, uv, egui::Color32::WHITE);
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_viewer_starts_paused_on_original_grid() {
        let viewer = Viewer::new();
        assert_eq!(viewer.engine.width(), 240);
        assert_eq!(viewer.engine.height(), 135);
        assert!(!viewer.running);
        assert_eq!(viewer.speed, 0);
        assert!(viewer.texture.is_none());
        assert_eq!(viewer.engine.agents.len(), 4);
    }

    #[test]
    fn speed_tables_stay_in_sync() {
        assert_eq!(SPEED_STEPS.len(), SPEED_NAMES.len());
        // Presets are strictly increasing so the labels stay honest.
        for pair in SPEED_STEPS.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn palette_regions_match_the_original_thresholds() {
        // Background: near-black with a hint of blue.
        assert_eq!(night_color(0), [0, 0, 6]);
        assert_eq!(night_color(9), [0, 0, 6]);

        // Road glow: cool, blue-dominant.
        let [r, g, b] = night_color(40);
        assert_eq!(r, 0);
        assert!(b > g);

        // City lights: warm, red-dominant, channels clamped.
        assert_eq!(night_color(80), [30, 22, 10]);
        let [r, g, b] = night_color(255);
        assert_eq!([r, g, b], [205, 144, 45]);
        assert!(r > g && g > b);
    }

    #[test]
    fn palette_is_defined_for_every_intensity() {
        // Sweep the whole byte range; arithmetic must never overflow.
        let mut prev_sum = 0u32;
        for v in 0..=255u8 {
            let [r, g, b] = night_color(v);
            let sum = r as u32 + g as u32 + b as u32;
            // Perceived brightness never drops across the thresholds.
            assert!(sum >= prev_sum, "palette dimmed at v = {}", v);
            prev_sum = sum;
        }
    }

    #[test]
    fn grid_image_covers_every_cell() {
        let viewer = Viewer::new();
        let image = viewer.grid_image();
        assert_eq!(image.size, [240, 135]);
        assert_eq!(image.pixels.len(), 240 * 135);
    }
}
