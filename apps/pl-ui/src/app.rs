use crate::views::{CanvasView, ChartView, MenuView, ParamsView};
use pl_app::{Experiment, ExperimentKind, LabConfig, UserSettings, save_config};
use pl_controls::ParameterController;
use pl_core::timing::FrameStats;
use pl_scene::Theme;
use std::path::PathBuf;

/// Longest frame delta handed to the experiment from the window loop.
const MAX_FRAME_S: f64 = 0.1;

/// GUI-only cap on the delta fed to `tick`. The headless runner steps with
/// the configured `dt` and never goes through this.
fn frame_dt(raw_s: f64) -> f64 {
    raw_s.min(MAX_FRAME_S)
}

pub struct PhyslabApp {
    config: LabConfig,
    config_path: Option<PathBuf>,
    settings: UserSettings,
    controller: ParameterController,
    experiment: Box<dyn Experiment>,
    menu_view: MenuView,
    params_view: ParamsView,
    canvas_view: CanvasView,
    chart_view: ChartView,
    status: Option<String>,
    frames: FrameStats,
}

impl PhyslabApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: LabConfig,
        config_path: Option<PathBuf>,
    ) -> Self {
        let kind = ExperimentKind::UniformMotion;
        let settings = config.settings;
        apply_theme(&cc.egui_ctx, settings.theme);

        Self {
            experiment: kind.open_with(config.run.capacity()),
            config,
            config_path,
            settings,
            controller: ParameterController::default(),
            menu_view: MenuView::default(),
            params_view: ParamsView::default(),
            canvas_view: CanvasView::default(),
            chart_view: ChartView::for_experiment(kind),
            status: None,
            frames: FrameStats::default(),
        }
    }

    fn open(&mut self, kind: ExperimentKind) {
        tracing::info!(experiment = kind.key(), "open experiment");
        self.experiment = kind.open_with(self.config.run.capacity());
        self.chart_view = ChartView::for_experiment(kind);
        self.canvas_view.cancel_drag();
        self.params_view.clear_error();
        self.status = None;
        self.frames.reset();
    }

    fn save_settings(&mut self) {
        let Some(path) = self.config_path.clone() else {
            return;
        };
        self.config.settings = self.settings;
        self.status = Some(match save_config(&path, &self.config) {
            Ok(()) => format!("Saved settings to {}", path.display()),
            Err(e) => format!("Failed to save settings: {}", e),
        });
    }

    fn advance(&mut self, ctx: &egui::Context) {
        if !(self.experiment.is_playing() || self.experiment.decomposition_running()) {
            return;
        }
        let raw = ctx.input(|i| i.stable_dt) as f64;
        self.frames.record(raw);
        // UI-only clamp; the headless runner does not clamp.
        self.experiment.tick(frame_dt(raw));
        ctx.request_repaint();
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        let exp = &mut self.experiment;
        ui.add_enabled_ui(exp.playable(), |ui| {
            let label = if exp.is_playing() { "Pause" } else { "Play" };
            if ui.button(label).clicked() {
                exp.toggle_play();
            }
        });
        if ui.button("Reset").clicked() {
            exp.reset();
            self.canvas_view.cancel_drag();
        }

        let can_decompose = exp.has_decomposition();
        ui.add_enabled_ui(can_decompose, |ui| {
            let label = if exp.decomposition_running() {
                "Stop decomposition"
            } else {
                "Decompose"
            };
            if ui.button(label).clicked() {
                exp.toggle_decomposition();
            }
        });

        ui.separator();
        ui.checkbox(&mut self.settings.show_grid, "Grid");
        let mut dark = self.settings.theme == Theme::Dark;
        if ui.checkbox(&mut dark, "Dark").changed() {
            self.settings.theme = if dark { Theme::Dark } else { Theme::Light };
            apply_theme(ui.ctx(), self.settings.theme);
        }
        ui.add(
            egui::Slider::new(&mut self.settings.font_size, 10.0..=24.0)
                .step_by(1.0)
                .text("Label size"),
        );

        if self.config_path.is_some() && ui.button("Save settings").clicked() {
            self.save_settings();
        }

        ui.separator();
        ui.monospace(format!("t = {:.2} s", self.experiment.time()));
        if self.frames.frames > 0 {
            ui.separator();
            ui.monospace(format!(
                "{:.0} fps (avg {:.0}), max gap {:.0} ms",
                self.frames.instant_fps(),
                self.frames.average_fps(),
                self.frames.max_dt_s * 1000.0
            ));
        }
    }
}

fn apply_theme(ctx: &egui::Context, theme: Theme) {
    ctx.set_visuals(match theme {
        Theme::Light => egui::Visuals::light(),
        Theme::Dark => egui::Visuals::dark(),
    });
}

impl eframe::App for PhyslabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.advance(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| self.toolbar(ui));
        });

        let current = self.experiment.kind();
        let picked = egui::SidePanel::left("menu")
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Experiments");
                ui.separator();
                self.menu_view.show(ui, current)
            })
            .inner;
        if let Some(kind) = picked {
            self.open(kind);
        }

        egui::SidePanel::right("parameters")
            .default_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.params_view
                        .show(ui, self.experiment.as_mut(), &self.controller);
                });
            });

        let display = self.settings.display();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.experiment.kind().name());
            let canvas_height = (ui.available_height() * 0.6).max(200.0);
            self.canvas_view
                .show(ui, self.experiment.as_mut(), &display, canvas_height);
            ui.separator();
            self.chart_view.show(ui, self.experiment.as_ref());

            if let Some(status) = &self.status {
                ui.separator();
                ui.label(status);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_frames_are_capped_for_the_window_loop_only() {
        assert_eq!(frame_dt(1.0 / 60.0), 1.0 / 60.0);
        assert_eq!(frame_dt(2.5), MAX_FRAME_S);

        let mut stats = FrameStats::default();
        stats.record(2.5);
        assert_eq!(stats.max_dt_s, 2.5);
    }
}
