use pl_app::Experiment;
use pl_controls::ParameterController;

/// Sliders, toggles and read-only values for the open experiment.
#[derive(Default)]
pub struct ParamsView {
    last_error: Option<String>,
}

impl ParamsView {
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        experiment: &mut dyn Experiment,
        controller: &ParameterController,
    ) {
        ui.heading("Parameters");
        ui.separator();

        let mut edit = None;
        for (spec, value) in experiment.param_values() {
            if spec.readonly {
                ui.horizontal(|ui| {
                    ui.label(spec.label);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.monospace(spec.format_value(value));
                    });
                });
                continue;
            }

            if spec.is_toggle() {
                let mut on = value != 0.0;
                if ui.checkbox(&mut on, spec.label).changed() {
                    edit = Some((spec.key, if on { 1.0 } else { 0.0 }));
                }
                continue;
            }

            let (Some(min), Some(max)) = (spec.min, spec.max) else {
                continue;
            };
            ui.label(if spec.unit.is_empty() {
                spec.label.to_string()
            } else {
                format!("{} ({})", spec.label, spec.unit)
            });
            let mut v = value;
            let mut slider = egui::Slider::new(&mut v, min..=max).fixed_decimals(spec.decimals());
            if let Some(step) = spec.step {
                slider = slider.step_by(step);
            }
            if ui.add(slider).changed() {
                edit = Some((spec.key, v));
            }
        }

        // One edit per frame; the table is rebuilt from the model next frame.
        if let Some((key, value)) = edit {
            match experiment.apply_edit(controller, key, value) {
                Ok(()) => self.last_error = None,
                Err(e) => self.last_error = Some(e.to_string()),
            }
        }

        if let Some(err) = &self.last_error {
            ui.separator();
            ui.colored_label(egui::Color32::RED, err);
        }
    }
}
