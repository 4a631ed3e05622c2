use egui_plot::{Legend, Line, Plot, PlotPoints};
use pl_app::{Experiment, ExperimentKind};
use pl_results::{ChartSpec, build_chart};
use pl_sim::MetricSpec;

/// Live chart of the session history with selectable axes.
pub struct ChartView {
    x_key: String,
    y_key: String,
}

impl ChartView {
    pub fn for_experiment(kind: ExperimentKind) -> Self {
        let (x, y) = kind.default_chart();
        Self {
            x_key: x.to_string(),
            y_key: y.to_string(),
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, experiment: &dyn Experiment) {
        let metrics = experiment.metrics();

        ui.horizontal(|ui| {
            axis_selector(ui, "chart_x", "X:", &mut self.x_key, metrics);
            axis_selector(ui, "chart_y", "Y:", &mut self.y_key, metrics);
        });

        let spec = ChartSpec::xy(&self.x_key, &self.y_key, metrics);
        let chart = build_chart(&spec, experiment.series(), metrics);

        Plot::new("lab_chart")
            .legend(Legend::default())
            .x_axis_label(chart.x.display_name.clone())
            .y_axis_label(chart.y.display_name.clone())
            .include_x(chart.x_range.min)
            .include_x(chart.x_range.max)
            .include_y(chart.y_range.min)
            .include_y(chart.y_range.max)
            .show(ui, |plot_ui| {
                for series in chart.series {
                    let points: PlotPoints = series.points.into();
                    plot_ui.line(Line::new(points).name(series.name));
                }
            });
    }
}

fn axis_selector(
    ui: &mut egui::Ui,
    id: &str,
    label: &str,
    key: &mut String,
    metrics: &[MetricSpec],
) {
    ui.label(label);
    let selected = metrics
        .iter()
        .find(|m| m.key == key.as_str())
        .map_or_else(|| key.clone(), |m| m.display_name());
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected)
        .show_ui(ui, |ui| {
            for metric in metrics {
                ui.selectable_value(key, metric.key.to_string(), metric.display_name());
            }
        });
}
