use pl_app::{ExperimentKind, MenuNode, menu_tree};

/// Navigation tree: Mechanics, then one section per experiment group.
pub struct MenuView {
    tree: Vec<MenuNode>,
}

impl Default for MenuView {
    fn default() -> Self {
        Self { tree: menu_tree() }
    }
}

impl MenuView {
    /// Returns the experiment the user picked this frame, if any.
    pub fn show(&self, ui: &mut egui::Ui, current: ExperimentKind) -> Option<ExperimentKind> {
        let mut picked = None;
        for node in &self.tree {
            show_node(ui, node, current, &mut picked);
        }
        picked
    }
}

fn show_node(
    ui: &mut egui::Ui,
    node: &MenuNode,
    current: ExperimentKind,
    picked: &mut Option<ExperimentKind>,
) {
    match &node.route {
        Some(route) => {
            let Some(kind) = ExperimentKind::from_route(route) else {
                return;
            };
            if ui.selectable_label(kind == current, &node.label).clicked() && kind != current {
                *picked = Some(kind);
            }
        }
        None => {
            egui::CollapsingHeader::new(&node.label)
                .default_open(true)
                .show(ui, |ui| {
                    for child in &node.children {
                        show_node(ui, child, current, picked);
                    }
                });
        }
    }
}
