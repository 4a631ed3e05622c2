pub mod canvas_view;
pub mod chart_view;
pub mod menu_view;
pub mod params_view;

pub use canvas_view::CanvasView;
pub use chart_view::ChartView;
pub use menu_view::MenuView;
pub use params_view::ParamsView;
