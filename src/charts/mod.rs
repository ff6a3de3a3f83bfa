//! Charts module - Chart selection and drawing

mod plotter;
mod selector;

pub use plotter::ChartPlotter;
pub use selector::{
    ChartKind, ChartSelector, ChartSpec, ChartType, RenderError, Rendered, Selection,
    AXES_REQUIRED,
};
