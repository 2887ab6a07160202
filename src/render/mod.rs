// Figure output: grid geometry and the SVG export
pub mod grid_layout;
pub mod svg;

pub use grid_layout::GridLayout;
pub use svg::{render_svg, write_svg};
