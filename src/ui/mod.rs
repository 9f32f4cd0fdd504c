pub mod line_input;
pub mod render;
pub mod terminal;
