pub mod bars;
pub mod screen;
