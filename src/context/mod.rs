pub mod color;
pub mod context2d;
pub mod opts;
pub mod state;
