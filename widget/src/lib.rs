mod actions;
mod app;
mod dom;
mod geometry;
mod render;
mod state;
mod viewport;

pub use app::Board;
