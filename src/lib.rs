pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod input;
pub mod parallax;
pub mod renderer;
pub mod scene;
pub mod timer;
pub mod window;
