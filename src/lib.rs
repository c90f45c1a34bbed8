pub mod config;
pub mod player;
pub mod reference;
pub mod render;
pub mod scanner;
pub mod trace;
