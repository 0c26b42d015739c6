// lancecheck/src/commands/mod.rs

pub mod generate;
pub mod matrix;
pub mod run;
pub mod settings;
pub mod verify;
