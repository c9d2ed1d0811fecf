// Rigger - deterministic build configuration assembler
pub mod cli;
pub mod core;
pub mod infrastructure;
pub mod utils;
