//! Main module for flowchart library functionality

pub mod building;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod loader;
pub mod testing;
