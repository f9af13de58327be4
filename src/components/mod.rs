//! Canvas components.

pub mod chaos_game;
