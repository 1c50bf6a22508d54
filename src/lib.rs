//! Garden Snake - a grid snake game with hazards, levels and an offline
//! sprite cache
//!
//! This library provides:
//! - Core game logic (game module): tick-based state machine with a
//!   toroidal board, damaging obstacles and score-driven levels
//! - TUI rendering (render module)
//! - Keyboard input mapping (input module)
//! - Execution modes (modes module): interactive play and asset sync
//! - Offline asset caching (assets module)
//! - Session metrics (metrics module)

pub mod assets;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
