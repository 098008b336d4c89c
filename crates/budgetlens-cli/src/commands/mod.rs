//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Data file commands (init, categories, add, budget) and shared
//!   utilities (open_store, resolve_period)
//! - `reports` - Analytics output (summary, budgets, breakdown, monthly,
//!   insights, report)

pub mod core;
pub mod reports;

// Re-export command functions for main.rs
pub use self::core::*;
pub use self::reports::*;

use anyhow::Result;
use serde::Serialize;

/// Where command output goes: tables for people, JSON for scripts
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
