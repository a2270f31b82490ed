//! Emoji used in terminal output.

#![allow(missing_docs)]

use console::Emoji;

pub static INFO: Emoji = Emoji("💁 ", "");
pub static KEY: Emoji = Emoji("🔑 ", "");
pub static SPARKLES: Emoji = Emoji("✨ ", "");
pub static SWIRL: Emoji = Emoji("🌀 ", "");
pub static WARN: Emoji = Emoji("⚠️ ", "");
pub static EYES: Emoji = Emoji("👀 ", "");
