//! Toolbar theme colors for discovered media servers: measured from the
//! server's icon when possible, derived from its friendly name otherwise,
//! and cached so each server is resolved at most once.

pub mod color;
pub mod config;
pub mod error;
pub mod generator;
pub mod icon;
pub mod logging;
pub mod palette;
pub mod resolver;
pub mod selector;
pub mod server;
pub mod store;

pub use color::Rgb;
pub use config::PaletteConfig;
pub use error::{TintError, TintResult};
pub use icon::ServerIcon;
pub use resolver::{ResolveHandle, ResolveOutcome, ThemeResolver};
pub use server::{MediaServer, ServerUdn};
pub use store::{MemoryThemeStore, ResolvedTheme, ThemeStore};
