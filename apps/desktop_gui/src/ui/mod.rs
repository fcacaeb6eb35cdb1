//! UI layer for the desktop app: app shell, panels, and modal windows.

pub mod app;

pub use app::{CatalogApp, PersistedCatalogSettings, StartupConfig, SETTINGS_STORAGE_KEY};
