// SPDX-License-Identifier: MIT OR Apache-2.0
//! Startup configuration from the command line and environment.

use crate::demo;
use crate::key_binding::KeyBindingStore;
use beatline_timeline::{Beatmap, TimelineStyle};
use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable naming a RON style file
pub const STYLE_VAR: &str = "BEATLINE_STYLE";
/// Environment variable naming the key binding file
pub const KEY_BINDINGS_VAR: &str = "BEATLINE_KEY_BINDINGS";
/// Key binding file used when none is configured
pub const DEFAULT_KEY_BINDINGS: &str = "key_bindings.ron";

/// Where the editor loads its files from
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Beatmap opened at startup, ahead of the demo beatmaps
    pub beatmap_path: Option<PathBuf>,
    /// Timeline style overrides
    pub style_path: Option<PathBuf>,
    /// Persisted key bindings
    pub key_bindings_path: PathBuf,
}

impl EditorConfig {
    /// Read the first CLI argument and the environment
    pub fn from_env() -> Self {
        Self::from_parts(
            std::env::args_os().nth(1),
            std::env::var_os(STYLE_VAR),
            std::env::var_os(KEY_BINDINGS_VAR),
        )
    }

    fn from_parts(beatmap: Option<OsString>, style: Option<OsString>, key_bindings: Option<OsString>) -> Self {
        let non_empty = |value: Option<OsString>| value.filter(|v| !v.is_empty()).map(PathBuf::from);

        Self {
            beatmap_path: non_empty(beatmap),
            style_path: non_empty(style),
            key_bindings_path: non_empty(key_bindings).unwrap_or_else(|| PathBuf::from(DEFAULT_KEY_BINDINGS)),
        }
    }

    /// Load the style, falling back to the default one
    ///
    /// A configured style file that does not exist yet is created with the
    /// defaults so it can be edited.
    pub fn load_style(&self) -> TimelineStyle {
        let Some(path) = &self.style_path else {
            return TimelineStyle::default();
        };

        if !path.exists() {
            let style = TimelineStyle::default();
            match style.save(path) {
                Ok(()) => tracing::info!("Wrote default timeline style to {:?}", path),
                Err(e) => tracing::warn!("Could not write default timeline style: {e}"),
            }
            return style;
        }

        match TimelineStyle::load(path) {
            Ok(style) => {
                tracing::info!("Loaded timeline style from {:?}", path);
                style
            }
            Err(e) => {
                tracing::warn!("Using default timeline style: {e}");
                TimelineStyle::default()
            }
        }
    }

    /// The configured beatmap (if it loads) followed by the demo beatmaps
    pub fn load_beatmaps(&self) -> Vec<Beatmap> {
        let mut beatmaps = Vec::new();

        if let Some(path) = &self.beatmap_path {
            match Beatmap::load(path) {
                Ok(beatmap) => beatmaps.push(beatmap),
                Err(e) => tracing::error!("Failed to open beatmap: {e}"),
            }
        }

        beatmaps.extend(demo::beatmaps());
        beatmaps
    }

    /// Load key bindings, creating the file with defaults if missing
    pub fn load_key_bindings(&self) -> KeyBindingStore {
        match KeyBindingStore::load_or_create(&self.key_bindings_path) {
            Ok(store) if store.is_empty() => {
                tracing::warn!("{:?} has no key bindings, using defaults", self.key_bindings_path);
                KeyBindingStore::defaults()
            }
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("Using default key bindings: {e}");
                KeyBindingStore::defaults()
            }
        }
    }
}
