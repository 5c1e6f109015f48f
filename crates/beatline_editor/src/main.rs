// SPDX-License-Identifier: MIT OR Apache-2.0
//! Beatline Editor - timing timeline preview
//!
//! Opens a window with the timing timeline of a beatmap:
//! - Control points, bookmarks and breaks along the audio length
//! - Click or drag on the timeline to seek
//! - Key bindings for playback, persisted as RON
//!
//! ## Usage
//!
//! `beatline_editor [beatmap.ron]`
//!
//! `BEATLINE_STYLE` names a RON timeline style and `BEATLINE_KEY_BINDINGS`
//! the key binding file. Built-in demo beatmaps follow the opened one.

mod app;
mod config;
mod demo;
mod key_binding;
mod session;

use app::EditorApp;
use config::EditorConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("beatline_editor=debug".parse().unwrap())
        .add_directive("beatline_timeline=debug".parse().unwrap())
        .add_directive("wgpu=warn".parse().unwrap())
        .add_directive("naga=warn".parse().unwrap());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Beatline Editor v{}", env!("CARGO_PKG_VERSION"));

    let config = EditorConfig::from_env();
    tracing::debug!("{:?}", config);

    if let Err(e) = EditorApp::run(config) {
        tracing::error!("Editor crashed: {e}");
        std::process::exit(1);
    }
}
