pub mod config;

pub use config::{WindowConfig, WindowMode};

use log::debug;
use winit::dpi::PhysicalSize;
use winit::monitor::{MonitorHandle, VideoModeHandle};
use winit::window::{Fullscreen, Window, WindowAttributes};

/// Initial attributes for creating the game window.
pub fn window_attributes(config: &WindowConfig) -> WindowAttributes {
    Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(PhysicalSize::new(config.width, config.height))
        .with_resizable(config.resizable)
}

/// Switch a freshly created window into `config.mode`.
///
/// Exclusive fullscreen uses the monitor's video mode closest in area to the
/// configured size, and degrades to borderless when there is none.
pub fn apply_window_settings(window: &Window, config: &WindowConfig) {
    let fullscreen = match config.mode {
        WindowMode::Windowed => None,
        WindowMode::Borderless => Some(Fullscreen::Borderless(None)),
        WindowMode::Fullscreen => Some(exclusive_or_borderless(window.current_monitor(), config)),
    };

    if fullscreen.is_none() {
        window.set_decorations(true);
        window.set_resizable(config.resizable);
        // The granted size, if different, comes back as a `Resized` event.
        let _ = window.request_inner_size(PhysicalSize::new(config.width, config.height));
    }
    debug!("window fullscreen mode: {fullscreen:?}");
    window.set_fullscreen(fullscreen);
}

fn exclusive_or_borderless(monitor: Option<MonitorHandle>, config: &WindowConfig) -> Fullscreen {
    let Some(monitor) = monitor else {
        return Fullscreen::Borderless(None);
    };
    match closest_video_mode(&monitor, config.width, config.height) {
        Some(mode) => Fullscreen::Exclusive(mode),
        None => Fullscreen::Borderless(Some(monitor)),
    }
}

fn closest_video_mode(monitor: &MonitorHandle, width: u32, height: u32) -> Option<VideoModeHandle> {
    let wanted = u64::from(width) * u64::from(height);
    monitor.video_modes().min_by_key(|mode| {
        let size = mode.size();
        (u64::from(size.width) * u64::from(size.height)).abs_diff(wanted)
    })
}
