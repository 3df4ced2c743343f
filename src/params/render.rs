//! Window and rendering configuration.

use super::confetti::Rgba;

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Base window title; status text is appended to it
    pub title: String,

    /// Clear color behind the confetti (slate-900)
    pub background: Rgba,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            title: "Lucky Draw".to_string(),
            background: Rgba::from_hex(0x0F172A),
        }
    }
}
