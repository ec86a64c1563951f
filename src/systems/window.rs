//! Window management system
//!
//! Handles window creation and the portrait orientation lock.

use std::sync::Arc;
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event_loop::ActiveEventLoop,
    window::Window,
};
use crate::config::{SceneConfig, WindowConfig};

/// Manages the application window
pub struct WindowSystem {
    window: Arc<Window>,
}

impl WindowSystem {
    /// Create a portrait, fixed-size window sized to the canvas
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
        canvas: &SceneConfig,
    ) -> Result<Self, WindowError> {
        let size = LogicalSize::new(canvas.width, canvas.height);
        let attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(size)
            .with_resizable(false);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        let system = Self { window };
        system.check_orientation(system.window.inner_size());
        Ok(system)
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Log an error if the platform handed back a landscape surface
    ///
    /// The scene keeps running either way; returns whether the size is portrait.
    pub fn check_orientation(&self, size: PhysicalSize<u32>) -> bool {
        let portrait = is_portrait(size);
        if !portrait {
            log::error!(
                "Could not lock portrait orientation: surface is {}x{}",
                size.width,
                size.height
            );
        }
        portrait
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Whether a surface is at least as tall as it is wide
pub fn is_portrait(size: PhysicalSize<u32>) -> bool {
    size.height >= size.width
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portrait_sizes() {
        assert!(is_portrait(PhysicalSize::new(400, 800)));
        assert!(is_portrait(PhysicalSize::new(500, 500)));
        assert!(!is_portrait(PhysicalSize::new(800, 400)));
    }

    #[test]
    fn test_error_display() {
        let err = WindowError::CreationFailed("no display".to_string());
        assert_eq!(err.to_string(), "Window creation failed: no display");
    }
}
