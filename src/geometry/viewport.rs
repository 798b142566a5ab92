use super::{Position, Rect};
use crate::error::ViewportError;
use serde::{Deserialize, Serialize};

/// Bounding rectangle of the canvas element in client space.
///
/// Scrolling and resizing move it around; hosts push the current one through
/// `Canvas::set_bounds` and every pointer event is mapped against it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Allowed zoom range for interactive zooming.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { min: 0.1, max: 3.0 }
    }
}

impl ZoomLimits {
    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min, self.max)
    }
}

/// Pan offset (client pixels) and zoom factor applied when drawing canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    /// Creates a validated viewport. The transform divides by `zoom`, so zero,
    /// negative and non-finite factors are refused here rather than inside it.
    pub fn new(pan_x: f64, pan_y: f64, zoom: f64) -> Result<Self, ViewportError> {
        let viewport = Self { pan_x, pan_y, zoom };
        viewport.validate()?;
        Ok(viewport)
    }

    pub fn validate(&self) -> Result<(), ViewportError> {
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(ViewportError::InvalidZoom(self.zoom));
        }
        if !self.pan_x.is_finite() || !self.pan_y.is_finite() {
            return Err(ViewportError::InvalidPan {
                pan_x: self.pan_x,
                pan_y: self.pan_y,
            });
        }
        Ok(())
    }

    /// Maps a client-space pointer coordinate into canvas space.
    pub fn client_to_canvas(&self, rect: &ClientRect, client_x: f64, client_y: f64) -> Position {
        Position {
            x: (client_x - rect.left - self.pan_x) / self.zoom,
            y: (client_y - rect.top - self.pan_y) / self.zoom,
        }
    }

    /// Inverse of [`Viewport::client_to_canvas`].
    pub fn canvas_to_client(&self, rect: &ClientRect, point: Position) -> (f64, f64) {
        (
            point.x * self.zoom + self.pan_x + rect.left,
            point.y * self.zoom + self.pan_y + rect.top,
        )
    }

    pub fn panned_by(&self, dx: f64, dy: f64) -> Self {
        Self {
            pan_x: self.pan_x + dx,
            pan_y: self.pan_y + dy,
            zoom: self.zoom,
        }
    }

    /// Changes the zoom factor while keeping the canvas point under the pointer
    /// at the same client position.
    pub fn zoomed_about(
        &self,
        rect: &ClientRect,
        client_x: f64,
        client_y: f64,
        zoom: f64,
        limits: &ZoomLimits,
    ) -> Self {
        let zoom = limits.clamp(zoom);
        let anchor = self.client_to_canvas(rect, client_x, client_y);
        Self {
            pan_x: client_x - rect.left - anchor.x * zoom,
            pan_y: client_y - rect.top - anchor.y * zoom,
            zoom,
        }
    }

    /// Viewport that centres `content` inside `rect` with `padding` pixels on
    /// every side. Returns `None` when either area is degenerate.
    pub fn fit_to(
        content: &Rect,
        rect: &ClientRect,
        padding: f64,
        limits: &ZoomLimits,
    ) -> Option<Self> {
        let available_width = rect.width - padding * 2.0;
        let available_height = rect.height - padding * 2.0;
        if available_width <= 0.0 || available_height <= 0.0 {
            return None;
        }

        // A single point still gets centred; it just can't drive the zoom.
        let zoom = match (content.width > 0.0, content.height > 0.0) {
            (true, true) => (available_width / content.width).min(available_height / content.height),
            (true, false) => available_width / content.width,
            (false, true) => available_height / content.height,
            (false, false) => 1.0,
        };
        let zoom = limits.clamp(zoom);

        let center = content.center();
        Some(Self {
            pan_x: rect.width / 2.0 - center.x * zoom,
            pan_y: rect.height / 2.0 - center.y * zoom,
            zoom,
        })
    }
}
