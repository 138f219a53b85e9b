use super::config::EditorConfig;
use crate::graph::{Node, Position};

/// Pan and zoom state of the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub offset: Position,
    min_zoom: f64,
    max_zoom: f64,
    zoom_in_factor: f64,
    zoom_out_factor: f64,
    fit_padding: f64,
    max_fit_scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Viewport {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            scale: 1.0,
            offset: Position::default(),
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            zoom_in_factor: config.zoom_in_factor,
            zoom_out_factor: config.zoom_out_factor,
            fit_padding: config.fit_padding,
            max_fit_scale: config.max_fit_scale,
        }
    }

    pub fn zoom_in(&mut self) {
        self.scale = (self.scale * self.zoom_in_factor).min(self.max_zoom);
    }

    pub fn zoom_out(&mut self) {
        self.scale = (self.scale * self.zoom_out_factor).max(self.min_zoom);
    }

    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.offset = Position::default();
    }

    /// Scales and centres the view so every node fits a `width` x `height`
    /// screen. Resets the view when there are no nodes.
    pub fn fit_to_screen(&mut self, nodes: &[Node], width: f64, height: f64) {
        if nodes.is_empty() {
            self.reset();
            return;
        }

        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for node in nodes {
            min_x = min_x.min(node.position.x);
            min_y = min_y.min(node.position.y);
            max_x = max_x.max(node.position.x + node.size.width);
            max_y = max_y.max(node.position.y + node.size.height);
        }

        let content_width = max_x - min_x + self.fit_padding * 2.0;
        let content_height = max_y - min_y + self.fit_padding * 2.0;
        self.scale = (width / content_width)
            .min(height / content_height)
            .min(self.max_fit_scale);

        let center_x = (min_x + max_x) / 2.0;
        let center_y = (min_y + max_y) / 2.0;
        self.offset = Position::new(
            width / 2.0 - center_x * self.scale,
            height / 2.0 - center_y * self.scale,
        );
    }

    pub fn screen_to_canvas(&self, screen: Position) -> Position {
        Position::new(
            (screen.x - self.offset.x) / self.scale,
            (screen.y - self.offset.y) / self.scale,
        )
    }

    pub fn canvas_to_screen(&self, canvas: Position) -> Position {
        Position::new(
            canvas.x * self.scale + self.offset.x,
            canvas.y * self.scale + self.offset.y,
        )
    }
}
