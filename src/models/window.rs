// Window Geometry Models
// Composite read over four independently stored fields

/// Window size in logical pixels. Only produced when both width and height
/// were stored; partial data yields no size rather than a guessed one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSize {
    pub width: f64,
    pub height: f64,
}

/// Top-left window offset. Same pairing rule as [`WindowSize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowPosition {
    pub x: f64,
    pub y: f64,
}

/// Last known window placement, combined from four optional fields.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowDimensions {
    pub size: Option<WindowSize>,
    pub position: Option<WindowPosition>,
}
