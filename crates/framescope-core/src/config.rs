//! Session defaults applied at shape insertion time.

/// Mutable viewport defaults, adjusted by the `set` command.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportConfig {
    /// Stroke width for segments inserted without one.
    pub default_width: f64,
    /// Color for shapes inserted without one.
    pub default_color: String,
    /// Background the render sink clears to.
    pub default_background: String,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            default_width: 1.0,
            default_color: "rgba(99, 99, 99, 0.99)".to_string(),
            default_background: "#2c2929".to_string(),
        }
    }
}
