//! Contract between the spin controller and the external rendering engine.
//!
//! The engine owns the camera. The controller reads the view center and
//! zoom and requests animated transitions; it never writes the center
//! directly.

use foundation::easing::Easing;
use foundation::geo::LonLat;

/// sRGB color used for atmosphere styling.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS `rgb(r, g, b)` form, the shape style documents expect.
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Fog/atmosphere visual registered once the style finishes loading.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Atmosphere {
    pub color: Rgb,
    pub high_color: Rgb,
    pub horizon_blend: f64,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            color: Rgb::new(23, 23, 23),
            high_color: Rgb::new(32, 32, 42),
            horizon_blend: 0.2,
        }
    }
}

/// Viewport corner a control overlay attaches to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ControlCorner {
    #[default]
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

impl ControlCorner {
    pub fn as_str(self) -> &'static str {
        match self {
            ControlCorner::TopRight => "top-right",
            ControlCorner::TopLeft => "top-left",
            ControlCorner::BottomRight => "bottom-right",
            ControlCorner::BottomLeft => "bottom-left",
        }
    }
}

/// Navigation-control overlay configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NavControlOptions {
    pub visualize_pitch: bool,
    pub corner: ControlCorner,
}

impl Default for NavControlOptions {
    fn default() -> Self {
        Self {
            visualize_pitch: true,
            corner: ControlCorner::TopRight,
        }
    }
}

/// Camera projection requested at construction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Projection {
    #[default]
    Globe,
    Mercator,
}

impl Projection {
    pub fn as_str(self) -> &'static str {
        match self {
            Projection::Globe => "globe",
            Projection::Mercator => "mercator",
        }
    }
}

/// Initial camera placement and style for a newly constructed surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    pub style: String,
    pub center: LonLat,
    pub zoom: f64,
    pub pitch_deg: f64,
    pub projection: Projection,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            style: "mapbox://styles/mapbox/dark-v11".to_string(),
            center: LonLat::new(30.0, 15.0),
            zoom: 1.5,
            pitch_deg: 45.0,
            projection: Projection::Globe,
        }
    }
}

/// An animated transition request.
///
/// The engine interpolates the camera center over `duration_ms`, sampling
/// `easing` on [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct EaseRequest {
    pub center: LonLat,
    pub duration_ms: u32,
    pub easing: Easing,
}

/// Construction failure reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    Construction(String),
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceError::Construction(msg) => write!(f, "surface construction failed: {msg}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Camera-controllable rendering surface.
///
/// Implemented by the engine binding; the controller holds exactly one
/// surface at a time and releases it on teardown.
pub trait RenderSurface {
    fn center(&self) -> LonLat;
    fn zoom(&self) -> f64;
    fn ease_to(&mut self, request: EaseRequest);
    fn disable_scroll_zoom(&mut self);
    fn add_navigation_control(&mut self, options: NavControlOptions);
    fn set_atmosphere(&mut self, atmosphere: Atmosphere);
    fn release(&mut self);
}

/// Constructs rendering surfaces from a credential and an initial view.
pub trait SurfaceFactory {
    type Surface: RenderSurface;

    fn create(&self, credential: &str, config: &SurfaceConfig)
    -> Result<Self::Surface, SurfaceError>;
}

#[cfg(test)]
mod tests {
    use super::{Atmosphere, ControlCorner, NavControlOptions, Projection, Rgb, SurfaceConfig};
    use pretty_assertions::assert_eq;

    #[test]
    fn rgb_css_form() {
        assert_eq!(Rgb::new(23, 23, 23).css(), "rgb(23, 23, 23)");
        assert_eq!(Rgb::new(32, 32, 42).css(), "rgb(32, 32, 42)");
    }

    #[test]
    fn atmosphere_default_matches_style() {
        let fog = Atmosphere::default();
        assert_eq!(fog.color, Rgb::new(23, 23, 23));
        assert_eq!(fog.high_color, Rgb::new(32, 32, 42));
        assert_eq!(fog.horizon_blend, 0.2);
    }

    #[test]
    fn default_config_is_the_fixed_initial_view() {
        let cfg = SurfaceConfig::default();
        assert_eq!(cfg.center.lon_deg, 30.0);
        assert_eq!(cfg.center.lat_deg, 15.0);
        assert_eq!(cfg.zoom, 1.5);
        assert_eq!(cfg.pitch_deg, 45.0);
        assert_eq!(cfg.projection, Projection::Globe);
    }

    #[test]
    fn nav_control_defaults_to_top_right_with_pitch() {
        let opts = NavControlOptions::default();
        assert!(opts.visualize_pitch);
        assert_eq!(opts.corner.as_str(), "top-right");
    }
}
