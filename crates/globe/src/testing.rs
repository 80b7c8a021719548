//! Test doubles shared by the spin and session tests.

use foundation::geo::LonLat;

use crate::surface::{
    Atmosphere, EaseRequest, NavControlOptions, RenderSurface, SurfaceConfig, SurfaceError,
    SurfaceFactory,
};

/// A surface that records every request and applies eased moves
/// instantly.
#[derive(Debug)]
pub struct RecordingSurface {
    pub center: LonLat,
    pub zoom: f64,
    pub requests: Vec<EaseRequest>,
    pub scroll_zoom_disabled: bool,
    pub nav_controls: Vec<NavControlOptions>,
    pub atmospheres: Vec<Atmosphere>,
    pub released: bool,
}

impl RecordingSurface {
    pub fn at_zoom(zoom: f64) -> Self {
        Self {
            center: LonLat::new(30.0, 15.0),
            zoom,
            requests: Vec::new(),
            scroll_zoom_disabled: false,
            nav_controls: Vec::new(),
            atmospheres: Vec::new(),
            released: false,
        }
    }
}

impl RenderSurface for RecordingSurface {
    fn center(&self) -> LonLat {
        self.center
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn ease_to(&mut self, request: EaseRequest) {
        self.center = request.center;
        self.requests.push(request);
    }

    fn disable_scroll_zoom(&mut self) {
        self.scroll_zoom_disabled = true;
    }

    fn add_navigation_control(&mut self, options: NavControlOptions) {
        self.nav_controls.push(options);
    }

    fn set_atmosphere(&mut self, atmosphere: Atmosphere) {
        self.atmospheres.push(atmosphere);
    }

    fn release(&mut self) {
        self.released = true;
    }
}

/// Factory producing a [`RecordingSurface`] at a fixed zoom.
pub struct RecordingFactory {
    pub zoom: f64,
}

impl SurfaceFactory for RecordingFactory {
    type Surface = RecordingSurface;

    fn create(
        &self,
        _credential: &str,
        _config: &SurfaceConfig,
    ) -> Result<RecordingSurface, SurfaceError> {
        Ok(RecordingSurface::at_zoom(self.zoom))
    }
}

/// Factory that always fails, standing in for an engine that rejects the
/// credential or cannot create a rendering context.
pub struct FailingFactory;

impl SurfaceFactory for FailingFactory {
    type Surface = RecordingSurface;

    fn create(
        &self,
        _credential: &str,
        _config: &SurfaceConfig,
    ) -> Result<RecordingSurface, SurfaceError> {
        Err(SurfaceError::Construction("unauthorized credential".into()))
    }
}
