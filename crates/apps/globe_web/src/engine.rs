//! Binding to the page's map engine.
//!
//! The engine (`mapboxgl`) is loaded by the page; this module owns the
//! single live map instance on the JS side and exposes it to Rust as a
//! [`RenderSurface`]. All JS-side functions tolerate a missing map so a
//! call racing teardown is a no-op.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use foundation::geo::LonLat;
use globe::surface::{
    Atmosphere, EaseRequest, NavControlOptions, RenderSurface, SurfaceConfig, SurfaceError,
    SurfaceFactory,
};

/// DOM id of the element the map renders into.
pub const GLOBE_CONTAINER_ID: &str = "globe-container";

#[wasm_bindgen(inline_js = "
let __globe_map = null;

export function globe_surface_create(container, token, style, lon, lat, zoom, pitch, projection) {
    if (typeof mapboxgl === 'undefined') {
        throw new Error('map engine is not loaded');
    }
    mapboxgl.accessToken = token;
    __globe_map = new mapboxgl.Map({
        container: container,
        style: style,
        projection: projection,
        zoom: zoom,
        center: [lon, lat],
        pitch: pitch,
    });
}

export function globe_surface_add_nav_control(visualizePitch, corner) {
    if (!__globe_map) return;
    __globe_map.addControl(
        new mapboxgl.NavigationControl({ visualizePitch: visualizePitch }),
        corner
    );
}

export function globe_surface_disable_scroll_zoom() {
    if (!__globe_map) return;
    __globe_map.scrollZoom.disable();
}

export function globe_surface_get_lon() {
    return __globe_map ? __globe_map.getCenter().lng : 0;
}

export function globe_surface_get_lat() {
    return __globe_map ? __globe_map.getCenter().lat : 0;
}

export function globe_surface_get_zoom() {
    return __globe_map ? __globe_map.getZoom() : 0;
}

export function globe_surface_ease_to(lon, lat, durationMs, easing) {
    if (!__globe_map) return;
    const options = { center: [lon, lat], duration: durationMs };
    if (easing === 'linear') {
        options.easing = (n) => n;
    }
    __globe_map.easeTo(options);
}

export function globe_surface_set_fog(color, highColor, horizonBlend) {
    if (!__globe_map) return;
    __globe_map.setFog({
        color: color,
        'high-color': highColor,
        'horizon-blend': horizonBlend,
    });
}

export function globe_surface_on(event, callback) {
    if (!__globe_map) return;
    __globe_map.on(event, () => callback());
}

export function globe_surface_remove() {
    if (!__globe_map) return;
    __globe_map.remove();
    __globe_map = null;
}
")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn globe_surface_create(
        container: &str,
        token: &str,
        style: &str,
        lon: f64,
        lat: f64,
        zoom: f64,
        pitch: f64,
        projection: &str,
    ) -> Result<(), JsValue>;

    fn globe_surface_add_nav_control(visualize_pitch: bool, corner: &str);
    fn globe_surface_disable_scroll_zoom();
    fn globe_surface_get_lon() -> f64;
    fn globe_surface_get_lat() -> f64;
    fn globe_surface_get_zoom() -> f64;
    fn globe_surface_ease_to(lon: f64, lat: f64, duration_ms: f64, easing: &str);
    fn globe_surface_set_fog(color: &str, high_color: &str, horizon_blend: f64);
    pub fn globe_surface_on(event: &str, callback: &js_sys::Function);
    fn globe_surface_remove();
}

/// [`RenderSurface`] over the page's live map instance.
#[derive(Debug)]
pub struct BrowserSurface;

impl RenderSurface for BrowserSurface {
    fn center(&self) -> LonLat {
        LonLat::new(globe_surface_get_lon(), globe_surface_get_lat())
    }

    fn zoom(&self) -> f64 {
        globe_surface_get_zoom()
    }

    fn ease_to(&mut self, request: EaseRequest) {
        globe_surface_ease_to(
            request.center.lon_deg,
            request.center.lat_deg,
            f64::from(request.duration_ms),
            request.easing.name(),
        );
    }

    fn disable_scroll_zoom(&mut self) {
        globe_surface_disable_scroll_zoom();
    }

    fn add_navigation_control(&mut self, options: NavControlOptions) {
        globe_surface_add_nav_control(options.visualize_pitch, options.corner.as_str());
    }

    fn set_atmosphere(&mut self, atmosphere: Atmosphere) {
        globe_surface_set_fog(
            &atmosphere.color.css(),
            &atmosphere.high_color.css(),
            atmosphere.horizon_blend,
        );
    }

    fn release(&mut self) {
        globe_surface_remove();
    }
}

/// Constructs the map instance inside [`GLOBE_CONTAINER_ID`].
pub struct BrowserSurfaceFactory;

impl SurfaceFactory for BrowserSurfaceFactory {
    type Surface = BrowserSurface;

    fn create(
        &self,
        credential: &str,
        config: &SurfaceConfig,
    ) -> Result<BrowserSurface, SurfaceError> {
        globe_surface_create(
            GLOBE_CONTAINER_ID,
            credential,
            &config.style,
            config.center.lon_deg,
            config.center.lat_deg,
            config.zoom,
            config.pitch_deg,
            config.projection.as_str(),
        )
        .map_err(|err| SurfaceError::Construction(js_error_message(&err)))?;

        Ok(BrowserSurface)
    }
}

fn js_error_message(err: &JsValue) -> String {
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}
