//! Surface lifecycle and interaction wiring for the spinning globe.
//!
//! A session owns one rendering surface and the spin flags layered on top
//! of it. The surface handle doubles as the cancellation token: teardown
//! takes it, so any callback arriving afterwards observes the empty
//! handle and does nothing.

use credentials::CredentialStore;

use crate::diagnostics::DiagnosticLog;
use crate::spin::SpinState;
use crate::surface::{
    Atmosphere, NavControlOptions, RenderSurface, SurfaceConfig, SurfaceFactory,
};

/// Failures surfaced to the credential prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Submit attempted with an empty credential; no construction was
    /// attempted.
    MissingCredential,
    /// The engine rejected construction (malformed or unauthorized
    /// credential, or no rendering context available).
    Initialization(String),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::MissingCredential => write!(f, "access credential is empty"),
            SessionError::Initialization(msg) => write!(f, "globe initialization failed: {msg}"),
        }
    }
}

impl std::error::Error for SessionError {}

pub struct GlobeSession<S: RenderSurface> {
    surface: Option<S>,
    spin: SpinState,
    log: DiagnosticLog,
}

impl<S: RenderSurface> GlobeSession<S> {
    /// Validates and persists the credential, constructs the surface with
    /// the fixed initial view, wires the surface-side defaults, and kicks
    /// off the rotation loop.
    ///
    /// The credential is persisted before construction so a retry after an
    /// engine failure does not re-prompt; a storage failure is recorded in
    /// the diagnostic log, not fatal. An engine failure maps to
    /// [`SessionError::Initialization`] and leaves the caller on the
    /// credential prompt.
    pub fn initialize<F>(
        factory: &F,
        credential: &str,
        store: &mut dyn CredentialStore,
    ) -> Result<Self, SessionError>
    where
        F: SurfaceFactory<Surface = S>,
    {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(SessionError::MissingCredential);
        }

        let mut log = DiagnosticLog::new();
        if let Err(err) = store.save(credential) {
            log.emit("credentials", format!("credential not persisted: {err}"));
        }

        let mut surface = factory
            .create(credential, &SurfaceConfig::default())
            .map_err(|err| SessionError::Initialization(err.to_string()))?;

        surface.add_navigation_control(NavControlOptions::default());
        surface.disable_scroll_zoom();

        let mut session = Self {
            surface: Some(surface),
            spin: SpinState::new(),
            log,
        };
        session.log.emit("session", "surface initialized");

        // First tick; afterwards move-end callbacks keep the loop going.
        session.step();

        Ok(session)
    }

    /// Registers the fog/atmosphere visual. Invoked when the surface
    /// reports its style finished loading.
    pub fn on_style_loaded(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.set_atmosphere(Atmosphere::default());
    }

    /// The rotation tick. Returns whether a transition was requested.
    pub fn step(&mut self) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        self.spin.step(surface)
    }

    /// Pointer-down or drag-start from the surface.
    pub fn on_interaction_start(&mut self) {
        if self.surface.is_none() {
            return;
        }
        self.spin.begin_interaction();
    }

    /// Pointer-up or touch-end from the surface. Resumes rotation without
    /// waiting for the next move-end tick.
    pub fn on_interaction_end(&mut self) {
        if self.surface.is_none() {
            return;
        }
        self.spin.end_interaction();
        self.step();
    }

    /// Transition-completion callback; keeps the loop self-sustaining.
    pub fn on_move_end(&mut self) {
        self.step();
    }

    pub fn set_spin_enabled(&mut self, enabled: bool) {
        self.spin.set_spin_enabled(enabled);
        self.log.emit(
            "spin",
            if enabled { "spin enabled" } else { "spin disabled" },
        );
    }

    pub fn spin_enabled(&self) -> bool {
        self.spin.is_spin_enabled()
    }

    pub fn is_user_interacting(&self) -> bool {
        self.spin.is_user_interacting()
    }

    /// Whether the session still holds its surface.
    pub fn is_active(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.log
    }

    pub fn diagnostics_mut(&mut self) -> &mut DiagnosticLog {
        &mut self.log
    }

    /// Releases the surface. Safe to call repeatedly; every later event or
    /// step call is a no-op.
    pub fn teardown(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            surface.release();
            self.log.emit("session", "surface released");
        }
    }
}
