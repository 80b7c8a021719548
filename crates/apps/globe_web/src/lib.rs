//! Browser wiring for the auto-rotating globe.
//!
//! The page shows a credential entry widget until [`initialize_globe`]
//! succeeds; afterwards the map engine occupies the same region and the
//! spin session drives it through surface callbacks.

use std::cell::RefCell;

use console_error_panic_hook::set_once;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use credentials::{CredentialStore, InMemoryCredentialStore, LocalStorageCredentialStore};
use globe::session::GlobeSession;
use globe::spin::SECONDS_PER_REVOLUTION;

mod engine;
use engine::{BrowserSurface, BrowserSurfaceFactory, globe_surface_on};

/// Fixed storage key for the engine access credential.
const CREDENTIAL_KEY: &str = "globe.access_token";

#[derive(Debug)]
enum AppCredentialStore {
    Local(LocalStorageCredentialStore),
    Memory(InMemoryCredentialStore),
}

impl AppCredentialStore {
    fn new() -> Self {
        match LocalStorageCredentialStore::new(CREDENTIAL_KEY) {
            Ok(s) => AppCredentialStore::Local(s),
            Err(_) => AppCredentialStore::Memory(InMemoryCredentialStore::new()),
        }
    }
}

impl CredentialStore for AppCredentialStore {
    fn load(&self) -> Result<Option<String>, credentials::CredentialError> {
        match self {
            AppCredentialStore::Local(s) => s.load(),
            AppCredentialStore::Memory(s) => s.load(),
        }
    }

    fn save(&mut self, credential: &str) -> Result<(), credentials::CredentialError> {
        match self {
            AppCredentialStore::Local(s) => s.save(credential),
            AppCredentialStore::Memory(s) => s.save(credential),
        }
    }

    fn clear(&mut self) -> Result<(), credentials::CredentialError> {
        match self {
            AppCredentialStore::Local(s) => s.clear(),
            AppCredentialStore::Memory(s) => s.clear(),
        }
    }
}

struct AppState {
    session: Option<GlobeSession<BrowserSurface>>,
    store: AppCredentialStore,
    // Listener closures must stay alive as long as the surface can emit.
    listeners: Vec<Closure<dyn FnMut()>>,
}

thread_local! {
    static STATE: RefCell<AppState> = RefCell::new(AppState {
        session: None,
        store: AppCredentialStore::new(),
        listeners: Vec::new(),
    });
}

/// Safe TLS access helper that returns a default on teardown instead of
/// panicking. Use this for all STATE accesses so a late callback after
/// state teardown is a silent no-op.
fn with_state<F, R>(f: F) -> R
where
    F: FnOnce(&RefCell<AppState>) -> R,
    R: Default,
{
    STATE.try_with(f).unwrap_or_default()
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Credential remembered from a previous session, for pre-filling the
/// entry widget.
#[wasm_bindgen]
pub fn stored_credential() -> Option<String> {
    with_state(|state| state.borrow().store.load().ok().flatten())
}

/// Submit action for the credential prompt.
///
/// Returns `true` once the globe is up. Returns `false` (with the cause
/// logged to the console) when the credential is empty or the engine
/// rejects construction; the caller stays on the prompt and may resubmit.
#[wasm_bindgen]
pub fn initialize_globe(credential: &str) -> bool {
    if is_initialized() {
        return true;
    }

    let created = with_state(|state| {
        let mut s = state.borrow_mut();
        match GlobeSession::initialize(&BrowserSurfaceFactory, credential, &mut s.store) {
            Ok(session) => {
                s.session = Some(session);
                true
            }
            Err(err) => {
                web_sys::console::error_1(&JsValue::from_str(&format!(
                    "globe initialization failed: {err}"
                )));
                false
            }
        }
    });

    if created {
        bind_surface_events();
    }
    created
}

fn bind_event(
    event: &'static str,
    listeners: &mut Vec<Closure<dyn FnMut()>>,
    apply: fn(&mut GlobeSession<BrowserSurface>),
) {
    let closure = Closure::<dyn FnMut()>::new(move || {
        with_state(|state| {
            let mut s = state.borrow_mut();
            if let Some(session) = s.session.as_mut() {
                apply(session);
            }
        });
    });
    globe_surface_on(event, closure.as_ref().unchecked_ref());
    listeners.push(closure);
}

fn bind_surface_events() {
    let mut listeners = Vec::new();

    bind_event("style.load", &mut listeners, |s| s.on_style_loaded());
    bind_event("mousedown", &mut listeners, |s| s.on_interaction_start());
    bind_event("dragstart", &mut listeners, |s| s.on_interaction_start());
    bind_event("mouseup", &mut listeners, |s| s.on_interaction_end());
    bind_event("touchend", &mut listeners, |s| s.on_interaction_end());
    bind_event("moveend", &mut listeners, |s| s.on_move_end());

    with_state(move |state| state.borrow_mut().listeners = listeners);
}

/// Whether an initialized surface is currently live.
#[wasm_bindgen]
pub fn is_initialized() -> bool {
    with_state(|state| {
        state
            .borrow()
            .session
            .as_ref()
            .is_some_and(|s| s.is_active())
    })
}

/// Master enable for automatic rotation.
#[wasm_bindgen]
pub fn set_spin_enabled(enabled: bool) {
    with_state(|state| {
        let mut s = state.borrow_mut();
        if let Some(session) = s.session.as_mut() {
            session.set_spin_enabled(enabled);
        }
    });
}

#[wasm_bindgen]
pub fn spin_settings() -> JsValue {
    let (enabled, interacting) = with_state(|state| {
        let s = state.borrow();
        match s.session.as_ref() {
            Some(session) => (session.spin_enabled(), session.is_user_interacting()),
            None => (false, false),
        }
    });

    let o = js_sys::Object::new();
    let _ = js_sys::Reflect::set(
        &o,
        &JsValue::from_str("enabled"),
        &JsValue::from_bool(enabled),
    );
    let _ = js_sys::Reflect::set(
        &o,
        &JsValue::from_str("user_interacting"),
        &JsValue::from_bool(interacting),
    );
    let _ = js_sys::Reflect::set(
        &o,
        &JsValue::from_str("seconds_per_revolution"),
        &JsValue::from_f64(SECONDS_PER_REVOLUTION),
    );
    o.into()
}

/// Drains the session's diagnostic trail as an array of strings.
#[wasm_bindgen]
pub fn drain_diagnostics() -> JsValue {
    let events = with_state(|state| {
        let mut s = state.borrow_mut();
        match s.session.as_mut() {
            Some(session) => session.diagnostics_mut().drain(),
            None => Vec::new(),
        }
    });

    let arr = js_sys::Array::new();
    for event in events {
        arr.push(&JsValue::from_str(&format!(
            "[{}] {}",
            event.kind, event.message
        )));
    }
    arr.into()
}

/// Releases the surface and detaches listeners. Safe to call at any time,
/// including before initialization or twice in a row.
#[wasm_bindgen]
pub fn teardown_globe() {
    with_state(|state| {
        let mut s = state.borrow_mut();
        if let Some(session) = s.session.as_mut() {
            session.teardown();
        }
        s.session = None;
        s.listeners.clear();
    });
}
