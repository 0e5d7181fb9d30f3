//! Browser bindings: DOM host, storage backends and the exported entry points.
//! Only compiled on `wasm32` targets.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlDocument, HtmlElement, Storage};
use webrs_web_utils::decode::{self, js_error};
use webrs_web_utils::{Error, Result, notify, panic, ready};

use crate::LOG_CONTEXT;
use crate::config::{MarkerTarget, SwitcherConfig, ThemeListInput};
use crate::controller::ThemeController;
use crate::core::{ThemeCycleDirection, ThemeName};
use crate::host::{ControlMarkup, PageHost};
use crate::persist::cookie::{CookieBackend, CookieJar};
use crate::persist::{PreferenceBackend, PreferenceChain, PreferenceError};

pub const THEME_LIST_GLOBAL: &str = "THEME_LIST";
pub const CONFIG_GLOBAL: &str = "THEME_SWITCHER_CONFIG";

thread_local! {
    static CONTROLLER: RefCell<Option<ThemeController<DomHost>>> = const { RefCell::new(None) };
}

pub struct DomHost {
    document: Document,
    marker_target: MarkerTarget,
    label: Option<Element>,
}

impl DomHost {
    pub fn new(document: Document, marker_target: MarkerTarget) -> Self {
        Self {
            document,
            marker_target,
            label: None,
        }
    }

    fn body(&self) -> Result<HtmlElement> {
        self.document
            .body()
            .ok_or_else(|| Error::unavailable("document.body"))
    }

    fn root(&self) -> Result<Element> {
        self.document
            .document_element()
            .ok_or_else(|| Error::unavailable("document.documentElement"))
    }

    fn marker_element(&self) -> Result<Element> {
        match self.marker_target {
            MarkerTarget::Body => self.body().map(Into::into),
            MarkerTarget::Root => self.root(),
        }
    }

    fn create(&self, tag: &str, class: &str) -> Result<Element> {
        let element = self
            .document
            .create_element(tag)
            .map_err(js_error("createElement"))?;
        element.set_class_name(class);
        Ok(element)
    }
}

impl PageHost for DomHost {
    fn markers(&self) -> Result<Vec<String>> {
        let classes = self.marker_element()?.class_list();
        Ok((0..classes.length())
            .filter_map(|raw| classes.item(raw))
            .collect())
    }

    fn remove_marker(&mut self, name: &str) -> Result<()> {
        self.marker_element()?
            .class_list()
            .remove_1(name)
            .map_err(js_error("classList.remove"))
    }

    fn add_marker(&mut self, name: &str) -> Result<()> {
        self.marker_element()?
            .class_list()
            .add_1(name)
            .map_err(js_error("classList.add"))
    }

    fn set_style_variable(&mut self, name: &str, value: &str) -> Result<()> {
        let root = self
            .root()?
            .dyn_into::<HtmlElement>()
            .map_err(|_| Error::unavailable("documentElement.style"))?;
        root.style()
            .set_property(name, value)
            .map_err(js_error("style.setProperty"))
    }

    fn mount_control(&mut self, markup: &ControlMarkup, on_activate: fn()) -> Result<()> {
        let container = self.create("div", markup.container_class)?;
        let button = self.create("button", markup.button_class)?;
        button
            .set_attribute("aria-label", markup.aria_label)
            .map_err(js_error("setAttribute"))?;
        let icon = self.create("span", markup.icon_class)?;
        let label = self.create("span", markup.text_class)?;
        label.set_text_content(Some(markup.initial_label));

        button
            .append_child(&icon)
            .and_then(|_| button.append_child(&label))
            .map_err(js_error("appendChild"))?;

        let listener = Closure::<dyn FnMut()>::new(on_activate);
        button
            .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
            .map_err(js_error("addEventListener"))?;
        // The control lives as long as the page.
        listener.forget();

        container
            .append_child(&button)
            .map_err(js_error("appendChild"))?;
        self.body()?
            .append_child(&container)
            .map_err(js_error("appendChild"))?;
        self.label = Some(label);
        Ok(())
    }

    fn set_control_label(&mut self, text: &str) -> Result<()> {
        if let Some(label) = &self.label {
            label.set_text_content(Some(text));
        }
        Ok(())
    }
}

/// `window.localStorage`. Holds `None` when the browser refuses access.
pub struct LocalStorageBackend {
    storage: Option<Storage>,
}

impl LocalStorageBackend {
    const NAME: &'static str = "localStorage";

    pub fn new(window: &web_sys::Window) -> Self {
        let storage = match window.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                notify::debug(
                    LOG_CONTEXT,
                    &format!("localStorage unavailable: {}", decode::describe(&err)),
                );
                None
            }
        };
        Self::from_storage(storage)
    }

    /// `None` behaves like a browser that blocks storage access.
    pub fn from_storage(storage: Option<Storage>) -> Self {
        Self { storage }
    }

    fn storage(&self) -> std::result::Result<&Storage, PreferenceError> {
        self.storage
            .as_ref()
            .ok_or(PreferenceError::Unavailable {
                backend: Self::NAME,
            })
    }
}

impl PreferenceBackend for LocalStorageBackend {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn read(&self, key: &str) -> std::result::Result<Option<String>, PreferenceError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| PreferenceError::Read {
                backend: Self::NAME,
                message: decode::describe(&err),
            })
    }

    fn write(&mut self, key: &str, value: &str) -> std::result::Result<(), PreferenceError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| PreferenceError::Write {
                backend: Self::NAME,
                message: decode::describe(&err),
            })
    }
}

/// `document.cookie`.
pub struct DocumentCookieJar {
    document: HtmlDocument,
}

impl DocumentCookieJar {
    const NAME: &'static str = "cookie";

    pub fn new(document: &Document) -> Result<Self> {
        let document = document
            .clone()
            .dyn_into::<HtmlDocument>()
            .map_err(|_| Error::unavailable("document.cookie"))?;
        Ok(Self { document })
    }
}

impl CookieJar for DocumentCookieJar {
    fn header(&self) -> std::result::Result<String, PreferenceError> {
        self.document
            .cookie()
            .map_err(|err| PreferenceError::Read {
                backend: Self::NAME,
                message: decode::describe(&err),
            })
    }

    fn set(&mut self, cookie: &str) -> std::result::Result<(), PreferenceError> {
        self.document
            .set_cookie(cookie)
            .map_err(|err| PreferenceError::Write {
                backend: Self::NAME,
                message: decode::describe(&err),
            })
    }
}

/// Reads `THEME_SWITCHER_CONFIG` and `THEME_LIST` from the page; the latter wins.
pub fn config_from_globals() -> SwitcherConfig {
    let mut config = decode::global_property(CONFIG_GLOBAL)
        .map(|value| {
            decode::deserialize::<SwitcherConfig>(&value, CONFIG_GLOBAL).unwrap_or_else(|err| {
                notify::warn(LOG_CONTEXT, &format!("{err}; using defaults"));
                SwitcherConfig::default()
            })
        })
        .unwrap_or_default();
    if let Some(value) = decode::global_property(THEME_LIST_GLOBAL) {
        match decode::deserialize::<ThemeListInput>(&value, THEME_LIST_GLOBAL) {
            Ok(themes) => config.themes = Some(themes),
            Err(err) => notify::warn(LOG_CONTEXT, &format!("{err}; using built-in themes")),
        }
    }
    config
}

pub fn build_controller(document: Document) -> Result<ThemeController<DomHost>> {
    let config = config_from_globals();
    let window = ready::window()?;

    let cookie_backend =
        CookieBackend::new(DocumentCookieJar::new(&document)?, config.cookie_max_age_days);
    let preferences = PreferenceChain::new(config.storage_key())
        .with_backend(LocalStorageBackend::new(&window))
        .with_backend(cookie_backend);
    let host = DomHost::new(document, config.marker_target);

    Ok(ThemeController::from_config(&config, preferences, host).with_activation(on_control_click))
}

fn with_controller<R>(f: impl FnOnce(&mut ThemeController<DomHost>) -> R) -> Option<R> {
    CONTROLLER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn initialize_page(document: Document) {
    let already_initialized = CONTROLLER.with(|cell| cell.borrow().is_some());
    if already_initialized {
        return;
    }
    let mut controller = match build_controller(document) {
        Ok(controller) => controller,
        Err(err) => {
            notify::error(LOG_CONTEXT, &format!("failed to start theme switcher: {err}"));
            return;
        }
    };
    controller.initialize();
    CONTROLLER.with(|cell| *cell.borrow_mut() = Some(controller));
}

fn on_control_click() {
    let _ = with_controller(ThemeController::cycle);
}

#[wasm_bindgen(start)]
pub fn start() {
    panic::install_panic_hook(LOG_CONTEXT);
    let result = ready::document().and_then(|document| {
        let target = document.clone();
        ready::on_document_ready(&document, move || initialize_page(target))
    });
    if let Err(err) = result {
        notify::error(LOG_CONTEXT, &format!("failed to schedule theme switcher: {err}"));
    }
}

/// Advances to the next theme, exactly like clicking the control.
#[wasm_bindgen(js_name = cycleTheme)]
pub fn cycle_theme() {
    on_control_click();
}

#[wasm_bindgen(js_name = cyclePrevTheme)]
pub fn cycle_prev_theme() {
    let _ = with_controller(|controller| controller.cycle_in(ThemeCycleDirection::Prev));
}

/// Current theme name, `undefined` before the page is ready.
#[wasm_bindgen(js_name = currentTheme)]
pub fn current_theme() -> Option<String> {
    with_controller(|controller| controller.current_theme().map(ThemeName::to_string)).flatten()
}
