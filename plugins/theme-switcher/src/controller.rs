use webrs_web_utils::notify;
use webrs_web_utils::state_machine::Machine;

use crate::LOG_CONTEXT;
use crate::config::SwitcherConfig;
use crate::core::{
    StyleTable, ThemeCatalog, ThemeCycleDirection, ThemeIndex, ThemeName, ThemeRender,
    ThemeSwitcherEffect, ThemeSwitcherEvent, ThemeSwitcherMachine, render_theme,
    resolve_starting_theme,
};
use crate::host::{CONTROL_MARKUP, PageHost};
use crate::persist::PreferenceChain;

#[derive(Debug)]
enum RuntimeAction {
    MountControl,
    Render { render: ThemeRender },
    Persist { theme: String },
}

fn noop_activate() {}

/// Owns the switcher state and executes its effects against a page.
#[derive(Debug)]
pub struct ThemeController<H> {
    machine: ThemeSwitcherMachine,
    styles: StyleTable,
    preferences: PreferenceChain,
    host: H,
    on_activate: fn(),
}

impl<H: PageHost> ThemeController<H> {
    pub fn new(
        catalog: ThemeCatalog,
        styles: StyleTable,
        preferences: PreferenceChain,
        host: H,
    ) -> Self {
        Self {
            machine: ThemeSwitcherMachine::new(catalog),
            styles,
            preferences,
            host,
            on_activate: noop_activate,
        }
    }

    /// Builds a controller with the built-in style table, reporting an
    /// unusable injected catalog before falling back to the default one.
    pub fn from_config(config: &SwitcherConfig, preferences: PreferenceChain, host: H) -> Self {
        let (catalog, err) = config.resolve_catalog();
        if let Some(err) = err {
            notify::warn(LOG_CONTEXT, &format!("{err}; using built-in themes"));
        }
        Self::new(catalog, StyleTable::builtin(), preferences, host)
    }

    /// Callback wired to the mounted control.
    #[must_use]
    pub fn with_activation(mut self, on_activate: fn()) -> Self {
        self.on_activate = on_activate;
        self
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        self.machine.catalog()
    }

    pub fn current_index(&self) -> Option<ThemeIndex> {
        self.machine.current_index()
    }

    pub fn current_theme(&self) -> Option<&ThemeName> {
        self.machine.current_theme()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Resolves the starting theme, mounts the control and applies a stored
    /// preference. Later calls do nothing.
    pub fn initialize(&mut self) {
        if self.machine.is_initialized() {
            return;
        }
        let persisted = self.preferences.read();
        let markers = self.host.markers().unwrap_or_else(|err| {
            notify::debug(LOG_CONTEXT, &format!("read page markers failed: {err}"));
            Vec::new()
        });
        let start = resolve_starting_theme(self.machine.catalog(), persisted.as_deref(), &markers);
        self.dispatch(ThemeSwitcherEvent::Ready(start));
    }

    pub fn cycle(&mut self) {
        self.cycle_in(ThemeCycleDirection::Next);
    }

    pub fn cycle_in(&mut self, direction: ThemeCycleDirection) {
        self.dispatch(ThemeSwitcherEvent::Cycle(direction));
    }

    fn dispatch(&mut self, event: ThemeSwitcherEvent) {
        let transition = self.machine.reduce(event);
        if transition.is_empty() {
            return;
        }

        let catalog = self.machine.catalog();
        let mut actions = Vec::with_capacity(transition.effects.len());
        for effect in transition.effects {
            match effect {
                ThemeSwitcherEffect::MountControl => actions.push(RuntimeAction::MountControl),
                ThemeSwitcherEffect::ApplyTheme(index) => {
                    if let Some(render) = render_theme(catalog, &self.styles, index) {
                        actions.push(RuntimeAction::Render { render });
                    }
                }
                ThemeSwitcherEffect::PersistTheme(index) => {
                    if let Some(theme) = catalog.get(index) {
                        actions.push(RuntimeAction::Persist {
                            theme: theme.as_str().to_string(),
                        });
                    }
                }
            }
        }

        for action in actions {
            self.execute(action);
        }
    }

    fn execute(&mut self, action: RuntimeAction) {
        match action {
            RuntimeAction::MountControl => {
                if let Err(err) = self.host.mount_control(&CONTROL_MARKUP, self.on_activate) {
                    notify::warn(LOG_CONTEXT, &format!("mount theme control failed: {err}"));
                }
            }
            RuntimeAction::Render { render } => {
                if let Err(err) = apply_render(&mut self.host, &render) {
                    notify::warn(
                        LOG_CONTEXT,
                        &format!("apply theme '{}' failed: {err}", render.marker),
                    );
                }
            }
            RuntimeAction::Persist { theme } => match self.preferences.write(&theme) {
                Ok(backend) => {
                    notify::debug(LOG_CONTEXT, &format!("saved theme '{theme}' to {backend}"));
                }
                Err(err) => notify::warn(LOG_CONTEXT, &err.to_string()),
            },
        }
    }
}

fn apply_render<H: PageHost>(host: &mut H, render: &ThemeRender) -> webrs_web_utils::Result<()> {
    for marker in &render.clear_markers {
        host.remove_marker(marker)?;
    }
    host.add_marker(&render.marker)?;

    if let Some(styles) = &render.styles {
        for assignment in styles {
            host.set_style_variable(assignment.var.css_name(), &assignment.value)?;
        }
    }
    if let Some(label) = &render.label {
        host.set_control_label(label)?;
    }
    Ok(())
}
