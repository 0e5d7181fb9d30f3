//! The page surface the controller renders into.

use std::collections::BTreeMap;

use webrs_web_utils::Result;

/// Static description of the floating toggle control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlMarkup {
    pub container_class: &'static str,
    pub button_class: &'static str,
    pub aria_label: &'static str,
    pub icon_class: &'static str,
    pub text_class: &'static str,
    pub initial_label: &'static str,
}

pub const CONTROL_MARKUP: ControlMarkup = ControlMarkup {
    container_class: "theme-switcher",
    button_class: "theme-switcher__button",
    aria_label: "Switch theme",
    icon_class: "icon",
    text_class: "text",
    initial_label: "Theme",
};

/// DOM operations the controller needs, one method per side effect.
pub trait PageHost {
    /// Marker classes on the marker element, in document order.
    fn markers(&self) -> Result<Vec<String>>;

    fn remove_marker(&mut self, name: &str) -> Result<()>;

    fn add_marker(&mut self, name: &str) -> Result<()>;

    /// Sets a custom property on the document root.
    fn set_style_variable(&mut self, name: &str, value: &str) -> Result<()>;

    /// Appends the control to the page; `on_activate` runs on every click.
    fn mount_control(&mut self, markup: &ControlMarkup, on_activate: fn()) -> Result<()>;

    fn set_control_label(&mut self, text: &str) -> Result<()>;
}

/// Page model without a browser behind it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessPage {
    pub markers: Vec<String>,
    pub style_variables: BTreeMap<String, String>,
    /// Text label of each mounted control.
    pub controls: Vec<String>,
}

impl HeadlessPage {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_markers(mut self, markers: &[&str]) -> Self {
        self.markers = markers.iter().map(|marker| (*marker).to_string()).collect();
        self
    }

    pub fn style_variable(&self, name: &str) -> Option<&str> {
        self.style_variables.get(name).map(String::as_str)
    }

    pub fn control_label(&self) -> Option<&str> {
        self.controls.last().map(String::as_str)
    }
}

impl PageHost for HeadlessPage {
    fn markers(&self) -> Result<Vec<String>> {
        Ok(self.markers.clone())
    }

    fn remove_marker(&mut self, name: &str) -> Result<()> {
        self.markers.retain(|marker| marker != name);
        Ok(())
    }

    fn add_marker(&mut self, name: &str) -> Result<()> {
        if !self.markers.iter().any(|marker| marker == name) {
            self.markers.push(name.to_string());
        }
        Ok(())
    }

    fn set_style_variable(&mut self, name: &str, value: &str) -> Result<()> {
        self.style_variables
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn mount_control(&mut self, markup: &ControlMarkup, _on_activate: fn()) -> Result<()> {
        self.controls.push(markup.initial_label.to_string());
        Ok(())
    }

    fn set_control_label(&mut self, text: &str) -> Result<()> {
        if let Some(label) = self.controls.last_mut() {
            *label = text.to_string();
        }
        Ok(())
    }
}
