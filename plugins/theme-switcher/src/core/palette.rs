//! Theme style table and the CSS custom properties each theme renders to.

use std::collections::BTreeMap;

use super::catalog::{ThemeCatalog, ThemeIndex};

/// CSS custom properties owned by the switcher. Stylesheets consume exactly these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum StyleVar {
    Accent,
    Background,
    Color,
    BorderColor,
    AccentContrastColor,
    MenuColor,
    SyntaxFuncColor,
    SyntaxVarColor,
    SyntaxPunctuationColor,
    SyntaxValueColor,
    SyntaxCommentColor,
    SyntaxCodeBorderColor,
    SyntaxCodeCopyButtonColor,
}

impl StyleVar {
    pub const ALL: [Self; 13] = [
        Self::Accent,
        Self::Background,
        Self::Color,
        Self::BorderColor,
        Self::AccentContrastColor,
        Self::MenuColor,
        Self::SyntaxFuncColor,
        Self::SyntaxVarColor,
        Self::SyntaxPunctuationColor,
        Self::SyntaxValueColor,
        Self::SyntaxCommentColor,
        Self::SyntaxCodeBorderColor,
        Self::SyntaxCodeCopyButtonColor,
    ];

    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Accent => "--accent",
            Self::Background => "--background",
            Self::Color => "--color",
            Self::BorderColor => "--border-color",
            Self::AccentContrastColor => "--accent-contrast-color",
            Self::MenuColor => "--menu-color",
            Self::SyntaxFuncColor => "--syntax-func-color",
            Self::SyntaxVarColor => "--syntax-var-color",
            Self::SyntaxPunctuationColor => "--syntax-punctuation-color",
            Self::SyntaxValueColor => "--syntax-value-color",
            Self::SyntaxCommentColor => "--syntax-comment-color",
            Self::SyntaxCodeBorderColor => "--syntax-code-border-color",
            Self::SyntaxCodeCopyButtonColor => "--syntax-code-copy-button-color",
        }
    }
}

const LIGHT_BASE: &str = "#fefcfa";
const DARK_BASE: &str = "#1d1e28";

/// How a theme derives its page background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backdrop {
    /// Opaque dark colour, dark text palette.
    Solid(String),
    /// Accent tinted into the near-white base, light text palette.
    LightBlend,
    /// Accent tinted into the dark neutral base, dark text palette.
    DarkBlend,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeStyle {
    pub accent: String,
    pub backdrop: Backdrop,
}

impl ThemeStyle {
    pub fn new(accent: &str, backdrop: Backdrop) -> Self {
        Self {
            accent: accent.to_string(),
            backdrop,
        }
    }

    fn background(&self) -> String {
        match &self.backdrop {
            Backdrop::Solid(color) => color.clone(),
            Backdrop::LightBlend => {
                format!("color-mix(in srgb, var(--accent) 2%, {LIGHT_BASE} 98%)")
            }
            Backdrop::DarkBlend => {
                format!("color-mix(in srgb, var(--accent) 2%, {DARK_BASE} 98%)")
            }
        }
    }

    fn text_palette(&self) -> &'static TextPalette {
        match self.backdrop {
            Backdrop::LightBlend => &LIGHT_PALETTE,
            Backdrop::Solid(_) | Backdrop::DarkBlend => &DARK_PALETTE,
        }
    }

    /// Every `StyleVar` with its value, in `StyleVar::ALL` order.
    pub fn assignments(&self) -> Vec<StyleAssignment> {
        let palette = self.text_palette();
        let value = |var: StyleVar| -> String {
            match var {
                StyleVar::Accent => self.accent.clone(),
                StyleVar::Background => self.background(),
                StyleVar::Color => palette.color.to_string(),
                StyleVar::BorderColor => palette.border.to_string(),
                StyleVar::AccentContrastColor => palette.accent_contrast.to_string(),
                StyleVar::MenuColor => palette.menu.to_string(),
                StyleVar::SyntaxFuncColor => palette.syntax_func.to_string(),
                StyleVar::SyntaxVarColor => palette.syntax_var.to_string(),
                StyleVar::SyntaxPunctuationColor => palette.syntax_punctuation.to_string(),
                StyleVar::SyntaxValueColor => palette.syntax_value.to_string(),
                StyleVar::SyntaxCommentColor => palette.syntax_comment.to_string(),
                StyleVar::SyntaxCodeBorderColor => palette.syntax_code_border.to_string(),
                StyleVar::SyntaxCodeCopyButtonColor => palette.syntax_copy_button.to_string(),
            }
        };
        StyleVar::ALL
            .into_iter()
            .map(|var| StyleAssignment {
                var,
                value: value(var),
            })
            .collect()
    }
}

struct TextPalette {
    color: &'static str,
    border: &'static str,
    accent_contrast: &'static str,
    menu: &'static str,
    syntax_func: &'static str,
    syntax_var: &'static str,
    syntax_punctuation: &'static str,
    syntax_value: &'static str,
    syntax_comment: &'static str,
    syntax_code_border: &'static str,
    syntax_copy_button: &'static str,
}

static DARK_PALETTE: TextPalette = TextPalette {
    color: "white",
    border: "rgba(255, 255, 255, 0.1)",
    accent_contrast: "black",
    menu: "white",
    syntax_func: "color-mix(in srgb, var(--accent) 70%, #999 30%)",
    syntax_var: "color-mix(in srgb, var(--accent) 90%, transparent)",
    syntax_punctuation: "white",
    syntax_value: "color-mix(in srgb, var(--accent), white)",
    syntax_comment: "rgba(255, 255, 255, 0.3)",
    syntax_code_border: "rgba(255, 255, 255, 0.1)",
    syntax_copy_button: "#bbb",
};

static LIGHT_PALETTE: TextPalette = TextPalette {
    color: "black",
    border: "rgba(0, 0, 0, 0.1)",
    accent_contrast: "white",
    menu: "black",
    syntax_func: "color-mix(in srgb, var(--accent) 70%, #000 30%)",
    syntax_var: "color-mix(in srgb, var(--accent) 90%, #000)",
    syntax_punctuation: "black",
    syntax_value: "color-mix(in srgb, var(--accent), black)",
    syntax_comment: "rgba(0, 0, 0, 0.3)",
    syntax_code_border: "rgba(0, 0, 0, 0.1)",
    syntax_copy_button: "#444",
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleAssignment {
    pub var: StyleVar,
    pub value: String,
}

/// Theme name to style lookup. Themes without an entry render no variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleTable {
    styles: BTreeMap<String, ThemeStyle>,
}

impl StyleTable {
    pub fn builtin() -> Self {
        let mut table = Self::default();
        table.insert(
            "darkpaper",
            ThemeStyle::new("#fefcfa", Backdrop::Solid("#0a0a0a".to_string())),
        );
        table.insert("paper", ThemeStyle::new("#1d1e28", Backdrop::LightBlend));
        for (name, accent) in [
            ("blue", "#23b0ff"),
            ("green", "#78e2a0"),
            ("orange", "#ffa86a"),
            ("pink", "#ee72f1"),
            ("red", "#ff6266"),
        ] {
            table.insert(name, ThemeStyle::new(accent, Backdrop::DarkBlend));
        }
        table
    }

    pub fn insert(&mut self, name: &str, style: ThemeStyle) {
        self.styles.insert(name.to_string(), style);
    }

    pub fn get(&self, name: &str) -> Option<&ThemeStyle> {
        self.styles.get(name)
    }
}

/// Everything one `apply` writes to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeRender {
    /// Catalog members to strip before `marker` is added.
    pub clear_markers: Vec<String>,
    pub marker: String,
    /// `None` leaves the previous variables in place.
    pub styles: Option<Vec<StyleAssignment>>,
    /// New control label; only set alongside `styles`.
    pub label: Option<String>,
}

pub fn render_theme(
    catalog: &ThemeCatalog,
    table: &StyleTable,
    index: ThemeIndex,
) -> Option<ThemeRender> {
    let theme = catalog.get(index)?;
    let styled = table.get(theme.as_str());
    Some(ThemeRender {
        clear_markers: catalog.iter().map(|name| name.as_str().to_string()).collect(),
        marker: theme.as_str().to_string(),
        styles: styled.map(ThemeStyle::assignments),
        label: styled.map(|_| theme.display_label()),
    })
}
