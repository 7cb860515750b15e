//! Stylesheets for highlighted code.

use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, css_for_theme_with_class_style};

use crate::error::RenderError;

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// Render the CSS stylesheet for a bundled theme.
///
/// Selectors match the span classes produced by the highlighter.
pub fn theme_css(name: &str) -> Result<String, RenderError> {
    let themes = ThemeSet::load_defaults();
    let Some(theme) = themes.themes.get(name) else {
        let available = themes
            .themes
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(RenderError::UnknownTheme {
            name: name.to_owned(),
            available,
        });
    };
    Ok(css_for_theme_with_class_style(theme, ClassStyle::Spaced)?)
}
