//! Light and dark palettes plus the shared egui style.
//!
//! The store's theme slice picks the palette; [`apply_theme`] is what the
//! theme subscriber calls after every committed change.

use eframe::egui::{self, Color32, FontFamily, FontId, TextStyle, Visuals};
use std::collections::BTreeMap;

use crate::state::Theme;

pub const PAGE_TITLE: &str = "page_title";
pub const FOOTER: &str = "footer";

/// Semantic colors for one theme.
#[derive(Clone, Debug, PartialEq)]
pub struct ShellPalette {
    pub name: &'static str,
    pub background: Color32,
    pub panel: Color32,
    pub card: Color32,
    pub accent: Color32,
    pub accent_hover: Color32,
    pub error: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub border: Color32,
    pub input_bg: Color32,
    pub widget_bg: Color32,
    pub widget_hover: Color32,
}

impl ShellPalette {
    pub fn dark() -> Self {
        Self {
            name: "Dark",
            background: Color32::from_rgb(10, 10, 15),
            panel: Color32::from_rgb(19, 19, 26),
            card: Color32::from_rgb(28, 28, 38),
            accent: Color32::from_rgb(88, 101, 242),
            accent_hover: Color32::from_rgb(71, 82, 196),
            error: Color32::from_rgb(240, 71, 71),
            text_primary: Color32::WHITE,
            text_muted: Color32::from_rgb(114, 118, 125),
            border: Color32::from_rgb(47, 49, 54),
            input_bg: Color32::from_rgb(30, 32, 38),
            widget_bg: Color32::from_rgb(55, 60, 70),
            widget_hover: Color32::from_rgb(70, 76, 88),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light",
            background: Color32::from_rgb(255, 255, 255),
            panel: Color32::from_rgb(246, 246, 247),
            card: Color32::from_rgb(242, 243, 245),
            accent: Color32::from_rgb(88, 101, 242),
            accent_hover: Color32::from_rgb(71, 82, 196),
            error: Color32::from_rgb(240, 71, 71),
            text_primary: Color32::from_rgb(6, 6, 7),
            text_muted: Color32::from_rgb(116, 127, 141),
            border: Color32::from_rgb(210, 213, 219),
            input_bg: Color32::from_rgb(255, 255, 255),
            widget_bg: Color32::from_rgb(227, 229, 232),
            widget_hover: Color32::from_rgb(212, 215, 220),
        }
    }

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::light(),
            Theme::Dark => Self::dark(),
        }
    }
}

/// Text hierarchy shared by both themes.
///
/// Adds two named styles: [`PAGE_TITLE`] for the login heading and
/// [`FOOTER`] for the link row under the login form.
pub fn configure_text_styles() -> BTreeMap<TextStyle, FontId> {
    use FontFamily::{Monospace, Proportional};

    [
        (TextStyle::Small, FontId::new(11.0, Proportional)),
        (TextStyle::Body, FontId::new(14.0, Proportional)),
        (TextStyle::Button, FontId::new(14.0, Proportional)),
        (TextStyle::Heading, FontId::new(18.0, Proportional)),
        (TextStyle::Monospace, FontId::new(13.0, Monospace)),
        (TextStyle::Name(PAGE_TITLE.into()), FontId::new(26.0, Proportional)),
        (TextStyle::Name(FOOTER.into()), FontId::new(12.0, Proportional)),
    ]
    .into()
}

/// `TextStyle::Name(name)` if the style defines it, `fallback` otherwise.
///
/// egui panics when asked for a named style it doesn't know, and a context
/// only has ours after [`apply_theme`].
pub fn named_or(style: &egui::Style, name: &str, fallback: TextStyle) -> TextStyle {
    let named = TextStyle::Name(name.into());
    if style.text_styles.contains_key(&named) {
        named
    } else {
        fallback
    }
}

/// Base visuals for a theme with the palette folded in.
pub fn visuals_for(theme: Theme) -> Visuals {
    let palette = ShellPalette::for_theme(theme);
    let mut visuals = match theme {
        Theme::Light => Visuals::light(),
        Theme::Dark => Visuals::dark(),
    };

    visuals.panel_fill = palette.panel;
    visuals.window_fill = palette.card;
    visuals.extreme_bg_color = palette.input_bg;
    visuals.hyperlink_color = palette.accent;
    visuals.error_fg_color = palette.error;
    visuals.selection.bg_fill = Color32::from_rgba_unmultiplied(88, 101, 242, 100);

    let radius = egui::CornerRadius::same(6);
    for (widget, fill) in [
        (&mut visuals.widgets.inactive, palette.widget_bg),
        (&mut visuals.widgets.hovered, palette.widget_hover),
        (&mut visuals.widgets.active, palette.accent),
    ] {
        widget.bg_fill = fill;
        widget.weak_bg_fill = fill;
        widget.bg_stroke = egui::Stroke::NONE;
        widget.corner_radius = radius;
    }
    visuals
}

/// Apply visuals, spacing and text styles for `theme` to the whole context.
pub fn apply_theme(ctx: &egui::Context, theme: Theme) {
    let mut style = (*ctx.style()).clone();
    style.text_styles = configure_text_styles();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(12);
    style.spacing.button_padding = egui::vec2(10.0, 5.0);
    style.visuals = visuals_for(theme);
    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visuals_follow_theme() {
        assert!(visuals_for(Theme::Dark).dark_mode);
        assert!(!visuals_for(Theme::Light).dark_mode);
        assert_eq!(
            visuals_for(Theme::Light).panel_fill,
            ShellPalette::light().panel
        );
    }

    #[test]
    fn test_palette_names() {
        assert_eq!(ShellPalette::for_theme(Theme::Dark).name, "Dark");
        assert_eq!(ShellPalette::for_theme(Theme::Light).name, "Light");
    }

    #[test]
    fn test_named_text_styles() {
        let styles = configure_text_styles();
        assert!(styles.contains_key(&TextStyle::Name(PAGE_TITLE.into())));
        assert!(styles.contains_key(&TextStyle::Name(FOOTER.into())));
    }

    #[test]
    fn test_named_or_falls_back_until_themed() {
        let ctx = egui::Context::default();
        assert_eq!(
            named_or(&ctx.style(), PAGE_TITLE, TextStyle::Heading),
            TextStyle::Heading
        );

        apply_theme(&ctx, Theme::Light);
        assert_eq!(
            named_or(&ctx.style(), PAGE_TITLE, TextStyle::Heading),
            TextStyle::Name(PAGE_TITLE.into())
        );
    }

    #[test]
    fn test_apply_theme_switches_context() {
        let ctx = egui::Context::default();
        apply_theme(&ctx, Theme::Dark);
        assert!(ctx.style().visuals.dark_mode);
        apply_theme(&ctx, Theme::Light);
        assert!(!ctx.style().visuals.dark_mode);
    }
}
