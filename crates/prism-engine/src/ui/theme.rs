use egui::{Color32, Stroke, Visuals};

type Rgba = [f32; 4];

/// Fixed overlay themes.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Theme {
    #[default]
    Dark,
    Darker,
}

/// Color and spacing table for one theme. Colors are straight (unmultiplied) sRGB.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Palette {
    pub text: Rgba,
    pub window_bg: Rgba,
    pub popup_bg: Rgba,
    pub border: Rgba,
    pub frame_bg: Rgba,
    pub frame_bg_hovered: Rgba,
    pub frame_bg_active: Rgba,
    pub title_bg: Rgba,
    pub scrollbar_bg: Rgba,
    pub accent: Rgba,
    pub button: Rgba,
    pub button_hovered: Rgba,
    pub button_active: Rgba,
    pub selection: Rgba,
    pub item_spacing: [f32; 2],
    pub button_padding: [f32; 2],
    pub indent: f32,
}

const DARK: Palette = Palette {
    text: [1.00, 1.00, 1.00, 1.00],
    window_bg: [0.13, 0.14, 0.15, 1.00],
    popup_bg: [0.13, 0.14, 0.15, 1.00],
    border: [0.43, 0.43, 0.50, 0.50],
    frame_bg: [0.25, 0.25, 0.25, 1.00],
    frame_bg_hovered: [0.38, 0.38, 0.38, 1.00],
    frame_bg_active: [0.67, 0.67, 0.67, 0.39],
    title_bg: [0.08, 0.08, 0.09, 1.00],
    scrollbar_bg: [0.02, 0.02, 0.02, 0.53],
    accent: [0.11, 0.64, 0.92, 1.00],
    button: [0.25, 0.25, 0.25, 1.00],
    button_hovered: [0.38, 0.38, 0.38, 1.00],
    button_active: [0.67, 0.67, 0.67, 0.39],
    selection: [0.26, 0.59, 0.98, 0.35],
    item_spacing: [8.0, 4.0],
    button_padding: [4.0, 3.0],
    indent: 21.0,
};

const DARKER: Palette = Palette {
    text: [1.00, 1.00, 1.00, 1.00],
    window_bg: [0.10, 0.10, 0.10, 1.00],
    popup_bg: [0.19, 0.19, 0.19, 0.92],
    border: [0.19, 0.19, 0.19, 0.29],
    frame_bg: [0.05, 0.05, 0.05, 0.54],
    frame_bg_hovered: [0.19, 0.19, 0.19, 0.54],
    frame_bg_active: [0.20, 0.22, 0.23, 1.00],
    title_bg: [0.00, 0.00, 0.00, 1.00],
    scrollbar_bg: [0.05, 0.05, 0.05, 0.54],
    accent: [0.33, 0.67, 0.86, 1.00],
    button: [0.05, 0.05, 0.05, 0.54],
    button_hovered: [0.19, 0.19, 0.19, 0.54],
    button_active: [0.20, 0.22, 0.23, 1.00],
    selection: [0.20, 0.22, 0.23, 1.00],
    item_spacing: [6.0, 6.0],
    button_padding: [5.0, 2.0],
    indent: 25.0,
};

impl Theme {
    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Dark => &DARK,
            Theme::Darker => &DARKER,
        }
    }

    pub fn visuals(self) -> Visuals {
        let p = self.palette();
        let mut v = Visuals::dark();

        v.override_text_color = Some(color(p.text));
        v.window_fill = color(p.window_bg);
        v.panel_fill = color(p.window_bg);
        v.window_stroke = Stroke::new(1.0, color(p.border));
        v.faint_bg_color = color(p.title_bg);
        v.extreme_bg_color = color(p.scrollbar_bg);
        v.hyperlink_color = color(p.accent);
        v.selection.bg_fill = color(p.selection);
        v.selection.stroke = Stroke::new(1.0, color(p.accent));

        v.widgets.noninteractive.bg_fill = color(p.popup_bg);
        v.widgets.noninteractive.bg_stroke = Stroke::new(1.0, color(p.border));
        v.widgets.inactive.bg_fill = color(p.frame_bg);
        v.widgets.inactive.weak_bg_fill = color(p.button);
        v.widgets.hovered.bg_fill = color(p.frame_bg_hovered);
        v.widgets.hovered.weak_bg_fill = color(p.button_hovered);
        v.widgets.active.bg_fill = color(p.frame_bg_active);
        v.widgets.active.weak_bg_fill = color(p.button_active);

        v
    }

    /// Installs this theme's visuals and spacing on `ctx`.
    pub fn apply(self, ctx: &egui::Context) {
        let p = self.palette();
        ctx.set_theme(egui::ThemePreference::Dark);
        ctx.set_visuals(self.visuals());
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(p.item_spacing[0], p.item_spacing[1]);
            style.spacing.button_padding = egui::vec2(p.button_padding[0], p.button_padding[1]);
            style.spacing.indent = p.indent;
        });
    }
}

fn channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn color([r, g, b, a]: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(channel(r), channel(g), channel(b), channel(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_rounds_and_clamps() {
        assert_eq!(channel(0.0), 0);
        assert_eq!(channel(1.0), 255);
        assert_eq!(channel(0.5), 128);
        assert_eq!(channel(-1.0), 0);
        assert_eq!(channel(2.0), 255);
    }

    #[test]
    fn themes_have_distinct_palettes() {
        assert_ne!(Theme::Dark.palette(), Theme::Darker.palette());
    }

    #[test]
    fn visuals_use_palette_window_fill() {
        let v = Theme::Darker.visuals();
        assert_eq!(v.window_fill, Color32::from_rgb(26, 26, 26));
        assert!(v.dark_mode);
    }

    #[test]
    fn apply_sets_spacing() {
        let ctx = egui::Context::default();
        Theme::Darker.apply(&ctx);
        let style = ctx.style();
        assert_eq!(style.spacing.indent, 25.0);
        assert_eq!(style.spacing.item_spacing, egui::vec2(6.0, 6.0));
    }
}
