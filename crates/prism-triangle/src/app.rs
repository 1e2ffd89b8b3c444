use prism_engine::core::{FrameProducer, InputSink};
use prism_engine::input::{ButtonState, InputEvent};
use prism_engine::render::Renderables;
use prism_engine::time::FrameTime;
use prism_engine::ui::Theme;

/// Shows frame timing, a theme switch, and the last pointer position.
pub struct TriangleApp {
    theme: Theme,
    applied: Option<Theme>,
    pointer: Option<(f32, f32)>,
    clicks: u32,
}

impl TriangleApp {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            applied: None,
            pointer: None,
            clicks: 0,
        }
    }
}

impl FrameProducer<egui::Context> for TriangleApp {
    fn produce(&mut self, ctx: &egui::Context, time: &FrameTime) -> Renderables {
        if self.applied != Some(self.theme) {
            self.theme.apply(ctx);
            self.applied = Some(self.theme);
        }

        egui::Window::new("prism").show(ctx, |ui| {
            ui.label(format!("frame {}", time.frame_index));
            ui.label(format!("{:.2} ms", time.dt * 1000.0));
            ui.separator();

            ui.horizontal(|ui| {
                ui.radio_value(&mut self.theme, Theme::Dark, "Dark");
                ui.radio_value(&mut self.theme, Theme::Darker, "Darker");
            });
            ui.separator();

            match self.pointer {
                Some((x, y)) => ui.label(format!("pointer {x:.0}, {y:.0}")),
                None => ui.label("pointer outside"),
            };
            ui.label(format!("clicks {}", self.clicks));
        });

        Renderables::default()
    }
}

impl InputSink for TriangleApp {
    fn on_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMoved { x, y } => self.pointer = Some((x, y)),
            InputEvent::PointerLeft => self.pointer = None,
            InputEvent::PointerButton { state: ButtonState::Pressed, .. } => {
                self.clicks += 1;
                log::debug!("click #{} at {:?}", self.clicks, self.pointer);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_engine::input::{Modifiers, MouseButton};
    use prism_engine::time::FrameClock;

    fn run_frame(app: &mut TriangleApp, ctx: &egui::Context) -> Renderables {
        let time = FrameClock::new().tick();
        ctx.begin_pass(egui::RawInput::default());
        let out = app.produce(ctx, &time);
        let _ = ctx.end_pass();
        out
    }

    #[test]
    fn produces_no_renderables() {
        let ctx = egui::Context::default();
        let mut app = TriangleApp::new(Theme::Dark);
        assert!(run_frame(&mut app, &ctx).is_empty());
    }

    #[test]
    fn theme_is_applied_once_until_changed() {
        let ctx = egui::Context::default();
        let mut app = TriangleApp::new(Theme::Darker);
        run_frame(&mut app, &ctx);
        assert_eq!(app.applied, Some(Theme::Darker));
        assert_eq!(ctx.style().spacing.indent, Theme::Darker.palette().indent);
    }

    #[test]
    fn tracks_pointer_and_clicks() {
        let mut app = TriangleApp::new(Theme::Dark);
        app.on_input(&InputEvent::PointerMoved { x: 3.0, y: 4.0 });
        app.on_input(&InputEvent::PointerButton {
            button: MouseButton::Left,
            state: ButtonState::Pressed,
            modifiers: Modifiers::default(),
        });
        app.on_input(&InputEvent::PointerButton {
            button: MouseButton::Left,
            state: ButtonState::Released,
            modifiers: Modifiers::default(),
        });
        assert_eq!(app.pointer, Some((3.0, 4.0)));
        assert_eq!(app.clicks, 1);

        app.on_input(&InputEvent::PointerLeft);
        assert_eq!(app.pointer, None);
    }
}
