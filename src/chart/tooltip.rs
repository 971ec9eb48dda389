use eframe::egui::{self, Color32, Pos2, RichText};

// ---------------------------------------------------------------------------
// Tooltip state machine: Hidden ⇄ Visible with fixed fade durations
// ---------------------------------------------------------------------------

/// Seconds to fade in after pointer-enter.
pub const FADE_IN_SECS: f32 = 0.2;
/// Seconds to fade out after pointer-leave.
pub const FADE_OUT_SECS: f32 = 0.5;
/// Fully-visible opacity.
const MAX_OPACITY: f32 = 0.9;
/// Pointer offset of the panel's top-left corner.
const POINTER_OFFSET: egui::Vec2 = egui::vec2(28.0, 0.0);

/// What the floating panel displays for the hovered record.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub title: String,
    pub lines: Vec<String>,
}

/// One floating info panel per chart. Pointer-enter makes it visible with
/// the hovered record's content; pointer-leave fades it back out.
#[derive(Default)]
pub struct Tooltip {
    content: Option<TooltipContent>,
    position: Pos2,
    opacity: f32,
    target: f32,
}

impl Tooltip {
    /// Pointer entered a shape: take the record's content and start fading
    /// in. Repeated calls while hovering just refresh content and position.
    pub fn point_enter(&mut self, content: TooltipContent, position: Pos2) {
        self.content = Some(content);
        self.position = position;
        self.target = MAX_OPACITY;
    }

    /// Pointer left the shape: start fading out.
    pub fn point_leave(&mut self) {
        self.target = 0.0;
    }

    /// Advance the fade by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if self.opacity < self.target {
            self.opacity = (self.opacity + dt * MAX_OPACITY / FADE_IN_SECS).min(self.target);
        } else if self.opacity > self.target {
            self.opacity = (self.opacity - dt * MAX_OPACITY / FADE_OUT_SECS).max(self.target);
        }
        if self.opacity <= 0.0 && self.target <= 0.0 {
            self.content = None;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 && self.content.is_some()
    }

    /// Whether a fade is still in progress (the caller should keep
    /// repainting).
    pub fn animating(&self) -> bool {
        (self.opacity - self.target).abs() > f32::EPSILON
    }

    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }

    /// Draw the panel right of its recorded pointer position.
    pub fn show(&self, ctx: &egui::Context, id: &str) {
        if !self.is_visible() {
            return;
        }
        let Some(content) = &self.content else { return };

        egui::Area::new(egui::Id::new(id))
            .fixed_pos(self.position + POINTER_OFFSET)
            .order(egui::Order::Tooltip)
            .interactable(false)
            .show(ctx, |ui| {
                ui.set_opacity(self.opacity);
                egui::Frame::popup(&ctx.style())
                    .fill(Color32::from_rgb(16, 16, 16))
                    .show(ui, |ui| {
                        ui.label(RichText::new(&content.title).strong().color(Color32::WHITE));
                        for line in &content.lines {
                            ui.label(RichText::new(line).color(Color32::WHITE));
                        }
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(title: &str) -> TooltipContent {
        TooltipContent {
            title: title.to_string(),
            lines: vec!["line".to_string()],
        }
    }

    #[test]
    fn enter_shows_the_hovered_record() {
        let mut tip = Tooltip::default();
        assert!(!tip.is_visible());

        tip.point_enter(content("China"), Pos2::new(10.0, 20.0));
        tip.tick(FADE_IN_SECS);
        assert!(tip.is_visible());
        assert!(!tip.animating());
        assert_eq!(tip.content().unwrap().title, "China");
    }

    #[test]
    fn leave_hides_within_the_fade_duration() {
        let mut tip = Tooltip::default();
        tip.point_enter(content("China"), Pos2::ZERO);
        tip.tick(FADE_IN_SECS);

        tip.point_leave();
        // Mid-fade the panel is still (partially) visible.
        tip.tick(FADE_OUT_SECS / 2.0);
        assert!(tip.is_visible());
        tip.tick(FADE_OUT_SECS / 2.0);
        assert!(!tip.is_visible());
        assert!(tip.content().is_none());
    }

    #[test]
    fn reenter_replaces_content_without_restarting_from_zero() {
        let mut tip = Tooltip::default();
        tip.point_enter(content("China"), Pos2::ZERO);
        tip.tick(FADE_IN_SECS);

        tip.point_enter(content("Japan"), Pos2::new(5.0, 5.0));
        assert_eq!(tip.content().unwrap().title, "Japan");
        assert!(tip.is_visible());
    }
}
