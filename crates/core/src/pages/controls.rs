use crate::input::ControlType;
use crate::pages::{FrameContext, Page};
use crate::{Color, Surface};

pub const CONTROLS: &[ControlType] = &[ControlType::SwitchPage];

/// Control legend: lists the input controls of every registered page.
pub struct ControlsPage {
    entries: Vec<(&'static str, &'static [ControlType])>,
}

impl ControlsPage {
    pub fn new(entries: Vec<(&'static str, &'static [ControlType])>) -> Self {
        Self { entries }
    }
}

impl Page for ControlsPage {
    fn name(&self) -> &'static str {
        "CONTROLS"
    }

    fn controls(&self) -> &'static [ControlType] {
        CONTROLS
    }

    fn draw(&mut self, _ctx: &FrameContext, surface: &mut dyn Surface) {
        let mut y = 1;

        for (name, controls) in &self.entries {
            surface.print(0, y, Color::Label, name);
            y += 1;

            for control in controls.iter() {
                surface.print(
                    1,
                    y,
                    Color::Value,
                    &format!("{:<8} {}", control.button_label(), control.description()),
                );
                y += 1;
            }

            y += 1;
        }
    }
}
