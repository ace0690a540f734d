use bitflags::bitflags;

bitflags! {
    /// One frame's worth of freshly pressed buttons.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Buttons: u16 {
        const A       = 1 << 0;
        const B       = 1 << 1;
        const Z       = 1 << 2;
        const START   = 1 << 3;
        const L       = 1 << 4;
        const R       = 1 << 5;
        const D_UP    = 1 << 6;
        const D_DOWN  = 1 << 7;
        const D_LEFT  = 1 << 8;
        const D_RIGHT = 1 << 9;
    }
}

impl Buttons {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "a" => Some(Buttons::A),
            "b" => Some(Buttons::B),
            "z" => Some(Buttons::Z),
            "start" => Some(Buttons::START),
            "l" => Some(Buttons::L),
            "r" => Some(Buttons::R),
            "up" => Some(Buttons::D_UP),
            "down" => Some(Buttons::D_DOWN),
            "left" => Some(Buttons::D_LEFT),
            "right" => Some(Buttons::D_RIGHT),
            _ => None,
        }
    }
}

/// Input controls a page advertises for the controls legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlType {
    SwitchPage,
    PageDump,
    CycleFloatsMode,
    ScrollList,
}

impl ControlType {
    pub fn button_label(self) -> &'static str {
        match self {
            ControlType::SwitchPage => "L/R",
            ControlType::PageDump => "Z",
            ControlType::CycleFloatsMode => "B",
            ControlType::ScrollList => "UP/DOWN",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ControlType::SwitchPage => "switch page",
            ControlType::PageDump => "dump page to debug channel",
            ControlType::CycleFloatsMode => "cycle floats print format",
            ControlType::ScrollList => "scroll",
        }
    }
}
