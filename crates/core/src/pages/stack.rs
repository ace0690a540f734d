use crate::input::{Buttons, ControlType};
use crate::pages::{FrameContext, Page};
use crate::settings::{SettingDef, SettingsGroup, SettingsTable};
use crate::symbols::SearchDirection;
use crate::{Color, Surface};

pub const SETTING_HEADER: usize = 0;
pub const SETTING_PARSE_ADDRESSES: usize = 1;

const SETTING_DEFS: [SettingDef; 2] = [
    SettingDef::header("STACK", true),
    SettingDef::toggle("Parse word addr names", true),
];

pub const CONTROLS: &[ControlType] = &[
    ControlType::SwitchPage,
    ControlType::PageDump,
    ControlType::ScrollList,
];

const WORDS_PER_SCREEN: u32 = 20;
const SYMBOL_CHARS: usize = 20;

/// Word-by-word dump upward from the crashed thread's stack pointer, with
/// optional symbol annotation of word values. The scroll position survives
/// page switches.
#[derive(Debug, Default)]
pub struct StackPage {
    scroll: u32,
}

impl StackPage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Page for StackPage {
    fn name(&self) -> &'static str {
        "STACK"
    }

    fn controls(&self) -> &'static [ControlType] {
        CONTROLS
    }

    fn register_settings(&self, settings: &mut SettingsTable) {
        settings.register(SettingsGroup::PageStack, &SETTING_DEFS);
    }

    fn draw(&mut self, ctx: &FrameContext, surface: &mut dyn Surface) {
        let sp = ctx.snapshot.sp();
        let parse = ctx
            .settings
            .get_bool(SettingsGroup::PageStack, SETTING_PARSE_ADDRESSES);

        surface.print(0, 1, Color::Label, &format!("SP: {:08X}", sp));

        surface.write_barrier();

        for row in 0..WORDS_PER_SCREEN {
            let y = 2 + row;
            let addr = sp.wrapping_add((self.scroll + row) * 4);
            let chars = surface.print(0, y, Color::Label, &format!("{:08X}:", addr)) as u32;

            match ctx.memory.try_read_word(addr) {
                Some(word) => {
                    let x = chars + 1;
                    let width = surface.print(x, y, Color::Value, &format!("{:08X}", word)) as u32;

                    if parse {
                        if let Some(symbol) = ctx
                            .symbols
                            .and_then(|table| table.find(word, SearchDirection::Backward))
                        {
                            surface.print_symbol_name(x + width + 1, y, SYMBOL_CHARS, symbol);
                        }
                    }
                }
                None => {
                    surface.print(chars + 1, y, Color::Value, "????????");
                }
            }
        }
    }

    fn input(&mut self, ctx: &mut FrameContext) {
        if ctx.buttons.contains(Buttons::D_DOWN) {
            self.scroll += 1;
        }
        if ctx.buttons.contains(Buttons::D_UP) {
            self.scroll = self.scroll.saturating_sub(1);
        }
    }

    fn print(&mut self, ctx: &FrameContext) {
        tracing::info!(
            "stack dump from {:#010x} (scroll {})",
            ctx.snapshot.sp(),
            self.scroll
        );
    }
}
