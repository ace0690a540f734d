use crate::decode::{
    cause_description, format_float, fpcsr_description, thread_name, FloatFormat,
};
use crate::input::{Buttons, ControlType};
use crate::pages::{FrameContext, Page};
use crate::settings::{SettingDef, SettingsGroup, SettingsTable};
use crate::snapshot::{GPR_COUNT, GPR_NAMES};
use crate::symbols::SearchDirection;
use crate::{Color, Surface, SCREEN_COLUMNS};

pub const SETTING_HEADER: usize = 0;
pub const SETTING_PARSE_REGISTERS: usize = 1;
pub const SETTING_FLOATS_FORMAT: usize = 2;

const FLOAT_FORMAT_NAMES: &[&str] = &["hex", "decimal", "scientific"];

const SETTING_DEFS: [SettingDef; 3] = [
    SettingDef::header("CONTEXT", true),
    SettingDef::toggle("Parse register addr names", false),
    SettingDef::choice("Floats print format", FLOAT_FORMAT_NAMES, 1, 0, 2),
];

pub const CONTROLS: &[ControlType] = &[
    ControlType::SwitchPage,
    ControlType::PageDump,
    ControlType::CycleFloatsMode,
];

const COLUMN_WIDTH: u32 = 15;
const REGISTER_ROWS: u32 = 10;
const REGISTER_COLUMNS: u32 = 3;
const FLOAT_ROWS: u32 = 6;
const SYMBOL_CELL_CHARS: usize = 10;

/// The context page: decoded fault cause, crashed thread, and the full
/// fixed-point and floating-point register files.
#[derive(Debug, Default)]
pub struct ContextPage;

impl ContextPage {
    pub fn new() -> Self {
        Self
    }

    /// Print one register cell: " NAME:" then either the resolved symbol
    /// name (when register parsing is on) or the raw word.
    fn print_register(
        &self,
        ctx: &FrameContext,
        surface: &mut dyn Surface,
        x: u32,
        y: u32,
        name: &str,
        value: u32,
    ) {
        let chars = surface.print(x, y, Color::Label, &format!(" {}:", name));

        let symbol = if ctx
            .settings
            .get_bool(SettingsGroup::PageContext, SETTING_PARSE_REGISTERS)
        {
            ctx.symbols
                .and_then(|table| table.find(value, SearchDirection::Backward))
        } else {
            None
        };

        if let Some(symbol) = symbol {
            surface.print_symbol_name(x + chars as u32, y, SYMBOL_CELL_CHARS, symbol);
        } else {
            surface.print(x + chars as u32 + 1, y, Color::Value, &format!("{:08X}", value));
        }
    }

    /// PC/SR/VA row, then the named register grid. The spare cell at the
    /// bottom right shows the raw instruction word at the fault PC when
    /// that address is readable.
    fn draw_registers(&self, ctx: &FrameContext, surface: &mut dyn Surface, mut line: u32) -> u32 {
        let tc = ctx.snapshot;

        self.print_register(ctx, surface, 0, line, "PC", tc.pc);
        self.print_register(ctx, surface, COLUMN_WIDTH, line, "SR", tc.sr);
        self.print_register(ctx, surface, 2 * COLUMN_WIDTH, line, "VA", tc.badvaddr);
        line += 1;

        if let Some(word) = ctx.memory.try_read_word(tc.pc) {
            self.print_register(
                ctx,
                surface,
                (REGISTER_COLUMNS - 1) * COLUMN_WIDTH,
                line + (REGISTER_ROWS - 1),
                "MM",
                word,
            );
        }

        surface.write_barrier();

        let mut reg = 0usize;
        for y in 0..REGISTER_ROWS {
            for x in 0..REGISTER_COLUMNS {
                if reg >= GPR_COUNT {
                    return line + y;
                }

                self.print_register(
                    ctx,
                    surface,
                    x * COLUMN_WIDTH,
                    line + y,
                    GPR_NAMES[reg],
                    tc.gpr[reg],
                );

                reg += 1;
            }
        }

        line + REGISTER_ROWS
    }

    fn draw_fpcsr(&self, ctx: &FrameContext, surface: &mut dyn Surface, y: u32) {
        let fpcsr = ctx.snapshot.fpcsr;

        let mut x = surface.print(0, y, Color::Label, "FPCSR: ") as u32;
        x += surface.print(x, y, Color::Value, &format!("{:08X} ", fpcsr)) as u32;

        if let Some(desc) = fpcsr_description(fpcsr) {
            surface.print(x, y, Color::Description, &format!("({})", desc));
        }
    }

    /// FPCSR line, then the even-numbered float registers (the displayed
    /// double-precision pairs) in a 6x3 grid.
    fn draw_float_registers(&self, ctx: &FrameContext, surface: &mut dyn Surface, mut line: u32) {
        self.draw_fpcsr(ctx, surface, line);
        line += 1;

        surface.write_barrier();

        let format = FloatFormat::from_setting(
            ctx.settings
                .get(SettingsGroup::PageContext, SETTING_FLOATS_FORMAT),
        );

        let mut reg = 0usize;
        for y in 0..FLOAT_ROWS {
            for x in 0..REGISTER_COLUMNS {
                if reg > 30 {
                    return;
                }

                let chars = surface.print(
                    x * COLUMN_WIDTH,
                    line + y,
                    Color::Label,
                    &format!("F{:02}:", reg),
                );
                surface.print(
                    x * COLUMN_WIDTH + chars as u32,
                    line + y,
                    Color::Value,
                    &format_float(ctx.snapshot.fpr[reg], format),
                );

                reg += 2;
            }
        }
    }
}

impl Page for ContextPage {
    fn name(&self) -> &'static str {
        "CONTEXT"
    }

    fn controls(&self) -> &'static [ControlType] {
        CONTROLS
    }

    fn register_settings(&self, settings: &mut SettingsTable) {
        settings.register(SettingsGroup::PageContext, &SETTING_DEFS);
    }

    fn draw(&mut self, ctx: &FrameContext, surface: &mut dyn Surface) {
        let tc = ctx.snapshot;
        let mut line = 1;

        if let Some(desc) = cause_description(tc.cause) {
            surface.print(0, line, Color::Description, &format!("CAUSE: {}", desc));
        }
        line += 1;

        let chars = surface.print(
            0,
            line,
            Color::Thread,
            &format!("THREAD: {}", tc.thread_id),
        );
        if let Some(name) = thread_name(tc.thread_id) {
            surface.print(chars as u32 + 1, line, Color::Thread, &format!("({})", name));
        }
        line += 1;

        surface.write_barrier();

        if let Some(symbols) = ctx.symbols {
            let chars = surface.print(0, line, Color::Label, "FUNC: ") as u32;
            match symbols.find(tc.pc, SearchDirection::Backward) {
                Some(symbol) => {
                    surface.print_symbol_name(
                        chars,
                        line,
                        (SCREEN_COLUMNS - chars) as usize,
                        symbol,
                    );
                }
                None => {
                    surface.print(chars, line, Color::Value, &format!("{:08X}", tc.pc));
                }
            }
            line += 1;
        }

        line = self.draw_registers(ctx, surface, line);
        line += 1;

        surface.write_barrier();

        self.draw_float_registers(ctx, surface, line);
    }

    fn input(&mut self, ctx: &mut FrameContext) {
        if ctx.buttons.contains(Buttons::B) {
            ctx.settings
                .increment(SettingsGroup::PageContext, SETTING_FLOATS_FORMAT, 1);
        }
    }

    fn print(&mut self, ctx: &FrameContext) {
        let tc = ctx.snapshot;

        if let Some(symbol) = ctx
            .symbols
            .and_then(|table| table.find(tc.pc, SearchDirection::Backward))
        {
            tracing::info!("crashed in {} (pc={:#010x})", symbol.name, tc.pc);
        }

        tracing::info!(
            "thread {} cause {:#010x} ({}) badvaddr {:#010x}",
            tc.thread_id,
            tc.cause,
            cause_description(tc.cause).unwrap_or("unknown"),
            tc.badvaddr,
        );
    }
}
