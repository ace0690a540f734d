pub mod context;
pub mod controls;
pub mod stack;

use crate::input::{Buttons, ControlType};
use crate::memory::MemoryMap;
use crate::settings::SettingsTable;
use crate::snapshot::ExceptionSnapshot;
use crate::symbols::SymbolTable;
use crate::{Color, Surface};
use bitflags::bitflags;

/// Read-only crash state shared by every page.
pub struct CrashResources<'a> {
    pub snapshot: &'a ExceptionSnapshot,
    pub memory: &'a MemoryMap,
    pub symbols: Option<&'a SymbolTable>,
}

/// Everything a page hook may consult during one display frame.
pub struct FrameContext<'a> {
    pub snapshot: &'a ExceptionSnapshot,
    pub memory: &'a MemoryMap,
    pub symbols: Option<&'a SymbolTable>,
    pub settings: &'a mut SettingsTable,
    pub buttons: Buttons,
}

/// One self-contained diagnostic screen.
///
/// Pages are registered once and never torn down: switching away keeps any
/// page-local state for the next activation. The heap may be unreliable
/// when the display is up, so pages allocate what they need at registration
/// and reuse it.
pub trait Page {
    fn name(&self) -> &'static str;

    fn controls(&self) -> &'static [ControlType];

    /// Install this page's settings group. Called once at registration.
    fn register_settings(&self, _settings: &mut SettingsTable) {}

    /// Runs once, on the first draw after the page is selected.
    fn init(&mut self, _ctx: &mut FrameContext) {}

    fn draw(&mut self, ctx: &FrameContext, surface: &mut dyn Surface);

    /// Polled every frame while the page is selected, before draw.
    fn input(&mut self, _ctx: &mut FrameContext) {}

    /// Out-of-band text dump through the debug channel, independent of the
    /// visual draw.
    fn print(&mut self, _ctx: &FrameContext) {}
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PageFlags: u8 {
        const INITIALIZED = 1 << 0;
        /// Only offered by navigation when the display represents a true
        /// program crash (as opposed to a debug-triggered pseudo-crash).
        const CRASHED     = 1 << 1;
        const PRINT_NAME  = 1 << 2;
    }
}

struct PageEntry {
    page: Box<dyn Page>,
    flags: PageFlags,
}

/// Registry and frame dispatcher for the crash display.
///
/// Runs on a dedicated thread after the fault; the snapshot is captured
/// before that thread starts, so no locking is needed anywhere here.
pub struct CrashDisplay {
    pages: Vec<PageEntry>,
    current: usize,
    settings: SettingsTable,
    real_crash: bool,
    debug_channel: bool,
}

impl CrashDisplay {
    pub fn new(real_crash: bool) -> Self {
        Self {
            pages: Vec::new(),
            current: 0,
            settings: SettingsTable::new(),
            real_crash,
            debug_channel: cfg!(debug_assertions),
        }
    }

    pub fn set_debug_channel(&mut self, enabled: bool) {
        self.debug_channel = enabled;
    }

    pub fn register(&mut self, page: Box<dyn Page>, flags: PageFlags) {
        page.register_settings(&mut self.settings);
        self.pages.push(PageEntry { page, flags });
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_page_name(&self) -> Option<&'static str> {
        self.pages.get(self.current).map(|e| e.page.name())
    }

    pub fn settings(&self) -> &SettingsTable {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SettingsTable {
        &mut self.settings
    }

    fn viewable(&self, index: usize) -> bool {
        self.real_crash || !self.pages[index].flags.contains(PageFlags::CRASHED)
    }

    fn select_offset(&mut self, dir: isize) {
        let count = self.pages.len() as isize;
        let mut next = self.current;
        for _ in 0..count {
            next = (next as isize + dir).rem_euclid(count) as usize;
            if self.viewable(next) {
                self.current = next;
                return;
            }
        }
    }

    /// Poll navigation and the active page's input. Runs every frame,
    /// whether or not the frame ends up drawn.
    pub fn update(&mut self, res: &CrashResources, buttons: Buttons) {
        if self.pages.is_empty() {
            return;
        }

        if buttons.contains(Buttons::R) {
            self.select_offset(1);
        }
        if buttons.contains(Buttons::L) {
            self.select_offset(-1);
        }

        let debug_channel = self.debug_channel;
        let entry = &mut self.pages[self.current];
        let mut ctx = FrameContext {
            snapshot: res.snapshot,
            memory: res.memory,
            symbols: res.symbols,
            settings: &mut self.settings,
            buttons,
        };

        entry.page.input(&mut ctx);

        if debug_channel && buttons.contains(Buttons::Z) {
            entry.page.print(&ctx);
        }
    }

    /// Dispatch the draw to the active page, running its init hook on the
    /// first draw after selection. A faulting page draw is not guarded:
    /// there is no layer left to escalate to.
    pub fn draw(&mut self, res: &CrashResources, surface: &mut dyn Surface) {
        if self.pages.is_empty() {
            return;
        }

        let entry = &mut self.pages[self.current];
        let mut ctx = FrameContext {
            snapshot: res.snapshot,
            memory: res.memory,
            symbols: res.symbols,
            settings: &mut self.settings,
            buttons: Buttons::empty(),
        };

        if !entry.flags.contains(PageFlags::INITIALIZED) {
            entry.page.init(&mut ctx);
            entry.flags |= PageFlags::INITIALIZED;
        }

        if entry.flags.contains(PageFlags::PRINT_NAME) {
            surface.print(0, 0, Color::Label, entry.page.name());
        }

        entry.page.draw(&ctx, surface);
    }

    pub fn frame(&mut self, res: &CrashResources, buttons: Buttons, surface: &mut dyn Surface) {
        self.update(res, buttons);
        self.draw(res, surface);
    }
}
