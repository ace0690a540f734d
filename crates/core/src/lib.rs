pub mod decode;
pub mod input;
pub mod memory;
pub mod pages;
pub mod settings;
pub mod snapshot;
pub mod symbols;


use crate::symbols::SymbolEntry;

/// Character-cell dimensions of the crash display.
pub const SCREEN_COLUMNS: u32 = 45;
pub const SCREEN_ROWS: u32 = 30;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Region '{name}' overlaps an existing region at {base:#010x}")]
    RegionOverlap { name: String, base: u32 },
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Semantic text colors; surfaces map these to whatever they can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Default,
    Label,
    Value,
    Description,
    Thread,
    Function,
}

/// Trait for the text output primitive behind the crash display.
///
/// The display only ever asks to put a string at a character cell; how that
/// becomes pixels (or terminal rows) is the implementor's business.
pub trait Surface {
    /// Print `text` starting at character cell (x, y). Returns the number of
    /// characters written.
    fn print(&mut self, x: u32, y: u32, color: Color, text: &str) -> usize;

    /// Print a symbol name truncated to `max_chars`.
    fn print_symbol_name(
        &mut self,
        x: u32,
        y: u32,
        max_chars: usize,
        symbol: &SymbolEntry,
    ) -> usize {
        let name: String = symbol.name.chars().take(max_chars).collect();
        self.print(x, y, Color::Function, &name)
    }

    /// Barrier between the register-reading and printing phases. Surfaces
    /// backed by write-back caches flush here; others need nothing.
    fn write_barrier(&mut self) {}
}
