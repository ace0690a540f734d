use clap::Parser;
use faultview_core::input::Buttons;
use faultview_core::memory::MemoryMap;
use faultview_core::pages::context::{self, ContextPage};
use faultview_core::pages::controls::{self, ControlsPage};
use faultview_core::pages::stack::{self, StackPage};
use faultview_core::pages::{CrashDisplay, CrashResources, PageFlags};
use faultview_core::{Color, Surface, SCREEN_COLUMNS, SCREEN_ROWS};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Faultview crash display", long_about = None)]
struct Args {
    /// Path to a captured exception snapshot (JSON)
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Path to the crashed program's ELF (memory contents + symbols)
    #[arg(short, long)]
    elf: Option<PathBuf>,

    /// Path to a memory layout descriptor (YAML)
    #[arg(short, long)]
    layout: Option<PathBuf>,

    /// Scripted input: one comma-separated button name per frame (e.g. "r,b")
    #[arg(short, long)]
    input: Option<String>,

    /// Number of display frames to render
    #[arg(long, default_value = "1")]
    frames: usize,

    /// Enable debug-level tracing and the out-of-band page dump channel
    #[arg(short, long)]
    trace: bool,
}

/// Character-grid surface rendered to stdout. Colors are advisory here;
/// a plain terminal draws everything the same.
struct TerminalSurface {
    cells: Vec<Vec<char>>,
}

impl TerminalSurface {
    fn new() -> Self {
        Self {
            cells: vec![vec![' '; SCREEN_COLUMNS as usize]; SCREEN_ROWS as usize],
        }
    }

    fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(' ');
        }
    }

    fn flush(&self) {
        let border = "-".repeat(SCREEN_COLUMNS as usize);
        let mut out = String::new();

        out.push_str(&format!("+{}+\n", border));
        for row in &self.cells {
            let line: String = row.iter().collect();
            out.push_str(&format!("|{}|\n", line));
        }
        out.push_str(&format!("+{}+\n", border));

        print!("{}", out);
    }
}

impl Surface for TerminalSurface {
    fn print(&mut self, x: u32, y: u32, _color: Color, text: &str) -> usize {
        let Some(row) = self.cells.get_mut(y as usize) else {
            return 0;
        };

        let mut written = 0;
        for (i, ch) in text.chars().enumerate() {
            let Some(cell) = row.get_mut(x as usize + i) else {
                break;
            };
            *cell = ch;
            written += 1;
        }
        written
    }
}

fn parse_input_script(script: &str) -> anyhow::Result<Vec<Buttons>> {
    let mut frames = Vec::new();

    for token in script.split(',') {
        let token = token.trim();
        if token.is_empty() {
            frames.push(Buttons::empty());
            continue;
        }
        let button = Buttons::from_name(token)
            .ok_or_else(|| anyhow::anyhow!("Unknown button name '{}'", token))?;
        frames.push(button);
    }

    Ok(frames)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.trace {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    info!("Starting Faultview crash display");

    let mut memory = if let Some(layout_path) = &args.layout {
        info!("Loading memory layout: {:?}", layout_path);
        let layout = faultview_config::MemoryLayout::from_file(layout_path)?;
        MemoryMap::from_layout(&layout)?
    } else {
        info!("Using default memory layout");
        MemoryMap::with_default_regions()
    };

    let mut symbols = None;
    if let Some(elf_path) = &args.elf {
        info!("Loading program image: {:?}", elf_path);
        for segment in faultview_loader::load_segments(elf_path)? {
            if !memory.load_segment(&segment) {
                warn!(
                    "Segment at {:#x} is outside the memory map",
                    segment.start_addr
                );
            }
        }
        symbols = Some(faultview_loader::load_symbols(elf_path)?);
    }

    info!("Loading snapshot: {:?}", args.snapshot);
    let snapshot = faultview_loader::load_snapshot(&args.snapshot)?;
    info!("Crashed thread: {}", snapshot.thread_id);

    let mut display = CrashDisplay::new(true);
    if args.trace {
        display.set_debug_channel(true);
    }

    display.register(Box::new(ContextPage::new()), PageFlags::PRINT_NAME);
    display.register(Box::new(StackPage::new()), PageFlags::PRINT_NAME);
    display.register(
        Box::new(ControlsPage::new(vec![
            ("CONTEXT", context::CONTROLS),
            ("STACK", stack::CONTROLS),
            ("CONTROLS", controls::CONTROLS),
        ])),
        PageFlags::PRINT_NAME,
    );

    let script = parse_input_script(args.input.as_deref().unwrap_or(""))?;

    let res = CrashResources {
        snapshot: &snapshot,
        memory: &memory,
        symbols: symbols.as_ref(),
    };

    let mut surface = TerminalSurface::new();
    for frame in 0..args.frames {
        let buttons = script.get(frame).copied().unwrap_or_default();
        display.update(&res, buttons);
        surface.clear();
        display.draw(&res, &mut surface);
        surface.flush();
    }

    Ok(())
}
