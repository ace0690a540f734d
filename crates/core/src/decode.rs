use bitflags::bitflags;

/// Exception cause descriptions, indexed by remapped 5-bit cause code.
const CAUSE_DESCRIPTIONS: [&str; 18] = [
    "Interrupt",
    "TLB modification",
    "TLB exception on load or inst.",
    "TLB exception on store",
    "Address error on load or inst.",
    "Address error on store",
    "Bus error on inst.",
    "Bus error on data",
    "Failed assert (syscall)",
    "Breakpoint exception",
    "Reserved instruction",
    "Coprocessor unusable",
    "Arithmetic overflow",
    "Trap exception",
    "Virtual coherency on inst.",
    "Floating point exception",
    "Watchpoint exception",
    "Virtual coherency on data",
];

const CAUSE_CODE_SHIFT: u32 = 2;
const CAUSE_CODE_MASK: u32 = 0x1F;

const EXC_CODE_WATCH: u32 = 23;
const EXC_CODE_VCED: u32 = 31;

/// 5-bit exception code field of the cause register.
pub fn cause_code(cause: u32) -> u32 {
    (cause >> CAUSE_CODE_SHIFT) & CAUSE_CODE_MASK
}

/// Codes 23 and 31 are stored at indices 16 and 17 to keep the description
/// table contiguous. Reserved codes have no description.
pub fn cause_description(cause: u32) -> Option<&'static str> {
    let index = match cause_code(cause) {
        EXC_CODE_WATCH => 16,
        EXC_CODE_VCED => 17,
        code if code <= 15 => code as usize,
        _ => return None,
    };
    Some(CAUSE_DESCRIPTIONS[index])
}

bitflags! {
    /// Sticky exception cause bits of the floating-point control/status word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FpcsrCause: u32 {
        const UNIMPLEMENTED = 1 << 17;
        const INVALID       = 1 << 16;
        const DIV_ZERO      = 1 << 15;
        const OVERFLOW      = 1 << 14;
        const UNDERFLOW     = 1 << 13;
        const INEXACT       = 1 << 12;
    }
}

const FPCSR_DESCRIPTIONS: [(FpcsrCause, &str); 6] = [
    (FpcsrCause::UNIMPLEMENTED, "Unimplemented operation"),
    (FpcsrCause::INVALID, "Invalid operation"),
    (FpcsrCause::DIV_ZERO, "Division by zero"),
    (FpcsrCause::OVERFLOW, "Overflow"),
    (FpcsrCause::UNDERFLOW, "Underflow"),
    (FpcsrCause::INEXACT, "Inexact operation"),
];

/// Scans from bit 17 down; only the highest set cause bit is reported.
pub fn fpcsr_description(fpcsr: u32) -> Option<&'static str> {
    let cause = FpcsrCause::from_bits_truncate(fpcsr);
    FPCSR_DESCRIPTIONS
        .iter()
        .find(|(flag, _)| cause.contains(*flag))
        .map(|(_, desc)| *desc)
}

/// System threads 0-9 plus the three crash-screen threads.
const THREAD_NAMES: [(u32, &str); 13] = [
    (0, "0"),
    (1, "idle"),
    (2, "2"),
    (3, "main"),
    (4, "sound"),
    (5, "game loop"),
    (6, "rumble"),
    (7, "HVQM"),
    (8, "timekeeper"),
    (9, "DA counter"),
    (1000, "Crash Screen 0"),
    (1001, "Crash Screen 1"),
    (1002, "Crash Screen 2"),
];

pub fn thread_name(thread_id: u32) -> Option<&'static str> {
    THREAD_NAMES
        .iter()
        .find(|(id, _)| *id == thread_id)
        .map(|(_, name)| *name)
}

/// A single-precision register word sorted by how it must be displayed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FloatValue {
    Denormalized(u32),
    Nan(u32),
    Value(f32),
}

pub fn classify_float(bits: u32) -> FloatValue {
    let exponent = (bits >> 23) & 0xFF;
    let mantissa = bits & 0x7F_FFFF;

    if mantissa != 0 {
        if exponent == 0x00 {
            return FloatValue::Denormalized(bits);
        }
        if exponent == 0xFF {
            return FloatValue::Nan(bits);
        }
    }

    FloatValue::Value(f32::from_bits(bits))
}

/// User-selectable numeric format for well-formed floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloatFormat {
    Hex,
    #[default]
    Decimal,
    Scientific,
}

impl FloatFormat {
    pub fn from_setting(val: u32) -> Self {
        match val {
            0 => FloatFormat::Hex,
            2 => FloatFormat::Scientific,
            _ => FloatFormat::Decimal,
        }
    }
}

/// Denormalized and NaN patterns always render as prefixed raw hex; the
/// user format only applies to ordinary values.
pub fn format_float(bits: u32, format: FloatFormat) -> String {
    match classify_float(bits) {
        FloatValue::Denormalized(raw) => format!("D{:08X}", raw),
        FloatValue::Nan(raw) => format!("N{:08X}", raw),
        FloatValue::Value(val) => match format {
            FloatFormat::Hex => format!(" {:08X}", bits),
            FloatFormat::Decimal => format!("{}", val),
            FloatFormat::Scientific => format!("{:.3e}", val),
        },
    }
}
