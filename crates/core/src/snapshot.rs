use serde::{Deserialize, Serialize};

pub const GPR_COUNT: usize = 29;
pub const FPR_COUNT: usize = 32;

/// Fixed display order of the general-purpose register file.
pub const GPR_NAMES: [&str; GPR_COUNT] = [
    "AT", "V0", "V1", "A0", "A1", "A2", "A3", "T0", "T1", "T2", "T3", "T4", "T5", "T6", "T7",
    "S0", "S1", "S2", "S3", "S4", "S5", "S6", "S7", "T8", "T9", "GP", "SP", "S8", "RA",
];

pub const REG_SP: usize = 26;

/// CPU/FPU state captured once at the moment of the fault.
///
/// Owned by the crash subsystem for the display's lifetime; the inspector
/// only ever reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExceptionSnapshot {
    pub thread_id: u32,
    pub pc: u32,
    pub sr: u32,
    pub badvaddr: u32,
    pub cause: u32,
    pub fpcsr: u32,
    pub gpr: [u32; GPR_COUNT],
    pub fpr: [u32; FPR_COUNT],
}

impl ExceptionSnapshot {
    pub fn sp(&self) -> u32 {
        self.gpr[REG_SP]
    }
}
