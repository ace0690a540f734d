/// Whether an entry is a collapsible section header or a real value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Header,
    Value,
}

pub const BOOL_VALUE_NAMES: &[&str] = &["false", "true"];

/// Static definition of one setting. Pages declare these as const tables and
/// register them once; runtime state is just the current value.
#[derive(Debug, Clone, Copy)]
pub struct SettingDef {
    pub kind: SettingKind,
    pub name: &'static str,
    pub value_names: &'static [&'static str],
    pub default: u32,
    pub lower: u32,
    pub upper: u32,
}

impl SettingDef {
    pub const fn header(name: &'static str, expanded: bool) -> Self {
        Self {
            kind: SettingKind::Header,
            name,
            value_names: BOOL_VALUE_NAMES,
            default: expanded as u32,
            lower: 0,
            upper: 1,
        }
    }

    pub const fn toggle(name: &'static str, default: bool) -> Self {
        Self {
            kind: SettingKind::Value,
            name,
            value_names: BOOL_VALUE_NAMES,
            default: default as u32,
            lower: 0,
            upper: 1,
        }
    }

    pub const fn choice(
        name: &'static str,
        value_names: &'static [&'static str],
        default: u32,
        lower: u32,
        upper: u32,
    ) -> Self {
        Self {
            kind: SettingKind::Value,
            name,
            value_names,
            default,
            lower,
            upper,
        }
    }
}

#[derive(Debug)]
struct SettingSlot {
    def: SettingDef,
    val: u32,
}

/// Addressing scheme for settings: one group per page plus the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsGroup {
    Display,
    PageContext,
    PageStack,
}

pub const SETTINGS_GROUP_COUNT: usize = 3;

impl SettingsGroup {
    fn index(self) -> usize {
        match self {
            SettingsGroup::Display => 0,
            SettingsGroup::PageContext => 1,
            SettingsGroup::PageStack => 2,
        }
    }
}

/// Process-wide settings table for the crash display's lifetime. Values are
/// clamped into [lower, upper] by construction; cycling wraps.
#[derive(Debug, Default)]
pub struct SettingsTable {
    groups: [Vec<SettingSlot>; SETTINGS_GROUP_COUNT],
}

impl SettingsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a group's definitions with their default values. Replaces any
    /// previous registration of the same group.
    pub fn register(&mut self, group: SettingsGroup, defs: &'static [SettingDef]) {
        self.groups[group.index()] = defs
            .iter()
            .map(|def| SettingSlot {
                def: *def,
                val: def.default,
            })
            .collect();
    }

    pub fn get(&self, group: SettingsGroup, key: usize) -> u32 {
        self.groups[group.index()].get(key).map_or(0, |s| s.val)
    }

    pub fn get_bool(&self, group: SettingsGroup, key: usize) -> bool {
        self.get(group, key) != 0
    }

    pub fn def(&self, group: SettingsGroup, key: usize) -> Option<&SettingDef> {
        self.groups[group.index()].get(key).map(|s| &s.def)
    }

    pub fn group_len(&self, group: SettingsGroup) -> usize {
        self.groups[group.index()].len()
    }

    /// Step a value by `step` (sign gives the direction), wrapping inside
    /// the inclusive bounds. Returns the new value.
    pub fn increment(&mut self, group: SettingsGroup, key: usize, step: i32) -> u32 {
        let Some(slot) = self.groups[group.index()].get_mut(key) else {
            return 0;
        };
        let range = (slot.def.upper - slot.def.lower + 1) as i64;
        let offset = (slot.val - slot.def.lower) as i64 + step as i64;
        slot.val = slot.def.lower + offset.rem_euclid(range) as u32;
        slot.val
    }

    pub fn reset_group(&mut self, group: SettingsGroup) {
        for slot in &mut self.groups[group.index()] {
            slot.val = slot.def.default;
        }
    }
}
