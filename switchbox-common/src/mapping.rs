use alloc::{collections::BTreeMap, string::String, vec::Vec};

use crate::event::EventGroup;

/// Which grammar the mapping file was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MappingMode {
    /// `page-N "label"` / `switch-N "label" events...`; the control switch turns pages.
    Paged,
    /// `N events... ; label`; each switch cycles its shortcuts and the control switch runs the
    /// selected one.
    Cycling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub label: String,
    groups: Vec<EventGroup>,
}
impl Shortcut {
    pub fn new(label: String, groups: Vec<EventGroup>) -> Option<Self> {
        if groups.is_empty() {
            None
        } else {
            Some(Self { label, groups })
        }
    }

    pub fn groups(&self) -> &[EventGroup] {
        &self.groups
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Switch {
    pub number: usize,
    pub label: String,
    /// 1-based line of the mapping file that first defined this switch.
    pub line: usize,
    shortcuts: Vec<Shortcut>,
}
impl Switch {
    pub fn new(number: usize, label: String, line: usize, first: Shortcut) -> Self {
        Self {
            number,
            label,
            line,
            shortcuts: alloc::vec![first],
        }
    }

    /// Shortcuts in cycle order (file order).
    pub fn shortcuts(&self) -> &[Shortcut] {
        &self.shortcuts
    }

    pub fn shortcut(&self, index: usize) -> Option<&Shortcut> {
        self.shortcuts.get(index)
    }

    pub(crate) fn push(&mut self, shortcut: Shortcut) {
        self.shortcuts.push(shortcut);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub label: String,
    switches: BTreeMap<usize, Switch>,
}
impl Page {
    pub fn new(number: u32, label: String) -> Self {
        Self {
            number,
            label,
            switches: BTreeMap::new(),
        }
    }

    pub fn switch(&self, number: usize) -> Option<&Switch> {
        self.switches.get(&number)
    }

    /// Switches ordered by switch number.
    pub fn switches(&self) -> impl Iterator<Item = &Switch> {
        self.switches.values()
    }

    pub fn switch_count(&self) -> usize {
        self.switches.len()
    }

    pub(crate) fn switch_mut(&mut self, number: usize) -> Option<&mut Switch> {
        self.switches.get_mut(&number)
    }

    pub(crate) fn insert(&mut self, switch: Switch) -> Option<Switch> {
        self.switches.insert(switch.number, switch)
    }
}

/// The compiled mapping file. Built once at startup and read-only from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingSet {
    mode: MappingMode,
    pages: Vec<Page>,
}
impl MappingSet {
    /// Pages are put in page number order.
    pub fn new(mode: MappingMode, mut pages: Vec<Page>) -> Self {
        pages.sort_by_key(|p| p.number);
        Self { mode, pages }
    }

    pub fn mode(&self) -> MappingMode {
        self.mode
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(|p| p.switch_count() == 0)
    }

    /// Find the first switch using `number`, which is reserved for the control switch.
    pub fn reserved_conflict(&self, number: usize) -> Option<(&Page, &Switch)> {
        self.pages
            .iter()
            .find_map(|p| p.switch(number).map(|s| (p, s)))
    }
}
