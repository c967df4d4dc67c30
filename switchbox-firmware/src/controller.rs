use alloc::{collections::BTreeMap, format};

use embassy_time::{Duration, Timer};
use switchbox_common::{
    ConfigError, ErrorKind, MappingCompiler, MappingMode, MappingSet, Shortcut,
};

use crate::{
    display::{self, TextDisplay},
    error,
    executor::EventExecutor,
    hid::HidSink,
    info,
    switch_scanner::{SwitchInputs, SwitchScanner},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Turns pages in paged mappings; runs the selected shortcut in cycling ones.
    pub control_switch: usize,
    /// How long a switch must stay down before a press counts.
    pub settle: Duration,
    /// Sampling period while waiting for a switch to come back up.
    pub release_poll: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            control_switch: 0,
            settle: Duration::from_millis(100),
            release_poll: Duration::from_millis(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerState {
    Running,
    /// The mapping could not be used; only a reset gets out of here.
    Halted(ConfigError),
}

/// Turns confirmed switch presses into page changes, selections and HID events.
pub struct SwitchController<I: SwitchInputs, D: TextDisplay, H: HidSink> {
    config: ControllerConfig,
    scanner: SwitchScanner<I>,
    display: D,
    executor: EventExecutor<H>,
    mappings: Option<MappingSet>,
    state: ControllerState,
    page_index: usize,
    selected: Option<usize>,
    /// Cycle position of each mapped switch, cycling mode only.
    cycle: BTreeMap<usize, usize>,
}

impl<I: SwitchInputs, D: TextDisplay, H: HidSink> SwitchController<I, D, H> {
    /// Compile `source` with the control switch reserved and get ready to scan. Any mapping error
    /// is shown on `display` and leaves the controller halted.
    pub async fn start(
        source: &str,
        config: ControllerConfig,
        inputs: I,
        display: D,
        hid: H,
    ) -> Self {
        let compiled = MappingCompiler::default()
            .with_reserved_switch(config.control_switch)
            .compile(source);
        Self::with_mappings(compiled, config, inputs, display, hid).await
    }

    pub async fn with_mappings(
        mappings: Result<MappingSet, ConfigError>,
        config: ControllerConfig,
        inputs: I,
        display: D,
        hid: H,
    ) -> Self {
        let mut me = Self {
            scanner: SwitchScanner::new(inputs, config.settle, config.release_poll),
            config,
            display,
            executor: EventExecutor::new(hid),
            mappings: None,
            state: ControllerState::Running,
            page_index: 0,
            selected: None,
            cycle: BTreeMap::new(),
        };
        match mappings.and_then(|set| me.validate(set)) {
            Ok(set) => me.install(set).await,
            Err(err) => me.halt(err).await,
        }
        me
    }

    fn validate(&self, set: MappingSet) -> Result<MappingSet, ConfigError> {
        if set.is_empty() {
            return Err(ConfigError::new(
                ErrorKind::EmptyMapping,
                "No switches defined",
            ));
        }
        let control = self.config.control_switch;
        if let Some((page, switch)) = set.reserved_conflict(control) {
            return Err(ConfigError::new(
                ErrorKind::ReservedSwitchConflict,
                format!(
                    "Switch {control} on page {} (line {}) is the control switch",
                    page.number, switch.line
                ),
            ));
        }
        Ok(set)
    }

    async fn install(&mut self, set: MappingSet) {
        info!(
            "mapping loaded: {} pages, control switch {}",
            set.pages().len(),
            self.config.control_switch
        );
        self.display.clear().await;
        match set.mode() {
            MappingMode::Paged => {
                if let Some(page) = set.page(0) {
                    self.display.print(&display::page_directory(page)).await;
                }
            }
            MappingMode::Cycling => {
                if let Some(page) = set.page(0) {
                    self.cycle = page.switches().map(|s| (s.number, 0)).collect();
                }
                self.display.print(display::READY).await;
            }
        }
        self.mappings = Some(set);
    }

    async fn halt(&mut self, err: ConfigError) {
        error!("mapping error {}: line {}", err.kind.name(), err.line().unwrap_or(0));
        self.display.clear().await;
        self.display.print(&display::fatal(&err)).await;
        self.state = ControllerState::Halted(err);
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn is_halted(&self) -> bool {
        matches!(self.state, ControllerState::Halted(_))
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn mappings(&self) -> Option<&MappingSet> {
        self.mappings.as_ref()
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Cycle position of `switch`; `None` for a switch with no shortcuts.
    pub fn cycle_position(&self, switch: usize) -> Option<usize> {
        self.cycle.get(&switch).copied()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn hid(&self) -> &H {
        self.executor.sink()
    }

    /// One round-robin scan. Every confirmed press is serviced and released before the scan
    /// moves on. Returns how many presses were serviced.
    pub async fn poll(&mut self) -> usize {
        if self.is_halted() {
            return 0;
        }
        let mut serviced = 0;
        let mut from = 0;
        while let Some(switch) = self.scanner.next_press(from).await {
            self.press(switch).await;
            self.scanner.wait_release(switch).await;
            serviced += 1;
            from = switch + 1;
        }
        serviced
    }

    pub async fn run(&mut self) -> ! {
        loop {
            if self.poll().await == 0 {
                Timer::after(self.config.release_poll).await;
            }
        }
    }

    /// Act on one debounced press of `switch`.
    pub async fn press(&mut self, switch: usize) {
        let Some(mode) = self.mappings.as_ref().map(MappingSet::mode) else {
            return;
        };
        match mode {
            MappingMode::Paged => self.press_paged(switch).await,
            MappingMode::Cycling => self.press_cycling(switch).await,
        }
    }

    async fn press_paged(&mut self, switch: usize) {
        let Some(set) = &self.mappings else {
            return;
        };
        if switch == self.config.control_switch {
            self.page_index = (self.page_index + 1) % set.pages().len();
            if let Some(page) = set.page(self.page_index) {
                self.display.clear().await;
                self.display.print(&display::page_directory(page)).await;
            }
        } else if let Some(mapped) = set
            .page(self.page_index)
            .and_then(|page| page.switch(switch))
        {
            if let Some(shortcut) = mapped.shortcut(0) {
                self.executor.execute_shortcut(shortcut).await;
            }
        }
    }

    async fn press_cycling(&mut self, switch: usize) {
        if switch == self.config.control_switch {
            let Some(selected) = self.selected else {
                return;
            };
            if let Some(shortcut) = current_shortcut(&self.mappings, &self.cycle, selected) {
                self.executor.execute_shortcut(shortcut).await;
                self.display.print(display::EXECUTED).await;
            }
            return;
        }

        if self.selected == Some(switch) {
            let count = self
                .mappings
                .as_ref()
                .and_then(|set| set.page(0))
                .and_then(|page| page.switch(switch))
                .map_or(0, |s| s.shortcuts().len());
            if let Some(pos) = self.cycle.get_mut(&switch) {
                if count != 0 {
                    *pos = (*pos + 1) % count;
                }
            }
        } else {
            self.selected = Some(switch);
        }

        let label = current_shortcut(&self.mappings, &self.cycle, switch).map(|s| s.label.as_str());
        let text = display::selection(switch, label);
        self.display.clear().await;
        self.display.print(&text).await;
    }
}

fn current_shortcut<'m>(
    mappings: &'m Option<MappingSet>,
    cycle: &BTreeMap<usize, usize>,
    switch: usize,
) -> Option<&'m Shortcut> {
    let pos = cycle.get(&switch).copied().unwrap_or(0);
    mappings
        .as_ref()?
        .page(0)?
        .switch(switch)?
        .shortcut(pos)
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod test;
