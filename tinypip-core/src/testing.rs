//! Scripted fakes for every platform trait
//!
//! Clock and buttons share one millisecond counter, so a button script
//! written in milliseconds plays out correctly however many frames the
//! code under test renders. Handles are cheap clones over shared state;
//! a test keeps one clone to steer and inspect while the shell owns the
//! other.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use tinypip_display::{
    Button, DisplayBackend, DisplayError, Glyph, InputSource, Theme, SCREEN_COLS, SCREEN_ROWS,
};

use crate::traits::{
    Backlight, Board, Clock, Forecast, NetServices, Radio, RadioError, ScanList, ScanResult,
    Storage, StorageError, StorageKey,
};

// Clock

/// Clock driven by `sleep_ms`
#[derive(Debug, Clone, Default)]
pub struct FakeClock {
    ms: Rc<Cell<u64>>,
    epoch_base_s: Rc<Cell<u64>>,
}

impl FakeClock {
    /// Clock whose wall time reads `epoch_s` at tick zero
    pub fn new(epoch_s: u64) -> Self {
        let clock = Self::default();
        clock.epoch_base_s.set(epoch_s);
        clock
    }

    /// Milliseconds slept so far
    pub fn now_ms(&self) -> u64 {
        self.ms.get()
    }

    /// Move time forward without a sleep call
    pub fn advance(&self, ms: u64) {
        self.ms.set(self.ms.get() + ms);
    }
}

impl Clock for FakeClock {
    fn now_epoch_s(&self) -> u64 {
        self.epoch_base_s.get() + self.ms.get() / 1000
    }

    fn now_ticks_ms(&self) -> u64 {
        self.ms.get()
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.advance(u64::from(ms));
    }

    fn set_epoch_s(&mut self, epoch_s: u64) {
        self.epoch_base_s
            .set(epoch_s.saturating_sub(self.ms.get() / 1000));
    }
}

// Buttons

#[derive(Debug, Default)]
struct ButtonState {
    /// (button, from_ms, until_ms) with `until_ms` exclusive
    windows: Vec<(Button, u64, u64)>,
    held: Vec<Button>,
    polls: usize,
}

/// Buttons pressed during scripted time windows
#[derive(Debug, Clone)]
pub struct ScriptedButtons {
    clock: FakeClock,
    state: Rc<RefCell<ButtonState>>,
}

impl ScriptedButtons {
    /// Buttons that read time from `clock`
    pub fn new(clock: &FakeClock) -> Self {
        Self {
            clock: clock.clone(),
            state: Rc::default(),
        }
    }

    /// Hold `button` from `from_ms` for `duration_ms`
    pub fn hold(&self, button: Button, from_ms: u64, duration_ms: u64) -> &Self {
        self.state
            .borrow_mut()
            .windows
            .push((button, from_ms, from_ms + duration_ms));
        self
    }

    /// Short press (one frame's worth) at `at_ms`
    pub fn tap(&self, button: Button, at_ms: u64) -> &Self {
        self.hold(button, at_ms, 60)
    }

    /// Hold `button` until `release` is called
    pub fn press(&self, button: Button) {
        let mut state = self.state.borrow_mut();
        if !state.held.contains(&button) {
            state.held.push(button);
        }
    }

    /// Release a button held with `press`
    pub fn release(&self, button: Button) {
        self.state.borrow_mut().held.retain(|b| *b != button);
    }

    /// Number of `is_pressed` calls seen
    pub fn polls(&self) -> usize {
        self.state.borrow().polls
    }
}

impl InputSource for ScriptedButtons {
    fn is_pressed(&mut self, button: Button) -> bool {
        let now = self.clock.now_ms();
        let mut state = self.state.borrow_mut();
        state.polls += 1;
        state.held.contains(&button)
            || state
                .windows
                .iter()
                .any(|&(b, from, until)| b == button && now >= from && now < until)
    }
}

// Radio

#[derive(Debug, Default)]
struct RadioState {
    enabled: bool,
    networks: Vec<ScanResult>,
    scan_count: usize,
    failing_scans: usize,
    /// Networks that accept a connection: (ssid, secret)
    accepts: Vec<(String, String)>,
    polls_to_connect: usize,
    pending: Option<usize>,
    connected: bool,
    attempts: Vec<String>,
    enable_log: Vec<bool>,
}

/// Radio with a fixed set of visible networks
#[derive(Debug, Clone, Default)]
pub struct ScriptedRadio {
    state: Rc<RefCell<RadioState>>,
}

impl ScriptedRadio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Networks returned by every scan
    pub fn set_networks(&self, networks: &[ScanResult]) {
        self.state.borrow_mut().networks = networks.to_vec();
    }

    /// Make the next `count` scans fail
    pub fn fail_scans(&self, count: usize) {
        self.state.borrow_mut().failing_scans = count;
    }

    /// Accept connections to `ssid` with `secret` after `polls` status polls
    pub fn accept(&self, ssid: &str, secret: &str, polls: usize) {
        let mut state = self.state.borrow_mut();
        state.accepts.push((ssid.into(), secret.into()));
        state.polls_to_connect = polls;
    }

    pub fn scan_count(&self) -> usize {
        self.state.borrow().scan_count
    }

    /// SSIDs passed to `begin_connect`, in order
    pub fn attempts(&self) -> Vec<String> {
        self.state.borrow().attempts.clone()
    }

    pub fn enabled(&self) -> bool {
        self.state.borrow().enabled
    }

    pub fn connected(&self) -> bool {
        self.state.borrow().connected
    }

    /// Every `set_enabled` argument, in order
    pub fn enable_log(&self) -> Vec<bool> {
        self.state.borrow().enable_log.clone()
    }
}

impl Radio for ScriptedRadio {
    fn set_enabled(&mut self, enabled: bool) {
        let mut state = self.state.borrow_mut();
        state.enabled = enabled;
        state.enable_log.push(enabled);
        if !enabled {
            state.connected = false;
            state.pending = None;
        }
    }

    fn is_enabled(&self) -> bool {
        self.state.borrow().enabled
    }

    fn scan(&mut self, out: &mut ScanList) -> Result<(), RadioError> {
        let mut state = self.state.borrow_mut();
        state.scan_count += 1;
        out.clear();
        if state.failing_scans > 0 {
            state.failing_scans -= 1;
            return Err(RadioError::ScanFailed);
        }
        for network in &state.networks {
            if out.push(network.clone()).is_err() {
                break;
            }
        }
        Ok(())
    }

    fn begin_connect(&mut self, ssid: &str, secret: &str) -> Result<(), RadioError> {
        let mut state = self.state.borrow_mut();
        state.attempts.push(ssid.into());
        if !state.enabled {
            return Err(RadioError::Disabled);
        }
        let ok = state
            .accepts
            .iter()
            .any(|(s, p)| s.as_str() == ssid && p.as_str() == secret);
        let polls = state.polls_to_connect;
        state.connected = false;
        state.pending = ok.then_some(polls);
        Ok(())
    }

    fn is_connected(&mut self) -> bool {
        let mut state = self.state.borrow_mut();
        let pending = state.pending;
        match pending {
            Some(0) => {
                state.pending = None;
                state.connected = true;
            }
            Some(n) => state.pending = Some(n - 1),
            None => {}
        }
        state.connected
    }

    fn disconnect(&mut self) {
        let mut state = self.state.borrow_mut();
        state.connected = false;
        state.pending = None;
    }
}

// Storage

#[derive(Debug, Default)]
struct StorageState {
    records: BTreeMap<u8, Vec<u8>>,
    fail_writes: bool,
    writes: usize,
}

/// In-memory key/value store
#[derive(Debug, Clone, Default)]
pub struct MemStorage {
    state: Rc<RefCell<StorageState>>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw bytes, bypassing the trait
    pub fn insert_raw(&self, key: StorageKey, data: &[u8]) {
        self.state
            .borrow_mut()
            .records
            .insert(key.as_u8(), data.to_vec());
    }

    /// Raw bytes under `key`
    pub fn raw(&self, key: StorageKey) -> Option<Vec<u8>> {
        self.state.borrow().records.get(&key.as_u8()).cloned()
    }

    /// Make every write fail with `StorageError::Io`
    pub fn fail_writes(&self, fail: bool) {
        self.state.borrow_mut().fail_writes = fail;
    }

    /// Successful writes so far
    pub fn writes(&self) -> usize {
        self.state.borrow().writes
    }
}

impl Storage for MemStorage {
    fn read(&mut self, key: StorageKey, buf: &mut [u8]) -> Result<usize, StorageError> {
        let state = self.state.borrow();
        let data = state
            .records
            .get(&key.as_u8())
            .ok_or(StorageError::NotFound)?;
        if data.len() > buf.len() {
            return Err(StorageError::BufferTooSmall);
        }
        buf[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }

    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StorageError> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(StorageError::Io);
        }
        state.records.insert(key.as_u8(), data.to_vec());
        state.writes += 1;
        Ok(())
    }
}

// Network

#[derive(Debug, Default)]
struct NetState {
    time: Option<u64>,
    forecast: Option<Forecast>,
    time_calls: usize,
    forecast_calls: usize,
    last_location: Option<(f32, f32)>,
}

/// Network services with canned answers
#[derive(Debug, Clone, Default)]
pub struct FakeNet {
    state: Rc<RefCell<NetState>>,
}

impl FakeNet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_time(&self, epoch_s: Option<u64>) {
        self.state.borrow_mut().time = epoch_s;
    }

    pub fn set_forecast(&self, forecast: Option<Forecast>) {
        self.state.borrow_mut().forecast = forecast;
    }

    pub fn time_calls(&self) -> usize {
        self.state.borrow().time_calls
    }

    pub fn forecast_calls(&self) -> usize {
        self.state.borrow().forecast_calls
    }

    pub fn last_location(&self) -> Option<(f32, f32)> {
        self.state.borrow().last_location
    }
}

impl NetServices for FakeNet {
    fn sync_time(&mut self) -> Option<u64> {
        let mut state = self.state.borrow_mut();
        state.time_calls += 1;
        state.time
    }

    fn fetch_forecast(&mut self, latitude: f32, longitude: f32) -> Option<Forecast> {
        let mut state = self.state.borrow_mut();
        state.forecast_calls += 1;
        state.last_location = Some((latitude, longitude));
        state.forecast.clone()
    }
}

// Backlight

/// Backlight that only remembers its level
#[derive(Debug, Clone, Default)]
pub struct NullBacklight {
    level: Rc<Cell<Option<u8>>>,
}

impl NullBacklight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last level set, if any
    pub fn level(&self) -> Option<u8> {
        self.level.get()
    }
}

impl Backlight for NullBacklight {
    fn set_level(&mut self, percent: u8) {
        self.level.set(Some(percent));
    }
}

// Display

#[derive(Debug, Default)]
struct DisplayState {
    /// Rows being drawn
    pending: Vec<String>,
    pending_glyphs: Vec<(u8, u8, Glyph)>,
    /// Rows of the last flushed frame
    frame: Vec<String>,
    glyphs: Vec<(u8, u8, Glyph)>,
    /// Every flushed frame, joined with newlines
    history: Vec<String>,
    glyph_history: Vec<Vec<(u8, u8, Glyph)>>,
    flushes: usize,
    theme: Theme,
    fail_flush: bool,
}

/// Display that keeps the text of every flushed frame
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    state: Rc<RefCell<DisplayState>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        let display = Self::default();
        display.state.borrow_mut().pending = blank_rows();
        display
    }

    /// Text of row `row` in the last flushed frame
    pub fn row(&self, row: usize) -> String {
        self.state
            .borrow()
            .frame
            .get(row)
            .cloned()
            .unwrap_or_default()
    }

    /// Whether the last flushed frame contains `needle`
    pub fn shows(&self, needle: &str) -> bool {
        self.state.borrow().frame.iter().any(|l| l.contains(needle))
    }

    /// Whether any flushed frame so far contained `needle`
    pub fn ever_showed(&self, needle: &str) -> bool {
        self.state.borrow().history.iter().any(|f| f.contains(needle))
    }

    /// Glyphs of the last flushed frame
    pub fn glyphs(&self) -> Vec<(u8, u8, Glyph)> {
        self.state.borrow().glyphs.clone()
    }

    /// Glyph drawn at `row`, `col` in each flushed frame so far
    pub fn glyph_trace(&self, row: u8, col: u8) -> Vec<Option<Glyph>> {
        self.state
            .borrow()
            .glyph_history
            .iter()
            .map(|frame| {
                frame
                    .iter()
                    .find(|(r, c, _)| *r == row && *c == col)
                    .map(|(_, _, g)| *g)
            })
            .collect()
    }

    pub fn flushes(&self) -> usize {
        self.state.borrow().flushes
    }

    pub fn theme(&self) -> Theme {
        self.state.borrow().theme
    }

    /// Make every flush fail with `DisplayError::Communication`
    pub fn fail_flush(&self, fail: bool) {
        self.state.borrow_mut().fail_flush = fail;
    }
}

fn blank_rows() -> Vec<String> {
    (0..SCREEN_ROWS).map(|_| String::new()).collect()
}

impl DisplayBackend for RecordingDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        let mut state = self.state.borrow_mut();
        state.pending = blank_rows();
        state.pending_glyphs.clear();
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        let mut state = self.state.borrow_mut();
        let line = state
            .pending
            .get_mut(row as usize)
            .ok_or(DisplayError::InvalidCoordinates)?;
        while line.chars().count() < col as usize {
            line.push(' ');
        }
        line.push_str(text);
        Ok(())
    }

    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError> {
        if row as usize >= SCREEN_ROWS || start_col > end_col || end_col as usize > SCREEN_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }
        Ok(())
    }

    fn draw_glyph(&mut self, row: u8, col: u8, glyph: Glyph) -> Result<(), DisplayError> {
        self.state.borrow_mut().pending_glyphs.push((row, col, glyph));
        Ok(())
    }

    fn set_theme(&mut self, theme: Theme) {
        self.state.borrow_mut().theme = theme;
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        let mut state = self.state.borrow_mut();
        if state.fail_flush {
            return Err(DisplayError::Communication);
        }
        state.frame = state.pending.clone();
        state.glyphs = state.pending_glyphs.clone();
        let joined = state.frame.join("\n");
        state.history.push(joined);
        let glyphs = state.glyphs.clone();
        state.glyph_history.push(glyphs);
        state.flushes += 1;
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }

    fn is_ready(&self) -> bool {
        true
    }
}

/// One of every fake, wired to a shared clock
#[derive(Debug, Clone)]
pub struct FakeBoard {
    pub display: RecordingDisplay,
    pub buttons: ScriptedButtons,
    pub clock: FakeClock,
    pub radio: ScriptedRadio,
    pub storage: MemStorage,
    pub net: FakeNet,
    pub backlight: NullBacklight,
}

impl FakeBoard {
    /// Fakes with the wall clock at `epoch_s`
    pub fn new(epoch_s: u64) -> Self {
        let clock = FakeClock::new(epoch_s);
        Self {
            display: RecordingDisplay::new(),
            buttons: ScriptedButtons::new(&clock),
            clock,
            radio: ScriptedRadio::new(),
            storage: MemStorage::new(),
            net: FakeNet::new(),
            backlight: NullBacklight::new(),
        }
    }

    /// Borrow the fakes as a `Board`
    pub fn board(&mut self) -> Board<'_> {
        Board {
            display: &mut self.display,
            input: &mut self.buttons,
            clock: &mut self.clock,
            radio: &mut self.radio,
            storage: &mut self.storage,
            net: &mut self.net,
            backlight: &mut self.backlight,
        }
    }
}
