//! In-memory engine, view and playlist fakes shared by the integration tests.

#![allow(dead_code)]

use mpv_mirror::engine::{EngineResult, ErrorCode, Format};
use mpv_mirror::options::{Dimensions, LogLevel};
use mpv_mirror::ui::Suppressor;
use mpv_mirror::{
    Config, Engine, EngineEvent, EventKind, Node, Notification, PlaylistEntry, PlaylistModel,
    SyncCore, TrackLists, View,
};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

/// One recorded engine call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetProperty(String, Node),
    Command(Vec<String>),
    SetOptionString(String, String),
    SetOption(String, Node),
    LoadConfigFile(String),
    Observe(String),
    RequestLogMessages(LogLevel),
    RequestEvent(EventKind, bool),
    Initialize,
}

/// Engine fake. Property writes land in `properties`, so later reads see them.
///
/// Failures are keyed by call: `get:<name>`, `set:<name>`, `command:<verb>`,
/// `option:<name>`, `observe:<name>`, `initialize`, `request_log_messages`,
/// `request_event`.
#[derive(Debug, Default)]
pub struct FakeEngine {
    pub properties: HashMap<String, Node>,
    pub events: VecDeque<EngineEvent>,
    pub calls: Vec<Call>,
    pub failing: HashSet<String>,
}

impl FakeEngine {
    pub fn with_property(mut self, name: &str, value: Node) -> Self {
        self.properties.insert(name.to_string(), value);
        self
    }

    pub fn failing_on(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    pub fn queue(&mut self, event: EngineEvent) {
        self.events.push_back(event);
    }

    pub fn commands(&self) -> Vec<Vec<String>> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Command(args) => Some(args.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn property_writes(&self, name: &str) -> Vec<Node> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::SetProperty(n, value) if n == name => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn option(&self, name: &str) -> Option<String> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::SetOptionString(n, value) if n == name => Some(value.clone()),
            _ => None,
        })
    }

    fn check(&self, key: String, code: ErrorCode) -> EngineResult<()> {
        if self.failing.contains(&key) {
            Err(code)
        } else {
            Ok(())
        }
    }
}

impl Engine for FakeEngine {
    fn get_property(&mut self, name: &str, _format: Format) -> EngineResult<Node> {
        self.check(format!("get:{name}"), ErrorCode::PROPERTY_UNAVAILABLE)?;
        self.properties
            .get(name)
            .cloned()
            .ok_or(ErrorCode::PROPERTY_NOT_FOUND)
    }

    fn set_property(&mut self, name: &str, value: Node) -> EngineResult<()> {
        self.calls
            .push(Call::SetProperty(name.to_string(), value.clone()));
        self.check(format!("set:{name}"), ErrorCode::PROPERTY_ERROR)?;
        self.properties.insert(name.to_string(), value);
        Ok(())
    }

    fn command(&mut self, args: &[&str]) -> EngineResult<()> {
        self.calls
            .push(Call::Command(args.iter().map(ToString::to_string).collect()));
        let verb = args.first().copied().unwrap_or_default();
        self.check(format!("command:{verb}"), ErrorCode::COMMAND)
    }

    fn set_option_string(&mut self, name: &str, value: &str) -> EngineResult<()> {
        self.calls
            .push(Call::SetOptionString(name.to_string(), value.to_string()));
        self.check(format!("option:{name}"), ErrorCode::OPTION_NOT_FOUND)
    }

    fn set_option(&mut self, name: &str, value: Node) -> EngineResult<()> {
        self.calls.push(Call::SetOption(name.to_string(), value));
        self.check(format!("option:{name}"), ErrorCode::OPTION_NOT_FOUND)
    }

    fn load_config_file(&mut self, path: &str) -> EngineResult<()> {
        self.calls.push(Call::LoadConfigFile(path.to_string()));
        self.check("load_config_file".to_string(), ErrorCode::OPTION_ERROR)
    }

    fn observe_property(&mut self, name: &str, _format: Format) -> EngineResult<()> {
        self.calls.push(Call::Observe(name.to_string()));
        self.check(format!("observe:{name}"), ErrorCode::PROPERTY_NOT_FOUND)
    }

    fn request_log_messages(&mut self, level: LogLevel) -> EngineResult<()> {
        self.calls.push(Call::RequestLogMessages(level));
        self.check("request_log_messages".to_string(), ErrorCode::INVALID_PARAMETER)
    }

    fn request_event(&mut self, kind: EventKind, enable: bool) -> EngineResult<()> {
        self.calls.push(Call::RequestEvent(kind, enable));
        self.check("request_event".to_string(), ErrorCode::INVALID_PARAMETER)
    }

    fn wait_event(&mut self, _timeout: f64) -> Option<EngineEvent> {
        Some(self.events.pop_front().unwrap_or(EngineEvent::None))
    }

    fn initialize(&mut self) -> EngineResult<()> {
        self.calls.push(Call::Initialize);
        self.check("initialize".to_string(), ErrorCode::UNINITIALIZED)
    }
}

/// View fake recording the last value pushed into each widget.
#[derive(Debug)]
pub struct FakeView {
    pub screen: Dimensions,
    pub title: Option<String>,
    /// Each volume write with whether the volume suppressor was active.
    pub volume_writes: Vec<(f64, bool)>,
    pub volume_enabled: Option<bool>,
    pub tracks: Option<TrackLists>,
    pub selection: Option<(Option<i64>, Option<i64>)>,
    pub fullscreen: bool,
    pub fullscreen_toggles: usize,
    pub resets: usize,
    pub chapters_enabled: Option<bool>,
    pub duration: Option<f64>,
    pub playing: Option<bool>,
    pub controls_enabled: Option<bool>,
    pub next_cookie: u32,
    pub inhibits: Vec<(u32, String)>,
    pub uninhibits: Vec<u32>,
    pub volume_suppressor: Option<Suppressor>,
}

impl Default for FakeView {
    fn default() -> Self {
        Self {
            screen: Dimensions::new(1920, 1080),
            title: None,
            volume_writes: Vec::new(),
            volume_enabled: None,
            tracks: None,
            selection: None,
            fullscreen: false,
            fullscreen_toggles: 0,
            resets: 0,
            chapters_enabled: None,
            duration: None,
            playing: None,
            controls_enabled: None,
            next_cookie: 1,
            inhibits: Vec::new(),
            uninhibits: Vec::new(),
            volume_suppressor: None,
        }
    }
}

impl View for FakeView {
    fn screen_size(&self) -> Dimensions {
        self.screen
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    fn set_volume(&mut self, volume: f64) {
        let suppressed = self
            .volume_suppressor
            .as_ref()
            .is_some_and(Suppressor::is_active);
        self.volume_writes.push((volume, suppressed));
    }

    fn set_volume_enabled(&mut self, enabled: bool) {
        self.volume_enabled = Some(enabled);
    }

    fn set_track_lists(&mut self, tracks: &TrackLists) {
        self.tracks = Some(tracks.clone());
    }

    fn set_track_selection(&mut self, audio: Option<i64>, subtitle: Option<i64>) {
        self.selection = Some((audio, subtitle));
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
        self.fullscreen_toggles += 1;
    }

    fn reset(&mut self) {
        self.resets += 1;
    }

    fn set_chapter_controls_enabled(&mut self, enabled: bool) {
        self.chapters_enabled = Some(enabled);
    }

    fn set_duration(&mut self, seconds: f64) {
        self.duration = Some(seconds);
    }

    fn set_playing_state(&mut self, playing: bool) {
        self.playing = Some(playing);
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = Some(enabled);
    }

    fn inhibit(&mut self, reason: &str) -> u32 {
        let cookie = self.next_cookie;
        self.next_cookie += 1;
        self.inhibits.push((cookie, reason.to_string()));
        cookie
    }

    fn uninhibit(&mut self, cookie: u32) {
        self.uninhibits.push(cookie);
    }
}

/// Playlist rows fake counting writes made with and without suppression.
#[derive(Debug, Default)]
pub struct FakePlaylist {
    pub rows: Vec<PlaylistEntry>,
    pub indicator: Option<Option<usize>>,
    pub writes: usize,
    pub unsuppressed_writes: usize,
    pub suppressor: Option<Suppressor>,
}

impl FakePlaylist {
    pub fn with_uris(uris: &[&str]) -> Self {
        Self {
            rows: uris.iter().map(|uri| PlaylistEntry::from_uri(uri)).collect(),
            ..Self::default()
        }
    }

    pub fn uris(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.uri.as_str()).collect()
    }

    fn record_write(&mut self) {
        self.writes += 1;
        if !self.suppressor.as_ref().is_some_and(Suppressor::is_active) {
            self.unsuppressed_writes += 1;
        }
    }
}

impl PlaylistModel for FakePlaylist {
    fn len(&self) -> usize {
        self.rows.len()
    }

    fn entry(&self, index: usize) -> Option<PlaylistEntry> {
        self.rows.get(index).cloned()
    }

    fn set_name(&mut self, index: usize, name: &str) {
        self.record_write();
        self.rows[index].name = name.to_string();
    }

    fn set_uri(&mut self, index: usize, uri: &str) {
        self.record_write();
        self.rows[index].uri = uri.to_string();
    }

    fn append(&mut self, entry: PlaylistEntry) {
        self.record_write();
        self.rows.push(entry);
    }

    fn remove(&mut self, index: usize) {
        self.record_write();
        self.rows.remove(index);
    }

    fn clear(&mut self) {
        self.record_write();
        self.rows.clear();
    }

    fn set_indicator(&mut self, position: Option<usize>) {
        self.indicator = Some(position);
    }
}

pub type TestCore = SyncCore<FakeEngine, FakeView, FakePlaylist>;

/// Builds a core with the fakes' suppressors wired to the core's guards.
pub fn core_with(engine: FakeEngine, playlist: FakePlaylist) -> TestCore {
    core_with_config(engine, playlist, Config::default())
}

pub fn core_with_config(engine: FakeEngine, playlist: FakePlaylist, config: Config) -> TestCore {
    let mut core = SyncCore::new(engine, FakeView::default(), playlist, config);
    let volume = core.volume_suppressor();
    let rows = core.playlist_suppressor();
    core.view_mut().volume_suppressor = Some(volume);
    core.playlist_mut().suppressor = Some(rows);
    core
}

/// Collects every notification the core broadcasts.
pub fn record_notifications(core: &TestCore) -> Rc<RefCell<Vec<Notification>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    core.notifications()
        .subscribe(move |n| sink.borrow_mut().push(n.clone()));
    seen
}

pub fn engine_playlist(uris: &[&str]) -> Node {
    Node::List(
        uris.iter()
            .map(|uri| Node::Map(vec![("filename".to_string(), Node::String((*uri).to_string()))]))
            .collect(),
    )
}

pub fn property_change(name: &str, value: Node) -> EngineEvent {
    EngineEvent::PropertyChange {
        name: name.to_string(),
        value,
    }
}

/// Shared buffer the fmt subscriber writes formatted events into.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under a plain-text subscriber and returns its result along with
/// everything that was logged.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logged = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, logged)
}
