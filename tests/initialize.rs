mod common;

use common::{core_with, core_with_config, record_notifications, Call, FakeEngine, FakePlaylist};
use mpv_mirror::infrastructure::get_config_dir;
use mpv_mirror::options::LogLevel;
use mpv_mirror::{Config, Node, Notification, SyncError, VideoOutput, APP_NAME};

#[test]
fn observes_properties_then_starts_and_announces_readiness() {
    let mut core = core_with(FakeEngine::default(), FakePlaylist::default());
    let seen = record_notifications(&core);

    core.initialize(VideoOutput::Window(0x2a)).unwrap();

    let engine = core.engine();
    let observed: Vec<&str> = engine
        .calls
        .iter()
        .filter_map(|call| match call {
            Call::Observe(name) => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(observed, ["aid", "pause", "eof-reached", "fullscreen", "volume"]);

    let init_at = engine.calls.iter().position(|c| *c == Call::Initialize).unwrap();
    let last_observe = engine
        .calls
        .iter()
        .rposition(|c| matches!(c, Call::Observe(_)))
        .unwrap();
    assert!(last_observe < init_at);

    assert_eq!(engine.option("audio-client-name").as_deref(), Some(APP_NAME));
    assert_eq!(engine.option("pause").as_deref(), Some("yes"));
    assert!(engine
        .calls
        .contains(&Call::SetOption("wid".to_string(), Node::Int64(0x2a))));

    assert_eq!(*seen.borrow(), [Notification::EngineReady]);
}

#[test]
fn log_subscription_uses_engine_msg_level() {
    let engine = FakeEngine::default().with_property(
        "options/msg-level",
        Node::String("all=warn,cplayer=info".to_string()),
    );
    let mut core = core_with(engine, FakePlaylist::default());

    core.initialize(VideoOutput::OpenGl).unwrap();

    assert!(core
        .engine()
        .calls
        .contains(&Call::RequestLogMessages(LogLevel::Info)));
    assert_eq!(core.log_filter().rules().len(), 1);
    assert_eq!(core.engine().option("vo").as_deref(), Some("opengl-cb"));
}

#[test]
fn log_subscription_defaults_to_error() {
    let mut core = core_with(FakeEngine::default(), FakePlaylist::default());
    core.initialize(VideoOutput::OpenGl).unwrap();

    assert!(core
        .engine()
        .calls
        .contains(&Call::RequestLogMessages(LogLevel::Error)));
}

#[test]
fn rejected_extra_options_are_reported_once() {
    let config = Config {
        mpv_options: "--bogus=1 --also-bogus --hwdec=auto".to_string(),
        ..Config::default()
    };
    let engine = FakeEngine::default()
        .failing_on("option:bogus")
        .failing_on("option:also-bogus");
    let mut core = core_with_config(engine, FakePlaylist::default(), config);
    let seen = record_notifications(&core);

    core.initialize(VideoOutput::Window(1)).unwrap();

    assert_eq!(core.engine().option("hwdec").as_deref(), Some("auto"));
    assert_eq!(
        *seen.borrow(),
        [
            Notification::EngineError("Failed to apply one or more MPV options.".to_string()),
            Notification::EngineReady,
        ]
    );
}

#[test]
fn engine_start_failure_is_fatal() {
    let engine = FakeEngine::default().failing_on("initialize");
    let mut core = core_with(engine, FakePlaylist::default());
    let seen = record_notifications(&core);

    let err = core.initialize(VideoOutput::Window(1)).unwrap_err();

    assert!(err.is_fatal());
    assert!(matches!(err, SyncError::Fatal { ref operation, .. } if operation == "initialize"));
    assert!(seen.borrow().is_empty());
}

#[test]
fn observe_failure_is_fatal() {
    let engine = FakeEngine::default().failing_on("observe:volume");
    let mut core = core_with(engine, FakePlaylist::default());

    let err = core.initialize(VideoOutput::Window(1)).unwrap_err();

    assert!(err.is_fatal());
    assert!(!core.engine().calls.contains(&Call::Initialize));
}

#[test]
fn config_file_is_loaded_only_when_enabled() {
    let mut config = Config {
        mpv_config_file: Some("/etc/mpv/mpv.conf".to_string()),
        ..Config::default()
    };

    let mut core = core_with_config(FakeEngine::default(), FakePlaylist::default(), config.clone());
    core.initialize(VideoOutput::OpenGl).unwrap();
    assert!(!core
        .engine()
        .calls
        .iter()
        .any(|c| matches!(c, Call::LoadConfigFile(_))));

    config.mpv_config_enable = true;
    let mut core = core_with_config(
        FakeEngine::default().failing_on("load_config_file"),
        FakePlaylist::default(),
        config,
    );
    core.initialize(VideoOutput::OpenGl).unwrap();
    assert!(core
        .engine()
        .calls
        .contains(&Call::LoadConfigFile("/etc/mpv/mpv.conf".to_string())));
}

#[test]
fn configured_volume_and_autofit_reach_the_engine() {
    let config = Config {
        volume: 35.0,
        autofit: Some("50%x50%".to_string()),
        ..Config::default()
    };
    let mut core = core_with_config(FakeEngine::default(), FakePlaylist::default(), config);

    core.initialize(VideoOutput::OpenGl).unwrap();

    let engine = core.engine();
    assert!(engine
        .calls
        .contains(&Call::SetOption("volume".to_string(), Node::Double(35.0))));
    assert_eq!(engine.option("autofit").as_deref(), Some("50%x50%"));
}

#[test]
fn engine_reads_its_config_from_the_user_config_dir() {
    let mut core = core_with(FakeEngine::default(), FakePlaylist::default());

    core.initialize(VideoOutput::OpenGl).unwrap();

    let expected = get_config_dir().ok().map(|dir| dir.display().to_string());
    assert_eq!(core.engine().option("config-dir"), expected);
    if let Some(dir) = core.engine().option("config-dir") {
        assert!(dir.ends_with(APP_NAME));
    }
}
