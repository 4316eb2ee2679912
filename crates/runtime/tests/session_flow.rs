use std::sync::Arc;
use std::time::Duration;

use rapsim_core::{
    AiRapper, ArtistId, EngineError, EventConfig, GameConfig, GameEngine, GameEnv, GameState,
    MediaKind, PostOnSocialMedia, RecordSong, ReleaseSong, SocialPlatformKind, Week, default_pool,
};
use rapsim_runtime::{
    InMemorySaveBackend, InMemorySettingsStore, RandomEventUpdate, RuntimeError, Session,
    SessionConfig, SessionEvent, SocialEvent, Topic, WeekEvent,
};

fn roster() -> Vec<AiRapper> {
    vec![
        AiRapper::new(ArtistId(1), "Lil Static", 62, 900_000).with_total_streams(4_000_000),
        AiRapper::new(ArtistId(2), "MC Ember", 48, 250_000).with_total_streams(900_000),
    ]
}

fn quiet_config() -> SessionConfig {
    SessionConfig {
        auto_save_enabled: false,
        user_id: "tester".into(),
        save_dir: std::env::temp_dir().join("rapsim-session-flow"),
        ..SessionConfig::default()
    }
}

async fn session(game_config: GameConfig, seed: u64) -> Session {
    Session::builder()
        .config(quiet_config())
        .game_config(game_config)
        .seed(seed)
        .rappers(roster())
        .save_backend(Arc::new(InMemorySaveBackend::new()))
        .settings_store(Arc::new(InMemorySettingsStore::default()))
        .build()
        .await
        .expect("session should build")
}

#[tokio::test]
async fn release_and_advance_publishes_week_events() {
    let session = session(GameConfig::default().without_events(), 42).await;
    let handle = session.handle();
    let mut week_rx = handle.subscribe(Topic::Week);

    let id = handle
        .record_song(RecordSong::new("Opening Night", vec![]))
        .await
        .unwrap();
    handle.release_song(ReleaseSong::everywhere(id)).await.unwrap();

    let summary = handle.begin_week().await.unwrap();
    assert!(matches!(
        week_rx.recv().await,
        Ok(SessionEvent::Week(WeekEvent::Staged { .. }))
    ));

    let report = handle.commit_week().await.unwrap();
    assert_eq!(report.summary, summary);
    match week_rx.recv().await {
        Ok(SessionEvent::Week(WeekEvent::Committed { week, .. })) => assert_eq!(week, Week(2)),
        other => panic!("unexpected event {other:?}"),
    }

    assert_eq!(handle.current_week().await.unwrap(), Week(2));
    assert_eq!(handle.weekly_stats().await.unwrap().len(), 1);
    let songs = handle.songs().await.unwrap();
    assert_eq!(songs.len(), 1);
    assert!(songs[0].streams > 0);

    let standing = handle.standing().await.unwrap();
    assert_eq!(standing.total_artists, 3);

    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn rejected_command_leaves_state_untouched() {
    let session = session(GameConfig::default().without_events(), 7).await;
    let handle = session.handle();

    handle.begin_week().await.unwrap();
    let before = handle.snapshot().await.unwrap();

    let result = handle.record_song(RecordSong::new("Too Late", vec![])).await;
    assert!(matches!(
        result,
        Err(RuntimeError::Engine(EngineError::PhaseMismatch { .. }))
    ));
    assert_eq!(handle.snapshot().await.unwrap(), before);

    handle.commit_week().await.unwrap();
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn triggered_events_are_broadcast_and_resolvable() {
    let game_config = GameConfig {
        events: EventConfig {
            pool_chance: 1.0,
            ..EventConfig::default()
        },
        ..GameConfig::default()
    };
    let session = session(game_config, 99).await;
    let handle = session.handle();
    let mut event_rx = handle.subscribe(Topic::RandomEvent);

    let mut triggered = None;
    for _ in 0..5 {
        let report = handle.advance_week().await.unwrap();
        if let Some(event) = report.triggered_event {
            triggered = Some(event);
            break;
        }
    }
    let triggered = triggered.expect("an always-firing pool should surface an event");

    match event_rx.recv().await {
        Ok(SessionEvent::RandomEvent(RandomEventUpdate::Triggered(event))) => {
            assert_eq!(event.id, triggered.id)
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(handle.active_events().await.unwrap().len(), 1);

    // the last option, so a defaulted index would show up
    let last_option = handle
        .snapshot()
        .await
        .unwrap()
        .event_pool
        .iter()
        .find(|template| template.id == triggered.template_id)
        .map(|template| template.options.len() - 1)
        .unwrap();
    let resolved = handle
        .resolve_event(triggered.id.clone(), last_option)
        .await
        .unwrap();
    assert!(resolved.resolved);
    match event_rx.recv().await {
        Ok(SessionEvent::RandomEvent(RandomEventUpdate::Resolved { event, option })) => {
            assert_eq!(event.id, triggered.id);
            assert_eq!(option, last_option);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(handle.active_events().await.unwrap().is_empty());
    assert!(
        handle
            .snapshot()
            .await
            .unwrap()
            .resolved_event_ids
            .contains(&triggered.id)
    );

    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn posts_reach_the_social_topic() {
    let session = session(GameConfig::default().without_events(), 3).await;
    let handle = session.handle();
    let mut social_rx = handle.subscribe(Topic::Social);

    let post = handle
        .post_on_social_media(PostOnSocialMedia::new(
            SocialPlatformKind::Twitter,
            "new music friday",
            Some(MediaKind::Image),
        ))
        .await
        .unwrap();

    match social_rx.recv().await {
        Ok(SessionEvent::Social(SocialEvent::Posted(published))) => assert_eq!(published, post),
        other => panic!("unexpected event {other:?}"),
    }

    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn session_replays_like_the_bare_engine() {
    let game_config = GameConfig::default();
    let session = session(game_config.clone(), 1234).await;
    let handle = session.handle();

    let mut direct = GameState::with_config(1234, &game_config)
        .with_rappers(roster())
        .and_then(|state| state.with_event_pool(default_pool()))
        .unwrap();

    let id = handle
        .record_song(RecordSong::new("Mirror", vec![]))
        .await
        .unwrap();
    handle.release_song(ReleaseSong::everywhere(id)).await.unwrap();
    for _ in 0..6 {
        for event in handle.active_events().await.unwrap() {
            handle.resolve_event(event.id, 0).await.unwrap();
        }
        handle.advance_week().await.unwrap();
    }

    {
        let mut engine = GameEngine::new(&mut direct, GameEnv::with_config(&game_config));
        let id = engine.record_song(&RecordSong::new("Mirror", vec![])).unwrap();
        engine.release_song(&ReleaseSong::everywhere(id)).unwrap();
        for _ in 0..6 {
            let pending: Vec<String> = engine
                .state()
                .active_events
                .iter()
                .filter(|event| !event.resolved)
                .map(|event| event.id.clone())
                .collect();
            for event in pending {
                engine.resolve_event(event, 0).unwrap();
            }
            engine.advance_week().unwrap();
        }
    }

    let replayed = handle.snapshot().await.unwrap();
    assert_eq!(
        hex::encode(replayed.digest().unwrap()),
        hex::encode(direct.digest().unwrap())
    );

    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn shutdown_stops_the_worker_even_with_live_handles() {
    let session = session(GameConfig::default().without_events(), 5).await;
    let handle = session.handle();

    tokio::time::timeout(Duration::from_secs(5), session.shutdown())
        .await
        .expect("shutdown should not hang")
        .unwrap();

    assert!(matches!(
        handle.snapshot().await,
        Err(RuntimeError::CommandChannelClosed | RuntimeError::ReplyChannelClosed(_))
    ));
}
