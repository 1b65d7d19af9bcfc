//! Playback controller - owns the single playback session
//!
//! Every selection gets a fresh [`Generation`]. Backend callbacks, lyric
//! results and frame ticks all carry the generation they were started for
//! and are dropped unless it matches the live session.

use crate::app::events::{Event, PlayerEvent, PlayerEventKind};
use crate::catalog::TrackDescriptor;
use crate::error::PlaybackError;
use crate::lyrics::{self, LyricFetcher, LyricLine, ParsedLyrics};
use crate::player::{AudioBackend, Generation};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Loading,
    Playing,
}

/// Mutable state of the current selection.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    pub generation: Generation,
    pub track: TrackDescriptor,
    pub state: PlaybackState,
    pub lyric_lines: Vec<LyricLine>,
    /// A lyric fetch is in flight.
    pub lyrics_pending: bool,
    pub active_lyric_index: Option<usize>,
}

impl PlaybackSession {
    fn new(generation: Generation, track: TrackDescriptor) -> Self {
        Self {
            generation,
            track,
            state: PlaybackState::Loading,
            lyric_lines: Vec::new(),
            lyrics_pending: false,
            active_lyric_index: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn active_audio_source(&self) -> &str {
        &self.track.audio_source
    }

    #[cfg(test)]
    pub fn active_line(&self) -> Option<&LyricLine> {
        self.active_lyric_index.and_then(|i| self.lyric_lines.get(i))
    }
}

pub struct PlaybackController<B: AudioBackend, F: LyricFetcher> {
    backend: B,
    fetcher: F,
    tx: mpsc::Sender<Event>,
    frame_interval: Duration,
    generation: Generation,
    session: Option<PlaybackSession>,
    frame_task: Option<JoinHandle<()>>,
}

impl<B: AudioBackend, F: LyricFetcher> PlaybackController<B, F> {
    pub fn new(backend: B, fetcher: F, tx: mpsc::Sender<Event>, frame_interval: Duration) -> Self {
        Self {
            backend,
            fetcher,
            tx,
            // tokio intervals panic on a zero period
            frame_interval: frame_interval.max(Duration::from_millis(1)),
            generation: Generation::default(),
            session: None,
            frame_task: None,
        }
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    pub fn state(&self) -> PlaybackState {
        self.session
            .as_ref()
            .map_or(PlaybackState::Idle, |s| s.state)
    }

    /// Backend position in seconds; 0 when idle.
    pub fn position(&self) -> f64 {
        if self.session.is_some() {
            self.backend.position()
        } else {
            0.0
        }
    }

    #[cfg(test)]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Supersede whatever is playing and start loading `track`.
    pub async fn select_track(&mut self, track: TrackDescriptor) -> Result<(), PlaybackError> {
        self.cancel_frames();
        if let Some(old) = self.session.take() {
            tracing::debug!(generation = %old.generation, "superseding session");
            if let Err(e) = self.backend.stop().await {
                tracing::warn!("stop before reselect failed: {e:#}");
            }
        }

        self.generation = self.generation.next();
        let generation = self.generation;
        let mut session = PlaybackSession::new(generation, track);

        if let Some(source) = session.track.lyric_source.clone() {
            session.lyrics_pending = true;
            let fetcher = self.fetcher.clone();
            let tx = self.tx.clone();
            tokio::spawn(async move {
                let lyrics = lyrics::load_lyrics(&fetcher, &source).await;
                let _ = tx.send(Event::Lyrics { generation, lyrics }).await;
            });
        }

        tracing::info!(%generation, title = %session.track.title, "loading track");
        let uri = session.track.audio_source.clone();
        self.session = Some(session);

        if let Err(e) = self.backend.load(generation, &uri).await {
            return self.fail(generation, format!("{e:#}")).await;
        }
        Ok(())
    }

    /// Halt output and clear all transient state. No-op when idle.
    pub async fn stop(&mut self) {
        if let Some(s) = &self.session {
            tracing::info!(generation = %s.generation, "stopping");
            self.teardown().await;
        }
    }

    pub async fn on_player_event(&mut self, ev: PlayerEvent) -> Result<(), PlaybackError> {
        match ev.kind {
            PlayerEventKind::Ready => self.on_audio_ready(ev.generation).await,
            PlayerEventKind::LoadError(reason) => {
                self.on_audio_load_error(ev.generation, reason).await
            }
            PlayerEventKind::Ended => {
                self.on_audio_ended(ev.generation).await;
                Ok(())
            }
        }
    }

    /// Loading -> Playing
    pub async fn on_audio_ready(&mut self, generation: Generation) -> Result<(), PlaybackError> {
        let Some(session) = self.current_mut(generation) else {
            tracing::debug!(%generation, "stale ready ignored");
            return Ok(());
        };
        if session.state != PlaybackState::Loading {
            return Ok(());
        }

        if let Err(e) = self.backend.play().await {
            return self.fail(generation, format!("{e:#}")).await;
        }
        if let Some(session) = self.session.as_mut() {
            session.state = PlaybackState::Playing;
        }
        tracing::info!(%generation, "playing");
        self.refresh_index();
        self.start_frames(generation);
        Ok(())
    }

    /// Loading (or Playing) -> Idle, reporting the failure.
    pub async fn on_audio_load_error(
        &mut self,
        generation: Generation,
        reason: String,
    ) -> Result<(), PlaybackError> {
        if self.current_mut(generation).is_none() {
            tracing::debug!(%generation, "stale load error ignored: {reason}");
            return Ok(());
        }
        self.fail(generation, reason).await
    }

    /// Playing -> Idle at end of track.
    pub async fn on_audio_ended(&mut self, generation: Generation) {
        if self.current_mut(generation).is_none() {
            tracing::debug!(%generation, "stale end ignored");
            return;
        }
        tracing::info!(%generation, "track ended");
        self.teardown().await;
    }

    pub fn on_lyrics(&mut self, generation: Generation, lyrics: ParsedLyrics) {
        let Some(session) = self.current_mut(generation) else {
            tracing::debug!(%generation, "stale lyrics ignored");
            return;
        };
        session.lyric_lines = lyrics.lines;
        session.lyrics_pending = false;
        session.active_lyric_index = None;
        self.refresh_index();
    }

    /// Per-frame highlight update. Returns true when the active line moved.
    pub fn on_frame(&mut self, generation: Generation) -> bool {
        if self.current_mut(generation).is_none() {
            return false;
        }
        self.refresh_index()
    }

    pub async fn set_volume(&self, volume_0_100: u8) -> anyhow::Result<()> {
        self.backend.set_volume(volume_0_100).await
    }

    fn current_mut(&mut self, generation: Generation) -> Option<&mut PlaybackSession> {
        self.session
            .as_mut()
            .filter(|s| s.generation == generation)
    }

    fn refresh_index(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !session.is_playing() || session.lyric_lines.is_empty() {
            return false;
        }
        let next = lyrics::timeline::active_index(&session.lyric_lines, self.backend.position());
        let changed = next != session.active_lyric_index;
        session.active_lyric_index = next;
        changed
    }

    fn start_frames(&mut self, generation: Generation) {
        self.cancel_frames();
        let tx = self.tx.clone();
        let period = self.frame_interval;
        self.frame_task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                // A full queue just drops this frame.
                if let Err(mpsc::error::TrySendError::Closed(_)) =
                    tx.try_send(Event::Frame { generation })
                {
                    break;
                }
            }
        }));
    }

    fn cancel_frames(&mut self) {
        if let Some(task) = self.frame_task.take() {
            task.abort();
        }
    }

    async fn teardown(&mut self) {
        self.cancel_frames();
        self.session = None;
        if let Err(e) = self.backend.stop().await {
            tracing::warn!("backend stop failed: {e:#}");
        }
    }

    async fn fail(&mut self, generation: Generation, reason: String) -> Result<(), PlaybackError> {
        let uri = self
            .session
            .as_ref()
            .map(|s| s.track.audio_source.clone())
            .unwrap_or_default();
        let err = PlaybackError::audio_load(uri, reason);
        tracing::error!(%generation, "{err}");
        self.teardown().await;
        Err(err)
    }

    #[cfg(test)]
    fn has_frame_task(&self) -> bool {
        self.frame_task.is_some()
    }
}

impl<B: AudioBackend, F: LyricFetcher> Drop for PlaybackController<B, F> {
    fn drop(&mut self) {
        self.cancel_frames();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Load(Generation, String),
        Play,
        Stop,
        Volume(u8),
    }

    #[derive(Clone, Default)]
    struct FakeBackend {
        calls: Arc<Mutex<Vec<Call>>>,
        position: Arc<Mutex<f64>>,
        fail_load: bool,
    }

    impl FakeBackend {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn seek(&self, secs: f64) {
            *self.position.lock().unwrap() = secs;
        }
    }

    impl AudioBackend for FakeBackend {
        async fn load(&self, generation: Generation, uri: &str) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push(Call::Load(generation, uri.to_string()));
            if self.fail_load {
                anyhow::bail!("no such device");
            }
            Ok(())
        }

        async fn play(&self) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push(Call::Play);
            Ok(())
        }

        async fn stop(&self) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push(Call::Stop);
            Ok(())
        }

        async fn set_volume(&self, volume_0_100: u8) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push(Call::Volume(volume_0_100));
            Ok(())
        }

        fn position(&self) -> f64 {
            *self.position.lock().unwrap()
        }
    }

    /// Serves canned subtitle text; unknown sources fail, "hang" never resolves.
    #[derive(Clone, Default)]
    struct FakeFetcher {
        files: Arc<HashMap<String, String>>,
    }

    impl FakeFetcher {
        fn with(files: &[(&str, &str)]) -> Self {
            Self {
                files: Arc::new(
                    files
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                ),
            }
        }
    }

    impl LyricFetcher for FakeFetcher {
        async fn fetch(&self, source: &str) -> Result<String, PlaybackError> {
            if source == "hang" {
                std::future::pending::<()>().await;
            }
            self.files
                .get(source)
                .cloned()
                .ok_or_else(|| PlaybackError::lyric_fetch(source, "not found"))
        }
    }

    const HELLO_WORLD: &str = "[00:01.50]Hello\n[00:03.00]World\n";

    type Controller = PlaybackController<FakeBackend, FakeFetcher>;

    fn controller(backend: FakeBackend, fetcher: FakeFetcher) -> (Controller, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(64);
        let c = PlaybackController::new(backend, fetcher, tx, Duration::from_millis(5));
        (c, rx)
    }

    async fn next_lyrics(rx: &mut mpsc::Receiver<Event>) -> (Generation, ParsedLyrics) {
        loop {
            match rx.recv().await {
                Some(Event::Lyrics { generation, lyrics }) => return (generation, lyrics),
                Some(_) => continue,
                None => panic!("channel closed"),
            }
        }
    }

    fn drain(rx: &mut mpsc::Receiver<Event>) {
        while rx.try_recv().is_ok() {}
    }

    fn with_lyrics() -> TrackDescriptor {
        TrackDescriptor::new("Hello World", "hello.mp3").with_lyrics("hello.lrc")
    }

    #[tokio::test]
    async fn test_track_without_lyrics_plays() {
        let backend = FakeBackend::default();
        let (mut c, _rx) = controller(backend.clone(), FakeFetcher::default());

        c.select_track(TrackDescriptor::new("Instrumental", "inst.mp3")).await.unwrap();
        assert_eq!(c.state(), PlaybackState::Loading);
        let g = c.generation();
        assert_eq!(backend.calls(), vec![Call::Load(g, "inst.mp3".into())]);

        c.on_audio_ready(g).await.unwrap();
        assert_eq!(c.state(), PlaybackState::Playing);
        assert!(c.has_frame_task());

        backend.seek(10.0);
        assert!(!c.on_frame(g));
        let s = c.session().unwrap();
        assert!(s.lyric_lines.is_empty());
        assert!(!s.lyrics_pending);
        assert_eq!(s.active_lyric_index, None);
        assert_eq!(backend.calls().last(), Some(&Call::Play));
    }

    #[tokio::test]
    async fn test_frame_updates_follow_position() {
        let backend = FakeBackend::default();
        let fetcher = FakeFetcher::with(&[("hello.lrc", HELLO_WORLD)]);
        let (mut c, mut rx) = controller(backend.clone(), fetcher);

        c.select_track(with_lyrics()).await.unwrap();
        assert!(c.session().unwrap().lyrics_pending);
        let (g, lyrics) = next_lyrics(&mut rx).await;
        c.on_lyrics(g, lyrics);
        c.on_audio_ready(g).await.unwrap();

        backend.seek(0.5);
        c.on_frame(g);
        assert_eq!(c.session().unwrap().active_lyric_index, None);

        backend.seek(2.0);
        assert!(c.on_frame(g));
        assert_eq!(c.session().unwrap().active_line().unwrap().text, "Hello");

        backend.seek(3.5);
        assert!(c.on_frame(g));
        assert_eq!(c.session().unwrap().active_lyric_index, Some(1));

        // unchanged position, unchanged index
        assert!(!c.on_frame(g));
    }

    #[tokio::test]
    async fn test_frame_task_posts_ticks() {
        let (mut c, mut rx) = controller(FakeBackend::default(), FakeFetcher::default());
        c.select_track(TrackDescriptor::new("a", "a.mp3")).await.unwrap();
        let g = c.generation();
        c.on_audio_ready(g).await.unwrap();

        match rx.recv().await {
            Some(Event::Frame { generation }) => assert_eq!(generation, g),
            other => panic!("expected frame, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_lyrics_before_ready_have_no_active_line() {
        let backend = FakeBackend::default();
        let fetcher = FakeFetcher::with(&[("hello.lrc", HELLO_WORLD)]);
        let (mut c, mut rx) = controller(backend.clone(), fetcher);

        c.select_track(with_lyrics()).await.unwrap();
        let g = c.generation();
        backend.seek(2.0);
        assert!(!c.on_frame(g));
        assert_eq!(c.session().unwrap().active_lyric_index, None);

        let (g2, lyrics) = next_lyrics(&mut rx).await;
        assert_eq!(g, g2);
        c.on_lyrics(g, lyrics);
        assert_eq!(c.session().unwrap().lyric_lines.len(), 2);
        assert_eq!(c.session().unwrap().active_lyric_index, None);

        c.on_audio_ready(g).await.unwrap();
        assert_eq!(c.session().unwrap().active_lyric_index, Some(0));
    }

    #[tokio::test]
    async fn test_lyrics_arriving_while_playing_apply_immediately() {
        let backend = FakeBackend::default();
        let fetcher = FakeFetcher::with(&[("hello.lrc", HELLO_WORLD)]);
        let (mut c, mut rx) = controller(backend.clone(), fetcher);

        c.select_track(with_lyrics()).await.unwrap();
        let g = c.generation();
        c.on_audio_ready(g).await.unwrap();
        backend.seek(3.2);

        let (_, lyrics) = next_lyrics(&mut rx).await;
        c.on_lyrics(g, lyrics);
        assert_eq!(c.session().unwrap().active_lyric_index, Some(1));
    }

    #[tokio::test]
    async fn test_stop_resets_session() {
        let backend = FakeBackend::default();
        let fetcher = FakeFetcher::with(&[("hello.lrc", HELLO_WORLD)]);
        let (mut c, mut rx) = controller(backend.clone(), fetcher);

        c.select_track(with_lyrics()).await.unwrap();
        let (g, lyrics) = next_lyrics(&mut rx).await;
        c.on_lyrics(g, lyrics);
        c.on_audio_ready(g).await.unwrap();
        backend.seek(2.0);
        c.on_frame(g);

        c.stop().await;
        assert_eq!(c.state(), PlaybackState::Idle);
        assert!(c.session().is_none());
        assert!(!c.has_frame_task());
        assert_eq!(backend.calls().last(), Some(&Call::Stop));

        // no more ticks once stopped
        drain(&mut rx);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(rx.try_recv().is_err());

        // late callbacks for the stopped session change nothing
        assert!(!c.on_frame(g));
        c.on_audio_ready(g).await.unwrap();
        assert_eq!(c.state(), PlaybackState::Idle);
    }

    #[tokio::test]
    async fn test_track_end_returns_to_idle() {
        let backend = FakeBackend::default();
        let fetcher = FakeFetcher::with(&[("hello.lrc", HELLO_WORLD)]);
        let (mut c, mut rx) = controller(backend.clone(), fetcher);

        c.select_track(with_lyrics()).await.unwrap();
        let (g, lyrics) = next_lyrics(&mut rx).await;
        c.on_lyrics(g, lyrics);
        c.on_audio_ready(g).await.unwrap();
        backend.seek(4.0);
        c.on_frame(g);
        assert_eq!(c.session().unwrap().active_lyric_index, Some(1));

        c.on_player_event(PlayerEvent { generation: g, kind: PlayerEventKind::Ended })
            .await
            .unwrap();
        assert_eq!(c.state(), PlaybackState::Idle);
        assert!(c.session().is_none());
        assert!(!c.has_frame_task());
        assert_eq!(backend.calls().last(), Some(&Call::Stop));

        // a late frame for the ended track neither revives nor re-indexes it
        assert!(!c.on_frame(g));
        assert!(c.session().is_none());

        // the next selection starts with no highlighted cue
        c.select_track(with_lyrics()).await.unwrap();
        let s = c.session().unwrap();
        assert_eq!(s.active_lyric_index, None);
        assert!(s.lyric_lines.is_empty());
    }

    #[tokio::test]
    async fn test_stop_while_loading_and_when_idle() {
        let backend = FakeBackend::default();
        let (mut c, _rx) = controller(backend.clone(), FakeFetcher::default());

        c.stop().await;
        assert!(backend.calls().is_empty());

        c.select_track(TrackDescriptor::new("a", "a.mp3")).await.unwrap();
        c.stop().await;
        assert_eq!(c.state(), PlaybackState::Idle);
        assert_eq!(backend.calls().last(), Some(&Call::Stop));
    }

    #[tokio::test]
    async fn test_superseded_callbacks_do_not_touch_new_session() {
        let backend = FakeBackend::default();
        let fetcher = FakeFetcher::with(&[
            ("a.lrc", "[00:00.10]from a"),
            ("b.lrc", "[00:00.10]from b\n[00:05.00]b two"),
        ]);
        let (mut c, mut rx) = controller(backend.clone(), fetcher);

        c.select_track(TrackDescriptor::new("A", "a.mp3").with_lyrics("a.lrc"))
            .await
            .unwrap();
        let ga = c.generation();
        c.on_audio_ready(ga).await.unwrap();

        c.select_track(TrackDescriptor::new("B", "b.mp3").with_lyrics("b.lrc"))
            .await
            .unwrap();
        let gb = c.generation();
        assert!(gb > ga);
        assert_eq!(c.state(), PlaybackState::Loading);

        // A's leftovers
        c.on_player_event(PlayerEvent { generation: ga, kind: PlayerEventKind::Ready })
            .await
            .unwrap();
        assert_eq!(c.state(), PlaybackState::Loading);
        c.on_player_event(PlayerEvent {
            generation: ga,
            kind: PlayerEventKind::LoadError("late".into()),
        })
        .await
        .unwrap();
        c.on_player_event(PlayerEvent { generation: ga, kind: PlayerEventKind::Ended })
            .await
            .unwrap();
        assert!(!c.on_frame(ga));
        assert_eq!(c.session().unwrap().generation, gb);
        assert_eq!(c.state(), PlaybackState::Loading);

        // lyric results may arrive in either order; only B's stick
        for _ in 0..2 {
            let (g, lyrics) = next_lyrics(&mut rx).await;
            c.on_lyrics(g, lyrics);
        }
        let s = c.session().unwrap();
        assert_eq!(s.track.title, "B");
        assert_eq!(s.lyric_lines.len(), 2);
        assert_eq!(s.lyric_lines[0].text, "from b");

        // A was released before B was loaded
        let calls = backend.calls();
        let stop_at = calls.iter().rposition(|c| *c == Call::Stop).unwrap();
        let load_b = calls
            .iter()
            .position(|c| *c == Call::Load(gb, "b.mp3".into()))
            .unwrap();
        assert!(stop_at < load_b);
    }

    #[tokio::test]
    async fn test_lyric_fetch_failure_degrades_to_no_lyrics() {
        let backend = FakeBackend::default();
        let (mut c, mut rx) = controller(backend.clone(), FakeFetcher::default());

        c.select_track(TrackDescriptor::new("a", "a.mp3").with_lyrics("missing.lrc"))
            .await
            .unwrap();
        let (g, lyrics) = next_lyrics(&mut rx).await;
        assert!(lyrics.is_empty());
        c.on_lyrics(g, lyrics);
        c.on_audio_ready(g).await.unwrap();

        let s = c.session().unwrap();
        assert!(s.is_playing());
        assert!(s.lyric_lines.is_empty());
        assert!(!s.lyrics_pending);
    }

    #[tokio::test]
    async fn test_hanging_fetch_does_not_block_playback() {
        let (mut c, _rx) = controller(FakeBackend::default(), FakeFetcher::default());
        c.select_track(TrackDescriptor::new("a", "a.mp3").with_lyrics("hang"))
            .await
            .unwrap();
        let g = c.generation();
        c.on_audio_ready(g).await.unwrap();
        let s = c.session().unwrap();
        assert!(s.is_playing());
        assert!(s.lyrics_pending);
        assert_eq!(s.active_lyric_index, None);
    }

    #[tokio::test]
    async fn test_audio_load_error_returns_to_idle() {
        let backend = FakeBackend::default();
        let (mut c, _rx) = controller(backend.clone(), FakeFetcher::default());

        c.select_track(TrackDescriptor::new("bad", "bad.mp3")).await.unwrap();
        let g = c.generation();
        let err = c
            .on_player_event(PlayerEvent {
                generation: g,
                kind: PlayerEventKind::LoadError("unrecognized file format".into()),
            })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            PlaybackError::audio_load("bad.mp3", "unrecognized file format")
        );
        assert_eq!(c.state(), PlaybackState::Idle);
        assert!(!backend.calls().contains(&Call::Play));

        // another track can still be selected
        c.select_track(TrackDescriptor::new("good", "good.mp3")).await.unwrap();
        c.on_audio_ready(c.generation()).await.unwrap();
        assert_eq!(c.state(), PlaybackState::Playing);
    }

    #[tokio::test]
    async fn test_backend_rejecting_load_is_audio_load_failure() {
        let backend = FakeBackend {
            fail_load: true,
            ..Default::default()
        };
        let (mut c, _rx) = controller(backend, FakeFetcher::default());

        let err = c
            .select_track(TrackDescriptor::new("a", "a.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, PlaybackError::AudioLoad { ref uri, .. } if uri == "a.mp3"));
        assert_eq!(c.state(), PlaybackState::Idle);
    }

    #[tokio::test]
    async fn test_missing_backend_fails_load() {
        let (tx, _rx) = mpsc::channel(8);
        let mut c = PlaybackController::new(
            None::<FakeBackend>,
            FakeFetcher::default(),
            tx,
            Duration::from_millis(5),
        );
        assert!(c.select_track(TrackDescriptor::new("a", "a.mp3")).await.is_err());
        assert_eq!(c.state(), PlaybackState::Idle);
    }

    #[tokio::test]
    async fn test_volume_goes_to_backend() {
        let backend = FakeBackend::default();
        let (c, _rx) = controller(backend.clone(), FakeFetcher::default());
        c.set_volume(55).await.unwrap();
        assert_eq!(backend.calls(), vec![Call::Volume(55)]);
    }
}
