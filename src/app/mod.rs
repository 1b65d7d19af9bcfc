pub mod actions;
pub mod events;
pub mod session;
pub mod state;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::input;
use crate::lyrics::SourceFetcher;
use crate::player::mpv::MpvHandle;
use crate::tui::{self, TuiTerminal};
use actions::Action;
use events::Event;
use session::{PlaybackController, PlaybackState};
use state::{AppState, Toast};
use std::time::Duration;
use tokio::sync::mpsc;

type Controller = PlaybackController<Option<MpvHandle>, SourceFetcher>;

pub struct App {
    cfg: Config,
    config_path: std::path::PathBuf,
    catalog: Catalog,
    state: AppState,
}

impl App {
    pub fn new(cfg: Config, config_path: std::path::PathBuf) -> anyhow::Result<Self> {
        let catalog = Catalog::new(cfg.tracks.clone());
        let mut state = AppState::new(catalog.len());
        state.volume = cfg.player.volume.min(100);
        Ok(Self {
            cfg,
            config_path,
            catalog,
            state,
        })
    }

    pub async fn run(&mut self, terminal: &mut TuiTerminal) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        input::spawn_input_task(tx.clone(), self.cfg.input.mouse);

        // mpv is best-effort; without it every selection reports a load failure.
        let mpv_log = self.cfg.paths.data_dir.join("mpv.log");
        let mpv = match MpvHandle::spawn(
            tx.clone(),
            self.cfg.player.audio_device.as_deref(),
            Some(&mpv_log),
        )
        .await
        {
            Ok(h) => Some(h),
            Err(e) => {
                tracing::error!("mpv disabled: {e:#}");
                self.state.toast = Some(Toast::error(format!("mpv disabled: {e:#}")));
                None
            }
        };

        let fetcher = SourceFetcher::new(Duration::from_secs(self.cfg.lyrics.fetch_timeout_secs))?;
        let mut player = PlaybackController::new(
            mpv,
            fetcher,
            tx.clone(),
            Duration::from_millis(self.cfg.player.frame_interval_ms),
        );
        if let Err(e) = player.set_volume(self.state.volume).await {
            tracing::warn!("set volume: {e:#}");
        }

        self.state.status = format!("{} tracks", self.catalog.len());
        self.draw(terminal, &player)?;

        while let Some(ev) = rx.recv().await {
            let redraw = match ev {
                Event::Input(input_ev) => {
                    if let Some(action) = input::map_input_to_action(&self.state, input_ev) {
                        self.handle_action(action, &mut player).await;
                    }
                    true
                }
                Event::Player(pe) => {
                    if let Err(e) = player.on_player_event(pe).await {
                        self.state.toast = Some(Toast::error(e.to_string()));
                    }
                    self.update_status(&player);
                    true
                }
                Event::Lyrics { generation, lyrics } => {
                    let current = player
                        .session()
                        .is_some_and(|s| s.generation == generation);
                    if current && !lyrics.is_empty() {
                        self.state.toast = Some(Toast::success(format!("Lyrics: {} lines", lyrics.len())));
                    }
                    player.on_lyrics(generation, lyrics);
                    true
                }
                Event::Frame { generation } => {
                    self.state.tick = self.state.tick.wrapping_add(1);
                    // repaint on highlight moves; the clock and toasts refresh a few times a second
                    let moved = player.on_frame(generation);
                    moved || self.state.tick % 8 == 0
                }
            };

            if self.state.should_quit {
                break;
            }

            if redraw {
                self.draw(terminal, &player)?;
            }
        }

        player.stop().await;
        self.save_state_on_quit();

        Ok(())
    }

    async fn handle_action(&mut self, action: Action, player: &mut Controller) {
        match action {
            Action::Activate => {
                let Some(track) = self.catalog.get(self.state.tracks.selected) else {
                    return;
                };
                let track = track.resolved(self.cfg.paths.media_root.as_deref());
                self.state.playing = Some(self.state.tracks.selected);
                self.state.status = format!("Loading: {}", track.title);
                if let Err(e) = player.select_track(track).await {
                    self.state.toast = Some(Toast::error(e.to_string()));
                    self.update_status(player);
                }
            }
            Action::Stop => {
                player.stop().await;
                self.update_status(player);
            }
            Action::VolumeUp | Action::VolumeDown => {
                let v = if action == Action::VolumeUp {
                    self.state.volume.saturating_add(5).min(100)
                } else {
                    self.state.volume.saturating_sub(5)
                };
                self.state.volume = v;
                if let Err(e) = player.set_volume(v).await {
                    self.state.status = format!("mpv error: {e:#}");
                }
            }
            _ => self.reduce(action),
        }
    }

    /// Pure UI state transitions.
    fn reduce(&mut self, action: Action) {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::ListUp => self.state.tracks.select_prev(),
            Action::ListDown => self.state.tracks.select_next(),
            Action::GoTop => self.state.tracks.select_first(),
            Action::GoBottom => self.state.tracks.select_last(),
            Action::ToggleHelp => self.state.show_help = !self.state.show_help,
            Action::Resize => {}
            Action::Activate | Action::Stop | Action::VolumeUp | Action::VolumeDown => {}
        }
    }

    fn draw(&mut self, terminal: &mut TuiTerminal, player: &Controller) -> anyhow::Result<()> {
        let view = tui::View {
            catalog: &self.catalog,
            session: player.session(),
            position_secs: player.position(),
        };
        tui::draw(terminal, &mut self.state, &view)
    }

    fn update_status(&mut self, player: &Controller) {
        self.state.status = match (player.state(), player.session()) {
            (PlaybackState::Playing, Some(s)) => format!("Playing: {}", s.track.title),
            (PlaybackState::Loading, Some(s)) => format!("Loading: {}", s.track.title),
            _ => "Stopped".into(),
        };
    }

    fn save_state_on_quit(&mut self) {
        self.cfg.player.volume = self.state.volume;
        if let Err(e) = crate::config::save(&self.cfg, Some(&self.config_path)) {
            tracing::warn!("save config: {e:#}");
        }
    }
}
