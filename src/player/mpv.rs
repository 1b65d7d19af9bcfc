use super::{AudioBackend, Generation};
use crate::app::events::{Event, PlayerEvent, PlayerEventKind};
use anyhow::Context;
use serde_json::json;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::UnixStream,
    process::{Child, Command},
    sync::mpsc,
};

const MAX_ORPHANS: usize = 16;

/// Routing table from mpv's identifiers back to our generations.
///
/// `loadfile` replies carry the request id we chose plus the new
/// `playlist_entry_id`; file events carry only the entry id.
#[derive(Debug, Default)]
struct EntryMap {
    pending: HashMap<u64, Generation>,
    entries: HashMap<i64, Generation>,
    // file events that arrived before the loadfile reply
    orphans: Vec<(i64, PlayerEventKind)>,
}

#[derive(Debug, Default)]
struct Shared {
    position_bits: AtomicU64,
    routes: Mutex<EntryMap>,
}

impl Shared {
    fn set_position(&self, seconds: f64) {
        self.position_bits.store(seconds.to_bits(), Ordering::Relaxed);
    }

    fn position(&self) -> f64 {
        f64::from_bits(self.position_bits.load(Ordering::Relaxed))
    }

    fn routes(&self) -> std::sync::MutexGuard<'_, EntryMap> {
        // A poisoned map is still structurally valid.
        self.routes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Debug)]
pub struct MpvHandle {
    child: Child,
    socket_path: PathBuf,
    writer: tokio::sync::Mutex<tokio::io::WriteHalf<UnixStream>>,
    request_id: AtomicU64,
    shared: Arc<Shared>,
}

impl MpvHandle {
    pub async fn spawn(
        event_tx: mpsc::Sender<Event>,
        audio_device: Option<&str>,
        log_file: Option<&std::path::Path>,
    ) -> anyhow::Result<Self> {
        let socket_path =
            std::env::temp_dir().join(format!("singalong-mpv-{}.sock", std::process::id()));
        let _ = std::fs::remove_file(&socket_path);

        let mut cmd = Command::new("mpv");
        cmd.args([
            "--no-video",
            "--idle=yes",
            "--input-terminal=no",
            "--really-quiet",
            "--keep-open=no",
        ]);
        if let Some(dev) = audio_device {
            cmd.arg(format!("--audio-device={dev}"));
        }
        if let Some(p) = log_file {
            cmd.arg(format!("--log-file={}", p.display()));
        }
        let child = cmd
            .arg(format!("--input-ipc-server={}", socket_path.display()))
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
            .context("spawn mpv")?;

        // mpv creates the socket shortly after starting.
        let stream = connect_with_retry(&socket_path).await?;
        let (reader, writer) = tokio::io::split(stream);

        let shared = Arc::new(Shared::default());
        tokio::spawn(read_events_loop(reader, event_tx, shared.clone()));

        let this = Self {
            child,
            socket_path,
            writer: tokio::sync::Mutex::new(writer),
            request_id: AtomicU64::new(1),
            shared,
        };

        this.command(json!({"command":["request_log_messages", "warn"]}))
            .await?;
        this.command(json!({"command":["observe_property", 1, "time-pos"]}))
            .await?;

        tracing::info!(socket = %this.socket_path.display(), "mpv backend ready");
        Ok(this)
    }

    fn next_request_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn command(&self, v: serde_json::Value) -> anyhow::Result<()> {
        let id = self.next_request_id();
        self.command_with_id(v, id).await
    }

    async fn command_with_id(&self, mut v: serde_json::Value, id: u64) -> anyhow::Result<()> {
        // Tag requests so structured errors come back on the IPC stream.
        if let serde_json::Value::Object(ref mut o) = v {
            o.insert("request_id".to_string(), serde_json::Value::from(id));
        }
        let mut w = self.writer.lock().await;
        let mut line = serde_json::to_vec(&v).context("encode mpv json")?;
        line.push(b'\n');
        w.write_all(&line).await.context("write mpv ipc")?;
        w.flush().await.context("flush mpv ipc")?;
        Ok(())
    }
}

impl AudioBackend for MpvHandle {
    async fn load(&self, generation: Generation, uri: &str) -> anyhow::Result<()> {
        self.shared.set_position(0.0);
        self.command(json!({"command":["set_property", "pause", true]}))
            .await?;

        let id = self.next_request_id();
        self.shared.routes().pending.insert(id, generation);
        if let Err(e) = self
            .command_with_id(json!({"command":["loadfile", uri, "replace"]}), id)
            .await
        {
            self.shared.routes().pending.remove(&id);
            return Err(e);
        }
        Ok(())
    }

    async fn play(&self) -> anyhow::Result<()> {
        self.command(json!({"command":["set_property", "pause", false]}))
            .await
    }

    async fn stop(&self) -> anyhow::Result<()> {
        self.shared.set_position(0.0);
        self.command(json!({"command":["stop"]})).await
    }

    async fn set_volume(&self, volume_0_100: u8) -> anyhow::Result<()> {
        self.command(json!({"command":["set_property", "volume", volume_0_100]}))
            .await
    }

    fn position(&self) -> f64 {
        self.shared.position()
    }
}

impl Drop for MpvHandle {
    fn drop(&mut self) {
        let _ = self.child.start_kill();
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

async fn connect_with_retry(path: &PathBuf) -> anyhow::Result<UnixStream> {
    let deadline = tokio::time::Instant::now() + std::time::Duration::from_secs(5);
    loop {
        match UnixStream::connect(path).await {
            Ok(s) => return Ok(s),
            Err(e) => {
                if tokio::time::Instant::now() > deadline {
                    return Err(e).with_context(|| format!("connect to mpv ipc {}", path.display()));
                }
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            }
        }
    }
}

/// What one line of mpv output means to us.
#[derive(Debug, Clone, PartialEq)]
enum MpvMessage {
    Reply {
        request_id: u64,
        error: Option<String>,
        entry_id: Option<i64>,
    },
    Entry {
        entry_id: i64,
        kind: PlayerEventKind,
    },
    Position(f64),
    Log(String),
}

async fn read_events_loop(
    reader: tokio::io::ReadHalf<UnixStream>,
    event_tx: mpsc::Sender<Event>,
    shared: Arc<Shared>,
) {
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let Ok(v) = serde_json::from_str::<serde_json::Value>(&line) else {
            continue;
        };
        let Some(msg) = map_mpv_message(&v) else {
            continue;
        };
        for ev in route(&shared, msg) {
            if event_tx.send(Event::Player(ev)).await.is_err() {
                return;
            }
        }
    }
    tracing::warn!("mpv ipc stream closed");
}

/// Apply one message to the routing table and return the events it releases.
fn route(shared: &Shared, msg: MpvMessage) -> Vec<PlayerEvent> {
    match msg {
        MpvMessage::Position(seconds) => {
            shared.set_position(seconds);
            Vec::new()
        }
        MpvMessage::Log(text) => {
            tracing::warn!("{text}");
            Vec::new()
        }
        MpvMessage::Reply {
            request_id,
            error,
            entry_id,
        } => {
            let mut routes = shared.routes();
            let Some(generation) = routes.pending.remove(&request_id) else {
                if let Some(err) = error {
                    tracing::warn!(request_id, "mpv ipc error: {err}");
                }
                return Vec::new();
            };
            if let Some(err) = error {
                return vec![PlayerEvent {
                    generation,
                    kind: PlayerEventKind::LoadError(format!("mpv loadfile: {err}")),
                }];
            }
            let Some(entry_id) = entry_id else {
                return Vec::new();
            };
            // older entries were replaced and can only produce stale events
            routes.entries.retain(|_, g| *g >= generation);
            routes.entries.insert(entry_id, generation);
            let (ready, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut routes.orphans)
                .into_iter()
                .partition(|(id, _)| *id == entry_id);
            routes.orphans = rest;
            ready
                .into_iter()
                .map(|(_, kind)| PlayerEvent { generation, kind })
                .collect()
        }
        MpvMessage::Entry { entry_id, kind } => {
            let mut routes = shared.routes();
            match routes.entries.get(&entry_id).copied() {
                Some(generation) => {
                    if !matches!(kind, PlayerEventKind::Ready) {
                        routes.entries.remove(&entry_id);
                    }
                    vec![PlayerEvent { generation, kind }]
                }
                None => {
                    if routes.orphans.len() >= MAX_ORPHANS {
                        routes.orphans.remove(0);
                    }
                    routes.orphans.push((entry_id, kind));
                    Vec::new()
                }
            }
        }
    }
}

fn map_mpv_message(v: &serde_json::Value) -> Option<MpvMessage> {
    // mpv command replies: {"request_id":..., "error":"...", "data":...}
    if let Some(request_id) = v.get("request_id").and_then(|x| x.as_u64())
        && v.get("event").is_none()
    {
        let error = v
            .get("error")
            .and_then(|e| e.as_str())
            .filter(|e| *e != "success")
            .map(str::to_string);
        let entry_id = v
            .get("data")
            .and_then(|d| d.get("playlist_entry_id"))
            .and_then(|x| x.as_i64());
        return Some(MpvMessage::Reply {
            request_id,
            error,
            entry_id,
        });
    }

    match v.get("event")?.as_str()? {
        "property-change" => match v.get("name")?.as_str()? {
            "time-pos" => Some(MpvMessage::Position(
                v.get("data").and_then(|d| d.as_f64()).unwrap_or(0.0),
            )),
            _ => None,
        },
        "file-loaded" => Some(MpvMessage::Entry {
            entry_id: v.get("playlist_entry_id")?.as_i64()?,
            kind: PlayerEventKind::Ready,
        }),
        "end-file" => {
            let entry_id = v.get("playlist_entry_id")?.as_i64()?;
            let kind = match v.get("reason").and_then(|x| x.as_str()).unwrap_or("") {
                "eof" => PlayerEventKind::Ended,
                "error" => {
                    let err = v
                        .get("file_error")
                        .or_else(|| v.get("error"))
                        .and_then(|x| x.as_str())
                        .unwrap_or("unknown");
                    PlayerEventKind::LoadError(format!("mpv end-file error: {err}"))
                }
                // stop / quit / redirect come from our own commands
                _ => return None,
            };
            Some(MpvMessage::Entry { entry_id, kind })
        }
        "log-message" => {
            let level = v.get("level")?.as_str().unwrap_or("info");
            let text = v.get("text")?.as_str().unwrap_or("").trim();
            if (level == "warn" || level == "error") && !text.is_empty() {
                Some(MpvMessage::Log(format!("mpv {level}: {text}")))
            } else {
                None
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(raw: &str) -> Option<MpvMessage> {
        map_mpv_message(&serde_json::from_str(raw).unwrap())
    }

    #[test]
    fn test_map_replies() {
        assert_eq!(
            msg(r#"{"request_id":7,"error":"success","data":{"playlist_entry_id":3}}"#),
            Some(MpvMessage::Reply { request_id: 7, error: None, entry_id: Some(3) })
        );
        assert_eq!(
            msg(r#"{"request_id":8,"error":"invalid parameter"}"#),
            Some(MpvMessage::Reply {
                request_id: 8,
                error: Some("invalid parameter".into()),
                entry_id: None
            })
        );
    }

    #[test]
    fn test_map_file_events() {
        assert_eq!(
            msg(r#"{"event":"file-loaded","playlist_entry_id":3}"#),
            Some(MpvMessage::Entry { entry_id: 3, kind: PlayerEventKind::Ready })
        );
        assert_eq!(
            msg(r#"{"event":"end-file","reason":"eof","playlist_entry_id":3}"#),
            Some(MpvMessage::Entry { entry_id: 3, kind: PlayerEventKind::Ended })
        );
        assert!(matches!(
            msg(r#"{"event":"end-file","reason":"error","file_error":"unrecognized file format","playlist_entry_id":4}"#),
            Some(MpvMessage::Entry { entry_id: 4, kind: PlayerEventKind::LoadError(e) }) if e.contains("unrecognized")
        ));
        assert_eq!(msg(r#"{"event":"end-file","reason":"stop","playlist_entry_id":3}"#), None);
    }

    #[test]
    fn test_map_position() {
        assert_eq!(
            msg(r#"{"event":"property-change","id":1,"name":"time-pos","data":12.5}"#),
            Some(MpvMessage::Position(12.5))
        );
        assert_eq!(
            msg(r#"{"event":"property-change","id":1,"name":"time-pos","data":null}"#),
            Some(MpvMessage::Position(0.0))
        );
    }

    #[test]
    fn test_route_tags_events_with_generation() {
        let shared = Shared::default();
        shared.routes().pending.insert(10, Generation(1));

        let out = route(
            &shared,
            MpvMessage::Reply { request_id: 10, error: None, entry_id: Some(5) },
        );
        assert!(out.is_empty());

        let out = route(&shared, MpvMessage::Entry { entry_id: 5, kind: PlayerEventKind::Ready });
        assert_eq!(out, vec![PlayerEvent { generation: Generation(1), kind: PlayerEventKind::Ready }]);

        let out = route(&shared, MpvMessage::Entry { entry_id: 5, kind: PlayerEventKind::Ended });
        assert_eq!(out[0].generation, Generation(1));
        assert!(shared.routes().entries.is_empty());
    }

    #[test]
    fn test_route_holds_early_events_until_reply() {
        let shared = Shared::default();
        shared.routes().pending.insert(11, Generation(2));

        let out = route(&shared, MpvMessage::Entry { entry_id: 6, kind: PlayerEventKind::Ready });
        assert!(out.is_empty());

        let out = route(
            &shared,
            MpvMessage::Reply { request_id: 11, error: None, entry_id: Some(6) },
        );
        assert_eq!(out, vec![PlayerEvent { generation: Generation(2), kind: PlayerEventKind::Ready }]);
        assert!(shared.routes().orphans.is_empty());
    }

    #[test]
    fn test_route_loadfile_error() {
        let shared = Shared::default();
        shared.routes().pending.insert(12, Generation(3));
        let out = route(
            &shared,
            MpvMessage::Reply { request_id: 12, error: Some("loading failed".into()), entry_id: None },
        );
        assert!(matches!(
            &out[..],
            [PlayerEvent { generation: Generation(3), kind: PlayerEventKind::LoadError(_) }]
        ));
    }

    #[test]
    fn test_position_cell() {
        let shared = Shared::default();
        assert_eq!(shared.position(), 0.0);
        route(&shared, MpvMessage::Position(42.25));
        assert_eq!(shared.position(), 42.25);
    }
}
