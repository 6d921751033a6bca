//! Headless front end: drives a session from scripted input instead of a window.

use crate::{
    settings::{
        Settings,
        DemoSettings,
    },
    session::Session,
    input::{
        InputEvent,
        MoveDir,
    },
    viewer::Viewer,
};
use std::{
    path::{
        Path,
        PathBuf,
    },
    fs::File,
    io::BufWriter,
    sync::{
        Arc,
        atomic::{
            AtomicBool,
            Ordering,
        },
    },
    thread::sleep,
    time::{
        Instant,
        Duration,
    },
};
use serde::Serialize;
use vek::*;
use anyhow::*;


/// Frame interval of headless runs.
pub const FRAME: Duration = Duration::from_micros(16_667);


/// Scripted stand-in for a player.
#[derive(Debug, Clone)]
pub struct DemoScript(pub DemoSettings);

impl DemoScript {
    /// Input events to deliver before frame number `frame`.
    pub fn inputs(&self, frame: u64) -> Vec<InputEvent> {
        let s = &self.0;
        let mut events = Vec::new();
        if frame == 0 {
            // first click captures the pointer
            events.push(InputEvent::SpawnAndThrow);
        }
        if s.turn_per_frame != 0.0 {
            let amount = -s.turn_per_frame / Viewer::LOOK_SENSITIVITY;
            events.push(InputEvent::Look(Vec2::new(amount, 0.0)));
        }
        if s.walk_every != 0 && frame % s.walk_every == 0 {
            let walking = (frame / s.walk_every) % 2 == 1;
            events.push(InputEvent::Move(MoveDir::Forward, walking));
        }
        if s.throw_every != 0 && frame != 0 && frame % s.throw_every == 0 {
            events.push(InputEvent::SpawnAndThrow);
        }
        if s.grab_every != 0 && frame != 0 && frame % s.grab_every == 0 {
            events.push(InputEvent::PickUpOrRelease);
        }
        events
    }
}

/// How to run headlessly.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Number of frames to run. Until killed if absent.
    pub frames: Option<u64>,
    /// Pace frames against the wall clock rather than a virtual one.
    pub realtime: bool,
    /// Where to write final body transforms as JSON.
    pub dump: Option<PathBuf>,
}

/// Summary of a headless run.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub live_frames: u64,
    pub bodies: usize,
    pub floor_bounces: usize,
    pub contacts: usize,
}

/// A body as written by `--dump`.
#[derive(Debug, Clone, Serialize)]
pub struct BodyDump {
    pub id: usize,
    pub pos: [f32; 3],
    pub rot: [f32; 3],
    pub scale: [f32; 3],
    pub color: [f32; 3],
    pub held: bool,
}

/// Run a scripted session to completion.
pub fn run_headless(settings: &Settings, opts: &RunOptions) -> Result<RunSummary> {
    if opts.frames.is_none() && !opts.realtime {
        bail!("an unbounded run must be realtime");
    }

    let stop = Arc::new(AtomicBool::new(false));
    if opts.realtime {
        let stop = Arc::clone(&stop);
        let result = ctrlc::set_handler(move || {
            info!("stopping (process received kill signal)");
            stop.store(true, Ordering::Relaxed);
        });
        if let Err(e) = result {
            warn!(%e, "error setting kill signal handler");
        }
    }

    let script = DemoScript(settings.demo.clone());
    let t0 = Instant::now();
    let mut session = Session::new(settings, t0);
    let mut summary = RunSummary::default();

    let mut frame = 0;
    while opts.frames.map(|n| frame < n).unwrap_or(true) && !stop.load(Ordering::Relaxed) {
        for event in script.inputs(frame) {
            session.on_input(event);
        }

        let scheduled = t0 + FRAME * (frame as u32 + 1);
        let now =
            if opts.realtime {
                let now = Instant::now();
                if scheduled > now {
                    sleep(scheduled - now);
                }
                Instant::now()
            } else {
                scheduled
            };

        let report = session.frame(now);
        if let Some(step) = report.step {
            summary.live_frames += 1;
            summary.floor_bounces += step.floor_bounces;
            summary.contacts += step.contacts;
        }
        if let Some(fps) = report.fps {
            debug!(%fps, position = session.position_text(), bodies = session.world.registry.len(), "hud");
        }
        frame += 1;
    }

    summary.frames = frame;
    summary.bodies = session.world.registry.len();
    info!(?summary, "run finished");

    if let Some(path) = opts.dump.as_ref() {
        write_dump(&session, path)
            .with_context(|| format!("writing transforms to {}", path.display()))?;
        info!(?path, "wrote transforms");
    }
    Ok(summary)
}

/// Every body's transform and colour.
pub fn dump_bodies(session: &Session) -> Vec<BodyDump> {
    session.world.registry
        .iter()
        .map(|(id, body)| {
            let t = body.transform();
            BodyDump {
                id: id.0,
                pos: t.pos.into_array(),
                rot: t.rot.into_array(),
                scale: t.scale.into_array(),
                color: [body.color.r, body.color.g, body.color.b],
                held: body.is_held(),
            }
        })
        .collect()
}

fn write_dump(session: &Session, path: &Path) -> Result<()> {
    serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), &dump_bodies(session))?;
    Ok(())
}


#[test]
fn test_script_engages_then_throws() {
    let script = DemoScript(DemoSettings::default());
    let first = script.inputs(0);
    assert_eq!(first[0], InputEvent::SpawnAndThrow);
    assert!(script.inputs(30).contains(&InputEvent::SpawnAndThrow));
    assert!(script.inputs(90).contains(&InputEvent::PickUpOrRelease));
    assert!(script.inputs(120).contains(&InputEvent::Move(MoveDir::Forward, true)));
    assert!(script.inputs(240).contains(&InputEvent::Move(MoveDir::Forward, false)));
}

#[test]
fn test_headless_run_keeps_cubes_above_floor() {
    let settings = Settings {
        initial_cubes: 10,
        scatter_min: [-3.0, 1.0, -6.0],
        scatter_max: [3.0, 4.0, -2.0],
        seed: Some(11),
        ..Settings::default()
    };
    let summary = run_headless(&settings, &RunOptions {
        frames: Some(300),
        ..RunOptions::default()
    }).unwrap();
    assert_eq!(summary.frames, 300);
    assert_eq!(summary.live_frames, 300);
    // ten scattered, plus one thrown every 30 frames after the first
    assert_eq!(summary.bodies, 10 + 9);
    assert!(summary.floor_bounces > 0);
}

#[test]
fn test_dump_lists_every_body() {
    let settings = Settings {
        initial_cubes: 10,
        scatter_min: [-3.0, 1.0, -6.0],
        scatter_max: [3.0, 4.0, -2.0],
        seed: Some(11),
        ..Settings::default()
    };
    let session = Session::new(&settings, Instant::now());
    let dump = dump_bodies(&session);
    assert_eq!(dump.len(), 10);
    assert!(dump.iter().all(|b| b.scale == [1.0, 1.0, 1.0]));
    let json = serde_json::to_string(&dump).unwrap();
    assert!(json.contains("\"color\""));
}

#[test]
fn test_unbounded_virtual_run_is_refused() {
    assert!(run_headless(&Settings::default(), &RunOptions::default()).is_err());
}
