//! A play session: the cube world, the viewer, and the frame loop that ties them together.

use crate::{
    settings::Settings,
    frame_clock::FrameClock,
    viewer::{
        Viewer,
        MoveKeys,
    },
    input::InputEvent,
    hud::{
        FpsCounter,
        position_text,
    },
};
use cube_physics::world::{
    CubeWorld,
    StepReport,
    PickUpOrRelease,
};
use std::time::Instant;
use vek::*;


/// A play session.
///
/// Everything happens synchronously inside `frame`, which should be called once per display
/// refresh. While not engaged (pointer not captured) frames don't simulate anything.
#[derive(Debug)]
pub struct Session {
    pub world: CubeWorld,
    pub viewer: Viewer,
    pub keys: MoveKeys,
    engaged: bool,
    clock: FrameClock,
    fps: FpsCounter,
    position_text: String,
    last_fps: Option<u32>,
}

/// What happened during a `Session::frame` call.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameReport {
    /// Cube simulation step, if the frame was live.
    pub step: Option<StepReport>,
    /// Newly measured frame rate, if one was measured this frame.
    pub fps: Option<u32>,
}

impl Session {
    /// Start a session, scattering the configured number of cubes around the field.
    pub fn new(settings: &Settings, now: Instant) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        info!(%seed, "starting session");
        let mut world = CubeWorld::new(
            settings.physics.clone(),
            settings.interaction.clone(),
            seed,
        );
        world.spawn_scattered(
            settings.initial_cubes,
            Vec3::from(settings.scatter_min),
            Vec3::from(settings.scatter_max),
        );
        let viewer = Viewer::new(settings.eye_height);
        Session {
            world,
            position_text: position_text(viewer.pos),
            viewer,
            keys: MoveKeys::default(),
            engaged: false,
            clock: FrameClock::new(now),
            fps: FpsCounter::new(now),
            last_fps: None,
        }
    }

    /// Whether frames are currently live.
    pub fn engaged(&self) -> bool {
        self.engaged
    }

    /// Current viewer position readout.
    pub fn position_text(&self) -> &str {
        &self.position_text
    }

    /// Most recently measured frame rate.
    pub fn fps(&self) -> Option<u32> {
        self.last_fps
    }

    /// Process an input event.
    pub fn on_input(&mut self, event: InputEvent) {
        trace!(?event, "input event");
        match event {
            InputEvent::SpawnAndThrow => {
                if !self.engaged {
                    self.set_engaged(true);
                } else {
                    self.world.spawn_and_throw(&self.viewer.viewpoint());
                }
            }
            InputEvent::PickUpOrRelease => {
                if !self.engaged {
                    return;
                }
                match self.world.pick_up_or_release(&self.viewer.viewpoint()) {
                    PickUpOrRelease::Nothing => trace!("nothing to pick up"),
                    outcome => debug!(?outcome, "pick up or release"),
                }
            }
            InputEvent::Move(dir, pressed) => self.keys.set(dir, pressed),
            InputEvent::Jump => self.viewer.jump(),
            InputEvent::Look(amount) => {
                if self.engaged {
                    self.viewer.on_look(amount);
                }
            }
            InputEvent::SetEngaged(engaged) => self.set_engaged(engaged),
        }
    }

    fn set_engaged(&mut self, engaged: bool) {
        if engaged != self.engaged {
            info!(%engaged, "engagement changed");
        }
        self.engaged = engaged;
    }

    /// Do a frame at time `now`.
    pub fn frame(&mut self, now: Instant) -> FrameReport {
        let step = self.clock
            .frame(now, self.engaged)
            .map(|dt| {
                self.viewer.update(&self.keys, dt);
                let report = self.world.step(dt, &self.viewer.viewpoint());
                self.position_text = position_text(self.viewer.pos);
                report
            });

        let fps = self.fps.frame(now);
        if fps.is_some() {
            self.last_fps = fps;
        }

        FrameReport { step, fps }
    }
}


#[test]
fn test_first_click_engages_instead_of_throwing() {
    use cube_physics::body::BodyId;

    let t0 = Instant::now();
    let settings = Settings {
        initial_cubes: 0,
        seed: Some(5),
        ..Settings::default()
    };
    let mut session = Session::new(&settings, t0);
    assert!(!session.engaged());

    session.on_input(InputEvent::SpawnAndThrow);
    assert!(session.engaged());
    assert!(session.world.registry.is_empty());

    session.on_input(InputEvent::SpawnAndThrow);
    assert_eq!(session.world.registry.len(), 1);
    let body = session.world.registry.get(BodyId(0));
    assert!((body.pos - Vec3::new(0.0, 2.0, -3.0)).magnitude() < 1e-5);
    assert!((body.vel - Vec3::new(0.0, 0.0, -5.0)).magnitude() < 1e-5);
}

#[test]
fn test_paused_frames_simulate_nothing() {
    use crate::demo::FRAME;
    use std::time::Duration;
    use cube_physics::body::BodyId;

    let t0 = Instant::now();
    let settings = Settings {
        initial_cubes: 0,
        seed: Some(5),
        ..Settings::default()
    };
    let mut session = Session::new(&settings, t0);
    session.world.spawn(Vec3::new(0.0, 10.0, 0.0));

    let mut t = t0;
    for _ in 0..30 {
        t += FRAME;
        assert_eq!(session.frame(t).step, None);
    }
    assert_eq!(session.world.registry.get(BodyId(0)).pos.y, 10.0);

    // pick up is ignored while paused
    session.on_input(InputEvent::PickUpOrRelease);
    assert_eq!(session.world.registry.held(), None);

    // a long pause doesn't become one huge step
    session.on_input(InputEvent::SetEngaged(true));
    t += Duration::from_secs(30);
    let step = session.frame(t).step.unwrap();
    assert!(step.dt <= 0.1);
    t += FRAME;
    let step = session.frame(t).step.unwrap();
    assert!((step.dt - FRAME.as_secs_f32()).abs() < 1e-4);
    assert!(session.world.registry.get(BodyId(0)).pos.y > 9.5);
}

#[test]
fn test_grab_carry_and_throw() {
    use crate::demo::FRAME;

    let t0 = Instant::now();
    let settings = Settings {
        initial_cubes: 0,
        seed: Some(5),
        ..Settings::default()
    };
    let mut session = Session::new(&settings, t0);
    let id = session.world.spawn(Vec3::new(0.0, 2.0, -6.0));
    session.on_input(InputEvent::SetEngaged(true));

    session.on_input(InputEvent::PickUpOrRelease);
    assert_eq!(session.world.registry.held(), Some(id));

    let mut t = t0;
    for _ in 0..120 {
        t += FRAME;
        session.frame(t);
    }
    let pos = session.world.registry.get(id).pos;
    assert!((pos - Vec3::new(0.0, 2.0, -3.0)).magnitude() < 0.01);

    session.on_input(InputEvent::PickUpOrRelease);
    assert_eq!(session.world.registry.held(), None);
    t += FRAME;
    session.frame(t);
    assert!(session.world.registry.get(id).pos.z < pos.z);
}

#[test]
fn test_walking_updates_position_text() {
    use crate::demo::FRAME;
    use crate::input::MoveDir;

    let t0 = Instant::now();
    let settings = Settings {
        initial_cubes: 0,
        seed: Some(5),
        ..Settings::default()
    };
    let mut session = Session::new(&settings, t0);
    session.on_input(InputEvent::SetEngaged(true));
    session.on_input(InputEvent::Move(MoveDir::Forward, true));
    let mut t = t0;
    for _ in 0..30 {
        t += FRAME;
        session.frame(t);
    }
    session.on_input(InputEvent::Move(MoveDir::Forward, false));
    assert!(!session.keys.forward);
    assert!(session.viewer.pos.z < 0.0);
    assert_eq!(session.position_text(), position_text(session.viewer.pos));
}
