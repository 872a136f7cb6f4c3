//! Frame loop and agent-set lifecycle.
//!
//! The [`Driver`] is a small state machine (`Idle -> Running -> Stopped`)
//! that owns the agents and the pointer. Everything platform specific (the
//! drawing surface, frame scheduling and input listeners) sits behind
//! [`Host`], so the same driver runs on a browser canvas or in a test.

use crate::agent::Agent;
use crate::config::{FieldConfig, MAX_AGENTS};
use crate::integrator;
use crate::links;
use crate::rng::RandomSource;
use crate::surface::Surface;
use crate::Vector2D;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
    Stopped,
}

/// Platform services the driver needs.
pub trait Host {
    /// Handle of a pending frame request, used to cancel it.
    type Frame;
    type Surface: Surface;

    /// Current viewport size in pixels.
    fn viewport(&self) -> (f64, f64);

    fn surface(&mut self) -> &mut Self::Surface;

    /// Ask for [`Driver::tick`] to be called once on the next frame.
    fn request_frame(&mut self) -> Self::Frame;

    fn cancel_frame(&mut self, frame: Self::Frame);

    /// Start delivering resize and pointer-move events to the driver.
    fn attach_listeners(&mut self);

    fn detach_listeners(&mut self);
}

pub struct Driver<H: Host, R: RandomSource> {
    host: H,
    rng: R,
    config: FieldConfig,
    state: DriverState,
    agents: heapless::Vec<Agent, MAX_AGENTS>,
    pointer: Option<Vector2D>,
    width: f64,
    height: f64,
    pending: Option<H::Frame>,
    frames: u64,
}

impl<H: Host, R: RandomSource> Driver<H, R> {
    pub fn new(host: H, rng: R, config: FieldConfig) -> Self {
        Self {
            host,
            rng,
            config,
            state: DriverState::Idle,
            agents: heapless::Vec::new(),
            pointer: None,
            width: 0.0,
            height: 0.0,
            pending: None,
            frames: 0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn pointer(&self) -> Option<Vector2D> {
        self.pointer
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Frames completed this session.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Begin the session. Only valid once, from `Idle`.
    pub fn start(&mut self) -> bool {
        if self.state != DriverState::Idle {
            return false;
        }

        self.fit_viewport();
        self.host.attach_listeners();
        self.pending = Some(self.host.request_frame());
        self.state = DriverState::Running;
        true
    }

    /// Run one frame: integrate every agent, draw agents, draw links, and
    /// request the next frame. Does nothing unless running.
    pub fn tick(&mut self) -> bool {
        if self.state != DriverState::Running {
            return false;
        }

        // The frame that invoked us has fired; nothing is pending until we ask again.
        self.pending = None;

        let surface = self.host.surface();
        surface.clear();

        for agent in self.agents.iter_mut() {
            integrator::update(agent, self.pointer, self.width, self.height, &self.config);
            agent.draw(surface);
        }

        links::draw_links(&self.agents, surface, &self.config);

        self.frames += 1;
        self.pending = Some(self.host.request_frame());
        true
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if self.state == DriverState::Running {
            self.pointer = Some(Vector2D::new(x, y));
        }
    }

    /// Follow a viewport change by resizing the surface and re-seeding the
    /// agents for the new area.
    pub fn resize(&mut self) {
        if self.state == DriverState::Running {
            self.fit_viewport();
        }
    }

    /// End the session: cancel the pending frame, detach listeners and drop
    /// the agents. Afterwards every other call is a no-op.
    pub fn stop(&mut self) -> bool {
        if self.state != DriverState::Running {
            return false;
        }

        if let Some(frame) = self.pending.take() {
            self.host.cancel_frame(frame);
        }
        self.host.detach_listeners();
        self.agents.clear();
        self.state = DriverState::Stopped;
        true
    }

    fn fit_viewport(&mut self) {
        let (width, height) = self.host.viewport();
        self.width = width;
        self.height = height;
        self.host.surface().resize(width, height);
        self.seed();
    }

    fn seed(&mut self) {
        self.agents.clear();
        let count = self.config.agent_count(self.width, self.height);
        for _ in 0..count {
            let agent = Agent::random(&mut self.rng, self.width, self.height, &self.config);
            // count never exceeds MAX_AGENTS
            let _ = self.agents.push(agent);
        }
    }
}

impl<H: Host, R: RandomSource> Drop for Driver<H, R> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;
    use crate::surface::{DrawCommand, RecordingSurface};

    #[derive(Default)]
    struct MockHost {
        viewport: (f64, f64),
        surface: RecordingSurface,
        next_frame: u32,
        requested: Vec<u32>,
        cancelled: Vec<u32>,
        listening: bool,
    }

    impl MockHost {
        fn new(width: f64, height: f64) -> Self {
            Self {
                viewport: (width, height),
                ..Self::default()
            }
        }
    }

    impl Host for MockHost {
        type Frame = u32;
        type Surface = RecordingSurface;

        fn viewport(&self) -> (f64, f64) {
            self.viewport
        }

        fn surface(&mut self) -> &mut RecordingSurface {
            &mut self.surface
        }

        fn request_frame(&mut self) -> u32 {
            self.next_frame += 1;
            self.requested.push(self.next_frame);
            self.next_frame
        }

        fn cancel_frame(&mut self, frame: u32) {
            self.cancelled.push(frame);
        }

        fn attach_listeners(&mut self) {
            self.listening = true;
        }

        fn detach_listeners(&mut self) {
            self.listening = false;
        }
    }

    fn driver(width: f64, height: f64, seed: u32) -> Driver<MockHost, SimpleRng> {
        Driver::new(
            MockHost::new(width, height),
            SimpleRng::new(seed),
            FieldConfig::default(),
        )
    }

    #[test]
    fn test_idle_until_started() {
        let mut driver = driver(800.0, 600.0, 1);

        assert_eq!(driver.state(), DriverState::Idle);
        assert!(!driver.tick());
        driver.pointer_moved(10.0, 10.0);
        assert_eq!(driver.pointer(), None);
        assert!(driver.agents().is_empty());
        assert!(driver.host().requested.is_empty());
    }

    #[test]
    fn test_start_seeds_and_schedules() {
        let mut driver = driver(800.0, 600.0, 1);

        assert!(driver.start());
        assert_eq!(driver.state(), DriverState::Running);
        assert_eq!(driver.agents().len(), 60);
        assert_eq!(driver.host().surface.width, 800.0);
        assert_eq!(driver.host().surface.height, 600.0);
        assert!(driver.host().listening);
        assert_eq!(driver.host().requested, vec![1]);

        // A second start is rejected.
        assert!(!driver.start());
        assert_eq!(driver.host().requested, vec![1]);
    }

    #[test]
    fn test_large_viewport_is_capped() {
        let mut driver = driver(4000.0, 3000.0, 1);
        driver.start();
        assert_eq!(driver.agents().len(), 150);
    }

    #[test]
    fn test_tick_draws_a_full_frame() {
        let mut driver = driver(400.0, 400.0, 9);
        driver.start();
        assert!(driver.tick());

        let surface = &driver.host().surface;
        assert_eq!(surface.commands.first(), Some(&DrawCommand::Clear));

        let frame = surface.last_frame();
        let circles = frame
            .iter()
            .take_while(|c| matches!(c, DrawCommand::Circle { .. }))
            .count();
        // All circles come before any link.
        assert_eq!(circles, driver.agents().len());
        assert!(frame[circles..]
            .iter()
            .all(|c| matches!(c, DrawCommand::Line { .. })));

        assert_eq!(driver.frame_count(), 1);
        assert_eq!(driver.host().requested, vec![1, 2]);
    }

    #[test]
    fn test_pointer_repels_during_tick() {
        let mut driver = driver(800.0, 600.0, 3);
        driver.start();
        driver.pointer_moved(100.0, 100.0);
        assert_eq!(driver.pointer(), Some(Vector2D::new(100.0, 100.0)));

        driver.agents.clear();
        let _ = driver.agents.push(Agent::new(
            Vector2D::new(150.0, 100.0),
            Vector2D::zero(),
            1.0,
            0.3,
            crate::agent::ColorTag::Violet,
        ));
        driver.tick();

        let x = driver.agents()[0].position.x;
        assert!((x - 150.875).abs() < 1e-9);
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let run = || {
            let mut driver = driver(640.0, 480.0, 4242);
            driver.start();
            for step in 0..300 {
                let t = step as f64;
                driver.pointer_moved(320.0 + 100.0 * (t / 20.0).sin(), 240.0 + t % 50.0);
                driver.tick();
            }
            driver
                .agents()
                .iter()
                .map(|a| (a.position, a.velocity))
                .collect::<Vec<_>>()
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_agents_stay_in_bounds() {
        let mut driver = driver(500.0, 320.0, 11);
        driver.start();

        for step in 0..1500 {
            let t = step as f64;
            driver.pointer_moved((t * 7.0) % 520.0 - 10.0, (t * 3.0) % 340.0 - 10.0);
            driver.tick();
            for agent in driver.agents() {
                assert!((0.0..=500.0).contains(&agent.position.x));
                assert!((0.0..=320.0).contains(&agent.position.y));
            }
        }
    }

    #[test]
    fn test_resize_reseeds_for_new_viewport() {
        let mut driver = driver(800.0, 600.0, 21);
        driver.start();
        assert_eq!(driver.agents().len(), 60);

        driver.host_mut().viewport = (400.0, 400.0);
        driver.resize();

        assert_eq!(driver.agents().len(), 20);
        assert_eq!(driver.host().surface.width, 400.0);
        assert_eq!(driver.host().surface.height, 400.0);
        for agent in driver.agents() {
            assert!((0.0..400.0).contains(&agent.position.x));
            assert!((0.0..400.0).contains(&agent.position.y));
        }
        assert_eq!(driver.state(), DriverState::Running);
    }

    #[test]
    fn test_stop_mid_session() {
        let mut driver = driver(800.0, 600.0, 8);
        driver.start();
        driver.tick();
        driver.tick();

        assert!(driver.stop());
        assert_eq!(driver.state(), DriverState::Stopped);
        assert_eq!(driver.host().cancelled, vec![3]);
        assert!(!driver.host().listening);
        assert!(driver.agents().is_empty());

        let recorded = driver.host().surface.commands.len();
        let requested = driver.host().requested.len();

        // A stray frame callback does nothing.
        assert!(!driver.tick());
        assert_eq!(driver.host().surface.commands.len(), recorded);
        assert_eq!(driver.host().requested.len(), requested);
        assert_eq!(driver.frame_count(), 2);

        // Nor does a late resize or pointer move.
        driver.host_mut().viewport = (1920.0, 1080.0);
        driver.resize();
        driver.pointer_moved(5.0, 5.0);
        assert!(driver.agents().is_empty());
        assert_eq!(driver.host().surface.width, 800.0);

        // Stopped is terminal.
        assert!(!driver.start());
        assert!(!driver.stop());
    }

    #[test]
    fn test_drop_stops_running_driver() {
        use std::cell::RefCell;
        use std::rc::Rc;

        struct Probe {
            inner: MockHost,
            detached: Rc<RefCell<bool>>,
        }

        impl Host for Probe {
            type Frame = u32;
            type Surface = RecordingSurface;

            fn viewport(&self) -> (f64, f64) {
                self.inner.viewport()
            }

            fn surface(&mut self) -> &mut RecordingSurface {
                self.inner.surface()
            }

            fn request_frame(&mut self) -> u32 {
                self.inner.request_frame()
            }

            fn cancel_frame(&mut self, frame: u32) {
                self.inner.cancel_frame(frame)
            }

            fn attach_listeners(&mut self) {}

            fn detach_listeners(&mut self) {
                *self.detached.borrow_mut() = true;
            }
        }

        let detached = Rc::new(RefCell::new(false));
        {
            let probe = Probe {
                inner: MockHost::new(100.0, 100.0),
                detached: detached.clone(),
            };
            let mut driver = Driver::new(probe, SimpleRng::new(1), FieldConfig::default());
            driver.start();
        }

        assert!(*detached.borrow());
    }
}
