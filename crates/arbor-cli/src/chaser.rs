//! Chaser scenario: agents that periodically look for a moving target and walk to where
//! they last saw it.
//!
//! Everything here except the tree itself stands in for host-engine systems (sensing,
//! locomotion). The tree only reaches them through leaf closures.

use std::cell::RefCell;
use std::ops::{Add, Mul, Sub};
use std::rc::Rc;

use arbor_bt::builder::{action, sequence};
use arbor_bt::{Scheduler, TaskStatus, TickContext, TickReport, Tree, TreeHandle};
use arbor_core::DeterministicRng;

use crate::config::DemoConfig;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    /// Moves toward `goal` by at most `max_step`; lands exactly on it when close enough.
    pub fn step_toward(self, goal: Vec2, max_step: f32) -> Vec2 {
        let delta = goal - self;
        let dist = delta.length();
        if dist <= max_step || dist <= f32::EPSILON {
            goal
        } else {
            self + delta * (max_step / dist)
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Orbits the origin at a fixed radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub position: Vec2,
    /// Facing angle in radians.
    pub heading: f32,
    angle: f32,
    radius: f32,
    angular_speed: f32,
}

impl Target {
    pub fn new(radius: f32, angular_speed: f32) -> Self {
        let mut target = Self {
            position: Vec2::ZERO,
            heading: 0.0,
            angle: 0.0,
            radius,
            angular_speed,
        };
        target.advance(0.0);
        target
    }

    pub fn advance(&mut self, dt: f32) {
        self.angle += self.angular_speed * dt;
        self.position = Vec2::new(self.radius * self.angle.cos(), self.radius * self.angle.sin());
        self.heading = self.angle + std::f32::consts::FRAC_PI_2;
    }
}

pub type SharedTarget = Rc<RefCell<Target>>;

/// Per-chaser blackboard.
#[derive(Debug, Clone, PartialEq)]
pub struct ChaserBoard {
    /// Time accumulated toward the next search.
    pub elapsed: f32,
    /// Search interval currently in effect.
    pub deadline: f32,
    pub last_target_position: Option<Vec2>,
    pub last_target_heading: f32,

    pub position: Vec2,
    pub heading: f32,
    pub destination: Option<Vec2>,
    /// Set when the target was lost after having been seen; cleared on arrival.
    pub dirty: bool,

    pub searches: u32,
    pub sightings: u32,
    /// RNG stream for this chaser's search intervals.
    stream: u64,
}

impl ChaserBoard {
    pub fn new(position: Vec2, deadline: f32, stream: u64) -> Self {
        Self {
            elapsed: 0.0,
            deadline,
            last_target_position: None,
            last_target_heading: 0.0,
            position,
            heading: 0.0,
            destination: None,
            dirty: false,
            searches: 0,
            sightings: 0,
            stream,
        }
    }

    /// Host-side locomotion for one frame.
    ///
    /// Once the chaser stands still after losing its target, it turns to face the
    /// direction the target was last seen heading and forgets it.
    pub fn integrate(&mut self, dt: f32, speed: f32) {
        if let Some(goal) = self.destination {
            self.position = self.position.step_toward(goal, speed * dt);
            if self.position == goal {
                self.destination = None;
            }
            return;
        }

        if self.dirty {
            self.heading = self.last_target_heading;
            self.last_target_position = None;
            self.last_target_heading = 0.0;
            self.dirty = false;
        }
    }
}

fn check_timer(min: f32, max: f32) -> impl FnMut(&TickContext, &mut ChaserBoard) -> TaskStatus {
    move |ctx: &TickContext, bb: &mut ChaserBoard| {
        bb.elapsed += ctx.dt_seconds;
        if bb.elapsed < bb.deadline {
            return TaskStatus::Failure;
        }

        bb.elapsed = 0.0;
        bb.deadline = ctx.rng_for(bb.stream).next_f32_range(min, max);
        tracing::debug!(stream = bb.stream, deadline = bb.deadline, "search timer rearmed");
        TaskStatus::Success
    }
}

fn search(
    target: SharedTarget,
    sight_radius: f32,
) -> impl FnMut(&TickContext, &mut ChaserBoard) -> TaskStatus {
    move |_ctx: &TickContext, bb: &mut ChaserBoard| {
        bb.searches += 1;
        let seen = bb.position.distance(target.borrow().position) <= sight_radius;
        if seen {
            return TaskStatus::Success;
        }

        if bb.last_target_position.is_some() {
            bb.dirty = true;
        }
        TaskStatus::Failure
    }
}

fn follow(target: SharedTarget) -> impl FnMut(&TickContext, &mut ChaserBoard) -> TaskStatus {
    move |_ctx: &TickContext, bb: &mut ChaserBoard| {
        let target = target.borrow();
        bb.sightings += 1;
        bb.last_target_position = Some(target.position);
        bb.last_target_heading = target.heading;
        bb.destination = Some(target.position);
        TaskStatus::Success
    }
}

/// Every `deadline` seconds: look for the target, and if it is in sight, walk to it.
pub fn chaser_tree(
    name: String,
    config: &DemoConfig,
    target: SharedTarget,
    board: ChaserBoard,
) -> Tree<ChaserBoard> {
    let root = sequence(vec![
        action(check_timer(config.timer_min_seconds, config.timer_max_seconds)),
        sequence(vec![
            action(search(Rc::clone(&target), config.sight_radius)),
            action(follow(target)),
        ]),
    ]);
    Tree::new(name, root, board)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChaserSummary {
    pub name: String,
    pub position: Vec2,
    pub searches: u32,
    pub sightings: u32,
    pub last_status: Option<TaskStatus>,
}

/// Host loop stand-in: owns the target, the chasers and the scheduler that ticks them.
pub struct ChaserSim {
    config: DemoConfig,
    scheduler: Scheduler,
    target: SharedTarget,
    chasers: Vec<TreeHandle<ChaserBoard>>,
}

impl ChaserSim {
    pub fn new(config: DemoConfig, mut scheduler: Scheduler) -> Self {
        let target = Rc::new(RefCell::new(Target::new(
            config.target_orbit_radius,
            config.target_angular_speed,
        )));
        let seed_ctx = TickContext::new(0, 0.0, scheduler.config().seed);

        let chasers = (0..config.chasers)
            .map(|i| {
                let stream = i as u64;
                let spread = i as f32 * 2.0;
                let deadline = seed_ctx
                    .rng_for(stream)
                    .next_f32_range(config.timer_min_seconds, config.timer_max_seconds);
                let board = ChaserBoard::new(Vec2::new(spread, -spread), deadline, stream);
                let tree = chaser_tree(format!("chaser-{i}"), &config, Rc::clone(&target), board);

                let handle = TreeHandle::new(tree);
                handle.start(&mut scheduler);
                handle
            })
            .collect();

        Self {
            config,
            scheduler,
            target,
            chasers,
        }
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn target(&self) -> &SharedTarget {
        &self.target
    }

    pub fn chasers(&self) -> &[TreeHandle<ChaserBoard>] {
        &self.chasers
    }

    /// One host frame: move the target, tick every tree, then integrate chaser movement.
    pub fn step(&mut self, dt: f32) -> TickReport {
        self.target.borrow_mut().advance(dt);
        let report = self.scheduler.tick(dt);

        let speed = self.config.chaser_speed;
        for chaser in &self.chasers {
            chaser.with_blackboard(|bb| bb.integrate(report.dt_seconds, speed));
        }
        report
    }

    /// Unregisters a chaser; it keeps its state but is no longer ticked.
    pub fn park(&mut self, index: usize) -> bool {
        match self.chasers.get(index) {
            Some(chaser) => chaser.stop(&mut self.scheduler),
            None => false,
        }
    }

    pub fn summaries(&self) -> Vec<ChaserSummary> {
        self.chasers()
            .iter()
            .map(|handle| {
                let tree = handle.borrow();
                let bb = tree.blackboard();
                ChaserSummary {
                    name: tree.name().to_owned(),
                    position: bb.position,
                    searches: bb.searches,
                    sightings: bb.sightings,
                    last_status: tree.last_status(),
                }
            })
            .collect()
    }
}
