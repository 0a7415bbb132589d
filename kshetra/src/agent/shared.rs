//! Lock-free pose sharing between an agent thread and observers.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::core::{Cell, Heading, Pose};

/// Atomic wrapper for [`Pose`].
///
/// Packs x, y (16 bits each) and the heading index into one `u64` so that
/// readers never observe a cell from one step with the heading of another.
#[derive(Debug)]
pub struct AtomicPose(AtomicU64);

impl AtomicPose {
    pub fn new(pose: Pose) -> Self {
        Self(AtomicU64::new(Self::pack(pose)))
    }

    pub fn load(&self, order: Ordering) -> Pose {
        Self::unpack(self.0.load(order))
    }

    pub fn store(&self, pose: Pose, order: Ordering) {
        self.0.store(Self::pack(pose), order);
    }

    fn pack(pose: Pose) -> u64 {
        let x = pose.cell.x as i16 as u16 as u64;
        let y = pose.cell.y as i16 as u16 as u64;
        (x << 32) | (y << 16) | pose.heading.index() as u64
    }

    fn unpack(bits: u64) -> Pose {
        let x = (bits >> 32) as u16 as i16 as i32;
        let y = (bits >> 16) as u16 as i16 as i32;
        Pose::new(Cell::new(x, y), Heading::from_index((bits & 0xFFFF) as usize))
    }
}

/// State published by a robot for other threads.
#[derive(Debug)]
pub(super) struct Telemetry {
    pub pose: AtomicPose,
    pub steps: AtomicU64,
    pub finished: AtomicBool,
}

impl Telemetry {
    pub fn new(pose: Pose) -> Self {
        Self {
            pose: AtomicPose::new(pose),
            steps: AtomicU64::new(0),
            finished: AtomicBool::new(false),
        }
    }

    pub fn publish(&self, pose: Pose, steps: u64) {
        self.pose.store(pose, Ordering::Release);
        self.steps.store(steps, Ordering::Release);
    }
}
