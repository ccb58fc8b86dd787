use crate::core::container::ContainerId;

/// Side of the bounding rectangle hit on an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Lower,
    Upper,
}

/// A wall contact produced by the integrator for one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    pub axis: usize,
    pub side: Side,
    /// Offset within the step at which the particle touched the wall.
    pub time: f64,
}

impl WallHit {
    /// Encoded wall id: `2*axis` for the lower wall, `2*axis + 1` for the upper wall.
    #[inline]
    pub fn wall_id(&self) -> u32 {
        let side = match self.side {
            Side::Lower => 0,
            Side::Upper => 1,
        };
        (2 * self.axis + side) as u32
    }
}

/// Kinds of contacts reported by a simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Particle `i` bounced off wall `wall_id` of its container.
    Wall { i: usize, wall_id: u32 },
    /// Particles `i` and `j` of the same container collided.
    Pair { i: usize, j: usize },
}

/// A contact that happened during a step.
///
/// - `container`: container owning the particles
/// - `kind`: contact kind and participants (indices into the container's particles)
/// - `time`: offset within the step, in `[0, dt]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub container: ContainerId,
    pub kind: EventKind,
    pub time: f64,
}

impl Event {
    pub fn wall(container: ContainerId, i: usize, hit: &WallHit) -> Self {
        Self {
            container,
            kind: EventKind::Wall {
                i,
                wall_id: hit.wall_id(),
            },
            time: hit.time,
        }
    }

    pub fn pair(container: ContainerId, i: usize, j: usize, time: f64) -> Self {
        Self {
            container,
            kind: EventKind::Pair { i, j },
            time,
        }
    }
}

/// Contacts recorded by one call to [`step`](crate::core::step), in the order they were handled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub events: Vec<Event>,
}

impl StepReport {
    #[inline]
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn extend(&mut self, other: StepReport) {
        self.events.extend(other.events);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of particle-wall contacts.
    pub fn wall_contacts(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, EventKind::Wall { .. }))
            .count()
    }

    /// Number of particle-particle collisions resolved.
    pub fn pair_collisions(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, EventKind::Pair { .. }))
            .count()
    }
}
