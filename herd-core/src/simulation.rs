use crate::HerdRegistry;

/// Outcome of one [`SimulationStep::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    /// 1-based number of the tick just completed.
    pub tick: u64,
    /// Agents whose velocity and position were updated.
    pub moved: usize,
}

/// Drives the two-phase update over every herd of a registry.
///
/// The host calls [`tick`](Self::tick) once per fixed step. Herds and agents
/// may be added or removed through [`registry_mut`](Self::registry_mut)
/// between ticks, never during one.
#[derive(Debug, Clone, Default)]
pub struct SimulationStep {
    registry: HerdRegistry,
    ticks: u64,
}

impl SimulationStep {
    pub fn new(registry: HerdRegistry) -> Self {
        Self { registry, ticks: 0 }
    }

    pub fn registry(&self) -> &HerdRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut HerdRegistry {
        &mut self.registry
    }

    pub fn into_registry(self) -> HerdRegistry {
        self.registry
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Advance the world by `dt` seconds.
    ///
    /// Phase 1 refreshes the aggregates of every herd. Phase 2 then lets
    /// every agent compute its rules from that state and move.
    pub fn tick(&mut self, dt: f32) -> TickSummary {
        self.ticks += 1;
        log::trace!("tick {}: refreshing {} herds", self.ticks, self.registry.len());
        self.registry.refresh_aggregates();

        let mut moved = 0;
        for herd in self.registry.all_mut() {
            moved += herd.step_agents(dt);
        }
        log::trace!("tick {}: {} agents moved", self.ticks, moved);

        TickSummary {
            tick: self.ticks,
            moved,
        }
    }
}
