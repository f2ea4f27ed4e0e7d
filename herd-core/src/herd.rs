use alloc::vec::Vec;

use crate::{Agent, HerdConfig, HerdId, Vector3};

/// An ordered group of agents sharing aggregates and a threat estimate
#[derive(Debug, Clone)]
pub struct Herd {
    id: Option<HerdId>,
    agents: Vec<Agent>,
    centroid: Vector3,
    threat_position: Vector3,
    config: HerdConfig,
}

impl Herd {
    pub fn new(config: HerdConfig) -> Self {
        Self {
            id: None,
            agents: Vec::new(),
            centroid: Vector3::zero(),
            threat_position: Vector3::zero(),
            config,
        }
    }

    /// Registry handle, `None` until the herd is registered.
    pub fn id(&self) -> Option<HerdId> {
        self.id
    }

    pub(crate) fn attach(&mut self, id: Option<HerdId>) {
        self.id = id;
        for agent in self.agents.iter_mut() {
            agent.set_herd(id);
        }
    }

    pub fn config(&self) -> &HerdConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut HerdConfig {
        &mut self.config
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Mutable access for the host between ticks, e.g. to teleport agents.
    pub fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn centroid(&self) -> Vector3 {
        self.centroid
    }

    pub fn threat_position(&self) -> Vector3 {
        self.threat_position
    }

    /// Append an agent and return its index.
    pub fn add_agent(&mut self, mut agent: Agent) -> usize {
        agent.set_herd(self.id);
        self.agents.push(agent);
        self.agents.len() - 1
    }

    /// Remove the agent at `index`, keeping the order of the rest.
    pub fn remove_agent(&mut self, index: usize) -> Option<Agent> {
        if index >= self.agents.len() {
            return None;
        }
        let mut agent = self.agents.remove(index);
        agent.set_herd(None);
        Some(agent)
    }

    /// Recompute the centroid from live agent positions. An empty herd keeps
    /// its last known centroid and returns `false`.
    pub fn refresh_centroid(&mut self) -> bool {
        if self.agents.is_empty() {
            return false;
        }

        let mut sum = Vector3::zero();
        for agent in &self.agents {
            sum += agent.position;
        }
        self.centroid = sum / self.agents.len() as f32;
        true
    }

    /// Recompute the threat as the mean of the other herds' centroids.
    ///
    /// `others` must not contain this herd's own centroid. With no other
    /// centroid, or no agents, the previous threat position is kept.
    pub fn refresh_threat<I>(&mut self, others: I) -> bool
    where
        I: IntoIterator<Item = Vector3>,
    {
        if self.agents.is_empty() {
            return false;
        }

        let mut sum = Vector3::zero();
        let mut count = 0;
        for centroid in others {
            sum += centroid;
            count += 1;
        }

        if count == 0 {
            log::debug!("herd {:?} has no peers, holding threat position", self.id);
            return false;
        }

        self.threat_position = sum / count as f32;
        true
    }

    /// Refresh both aggregates, centroid first.
    pub fn refresh_aggregates<I>(&mut self, others: I)
    where
        I: IntoIterator<Item = Vector3>,
    {
        if self.refresh_centroid() {
            self.refresh_threat(others);
        }
    }

    /// Rule vectors of every agent, all computed from the current state.
    pub fn compute_targets(&self) -> Vec<Vector3> {
        self.agents
            .iter()
            .map(|agent| agent.compute_rules(self))
            .collect()
    }

    /// Compute every agent's rules, then move them all. Returns the number of
    /// agents that moved.
    pub fn step_agents(&mut self, dt: f32) -> usize {
        let targets = self.compute_targets();
        let threat = self.threat_position;
        let config = self.config;

        let mut moved = 0;
        for (agent, target) in self.agents.iter_mut().zip(targets) {
            if agent.step(target, threat, &config, dt) {
                moved += 1;
            }
        }
        moved
    }

    /// Place `count` resting agents uniformly in a horizontal disc.
    #[cfg(feature = "std")]
    pub fn scatter<R: rand::Rng>(&mut self, count: usize, center: Vector3, radius: f32, rng: &mut R) {
        for _ in 0..count {
            let r = radius * rng.gen_range(0.0f32..=1.0).sqrt();
            let angle = rng.gen_range(0.0..core::f32::consts::TAU);
            let position = center + Vector3::new(r * angle.cos(), 0.0, r * angle.sin());
            self.add_agent(Agent::new(position, Vector3::zero()));
        }
    }
}

impl Default for Herd {
    fn default() -> Self {
        Self::new(HerdConfig::default())
    }
}
