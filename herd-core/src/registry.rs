use alloc::vec::Vec;

use crate::{Herd, HerdConfig, Vector3};

/// Handle of a herd inside a [`HerdRegistry`]. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HerdId(u32);

impl HerdId {
    pub fn get(self) -> u32 {
        self.0
    }
}

/// All active herds of one simulation, in registration order
#[derive(Debug, Clone, Default)]
pub struct HerdRegistry {
    herds: Vec<Herd>,
    next_id: u32,
}

impl HerdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `herd` and hand out its handle. The herd and its
    /// agents are tagged with the new id.
    pub fn register(&mut self, mut herd: Herd) -> HerdId {
        let id = HerdId(self.next_id);
        self.next_id += 1;

        herd.attach(Some(id));
        self.herds.push(herd);
        log::debug!("registered herd {:?} ({} herds)", id, self.herds.len());
        id
    }

    /// Create an empty herd and register it.
    pub fn spawn_herd(&mut self, config: HerdConfig) -> HerdId {
        self.register(Herd::new(config))
    }

    /// Remove a herd, returning it detached from this registry.
    pub fn unregister(&mut self, id: HerdId) -> Option<Herd> {
        let index = self.position(id)?;
        let mut herd = self.herds.remove(index);
        herd.attach(None);
        log::debug!("unregistered herd {:?} ({} herds)", id, self.herds.len());
        Some(herd)
    }

    pub fn get(&self, id: HerdId) -> Option<&Herd> {
        self.position(id).map(|index| &self.herds[index])
    }

    pub fn get_mut(&mut self, id: HerdId) -> Option<&mut Herd> {
        let index = self.position(id)?;
        Some(&mut self.herds[index])
    }

    pub fn all(&self) -> &[Herd] {
        &self.herds
    }

    pub fn all_mut(&mut self) -> &mut [Herd] {
        &mut self.herds
    }

    pub fn ids(&self) -> impl Iterator<Item = HerdId> + '_ {
        self.herds.iter().filter_map(Herd::id)
    }

    pub fn len(&self) -> usize {
        self.herds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.herds.is_empty()
    }

    /// Refresh the aggregates of every herd.
    ///
    /// All centroids are recomputed before any threat position, so each
    /// threat sees this tick's centroids whatever the registration order.
    pub fn refresh_aggregates(&mut self) {
        for herd in self.herds.iter_mut() {
            herd.refresh_centroid();
        }

        let centroids: Vec<(Option<HerdId>, Vector3)> = self
            .herds
            .iter()
            .map(|herd| (herd.id(), herd.centroid()))
            .collect();

        for herd in self.herds.iter_mut() {
            let own = herd.id();
            herd.refresh_threat(
                centroids
                    .iter()
                    .filter(|(id, _)| *id != own)
                    .map(|(_, centroid)| *centroid),
            );
        }
    }

    fn position(&self, id: HerdId) -> Option<usize> {
        self.herds.iter().position(|herd| herd.id() == Some(id))
    }
}
