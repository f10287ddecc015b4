use bevy::prelude::*;
use std::collections::BTreeMap;

/// Key of a registered threat.
///
/// Ids handed out by [`PredatorRegistry::add`] and threats that follow an entity live in separate
/// namespaces, so one can never replace the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThreatId {
	Manual(u64),
	Entity(Entity),
}

impl From<Entity> for ThreatId {
	fn from(entity: Entity) -> Self {
		ThreatId::Entity(entity)
	}
}

/// Threats the flock flees from that are not agents of the flock itself.
///
/// Positions are read fresh on every tick, so callers only need to keep them current.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredatorRegistry {
	threats: BTreeMap<ThreatId, Vec3>,
	next_id: u64,
}

impl PredatorRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a threat under a fresh id.
	pub fn add(&mut self, position: Vec3) -> ThreatId {
		let id = loop {
			let id = ThreatId::Manual(self.next_id);
			self.next_id += 1;
			if !self.threats.contains_key(&id) {
				break id;
			}
		};
		self.threats.insert(id, position);
		id
	}

	/// Registers or moves a threat under a caller chosen id.
	pub fn insert(&mut self, id: ThreatId, position: Vec3) {
		self.threats.insert(id, position);
	}

	/// Moves a known threat. Returns false if the id is not registered.
	pub fn update(&mut self, id: ThreatId, position: Vec3) -> bool {
		match self.threats.get_mut(&id) {
			Some(current) => {
				*current = position;
				true
			}
			None => false,
		}
	}

	pub fn remove(&mut self, id: ThreatId) -> Option<Vec3> {
		self.threats.remove(&id)
	}

	pub fn get(&self, id: ThreatId) -> Option<Vec3> {
		self.threats.get(&id).copied()
	}

	pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
		self.threats.values().copied()
	}

	pub fn len(&self) -> usize {
		self.threats.len()
	}

	pub fn is_empty(&self) -> bool {
		self.threats.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_add_update_remove() {
		let mut registry = PredatorRegistry::new();
		let a = registry.add(Vec3::X);
		let b = registry.add(Vec3::Y);
		assert_ne!(a, b);
		assert_eq!(registry.len(), 2);

		assert!(registry.update(a, Vec3::Z));
		assert_eq!(registry.get(a), Some(Vec3::Z));

		assert_eq!(registry.remove(b), Some(Vec3::Y));
		assert!(!registry.update(b, Vec3::ONE));
		assert_eq!(registry.positions().collect::<Vec<_>>(), vec![Vec3::Z]);
	}

	#[test]
	fn test_add_skips_inserted_ids() {
		let mut registry = PredatorRegistry::new();
		registry.insert(ThreatId::Manual(0), Vec3::ONE);
		let id = registry.add(Vec3::X);
		assert_eq!(id, ThreatId::Manual(1));
		assert_eq!(registry.get(ThreatId::Manual(0)), Some(Vec3::ONE));
	}

	#[test]
	fn test_entity_threats_do_not_collide_with_added_ones() {
		let mut registry = PredatorRegistry::new();
		let manual = registry.add(Vec3::X);

		let entity = World::new().spawn_empty().id();
		registry.insert(ThreatId::from(entity), Vec3::Y);
		assert_eq!(registry.len(), 2);
		assert_eq!(registry.get(manual), Some(Vec3::X));

		registry.remove(ThreatId::from(entity));
		assert_eq!(registry.get(manual), Some(Vec3::X));
		assert_eq!(registry.len(), 1);
	}
}
