//! Bounded, kind-keyed object pools for obstacles and items.

use std::collections::BTreeMap;

use glam::Vec2;
use strum_macros::{Display, EnumIter, IntoStaticStr};
use tracing::{debug, trace};

use crate::constants::pool::MAX_POOL_SIZE;

/// The key a pooled instance is filed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum PoolKind {
    Firecracker,
    Lantern,
    FuCopper,
    FuSilver,
    FuGold,
    RedPacket,
    SpringWord,
}

/// A value that can live in an [`ObjectPool`].
pub trait Poolable {
    /// Spawn-time parameters. They also decide which pool the instance belongs to.
    type Config: Copy;

    fn kind_of(config: &Self::Config) -> PoolKind;

    /// Constructs a fresh, active instance.
    fn create(position: Vec2, config: Self::Config, now_ms: f64) -> Self;

    /// Brings a released instance back to the state `create` would have produced.
    fn reinitialize(&mut self, position: Vec2, config: Self::Config, now_ms: f64);

    /// Hides the instance and disables its collision body.
    fn on_release(&mut self);
}

/// Identifies one instance handed out by a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PoolHandle {
    Pooled { kind: PoolKind, slot: usize },
    /// An overflow instance constructed while its pool was full. Destroyed on release.
    Transient(u64),
}

#[derive(Debug)]
struct Slot<T> {
    value: T,
    in_use: bool,
    /// Bumped every time the slot is handed out again.
    epoch: u32,
}

#[derive(Debug)]
pub struct ObjectPool<T: Poolable> {
    pools: BTreeMap<PoolKind, Vec<Slot<T>>>,
    transients: Vec<(u64, T)>,
    next_transient: u64,
    capacity: usize,
    allocated: usize,
}

impl<T: Poolable> Default for ObjectPool<T> {
    fn default() -> Self {
        Self::new(MAX_POOL_SIZE)
    }
}

impl<T: Poolable> ObjectPool<T> {
    /// Creates a pool retaining at most `capacity` instances per kind.
    pub fn new(capacity: usize) -> Self {
        Self {
            pools: BTreeMap::new(),
            transients: Vec::new(),
            next_transient: 0,
            capacity,
            allocated: 0,
        }
    }

    /// Hands out an active instance for the config's kind, reusing a released one when possible.
    pub fn acquire(&mut self, position: Vec2, config: T::Config, now_ms: f64) -> PoolHandle {
        let kind = T::kind_of(&config);
        let slots = self.pools.entry(kind).or_default();

        if let Some((index, slot)) = slots.iter_mut().enumerate().find(|(_, slot)| !slot.in_use) {
            slot.value.reinitialize(position, config, now_ms);
            slot.in_use = true;
            slot.epoch = slot.epoch.wrapping_add(1);
            trace!(%kind, slot = index, epoch = slot.epoch, "Reused pooled instance");
            return PoolHandle::Pooled { kind, slot: index };
        }

        let value = T::create(position, config, now_ms);
        self.allocated += 1;

        if slots.len() < self.capacity {
            slots.push(Slot {
                value,
                in_use: true,
                epoch: 0,
            });
            PoolHandle::Pooled {
                kind,
                slot: slots.len() - 1,
            }
        } else {
            let id = self.next_transient;
            self.next_transient += 1;
            debug!(%kind, capacity = self.capacity, id, "Pool full, allocating transient instance");
            self.transients.push((id, value));
            PoolHandle::Transient(id)
        }
    }

    /// Returns an instance to its pool. Transients are destroyed. Returns false for stale handles.
    pub fn release(&mut self, handle: PoolHandle) -> bool {
        match handle {
            PoolHandle::Pooled { kind, slot } => {
                let Some(slot) = self.pools.get_mut(&kind).and_then(|slots| slots.get_mut(slot)) else {
                    return false;
                };
                if !slot.in_use {
                    return false;
                }
                slot.value.on_release();
                slot.in_use = false;
                true
            }
            PoolHandle::Transient(id) => {
                let Some(index) = self.transients.iter().position(|(tid, _)| *tid == id) else {
                    return false;
                };
                let (_, mut value) = self.transients.swap_remove(index);
                value.on_release();
                true
            }
        }
    }

    /// The instance behind `handle`, if it is still handed out.
    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        match handle {
            PoolHandle::Pooled { kind, slot } => self
                .pools
                .get(&kind)
                .and_then(|slots| slots.get(slot))
                .filter(|slot| slot.in_use)
                .map(|slot| &slot.value),
            PoolHandle::Transient(id) => self.transients.iter().find(|(tid, _)| *tid == id).map(|(_, value)| value),
        }
    }

    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        match handle {
            PoolHandle::Pooled { kind, slot } => self
                .pools
                .get_mut(&kind)
                .and_then(|slots| slots.get_mut(slot))
                .filter(|slot| slot.in_use)
                .map(|slot| &mut slot.value),
            PoolHandle::Transient(id) => self
                .transients
                .iter_mut()
                .find(|(tid, _)| *tid == id)
                .map(|(_, value)| value),
        }
    }

    /// The reuse counter of a handed-out instance. Transients never change epoch.
    pub fn epoch(&self, handle: PoolHandle) -> Option<u32> {
        match handle {
            PoolHandle::Pooled { kind, slot } => self
                .pools
                .get(&kind)
                .and_then(|slots| slots.get(slot))
                .filter(|slot| slot.in_use)
                .map(|slot| slot.epoch),
            PoolHandle::Transient(id) => self.transients.iter().any(|(tid, _)| *tid == id).then_some(0),
        }
    }

    /// Handles of every instance currently handed out.
    pub fn handles(&self) -> Vec<PoolHandle> {
        self.iter().map(|(handle, _)| handle).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PoolHandle, &T)> {
        let pooled = self.pools.iter().flat_map(|(kind, slots)| {
            slots
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.in_use)
                .map(move |(index, slot)| (PoolHandle::Pooled { kind: *kind, slot: index }, &slot.value))
        });
        let transient = self.transients.iter().map(|(id, value)| (PoolHandle::Transient(*id), value));
        pooled.chain(transient)
    }

    /// Number of instances currently handed out.
    pub fn in_use(&self) -> usize {
        self.iter().count()
    }

    /// Number of instances retained for `kind`, handed out or not.
    pub fn retained(&self, kind: PoolKind) -> usize {
        self.pools.get(&kind).map_or(0, Vec::len)
    }

    pub fn transient_count(&self) -> usize {
        self.transients.len()
    }

    /// Total number of instances ever constructed.
    pub fn allocated(&self) -> usize {
        self.allocated
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Destroys every instance, pooled or transient.
    pub fn clear_all(&mut self) {
        debug!(
            retained = self.pools.values().map(Vec::len).sum::<usize>(),
            transients = self.transients.len(),
            "Clearing object pool"
        );
        self.pools.clear();
        self.transients.clear();
    }
}
