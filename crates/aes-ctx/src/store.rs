//! Handle table owning cipher contexts.

use std::num::NonZeroU32;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use aes_core::{Aes, Block};
use log::{debug, warn};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::handle::Handle;

struct Slot {
    generation: NonZeroU32,
    context: Option<Arc<Aes>>,
}

#[derive(Default)]
struct Slots {
    entries: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl Slots {
    fn get(&self, handle: Handle) -> Option<&Arc<Aes>> {
        self.entries
            .get(handle.index())
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.context.as_ref())
    }
}

/// Owns AES contexts and hands out opaque [`Handle`]s to them.
///
/// Contexts are fully expanded before a handle is issued. Transforms look the
/// context up under a short read lock and run outside it, so any number of
/// threads may encrypt against the same handle. A transform that already
/// resolved its context finishes even if the handle is destroyed meanwhile;
/// the schedule is freed and wiped when the last user lets go.
pub struct ContextStore {
    slots: RwLock<Slots>,
    config: StoreConfig,
}

impl ContextStore {
    /// Creates an unbounded store.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates a store with explicit configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            slots: RwLock::new(Slots::default()),
            config,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Expands `key` into a new context and returns its handle.
    pub fn create(&self, key: &[u8]) -> Result<Handle> {
        let context = Arc::new(Aes::new(key)?);
        let size = context.key_size();

        let mut slots = self.write();
        if let Some(limit) = self.config.max_contexts {
            if slots.live >= limit {
                warn!("refusing new context: {limit} contexts already live");
                return Err(StoreError::CapacityExhausted { limit });
            }
        }

        let handle = match slots.free.pop() {
            Some(index) => {
                let slot = &mut slots.entries[index as usize];
                slot.context = Some(context);
                Handle::new(index, slot.generation)
            }
            None => {
                let index = u32::try_from(slots.entries.len()).map_err(|_| {
                    StoreError::CapacityExhausted {
                        limit: u32::MAX as usize,
                    }
                })?;
                slots.entries.push(Slot {
                    generation: NonZeroU32::MIN,
                    context: Some(context),
                });
                Handle::new(index, NonZeroU32::MIN)
            }
        };
        slots.live += 1;
        debug!("created {size} context {handle} ({} live)", slots.live);
        Ok(handle)
    }

    /// Encrypts one block with the context behind `handle`.
    pub fn encrypt(&self, handle: Handle, block: &Block) -> Result<Block> {
        Ok(self.resolve(handle)?.encrypt_block(block))
    }

    /// Decrypts one block with the context behind `handle`.
    pub fn decrypt(&self, handle: Handle, block: &Block) -> Result<Block> {
        Ok(self.resolve(handle)?.decrypt_block(block))
    }

    /// Releases the context behind `handle` and invalidates the handle.
    ///
    /// Destroying twice, or destroying a handle from another store, reports
    /// [`StoreError::InvalidContext`] and leaves every other context intact.
    pub fn destroy(&self, handle: Handle) -> Result<()> {
        let released = {
            let mut slots = self.write();
            let index = handle.index();
            let slot = match slots.entries.get_mut(index) {
                Some(slot) if slot.generation == handle.generation() => slot,
                _ => return Err(invalid(handle)),
            };
            let Some(context) = slot.context.take() else {
                return Err(invalid(handle));
            };
            // A slot whose generation would wrap is retired for good.
            match slot.generation.checked_add(1) {
                Some(next) => {
                    slot.generation = next;
                    slots.free.push(index as u32);
                }
                None => debug!("retiring slot {index}: generations exhausted"),
            }
            slots.live -= 1;
            debug!("destroyed context {handle} ({} live)", slots.live);
            context
        };
        drop(released);
        Ok(())
    }

    /// Returns `true` while `handle` refers to a live context.
    pub fn contains(&self, handle: Handle) -> bool {
        self.read().get(handle).is_some()
    }

    /// Number of live contexts.
    pub fn len(&self) -> usize {
        self.read().live
    }

    /// Returns `true` when no context is live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Creates a context that is destroyed when the returned guard drops.
    pub fn scoped(&self, key: &[u8]) -> Result<ScopedContext<'_>> {
        let handle = self.create(key)?;
        Ok(ScopedContext {
            store: self,
            handle,
            live: true,
        })
    }

    fn resolve(&self, handle: Handle) -> Result<Arc<Aes>> {
        self.read().get(handle).cloned().ok_or_else(|| invalid(handle))
    }

    // The table is only mutated through complete push/pop/take steps, so a
    // panic elsewhere cannot leave it inconsistent.
    fn read(&self) -> RwLockReadGuard<'_, Slots> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Slots> {
        self.slots.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ContextStore {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid(handle: Handle) -> StoreError {
    warn!("rejected context handle {handle}");
    StoreError::InvalidContext(handle)
}

/// Context bound to a scope: destroyed automatically on drop.
pub struct ScopedContext<'s> {
    store: &'s ContextStore,
    handle: Handle,
    live: bool,
}

impl ScopedContext<'_> {
    /// Handle of the underlying context.
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Encrypts one block.
    pub fn encrypt(&self, block: &Block) -> Result<Block> {
        self.store.encrypt(self.handle, block)
    }

    /// Decrypts one block.
    pub fn decrypt(&self, block: &Block) -> Result<Block> {
        self.store.decrypt(self.handle, block)
    }

    /// Destroys the context now and reports the outcome.
    pub fn release(mut self) -> Result<()> {
        self.live = false;
        self.store.destroy(self.handle)
    }
}

impl Drop for ScopedContext<'_> {
    fn drop(&mut self) {
        if self.live {
            if let Err(err) = self.store.destroy(self.handle) {
                warn!("scoped context {} already gone: {err}", self.handle);
            }
        }
    }
}
