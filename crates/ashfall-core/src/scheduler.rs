//! Timer callbacks and the arena that owns them.
//!
//! A [`Callback`] is an interval in game seconds plus optional `process`
//! and `end` handlers. Once registered with a [`Clock`], it lives in a
//! [`CallbackArena`] slot and is addressed by a generational
//! [`CallbackId`]. Removing a callback frees its slot and bumps the slot's
//! generation, so stale handles held by callers are harmless no-ops.
//!
//! Handlers receive the clock's target (`&mut T`) and the clock itself, so
//! they can pause, accelerate, and register or remove other callbacks while
//! the clock is ticking.

use tracing::debug;

use crate::clock::Clock;

/// Handler invoked every tick with the game-time delta.
pub type ProcessFn<T> = Box<dyn FnMut(&mut T, &mut Clock<T>, f64)>;

/// Handler invoked when a callback's interval has elapsed.
pub type EndFn<T> = Box<dyn FnMut(&mut T, &mut Clock<T>)>;

/// How many times a callback's interval runs before it is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Repeat {
    /// Re-armed after every end, never removed by the clock.
    Forever,
    /// Removed once this many ends have fired.
    Times(u32),
}

impl Repeat {
    /// The counter after one `end`.
    const fn decrement(self) -> Self {
        match self {
            Self::Forever => Self::Forever,
            Self::Times(n) => Self::Times(n.saturating_sub(1)),
        }
    }

    /// Whether another interval remains.
    pub const fn has_remaining(self) -> bool {
        match self {
            Self::Forever => true,
            Self::Times(n) => n > 0,
        }
    }
}

/// A schedulable unit of work, not yet registered.
///
/// Build one with [`Callback::new`] and the chained setters, then hand it
/// to [`Clock::add_timer_callback`].
pub struct Callback<T> {
    interval: f64,
    repeat: Repeat,
    on_process: Option<ProcessFn<T>>,
    on_end: Option<EndFn<T>>,
}

impl<T> Callback<T> {
    /// A one-shot callback that ends `interval` game seconds after it starts.
    pub const fn new(interval: f64) -> Self {
        Self {
            interval,
            repeat: Repeat::Times(1),
            on_process: None,
            on_end: None,
        }
    }

    /// Set the repeat counter.
    #[must_use]
    pub const fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Set the per-tick handler.
    #[must_use]
    pub fn on_process<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut T, &mut Clock<T>, f64) + 'static,
    {
        self.on_process = Some(Box::new(f));
        self
    }

    /// Set the end-of-interval handler.
    #[must_use]
    pub fn on_end<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut T, &mut Clock<T>) + 'static,
    {
        self.on_end = Some(Box::new(f));
        self
    }

    /// Interval length in game seconds.
    pub const fn interval(&self) -> f64 {
        self.interval
    }
}

impl<T> core::fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Callback")
            .field("interval", &self.interval)
            .field("repeat", &self.repeat)
            .field("has_process", &self.on_process.is_some())
            .field("has_end", &self.on_end.is_some())
            .finish()
    }
}

/// Handle to a registered callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId {
    index: u32,
    generation: u32,
}

/// Public view of a registered callback's schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallbackInfo {
    /// Interval length in game seconds.
    pub interval: f64,
    /// Remaining repeats.
    pub repeat: Repeat,
    /// Processing priority (higher runs first).
    pub priority: i32,
    /// Game time the current interval started.
    pub start_time: f64,
    /// Game time the current interval ends.
    pub end_time: f64,
}

/// The two handlers of a live callback, lent out while they run.
pub(crate) struct Handlers<T> {
    pub(crate) on_process: Option<ProcessFn<T>>,
    pub(crate) on_end: Option<EndFn<T>>,
}

struct Entry<T> {
    info: CallbackInfo,
    // `None` only while the clock is running one of the handlers.
    handlers: Option<Handlers<T>>,
}

impl<T> Entry<T> {
    fn set_start_time(&mut self, now: f64) {
        self.info.start_time = now;
        self.info.end_time = now + self.info.interval;
    }
}

struct Slot<T> {
    generation: u32,
    entry: Option<Entry<T>>,
}

/// Generational storage for live callbacks plus their processing order.
///
/// `order` is kept sorted by descending priority with insertion order for
/// ties. Removal only frees the slot; dead handles are purged from `order`
/// by [`CallbackArena::compact`].
pub struct CallbackArena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    order: Vec<CallbackId>,
}

impl<T> Default for CallbackArena<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
        }
    }
}

impl<T> CallbackArena<T> {
    /// Store a callback starting at `start_time` and return its handle.
    pub(crate) fn insert(&mut self, callback: Callback<T>, start_time: f64, priority: i32) -> CallbackId {
        let mut entry = Entry {
            info: CallbackInfo {
                interval: callback.interval,
                repeat: callback.repeat,
                priority,
                start_time,
                end_time: start_time,
            },
            handlers: Some(Handlers {
                on_process: callback.on_process,
                on_end: callback.on_end,
            }),
        };
        entry.set_start_time(start_time);

        let id = if let Some(index) = self.free.pop() {
            let generation = self.slot_generation(index);
            if let Some(slot) = self.slots.get_mut(index as usize) {
                slot.entry = Some(entry);
            }
            CallbackId { index, generation }
        } else {
            let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            self.slots.push(Slot {
                generation: 0,
                entry: Some(entry),
            });
            CallbackId {
                index,
                generation: 0,
            }
        };

        let position = self
            .order
            .iter()
            .position(|other| self.get(*other).is_some_and(|info| info.priority < priority))
            .unwrap_or(self.order.len());
        self.order.insert(position, id);

        debug!(index = id.index, priority, start_time, "Timer callback registered");
        id
    }

    /// Free a callback's slot. Returns `false` for stale handles.
    pub(crate) fn remove(&mut self, id: CallbackId) -> bool {
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        if slot.entry.take().is_none() {
            return false;
        }
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        debug!(index = id.index, "Timer callback removed");
        true
    }

    /// Whether the handle refers to a live callback.
    pub fn contains(&self, id: CallbackId) -> bool {
        self.get(id).is_some()
    }

    /// Schedule information for a live callback.
    pub fn get(&self, id: CallbackId) -> Option<&CallbackInfo> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entry.as_ref())
            .map(|entry| &entry.info)
    }

    /// Number of live callbacks.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.entry.is_some()).count()
    }

    /// Whether no callbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live handles in processing order.
    pub fn ordered_ids(&self) -> Vec<CallbackId> {
        self.order.iter().copied().filter(|id| self.contains(*id)).collect()
    }

    /// Borrow a callback's handlers out of its slot while they run.
    pub(crate) fn take_handlers(&mut self, id: CallbackId) -> Option<Handlers<T>> {
        self.entry_mut(id).and_then(|entry| entry.handlers.take())
    }

    /// Return lent handlers. Dropped if the callback was removed meanwhile.
    pub(crate) fn restore_handlers(&mut self, id: CallbackId, handlers: Handlers<T>) {
        if let Some(entry) = self.entry_mut(id) {
            entry.handlers = Some(handlers);
        }
    }

    /// Count one `end` against the callback's repeat counter.
    pub(crate) fn record_end(&mut self, id: CallbackId) {
        if let Some(entry) = self.entry_mut(id) {
            entry.info.repeat = entry.info.repeat.decrement();
        }
    }

    /// Re-arm at `now` if repeats remain, otherwise remove.
    pub(crate) fn rearm_or_remove(&mut self, id: CallbackId, now: f64) {
        let rearmed = match self.entry_mut(id) {
            Some(entry) if entry.info.repeat.has_remaining() => {
                entry.set_start_time(now);
                true
            }
            Some(_) => false,
            None => return,
        };
        if !rearmed {
            self.remove(id);
        }
    }

    /// Drop dead handles from the processing order.
    pub(crate) fn compact(&mut self) {
        let live: Vec<CallbackId> = self.ordered_ids();
        self.order = live;
    }

    fn slot_generation(&self, index: u32) -> u32 {
        self.slots
            .get(index as usize)
            .map_or(0, |slot| slot.generation)
    }

    fn slot_mut(&mut self, id: CallbackId) -> Option<&mut Slot<T>> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
    }

    fn entry_mut(&mut self, id: CallbackId) -> Option<&mut Entry<T>> {
        self.slot_mut(id).and_then(|slot| slot.entry.as_mut())
    }
}
