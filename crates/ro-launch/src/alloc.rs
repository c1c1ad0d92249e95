//! How a worker materializes its actor and environment.
//!
//! # Strategies
//!
//! | Strategy           | Behavior                                              |
//! |--------------------|-------------------------------------------------------|
//! | [`StackAlloc`]     | Build a fresh instance on every request.              |
//! | [`ThreadLocalAlloc`] | Build once per thread and type, then hand back the same instance. |
//! | [`AllocStrategy`]  | Pick one of the above from `size_of::<T>()` vs a threshold. |
//!
//! Callers get a [`Lease`] either way and must not assume anything about
//! identity: [`Lease::get_mut`] is the only way in.
//!
//! Thread-local instances live until [`ThreadLocalAlloc::evict`] is called
//! on that thread or the thread exits.  A `Lease` is neither `Send` nor
//! `Sync`, so a cached instance can never leave the thread that built it.

use std::any::{Any, TypeId};
use std::cell::{RefCell, RefMut};
use std::collections::HashMap;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

// ── Strategy trait ────────────────────────────────────────────────────────────

pub trait AllocationStrategy {
    /// Obtain an instance of `T`, calling `make` only if one has to be built.
    fn acquire<T: 'static>(&self, make: impl FnOnce() -> T) -> Lease<T>;
}

/// Construct fresh on every call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StackAlloc;

impl AllocationStrategy for StackAlloc {
    #[inline]
    fn acquire<T: 'static>(&self, make: impl FnOnce() -> T) -> Lease<T> {
        Lease(Slot::Fresh(make()))
    }
}

// ── Thread-local cache ────────────────────────────────────────────────────────

thread_local! {
    // One slot per type per thread.  Values are `Rc<RefCell<T>>` erased to
    // `Rc<dyn Any>`.
    static CACHE: RefCell<HashMap<TypeId, Rc<dyn Any>>> = RefCell::new(HashMap::new());
}

/// Construct once per thread, then reuse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThreadLocalAlloc;

impl ThreadLocalAlloc {
    /// Drop the calling thread's cached `T`, if any.  Outstanding leases keep
    /// the old instance alive; the next `acquire` builds a new one.
    pub fn evict<T: 'static>() -> bool {
        CACHE.with(|cache| cache.borrow_mut().remove(&TypeId::of::<T>()).is_some())
    }

    fn cached<T: 'static>() -> Option<Rc<RefCell<T>>> {
        let erased = CACHE.with(|cache| cache.borrow().get(&TypeId::of::<T>()).cloned())?;
        erased.downcast::<RefCell<T>>().ok()
    }
}

impl AllocationStrategy for ThreadLocalAlloc {
    fn acquire<T: 'static>(&self, make: impl FnOnce() -> T) -> Lease<T> {
        if let Some(cell) = Self::cached::<T>() {
            return Lease(Slot::Cached(cell));
        }
        // `make` runs with the cache unborrowed; it may acquire other types.
        let cell = Rc::new(RefCell::new(make()));
        let erased: Rc<dyn Any> = cell.clone();
        CACHE.with(|cache| cache.borrow_mut().insert(TypeId::of::<T>(), erased));
        Lease(Slot::Cached(cell))
    }
}

// ── Size-selected strategy ────────────────────────────────────────────────────

/// The strategy a type gets: thread-local when `size_of::<T>()` exceeds the
/// threshold, stack otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocStrategy {
    Stack,
    ThreadLocal,
}

impl AllocStrategy {
    pub fn for_type<T>(threshold: usize) -> Self {
        if mem::size_of::<T>() > threshold {
            AllocStrategy::ThreadLocal
        } else {
            AllocStrategy::Stack
        }
    }
}

impl AllocationStrategy for AllocStrategy {
    fn acquire<T: 'static>(&self, make: impl FnOnce() -> T) -> Lease<T> {
        match self {
            AllocStrategy::Stack => StackAlloc.acquire(make),
            AllocStrategy::ThreadLocal => ThreadLocalAlloc.acquire(make),
        }
    }
}

// ── Lease ─────────────────────────────────────────────────────────────────────

/// Uniform handle to an acquired instance.
pub struct Lease<T>(Slot<T>);

enum Slot<T> {
    Fresh(T),
    Cached(Rc<RefCell<T>>),
}

impl<T> Lease<T> {
    /// Mutable access to the instance.
    ///
    /// # Panics
    ///
    /// If another guard for the same thread-local instance is still alive.
    pub fn get_mut(&mut self) -> LeaseGuard<'_, T> {
        match &mut self.0 {
            Slot::Fresh(value) => LeaseGuard::Fresh(value),
            Slot::Cached(cell) => LeaseGuard::Cached(cell.borrow_mut()),
        }
    }

    /// Whether the instance is shared with the thread-local cache.
    pub fn is_cached(&self) -> bool {
        matches!(self.0, Slot::Cached(_))
    }

    /// Whether both leases refer to the same instance.
    pub fn ptr_eq(&self, other: &Lease<T>) -> bool {
        match (&self.0, &other.0) {
            (Slot::Cached(a), Slot::Cached(b)) => Rc::ptr_eq(a, b),
            _ => std::ptr::eq(self, other),
        }
    }

    /// Address of the instance, for identity checks across threads.
    pub fn as_ptr(&self) -> *const T {
        match &self.0 {
            Slot::Fresh(value) => value as *const T,
            Slot::Cached(cell) => cell.as_ptr(),
        }
    }
}

/// Borrow of a leased instance; derefs to `T`.
pub enum LeaseGuard<'a, T> {
    Fresh(&'a mut T),
    Cached(RefMut<'a, T>),
}

impl<T> Deref for LeaseGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self {
            LeaseGuard::Fresh(value) => &**value,
            LeaseGuard::Cached(value) => &**value,
        }
    }
}

impl<T> DerefMut for LeaseGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        match self {
            LeaseGuard::Fresh(value) => &mut **value,
            LeaseGuard::Cached(value) => &mut **value,
        }
    }
}
