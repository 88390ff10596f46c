//! Type-erased move-only callables
//!
//! [`Callback`] stores any `FnMut(A) -> R` behind two function pointers
//! (destroy + invoke) and a two-word storage slot. Closures that fit the
//! slot live inline with no allocation; larger captures are boxed. The
//! value is movable, nullable, and deliberately not clonable, so handler
//! closures can be handed across the parser boundary without heap churn
//! for small captures.
//!
//! Multi-argument signatures take a tuple: `Callback<(u16, bool), ()>`.

use std::marker::PhantomData;
use std::mem::{self, MaybeUninit};
use std::ptr;

/// Two machine words of pointer-aligned inline storage.
type Slot = [MaybeUninit<usize>; 2];

#[inline]
const fn fits_inline<F>() -> bool {
    mem::size_of::<F>() <= mem::size_of::<Slot>() && mem::align_of::<F>() <= mem::align_of::<Slot>()
}

/// A move-only, nullable, type-erased `FnMut(A) -> R`.
pub struct Callback<A, R = ()> {
    storage: Slot,
    // None in both slots iff the callback is empty.
    handle: Option<unsafe fn(*mut u8)>,
    call: Option<unsafe fn(*mut u8, A) -> R>,
    // Inline closures are not Send/Sync-audited; keep the container local.
    _marker: PhantomData<*mut ()>,
}

unsafe fn call_inline<F: FnMut(A) -> R, A, R>(storage: *mut u8, arg: A) -> R {
    let f = &mut *(storage as *mut F);
    f(arg)
}

unsafe fn drop_inline<F>(storage: *mut u8) {
    ptr::drop_in_place(storage as *mut F);
}

unsafe fn call_boxed<F: FnMut(A) -> R, A, R>(storage: *mut u8, arg: A) -> R {
    let f = &mut **(storage as *mut *mut F);
    f(arg)
}

unsafe fn drop_boxed<F>(storage: *mut u8) {
    drop(Box::from_raw(*(storage as *mut *mut F)));
}

impl<A, R> Callback<A, R> {
    /// An empty callback; invoking it panics.
    pub fn empty() -> Self {
        Self {
            storage: [MaybeUninit::uninit(); 2],
            handle: None,
            call: None,
            _marker: PhantomData,
        }
    }

    /// Wrap a callable. Captures of at most two words (with compatible
    /// alignment) are stored inline; anything larger is boxed.
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut(A) -> R + 'static,
    {
        let mut cb = Self::empty();
        let base = cb.storage.as_mut_ptr() as *mut u8;
        if fits_inline::<F>() {
            unsafe { ptr::write(base as *mut F, f) };
            cb.handle = Some(drop_inline::<F>);
            cb.call = Some(call_inline::<F, A, R>);
        } else {
            let raw = Box::into_raw(Box::new(f));
            unsafe { ptr::write(base as *mut *mut F, raw) };
            cb.handle = Some(drop_boxed::<F>);
            cb.call = Some(call_boxed::<F, A, R>);
        }
        cb
    }

    /// Whether a callable is stored.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.handle.is_some()
    }

    /// Replace the stored callable, dropping the previous one.
    pub fn set<F>(&mut self, f: F)
    where
        F: FnMut(A) -> R + 'static,
    {
        *self = Self::new(f);
    }

    /// Clear the stored callable.
    pub fn clear(&mut self) {
        *self = Self::empty();
    }

    /// Move the callable out, leaving this one empty.
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::empty())
    }

    /// Invoke the stored callable.
    ///
    /// # Panics
    ///
    /// Panics if the callback is empty.
    pub fn call(&mut self, arg: A) -> R {
        match self.call {
            Some(call) => unsafe { call(self.storage.as_mut_ptr() as *mut u8, arg) },
            None => panic!("invoked an empty Callback"),
        }
    }
}

impl<A, R> Default for Callback<A, R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<A, R> Drop for Callback<A, R> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            unsafe { handle(self.storage.as_mut_ptr() as *mut u8) };
        }
    }
}

impl<A, R> std::fmt::Debug for Callback<A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_set())
            .finish()
    }
}
