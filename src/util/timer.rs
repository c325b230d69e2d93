//! Timers and teardown guards shared by the pages.

use futures::future::LocalBoxFuture;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use wasm_bindgen::JsCast;

pub(crate) type TimerId = i32;

/// Where timers fire and futures run.
///
/// The browser implementation is [`BrowserRuntime`]; tests drive a virtual
/// clock instead so quiet periods can be stepped through deterministically.
pub(crate) trait Runtime: Clone + 'static {
    fn set_timeout(&self, delay_ms: u32, f: Box<dyn FnOnce()>) -> TimerId;
    fn clear_timeout(&self, id: TimerId);
    fn spawn(&self, fut: LocalBoxFuture<'static, ()>);
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserRuntime;

impl Runtime for BrowserRuntime {
    fn set_timeout(&self, delay_ms: u32, f: Box<dyn FnOnce()>) -> TimerId {
        let Some(win) = web_sys::window() else {
            return 0;
        };
        let cb = wasm_bindgen::closure::Closure::once_into_js(move || f());
        win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            delay_ms.min(i32::MAX as u32) as i32,
        )
        .unwrap_or(0)
    }

    fn clear_timeout(&self, id: TimerId) {
        if let Some(win) = web_sys::window() {
            win.clear_timeout_with_handle(id);
        }
    }

    fn spawn(&self, fut: LocalBoxFuture<'static, ()>) {
        leptos::task::spawn_local(fut);
    }
}

/// Shared "still mounted" flag.
///
/// Async work captures a clone and checks [`LiveFlag::is_alive`] before
/// touching state; the owner calls [`LiveFlag::tear_down`] on cleanup.
#[derive(Clone, Debug)]
pub(crate) struct LiveFlag(Arc<AtomicBool>);

impl LiveFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn tear_down(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for LiveFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-slot cancellable timer: each `restart` replaces the pending one.
#[derive(Clone)]
pub(crate) struct DebounceTimer<R: Runtime> {
    runtime: R,
    delay_ms: u32,
    pending: Arc<Mutex<Option<TimerId>>>,
}

impl<R: Runtime> DebounceTimer<R> {
    pub fn new(runtime: R, delay_ms: u32) -> Self {
        Self {
            runtime,
            delay_ms,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Cancel any pending callback and schedule `f` after the quiet period.
    pub fn restart(&self, f: impl FnOnce() + 'static) {
        self.cancel();

        let pending = self.pending.clone();
        let id = self.runtime.set_timeout(
            self.delay_ms,
            Box::new(move || {
                if let Ok(mut slot) = pending.lock() {
                    *slot = None;
                }
                f();
            }),
        );

        if let Ok(mut slot) = self.pending.lock() {
            *slot = Some(id);
        }
    }

    pub fn cancel(&self) {
        let prev = self.pending.lock().ok().and_then(|mut slot| slot.take());
        if let Some(id) = prev {
            self.runtime.clear_timeout(id);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }
}

#[cfg(test)]
pub(crate) mod manual {
    use super::*;
    use futures::executor::{LocalPool, LocalSpawner};
    use futures::task::LocalSpawnExt;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Scheduled {
        id: TimerId,
        due_ms: u64,
        f: Box<dyn FnOnce()>,
    }

    #[derive(Default)]
    struct Clock {
        now_ms: u64,
        next_id: TimerId,
        timers: Vec<Scheduled>,
    }

    /// Virtual-clock runtime: nothing happens until the test advances time.
    #[derive(Clone)]
    pub(crate) struct ManualRuntime {
        clock: Rc<RefCell<Clock>>,
        pool: Rc<RefCell<LocalPool>>,
        spawner: LocalSpawner,
    }

    impl ManualRuntime {
        pub fn new() -> Self {
            let pool = LocalPool::new();
            let spawner = pool.spawner();
            Self {
                clock: Rc::new(RefCell::new(Clock::default())),
                pool: Rc::new(RefCell::new(pool)),
                spawner,
            }
        }

        pub fn now_ms(&self) -> u64 {
            self.clock.borrow().now_ms
        }

        pub fn pending_timers(&self) -> usize {
            self.clock.borrow().timers.len()
        }

        /// Run spawned futures until none can make progress.
        pub fn settle(&self) {
            self.pool.borrow_mut().run_until_stalled();
        }

        /// Move the clock forward, firing due timers in order.
        pub fn advance(&self, ms: u64) {
            let target = self.now_ms() + ms;
            loop {
                let next = {
                    let mut clock = self.clock.borrow_mut();
                    let idx = clock
                        .timers
                        .iter()
                        .enumerate()
                        .filter(|(_, t)| t.due_ms <= target)
                        .min_by_key(|(_, t)| (t.due_ms, t.id))
                        .map(|(i, _)| i);
                    idx.map(|i| {
                        let t = clock.timers.remove(i);
                        clock.now_ms = t.due_ms;
                        t
                    })
                };

                let Some(t) = next else { break };
                (t.f)();
                self.settle();
            }
            self.clock.borrow_mut().now_ms = target;
            self.settle();
        }
    }

    impl Runtime for ManualRuntime {
        fn set_timeout(&self, delay_ms: u32, f: Box<dyn FnOnce()>) -> TimerId {
            let mut clock = self.clock.borrow_mut();
            clock.next_id += 1;
            let id = clock.next_id;
            let due_ms = clock.now_ms + u64::from(delay_ms);
            clock.timers.push(Scheduled { id, due_ms, f });
            id
        }

        fn clear_timeout(&self, id: TimerId) {
            self.clock.borrow_mut().timers.retain(|t| t.id != id);
        }

        fn spawn(&self, fut: LocalBoxFuture<'static, ()>) {
            // The pool outlives every test that uses it.
            let _ = self.spawner.spawn_local(fut);
        }
    }
}
