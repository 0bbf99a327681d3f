//! Deferred tasks on a monotonic clock
//!
//! Replaces "wait N seconds then act" with explicit queued tasks. The owner of
//! the scheduler polls it once per tick and handles whatever came due. Tasks can
//! be cancelled individually by handle, or all at once by owner (e.g. when the
//! ball they refer to is destroyed).

/// Monotonic game clock (seconds since start)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Clock {
    now: f64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by a frame delta. Negative deltas are ignored.
    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.now += f64::from(dt);
        }
    }

    #[inline]
    pub fn now(&self) -> f64 {
        self.now
    }
}

/// Handle returned by `schedule`, used for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

/// Identifier of the object a task belongs to
pub type OwnerId = u32;

#[derive(Debug)]
struct Scheduled<T> {
    handle: TaskHandle,
    owner: Option<OwnerId>,
    due: f64,
    task: T,
}

/// Single-threaded task queue
#[derive(Debug)]
pub struct TaskScheduler<T> {
    pending: Vec<Scheduled<T>>,
    next_handle: u64,
}

impl<T> Default for TaskScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TaskScheduler<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_handle: 1,
        }
    }

    /// Queue `task` to come due `delay` seconds after `now`
    pub fn schedule(&mut self, now: f64, delay: f32, owner: Option<OwnerId>, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(Scheduled {
            handle,
            owner,
            due: now + f64::from(delay.max(0.0)),
            task,
        });
        handle
    }

    /// Cancel one task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.handle != handle);
        self.pending.len() != before
    }

    /// Cancel every task belonging to `owner`, returning how many were dropped
    pub fn cancel_owner(&mut self, owner: OwnerId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|s| s.owner != Some(owner));
        before - self.pending.len()
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|s| s.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every task due at `now`, earliest first.
    /// Tasks due at the same time come out in scheduling order.
    pub fn poll(&mut self, now: f64) -> Vec<T> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.due <= now);
        self.pending = rest;

        due.sort_by(|a, b| {
            a.due
                .partial_cmp(&b.due)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.handle.0.cmp(&b.handle.0))
        });
        due.into_iter().map(|s| s.task).collect()
    }
}
