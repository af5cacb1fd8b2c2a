//! Marshaling of work onto the UI-owning thread
//!
//! Telemetry updates arrive on arbitrary producer threads, but all
//! UI-surface mutation and listener work that touches UI state must run on
//! the single thread that owns the rendering state. The dispatcher is that
//! capability, passed explicitly wherever marshaling is needed so tests can
//! construct their own.

use crossbeam::channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, ThreadId};

type Task = Box<dyn FnOnce() + Send>;

/// Hands tasks to the UI-owning thread.
///
/// A task submitted from the owner thread runs immediately; a task submitted
/// from any other thread is enqueued and runs when the owner thread next
/// drains the queue. Submission is fire-and-forget. Tasks enqueued from one
/// producer thread run in submission order; there is no cross-producer
/// ordering beyond that.
///
/// A real shell pumps [`UiDispatcher::drain`] from its main-loop idle hook;
/// tests call it directly.
pub struct UiDispatcher {
    owner: ThreadId,
    tx: Sender<Task>,
    rx: Receiver<Task>,
}

impl UiDispatcher {
    /// Create a dispatcher owned by the calling thread.
    pub fn new() -> Arc<Self> {
        let (tx, rx) = unbounded();
        Arc::new(Self {
            owner: thread::current().id(),
            tx,
            rx,
        })
    }

    /// Whether the calling thread is the UI-owning thread.
    pub fn is_owner_thread(&self) -> bool {
        thread::current().id() == self.owner
    }

    /// Run `task` on the owner thread as soon as possible.
    ///
    /// On the owner thread the task runs before this returns; elsewhere it is
    /// enqueued without blocking.
    pub fn run_on_owner(&self, task: impl FnOnce() + Send + 'static) {
        if self.is_owner_thread() {
            task();
        } else {
            // The send only fails if the dispatcher itself is gone, in which
            // case there is no owner thread left to run anything.
            let _ = self.tx.send(Box::new(task));
        }
    }

    /// Run all tasks queued so far. Returns the number executed.
    ///
    /// Must be called from the owner thread. Tasks that enqueue follow-up
    /// work from the owner thread run that work inline, so one drain settles
    /// a whole cascade.
    pub fn drain(&self) -> usize {
        debug_assert!(
            self.is_owner_thread(),
            "UiDispatcher::drain called off the owner thread"
        );
        let mut count = 0;
        while let Ok(task) = self.rx.try_recv() {
            task();
            count += 1;
        }
        count
    }
}
