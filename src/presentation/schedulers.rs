//! Execution contexts for background work and result delivery
//!
//! The view-model never decides where its work runs. It asks a
//! [`SchedulerProvider`] for an `io` scheduler to run the repository call on
//! and a `ui` scheduler to publish the result on. Tests inject
//! [`Schedulers::immediate`], which runs everything on the calling thread.

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// A synchronous unit of work
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// An execution context
pub trait Scheduler: Send + Sync {
    /// Run `work` to completion on this context
    fn spawn(&self, work: BoxFuture<'static, ()>);

    /// Run `job` on this context
    fn execute(&self, job: Job);
}

/// Supplies the work and result-delivery contexts
pub trait SchedulerProvider: Send + Sync {
    fn io(&self) -> Arc<dyn Scheduler>;
    fn ui(&self) -> Arc<dyn Scheduler>;
}

/// Runs everything on the calling thread before returning
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateScheduler;

impl Scheduler for ImmediateScheduler {
    fn spawn(&self, work: BoxFuture<'static, ()>) {
        futures::executor::block_on(work);
    }

    fn execute(&self, job: Job) {
        job();
    }
}

/// Runs work as tasks on a tokio runtime
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Scheduler for the runtime the caller is running on
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl Scheduler for TokioScheduler {
    fn spawn(&self, work: BoxFuture<'static, ()>) {
        self.handle.spawn(work);
    }

    fn execute(&self, job: Job) {
        self.handle.spawn(async move { job() });
    }
}

/// Queues work for a [`MainLoop`], the UI-bound context
#[derive(Debug, Clone)]
pub struct MainThreadScheduler {
    sender: mpsc::UnboundedSender<BoxFuture<'static, ()>>,
}

/// Receiving end of a [`MainThreadScheduler`]. Work only runs while the owner drives the loop.
pub struct MainLoop {
    receiver: mpsc::UnboundedReceiver<BoxFuture<'static, ()>>,
}

/// Create a connected main-thread scheduler and loop
pub fn main_loop() -> (MainThreadScheduler, MainLoop) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (MainThreadScheduler { sender }, MainLoop { receiver })
}

impl Scheduler for MainThreadScheduler {
    fn spawn(&self, work: BoxFuture<'static, ()>) {
        if self.sender.send(work).is_err() {
            warn!("main loop is gone; dropping scheduled work");
        }
    }

    fn execute(&self, job: Job) {
        self.spawn(Box::pin(async move { job() }));
    }
}

impl MainLoop {
    /// Wait for the next queued item and run it.
    ///
    /// Returns false once every scheduler handle has been dropped and the queue is empty.
    pub async fn run_next(&mut self) -> bool {
        match self.receiver.recv().await {
            Some(work) => {
                work.await;
                true
            }
            None => false,
        }
    }

    /// Run everything already queued without waiting for more. Returns the number of items run.
    pub async fn run_until_idle(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(work) = self.receiver.try_recv() {
            work.await;
            ran += 1;
        }
        debug!(ran, "main loop idle");
        ran
    }
}

/// A fixed pair of schedulers
#[derive(Clone)]
pub struct Schedulers {
    io: Arc<dyn Scheduler>,
    ui: Arc<dyn Scheduler>,
}

impl Schedulers {
    pub fn new(io: Arc<dyn Scheduler>, ui: Arc<dyn Scheduler>) -> Self {
        Self { io, ui }
    }

    /// Both contexts run synchronously on the caller's thread
    pub fn immediate() -> Self {
        Self::new(Arc::new(ImmediateScheduler), Arc::new(ImmediateScheduler))
    }

    /// Work runs on `handle`, results are delivered through the returned [`MainLoop`]
    pub fn background(handle: Handle) -> (Self, MainLoop) {
        let (ui, main_loop) = main_loop();
        (
            Self::new(Arc::new(TokioScheduler::new(handle)), Arc::new(ui)),
            main_loop,
        )
    }
}

impl SchedulerProvider for Schedulers {
    fn io(&self) -> Arc<dyn Scheduler> {
        Arc::clone(&self.io)
    }

    fn ui(&self) -> Arc<dyn Scheduler> {
        Arc::clone(&self.ui)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn immediate_runs_before_returning() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = ImmediateScheduler;

        let c = Arc::clone(&counter);
        scheduler.spawn(Box::pin(async move {
            c.fetch_add(1, Ordering::SeqCst);
        }));
        let c = Arc::clone(&counter);
        scheduler.execute(Box::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn immediate_io_can_deliver_on_immediate_ui() {
        let schedulers = Schedulers::immediate();
        let counter = Arc::new(AtomicUsize::new(0));

        let ui = schedulers.ui();
        let c = Arc::clone(&counter);
        schedulers.io().spawn(Box::pin(async move {
            ui.execute(Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }));
        }));

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn main_loop_runs_only_when_driven() {
        let (scheduler, mut main_loop) = main_loop();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let c = Arc::clone(&counter);
            scheduler.execute(Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }));
        }
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        assert_eq!(main_loop.run_until_idle().await, 3);
        assert_eq!(counter.load(Ordering::SeqCst), 3);

        drop(scheduler);
        assert!(!main_loop.run_next().await);
    }

    #[tokio::test]
    async fn background_delivers_through_main_loop() {
        let (schedulers, mut main_loop) = Schedulers::background(Handle::current());
        let counter = Arc::new(AtomicUsize::new(0));

        let ui = schedulers.ui();
        let c = Arc::clone(&counter);
        schedulers.io().spawn(Box::pin(async move {
            ui.execute(Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }));
        }));

        assert!(main_loop.run_next().await);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
