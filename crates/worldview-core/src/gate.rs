//! The single exclusive hold on the simulated world.
//!
//! The world lives behind one async mutex. The step loop takes it for each
//! mutation step; the query dispatcher takes it for the whole duration of a
//! call (a *suspension*). Whoever holds the gate has a consistent view and
//! nobody else can mutate the world until the guard drops.
//!
//! Lock order for callers that also hold their own lock: take the caller's
//! lock first, then the gate. Never await while holding a [`Suspension`].

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, MutexGuard};

/// Exclusive access to the world for the lifetime of the guard.
#[derive(Debug)]
pub struct Suspension<'a, W> {
    guard: MutexGuard<'a, W>,
}

impl<W> Deref for Suspension<'_, W> {
    type Target = W;

    fn deref(&self) -> &W {
        &self.guard
    }
}

impl<W> DerefMut for Suspension<'_, W> {
    fn deref_mut(&mut self) -> &mut W {
        &mut self.guard
    }
}

/// Owner of the world, shared by the step loop and the query service.
#[derive(Debug)]
pub struct SimulationGate<W> {
    world: Mutex<W>,
    steps: AtomicU64,
    suspensions: AtomicU64,
}

impl<W> SimulationGate<W> {
    /// Wrap a world.
    pub fn new(world: W) -> Self {
        Self {
            world: Mutex::new(world),
            steps: AtomicU64::new(0),
            suspensions: AtomicU64::new(0),
        }
    }

    /// Suspend the simulation until the returned guard drops.
    pub async fn suspend(&self) -> Suspension<'_, W> {
        let guard = self.world.lock().await;
        self.suspensions.fetch_add(1, Ordering::Relaxed);
        Suspension { guard }
    }

    /// Run one mutation step with exclusive access.
    pub async fn step<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        let mut guard = self.world.lock().await;
        let out = f(&mut guard);
        self.steps.fetch_add(1, Ordering::Relaxed);
        out
    }

    /// `true` if someone currently holds the gate.
    pub fn is_held(&self) -> bool {
        self.world.try_lock().is_err()
    }

    /// Steps run so far.
    pub fn steps(&self) -> u64 {
        self.steps.load(Ordering::Relaxed)
    }

    /// Suspensions taken so far.
    pub fn suspensions(&self) -> u64 {
        self.suspensions.load(Ordering::Relaxed)
    }

    /// Take the world back.
    pub fn into_inner(self) -> W {
        self.world.into_inner()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn suspension_blocks_steps() {
        let gate = Arc::new(SimulationGate::new(0_u32));
        let held = gate.suspend().await;
        assert!(gate.is_held());

        let stepper = Arc::clone(&gate);
        let handle = tokio::spawn(async move { stepper.step(|w| *w += 1).await });
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(*held, 0);
        assert_eq!(gate.steps(), 0);

        drop(held);
        handle.await.unwrap();
        assert_eq!(gate.steps(), 1);
        assert_eq!(*gate.suspend().await, 1);
        assert_eq!(gate.suspensions(), 2);
    }

    #[tokio::test]
    async fn guard_allows_mutation() {
        let gate = SimulationGate::new(vec![1, 2]);
        gate.suspend().await.push(3);
        assert!(!gate.is_held());
        assert_eq!(gate.into_inner(), vec![1, 2, 3]);
    }
}
