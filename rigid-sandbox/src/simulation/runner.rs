// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Fixed-timestep loop on a dedicated thread
//!
//! The runner owns the [`Simulation`] behind one coarse mutex. The loop
//! takes the lock for each step (integrate every object, then resolve every
//! pair) and releases it between steps, so a command or a render pass
//! always observes state at a step boundary. Between accumulator drains the
//! thread sleeps for `PhysicsConfig::idle_sleep`.
//!
//! Wall-clock time goes into the simulation's own accumulator, so a
//! [`Simulation::reset`] issued through a command also drops time the loop
//! has not simulated yet.
//!
//! Shutdown is cooperative: [`SimulationRunner::stop`] clears the running
//! flag and joins the thread, and dropping the runner does the same, so the
//! simulation is never freed while the loop can still reach it.

use super::Simulation;
use crate::error::{Result, SimError};
use crate::objects::Object;
use log::{error, info, trace};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Drives a [`Simulation`] from a background thread
///
/// # Examples
///
/// ```no_run
/// use rigid_sandbox::config::PhysicsConfig;
/// use rigid_sandbox::simulation::{Simulation, SimulationRunner};
///
/// let sim = Simulation::new(PhysicsConfig::default()).unwrap();
/// let mut runner = SimulationRunner::new(sim);
/// runner.start().unwrap();
/// runner.command(|sim| sim.spawn_default_ball()).unwrap();
/// std::thread::sleep(std::time::Duration::from_millis(100));
/// let count = runner.with_objects(|objects| objects.len());
/// runner.stop().unwrap();
/// assert_eq!(count, 1);
/// ```
#[derive(Debug)]
pub struct SimulationRunner {
    shared: Arc<Mutex<Simulation>>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SimulationRunner {
    /// Wrap a simulation; the thread is not started yet
    pub fn new(simulation: Simulation) -> Self {
        SimulationRunner {
            shared: Arc::new(Mutex::new(simulation)),
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    /// Spawn the simulation thread
    pub fn start(&mut self) -> Result<()> {
        if self.handle.is_some() {
            return Err(SimError::AlreadyRunning);
        }
        self.running.store(true, Ordering::Release);

        let shared = Arc::clone(&self.shared);
        let running = Arc::clone(&self.running);
        let spawned = thread::Builder::new()
            .name("simulation".into())
            .spawn(move || run_loop(&shared, &running));

        match spawned {
            Ok(handle) => {
                self.handle = Some(handle);
                info!("Simulation thread started");
                Ok(())
            }
            Err(err) => {
                self.running.store(false, Ordering::Release);
                Err(SimError::ThreadSpawn(err))
            }
        }
    }

    /// Signal the loop to finish its current drain and join it
    ///
    /// Stopping a runner that is not running is a no-op.
    pub fn stop(&mut self) -> Result<()> {
        self.running.store(false, Ordering::Release);
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        handle.join().map_err(|_| SimError::WorkerPanicked)?;
        info!("Simulation thread stopped");
        Ok(())
    }

    /// Whether the thread has been started and not stopped
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Run an input command under the lock
    pub fn command<R>(&self, f: impl FnOnce(&mut Simulation) -> R) -> R {
        f(&mut lock(&self.shared))
    }

    /// Read the whole simulation under the lock, e.g. to render a frame
    pub fn with_scene<R>(&self, f: impl FnOnce(&Simulation) -> R) -> R {
        f(&lock(&self.shared))
    }

    /// Read the object collection under the lock
    pub fn with_objects<R>(&self, f: impl FnOnce(&[Object]) -> R) -> R {
        f(lock(&self.shared).objects())
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> Simulation {
        lock(&self.shared).clone()
    }
}

impl Drop for SimulationRunner {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            error!("Error while stopping simulation thread: {}", err);
        }
    }
}

/// A panic while holding the lock leaves plain numeric state behind, which
/// is still consistent at the step boundary the panic interrupted.
fn lock(shared: &Mutex<Simulation>) -> MutexGuard<'_, Simulation> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

fn run_loop(shared: &Mutex<Simulation>, running: &AtomicBool) {
    let idle_sleep = lock(shared).config().idle_sleep;
    let mut last = Instant::now();
    let mut steps: u64 = 0;

    while running.load(Ordering::Acquire) {
        let now = Instant::now();
        lock(shared).accumulate_time(now.duration_since(last).as_secs_f64());
        last = now;

        // The lock is released between steps so commands can interleave
        loop {
            let stepped = lock(shared).step_pending();
            if stepped.is_none() {
                break;
            }
            steps += 1;
        }
        trace!("{} steps simulated", steps);

        thread::sleep(idle_sleep);
    }
}
