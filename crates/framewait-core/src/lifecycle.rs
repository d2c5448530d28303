use crate::{CancellationToken, FrameClock, RuntimeHandle, TaskHandle};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::rc::Rc;

/// A host object whose lifetime bounds the waits started on its behalf.
pub trait Component {
    /// Label used in diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Clock of the runtime the component lives in.
    fn frame_clock(&self) -> FrameClock;

    /// Token cancelled when the component is destroyed.
    fn destroy_cancellation_token(&self) -> CancellationToken;

    fn is_destroyed(&self) -> bool {
        self.destroy_cancellation_token().is_cancelled()
    }
}

struct ComponentState {
    tasks: Vec<TaskHandle>,
}

/// Concrete [`Component`] bound to a runtime.
///
/// Destroying the scope cancels its destroy token. Tasks launched through
/// the scope keep running and observe the destruction through the token.
#[derive(Clone)]
pub struct ComponentScope {
    name: Rc<str>,
    runtime: RuntimeHandle,
    token: CancellationToken,
    state: Rc<RefCell<ComponentState>>,
}

impl ComponentScope {
    pub fn new(name: impl Into<Rc<str>>, runtime: RuntimeHandle) -> Self {
        Self {
            name: name.into(),
            runtime,
            token: CancellationToken::new(),
            state: Rc::new(RefCell::new(ComponentState { tasks: Vec::new() })),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn runtime(&self) -> RuntimeHandle {
        self.runtime.clone()
    }

    /// Spawns `future` on the component's runtime.
    ///
    /// Returns `false` when the component is already destroyed or the
    /// runtime is gone; the future is dropped without being polled.
    pub fn launch(&self, future: impl Future<Output = ()> + 'static) -> bool {
        if self.is_destroyed() {
            log::debug!("not launching task on destroyed component {}", self.name);
            return false;
        }
        // Filled in once spawned; the task is first polled on a later drain.
        let task_id = Rc::new(Cell::new(None::<u64>));
        let finished_id = Rc::clone(&task_id);
        let state = Rc::downgrade(&self.state);
        let tracked = async move {
            future.await;
            if let (Some(state), Some(id)) = (state.upgrade(), finished_id.get()) {
                state.borrow_mut().tasks.retain(|task| task.id() != id);
            }
        };
        match self.runtime.spawn_ui(tracked) {
            Some(handle) => {
                task_id.set(Some(handle.id()));
                self.state.borrow_mut().tasks.push(handle);
                true
            }
            None => false,
        }
    }

    /// Number of launched tasks that have not finished yet.
    pub fn launched_tasks(&self) -> usize {
        self.state.borrow().tasks.len()
    }

    pub fn destroy(&self) {
        if self.token.is_cancelled() {
            return;
        }
        log::debug!("destroying component {}", self.name);
        self.token.cancel();
        // The waker only schedules a frame; make sure tasks are polled.
        self.runtime.schedule();
    }

    /// Destroys the component and drops every task it launched.
    pub fn abort(&self) {
        self.destroy();
        let tasks = std::mem::take(&mut self.state.borrow_mut().tasks);
        for task in tasks {
            task.cancel();
        }
    }
}

impl Component for ComponentScope {
    fn name(&self) -> &str {
        &self.name
    }

    fn frame_clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    fn destroy_cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    fn is_destroyed(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl fmt::Debug for ComponentScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentScope")
            .field("name", &self.name)
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/lifecycle_tests.rs"]
mod tests;
