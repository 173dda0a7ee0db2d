//! Fakes shared by the unit tests: virtual-time scheduler, in-memory store,
//! scripted endpoint and image probe.

use crate::draft::ContactFields;
use crate::endpoint::{ContactEndpoint, SubmitReply};
use crate::error::{DraftError, SubmitError};
use crate::slideshow::ImageProbe;
use crate::store::KeyValueStore;
use crate::timer::{Clock, Scheduler};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};
use std::time::Duration;

struct Pending {
    id: u64,
    due: u64,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Queue {
    now: u64,
    next_id: u64,
    tasks: Vec<Pending>,
}

/// Scheduler whose time only moves when `advance` is called. Also acts as
/// the clock, starting at `start_ms`.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<Queue>>,
}

pub struct ManualHandle {
    id: u64,
    queue: Weak<RefCell<Queue>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        if let Some(queue) = self.queue.upgrade() {
            queue.borrow_mut().tasks.retain(|t| t.id != self.id);
        }
    }
}

impl ManualScheduler {
    pub fn starting_at(start_ms: u64) -> Self {
        let scheduler = Self::default();
        scheduler.queue.borrow_mut().now = start_ms;
        scheduler
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().tasks.len()
    }

    /// Move time forward, firing due tasks in order. Tasks run with the queue
    /// unborrowed so they may schedule or cancel.
    pub fn advance(&self, by: Duration) {
        let target = self.queue.borrow().now + by.as_millis() as u64;
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                let idx = queue
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.id))
                    .map(|(i, _)| i);
                match idx {
                    Some(i) => {
                        let pending = queue.tasks.remove(i);
                        queue.now = pending.due;
                        Some(pending.task)
                    }
                    None => {
                        queue.now = target;
                        None
                    }
                }
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> ManualHandle {
        let mut queue = self.queue.borrow_mut();
        let id = queue.next_id;
        queue.next_id += 1;
        let due = queue.now + delay.as_millis() as u64;
        queue.tasks.push(Pending { id, due, task });
        ManualHandle {
            id,
            queue: Rc::downgrade(&self.queue),
        }
    }
}

impl Clock for ManualScheduler {
    fn now_ms(&self) -> u64 {
        self.queue.borrow().now
    }
}

/// In-memory store that counts writes.
#[derive(Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DraftError> {
        self.writes.set(self.writes.get() + 1);
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// Endpoint returning a fixed reply and recording what it was sent.
pub struct ScriptedEndpoint {
    reply: Result<SubmitReply, SubmitError>,
    pub sent: RefCell<Vec<ContactFields>>,
}

impl ScriptedEndpoint {
    pub fn replying(status: &str, message: Option<&str>) -> Self {
        Self {
            reply: Ok(SubmitReply {
                status: status.to_owned(),
                message: message.map(str::to_owned),
            }),
            sent: RefCell::default(),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            reply: Err(SubmitError::Transport("connection refused".to_owned())),
            sent: RefCell::default(),
        }
    }
}

#[async_trait(?Send)]
impl ContactEndpoint for ScriptedEndpoint {
    async fn submit(&self, fields: &ContactFields) -> Result<SubmitReply, SubmitError> {
        self.sent.borrow_mut().push(fields.clone());
        self.reply.clone()
    }
}

/// Probe that reports only the listed URLs as existing.
#[derive(Default)]
pub struct SetProbe {
    pub existing: HashSet<String>,
    pub probed: RefCell<Vec<String>>,
}

impl SetProbe {
    pub fn with(urls: &[&str]) -> Self {
        Self {
            existing: urls.iter().map(|u| (*u).to_owned()).collect(),
            probed: RefCell::default(),
        }
    }
}

#[async_trait(?Send)]
impl ImageProbe for SetProbe {
    async fn exists(&self, url: &str) -> bool {
        self.probed.borrow_mut().push(url.to_owned());
        self.existing.contains(url)
    }
}
