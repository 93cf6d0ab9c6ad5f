#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use navrouter::router::Router;
use serde_json::Value;

/// Collects everything a router sends to its sink.
#[derive(Clone, Default)]
pub struct Recorder {
    values: Rc<RefCell<Vec<Value>>>,
}

impl Recorder {
    /// Subscribe a fresh recorder to `router`, returning it with the unsubscribe handle.
    pub fn subscribe(router: &Router) -> (Self, navrouter::router::Unsubscribe) {
        let recorder = Self::default();
        let values = Rc::clone(&recorder.values);
        let subscription = router.subscribe(move |value| values.borrow_mut().push(value));
        (recorder, subscription)
    }

    pub fn values(&self) -> Vec<Value> {
        self.values.borrow().clone()
    }

    pub fn take(&self) -> Vec<Value> {
        self.values.borrow_mut().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

/// Shared, ordered log of stage names.
#[derive(Clone, Default)]
pub struct Trail {
    entries: Rc<RefCell<Vec<String>>>,
}

impl Trail {
    pub fn push(&self, entry: impl Into<String>) {
        self.entries.borrow_mut().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }
}
