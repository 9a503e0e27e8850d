// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Network events
//!
//! A deliberately small observation surface: tooling (recorders, GUIs,
//! training harnesses) subscribes for coarse notifications and reads
//! whatever detail it needs back through the normal accessors. Observers
//! are transient runtime attachments; they are not part of a persisted
//! network and must be re-subscribed after a load.

/// What just happened to the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkEvent {
    /// An update completed; `time` is the new step count.
    Updated { time: u64 },
    /// Nodes or links were added or removed.
    StructureChanged,
    /// The step counter was reset to zero.
    TimeReset,
}

/// Callback interface for [`crate::Network::subscribe`].
pub trait NetworkObserver: Send {
    fn on_event(&mut self, event: &NetworkEvent);
}

impl<F: FnMut(&NetworkEvent) + Send> NetworkObserver for F {
    fn on_event(&mut self, event: &NetworkEvent) {
        self(event)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u32);

#[derive(Default)]
pub(crate) struct ObserverHub {
    observers: Vec<(ObserverId, Box<dyn NetworkObserver>)>,
    next: u32,
}

impl ObserverHub {
    pub(crate) fn subscribe(&mut self, observer: Box<dyn NetworkObserver>) -> ObserverId {
        let id = ObserverId(self.next);
        self.next += 1;
        self.observers.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    pub(crate) fn emit(&mut self, event: &NetworkEvent) {
        for (_, observer) in &mut self.observers {
            observer.on_event(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }
}
