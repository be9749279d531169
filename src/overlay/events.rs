use crate::overlay::object::ObjectId;

/// Events emitted by an [`crate::OverlayController`] as its surface changes.
///
/// `ObjectClicked` vs `CanvasClicked` is the distinction editing UIs use to
/// open a side panel for a specific object or close it on empty-space clicks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlayEvent {
    SelectionChanged { selected: Option<ObjectId> },
    ObjectAdded { id: ObjectId },
    ObjectRemoved { id: ObjectId },
    ObjectModified { id: ObjectId },
    TextChanged { id: ObjectId },
    ObjectClicked { id: ObjectId },
    CanvasClicked,
}

impl OverlayEvent {
    /// True for events that change persisted scene content.
    ///
    /// Selection and click events are UI state only and never trigger a save.
    pub fn is_content_change(&self) -> bool {
        matches!(
            self,
            Self::ObjectAdded { .. }
                | Self::ObjectRemoved { .. }
                | Self::ObjectModified { .. }
                | Self::TextChanged { .. }
        )
    }
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&OverlayEvent)>;

/// Plain subscribe/unsubscribe listener list.
///
/// Multiple listeners are allowed and are invoked in subscription order,
/// synchronously on the emitting call stack.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&OverlayEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` when the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: &OverlayEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Drop every listener. Used on controller dispose.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn all_listeners_receive_events_in_order() {
        let seen: Rc<RefCell<Vec<(u8, OverlayEvent)>>> = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        let a = Rc::clone(&seen);
        bus.subscribe(move |ev| a.borrow_mut().push((1, ev.clone())));
        let b = Rc::clone(&seen);
        bus.subscribe(move |ev| b.borrow_mut().push((2, ev.clone())));

        bus.emit(&OverlayEvent::CanvasClicked);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], (1, OverlayEvent::CanvasClicked));
        assert_eq!(seen[1], (2, OverlayEvent::CanvasClicked));
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0u32));
        let mut bus = EventBus::new();

        let c = Rc::clone(&count);
        let id = bus.subscribe(move |_| *c.borrow_mut() += 1);

        bus.emit(&OverlayEvent::CanvasClicked);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(&OverlayEvent::CanvasClicked);

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn content_change_classification() {
        assert!(OverlayEvent::ObjectAdded { id: ObjectId(1) }.is_content_change());
        assert!(OverlayEvent::TextChanged { id: ObjectId(1) }.is_content_change());
        assert!(!OverlayEvent::SelectionChanged { selected: None }.is_content_change());
        assert!(!OverlayEvent::ObjectClicked { id: ObjectId(1) }.is_content_change());
        assert!(!OverlayEvent::CanvasClicked.is_content_change());
    }
}
