//! Property change notification.
//!
//! Every notification carries a [`PropertyChangedArgs`] record. Records are
//! interned process-wide: asking twice for the same property name returns the
//! same `Arc`, so raising a change never allocates after the first time.

use std::{
    cell::RefCell,
    collections::HashMap,
    fmt,
    rc::{Rc, Weak},
    sync::{Arc, Mutex, OnceLock, PoisonError},
};

/// Property name meaning "every property of the instance changed".
pub const ALL_PROPERTIES: &str = "";

/// A compile-time property identifier of a view-model.
///
/// Each view-model declares an enum of its observable properties, which makes
/// notifying a property that does not exist impossible.
pub trait PropertyKey: Copy + fmt::Debug + 'static {
    fn name(self) -> &'static str;
}

/// Immutable record describing which property changed.
#[derive(Debug, PartialEq, Eq)]
pub struct PropertyChangedArgs {
    property_name: &'static str,
}

type ArgsCache = Mutex<HashMap<&'static str, Arc<PropertyChangedArgs>>>;

static ARGS_CACHE: OnceLock<ArgsCache> = OnceLock::new();

impl PropertyChangedArgs {
    /// Returns the interned record for `property_name`, creating it on first use.
    pub fn for_property(property_name: &'static str) -> Arc<Self> {
        let mut cache = ARGS_CACHE
            .get_or_init(Default::default)
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        Arc::clone(
            cache
                .entry(property_name)
                .or_insert_with(|| Arc::new(Self { property_name })),
        )
    }

    pub fn property_name(&self) -> &'static str {
        self.property_name
    }

    /// True when the record stands for a refresh of every property.
    pub fn is_all(&self) -> bool {
        self.property_name == ALL_PROPERTIES
    }

    /// True when a subscriber interested in `property` should react.
    pub fn affects(&self, property: impl PropertyKey) -> bool {
        self.is_all() || self.property_name == property.name()
    }
}

type Handler = Rc<dyn Fn(&Arc<PropertyChangedArgs>)>;

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

/// Subscriber list of a single observable instance.
#[derive(Default)]
pub struct ChangeNotifier {
    subscribers: Rc<RefCell<Subscribers>>,
}

impl ChangeNotifier {
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&Arc<PropertyChangedArgs>) + 'static,
    {
        let mut subscribers = self.subscribers.borrow_mut();
        let id = subscribers.next_id;
        subscribers.next_id += 1;
        subscribers.handlers.push((id, Rc::new(handler)));

        Subscription {
            id,
            subscribers: Rc::downgrade(&self.subscribers),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().handlers.len()
    }

    /// Delivers the record for `property_name` to every current subscriber.
    pub fn notify(&self, property_name: &'static str) -> Arc<PropertyChangedArgs> {
        let args = PropertyChangedArgs::for_property(property_name);

        // Handlers may subscribe or unsubscribe while being called.
        let handlers: Vec<Handler> = self
            .subscribers
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();

        for handler in handlers {
            handler(&args);
        }

        args
    }

    pub fn clear(&self) {
        self.subscribers.borrow_mut().handlers.clear();
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Handle returned by [`ChangeNotifier::subscribe`]. Dropping it unsubscribes.
#[must_use = "dropping a subscription removes the handler immediately"]
pub struct Subscription {
    id: u64,
    subscribers: Weak<RefCell<Subscribers>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers
                .borrow_mut()
                .handlers
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[derive(Debug, Clone, Copy)]
    enum TestProperty {
        Title,
        Body,
    }

    impl PropertyKey for TestProperty {
        fn name(self) -> &'static str {
            match self {
                Self::Title => "title",
                Self::Body => "body",
            }
        }
    }

    #[test]
    fn records_are_interned_per_property_name() {
        let first = PropertyChangedArgs::for_property("interned_probe");
        let second = PropertyChangedArgs::for_property("interned_probe");
        let other = PropertyChangedArgs::for_property("interned_probe_other");

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(first.property_name(), "interned_probe");
    }

    #[test]
    fn notify_delivers_the_interned_record() {
        let notifier = ChangeNotifier::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _subscription = notifier.subscribe(move |args| sink.borrow_mut().push(Arc::clone(args)));

        let returned = notifier.notify("title");

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert!(Arc::ptr_eq(&seen[0], &returned));
        assert!(Arc::ptr_eq(&returned, &PropertyChangedArgs::for_property("title")));
    }

    #[test]
    fn notify_without_subscribers_is_a_no_op() {
        let notifier = ChangeNotifier::default();

        let args = notifier.notify("body");

        assert_eq!(args.property_name(), "body");
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[test]
    fn dropping_subscription_stops_delivery() {
        let notifier = ChangeNotifier::default();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let subscription = notifier.subscribe(move |_| counter.set(counter.get() + 1));

        notifier.notify("title");
        subscription.unsubscribe();
        notifier.notify("title");

        assert_eq!(calls.get(), 1);
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[test]
    fn subscription_outliving_notifier_drops_cleanly() {
        let notifier = ChangeNotifier::default();
        let subscription = notifier.subscribe(|_| {});

        drop(notifier);
        drop(subscription);
    }

    #[test]
    fn handler_may_unsubscribe_another_handler_while_notified() {
        let notifier = ChangeNotifier::default();
        let victim_calls = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let slot_for_handler = Rc::clone(&slot);
        let _killer = notifier.subscribe(move |_| {
            slot_for_handler.borrow_mut().take();
        });
        let counter = Rc::clone(&victim_calls);
        *slot.borrow_mut() = Some(notifier.subscribe(move |_| counter.set(counter.get() + 1)));

        notifier.notify("title");
        notifier.notify("title");

        // Delivered once from the snapshot taken before the unsubscribe.
        assert_eq!(victim_calls.get(), 1);
        assert_eq!(notifier.subscriber_count(), 1);
    }

    #[test]
    fn affects_matches_property_or_refresh_all() {
        let title = PropertyChangedArgs::for_property(TestProperty::Title.name());
        let all = PropertyChangedArgs::for_property(ALL_PROPERTIES);

        assert!(title.affects(TestProperty::Title));
        assert!(!title.affects(TestProperty::Body));
        assert!(all.is_all());
        assert!(all.affects(TestProperty::Body));
    }
}
