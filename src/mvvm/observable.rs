//! Generic observable wrapper around a domain model.

use std::{
    ops::{Deref, DerefMut},
    sync::Arc,
};

use serde::{de::DeserializeOwned, Serialize};

use super::{
    error::SerializationError,
    notifier::{ChangeNotifier, PropertyChangedArgs, PropertyKey, Subscription, ALL_PROPERTIES},
    snapshot,
};

/// Owns one model together with the subscribers interested in its view-model.
#[derive(Debug)]
pub struct Observable<M> {
    model: M,
    notifier: ChangeNotifier,
    disposed: bool,
}

impl<M> Observable<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            notifier: ChangeNotifier::default(),
            disposed: false,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access for the owning view-model's setters.
    pub(crate) fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Deep copy of the current model.
    pub fn snapshot_model(&self) -> Result<M, SerializationError>
    where
        M: Serialize + DeserializeOwned,
    {
        snapshot::deep_clone(&self.model)
    }

    fn dispose(&mut self) {
        self.notifier.clear();
        self.disposed = true;
    }
}

/// Behaviour shared by every view-model built on [`Observable`].
pub trait ViewModel {
    type Model;
    type Property: PropertyKey;

    fn observable(&self) -> &Observable<Self::Model>;
    fn observable_mut(&mut self) -> &mut Observable<Self::Model>;

    fn model(&self) -> &Self::Model {
        self.observable().model()
    }

    /// Runs after every change notification, whether or not anyone listened.
    fn after_property_changed(&mut self, _property_name: &'static str) {}

    fn on_property_changed(&mut self, property: Self::Property) {
        raise(self, property.name());
    }

    /// Tells subscribers that every property may have changed.
    fn refresh_all(&mut self) {
        raise(self, ALL_PROPERTIES);
    }

    fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&Arc<PropertyChangedArgs>) + 'static,
        Self: Sized,
    {
        self.observable().notifier().subscribe(handler)
    }

    /// Drops every subscriber; a disposed view-model notifies nobody.
    fn dispose(&mut self) {
        if !self.observable().is_disposed() {
            self.observable_mut().dispose();
            tracing::debug!(
                view_model = std::any::type_name::<Self>(),
                "view-model disposed"
            );
        }
    }
}

fn raise<V>(view_model: &mut V, property_name: &'static str)
where
    V: ViewModel + ?Sized,
{
    if !view_model.observable().is_disposed() {
        view_model.observable().notifier().notify(property_name);
    }

    view_model.after_property_changed(property_name);
}

/// Stores `value` in `slot` when it differs. Returns whether it changed.
pub fn assign<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }

    *slot = value;
    true
}

/// Disposes the wrapped view-model when dropped, including during unwinding.
pub struct DisposeGuard<'a, V: ViewModel + ?Sized> {
    view_model: &'a mut V,
}

impl<'a, V: ViewModel + ?Sized> DisposeGuard<'a, V> {
    pub fn new(view_model: &'a mut V) -> Self {
        Self { view_model }
    }
}

impl<V: ViewModel + ?Sized> Deref for DisposeGuard<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        &*self.view_model
    }
}

impl<V: ViewModel + ?Sized> DerefMut for DisposeGuard<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        &mut *self.view_model
    }
}

impl<V: ViewModel + ?Sized> Drop for DisposeGuard<'_, V> {
    fn drop(&mut self) {
        self.view_model.dispose();
    }
}
