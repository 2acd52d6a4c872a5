//! Predicate-gated actions bound to UI triggers.
//!
//! `can_execute` and `execute` are separate entry points. The view decides
//! whether a trigger is enabled; executing never re-checks the predicate.

use std::{fmt, rc::Rc};

type Action<T, A> = Rc<dyn Fn(&mut T, &A)>;
type Predicate<T, A> = Rc<dyn Fn(&T, &A) -> bool>;

/// An action on a target of type `T` taking an argument of type `A`.
pub struct Command<T, A> {
    name: &'static str,
    action: Action<T, A>,
    predicate: Option<Predicate<T, A>>,
}

impl<T, A> Command<T, A> {
    pub fn new<F>(name: &'static str, action: F) -> Self
    where
        F: Fn(&mut T, &A) + 'static,
    {
        Self {
            name,
            action: Rc::new(action),
            predicate: None,
        }
    }

    pub fn with_predicate<F, P>(name: &'static str, action: F, predicate: P) -> Self
    where
        F: Fn(&mut T, &A) + 'static,
        P: Fn(&T, &A) -> bool + 'static,
    {
        Self {
            name,
            action: Rc::new(action),
            predicate: Some(Rc::new(predicate)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn can_execute(&self, target: &T, argument: &A) -> bool {
        self.predicate
            .as_ref()
            .is_none_or(|predicate| predicate(target, argument))
    }

    pub fn execute(&self, target: &mut T, argument: &A) {
        tracing::debug!(command = self.name, "executing command");
        (self.action)(target, argument);
    }
}

impl<T, A> Clone for Command<T, A> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            action: Rc::clone(&self.action),
            predicate: self.predicate.clone(),
        }
    }
}

impl<T, A> fmt::Debug for Command<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("has_predicate", &self.predicate.is_some())
            .finish()
    }
}

/// A command as seen by a trigger: the command plus its last known enablement.
pub struct BoundCommand<T, A> {
    command: Command<T, A>,
    enabled: bool,
}

impl<T, A> BoundCommand<T, A> {
    pub fn bind(command: Command<T, A>, target: &T, argument: &A) -> Self {
        let enabled = command.can_execute(target, argument);
        Self { command, enabled }
    }

    pub fn command(&self) -> &Command<T, A> {
        &self.command
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Re-evaluates the predicate. Returns whether enablement changed.
    pub fn requery(&mut self, target: &T, argument: &A) -> bool {
        let enabled = self.command.can_execute(target, argument);
        let changed = enabled != self.enabled;
        self.enabled = enabled;
        changed
    }

    /// Executes the command when the last requery left it enabled.
    pub fn trigger(&self, target: &mut T, argument: &A) -> bool {
        if !self.enabled {
            tracing::debug!(command = self.command.name(), "ignored disabled trigger");
            return false;
        }

        self.command.execute(target, argument);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[derive(Default)]
    struct Tally {
        total: i32,
    }

    #[test]
    fn command_without_predicate_is_always_executable() {
        let command = Command::<Tally, i32>::new("add", |tally, amount| tally.total += amount);
        let tally = Tally::default();

        for amount in [-5, 0, 7] {
            assert!(command.can_execute(&tally, &amount));
        }
    }

    #[test]
    fn can_execute_mirrors_predicate_without_running_action() {
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        let command = Command::<Tally, i32>::with_predicate(
            "add",
            move |tally, amount| {
                counter.set(counter.get() + 1);
                tally.total += amount;
            },
            |_, amount| *amount > 0,
        );
        let tally = Tally::default();

        for amount in [-1, 0, 1, 10] {
            assert_eq!(command.can_execute(&tally, &amount), amount > 0);
        }
        assert_eq!(runs.get(), 0);
    }

    #[test]
    fn execute_does_not_recheck_predicate() {
        let command = Command::<Tally, i32>::with_predicate(
            "add",
            |tally, amount| tally.total += amount,
            |_, _| false,
        );
        let mut tally = Tally::default();

        command.execute(&mut tally, &3);

        assert_eq!(tally.total, 3);
    }

    #[test]
    fn bound_command_only_sees_changes_after_requery() {
        let command = Command::<Tally, i32>::with_predicate(
            "reset",
            |tally, _| tally.total = 0,
            |tally, _| tally.total != 0,
        );
        let mut tally = Tally::default();
        let mut bound = BoundCommand::bind(command, &tally, &0);
        assert!(!bound.is_enabled());

        tally.total = 4;
        assert!(!bound.is_enabled());
        assert!(!bound.trigger(&mut tally, &0));
        assert_eq!(tally.total, 4);

        assert!(bound.requery(&tally, &0));
        assert!(bound.is_enabled());
        assert!(!bound.requery(&tally, &0));

        assert!(bound.trigger(&mut tally, &0));
        assert_eq!(tally.total, 0);
    }

    #[test]
    fn clones_share_the_same_action() {
        let command = Command::<Tally, i32>::new("add", |tally, amount| tally.total += amount);
        let copy = command.clone();
        let mut tally = Tally::default();

        command.execute(&mut tally, &1);
        copy.execute(&mut tally, &2);

        assert_eq!(tally.total, 3);
        assert_eq!(copy.name(), "add");
    }
}
