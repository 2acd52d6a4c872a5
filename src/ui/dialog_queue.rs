//! FIFO of modal dialogs shared between view-models and the shell.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use anyhow::{bail, Result};

use crate::{domain::dialog::Dialog, usecases::contracts::MessagePresenter};

const MAX_PENDING_DIALOGS: usize = 16;

#[derive(Debug, Clone, Default)]
pub struct DialogQueue {
    pending: Rc<RefCell<VecDeque<Dialog>>>,
}

impl DialogQueue {
    /// The dialog currently on screen.
    pub fn front(&self) -> Option<Dialog> {
        self.pending.borrow().front().cloned()
    }

    pub fn is_open(&self) -> bool {
        !self.pending.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn dismiss(&self) -> Option<Dialog> {
        self.pending.borrow_mut().pop_front()
    }
}

impl MessagePresenter for DialogQueue {
    fn show(&self, dialog: Dialog) -> Result<()> {
        let mut pending = self.pending.borrow_mut();
        if pending.len() >= MAX_PENDING_DIALOGS {
            bail!("too many pending dialogs ({MAX_PENDING_DIALOGS})");
        }

        tracing::debug!(kind = ?dialog.kind, "dialog queued");
        pending.push_back(dialog);
        Ok(())
    }
}
