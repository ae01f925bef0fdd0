use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// One in-flight submission per form.
///
/// The ticket re-enables the form when dropped, whatever the outcome.
#[derive(Debug, Clone, Default)]
pub struct SubmitGuard {
    in_flight: Arc<AtomicBool>,
}

#[derive(Debug)]
pub struct SubmitTicket {
    in_flight: Arc<AtomicBool>,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` while another submission holds the ticket.
    pub fn try_begin(&self) -> Option<SubmitTicket> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitTicket {
                in_flight: self.in_flight.clone(),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

impl Drop for SubmitTicket {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

/// View-owned state that in-flight requests write into.
///
/// Requests hold a [`SlotHandle`], which stops writing once the view is
/// dropped. Later writes overwrite earlier ones.
#[derive(Debug)]
pub struct ViewSlot<T> {
    value: Arc<Mutex<Option<T>>>,
}

#[derive(Debug)]
pub struct SlotHandle<T> {
    value: Weak<Mutex<Option<T>>>,
}

impl<T> ViewSlot<T> {
    pub fn new() -> Self {
        Self {
            value: Arc::new(Mutex::new(None)),
        }
    }

    pub fn handle(&self) -> SlotHandle<T> {
        SlotHandle {
            value: Arc::downgrade(&self.value),
        }
    }

    pub fn set(&self, value: T) {
        *self.value.lock() = Some(value);
    }

    pub fn take(&self) -> Option<T> {
        self.value.lock().take()
    }

    pub fn is_empty(&self) -> bool {
        self.value.lock().is_none()
    }
}

impl<T: Clone> ViewSlot<T> {
    pub fn get(&self) -> Option<T> {
        self.value.lock().clone()
    }
}

impl<T> Default for ViewSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SlotHandle<T> {
    /// Store `value` if the view still exists. Returns whether it was kept.
    pub fn set(&self, value: T) -> bool {
        self.replace(Some(value))
    }

    /// Overwrite the slot, clearing it on `None`. A fetch that finds
    /// nothing must not leave an earlier result behind.
    pub fn replace(&self, value: Option<T>) -> bool {
        match self.value.upgrade() {
            Some(slot) => {
                *slot.lock() = value;
                true
            }
            None => {
                log::debug!("View gone, discarding result");
                false
            }
        }
    }

    pub fn is_live(&self) -> bool {
        self.value.strong_count() > 0
    }
}

impl<T> Clone for SlotHandle<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
        }
    }
}
