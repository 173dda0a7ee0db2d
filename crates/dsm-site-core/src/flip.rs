//! Flip-card controller.
//!
//! At most one card of a fixed collection is flipped at a time. Flipping a
//! card starts an auto-close timer; activating the open card again closes it
//! (toggle), it does not restart the timer.

use crate::timer::Scheduler;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use tracing::debug;

/// Index of a card in the collection bound at startup.
pub type CardId = usize;

/// Receives visual flip changes.
pub trait CardView {
    fn set_flipped(&self, card: CardId, flipped: bool);
}

/// The flipped card together with its auto-close timer. Dropping it cancels
/// the timer.
struct ActiveCard<H> {
    card: CardId,
    serial: u64,
    _timer: H,
}

struct State<H> {
    serial: u64,
    active: Option<ActiveCard<H>>,
}

/// The view sits outside `state` so a `CardView` may call back into the
/// controller.
struct Inner<S: Scheduler, V> {
    scheduler: S,
    view: V,
    cards: usize,
    dwell: Duration,
    state: RefCell<State<S::Handle>>,
}

pub struct FlipCards<S: Scheduler, V> {
    inner: Rc<Inner<S, V>>,
}

impl<S: Scheduler, V> Clone for FlipCards<S, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S, V> FlipCards<S, V>
where
    S: Scheduler + 'static,
    V: CardView + 'static,
{
    pub fn new(cards: usize, dwell: Duration, scheduler: S, view: V) -> Self {
        Self {
            inner: Rc::new(Inner {
                scheduler,
                view,
                cards,
                dwell,
                state: RefCell::new(State {
                    serial: 0,
                    active: None,
                }),
            }),
        }
    }

    /// Click / Enter / Space on `card`. Cards outside the collection are
    /// ignored.
    pub fn activate(&self, card: CardId) {
        let inner = &self.inner;
        if card >= inner.cards {
            return;
        }

        let previous = inner.state.borrow_mut().active.take();
        let reopened = previous.as_ref().is_some_and(|p| p.card == card);
        if let Some(previous) = previous {
            inner.view.set_flipped(previous.card, false);
        }
        if reopened {
            debug!(card, "flip card toggled closed");
            return;
        }

        let serial = {
            let mut state = inner.state.borrow_mut();
            state.serial += 1;
            state.serial
        };
        inner.view.set_flipped(card, true);

        let weak = Rc::downgrade(inner);
        let timer = inner.scheduler.schedule(
            inner.dwell,
            Box::new(move || Self::expire(&weak, serial)),
        );
        let displaced = inner.state.borrow_mut().active.replace(ActiveCard {
            card,
            serial,
            _timer: timer,
        });
        // A view callback may have opened another card in the meantime.
        if let Some(displaced) = displaced.filter(|d| d.card != card) {
            inner.view.set_flipped(displaced.card, false);
        }
        debug!(card, "flip card opened");
    }

    fn expire(weak: &Weak<Inner<S, V>>, serial: u64) {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let expired = inner
            .state
            .borrow_mut()
            .active
            .take_if(|a| a.serial == serial);
        if let Some(active) = expired {
            inner.view.set_flipped(active.card, false);
            debug!(card = active.card, "flip card auto-closed");
        }
    }

    pub fn active(&self) -> Option<CardId> {
        self.inner.state.borrow().active.as_ref().map(|a| a.card)
    }

    pub fn is_flipped(&self, card: CardId) -> bool {
        self.active() == Some(card)
    }
}
