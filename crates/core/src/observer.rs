/// Receives solver events and decides how the iteration should proceed.
///
/// Observers let callers monitor or steer an optimizer without changing its
/// API: recording progress, logging, or stopping a run that is good enough.
///
/// `observe` returns `Option<A>`, where `Some(action)` requests a
/// solver-specific action and `None` lets the solver continue unchanged.
///
/// Closures implement `Observer` automatically and `()` is a no-op observer.
/// Passing `&mut closure` keeps the closure usable after the run.
pub trait Observer<E, A> {
    /// Observes a solver event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Stop {
        Now,
    }

    fn drive<O: Observer<usize, Stop>>(mut observer: O, events: usize) -> Option<usize> {
        (1..=events).find(|event| observer.observe(event).is_some())
    }

    #[test]
    fn unit_observer_never_acts() {
        assert_eq!(drive((), 5), None);
    }

    #[test]
    fn closure_observer_can_act() {
        let stop_at_three = |event: &usize| (*event == 3).then_some(Stop::Now);
        assert_eq!(drive(stop_at_three, 5), Some(3));
    }

    #[test]
    fn closure_observer_can_record() {
        let mut seen = Vec::new();
        let recorder = |event: &usize| {
            seen.push(*event);
            None::<Stop>
        };

        assert_eq!(drive(recorder, 3), None);
        assert_eq!(seen, vec![1, 2, 3]);
    }
}
