use studio_core::FetchError;

/// State of a long-running action.  `Empty` is idle, `Deferred` is loading
/// and holds the ticket of the request in flight, `Resolved` and `Rejected`
/// hold its outcome.
#[derive(Clone, Debug)]
pub enum Promise<T, D = (), E = FetchError> {
    Empty,
    Deferred(D),
    Resolved(T),
    Rejected(E),
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PromiseState {
    Empty,
    Deferred,
    Resolved,
    Rejected,
}

impl<T, D, E> Promise<T, D, E> {
    pub fn state(&self) -> PromiseState {
        match self {
            Self::Empty => PromiseState::Empty,
            Self::Deferred(_) => PromiseState::Deferred,
            Self::Resolved(_) => PromiseState::Resolved,
            Self::Rejected(_) => PromiseState::Rejected,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn is_deferred(&self, def: &D) -> bool
    where
        D: PartialEq,
    {
        matches!(self, Self::Deferred(d) if d == def)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    pub fn resolved(&self) -> Option<&T> {
        if let Self::Resolved(value) = self {
            Some(value)
        } else {
            None
        }
    }

    pub fn defer(&mut self, def: D) {
        *self = Self::Deferred(def);
    }

    pub fn resolve_or_reject(&mut self, res: Result<T, E>) {
        *self = match res {
            Ok(ok) => Self::Resolved(ok),
            Err(err) => Self::Rejected(err),
        };
    }

    /// Settle the promise, but only if it is still waiting for `def`.
    /// Returns whether the result was taken.
    pub fn update(&mut self, (def, res): (D, Result<T, E>)) -> bool
    where
        D: PartialEq,
    {
        if self.is_deferred(&def) {
            self.resolve_or_reject(res);
            true
        } else {
            false
        }
    }
}

impl<T, D, E> Default for Promise<T, D, E> {
    fn default() -> Self {
        Self::Empty
    }
}
