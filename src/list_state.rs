use crate::token::ListKind;

/// Nesting of open lists and the running counters of the ordered ones.
///
/// One value lives for the duration of a single conversion; renderers feed
/// it the list open/close tokens in document order.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    context: Vec<ListKind>,
    counters: Vec<u64>,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a list. `start` is only meaningful for ordered lists.
    pub fn enter(&mut self, kind: ListKind, start: u64) {
        self.context.push(kind);
        if kind == ListKind::Ordered {
            self.counters.push(start);
        }
    }

    /// Close the innermost list. Unbalanced closes are ignored.
    pub fn exit(&mut self, kind: ListKind) {
        self.context.pop();
        if kind == ListKind::Ordered {
            self.counters.pop();
        }
    }

    /// Kind of the innermost open list.
    pub fn current(&self) -> Option<ListKind> {
        self.context.last().copied()
    }

    /// Ordinal for the next item of the innermost ordered list, advancing
    /// its counter.
    ///
    /// Only call this while [`current`](Self::current) is `Ordered`. An
    /// empty counter stack yields 1.
    pub fn next_ordinal(&mut self) -> u64 {
        match self.counters.last_mut() {
            Some(counter) => {
                let ordinal = *counter;
                *counter += 1;
                ordinal
            }
            None => 1,
        }
    }
}
