//! Helpers shared by the integration tests.

#![allow(dead_code)]

use many_sender::Receiver;
use rootcause::Report;
use spin::Mutex;
use triomphe::Arc;

/// A signal as recorded by [`Recorder`]. Errors are kept as their rendered
/// text, since [`Report`] cannot be compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seen {
    Value(i32),
    Error(String),
    Done,
}

/// A receiver that records every signal it gets. Clones share the record.
#[derive(Clone, Default)]
pub struct Recorder {
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().clone()
    }

    /// The number of live handles to the shared record, this one included.
    pub fn handles(&self) -> usize {
        Arc::count(&self.seen)
    }
}

impl Receiver<Report, i32> for Recorder {
    fn value(&mut self, value: i32) {
        self.seen.lock().push(Seen::Value(value));
    }

    fn error(&mut self, error: Report) {
        self.seen.lock().push(Seen::Error(error.to_string()));
    }

    fn done(&mut self) {
        self.seen.lock().push(Seen::Done);
    }
}

/// Asserts that `seen` is one error whose rendering contains `message`.
pub fn assert_single_error(seen: &[Seen], message: &str) {
    match seen {
        [Seen::Error(rendered)] => assert!(
            rendered.contains(message),
            "{rendered:?} does not mention {message:?}"
        ),
        other => panic!("expected a single error, got {other:?}"),
    }
}
