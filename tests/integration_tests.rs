//! Integration tests for the many-sender crate.
//!
//! ## Scenario Tests
//! - `test_two_values_then_done`: a closure sender delivers 1, 2, then
//!   completion
//! - `test_errors_reach_the_receiver`: producer errors are passed through
//!
//! ## Ownership Tests
//! - `test_take_transfers_ownership`: the moved-to container behaves as the
//!   source would have, and the source goes quiet
//! - `test_move_from_drops_previous_once`: move-assignment releases the old
//!   producer exactly once
//! - `test_empty_is_safe`: empty and moved-from containers never signal
//!
//! ## Adapter and Factory Tests
//! - `test_adapter_equivalence`: a wrapped closure behaves like calling it
//! - `test_data_adapter_ownership_split`: sharing keeps the data, consuming
//!   moves it out exactly once
//! - `test_factory_resolution`: every input kind maps to its adapter
//! - `test_nested_container_not_rewrapped`: erasing an erased sender is a no-op
//!
//! ## Threading Tests
//! - `test_background_thread_delivery`: a producer that hands the receiver to a
//!   worker thread delivers everything in order

mod common;

use std::{
    any::TypeId,
    sync::atomic::{AtomicUsize, Ordering},
    thread::{self, JoinHandle},
};

use common::{Recorder, Seen, assert_single_error};
use many_sender::{
    AnyManySender, AnyReceiver, DataFnSender, DataSubmitFn, DataSubmitFnOnce, FnSender, Ignore,
    PassThrough, Receiver, Sender, SubmitTo, make_any_many_sender, make_many_sender,
    markers::Many,
};
use rootcause::{Report, report};
use triomphe::Arc;

type Out = AnyReceiver<Report, i32>;

/// Sends its current value, advances by `step`, then completes.
struct Counter {
    next: i32,
    step: i32,
}

impl Sender for Counter {
    type Cardinality = Many;
}

impl SubmitTo<Out> for Counter {
    fn submit(&mut self, mut receiver: Out) {
        receiver.value(self.next);
        self.next += self.step;
        receiver.done();
    }
}

/// Counts how often it is dropped.
struct DropCounter {
    drops: Arc<AtomicUsize>,
}

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

/// Accepts receivers and never signals them.
struct Silent {
    _counter: DropCounter,
}

impl Sender for Silent {
    type Cardinality = Many;
}

impl SubmitTo<Out> for Silent {
    fn submit(&mut self, _receiver: Out) {}
}

#[test]
fn test_two_values_then_done() {
    let recorder = Recorder::new();
    let mut sender: AnyManySender<Report, i32> = make_any_many_sender(|mut out: Out| {
        out.value(1);
        out.value(2);
        out.done();
    });

    sender.submit(recorder.clone());

    assert_eq!(
        recorder.seen(),
        vec![Seen::Value(1), Seen::Value(2), Seen::Done]
    );
}

#[test]
fn test_errors_reach_the_receiver() {
    let recorder = Recorder::new();
    let mut sender: AnyManySender<Report, i32> =
        make_any_many_sender(|mut out: Out| out.error(report!("disk full")));

    sender.submit(recorder.clone());

    assert_single_error(&recorder.seen(), "disk full");
}

#[test]
fn test_take_transfers_ownership() {
    let expected = Recorder::new();
    let mut control = AnyManySender::<Report, i32>::from_producer(Counter { next: 5, step: 3 });
    control.submit(expected.clone());
    control.submit(expected.clone());

    let recorder = Recorder::new();
    let mut source = AnyManySender::<Report, i32>::from_producer(Counter { next: 5, step: 3 });
    source.submit(recorder.clone());
    let mut destination = source.take();
    destination.submit(recorder.clone());
    assert_eq!(recorder.seen(), expected.seen());

    let quiet = Recorder::new();
    source.submit(quiet.clone());
    assert!(quiet.seen().is_empty());
    assert_eq!(quiet.handles(), 1);
}

#[test]
fn test_move_from_drops_previous_once() {
    let drops = Arc::new(AtomicUsize::new(0));
    let mut target = AnyManySender::<Report, i32>::from_producer(Silent {
        _counter: DropCounter {
            drops: drops.clone(),
        },
    });
    let mut source = AnyManySender::<Report, i32>::from_producer(Counter { next: 0, step: 1 });

    target.move_from(&mut source);
    assert_eq!(drops.load(Ordering::SeqCst), 1);
    assert!(source.is_empty());

    let recorder = Recorder::new();
    target.submit(recorder.clone());
    assert_eq!(recorder.seen(), vec![Seen::Value(0), Seen::Done]);

    drop(target);
    drop(source);
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

#[test]
fn test_empty_is_safe() {
    let recorder = Recorder::new();

    let mut empty = AnyManySender::<Report, i32>::default();
    empty.submit(recorder.clone());
    empty.submit(recorder.clone());

    let mut source = AnyManySender::<Report, i32>::from_producer(Counter { next: 1, step: 1 });
    let _destination = source.take();
    source.submit(recorder.clone());

    let mut ignoring: AnyManySender<Report, i32> = make_any_many_sender(());
    ignoring.submit(recorder.clone());

    assert!(recorder.seen().is_empty());
    assert_eq!(recorder.handles(), 1);
}

#[test]
fn test_adapter_equivalence() {
    let emit = |mut out: Recorder| {
        out.value(7);
        out.value(8);
        out.error(report!("gave up"));
    };

    let direct = Recorder::new();
    emit(direct.clone());

    let adapted = Recorder::new();
    let mut sender = FnSender::new(emit);
    sender.submit(adapted.clone());

    assert_eq!(direct.seen(), adapted.seen());
    assert_eq!(adapted.seen().len(), 3);
}

/// Sends every buffered value. Sharing keeps the buffer, consuming drops it.
#[derive(Clone, Copy)]
struct Replay;

impl DataSubmitFn<Vec<i32>, Recorder> for Replay {
    fn invoke(&mut self, data: &mut Vec<i32>, mut receiver: Recorder) {
        data.iter().for_each(|&value| receiver.value(value));
        receiver.done();
    }
}

impl DataSubmitFnOnce<Vec<i32>, Recorder> for Replay {
    fn invoke_once(self, data: Vec<i32>, mut receiver: Recorder) {
        data.into_iter().for_each(|value| receiver.value(value));
        receiver.done();
    }
}

#[test]
fn test_data_adapter_ownership_split() {
    let recorder = Recorder::new();

    let mut named = DataFnSender::new(vec![1, 2], Replay);
    named.submit_sharing(recorder.clone());
    named.submit_sharing(recorder.clone());
    assert_eq!(named.data(), &[1, 2]);

    DataFnSender::new(vec![3], Replay).submit_consuming(recorder.clone());

    assert_eq!(
        recorder.seen(),
        vec![
            Seen::Value(1),
            Seen::Value(2),
            Seen::Done,
            Seen::Value(1),
            Seen::Value(2),
            Seen::Done,
            Seen::Value(3),
            Seen::Done
        ]
    );

    let drops = Arc::new(AtomicUsize::new(0));
    let kept = std::cell::RefCell::new(Vec::new());
    DataFnSender::new(
        DropCounter {
            drops: drops.clone(),
        },
        |data: DropCounter, _: ()| kept.borrow_mut().push(data),
    )
    .submit_consuming(());
    assert_eq!(drops.load(Ordering::SeqCst), 0);
    assert_eq!(kept.borrow().len(), 1);

    drop(kept);
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

#[test]
fn test_factory_resolution() {
    let _: FnSender<Ignore> = make_many_sender(());

    let _: FnSender<_> = make_many_sender(|_: Out| {});

    let passed: DataFnSender<Counter, PassThrough> =
        make_many_sender(Counter { next: 4, step: 0 });
    let paired: DataFnSender<Counter, fn(&mut Counter, Out)> =
        make_many_sender((Counter { next: 9, step: 0 }, skip_one as fn(&mut Counter, Out)));

    let recorder = Recorder::new();
    let mut erased = AnyManySender::<Report, i32>::from_producer(passed);
    erased.submit(recorder.clone());
    let mut erased = AnyManySender::<Report, i32>::from_producer(paired);
    erased.submit(recorder.clone());
    erased.submit(recorder.clone());

    assert_eq!(
        recorder.seen(),
        vec![Seen::Value(4), Seen::Done, Seen::Value(10), Seen::Done]
    );
}

/// Swallows the first subscription and forwards later ones to the counter.
fn skip_one(counter: &mut Counter, receiver: Out) {
    if counter.step == 0 {
        counter.step = 1;
        counter.next += 1;
        drop(receiver);
    } else {
        counter.submit(receiver);
    }
}

#[test]
fn test_nested_container_not_rewrapped() {
    let inner = AnyManySender::<Report, i32>::from_producer(Counter { next: 0, step: 1 });
    let outer = AnyManySender::<Report, i32>::from_producer(inner);
    assert_eq!(outer.producer_type_id(), Some(TypeId::of::<Counter>()));

    let via_factory: AnyManySender<Report, i32> = make_any_many_sender(outer);
    assert_eq!(
        via_factory.producer_type_id(),
        Some(TypeId::of::<DataFnSender<AnyManySender<Report, i32>, PassThrough>>())
    );
}

/// Hands each receiver to a new worker thread and joins every worker when
/// dropped.
#[derive(Default)]
struct Workers(Vec<JoinHandle<()>>);

impl Sender for Workers {
    type Cardinality = Many;
}

impl SubmitTo<Out> for Workers {
    fn submit(&mut self, mut receiver: Out) {
        self.0.push(thread::spawn(move || {
            for value in 1..=3 {
                receiver.value(value);
            }
            receiver.done();
        }));
    }
}

impl Drop for Workers {
    fn drop(&mut self) {
        for handle in self.0.drain(..) {
            handle.join().unwrap();
        }
    }
}

#[test]
fn test_background_thread_delivery() {
    let recorder = Recorder::new();
    let mut sender: AnyManySender<Report, i32> = make_any_many_sender(Workers::default());

    sender.submit(recorder.clone());
    drop(sender);

    assert_eq!(
        recorder.seen(),
        vec![Seen::Value(1), Seen::Value(2), Seen::Value(3), Seen::Done]
    );
    assert_eq!(recorder.handles(), 1);
}

static_assertions::assert_impl_all!(AnyManySender<Report, i32>: Send, Sync, Sender);
static_assertions::assert_impl_all!(AnyReceiver<Report, i32>: Send);
static_assertions::assert_not_impl_any!(AnyManySender<Report, i32>: Clone);
static_assertions::assert_not_impl_any!(DataFnSender<Vec<i32>, Replay>: Sender);
