use core::marker::PhantomData;

use crate::{
    adapters::{DataFnSender, FnSender, Ignore, PassThrough},
    any_receiver::AnyReceiver,
    any_sender::AnyManySender,
    contracts::{Sender, SubmitTo},
    markers::Many,
};

/// Conversion into a many-value sender.
///
/// The `Marker` parameter only keeps the implementations apart. It is always
/// inferred and never needs to be written out. The implementations are:
///
/// | Input                                    | Marker          | Result                          |
/// |------------------------------------------|-----------------|---------------------------------|
/// | `()`                                     | [`FromNothing`] | [`FnSender<Ignore>`]            |
/// | a closure `F: FnMut(R)`                  | [`FromFn<R>`]   | [`FnSender<F>`]                 |
/// | a sender `S: Sender<Cardinality = Many>` | [`FromSender`]  | `DataFnSender<S, PassThrough>`  |
/// | a pair `(D, F)` of a sender and function | [`FromData`]    | [`DataFnSender<D, F>`]          |
///
/// A closure is never a [`Sender`], so every input matches exactly one row.
///
/// [`FnSender<Ignore>`]: FnSender
/// [`FnSender<F>`]: FnSender
/// [`DataFnSender<D, F>`]: DataFnSender
pub trait IntoManySender<Marker>: Sized {
    /// The sender built from `Self`.
    type Sender: Sender<Cardinality = Many>;

    /// Builds the sender.
    fn into_many_sender(self) -> Self::Sender;
}

/// Marker for the conversion of `()`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FromNothing;

/// Marker for the conversion of a closure taking receivers of type `R`.
#[derive(Debug)]
pub struct FromFn<R>(PhantomData<fn(R)>);

/// Marker for the conversion of a many-value sender.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FromSender;

/// Marker for the conversion of a pair of a sender and a data function.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FromData;

impl IntoManySender<FromNothing> for () {
    type Sender = FnSender<Ignore>;

    #[inline]
    fn into_many_sender(self) -> Self::Sender {
        FnSender::new(Ignore)
    }
}

impl<F, R> IntoManySender<FromFn<R>> for F
where
    F: FnMut(R),
{
    type Sender = FnSender<F>;

    #[inline]
    fn into_many_sender(self) -> Self::Sender {
        FnSender::new(self)
    }
}

impl<S> IntoManySender<FromSender> for S
where
    S: Sender<Cardinality = Many>,
{
    type Sender = DataFnSender<S, PassThrough>;

    #[inline]
    fn into_many_sender(self) -> Self::Sender {
        DataFnSender::pass_through(self)
    }
}

impl<D, F> IntoManySender<FromData> for (D, F)
where
    D: Sender<Cardinality = Many>,
{
    type Sender = DataFnSender<D, F>;

    #[inline]
    fn into_many_sender(self) -> Self::Sender {
        let (data, submit_fn) = self;
        DataFnSender::new(data, submit_fn)
    }
}

/// Builds a many-value sender from `input`.
///
/// See [`IntoManySender`] for the accepted inputs.
///
/// # Examples
///
/// ```
/// use many_sender::{FnSender, Ignore, make_many_sender};
///
/// let _nothing: FnSender<Ignore> = make_many_sender(());
/// let mut calls = 0;
/// let mut counting = make_many_sender(|_receiver: ()| calls += 1);
/// many_sender::SubmitTo::submit(&mut counting, ());
/// drop(counting);
/// assert_eq!(calls, 1);
/// ```
#[inline]
pub fn make_many_sender<M, T>(input: T) -> T::Sender
where
    T: IntoManySender<M>,
{
    input.into_many_sender()
}

/// Builds a many-value sender from `input` and erases it into an
/// [`AnyManySender<E, V>`].
///
/// # Examples
///
/// ```
/// use many_sender::{AnyManySender, AnyReceiver, Receiver, make_any_many_sender};
///
/// let sender: AnyManySender<(), u8> =
///     make_any_many_sender(|mut out: AnyReceiver<(), u8>| out.done());
/// assert!(sender.is_inline());
/// ```
#[inline]
pub fn make_any_many_sender<E, V, M, T>(input: T) -> AnyManySender<E, V>
where
    E: 'static,
    V: 'static,
    T: IntoManySender<M>,
    T::Sender: SubmitTo<AnyReceiver<E, V>> + Send + 'static,
{
    AnyManySender::from_producer(input.into_many_sender())
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::*;

    #[derive(Clone, Copy)]
    struct Nothing;

    impl Sender for Nothing {
        type Cardinality = Many;
    }

    impl SubmitTo<AnyReceiver<(), u8>> for Nothing {
        fn submit(&mut self, _receiver: AnyReceiver<(), u8>) {}
    }

    #[test]
    fn test_resolution() {
        static_assertions::assert_type_eq_all!(
            <() as IntoManySender<FromNothing>>::Sender,
            FnSender<Ignore>
        );
        static_assertions::assert_type_eq_all!(
            <Nothing as IntoManySender<FromSender>>::Sender,
            DataFnSender<Nothing, PassThrough>
        );
        static_assertions::assert_type_eq_all!(
            <(Nothing, Ignore) as IntoManySender<FromData>>::Sender,
            DataFnSender<Nothing, Ignore>
        );
    }

    #[test]
    fn test_erased_types() {
        let from_unit: AnyManySender<(), u8> = make_any_many_sender(());
        assert_eq!(
            from_unit.producer_type_id(),
            Some(TypeId::of::<FnSender<Ignore>>())
        );

        let from_sender: AnyManySender<(), u8> = make_any_many_sender(Nothing);
        assert_eq!(
            from_sender.producer_type_id(),
            Some(TypeId::of::<DataFnSender<Nothing, PassThrough>>())
        );
    }
}
