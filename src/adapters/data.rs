use crate::{
    contracts::{Sender, SubmitTo},
    markers::Many,
};

/// The function called by [`DataFnSender::submit_sharing`], which lends the
/// data to each submission.
///
/// Implemented for every `FnMut(&mut D, R)` closure and for [`PassThrough`].
pub trait DataSubmitFn<D, R> {
    /// Handles one submitted receiver with access to the data.
    fn invoke(&mut self, data: &mut D, receiver: R);
}

impl<F, D, R> DataSubmitFn<D, R> for F
where
    F: FnMut(&mut D, R),
{
    #[inline]
    fn invoke(&mut self, data: &mut D, receiver: R) {
        (self)(data, receiver);
    }
}

/// The function called by [`DataFnSender::submit_consuming`], which gives the
/// data away to a single submission.
///
/// Implemented for every `FnOnce(D, R)` closure and for [`PassThrough`].
pub trait DataSubmitFnOnce<D, R> {
    /// Handles the final submitted receiver, taking ownership of the data.
    fn invoke_once(self, data: D, receiver: R);
}

impl<F, D, R> DataSubmitFnOnce<D, R> for F
where
    F: FnOnce(D, R),
{
    #[inline]
    fn invoke_once(self, data: D, receiver: R) {
        self(data, receiver);
    }
}

/// A data function that submits the receiver to the data itself.
///
/// The data must be a sender. [`make_many_sender`](crate::make_many_sender)
/// pairs every sender it is given with this function.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PassThrough;

impl<D, R> DataSubmitFn<D, R> for PassThrough
where
    D: SubmitTo<R>,
{
    #[inline]
    fn invoke(&mut self, data: &mut D, receiver: R) {
        data.submit(receiver);
    }
}

impl<D, R> DataSubmitFnOnce<D, R> for PassThrough
where
    D: SubmitTo<R>,
{
    #[inline]
    fn invoke_once(self, mut data: D, receiver: R) {
        data.submit(receiver);
    }
}

/// A many-value sender backed by a piece of data and a function of the data
/// and the receiver.
///
/// The sender owns both. Submitting can either lend the data to the function
/// with [`submit_sharing`](Self::submit_sharing), leaving the sender usable,
/// or move the data into the function with
/// [`submit_consuming`](Self::submit_consuming), using the sender up.
///
/// Any data works with the inherent submit methods. The sender only
/// implements [`Sender`] and [`SubmitTo`] when the data is itself a
/// many-value sender, and its [`SubmitTo`] implementation lends.
///
/// # Examples
///
/// ```
/// use many_sender::{DataFnSender, Receiver, receiver::{self, ChannelReceiver, Signal}};
///
/// let mut sender = DataFnSender::new(
///     vec![1, 2],
///     |items: &mut Vec<i32>, mut out: ChannelReceiver<(), i32>| {
///         items.iter().for_each(|&item| out.value(item));
///         items.push(items.len() as i32 + 1);
///         out.done();
///     },
/// );
///
/// let (out, signals) = receiver::channel();
/// sender.submit_sharing(out.clone());
/// assert_eq!(sender.data(), &[1, 2, 3]);
///
/// let (items, _) = sender.into_parts();
/// assert_eq!(items, [1, 2, 3]);
/// assert_eq!(
///     signals.try_iter().collect::<Vec<_>>(),
///     [Signal::Value(1), Signal::Value(2), Signal::Done]
/// );
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct DataFnSender<D, F> {
    data: D,
    submit_fn: F,
}

impl<D, F> DataFnSender<D, F> {
    /// Creates a sender from `data` and `submit_fn`.
    #[inline]
    pub const fn new(data: D, submit_fn: F) -> Self {
        Self { data, submit_fn }
    }

    /// Returns a reference to the data.
    #[inline]
    pub fn data(&self) -> &D {
        &self.data
    }

    /// Returns a mutable reference to the data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    /// Splits the sender into its data and function.
    #[inline]
    pub fn into_parts(self) -> (D, F) {
        (self.data, self.submit_fn)
    }

    /// Calls the function with a mutable reference to the data and
    /// `receiver`. The sender keeps the data and can be submitted again.
    #[inline]
    pub fn submit_sharing<R>(&mut self, receiver: R)
    where
        F: DataSubmitFn<D, R>,
    {
        DataSubmitFn::invoke(&mut self.submit_fn, &mut self.data, receiver);
    }

    /// Calls the function with the data itself and `receiver`, consuming the
    /// sender.
    #[inline]
    pub fn submit_consuming<R>(self, receiver: R)
    where
        F: DataSubmitFnOnce<D, R>,
    {
        DataSubmitFnOnce::invoke_once(self.submit_fn, self.data, receiver);
    }
}

impl<D> DataFnSender<D, PassThrough> {
    /// Creates a sender that submits every receiver to `data`.
    #[inline]
    pub const fn pass_through(data: D) -> Self {
        Self::new(data, PassThrough)
    }
}

impl<D, F> Sender for DataFnSender<D, F>
where
    D: Sender<Cardinality = Many>,
{
    type Cardinality = Many;
}

impl<D, F, R> SubmitTo<R> for DataFnSender<D, F>
where
    D: Sender<Cardinality = Many>,
    F: DataSubmitFn<D, R>,
{
    #[inline]
    fn submit(&mut self, receiver: R) {
        self.submit_sharing(receiver);
    }
}
