//! Adapters that turn closures, and data paired with closures, into senders.

mod data;
mod function;

pub use self::{
    data::{DataFnSender, DataSubmitFn, DataSubmitFnOnce, PassThrough},
    function::{FnSender, Ignore, SubmitFn},
};
