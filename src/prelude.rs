//! Commonly used items for convenient importing.
//!
//! The prelude module re-exports the types, traits and functions needed to
//! build, erase and submit senders with a single use statement.
//!
//! # Usage
//!
//! ```rust
//! use many_sender::prelude::*;
//!
//! fn numbers() -> AnyManySender<(), u32> {
//!     make_any_many_sender(|mut out: AnyReceiver<(), u32>| {
//!         (1..=3).for_each(|n| out.value(n));
//!         out.done();
//!     })
//! }
//!
//! let (out, signals) = many_sender::receiver::channel();
//! numbers().submit(out);
//!
//! let total: u32 = signals.try_iter().filter_map(Signal::into_value).sum();
//! assert_eq!(total, 6);
//! ```
//!
//! # What's Included
//!
//! - **[`AnyManySender`]** and **[`AnyReceiver`]**: the erased sender and
//!   receiver
//! - **[`Receiver`]**, **[`Sender`]**, **[`SubmitTo`]** and
//!   **[`ManySenderTo`]**: the contracts
//! - **[`FnSender`]** and **[`DataFnSender`]**: the adapters
//! - **[`make_many_sender`]** and **[`make_any_many_sender`]**: the factory
//! - **[`markers`]** and **[`Signal`]**

pub use crate::{
    AnyManySender, AnyReceiver, DataFnSender, FnSender, ManySenderTo, Receiver, Sender, SubmitTo,
    make_any_many_sender, make_many_sender, markers, receiver::Signal,
};
