//! Module containing the type-erased receiver storage

mod raw;
mod vtable;

pub use self::raw::RawReceiver;
