//! Module containing the type-erased producer storage

mod raw;
mod vtable;

pub use self::raw::RawManySender;
