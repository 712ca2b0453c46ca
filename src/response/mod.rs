//! Response envelopes returned by management handlers

mod envelope;

pub use envelope::*;
