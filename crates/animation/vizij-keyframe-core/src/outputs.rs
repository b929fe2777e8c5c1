//! Output contracts from controllers.
//!
//! Live output variables belong to the consumer. A controller only knows each
//! slot's [`OutputHandle`] and writes sampled values through an [`OutputSink`]
//! the consumer passes in at evaluation time.

use serde::{Deserialize, Serialize};

use crate::value::Scalar;

/// Opaque, consumer-defined key naming one live output variable.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OutputHandle(pub u32);

/// Destination for evaluated slot values.
pub trait OutputSink {
    fn write(&mut self, handle: OutputHandle, value: Scalar);
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    #[inline]
    fn write(&mut self, handle: OutputHandle, value: Scalar) {
        (**self).write(handle, value);
    }
}

/// Flat array of live values; `OutputHandle(i)` addresses element `i`.
///
/// Writes to handles beyond the bank are dropped.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputBank {
    values: Vec<Scalar>,
}

impl OutputBank {
    pub fn new(values: Vec<Scalar>) -> Self {
        Self { values }
    }

    /// `len` float outputs initialised to 0.0.
    pub fn floats(len: usize) -> Self {
        Self::new(vec![Scalar::Float(0.0); len])
    }

    /// `len` integer outputs initialised to 0.
    pub fn ints(len: usize) -> Self {
        Self::new(vec![Scalar::Int(0); len])
    }

    pub fn get(&self, handle: OutputHandle) -> Option<Scalar> {
        self.values.get(handle.0 as usize).copied()
    }

    pub fn set(&mut self, handle: OutputHandle, value: Scalar) {
        if let Some(slot) = self.values.get_mut(handle.0 as usize) {
            *slot = value;
        }
    }

    pub fn values(&self) -> &[Scalar] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl OutputSink for OutputBank {
    #[inline]
    fn write(&mut self, handle: OutputHandle, value: Scalar) {
        self.set(handle, value);
    }
}
