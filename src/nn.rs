//! Neural network output handling.
//!
//! The hand landmark network itself is not part of this crate: callers run it with whatever
//! inference backend they like, and hand its output tensors over as [`Outputs`].
//!
//! The network expects an RGB image resized to its declared input resolution, with pixel values
//! scaled to `[0.0, 1.0]` and a leading batch dimension of 1. Preparing that input is the caller's
//! job.

pub mod tensor;

use std::ops::Index;

use tensor::Tensor;

/// The result of a neural network inference pass.
///
/// This is a list of tensors corresponding to the network's output nodes, in the order the model
/// declares them.
#[derive(Debug, Clone, Default)]
pub struct Outputs {
    inner: Vec<Tensor>,
}

impl Outputs {
    /// Creates an [`Outputs`] list from the network's output tensors.
    pub fn new(tensors: Vec<Tensor>) -> Self {
        Self { inner: tensors }
    }

    /// Returns the number of tensors in this inference output.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the output tensor at `index`, or [`None`] if the network has fewer outputs.
    pub fn get(&self, index: usize) -> Option<&Tensor> {
        self.inner.get(index)
    }

    /// Returns an iterator over the output tensors.
    pub fn iter(&self) -> std::slice::Iter<'_, Tensor> {
        self.inner.iter()
    }
}

impl Index<usize> for Outputs {
    type Output = Tensor;

    fn index(&self, index: usize) -> &Tensor {
        &self.inner[index]
    }
}

impl FromIterator<Tensor> for Outputs {
    fn from_iter<I: IntoIterator<Item = Tensor>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Outputs {
    type Item = &'a Tensor;
    type IntoIter = std::slice::Iter<'a, Tensor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
