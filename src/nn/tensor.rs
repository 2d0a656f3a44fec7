//! Tensor API.
//!
//! Tensors are the outputs of the hand landmark network. A tensor is a dense, row-major,
//! N-dimensional array of `f32` values.

use std::fmt;

use tinyvec::TinyVec;

type Shape = TinyVec<[usize; 4]>;

/// A dynamically shaped tensor of `f32` values.
///
/// Data is stored contiguously in row-major order, so indexing a prefix of the dimensions always
/// yields a contiguous sub-slice.
#[derive(Clone, PartialEq)]
pub struct Tensor {
    shape: Shape,
    data: Box<[f32]>,
}

/// A borrowed view into a [`Tensor`], covering a suffix of its dimensions.
#[derive(Clone, Copy)]
pub struct TensorView<'a> {
    shape: &'a [usize],
    data: &'a [f32],
}

impl Tensor {
    /// Creates a tensor of the given shape by pulling elements from an iterator.
    ///
    /// # Panics
    ///
    /// `iter` must yield exactly as many elements as specified by `shape` (by multiplying all of
    /// its entries), otherwise this method will panic.
    #[track_caller]
    pub fn from_iter<I: IntoIterator<Item = f32>>(shape: &[usize], iter: I) -> Self {
        let data: Box<[f32]> = iter.into_iter().collect();
        let elements: usize = shape.iter().product();
        assert_eq!(
            data.len(),
            elements,
            "tensor of shape {:?} needs {} elements, got {}",
            shape,
            elements,
            data.len()
        );
        Self {
            shape: shape.iter().copied().collect(),
            data,
        }
    }

    /// Returns the shape of this tensor.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the number of dimensions of this tensor.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Returns a view of the whole tensor.
    pub fn view(&self) -> TensorView<'_> {
        TensorView {
            shape: &self.shape,
            data: &self.data,
        }
    }

    /// Reinterprets the tensor's data with a different shape.
    ///
    /// Returns [`None`] if `shape` does not describe the same number of elements.
    pub fn reshape(&self, shape: &[usize]) -> Option<Tensor> {
        if shape.iter().product::<usize>() != self.data.len() {
            return None;
        }
        Some(Self {
            shape: shape.iter().copied().collect(),
            data: self.data.clone(),
        })
    }

    /// Indexes a prefix of the tensor's dimensions with `indices`.
    ///
    /// See [`TensorView::index`].
    #[track_caller]
    pub fn index<const N: usize>(&self, indices: [usize; N]) -> TensorView<'_> {
        self.view().index(indices)
    }

    /// Returns the first element of the tensor, regardless of its shape.
    ///
    /// Score outputs come as `[]`, `[1]` or `[1, 1]` depending on the exported model; this reads
    /// any of them. Returns [`None`] for empty tensors.
    pub fn first(&self) -> Option<f32> {
        self.data.first().copied()
    }

    /// Returns the value stored in a 0-dimensional tensor.
    ///
    /// # Panics
    ///
    /// `self` must have exactly 0 dimensions, otherwise this method will panic.
    #[track_caller]
    pub fn as_singular(&self) -> f32 {
        self.view().as_singular()
    }
}

impl From<f32> for Tensor {
    fn from(value: f32) -> Self {
        Tensor::from_iter(&[], [value])
    }
}

impl<const N: usize> From<[f32; N]> for Tensor {
    fn from(arr: [f32; N]) -> Self {
        Tensor::from_iter(&[N], arr)
    }
}

impl<'a> TensorView<'a> {
    /// Returns the shape of this view.
    pub fn shape(&self) -> &'a [usize] {
        self.shape
    }

    /// Returns the number of dimensions of this view.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Indexes a prefix of the view's dimensions with `indices`.
    ///
    /// For a view of shape `[2, 3, 4, 5]`, indexing with `[a, b]` returns a view of shape
    /// `[4, 5]`, and indexing with four indices returns a view of shape `[]` (a single value).
    /// Indexing with zero indices returns a copy of the view.
    ///
    /// # Panics
    ///
    /// This method will panic if `indices` has more entries than `self` has dimensions, or if any
    /// index is out of bounds.
    #[track_caller]
    pub fn index<const N: usize>(&self, indices: [usize; N]) -> TensorView<'a> {
        assert!(
            N <= self.rank(),
            "attempted to index tensor of shape {:?} with {:?}",
            self.shape,
            indices
        );

        let mut data = self.data;
        for (dim, &index) in indices.iter().enumerate() {
            assert!(
                index < self.shape[dim],
                "attempted to index tensor of shape {:?} with {:?}",
                self.shape,
                indices
            );
            let stride: usize = self.shape[dim + 1..].iter().product();
            data = &data[index * stride..(index + 1) * stride];
        }

        TensorView {
            shape: &self.shape[N..],
            data,
        }
    }

    /// Returns the values stored in a 1-dimensional view as a slice.
    ///
    /// # Panics
    ///
    /// `self` must have exactly 1 dimension, otherwise this method panics.
    #[track_caller]
    pub fn as_slice(&self) -> &'a [f32] {
        assert_eq!(
            self.rank(),
            1,
            "attempted to access tensor view of shape {:?} as slice",
            self.shape
        );
        self.data
    }

    /// Returns the value stored in a 0-dimensional view.
    ///
    /// # Panics
    ///
    /// `self` must have exactly 0 dimensions, otherwise this method will panic.
    #[track_caller]
    pub fn as_singular(&self) -> f32 {
        assert_eq!(
            self.rank(),
            0,
            "attempted to access view of shape {:?} as singular element",
            self.shape,
        );
        self.data[0]
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape())
            .finish()
    }
}

impl fmt::Debug for TensorView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TensorView")
            .field("shape", &self.shape())
            .finish()
    }
}
