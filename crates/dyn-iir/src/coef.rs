//! Coefficient tables.
//!
//! A table is a flat run of `f32` split into blocks of `2 * order` values.
//! Each block holds the feed-forward half `b[0..order)` followed by the
//! feedback half `a[0..order)`, so block `k` starts at `k * 2 * order`. The
//! flat layout is kept as-is for interop with hosts that precompute tables;
//! [`CoefTable::from_flat`] is the decode step at that boundary.

use crate::error::{IirError, Result};

/// One coefficient set: feed-forward `b` and feedback `a`, both `order` long.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoefBlock<'a> {
    pub b: &'a [f32],
    pub a: &'a [f32],
}

impl<'a> CoefBlock<'a> {
    #[inline]
    fn split(block: &'a [f32], order: usize) -> Self {
        let (b, a) = block.split_at(order);
        Self { b, a }
    }
}

/// Borrowed view over a flat coefficient table.
#[derive(Clone, Copy, Debug)]
pub struct CoefTableRef<'a> {
    order: usize,
    data: &'a [f32],
}

impl<'a> CoefTableRef<'a> {
    pub fn new(order: usize, data: &'a [f32]) -> Result<Self> {
        check_layout(order, data.len())?;
        Ok(Self { order, data })
    }

    /// Builds a view without checking the layout.
    ///
    /// # Safety
    ///
    /// `order` must be non-zero and `data.len()` a multiple of `2 * order`.
    #[inline]
    pub unsafe fn new_unchecked(order: usize, data: &'a [f32]) -> Self {
        debug_assert!(check_layout(order, data.len()).is_ok());
        Self { order, data }
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    #[inline]
    pub fn block_len(&self) -> usize {
        self.order * 2
    }

    /// Number of blocks in the table.
    #[inline]
    pub fn len(&self) -> usize {
        match self.block_len() {
            0 => 0,
            block_len => self.data.len() / block_len,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn as_flat(&self) -> &'a [f32] {
        self.data
    }

    #[inline]
    pub fn block(&self, index: usize) -> Option<CoefBlock<'a>> {
        let data = self.data;
        let block_len = self.block_len();
        let start = index.checked_mul(block_len)?;
        let block = data.get(start..start.checked_add(block_len)?)?;
        Some(CoefBlock::split(block, self.order))
    }

    /// # Safety
    ///
    /// `index` must be below [`len`](Self::len).
    #[inline]
    pub unsafe fn block_unchecked(&self, index: usize) -> CoefBlock<'a> {
        debug_assert!(index < self.len());
        let data = self.data;
        let start = index * self.block_len();
        let b = unsafe { data.get_unchecked(start..start + self.order) };
        let a = unsafe { data.get_unchecked(start + self.order..start + self.block_len()) };
        CoefBlock { b, a }
    }

    pub fn blocks(&self) -> impl Iterator<Item = CoefBlock<'a>> + 'a {
        let (order, data) = (self.order, self.data);
        data.chunks_exact(self.block_len().max(1))
            .map(move |block| CoefBlock::split(block, order))
    }
}

/// Owned coefficient table with a fixed filter order.
#[derive(Clone, Debug, PartialEq)]
pub struct CoefTable {
    order: usize,
    data: Vec<f32>,
}

impl CoefTable {
    pub fn new(order: usize) -> Result<Self> {
        Self::with_capacity(order, 0)
    }

    pub fn with_capacity(order: usize, blocks: usize) -> Result<Self> {
        check_layout(order, 0)?;
        Ok(Self {
            order,
            data: Vec::with_capacity(blocks * order * 2),
        })
    }

    /// Decodes a flat `[b0.., a0.., b1.., a1.., ...]` table.
    pub fn from_flat(order: usize, data: Vec<f32>) -> Result<Self> {
        check_layout(order, data.len())?;
        Ok(Self { order, data })
    }

    pub fn from_blocks<I, B, A>(order: usize, blocks: I) -> Result<Self>
    where
        I: IntoIterator<Item = (B, A)>,
        B: AsRef<[f32]>,
        A: AsRef<[f32]>,
    {
        let blocks = blocks.into_iter();
        let mut table = Self::with_capacity(order, blocks.size_hint().0)?;
        for (b, a) in blocks {
            table.push_block(b.as_ref(), a.as_ref())?;
        }
        Ok(table)
    }

    /// Appends a block and returns its index.
    pub fn push_block(&mut self, b: &[f32], a: &[f32]) -> Result<usize> {
        if b.len() != self.order || a.len() != self.order {
            return Err(IirError::BlockShape {
                expected: self.order,
                b: b.len(),
                a: a.len(),
            });
        }
        let index = self.len();
        self.data.extend_from_slice(b);
        self.data.extend_from_slice(a);
        Ok(index)
    }

    #[inline]
    pub fn view(&self) -> CoefTableRef<'_> {
        CoefTableRef {
            order: self.order,
            data: &self.data,
        }
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() / (self.order * 2)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn block(&self, index: usize) -> Option<CoefBlock<'_>> {
        self.view().block(index)
    }

    #[inline]
    pub fn as_flat(&self) -> &[f32] {
        &self.data
    }

    pub fn into_flat(self) -> Vec<f32> {
        self.data
    }
}

impl<'a> From<&'a CoefTable> for CoefTableRef<'a> {
    fn from(table: &'a CoefTable) -> Self {
        table.view()
    }
}

fn check_layout(order: usize, len: usize) -> Result<()> {
    if order == 0 {
        return Err(IirError::ZeroOrder);
    }
    let block_len = order * 2;
    if len % block_len != 0 {
        return Err(IirError::TableLength { len, block_len });
    }
    Ok(())
}
