use crate::errors::DnaError;

/// Rotation applied to each symbol by the constraint mapper.
///
/// Every value is in 0-3; `base[i] = rotate(symbol[i], offset[i])`. Without
/// this stream a mapped sequence cannot be decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OffsetStream(Vec<u8>);

impl OffsetStream {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Validate and wrap raw offsets.
    pub fn from_vec(offsets: Vec<u8>) -> Result<Self, DnaError> {
        if let Some((index, &value)) = offsets.iter().enumerate().find(|&(_, &o)| o > 3) {
            return Err(DnaError::InvalidOffset { index, value });
        }
        Ok(Self(offsets))
    }

    #[inline]
    pub(crate) fn push(&mut self, offset: u8) {
        debug_assert!(offset < 4);
        self.0.push(offset);
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }

    /// Number of positions that needed a non-zero rotation.
    pub fn rotated(&self) -> usize {
        self.0.iter().filter(|&&o| o != 0).count()
    }
}

impl TryFrom<Vec<u8>> for OffsetStream {
    type Error = DnaError;

    fn try_from(offsets: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_vec(offsets)
    }
}
