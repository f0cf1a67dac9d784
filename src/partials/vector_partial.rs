use crate::partials::Partial;
use crate::utils::u8_keys::u8_keys_common_prefix_len;

/// Heap allocated, variable length partial. Node prefixes in a string keyed tree have no upper
/// bound, so there is no fixed width array variant.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct VectorPartial {
    data: Box<[u8]>,
}

impl VectorPartial {
    pub fn from_slice(src: &[u8]) -> Self {
        Self {
            data: Box::from(src),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl From<&[u8]> for VectorPartial {
    fn from(src: &[u8]) -> Self {
        Self::from_slice(src)
    }
}

impl From<&str> for VectorPartial {
    fn from(src: &str) -> Self {
        Self::from_slice(src.as_bytes())
    }
}

impl AsRef<[u8]> for VectorPartial {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl Partial for VectorPartial {
    fn partial_before(&self, length: usize) -> Self {
        assert!(length <= self.data.len());
        VectorPartial::from_slice(&self.data[..length])
    }

    fn partial_after(&self, start: usize) -> Self {
        assert!(start <= self.data.len());
        VectorPartial::from_slice(&self.data[start..])
    }

    fn partial_extended_with(&self, other: &Self) -> Self {
        let mut data = Vec::with_capacity(self.data.len() + other.data.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&other.data);
        Self {
            data: data.into_boxed_slice(),
        }
    }

    #[inline(always)]
    fn at(&self, pos: usize) -> u8 {
        assert!(pos < self.data.len());
        self.data[pos]
    }

    #[inline(always)]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn prefix_length_slice(&self, slice: &[u8]) -> usize {
        u8_keys_common_prefix_len(&self.data, slice)
    }

    fn to_slice(&self) -> &[u8] {
        &self.data
    }
}
