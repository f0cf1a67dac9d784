#[cfg(all(feature = "simd_keys", target_arch = "x86_64", target_feature = "sse2"))]
#[inline]
fn x86_64_sse_common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    use std::arch::x86_64::{__m128i, _mm_cmpeq_epi8, _mm_loadu_si128, _mm_movemask_epi8};

    let len = a.len().min(b.len());
    let mut idx = 0;
    while idx + 16 <= len {
        // Both loads stay inside their slices since idx + 16 <= len <= a.len(), b.len().
        let eq_mask = unsafe {
            let va = _mm_loadu_si128(a.as_ptr().add(idx) as *const __m128i);
            let vb = _mm_loadu_si128(b.as_ptr().add(idx) as *const __m128i);
            _mm_movemask_epi8(_mm_cmpeq_epi8(va, vb)) as u32
        };
        if eq_mask != 0xFFFF {
            return idx + (!eq_mask).trailing_zeros() as usize;
        }
        idx += 16;
    }
    idx + scalar_common_prefix_len(&a[idx..len], &b[idx..len])
}

#[inline]
fn scalar_common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

/// Returns the number of leading bytes `a` and `b` have in common.
#[inline]
pub fn u8_keys_common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    #[cfg(all(feature = "simd_keys", target_arch = "x86_64", target_feature = "sse2"))]
    {
        x86_64_sse_common_prefix_len(a, b)
    }

    #[cfg(not(all(feature = "simd_keys", target_arch = "x86_64", target_feature = "sse2")))]
    {
        scalar_common_prefix_len(a, b)
    }
}

/// Binary search for `key` in a sorted key array, returning the position it is at, or the
/// position it should be inserted at to keep the array sorted.
#[inline]
pub fn u8_keys_find_key_position_sorted(key: u8, keys: &[u8]) -> Result<usize, usize> {
    keys.binary_search(&key)
}
