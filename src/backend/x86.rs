//! x86_64 backend (SSE2, always available on this target).

use super::{MaskOps, SimdVector};
use core::arch::x86_64::*;
use core::fmt::{Debug, Formatter};

// ============================================================================
// Masks
// ============================================================================

/// 4-lane mask for SSE2.
///
/// SSE2 has no separate mask register file, so masks live in float
/// registers where each lane holds an arbitrary bit pattern.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Mask4(__m128);

impl Default for Mask4 {
    fn default() -> Self {
        unsafe { Self(_mm_setzero_ps()) }
    }
}

impl Debug for Mask4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let mut bits = [0u32; 4];
        self.store_bits(&mut bits);
        write!(f, "Mask4({:08x?})", bits)
    }
}

impl MaskOps for Mask4 {
    type Bits = u32;
    const LANES: usize = 4;

    #[inline(always)]
    fn store_bits(&self, out: &mut [u32]) {
        assert!(out.len() >= Self::LANES);
        unsafe { _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, _mm_castps_si128(self.0)) }
    }
}

/// 2-lane mask for SSE2 double-precision registers.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Mask2(__m128d);

impl Default for Mask2 {
    fn default() -> Self {
        unsafe { Self(_mm_setzero_pd()) }
    }
}

impl Debug for Mask2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let mut bits = [0u64; 2];
        self.store_bits(&mut bits);
        write!(f, "Mask2({:016x?})", bits)
    }
}

impl MaskOps for Mask2 {
    type Bits = u64;
    const LANES: usize = 2;

    #[inline(always)]
    fn store_bits(&self, out: &mut [u64]) {
        assert!(out.len() >= Self::LANES);
        unsafe { _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, _mm_castpd_si128(self.0)) }
    }
}

// ============================================================================
// F32x4
// ============================================================================

/// 4-lane f32 SIMD vector for SSE2.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct F32x4(__m128);

impl Default for F32x4 {
    fn default() -> Self {
        unsafe { Self(_mm_setzero_ps()) }
    }
}

impl Debug for F32x4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let mut arr = [0.0f32; 4];
        self.store(&mut arr);
        write!(f, "F32x4({:?})", arr)
    }
}

impl SimdVector for F32x4 {
    type Elem = f32;
    type Mask = Mask4;
    const LANES: usize = 4;

    #[inline(always)]
    fn splat(val: f32) -> Self {
        unsafe { Self(_mm_set1_ps(val)) }
    }

    #[inline(always)]
    fn load(slice: &[f32]) -> Self {
        assert!(slice.len() >= Self::LANES);
        unsafe { Self(_mm_loadu_ps(slice.as_ptr())) }
    }

    #[inline(always)]
    fn load_bits(slice: &[u32]) -> Self {
        assert!(slice.len() >= Self::LANES);
        unsafe { Self(_mm_castsi128_ps(_mm_loadu_si128(slice.as_ptr() as *const __m128i))) }
    }

    #[inline(always)]
    fn store(&self, out: &mut [f32]) {
        assert!(out.len() >= Self::LANES);
        unsafe { _mm_storeu_ps(out.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn store_bits(&self, out: &mut [u32]) {
        assert!(out.len() >= Self::LANES);
        unsafe { _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, _mm_castps_si128(self.0)) }
    }

    #[inline(always)]
    fn all_ones_shl(bits: u32) -> Self {
        unsafe {
            // pslld with the count in an xmm register: counts > 31 give zero
            let ones = _mm_set1_epi32(-1);
            let count = _mm_cvtsi32_si128(bits as i32);
            Self(_mm_castsi128_ps(_mm_sll_epi32(ones, count)))
        }
    }

    #[inline(always)]
    fn to_mask(self) -> Mask4 {
        Mask4(self.0)
    }
}

// ============================================================================
// F64x2
// ============================================================================

/// 2-lane f64 SIMD vector for SSE2.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct F64x2(__m128d);

impl Default for F64x2 {
    fn default() -> Self {
        unsafe { Self(_mm_setzero_pd()) }
    }
}

impl Debug for F64x2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let mut arr = [0.0f64; 2];
        self.store(&mut arr);
        write!(f, "F64x2({:?})", arr)
    }
}

impl SimdVector for F64x2 {
    type Elem = f64;
    type Mask = Mask2;
    const LANES: usize = 2;

    #[inline(always)]
    fn splat(val: f64) -> Self {
        unsafe { Self(_mm_set1_pd(val)) }
    }

    #[inline(always)]
    fn load(slice: &[f64]) -> Self {
        assert!(slice.len() >= Self::LANES);
        unsafe { Self(_mm_loadu_pd(slice.as_ptr())) }
    }

    #[inline(always)]
    fn load_bits(slice: &[u64]) -> Self {
        assert!(slice.len() >= Self::LANES);
        unsafe { Self(_mm_castsi128_pd(_mm_loadu_si128(slice.as_ptr() as *const __m128i))) }
    }

    #[inline(always)]
    fn store(&self, out: &mut [f64]) {
        assert!(out.len() >= Self::LANES);
        unsafe { _mm_storeu_pd(out.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn store_bits(&self, out: &mut [u64]) {
        assert!(out.len() >= Self::LANES);
        unsafe { _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, _mm_castpd_si128(self.0)) }
    }

    #[inline(always)]
    fn all_ones_shl(bits: u32) -> Self {
        unsafe {
            // psllq with the count in an xmm register: counts > 63 give zero
            let ones = _mm_set1_epi32(-1);
            let count = _mm_cvtsi32_si128(bits as i32);
            Self(_mm_castsi128_pd(_mm_sll_epi64(ones, count)))
        }
    }

    #[inline(always)]
    fn to_mask(self) -> Mask2 {
        Mask2(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn sll_count_is_read_as_unsigned() {
        // Negative i32 reinterpretation of a huge count still clears every lane.
        let mut out = [1u32; 4];
        F32x4::all_ones_shl(u32::MAX).store_bits(&mut out);
        assert_eq!(out, [0; 4]);
    }

    #[test]
    fn mask_keeps_vector_bits() {
        let v = F64x2::splat(f64::from_bits(0x7ff0_0000_0000_0000));
        let mut bits = [0u64; 2];
        v.to_mask().store_bits(&mut bits);
        assert_eq!(bits, [0x7ff0_0000_0000_0000; 2]);
    }
}
