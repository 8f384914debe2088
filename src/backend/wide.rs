//! Composite registers built from two native registers.
//!
//! A `Wide<V>` holds twice the lanes of `V` at the same element width. The
//! low half holds lanes `0..V::LANES`, the high half the rest.

use super::{MaskOps, SimdVector};

/// Two native registers acting as one vector (or mask) of twice the width.
#[derive(Copy, Clone, Debug, Default)]
pub struct Wide<V> {
    lo: V,
    hi: V,
}

impl<V: Copy> Wide<V> {
    /// Copy one native register into both halves.
    #[inline(always)]
    pub fn dup(v: V) -> Self {
        Self { lo: v, hi: v }
    }

    /// Assemble from explicit halves.
    #[inline(always)]
    pub fn from_halves(lo: V, hi: V) -> Self {
        Self { lo, hi }
    }

    /// Low half (lanes `0..V::LANES`).
    #[inline(always)]
    pub fn lo(self) -> V {
        self.lo
    }

    /// High half.
    #[inline(always)]
    pub fn hi(self) -> V {
        self.hi
    }
}

impl<M: MaskOps> MaskOps for Wide<M> {
    type Bits = M::Bits;
    const LANES: usize = 2 * M::LANES;

    #[inline(always)]
    fn store_bits(&self, out: &mut [M::Bits]) {
        let (lo, hi) = out.split_at_mut(M::LANES);
        self.lo.store_bits(lo);
        self.hi.store_bits(hi);
    }
}

impl<V: SimdVector> SimdVector for Wide<V> {
    type Elem = V::Elem;
    type Mask = Wide<V::Mask>;
    const LANES: usize = 2 * V::LANES;

    #[inline(always)]
    fn splat(val: V::Elem) -> Self {
        Self::dup(V::splat(val))
    }

    #[inline(always)]
    fn load(slice: &[V::Elem]) -> Self {
        assert!(slice.len() >= Self::LANES);
        Self::from_halves(V::load(slice), V::load(&slice[V::LANES..]))
    }

    #[inline(always)]
    fn load_bits(slice: &[<V::Elem as super::Element>::Bits]) -> Self {
        assert!(slice.len() >= Self::LANES);
        Self::from_halves(V::load_bits(slice), V::load_bits(&slice[V::LANES..]))
    }

    #[inline(always)]
    fn store(&self, out: &mut [V::Elem]) {
        let (lo, hi) = out.split_at_mut(V::LANES);
        self.lo.store(lo);
        self.hi.store(hi);
    }

    #[inline(always)]
    fn store_bits(&self, out: &mut [<V::Elem as super::Element>::Bits]) {
        let (lo, hi) = out.split_at_mut(V::LANES);
        self.lo.store_bits(lo);
        self.hi.store_bits(hi);
    }

    #[inline(always)]
    fn all_ones_shl(bits: u32) -> Self {
        Self::dup(V::all_ones_shl(bits))
    }

    #[inline(always)]
    fn to_mask(self) -> Wide<V::Mask> {
        Wide::from_halves(self.lo.to_mask(), self.hi.to_mask())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{F32x4, F32x8};
    use test_log::test;

    #[test]
    fn load_fills_halves_in_order() {
        let src: [f32; 8] = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let v = F32x8::load(&src);
        let mut lo = [0.0f32; 4];
        let mut hi = [0.0f32; 4];
        v.lo().store(&mut lo);
        v.hi().store(&mut hi);
        assert_eq!(lo, [0.0, 1.0, 2.0, 3.0]);
        assert_eq!(hi, [4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn dup_repeats_the_native_register() {
        let v = Wide::dup(F32x4::load(&[1.0, 2.0, 3.0, 4.0]));
        let mut out = [0.0f32; 8];
        v.store(&mut out);
        assert_eq!(out, [1.0, 2.0, 3.0, 4.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    #[should_panic]
    fn load_rejects_short_slice() {
        let _ = F32x8::load(&[0.0; 7]);
    }
}
