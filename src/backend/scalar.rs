//! Portable fallback backend for targets without an SSE2 register file.
//!
//! Registers are plain arrays with the same lane counts as the SSE2 types, so
//! constant layouts and stride arithmetic are identical on every target.

use super::{Element, MaskOps, SimdVector};

/// 4-lane mask (one u32 pattern per lane).
#[derive(Copy, Clone, Debug, Default)]
#[repr(transparent)]
pub struct Mask4([u32; 4]);

impl MaskOps for Mask4 {
    type Bits = u32;
    const LANES: usize = 4;

    #[inline(always)]
    fn store_bits(&self, out: &mut [u32]) {
        out[..Self::LANES].copy_from_slice(&self.0);
    }
}

/// 2-lane mask (one u64 pattern per lane).
#[derive(Copy, Clone, Debug, Default)]
#[repr(transparent)]
pub struct Mask2([u64; 2]);

impl MaskOps for Mask2 {
    type Bits = u64;
    const LANES: usize = 2;

    #[inline(always)]
    fn store_bits(&self, out: &mut [u64]) {
        out[..Self::LANES].copy_from_slice(&self.0);
    }
}

/// Generates an array-backed vector. The shift uses `checked_shl` so that
/// counts at or above the lane width clear the lane, like the SSE2 shifts.
macro_rules! array_vector {
    ($name:ident, $elem:ty, $bits:ty, $mask:ident, $lanes:expr) => {
        #[doc = concat!(stringify!($lanes), "-lane ", stringify!($elem), " vector (array-backed).")]
        #[derive(Copy, Clone, Debug, Default)]
        #[repr(transparent)]
        pub struct $name([$elem; $lanes]);

        impl SimdVector for $name {
            type Elem = $elem;
            type Mask = $mask;
            const LANES: usize = $lanes;

            #[inline(always)]
            fn splat(val: $elem) -> Self {
                Self([val; $lanes])
            }

            #[inline(always)]
            fn load(slice: &[$elem]) -> Self {
                assert!(slice.len() >= Self::LANES);
                let mut lanes = [0.0; $lanes];
                lanes.copy_from_slice(&slice[..Self::LANES]);
                Self(lanes)
            }

            #[inline(always)]
            fn load_bits(slice: &[$bits]) -> Self {
                assert!(slice.len() >= Self::LANES);
                let mut lanes = [0.0; $lanes];
                for (lane, &bits) in lanes.iter_mut().zip(slice) {
                    *lane = <$elem as Element>::from_bits(bits);
                }
                Self(lanes)
            }

            #[inline(always)]
            fn store(&self, out: &mut [$elem]) {
                out[..Self::LANES].copy_from_slice(&self.0);
            }

            #[inline(always)]
            fn store_bits(&self, out: &mut [$bits]) {
                for (slot, lane) in out[..Self::LANES].iter_mut().zip(self.0) {
                    *slot = lane.to_bits();
                }
            }

            #[inline(always)]
            fn all_ones_shl(bits: u32) -> Self {
                let pattern = <$bits>::MAX.checked_shl(bits).unwrap_or(0);
                Self([<$elem>::from_bits(pattern); $lanes])
            }

            #[inline(always)]
            fn to_mask(self) -> $mask {
                $mask(self.0.map(<$elem>::to_bits))
            }
        }
    };
}

array_vector!(F32x4, f32, u32, Mask4, 4);
array_vector!(F64x2, f64, u64, Mask2, 2);
