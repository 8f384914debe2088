//! Vector register primitives used to materialize constants.
//!
//! Only the operations the constant accessors need live here: loading one
//! table row, reinterpreting bits, shifting an all-ones pattern per lane, and
//! duplicating a native register into a composite one. Arithmetic belongs to
//! the kernels that consume the constants.
//!
//! # Architecture
//!
//! | Target | File | Native types |
//! |--------|------|--------------|
//! | x86_64 | `x86.rs` | `F32x4` (`__m128`), `F64x2` (`__m128d`) |
//! | other  | `scalar.rs` | array-backed `F32x4`, `F64x2` |
//! | any    | `wide.rs` | `Wide<V>`: two native registers |
//!
//! Both native backends export the same type names, so the rest of the crate
//! never mentions the target. `scalar` is built everywhere; only the
//! re-export is target-selected.

use core::fmt::{Debug, LowerHex};

pub mod scalar;
pub mod wide;

#[cfg(target_arch = "x86_64")]
pub mod x86;

#[cfg(target_arch = "x86_64")]
pub use x86::{F32x4, F64x2, Mask2, Mask4};

#[cfg(not(target_arch = "x86_64"))]
pub use scalar::{F32x4, F64x2, Mask2, Mask4};

pub use wide::Wide;

/// 8-lane f32 vector assembled from two `F32x4` registers.
pub type F32x8 = Wide<F32x4>;

/// 4-lane f64 vector assembled from two `F64x2` registers.
pub type F64x4 = Wide<F64x2>;

/// Width of one native vector register in bytes (128 bits).
pub const REGISTER_BYTES: usize = 16;

/// Lanes per table row for scalar type `T`.
#[inline(always)]
pub const fn stride<T>() -> usize {
    REGISTER_BYTES / core::mem::size_of::<T>()
}

const _: () = assert!(stride::<f32>() * core::mem::size_of::<f32>() == REGISTER_BYTES);
const _: () = assert!(stride::<f64>() * core::mem::size_of::<f64>() == REGISTER_BYTES);

/// A floating scalar that can occupy a vector lane.
pub trait Element: 'static + Copy + Clone + Debug + Default + PartialEq + Send + Sync {
    /// Same-width unsigned integer used for bit patterns.
    type Bits: 'static + Copy + Clone + Debug + Default + Eq + LowerHex + Send + Sync;

    /// Bit width of one lane.
    const BITS: u32;

    /// Lanes per table row (`REGISTER_BYTES / size_of::<Self>()`).
    const STRIDE: usize;

    /// Short type name used in layout reports.
    const NAME: &'static str;

    /// Reinterpret as raw bits (no numeric conversion).
    fn to_bits(self) -> Self::Bits;

    /// Reinterpret raw bits as a value (no numeric conversion, NaNs kept).
    fn from_bits(bits: Self::Bits) -> Self;
}

impl Element for f32 {
    type Bits = u32;
    const BITS: u32 = 32;
    const STRIDE: usize = stride::<f32>();
    const NAME: &'static str = "f32";

    #[inline(always)]
    fn to_bits(self) -> u32 {
        f32::to_bits(self)
    }

    #[inline(always)]
    fn from_bits(bits: u32) -> Self {
        f32::from_bits(bits)
    }
}

impl Element for f64 {
    type Bits = u64;
    const BITS: u32 = 64;
    const STRIDE: usize = stride::<f64>();
    const NAME: &'static str = "f64";

    #[inline(always)]
    fn to_bits(self) -> u64 {
        f64::to_bits(self)
    }

    #[inline(always)]
    fn from_bits(bits: u64) -> Self {
        f64::from_bits(bits)
    }
}

/// Boolean-lane mask: each lane is a bit pattern used for selection.
pub trait MaskOps: Copy + Clone + Debug + Default + Send + Sync {
    /// Per-lane bit pattern type.
    type Bits: Copy + Default;

    /// Number of lanes.
    const LANES: usize;

    /// Store each lane's raw bits.
    fn store_bits(&self, out: &mut [Self::Bits]);
}

/// The register-level operations a constant accessor composes.
pub trait SimdVector: Copy + Clone + Debug + Default + Send + Sync {
    /// Lane scalar type.
    type Elem: Element;

    /// Mask type carrying the same bits with a selection tag.
    type Mask: MaskOps<Bits = <Self::Elem as Element>::Bits>;

    /// Number of lanes.
    const LANES: usize;

    /// Splat a scalar across all lanes.
    fn splat(val: Self::Elem) -> Self;

    /// Load `LANES` contiguous scalars.
    ///
    /// # Panics
    /// If `slice.len() < LANES`.
    fn load(slice: &[Self::Elem]) -> Self;

    /// Load `LANES` contiguous bit patterns, reinterpreted as `Elem`.
    ///
    /// # Panics
    /// If `slice.len() < LANES`.
    fn load_bits(slice: &[<Self::Elem as Element>::Bits]) -> Self;

    /// Store to a slice.
    fn store(&self, out: &mut [Self::Elem]);

    /// Store each lane's raw bits.
    fn store_bits(&self, out: &mut [<Self::Elem as Element>::Bits]);

    /// All-ones lane shifted left by `bits`, reinterpreted as `Elem`.
    ///
    /// Shift width follows the lane width (32-bit lanes for f32, 64-bit for
    /// f64). Counts at or above the lane width follow the variable-count shift
    /// instruction and clear every bit.
    fn all_ones_shl(bits: u32) -> Self;

    /// Retag the register as a mask without touching its bits.
    fn to_mask(self) -> Self::Mask;
}
