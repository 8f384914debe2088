//! Named constant accessors.
//!
//! `ConstantProvider` is implemented once per native vector type (constants
//! are loaded straight from the tables in `data`) and once, generically, for
//! `Wide<V>` (constants are the native ones duplicated into both halves).
//! Dispatch is resolved entirely by the type; accessors contain no branches
//! beyond the table bounds check.
//!
//! Indexed families take a small row offset `i`. Only the documented range is
//! meaningful:
//!
//! | Family | Table | Base row | Valid `i` |
//! |--------|-------|----------|-----------|
//! | `cos_coeff` | trig | 8 | `0..6` |
//! | `sin_coeff` | trig | 14 | `0..6` |
//! | `atan_p` | trig | 24 | `0..5` |
//! | `atan_q` | trig | 29 | `0..5` |
//! | `p` | log | 2 | `0..6` |
//! | `q` | log | 8 | `0..5` |
//!
//! An `i` past its family reads whatever row follows. Past the end of the
//! table the result is all zeros.

use crate::backend::{Element, SimdVector, Wide};
use crate::data::{row_slice, TableElement};
use crate::rows::{GeneralRow, LogRow, TrigRow};

/// Vector types that can materialize the math-kernel constants.
pub trait ConstantProvider: SimdVector {
    // =========================================================================
    // Trigonometric table, fixed rows
    // =========================================================================

    /// π/4
    fn pi_4() -> Self;
    /// High part of π/4 for three-step Cody-Waite reduction.
    fn pi_4_hi() -> Self;
    /// First remainder of π/4.
    fn pi_4_rem1() -> Self;
    /// Second remainder of π/4.
    fn pi_4_rem2() -> Self;
    /// 1/16
    fn one_16th() -> Self;
    /// 16
    fn sixteen() -> Self;
    /// Magnitude beyond which range reduction loses all precision.
    fn loss_threshold() -> Self;
    /// 4/π
    fn four_over_pi() -> Self;
    /// π/2
    fn pi_2() -> Self;
    /// π
    fn pi() -> Self;

    // =========================================================================
    // Trigonometric table, indexed families
    // =========================================================================

    /// Cosine series coefficient `i` (`0..6`).
    fn cos_coeff(i: usize) -> Self;
    /// Sine series coefficient `i` (`0..6`).
    fn sin_coeff(i: usize) -> Self;
    /// Arctangent numerator coefficient `i` (`0..5`).
    fn atan_p(i: usize) -> Self;
    /// Arctangent denominator coefficient `i` (`0..5`).
    fn atan_q(i: usize) -> Self;

    // =========================================================================
    // Logarithm table
    // =========================================================================

    /// Exponent field bits, tagged as a mask.
    fn exponent_mask() -> Self::Mask;
    /// Exponent bias as an integer bit pattern.
    fn exponent_bias() -> Self;
    /// 1/2
    fn half() -> Self;
    /// 1/√2
    fn one_over_sqrt2() -> Self;
    /// Smallest positive normal value.
    fn min() -> Self;
    /// Low part of ln 2.
    fn ln2_small() -> Self;
    /// High part of ln 2.
    fn ln2_large() -> Self;
    /// -∞
    fn neg_inf() -> Self;
    /// log₁₀(e)
    fn log10_e() -> Self;
    /// log₂(e)
    fn log2_e() -> Self;
    /// Log polynomial P coefficient `i` (`0..6`).
    fn p(i: usize) -> Self;
    /// Log polynomial Q coefficient `i` (`0..5`).
    fn q(i: usize) -> Self;

    // =========================================================================
    // Bit patterns
    // =========================================================================

    /// Stored high-bits mask: `0xfffff000` per f32 lane,
    /// `0xfffffffff8000000` per f64 lane.
    fn high_mask() -> Self;

    /// All-ones shifted left by `bits` in every lane: the low `bits` bits are
    /// clear and the rest set, for `0 <= bits < lane width`. Larger counts
    /// are left to the shift instruction (they currently clear the lane).
    fn high_mask_bits(bits: u32) -> Self;

    /// Everything but the sign bit.
    fn abs_mask() -> Self;
    /// Sign bit only.
    fn sign_mask() -> Self;
}

/// Load one row of a float table into a native register.
#[inline(always)]
fn load_row<V>(table: &'static [V::Elem], row: usize) -> V
where
    V: SimdVector,
    V::Elem: TableElement,
{
    row_slice(table, row, <V::Elem as Element>::STRIDE).map_or_else(V::default, V::load)
}

/// Load member `i` of the family starting at `base`. Rows that overflow or
/// fall past the table end read as zeros.
#[inline(always)]
fn load_family<V>(table: &'static [V::Elem], base: usize, i: usize) -> V
where
    V: SimdVector,
    V::Elem: TableElement,
{
    base.checked_add(i)
        .and_then(|row| row_slice(table, row, <V::Elem as Element>::STRIDE))
        .map_or_else(V::default, V::load)
}

/// Load one row of the general table into a native register.
#[inline(always)]
fn load_bits_row<V>(row: GeneralRow) -> V
where
    V: SimdVector,
    V::Elem: TableElement,
{
    let table = <V::Elem as TableElement>::general();
    row_slice(table, row.index(), <V::Elem as Element>::STRIDE).map_or_else(V::default, V::load_bits)
}

#[inline(always)]
fn trig<V>() -> &'static [V::Elem]
where
    V: SimdVector,
    V::Elem: TableElement,
{
    <V::Elem as TableElement>::trig()
}

#[inline(always)]
fn log<V>() -> &'static [V::Elem]
where
    V: SimdVector,
    V::Elem: TableElement,
{
    <V::Elem as TableElement>::log()
}

/// Implements `ConstantProvider` for a native vector whose lane count is the
/// element type's stride.
macro_rules! native_constants {
    ($($vec:ty),* $(,)?) => {
        $(
            const _: () = assert!(
                <$vec as SimdVector>::LANES == <<$vec as SimdVector>::Elem as Element>::STRIDE
            );

            impl ConstantProvider for $vec {
                #[inline(always)]
                fn pi_4() -> Self { load_row(trig::<Self>(), TrigRow::Pi4.index()) }
                #[inline(always)]
                fn pi_4_hi() -> Self { load_row(trig::<Self>(), TrigRow::Pi4Hi.index()) }
                #[inline(always)]
                fn pi_4_rem1() -> Self { load_row(trig::<Self>(), TrigRow::Pi4Rem1.index()) }
                #[inline(always)]
                fn pi_4_rem2() -> Self { load_row(trig::<Self>(), TrigRow::Pi4Rem2.index()) }
                #[inline(always)]
                fn one_16th() -> Self { load_row(trig::<Self>(), TrigRow::OneSixteenth.index()) }
                #[inline(always)]
                fn sixteen() -> Self { load_row(trig::<Self>(), TrigRow::Sixteen.index()) }
                #[inline(always)]
                fn loss_threshold() -> Self { load_row(trig::<Self>(), TrigRow::LossThreshold.index()) }
                #[inline(always)]
                fn four_over_pi() -> Self { load_row(trig::<Self>(), TrigRow::FourOverPi.index()) }
                #[inline(always)]
                fn pi_2() -> Self { load_row(trig::<Self>(), TrigRow::Pi2.index()) }
                #[inline(always)]
                fn pi() -> Self { load_row(trig::<Self>(), TrigRow::Pi.index()) }

                #[inline(always)]
                fn cos_coeff(i: usize) -> Self {
                    load_family(trig::<Self>(), TrigRow::CosCoeffBase.index(), i)
                }
                #[inline(always)]
                fn sin_coeff(i: usize) -> Self {
                    load_family(trig::<Self>(), TrigRow::SinCoeffBase.index(), i)
                }
                #[inline(always)]
                fn atan_p(i: usize) -> Self {
                    load_family(trig::<Self>(), TrigRow::AtanPBase.index(), i)
                }
                #[inline(always)]
                fn atan_q(i: usize) -> Self {
                    load_family(trig::<Self>(), TrigRow::AtanQBase.index(), i)
                }

                #[inline(always)]
                fn exponent_mask() -> Self::Mask {
                    load_row::<Self>(log::<Self>(), LogRow::ExponentMask.index()).to_mask()
                }
                #[inline(always)]
                fn exponent_bias() -> Self { load_row(log::<Self>(), LogRow::ExponentBias.index()) }
                #[inline(always)]
                fn half() -> Self { load_row(log::<Self>(), LogRow::Half.index()) }
                #[inline(always)]
                fn one_over_sqrt2() -> Self { load_row(log::<Self>(), LogRow::OneOverSqrt2.index()) }
                #[inline(always)]
                fn min() -> Self { load_row(log::<Self>(), LogRow::Min.index()) }
                #[inline(always)]
                fn ln2_small() -> Self { load_row(log::<Self>(), LogRow::Ln2Small.index()) }
                #[inline(always)]
                fn ln2_large() -> Self { load_row(log::<Self>(), LogRow::Ln2Large.index()) }
                #[inline(always)]
                fn neg_inf() -> Self { load_row(log::<Self>(), LogRow::NegInf.index()) }
                #[inline(always)]
                fn log10_e() -> Self { load_row(log::<Self>(), LogRow::Log10E.index()) }
                #[inline(always)]
                fn log2_e() -> Self { load_row(log::<Self>(), LogRow::Log2E.index()) }
                #[inline(always)]
                fn p(i: usize) -> Self {
                    load_family(log::<Self>(), LogRow::PBase.index(), i)
                }
                #[inline(always)]
                fn q(i: usize) -> Self {
                    load_family(log::<Self>(), LogRow::QBase.index(), i)
                }

                #[inline(always)]
                fn high_mask() -> Self { load_bits_row(GeneralRow::HighMask) }
                #[inline(always)]
                fn high_mask_bits(bits: u32) -> Self { Self::all_ones_shl(bits) }
                #[inline(always)]
                fn abs_mask() -> Self { load_bits_row(GeneralRow::AbsMask) }
                #[inline(always)]
                fn sign_mask() -> Self { load_bits_row(GeneralRow::SignMask) }
            }
        )*
    };
}

native_constants!(crate::backend::F32x4, crate::backend::F64x2);

/// Composite registers never read the tables: each constant is the native
/// one, copied into both halves.
impl<V: ConstantProvider> ConstantProvider for Wide<V> {
    #[inline(always)]
    fn pi_4() -> Self {
        Wide::dup(V::pi_4())
    }
    #[inline(always)]
    fn pi_4_hi() -> Self {
        Wide::dup(V::pi_4_hi())
    }
    #[inline(always)]
    fn pi_4_rem1() -> Self {
        Wide::dup(V::pi_4_rem1())
    }
    #[inline(always)]
    fn pi_4_rem2() -> Self {
        Wide::dup(V::pi_4_rem2())
    }
    #[inline(always)]
    fn one_16th() -> Self {
        Wide::dup(V::one_16th())
    }
    #[inline(always)]
    fn sixteen() -> Self {
        Wide::dup(V::sixteen())
    }
    #[inline(always)]
    fn loss_threshold() -> Self {
        Wide::dup(V::loss_threshold())
    }
    #[inline(always)]
    fn four_over_pi() -> Self {
        Wide::dup(V::four_over_pi())
    }
    #[inline(always)]
    fn pi_2() -> Self {
        Wide::dup(V::pi_2())
    }
    #[inline(always)]
    fn pi() -> Self {
        Wide::dup(V::pi())
    }

    #[inline(always)]
    fn cos_coeff(i: usize) -> Self {
        Wide::dup(V::cos_coeff(i))
    }
    #[inline(always)]
    fn sin_coeff(i: usize) -> Self {
        Wide::dup(V::sin_coeff(i))
    }
    #[inline(always)]
    fn atan_p(i: usize) -> Self {
        Wide::dup(V::atan_p(i))
    }
    #[inline(always)]
    fn atan_q(i: usize) -> Self {
        Wide::dup(V::atan_q(i))
    }

    #[inline(always)]
    fn exponent_mask() -> Self::Mask {
        Wide::dup(V::exponent_mask())
    }
    #[inline(always)]
    fn exponent_bias() -> Self {
        Wide::dup(V::exponent_bias())
    }
    #[inline(always)]
    fn half() -> Self {
        Wide::dup(V::half())
    }
    #[inline(always)]
    fn one_over_sqrt2() -> Self {
        Wide::dup(V::one_over_sqrt2())
    }
    #[inline(always)]
    fn min() -> Self {
        Wide::dup(V::min())
    }
    #[inline(always)]
    fn ln2_small() -> Self {
        Wide::dup(V::ln2_small())
    }
    #[inline(always)]
    fn ln2_large() -> Self {
        Wide::dup(V::ln2_large())
    }
    #[inline(always)]
    fn neg_inf() -> Self {
        Wide::dup(V::neg_inf())
    }
    #[inline(always)]
    fn log10_e() -> Self {
        Wide::dup(V::log10_e())
    }
    #[inline(always)]
    fn log2_e() -> Self {
        Wide::dup(V::log2_e())
    }
    #[inline(always)]
    fn p(i: usize) -> Self {
        Wide::dup(V::p(i))
    }
    #[inline(always)]
    fn q(i: usize) -> Self {
        Wide::dup(V::q(i))
    }

    #[inline(always)]
    fn high_mask() -> Self {
        Wide::dup(V::high_mask())
    }
    #[inline(always)]
    fn high_mask_bits(bits: u32) -> Self {
        Wide::dup(V::high_mask_bits(bits))
    }
    #[inline(always)]
    fn abs_mask() -> Self {
        Wide::dup(V::abs_mask())
    }
    #[inline(always)]
    fn sign_mask() -> Self {
        Wide::dup(V::sign_mask())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{F32x4, F32x8, F64x2, F64x4, MaskOps};
    use test_log::test;

    fn lanes<V: SimdVector>(v: V) -> Vec<V::Elem> {
        let mut out = vec![V::Elem::default(); V::LANES];
        v.store(&mut out);
        out
    }

    fn bit_lanes<V: SimdVector>(v: V) -> Vec<<V::Elem as Element>::Bits> {
        let mut out: Vec<<V::Elem as Element>::Bits> = vec![Default::default(); V::LANES];
        v.store_bits(&mut out);
        out
    }

    #[test]
    fn cos_coeff_zero_fills_every_lane() {
        let row = f32::from_bits(0x3d2a_aaa5);
        assert_eq!(lanes(F32x4::cos_coeff(0)), vec![row; 4]);
        assert_eq!(lanes(F32x8::cos_coeff(0)), vec![row; 8]);
    }

    #[test]
    fn fixed_rows_resolve_to_documented_values() {
        assert_eq!(lanes(F32x4::pi()), vec![core::f32::consts::PI; 4]);
        assert_eq!(lanes(F64x2::pi_2()), vec![core::f64::consts::FRAC_PI_2; 2]);
        assert_eq!(lanes(F64x2::half()), vec![0.5; 2]);
        assert_eq!(lanes(F32x4::sixteen()), vec![16.0; 4]);
        assert_eq!(lanes(F64x2::neg_inf()), vec![f64::NEG_INFINITY; 2]);
    }

    #[test]
    fn exponent_mask_carries_exponent_bits() {
        let mut bits = [0u32; 4];
        F32x4::exponent_mask().store_bits(&mut bits);
        assert_eq!(bits, [0x7f80_0000; 4]);

        let mut bits = [0u64; 4];
        F64x4::exponent_mask().store_bits(&mut bits);
        assert_eq!(bits, [0x7ff0_0000_0000_0000; 4]);
    }

    #[test]
    fn high_mask_bits_is_shifted_all_ones() {
        for bits in [0, 8, 16, 24, 31] {
            assert_eq!(bit_lanes(F32x4::high_mask_bits(bits)), vec![u32::MAX << bits; 4]);
        }
        for bits in [0, 16, 32, 48, 63] {
            assert_eq!(bit_lanes(F64x2::high_mask_bits(bits)), vec![u64::MAX << bits; 2]);
        }
    }

    #[test]
    fn high_mask_bits_at_lane_width_clears_everything() {
        assert_eq!(bit_lanes(F32x4::high_mask_bits(32)), vec![0; 4]);
        assert_eq!(bit_lanes(F64x2::high_mask_bits(64)), vec![0; 2]);
        assert_eq!(bit_lanes(F32x4::high_mask_bits(0)), vec![u32::MAX; 4]);
    }

    #[test]
    fn stored_high_mask_differs_per_width() {
        assert_eq!(bit_lanes(F32x4::high_mask()), vec![0xffff_f000; 4]);
        assert_eq!(bit_lanes(F64x2::high_mask()), vec![0xffff_ffff_f800_0000; 2]);
    }

    #[test]
    fn index_past_table_end_reads_zero() {
        assert_eq!(lanes(F32x4::atan_q(5)), vec![0.0; 4]);
        assert_eq!(lanes(F64x2::q(usize::MAX)), vec![0.0; 2]);
        assert_eq!(lanes(F32x8::p(1000)), vec![0.0; 8]);
        assert_eq!(lanes(F32x4::cos_coeff(usize::MAX - 7)), vec![0.0; 4]);
        assert_eq!(lanes(F64x4::atan_p(usize::MAX)), vec![0.0; 4]);
        assert_eq!(lanes(F32x4::sin_coeff(usize::MAX - 13)), vec![0.0; 4]);
    }

    #[test]
    fn index_past_family_reads_next_row() {
        assert_eq!(bit_lanes(F32x4::cos_coeff(6)), bit_lanes(F32x4::sin_coeff(0)));
        assert_eq!(bit_lanes(F64x2::p(6)), bit_lanes(F64x2::q(0)));
    }
}
