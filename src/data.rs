//! Raw constant store.
//!
//! Each table is written once per element type as a list of logical rows and
//! expanded at compile time into the flat, lane-replicated layout the
//! accessors load from: row `r` of type `T` occupies
//! `[r * T::STRIDE, (r + 1) * T::STRIDE)`.
//!
//! Coefficients follow the Cephes minimax fits. The trig and log tables hold
//! floats; entries that are really bit patterns (exponent bias, exponent
//! mask) are written with `from_bits` so their bits are exact. The general
//! table holds raw integers because most of its patterns are NaNs as floats.

use crate::backend::{stride, Element};
use crate::rows::{GeneralRow, LogRow, TrigRow};
use core::f32::consts as f32c;
use core::f64::consts as f64c;

/// Register-aligned storage, so a row never straddles a 16-byte boundary.
#[repr(C, align(16))]
pub struct Aligned<T>(pub T);

/// Expands logical rows into `N / R` copies each. `N` must be a multiple of `R`.
macro_rules! spread_fn {
    ($name:ident, $t:ty) => {
        const fn $name<const R: usize, const N: usize>(rows: [$t; R]) -> Aligned<[$t; N]> {
            assert!(R > 0 && N % R == 0);
            let stride = N / R;
            let mut out = [0 as $t; N];
            let mut i = 0;
            while i < N {
                out[i] = rows[i / stride];
                i += 1;
            }
            Aligned(out)
        }
    };
}

spread_fn!(spread_f32, f32);
spread_fn!(spread_f64, f64);
spread_fn!(spread_u32, u32);
spread_fn!(spread_u64, u64);

const F32_STRIDE: usize = stride::<f32>();
const F64_STRIDE: usize = stride::<f64>();

// ============================================================================
// Trigonometric table
// ============================================================================

const TRIG_ROWS_F32: [f32; TrigRow::ROWS] = [
    f32c::FRAC_PI_4,
    0.78515625,
    2.418_756_5e-4,
    3.774_895e-8,
    0.0625,
    16.0,
    0.0,
    0.0,
    // cos
    4.166_664_6e-2,
    -1.388_731_6e-3,
    2.443_315_7e-5,
    0.0,
    0.0,
    0.0,
    // sin
    -1.666_665_5e-1,
    8.332_161e-3,
    -1.951_529_6e-4,
    0.0,
    0.0,
    0.0,
    8192.0,
    4.0 / f32c::PI,
    f32c::FRAC_PI_2,
    f32c::PI,
    // atan P
    -8.750_609e-1,
    -1.615_753_7e1,
    -7.500_856e1,
    -1.228_866_7e2,
    -6.485_022e1,
    // atan Q
    2.485_846_5e1,
    1.650_270_1e2,
    4.328_810_6e2,
    4.853_904e2,
    1.945_506_6e2,
];

const TRIG_ROWS_F64: [f64; TrigRow::ROWS] = [
    f64c::FRAC_PI_4,
    7.853_981_256_484_985_351_56e-1,
    3.774_894_707_930_798_176_68e-8,
    2.695_151_429_079_059_526_45e-15,
    0.0625,
    16.0,
    0.0,
    0.0,
    // cos
    4.166_666_666_666_659_292_18e-2,
    -1.388_888_888_887_305_641_16e-3,
    2.480_158_728_885_170_453_48e-5,
    -2.755_731_417_929_673_881_12e-7,
    2.087_570_084_197_473_167_78e-9,
    -1.135_853_652_138_768_173_00e-11,
    // sin
    -1.666_666_666_666_663_072_95e-1,
    8.333_333_333_322_118_588_78e-3,
    -1.984_126_982_958_953_859_96e-4,
    2.755_731_362_138_572_452_13e-6,
    -2.505_074_776_285_780_728_66e-8,
    1.589_623_015_765_465_680_60e-10,
    1.073_741_824e9,
    4.0 / f64c::PI,
    f64c::FRAC_PI_2,
    f64c::PI,
    // atan P
    -8.750_608_600_031_904_122_785e-1,
    -1.615_753_718_733_365_076_637e1,
    -7.500_855_792_314_704_667_340e1,
    -1.228_866_684_490_136_173_410e2,
    -6.485_021_904_942_025_371_773e1,
    // atan Q
    2.485_846_490_142_306_297_962e1,
    1.650_270_098_316_988_542_046e2,
    4.328_810_604_912_902_668_951e2,
    4.853_903_996_359_136_964_868e2,
    1.945_506_571_482_613_964_425e2,
];

// ============================================================================
// Logarithm table
// ============================================================================

// f32 uses a single 9-term polynomial that runs from P(0) through Q(2).
const LOG_ROWS_F32: [f32; LogRow::ROWS] = [
    f32::from_bits(0x0000_007f),
    f32::from_bits(0x7f80_0000),
    // P
    7.037_683_6e-2,
    -1.151_461e-1,
    1.167_699_9e-1,
    -1.242_014_1e-1,
    1.424_932_3e-1,
    -1.666_805_8e-1,
    // Q
    2.000_071_5e-1,
    -2.499_999_4e-1,
    3.333_333e-1,
    0.0,
    0.0,
    f32::NEG_INFINITY,
    f32::MIN_POSITIVE,
    f32c::FRAC_1_SQRT_2,
    0.693_359_375,
    -2.121_944_4e-4,
    0.5,
    f32c::LOG10_E,
    f32c::LOG2_E,
];

const LOG_ROWS_F64: [f64; LogRow::ROWS] = [
    f64::from_bits(0x0000_0000_0000_03ff),
    f64::from_bits(0x7ff0_0000_0000_0000),
    // P
    1.018_756_638_045_809_317_96e-4,
    4.974_949_949_767_470_014_25e-1,
    4.705_791_198_788_817_258_54,
    1.449_892_253_416_109_308_46e1,
    1.793_686_785_078_193_163_13e1,
    7.708_387_337_558_853_916_66,
    // Q
    1.128_735_871_891_674_505_90e1,
    4.522_791_458_375_322_211_05e1,
    8.298_752_669_127_766_032_11e1,
    7.115_447_506_185_638_944_66e1,
    2.312_516_201_267_653_405_83e1,
    f64::NEG_INFINITY,
    f64::MIN_POSITIVE,
    f64c::FRAC_1_SQRT_2,
    0.693_359_375,
    -2.121_944_400_546_905_827_679e-4,
    0.5,
    f64c::LOG10_E,
    f64c::LOG2_E,
];

// ============================================================================
// General bit-pattern table
// ============================================================================

const GENERAL_ROWS_F32: [u32; GeneralRow::ROWS] = [0xffff_f000, 0x7fff_ffff, 0x8000_0000];

const GENERAL_ROWS_F64: [u64; GeneralRow::ROWS] = [
    0xffff_ffff_f800_0000,
    0x7fff_ffff_ffff_ffff,
    0x8000_0000_0000_0000,
];

// ============================================================================
// Flat, replicated storage
// ============================================================================

pub static TRIG_F32: Aligned<[f32; TrigRow::ROWS * F32_STRIDE]> = spread_f32(TRIG_ROWS_F32);
pub static TRIG_F64: Aligned<[f64; TrigRow::ROWS * F64_STRIDE]> = spread_f64(TRIG_ROWS_F64);
pub static LOG_F32: Aligned<[f32; LogRow::ROWS * F32_STRIDE]> = spread_f32(LOG_ROWS_F32);
pub static LOG_F64: Aligned<[f64; LogRow::ROWS * F64_STRIDE]> = spread_f64(LOG_ROWS_F64);
pub static GENERAL_F32: Aligned<[u32; GeneralRow::ROWS * F32_STRIDE]> = spread_u32(GENERAL_ROWS_F32);
pub static GENERAL_F64: Aligned<[u64; GeneralRow::ROWS * F64_STRIDE]> = spread_u64(GENERAL_ROWS_F64);

/// Element types that have constant tables.
///
/// Only `f32` and `f64` implement this; asking for constants of any other
/// element type fails to compile.
pub trait TableElement: Element {
    /// Flat trigonometric table.
    fn trig() -> &'static [Self];
    /// Flat logarithm table.
    fn log() -> &'static [Self];
    /// Flat general bit-pattern table.
    fn general() -> &'static [Self::Bits];
}

impl TableElement for f32 {
    #[inline(always)]
    fn trig() -> &'static [f32] {
        &TRIG_F32.0
    }

    #[inline(always)]
    fn log() -> &'static [f32] {
        &LOG_F32.0
    }

    #[inline(always)]
    fn general() -> &'static [u32] {
        &GENERAL_F32.0
    }
}

impl TableElement for f64 {
    #[inline(always)]
    fn trig() -> &'static [f64] {
        &TRIG_F64.0
    }

    #[inline(always)]
    fn log() -> &'static [f64] {
        &LOG_F64.0
    }

    #[inline(always)]
    fn general() -> &'static [u64] {
        &GENERAL_F64.0
    }
}

/// The lanes of one row, or `None` past the end of the table.
#[inline(always)]
pub fn row_slice<T: Copy>(table: &'static [T], row: usize, stride: usize) -> Option<&'static [T]> {
    let start = row.checked_mul(stride)?;
    table.get(start..start.checked_add(stride)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn rows_are_replicated_across_the_stride() {
        let trig = <f32 as TableElement>::trig();
        let row = row_slice(trig, TrigRow::Pi.index(), F32_STRIDE).expect("pi row");
        assert_eq!(row, &[f32c::PI; 4]);

        let log = <f64 as TableElement>::log();
        let row = row_slice(log, LogRow::Half.index(), F64_STRIDE).expect("half row");
        assert_eq!(row, &[0.5; 2]);
    }

    #[test]
    fn bit_pattern_rows_are_exact() {
        assert_eq!(LOG_F32.0[LogRow::ExponentMask.index() * F32_STRIDE].to_bits(), 0x7f80_0000);
        assert_eq!(LOG_F64.0[LogRow::ExponentBias.index() * F64_STRIDE].to_bits(), 0x3ff);
        assert_eq!(GENERAL_F32.0[GeneralRow::HighMask.index() * F32_STRIDE], 0xffff_f000);
    }

    #[test]
    fn split_constants_sum_back() {
        let hi = TRIG_ROWS_F64[TrigRow::Pi4Hi.index()];
        let r1 = TRIG_ROWS_F64[TrigRow::Pi4Rem1.index()];
        let r2 = TRIG_ROWS_F64[TrigRow::Pi4Rem2.index()];
        assert!((hi + r1 + r2 - f64c::FRAC_PI_4).abs() < 1e-15);

        let large = LOG_ROWS_F64[LogRow::Ln2Large.index()];
        let small = LOG_ROWS_F64[LogRow::Ln2Small.index()];
        assert!((large + small - f64c::LN_2).abs() < 1e-15);
    }

    #[test]
    fn row_slice_past_end_is_none() {
        let trig = <f32 as TableElement>::trig();
        assert!(row_slice(trig, TrigRow::ROWS, F32_STRIDE).is_none());
        assert!(row_slice(trig, usize::MAX, F32_STRIDE).is_none());
    }

    #[test]
    fn table_lengths_match_row_counts() {
        assert_eq!(TRIG_F32.0.len(), TrigRow::ROWS * 4);
        assert_eq!(TRIG_F64.0.len(), TrigRow::ROWS * 2);
        assert_eq!(LOG_F32.0.len(), LogRow::ROWS * 4);
        assert_eq!(GENERAL_F64.0.len(), GeneralRow::ROWS * 2);
    }
}
