//! Row maps for the constant tables.
//!
//! A row is one logical constant, replicated across the lanes of a register.
//! Row numbers are shared by every element type; only the stride differs.
//! Indexed families (`*Base`) occupy consecutive rows starting at the base.

use serde::Serialize;

/// The three constant tables.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    /// Range reduction and polynomial data for sin, cos and atan.
    Trig,
    /// Decomposition and polynomial data for log.
    Log,
    /// Bit patterns (stored as raw integers).
    General,
}

impl Table {
    /// Every table, in report order.
    pub const ALL: [Table; 3] = [Table::Trig, Table::Log, Table::General];

    /// Number of rows in the table.
    pub const fn rows(self) -> usize {
        match self {
            Table::Trig => TrigRow::ROWS,
            Table::Log => LogRow::ROWS,
            Table::General => GeneralRow::ROWS,
        }
    }
}

/// Rows of the trigonometric table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(usize)]
pub enum TrigRow {
    /// π/4
    Pi4 = 0,
    /// High part of the three-way split of π/4 (exact in few bits).
    Pi4Hi = 1,
    /// First remainder of π/4 - hi.
    Pi4Rem1 = 2,
    /// Second remainder.
    Pi4Rem2 = 3,
    /// 1/16
    OneSixteenth = 4,
    /// 16
    Sixteen = 5,
    /// Cosine series coefficients 0..6. Rows 6 and 7 are padding.
    CosCoeffBase = 8,
    /// Sine series coefficients 0..6.
    SinCoeffBase = 14,
    /// Inputs above this lose all precision in the reduction.
    LossThreshold = 20,
    /// 4/π
    FourOverPi = 21,
    /// π/2
    Pi2 = 22,
    /// π
    Pi = 23,
    /// Arctangent numerator coefficients 0..5.
    AtanPBase = 24,
    /// Arctangent denominator coefficients 0..5.
    AtanQBase = 29,
}

impl TrigRow {
    /// Rows in the trigonometric table.
    pub const ROWS: usize = 34;
    /// Members of the cosine family.
    pub const COS_COEFFS: usize = 6;
    /// Members of the sine family.
    pub const SIN_COEFFS: usize = 6;
    /// Members of the arctangent numerator family.
    pub const ATAN_P_COEFFS: usize = 5;
    /// Members of the arctangent denominator family.
    pub const ATAN_Q_COEFFS: usize = 5;

    /// Row number within the table.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Rows of the logarithm table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(usize)]
pub enum LogRow {
    /// Exponent bias as an integer bit pattern (127 / 1023).
    ExponentBias = 0,
    /// Exponent field bits.
    ExponentMask = 1,
    /// Polynomial P coefficients 0..6.
    PBase = 2,
    /// Polynomial Q coefficients 0..5.
    QBase = 8,
    /// -∞
    NegInf = 13,
    /// Smallest positive normal value.
    Min = 14,
    /// 1/√2
    OneOverSqrt2 = 15,
    /// ln 2, high part.
    Ln2Large = 16,
    /// ln 2 - `Ln2Large`.
    Ln2Small = 17,
    /// 1/2
    Half = 18,
    /// log₁₀(e)
    Log10E = 19,
    /// log₂(e)
    Log2E = 20,
}

impl LogRow {
    /// Rows in the logarithm table.
    pub const ROWS: usize = 21;
    /// Members of the P family.
    pub const P_COEFFS: usize = 6;
    /// Members of the Q family.
    pub const Q_COEFFS: usize = 5;

    /// Row number within the table.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Rows of the general bit-pattern table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(usize)]
pub enum GeneralRow {
    /// Keeps the high mantissa bits, clears the low ones.
    HighMask = 0,
    /// Everything but the sign bit.
    AbsMask = 1,
    /// Sign bit only.
    SignMask = 2,
}

impl GeneralRow {
    /// Rows in the general table.
    pub const ROWS: usize = 3;

    /// Row number within the table.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn families_end_where_the_next_row_begins() {
        assert_eq!(TrigRow::CosCoeffBase.index() + TrigRow::COS_COEFFS, TrigRow::SinCoeffBase.index());
        assert_eq!(TrigRow::SinCoeffBase.index() + TrigRow::SIN_COEFFS, TrigRow::LossThreshold.index());
        assert_eq!(TrigRow::AtanPBase.index() + TrigRow::ATAN_P_COEFFS, TrigRow::AtanQBase.index());
        assert_eq!(TrigRow::AtanQBase.index() + TrigRow::ATAN_Q_COEFFS, TrigRow::ROWS);
        assert_eq!(LogRow::PBase.index() + LogRow::P_COEFFS, LogRow::QBase.index());
        assert_eq!(LogRow::QBase.index() + LogRow::Q_COEFFS, LogRow::NegInf.index());
        assert_eq!(LogRow::Log2E.index() + 1, LogRow::ROWS);
    }

    #[test]
    fn documented_rows_keep_their_numbers() {
        assert_eq!(TrigRow::Pi4.index(), 0);
        assert_eq!(TrigRow::Pi.index(), 23);
        assert_eq!(TrigRow::CosCoeffBase.index(), 8);
        assert_eq!(TrigRow::AtanQBase.index(), 29);
        assert_eq!(LogRow::ExponentMask.index(), 1);
        assert_eq!(LogRow::Half.index(), 18);
    }
}
