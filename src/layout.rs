//! Layout inspection.
//!
//! Describes the flat tables per element type (stride, rows, length), checks
//! that the layout is consistent, and renders the named constants of any
//! `ConstantProvider` as hex bit patterns. Nothing here sits on the accessor
//! path; it exists for diagnostics and the `dump-consts` tool.

use crate::backend::{Element, MaskOps, SimdVector, REGISTER_BYTES};
use crate::consts::ConstantProvider;
use crate::data::TableElement;
use crate::rows::{LogRow, Table, TrigRow};
use anyhow::{ensure, Context, Result};
use core::fmt::LowerHex;
use log::{debug, trace};
use once_cell::sync::Lazy;
use serde::Serialize;

/// Process-wide layout description, built on first use.
pub static LAYOUT: Lazy<LayoutReport> = Lazy::new(LayoutReport::collect);

/// Shape of one flat table for one element type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableLayout {
    pub table: Table,
    pub rows: usize,
    pub stride: usize,
    /// Scalars actually stored.
    pub len: usize,
}

/// Stride and table shapes for one element type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementLayout {
    pub element: &'static str,
    pub scalar_bytes: usize,
    pub lane_bits: u32,
    pub stride: usize,
    pub tables: Vec<TableLayout>,
}

impl ElementLayout {
    pub fn of<T: TableElement>() -> Self {
        let tables = Table::ALL
            .iter()
            .map(|&table| TableLayout {
                table,
                rows: table.rows(),
                stride: T::STRIDE,
                len: table_len::<T>(table),
            })
            .collect();

        Self {
            element: T::NAME,
            scalar_bytes: core::mem::size_of::<T>(),
            lane_bits: T::BITS,
            stride: T::STRIDE,
            tables,
        }
    }
}

/// Layout of every supported element type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutReport {
    pub register_bytes: usize,
    pub elements: Vec<ElementLayout>,
}

impl LayoutReport {
    pub fn collect() -> Self {
        let report = Self {
            register_bytes: REGISTER_BYTES,
            elements: vec![ElementLayout::of::<f32>(), ElementLayout::of::<f64>()],
        };
        debug!(
            "Collected constant layout for {} element types ({} byte registers)",
            report.elements.len(),
            report.register_bytes
        );
        report
    }

    /// Check stride arithmetic, table lengths and row replication.
    pub fn verify(&self) -> Result<()> {
        for element in &self.elements {
            ensure!(
                element.stride * element.scalar_bytes == self.register_bytes,
                "{}: stride {} x {} bytes does not fill a {} byte register",
                element.element,
                element.stride,
                element.scalar_bytes,
                self.register_bytes
            );
            for table in &element.tables {
                ensure!(
                    table.len == table.rows * table.stride,
                    "{} {:?} table holds {} scalars, expected {} rows x {}",
                    element.element,
                    table.table,
                    table.len,
                    table.rows,
                    table.stride
                );
                trace!("{} {:?}: {} rows ok", element.element, table.table, table.rows);
            }
        }

        check_replicated::<f32>().context("f32 tables")?;
        check_replicated::<f64>().context("f64 tables")?;
        debug!("Constant layout verified");
        Ok(())
    }
}

fn table_len<T: TableElement>(table: Table) -> usize {
    match table {
        Table::Trig => T::trig().len(),
        Table::Log => T::log().len(),
        Table::General => T::general().len(),
    }
}

/// Every row must hold one value repeated across its lanes, bit for bit.
fn check_replicated<T: TableElement>() -> Result<()> {
    let float_bits = |table: &'static [T]| table.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    let tables = [
        (Table::Trig, float_bits(T::trig())),
        (Table::Log, float_bits(T::log())),
        (Table::General, T::general().to_vec()),
    ];

    for (table, bits) in tables {
        for (row, lanes) in bits.chunks_exact(T::STRIDE).enumerate() {
            ensure!(
                lanes.iter().all(|&lane| lane == lanes[0]),
                "{:?} row {} is not replicated: {:x?}",
                table,
                row,
                lanes
            );
        }
    }
    Ok(())
}

/// One constant as per-lane hex bit patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedConstant {
    pub name: String,
    pub lanes: Vec<String>,
}

fn hex_lanes<B: LowerHex>(bits: &[B], lane_bits: u32) -> Vec<String> {
    let width = lane_bits as usize / 4 + 2;
    bits.iter().map(|b| format!("{:#0width$x}", b, width = width)).collect()
}

fn render<V: SimdVector>(name: impl Into<String>, v: V) -> NamedConstant {
    let mut bits: Vec<<V::Elem as Element>::Bits> = vec![Default::default(); V::LANES];
    v.store_bits(&mut bits);
    NamedConstant {
        name: name.into(),
        lanes: hex_lanes(&bits, <V::Elem as Element>::BITS),
    }
}

/// Every named constant of `V`, including each documented family member.
pub fn named_constants<V: ConstantProvider>() -> Vec<NamedConstant> {
    let mut out = vec![
        render("pi_4", V::pi_4()),
        render("pi_4_hi", V::pi_4_hi()),
        render("pi_4_rem1", V::pi_4_rem1()),
        render("pi_4_rem2", V::pi_4_rem2()),
        render("one_16th", V::one_16th()),
        render("sixteen", V::sixteen()),
        render("loss_threshold", V::loss_threshold()),
        render("four_over_pi", V::four_over_pi()),
        render("pi_2", V::pi_2()),
        render("pi", V::pi()),
    ];

    let families: [(&str, usize, fn(usize) -> V); 6] = [
        ("cos_coeff", TrigRow::COS_COEFFS, V::cos_coeff),
        ("sin_coeff", TrigRow::SIN_COEFFS, V::sin_coeff),
        ("atan_p", TrigRow::ATAN_P_COEFFS, V::atan_p),
        ("atan_q", TrigRow::ATAN_Q_COEFFS, V::atan_q),
        ("p", LogRow::P_COEFFS, V::p),
        ("q", LogRow::Q_COEFFS, V::q),
    ];
    for (family, count, accessor) in families {
        out.extend((0..count).map(|i| render(format!("{family}({i})"), accessor(i))));
    }

    let mut mask_bits: Vec<<V::Elem as Element>::Bits> =
        vec![Default::default(); <V::Mask as MaskOps>::LANES];
    V::exponent_mask().store_bits(&mut mask_bits);
    out.push(NamedConstant {
        name: "exponent_mask".into(),
        lanes: hex_lanes(&mask_bits, <V::Elem as Element>::BITS),
    });

    out.extend([
        render("exponent_bias", V::exponent_bias()),
        render("half", V::half()),
        render("one_over_sqrt2", V::one_over_sqrt2()),
        render("min", V::min()),
        render("ln2_small", V::ln2_small()),
        render("ln2_large", V::ln2_large()),
        render("neg_inf", V::neg_inf()),
        render("log10_e", V::log10_e()),
        render("log2_e", V::log2_e()),
        render("high_mask", V::high_mask()),
        render("abs_mask", V::abs_mask()),
        render("sign_mask", V::sign_mask()),
    ]);

    trace!("Rendered {} constants for {} lanes", out.len(), V::LANES);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{F32x4, F64x4};
    use test_log::test;

    #[test]
    fn shipped_layout_verifies() {
        LAYOUT.verify().expect("layout should be consistent");
    }

    #[test]
    fn verify_rejects_short_table() {
        let mut report = LayoutReport::collect();
        report.elements[0].tables[0].len -= 1;
        let err = report.verify().expect_err("short table must fail");
        assert!(err.to_string().contains("Trig"), "unexpected error: {err}");
    }

    #[test]
    fn verify_rejects_bad_stride() {
        let mut report = LayoutReport::collect();
        report.elements[1].stride = 3;
        assert!(report.verify().is_err());
    }

    #[test]
    fn strides_fill_the_register() {
        let f32_layout = ElementLayout::of::<f32>();
        let f64_layout = ElementLayout::of::<f64>();
        assert_eq!(f32_layout.stride, 4);
        assert_eq!(f64_layout.stride, 2);
        assert_eq!(f32_layout.tables[0].len, TrigRow::ROWS * 4);
        assert_eq!(f64_layout.tables[1].len, LogRow::ROWS * 2);
    }

    #[test]
    fn named_constants_are_padded_hex() {
        let consts = named_constants::<F32x4>();
        let half = consts.iter().find(|c| c.name == "half").expect("half present");
        assert_eq!(half.lanes, vec!["0x3f000000"; 4]);

        let consts = named_constants::<F64x4>();
        let mask = consts.iter().find(|c| c.name == "exponent_mask").expect("mask present");
        assert_eq!(mask.lanes, vec!["0x7ff0000000000000"; 4]);
    }

    #[test]
    fn named_constants_cover_every_family_member() {
        let consts = named_constants::<F32x4>();
        let expected = 10
            + TrigRow::COS_COEFFS
            + TrigRow::SIN_COEFFS
            + TrigRow::ATAN_P_COEFFS
            + TrigRow::ATAN_Q_COEFFS
            + LogRow::P_COEFFS
            + LogRow::Q_COEFFS
            + 13;
        assert_eq!(consts.len(), expected);
        assert!(consts.iter().any(|c| c.name == "atan_q(4)"));
    }
}
