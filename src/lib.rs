//! # PixelFlow Consts
//!
//! Typed, width-aware constant tables for vectorized transcendental kernels
//! (sin, cos, atan, log).
//!
//! - **Tables** (`data`): flat, lane-replicated static arrays per element type.
//! - **Rows** (`rows`): named row numbers shared by every element type.
//! - **Backend** (`backend`): the register types constants are loaded into.
//! - **Accessors** (`consts`): `ConstantProvider`, one method per constant.
//! - **Layout** (`layout`): diagnostics over the tables.
//!
//! ```
//! use pixelflow_consts::{ConstantProvider, F32x8, SimdVector};
//!
//! let c = F32x8::cos_coeff(0);
//! let mut lanes = [0.0f32; 8];
//! c.store(&mut lanes);
//! assert!(lanes.iter().all(|&x| x == lanes[0]));
//! ```

pub mod backend;
pub mod consts;
pub mod data;
pub mod layout;
pub mod rows;

pub use backend::{
    stride, Element, F32x4, F32x8, F64x2, F64x4, MaskOps, SimdVector, Wide, REGISTER_BYTES,
};
pub use consts::ConstantProvider;
pub use data::TableElement;
pub use layout::{named_constants, LayoutReport, NamedConstant, LAYOUT};
pub use rows::{GeneralRow, LogRow, Table, TrigRow};
