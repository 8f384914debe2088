//! Prints the constant table layout and every named constant as JSON.
//!
//! Usage: `dump-consts [--pretty]`. Logging goes to stderr and follows
//! `RUST_LOG` (default `info`).

use anyhow::Context;
use log::{info, warn};
use pixelflow_consts::{named_constants, F32x4, F32x8, F64x2, F64x4, LAYOUT};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let mut pretty = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--pretty" => pretty = true,
            other => warn!("Ignoring unknown argument '{}'", other),
        }
    }

    let layout = &*LAYOUT;
    layout
        .verify()
        .context("Constant table layout check failed")?;
    info!(
        "Layout verified: {} element types, {} byte registers",
        layout.elements.len(),
        layout.register_bytes
    );

    let doc = json!({
        "layout": layout,
        "constants": {
            "F32x4": named_constants::<F32x4>(),
            "F64x2": named_constants::<F64x2>(),
            "F32x8": named_constants::<F32x8>(),
            "F64x4": named_constants::<F64x4>(),
        },
    });

    let text = if pretty {
        serde_json::to_string_pretty(&doc)
    } else {
        serde_json::to_string(&doc)
    }
    .context("Failed to serialize constant dump")?;
    println!("{}", text);
    Ok(())
}
