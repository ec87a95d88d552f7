//! AssetMax Core - Foundational types shared by the AssetMax crates
//!
//! - `AssetMaxError` and the `Result` alias
//! - `Clock` - injectable time source for generated timestamps

mod clock;
mod error;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{AssetMaxError, Result};
