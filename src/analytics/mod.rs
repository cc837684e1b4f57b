pub mod bs_analytic;

pub use bs_analytic::{Greeks, OptionKind};
