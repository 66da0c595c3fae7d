//! Logic modules: translates packaging constraints into RPM syntax.
//!
//! Every pass here is pure: no I/O, no shared state.
//!
//! # Modules
//!
//! - `compare`: concrete evaluation of one comparison against a known value
//! - `leaf`: one comparison rendered as an RPM condition
//! - `evaluator`: marker folding and DNF reduction
//! - `specifier`: version specifier sets as RPM requirements

pub mod compare;
pub mod evaluator;
pub mod leaf;
pub mod specifier;
