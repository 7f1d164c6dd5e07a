//! Install-block normalization for Dockerfile text
//!
//! Finds `apt-get install` blocks whose package names ended up scattered
//! around the apt cleanup commands and rewrites them so the packages sit
//! directly under the install line again. Everything here is a pure
//! text-to-text transformation; reading and writing files is left to the
//! caller.

pub mod block;
pub mod diff;
pub mod edit;
pub mod error;
pub mod line;
pub mod marker;
pub mod normalize;
pub mod token;

pub use block::{InstallBlock, find_blocks};
pub use diff::{TextChange, unified_diff};
pub use edit::Splice;
pub use error::{Error, Result};
pub use line::LineEnding;
pub use normalize::{NormalizeOptions, Normalized, Outcome, normalize, normalize_with};
pub use token::PackageToken;
