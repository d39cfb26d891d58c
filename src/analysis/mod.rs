//! Board analysis refreshed once per turn
//!
//! - [`blocking`]: whether a pattern can still be realized
//! - [`registry`]: live index of both players' patterns and gaps
//! - [`fragments`]: connected groups of one player's stones and their heads

pub mod blocking;
pub mod fragments;
pub mod registry;

pub use blocking::{is_surrounded, BlockReason, BlockingDetector};
pub use fragments::{head_direction, ConnectionMove, Fragment, FragmentTracker, HeadSide};
pub use registry::{is_usable, pattern_between, Gap, GapKey, GapRegistry, GapStats};
