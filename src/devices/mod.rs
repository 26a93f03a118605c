//! LED zone dispatch.

pub mod process;

use async_trait::async_trait;

use crate::{color::Rgb, error::Error};

/// A single controllable LED region.
///
/// The sampling loop only ever talks to this trait, so the dispatch mechanism
/// (external control utility, SDK session, test double) is interchangeable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedZone: Send + Sync {
    fn name(&self) -> &str;
    async fn apply(&self, color: Rgb) -> Result<(), Error>;
}
