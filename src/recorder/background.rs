//! Background execution grants
//!
//! Finishing a segment or an export must outlive UI foreground time on
//! platforms that suspend backgrounded processes. The authority hands out
//! tokens; dropping the token releases the grant.

/// A held background-execution grant
pub trait BackgroundToken: Send {}

/// Source of background-execution grants
pub trait BackgroundAuthority: Send + Sync {
    fn begin(&self, reason: &str) -> Box<dyn BackgroundToken>;
}

/// Authority for platforms without background suspension
#[derive(Debug, Default)]
pub struct NoopBackgroundAuthority;

struct NoopToken;

impl BackgroundToken for NoopToken {}

impl BackgroundAuthority for NoopBackgroundAuthority {
    fn begin(&self, reason: &str) -> Box<dyn BackgroundToken> {
        tracing::debug!("background grant requested: {reason}");
        Box::new(NoopToken)
    }
}
