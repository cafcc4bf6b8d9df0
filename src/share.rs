//! Share action
//!
//! The platform capability (native share sheet, clipboard) may fail at any
//! time. Failure always degrades to showing the URL for manual copying and
//! never touches session state.

use crate::error::BingoError;

pub const COPIED_NOTICE: &str = "Link copied!";
pub const MANUAL_COPY_PROMPT: &str = "Copy this URL:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub url: String,
}

/// How a successful share was delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareChannel {
    Native,
    Clipboard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied,
    /// Show `url` in a prompt so the user can copy it themselves
    ManualCopy { prompt: String, url: String },
}

impl ShareOutcome {
    pub fn settle(payload: &SharePayload, result: Result<ShareChannel, BingoError>) -> Self {
        match result {
            Ok(ShareChannel::Native) => ShareOutcome::Shared,
            Ok(ShareChannel::Clipboard) => ShareOutcome::Copied,
            Err(err) => {
                log::warn!("{}, falling back to manual copy", err);
                ShareOutcome::ManualCopy {
                    prompt: MANUAL_COPY_PROMPT.to_string(),
                    url: payload.url.clone(),
                }
            }
        }
    }

    /// Text to flash at the user, if any
    pub fn notice(&self) -> Option<&str> {
        match self {
            ShareOutcome::Copied => Some(COPIED_NOTICE),
            _ => None,
        }
    }
}

/// A platform share capability
pub trait ShareTarget {
    fn share(&mut self, payload: &SharePayload) -> Result<ShareChannel, BingoError>;
}

pub fn share_with_fallback<T: ShareTarget + ?Sized>(
    target: &mut T,
    payload: &SharePayload,
) -> ShareOutcome {
    ShareOutcome::settle(payload, target.share(payload))
}
