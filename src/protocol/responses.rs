//! FTP reply codes
//!
//! Status codes the FXP client checks for.

pub const NO_TRANSFER_IN_PROGRESS: u16 = 225;
pub const TRANSFER_COMPLETE: u16 = 226;
pub const PASSWORD_REQUIRED: u16 = 331;
pub const TRANSFER_ABORTED: u16 = 426;

/// Coarse reply class, taken from the first digit of the status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyClass {
    Preliminary,
    Success,
    Intermediate,
    TransientFailure,
    PermanentFailure,
}

impl ReplyClass {
    /// Classify a three-digit status code. Codes outside 100..=599 have no class.
    pub fn of(code: u16) -> Option<Self> {
        match code / 100 {
            1 => Some(ReplyClass::Preliminary),
            2 => Some(ReplyClass::Success),
            3 => Some(ReplyClass::Intermediate),
            4 => Some(ReplyClass::TransientFailure),
            5 => Some(ReplyClass::PermanentFailure),
            _ => None,
        }
    }
}
