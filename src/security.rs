//! Authorization checks guarding destructive operations.

use tracing::{debug, warn};
use zeroize::{Zeroize, Zeroizing};

/// Number of PIN attempts granted per challenge unless configured otherwise.
pub const DEFAULT_PIN_ATTEMPTS: u32 = 3;

/// A capability check consulted before a record is removed.
pub trait AuthorizationGate {
    /// Whether the caller may proceed.
    fn authorize(&mut self) -> bool;
}

impl<F: FnMut() -> bool> AuthorizationGate for F {
    fn authorize(&mut self) -> bool {
        self()
    }
}

/// Challenges for a shared admin PIN, giving up after a fixed number of
/// wrong answers.
///
/// `prompt` is called with the number of attempts left and returns the
/// entered PIN, or `None` once input is exhausted.
pub struct PinGate<P> {
    pin: Zeroizing<String>,
    max_attempts: u32,
    prompt: P,
}

impl<P> PinGate<P>
where
    P: FnMut(u32) -> Option<String>,
{
    pub fn new(pin: &str, max_attempts: u32, prompt: P) -> Self {
        Self {
            pin: Zeroizing::new(pin.to_string()),
            max_attempts,
            prompt,
        }
    }
}

impl<P> AuthorizationGate for PinGate<P>
where
    P: FnMut(u32) -> Option<String>,
{
    fn authorize(&mut self) -> bool {
        for remaining in (1..=self.max_attempts).rev() {
            let Some(mut input) = (self.prompt)(remaining) else {
                warn!("PIN input closed before authorization");
                return false;
            };

            let granted = input.trim() == self.pin.as_str();
            input.zeroize();

            if granted {
                debug!("admin PIN accepted");
                return true;
            }
            warn!(remaining = remaining - 1, "incorrect admin PIN");
        }
        false
    }
}
