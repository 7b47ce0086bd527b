//! # Inbound Ports
//!
//! API trait defining what the Warp messaging subsystem can do.

use crate::algorithms::SignatureCollector;
use crate::domain::{
    Committee, Message, Registration, RegistrationParams, SignatureContribution, UnsignedMessage,
    WarpError,
};

/// Warp messaging API - inbound port.
pub trait WarpMessagingApi: Send + Sync {
    /// Build a pending registration message.
    fn build_registration(&self, params: &RegistrationParams) -> Result<Registration, WarpError>;

    /// Sign `unsigned` with the local key at its committee position.
    fn contribute(&self, unsigned: &UnsignedMessage) -> Result<SignatureContribution, WarpError>;

    /// Sign a pending registration with the local key alone.
    fn sign_registration<'a>(
        &self,
        registration: &'a mut Registration,
    ) -> Result<&'a Message, WarpError>;

    /// Fresh collector for `unsigned` bound to the current committee.
    fn new_collector(&self, unsigned: &UnsignedMessage) -> SignatureCollector;

    /// Check a signed message against the committee and quorum.
    fn verify_message(&self, message: &Message) -> Result<(), WarpError>;

    /// Committee snapshot in use.
    fn committee(&self) -> &Committee;
}
