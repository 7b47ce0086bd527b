//! # Ports Layer (Hexagonal Architecture)
//!
//! Inbound API and outbound collaborator traits.

pub mod inbound;
pub mod outbound;

pub use inbound::WarpMessagingApi;
pub use outbound::{
    KeyProvider, MockNodeInfoProvider, MockTransactionIssuer, NodeInfo, NodeInfoProvider,
    RegisterValidatorTx, TransactionIssuer,
};
