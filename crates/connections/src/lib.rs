//! Vendor/agent connection requests.
//!
//! A vendor asks an agent to represent them; the agent accepts or rejects.
//! Pure domain logic only: storage and identity lookup live in other crates.

pub mod connection;

pub use connection::{
    AcceptConnection, AgentProfile, ConnectionAccepted, ConnectionCommand, ConnectionEvent,
    ConnectionRejected, ConnectionRequest, ConnectionRequested, ConnectionStatus, Participant,
    RejectConnection, RequestConnection, VendorProfile,
};
