use vendorhub_connections::Participant;
use vendorhub_core::{AgentId, VendorId};

/// Who is calling, as asserted by the upstream gateway.
///
/// Authentication happens before requests reach this service; this only
/// carries the resulting identity to handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallerContext {
    Anonymous,
    Vendor(VendorId),
    Agent(AgentId),
}

impl CallerContext {
    pub fn vendor_id(&self) -> Option<&VendorId> {
        match self {
            CallerContext::Vendor(v) => Some(v),
            _ => None,
        }
    }

    pub fn agent_id(&self) -> Option<&AgentId> {
        match self {
            CallerContext::Agent(a) => Some(a),
            _ => None,
        }
    }

    pub fn participant(&self) -> Option<Participant> {
        match self {
            CallerContext::Anonymous => None,
            CallerContext::Vendor(v) => Some(Participant::Vendor(v.clone())),
            CallerContext::Agent(a) => Some(Participant::Agent(a.clone())),
        }
    }
}
