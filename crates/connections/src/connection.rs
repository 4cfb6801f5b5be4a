use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendorhub_core::{Aggregate, AggregateRoot, AgentId, ConnectionId, DomainError, VendorId};

/// Connection request lifecycle.
///
/// `Pending` is the only state a decision can be taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    Rejected,
}

/// Display details of the requesting vendor, captured at request time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorProfile {
    pub name: String,
    pub shop_name: String,
}

/// Display details of the addressed agent, captured at request time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub name: String,
    pub agency_name: String,
}

/// One side of a connection, as identified by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Participant {
    Vendor(VendorId),
    Agent(AgentId),
}

/// Aggregate root: ConnectionRequest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRequest {
    id: ConnectionId,
    vendor_id: Option<VendorId>,
    agent_id: Option<AgentId>,
    vendor: VendorProfile,
    agent: AgentProfile,
    status: ConnectionStatus,
    requested_at: Option<DateTime<Utc>>,
    decided_at: Option<DateTime<Utc>>,
    version: u64,
    created: bool,
}

impl ConnectionRequest {
    /// Create an empty, not-yet-requested aggregate instance.
    pub fn empty(id: ConnectionId) -> Self {
        Self {
            id,
            vendor_id: None,
            agent_id: None,
            vendor: VendorProfile {
                name: String::new(),
                shop_name: String::new(),
            },
            agent: AgentProfile {
                name: String::new(),
                agency_name: String::new(),
            },
            status: ConnectionStatus::Pending,
            requested_at: None,
            decided_at: None,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> ConnectionId {
        self.id
    }

    pub fn vendor_id(&self) -> Option<&VendorId> {
        self.vendor_id.as_ref()
    }

    pub fn agent_id(&self) -> Option<&AgentId> {
        self.agent_id.as_ref()
    }

    pub fn vendor(&self) -> &VendorProfile {
        &self.vendor
    }

    pub fn agent(&self) -> &AgentProfile {
        &self.agent
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn requested_at(&self) -> Option<DateTime<Utc>> {
        self.requested_at
    }

    pub fn decided_at(&self) -> Option<DateTime<Utc>> {
        self.decided_at
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    /// Whether `participant` is the vendor or the agent of this request.
    pub fn involves(&self, participant: &Participant) -> bool {
        match participant {
            Participant::Vendor(v) => self.vendor_id.as_ref() == Some(v),
            Participant::Agent(a) => self.agent_id.as_ref() == Some(a),
        }
    }

    /// Whether the vendor/agent pair of this request matches.
    pub fn links(&self, vendor_id: &VendorId, agent_id: &AgentId) -> bool {
        self.vendor_id.as_ref() == Some(vendor_id) && self.agent_id.as_ref() == Some(agent_id)
    }
}

impl AggregateRoot for ConnectionRequest {
    type Id = ConnectionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: RequestConnection (issued by the vendor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestConnection {
    pub connection_id: ConnectionId,
    pub vendor_id: VendorId,
    pub agent_id: AgentId,
    pub vendor: VendorProfile,
    pub agent: AgentProfile,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AcceptConnection (issued by the addressed agent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptConnection {
    pub connection_id: ConnectionId,
    pub agent_id: AgentId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RejectConnection (issued by the addressed agent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectConnection {
    pub connection_id: ConnectionId,
    pub agent_id: AgentId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionCommand {
    RequestConnection(RequestConnection),
    AcceptConnection(AcceptConnection),
    RejectConnection(RejectConnection),
}

/// Event: ConnectionRequested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRequested {
    pub connection_id: ConnectionId,
    pub vendor_id: VendorId,
    pub agent_id: AgentId,
    pub vendor: VendorProfile,
    pub agent: AgentProfile,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ConnectionAccepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionAccepted {
    pub connection_id: ConnectionId,
    pub agent_id: AgentId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ConnectionRejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRejected {
    pub connection_id: ConnectionId,
    pub agent_id: AgentId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionEvent {
    ConnectionRequested(ConnectionRequested),
    ConnectionAccepted(ConnectionAccepted),
    ConnectionRejected(ConnectionRejected),
}

impl ConnectionEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            ConnectionEvent::ConnectionRequested(_) => "connections.connection.requested",
            ConnectionEvent::ConnectionAccepted(_) => "connections.connection.accepted",
            ConnectionEvent::ConnectionRejected(_) => "connections.connection.rejected",
        }
    }
}

impl Aggregate for ConnectionRequest {
    type Command = ConnectionCommand;
    type Event = ConnectionEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ConnectionEvent::ConnectionRequested(e) => {
                self.id = e.connection_id;
                self.vendor_id = Some(e.vendor_id.clone());
                self.agent_id = Some(e.agent_id.clone());
                self.vendor = e.vendor.clone();
                self.agent = e.agent.clone();
                self.status = ConnectionStatus::Pending;
                self.requested_at = Some(e.occurred_at);
                self.created = true;
            }
            ConnectionEvent::ConnectionAccepted(e) => {
                self.status = ConnectionStatus::Accepted;
                self.decided_at = Some(e.occurred_at);
            }
            ConnectionEvent::ConnectionRejected(e) => {
                self.status = ConnectionStatus::Rejected;
                self.decided_at = Some(e.occurred_at);
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ConnectionCommand::RequestConnection(cmd) => self.handle_request(cmd),
            ConnectionCommand::AcceptConnection(cmd) => {
                self.ensure_decidable(cmd.connection_id, &cmd.agent_id)?;
                Ok(vec![ConnectionEvent::ConnectionAccepted(ConnectionAccepted {
                    connection_id: cmd.connection_id,
                    agent_id: cmd.agent_id.clone(),
                    occurred_at: cmd.occurred_at,
                })])
            }
            ConnectionCommand::RejectConnection(cmd) => {
                self.ensure_decidable(cmd.connection_id, &cmd.agent_id)?;
                Ok(vec![ConnectionEvent::ConnectionRejected(ConnectionRejected {
                    connection_id: cmd.connection_id,
                    agent_id: cmd.agent_id.clone(),
                    occurred_at: cmd.occurred_at,
                })])
            }
        }
    }
}

impl ConnectionRequest {
    fn handle_request(&self, cmd: &RequestConnection) -> Result<Vec<ConnectionEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("connection already exists"));
        }
        if cmd.connection_id != self.id {
            return Err(DomainError::invariant("connection_id mismatch"));
        }
        if cmd.vendor.name.trim().is_empty() {
            return Err(DomainError::validation("vendor name cannot be empty"));
        }
        if cmd.agent.name.trim().is_empty() {
            return Err(DomainError::validation("agent name cannot be empty"));
        }

        Ok(vec![ConnectionEvent::ConnectionRequested(ConnectionRequested {
            connection_id: cmd.connection_id,
            vendor_id: cmd.vendor_id.clone(),
            agent_id: cmd.agent_id.clone(),
            vendor: cmd.vendor.clone(),
            agent: cmd.agent.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    /// Only the addressed agent may decide, and only once.
    fn ensure_decidable(&self, connection_id: ConnectionId, agent_id: &AgentId) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::NotFound("connection"));
        }
        if connection_id != self.id {
            return Err(DomainError::invariant("connection_id mismatch"));
        }
        if self.agent_id.as_ref() != Some(agent_id) {
            return Err(DomainError::NotParty("connection"));
        }
        if self.status != ConnectionStatus::Pending {
            return Err(DomainError::conflict(format!(
                "connection already {}",
                match self.status {
                    ConnectionStatus::Accepted => "accepted",
                    ConnectionStatus::Rejected => "rejected",
                    ConnectionStatus::Pending => "pending",
                }
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor_id() -> VendorId {
        VendorId::new("VEN-1001").unwrap()
    }

    fn agent_id() -> AgentId {
        AgentId::new("6650a1b2c3d4e5f601234567").unwrap()
    }

    fn request_cmd(connection_id: ConnectionId) -> RequestConnection {
        RequestConnection {
            connection_id,
            vendor_id: vendor_id(),
            agent_id: agent_id(),
            vendor: VendorProfile {
                name: "Asha".to_string(),
                shop_name: "Asha Spices".to_string(),
            },
            agent: AgentProfile {
                name: "Ravi".to_string(),
                agency_name: "North Market Agents".to_string(),
            },
            occurred_at: Utc::now(),
        }
    }

    fn requested() -> ConnectionRequest {
        let id = ConnectionId::new();
        let mut c = ConnectionRequest::empty(id);
        c.decide_and_apply(&ConnectionCommand::RequestConnection(request_cmd(id)))
            .unwrap();
        c
    }

    fn accept_cmd(c: &ConnectionRequest, agent: AgentId) -> ConnectionCommand {
        ConnectionCommand::AcceptConnection(AcceptConnection {
            connection_id: c.id_typed(),
            agent_id: agent,
            occurred_at: Utc::now(),
        })
    }

    fn reject_cmd(c: &ConnectionRequest, agent: AgentId) -> ConnectionCommand {
        ConnectionCommand::RejectConnection(RejectConnection {
            connection_id: c.id_typed(),
            agent_id: agent,
            occurred_at: Utc::now(),
        })
    }

    #[test]
    fn request_creates_pending_connection() {
        let c = requested();
        assert!(c.is_created());
        assert_eq!(c.status(), ConnectionStatus::Pending);
        assert_eq!(c.vendor_id(), Some(&vendor_id()));
        assert_eq!(c.agent_id(), Some(&agent_id()));
        assert_eq!(c.vendor().shop_name, "Asha Spices");
        assert!(c.links(&vendor_id(), &agent_id()));
        assert!(c.involves(&Participant::Vendor(vendor_id())));
        assert!(c.involves(&Participant::Agent(agent_id())));
        assert!(!c.involves(&Participant::Vendor(VendorId::new("VEN-9").unwrap())));
        assert_eq!(c.version(), 1);
    }

    #[test]
    fn request_twice_conflicts() {
        let c = requested();
        let err = c
            .handle(&ConnectionCommand::RequestConnection(request_cmd(c.id_typed())))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn request_requires_names() {
        let id = ConnectionId::new();
        let c = ConnectionRequest::empty(id);
        let mut cmd = request_cmd(id);
        cmd.vendor.name = " ".to_string();
        let err = c.handle(&ConnectionCommand::RequestConnection(cmd)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn addressed_agent_accepts() {
        let mut c = requested();
        let events = c.handle(&accept_cmd(&c, agent_id())).unwrap();
        assert_eq!(events[0].event_type(), "connections.connection.accepted");
        c.apply(&events[0]);

        assert_eq!(c.status(), ConnectionStatus::Accepted);
        assert!(c.decided_at().is_some());
        assert_eq!(c.version(), 2);
    }

    #[test]
    fn addressed_agent_rejects() {
        let mut c = requested();
        let events = c.handle(&reject_cmd(&c, agent_id())).unwrap();
        c.apply(&events[0]);
        assert_eq!(c.status(), ConnectionStatus::Rejected);
    }

    #[test]
    fn other_agent_cannot_decide() {
        let c = requested();
        let stranger = AgentId::new("someone-else").unwrap();
        assert_eq!(c.handle(&accept_cmd(&c, stranger.clone())).unwrap_err(), DomainError::NotParty("connection"));
        assert_eq!(c.handle(&reject_cmd(&c, stranger)).unwrap_err(), DomainError::NotParty("connection"));
    }

    #[test]
    fn decisions_are_final() {
        let mut c = requested();
        let events = c.handle(&accept_cmd(&c, agent_id())).unwrap();
        c.apply(&events[0]);

        assert!(matches!(c.handle(&reject_cmd(&c, agent_id())), Err(DomainError::Conflict(_))));
        assert!(matches!(c.handle(&accept_cmd(&c, agent_id())), Err(DomainError::Conflict(_))));
    }

    #[test]
    fn refused_command_leaves_state_untouched() {
        let mut c = requested();
        let before = c.clone();
        let stranger = AgentId::new("someone-else").unwrap();

        assert!(c.decide_and_apply(&accept_cmd(&before, stranger)).is_err());
        assert_eq!(c, before);
    }

    #[test]
    fn deciding_unknown_connection_is_not_found() {
        let c = ConnectionRequest::empty(ConnectionId::new());
        assert_eq!(c.handle(&accept_cmd(&c, agent_id())).unwrap_err(), DomainError::NotFound("connection"));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: handle never mutates state, for any vendor/agent names.
            #[test]
            fn handle_is_pure(
                vendor_name in "[A-Za-z][A-Za-z ]{0,30}",
                agent_name in "[A-Za-z][A-Za-z ]{0,30}"
            ) {
                let id = ConnectionId::new();
                let c = ConnectionRequest::empty(id);
                let mut cmd = request_cmd(id);
                cmd.vendor.name = vendor_name;
                cmd.agent.name = agent_name;
                let cmd = ConnectionCommand::RequestConnection(cmd);

                let before = c.clone();
                let e1 = c.handle(&cmd);
                let e2 = c.handle(&cmd);

                prop_assert_eq!(&before, &c);
                prop_assert_eq!(e1, e2);
            }
        }
    }
}
