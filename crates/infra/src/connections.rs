//! Connection request persistence and command execution.
//!
//! ```text
//! Command
//!   ↓
//! 1. Load current state (or start from an empty aggregate)
//!   ↓
//! 2. Handle command (pure decision logic, produces events)
//!   ↓
//! 3. Apply events
//!   ↓
//! 4. Save with an optimistic version check
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use vendorhub_connections::{
    AcceptConnection, AgentProfile, ConnectionCommand, ConnectionRequest, ConnectionStatus, Participant,
    RejectConnection, RequestConnection, VendorProfile,
};
use vendorhub_core::{Aggregate, AggregateRoot, AgentId, ConnectionId, DomainError, VendorId};

use crate::read_model::StoreError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectionServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// In-memory connection store keyed by connection id.
///
/// Enforces at most one connection per (vendor, agent) pair.
#[derive(Debug, Default)]
pub struct InMemoryConnectionStore {
    inner: RwLock<HashMap<ConnectionId, ConnectionRequest>>,
}

impl InMemoryConnectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ConnectionId) -> Result<Option<ConnectionRequest>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::LockPoisoned("connections"))?;
        Ok(map.get(&id).cloned())
    }

    /// Insert a newly requested connection.
    fn insert(&self, connection: ConnectionRequest) -> Result<(), ConnectionServiceError> {
        let mut map = self.inner.write().map_err(|_| StoreError::LockPoisoned("connections"))?;

        if let (Some(vendor_id), Some(agent_id)) = (connection.vendor_id(), connection.agent_id()) {
            if map.values().any(|c| c.links(vendor_id, agent_id)) {
                return Err(DomainError::conflict("connection already exists").into());
            }
        }

        map.insert(connection.id_typed(), connection);
        Ok(())
    }

    /// Replace a stored connection if it is still at `expected_version`.
    fn save(&self, connection: ConnectionRequest, expected_version: u64) -> Result<(), ConnectionServiceError> {
        let mut map = self.inner.write().map_err(|_| StoreError::LockPoisoned("connections"))?;

        let current = map.get(&connection.id_typed()).ok_or(DomainError::NotFound("connection"))?;
        if current.version() != expected_version {
            return Err(StoreError::Concurrency {
                expected: expected_version,
                actual: current.version(),
            }
            .into());
        }

        map.insert(connection.id_typed(), connection);
        Ok(())
    }

    fn remove(&self, id: ConnectionId) -> Result<Option<ConnectionRequest>, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::LockPoisoned("connections"))?;
        Ok(map.remove(&id))
    }

    /// Connections matching `filter`, oldest request first.
    fn list_where(&self, filter: impl Fn(&ConnectionRequest) -> bool) -> Result<Vec<ConnectionRequest>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::LockPoisoned("connections"))?;
        let mut out: Vec<ConnectionRequest> = map.values().filter(|c| filter(c)).cloned().collect();
        out.sort_by_key(|c| (c.requested_at(), *c.id_typed().as_uuid()));
        Ok(out)
    }
}

/// Executes connection commands against the store.
#[derive(Debug, Default)]
pub struct ConnectionService {
    store: InMemoryConnectionStore,
}

impl ConnectionService {
    pub fn new(store: InMemoryConnectionStore) -> Self {
        Self { store }
    }

    pub fn get(&self, id: ConnectionId) -> Result<Option<ConnectionRequest>, ConnectionServiceError> {
        Ok(self.store.get(id)?)
    }

    /// Vendor asks an agent to connect. The new request starts `pending`.
    pub fn request(
        &self,
        vendor_id: VendorId,
        agent_id: AgentId,
        vendor: VendorProfile,
        agent: AgentProfile,
        now: DateTime<Utc>,
    ) -> Result<ConnectionRequest, ConnectionServiceError> {
        let id = ConnectionId::new();
        let mut connection = ConnectionRequest::empty(id);

        let cmd = ConnectionCommand::RequestConnection(RequestConnection {
            connection_id: id,
            vendor_id,
            agent_id,
            vendor,
            agent,
            occurred_at: now,
        });

        connection.decide_and_apply(&cmd)?;

        self.store.insert(connection.clone())?;
        info!(connection = %id, "connection requested");
        Ok(connection)
    }

    pub fn accept(
        &self,
        id: ConnectionId,
        agent_id: AgentId,
        now: DateTime<Utc>,
    ) -> Result<ConnectionRequest, ConnectionServiceError> {
        self.execute(
            id,
            ConnectionCommand::AcceptConnection(AcceptConnection {
                connection_id: id,
                agent_id,
                occurred_at: now,
            }),
        )
    }

    pub fn reject(
        &self,
        id: ConnectionId,
        agent_id: AgentId,
        now: DateTime<Utc>,
    ) -> Result<ConnectionRequest, ConnectionServiceError> {
        self.execute(
            id,
            ConnectionCommand::RejectConnection(RejectConnection {
                connection_id: id,
                agent_id,
                occurred_at: now,
            }),
        )
    }

    /// Remove a connection in any state. Only its vendor or agent may do so.
    pub fn delete(&self, id: ConnectionId, caller: &Participant) -> Result<(), ConnectionServiceError> {
        let connection = self.store.get(id)?.ok_or(DomainError::NotFound("connection"))?;
        if !connection.involves(caller) {
            return Err(DomainError::NotParty("connection").into());
        }

        self.store.remove(id)?;
        info!(connection = %id, "connection deleted");
        Ok(())
    }

    /// Accepted connections of a vendor.
    pub fn connected_agents(&self, vendor_id: &VendorId) -> Result<Vec<ConnectionRequest>, ConnectionServiceError> {
        Ok(self.store.list_where(|c| {
            c.vendor_id() == Some(vendor_id) && c.status() == ConnectionStatus::Accepted
        })?)
    }

    /// Accepted connections of an agent.
    pub fn connected_vendors(&self, agent_id: &AgentId) -> Result<Vec<ConnectionRequest>, ConnectionServiceError> {
        Ok(self.store.list_where(|c| {
            c.agent_id() == Some(agent_id) && c.status() == ConnectionStatus::Accepted
        })?)
    }

    /// Requests awaiting a decision by an agent.
    pub fn pending_requests(&self, agent_id: &AgentId) -> Result<Vec<ConnectionRequest>, ConnectionServiceError> {
        Ok(self.store.list_where(|c| {
            c.agent_id() == Some(agent_id) && c.status() == ConnectionStatus::Pending
        })?)
    }

    fn execute(&self, id: ConnectionId, cmd: ConnectionCommand) -> Result<ConnectionRequest, ConnectionServiceError> {
        let mut connection = self.store.get(id)?.ok_or(DomainError::NotFound("connection"))?;
        let expected = connection.version();

        for event in connection.decide_and_apply(&cmd)? {
            info!(connection = %id, event = event.event_type(), "connection updated");
        }

        self.store.save(connection.clone(), expected)?;
        Ok(connection)
    }
}
