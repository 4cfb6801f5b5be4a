//! State-machine aggregates: commands in, events out.

/// Identity and version of an aggregate instance.
pub trait AggregateRoot {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Number of events applied so far. Stores compare it on save to detect
    /// concurrent writers.
    fn version(&self) -> u64;
}

/// Decision and evolution of an aggregate.
///
/// `handle` decides (no mutation, no IO); `apply` evolves state from one event
/// and bumps the version.
pub trait Aggregate: AggregateRoot {
    type Command: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    fn apply(&mut self, event: &Self::Event);

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;

    /// Handle `command` and apply every resulting event in order.
    ///
    /// State is untouched when the command is refused.
    fn decide_and_apply(&mut self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let events = self.handle(command)?;
        for event in &events {
            self.apply(event);
        }
        Ok(events)
    }
}
