//! Member registry
//!
//! Owned by the hub loop alone, so every method runs to completion before the
//! next event is looked at. Members whose queues refuse a message are evicted
//! once the operation that stalled them has finished.

use std::collections::HashMap;

use relay_core::{ClientId, Message, Position};

use super::events::{BroadcastSend, Member, PositionChange, PrivateSend};

#[derive(Debug, Default)]
pub(crate) struct Registry {
    members: HashMap<ClientId, Member>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn contains(&self, id: &ClientId) -> bool {
        self.members.contains_key(id)
    }

    /// Last known position of a member
    #[must_use]
    pub fn position(&self, id: &ClientId) -> Option<Position> {
        self.members.get(id).map(|member| member.position)
    }

    /// Ids of every registered member
    #[must_use]
    pub fn ids(&self) -> Vec<ClientId> {
        self.members.keys().copied().collect()
    }

    /// Admit a new member and announce it to everyone already here
    ///
    /// Returns the positions of the existing members for the newcomer. The
    /// snapshot is handed back rather than queued, so only existing members
    /// can stall on a join. A duplicate id gets an empty snapshot.
    pub fn join(&mut self, member: Member) -> Vec<Message> {
        if self.members.contains_key(&member.id) {
            tracing::warn!(client_id = %member.id, "Duplicate join ignored");
            return Vec::new();
        }

        let mut snapshot = Vec::with_capacity(self.members.len());
        let mut stalled = Vec::new();
        let announcement = member.announcement();

        for existing in self.members.values() {
            if !existing.deliver(announcement.clone()) {
                stalled.push(existing.id);
            }
            snapshot.push(existing.announcement());
        }

        tracing::info!(
            client_id = %member.id,
            online = self.members.len() + 1,
            "Client joined"
        );

        self.members.insert(member.id, member);
        self.evict(stalled);
        snapshot
    }

    /// Remove a member and tell everyone else it left
    ///
    /// Returns `false` if the member was not registered.
    pub fn leave(&mut self, id: ClientId) -> bool {
        if !self.contains(&id) {
            tracing::trace!(client_id = %id, "Leave for unknown client ignored");
            return false;
        }

        self.evict(vec![id]);
        true
    }

    /// Deliver a private message to its addressee
    pub fn route_private(&mut self, send: PrivateSend) {
        let to = send.to;
        let Some(recipient) = self.members.get(&to) else {
            tracing::trace!(to = %to, from = %send.from, "Recipient not connected, dropping");
            return;
        };

        if !recipient.deliver(send.into()) {
            self.evict(vec![to]);
        }
    }

    /// Deliver text to every member, the sender included
    pub fn route_broadcast(&mut self, send: BroadcastSend) {
        if !self.contains(&send.from) {
            tracing::debug!(from = %send.from, "Broadcast from departed client dropped");
            return;
        }

        let stalled = self.fan_out(&send.into());
        self.evict(stalled);
    }

    /// Record a member's new position and echo it to every member
    pub fn route_position(&mut self, change: PositionChange) {
        let Some(origin) = self.members.get_mut(&change.from) else {
            tracing::debug!(from = %change.from, "Move from departed client dropped");
            return;
        };
        origin.position = change.position;

        let stalled = self.fan_out(&change.into());
        self.evict(stalled);
    }

    fn fan_out(&self, message: &Message) -> Vec<ClientId> {
        self.members
            .values()
            .filter(|member| !member.deliver(message.clone()))
            .map(|member| member.id)
            .collect()
    }

    /// Remove members and announce each departure, following any further
    /// stalls the announcements cause
    fn evict(&mut self, mut pending: Vec<ClientId>) {
        while let Some(id) = pending.pop() {
            // Dropping the member closes its outbound queue
            if self.members.remove(&id).is_none() {
                continue;
            }

            tracing::info!(client_id = %id, online = self.members.len(), "Client left");

            pending.extend(self.fan_out(&Message::Leave { from: id }));
        }
    }
}
