use crate::domain::model::{Booking, BookingId, Route, RouteId, Van, VanId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

/// Read-only view of the three collections at one revision.
///
/// Consumers get it behind an `Arc` and never mutate it; every change goes
/// through the store, which then publishes a new snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    pub revision: u64,
    pub vans: Vec<Van>,
    pub routes: Vec<Route>,
    pub bookings: Vec<Booking>,
}

impl FleetSnapshot {
    pub fn van(&self, id: &VanId) -> Option<&Van> {
        self.vans.iter().find(|van| &van.id == id)
    }

    pub fn route(&self, id: &RouteId) -> Option<&Route> {
        self.routes.iter().find(|route| &route.id == id)
    }

    pub fn booking(&self, id: &BookingId) -> Option<&Booking> {
        self.bookings.iter().find(|booking| &booking.id == id)
    }

    pub fn bookings_for_van<'a>(&'a self, van_id: &'a VanId) -> impl Iterator<Item = &'a Booking> + 'a {
        self.bookings
            .iter()
            .filter(move |booking| &booking.van_id == van_id)
    }
}

/// Receiving end handed to observers; `changed().await` fires once per
/// published revision.
pub type SnapshotReceiver = watch::Receiver<Arc<FleetSnapshot>>;

/// Publishing side owned by the store.
#[derive(Debug)]
pub(crate) struct SnapshotPublisher {
    sender: watch::Sender<Arc<FleetSnapshot>>,
}

impl SnapshotPublisher {
    pub(crate) fn new(initial: FleetSnapshot) -> Self {
        let (sender, _) = watch::channel(Arc::new(initial));
        Self { sender }
    }

    pub(crate) fn current(&self) -> Arc<FleetSnapshot> {
        self.sender.borrow().clone()
    }

    pub(crate) fn publish(&self, snapshot: FleetSnapshot) {
        let revision = snapshot.revision;
        // `send_replace` succeeds even with no live receivers.
        self.sender.send_replace(Arc::new(snapshot));
        tracing::trace!(revision, observers = self.sender.receiver_count(), "published fleet snapshot");
    }

    pub(crate) fn subscribe(&self) -> SnapshotReceiver {
        self.sender.subscribe()
    }
}
