use crate::core::collection::{Collection, Keyed};
use crate::core::snapshot::{FleetSnapshot, SnapshotPublisher, SnapshotReceiver};
use crate::domain::model::{
    Booking, BookingDraft, BookingId, BookingPatch, Route, RouteDraft, RouteId, RoutePatch, Van,
    VanDraft, VanId, VanPatch,
};
use crate::domain::ports::{EntityKind, IdGenerator};
use std::fmt;
use std::sync::Arc;

/// Owner of all vans, routes and bookings.
///
/// Every mutation takes `&mut self` and completes before returning, so no
/// caller can observe a half-applied change. Operations addressed at an
/// unknown id do nothing and report `false`; nothing here validates input.
/// Callers check drafts with [`crate::utils::validation`] first.
pub struct FleetStore {
    vans: Collection<Van>,
    routes: Collection<Route>,
    bookings: Collection<Booking>,
    ids: Box<dyn IdGenerator>,
    revision: u64,
    publisher: SnapshotPublisher,
}

impl fmt::Debug for FleetStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FleetStore")
            .field("revision", &self.revision)
            .field("vans", &self.vans.len())
            .field("routes", &self.routes.len())
            .field("bookings", &self.bookings.len())
            .finish()
    }
}

impl FleetStore {
    pub fn new(ids: impl IdGenerator + 'static) -> Self {
        Self {
            vans: Collection::new(),
            routes: Collection::new(),
            bookings: Collection::new(),
            ids: Box::new(ids),
            revision: 0,
            publisher: SnapshotPublisher::new(FleetSnapshot::default()),
        }
    }

    /// Builds a store holding the given entities verbatim, ids included.
    /// The id generator observes every seeded id first.
    ///
    /// Occupancy is taken as given, not re-derived from the bookings. An
    /// entity whose id is already present is skipped.
    pub fn seeded(
        ids: impl IdGenerator + 'static,
        vans: impl IntoIterator<Item = Van>,
        routes: impl IntoIterator<Item = Route>,
        bookings: impl IntoIterator<Item = Booking>,
    ) -> Self {
        let mut store = Self::new(ids);
        for van in vans {
            insert_seed(&mut store.vans, store.ids.as_mut(), van, EntityKind::Van);
        }
        for route in routes {
            insert_seed(&mut store.routes, store.ids.as_mut(), route, EntityKind::Route);
        }
        for booking in bookings {
            insert_seed(&mut store.bookings, store.ids.as_mut(), booking, EntityKind::Booking);
        }
        tracing::debug!(
            vans = store.vans.len(),
            routes = store.routes.len(),
            bookings = store.bookings.len(),
            "seeded fleet store"
        );
        store.publisher.publish(store.build_snapshot());
        store
    }

    // ---- reads ----

    /// The current snapshot. Cheap: shares the last published value.
    pub fn snapshot(&self) -> Arc<FleetSnapshot> {
        self.publisher.current()
    }

    /// Receives every snapshot published after this call.
    pub fn subscribe(&self) -> SnapshotReceiver {
        self.publisher.subscribe()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn vans(&self) -> &[Van] {
        self.vans.as_slice()
    }

    pub fn routes(&self) -> &[Route] {
        self.routes.as_slice()
    }

    pub fn bookings(&self) -> &[Booking] {
        self.bookings.as_slice()
    }

    pub fn van(&self, id: &VanId) -> Option<&Van> {
        self.vans.get(id)
    }

    pub fn route(&self, id: &RouteId) -> Option<&Route> {
        self.routes.get(id)
    }

    pub fn booking(&self, id: &BookingId) -> Option<&Booking> {
        self.bookings.get(id)
    }

    pub fn bookings_for_van<'a>(&'a self, van_id: &'a VanId) -> impl Iterator<Item = &'a Booking> + 'a {
        self.bookings
            .iter()
            .filter(move |booking| &booking.van_id == van_id)
    }

    // ---- vans ----

    pub fn add_van(&mut self, draft: VanDraft) -> VanId {
        let id = VanId::new(fresh_id(self.ids.as_mut(), &self.vans, EntityKind::Van));
        self.vans.push(draft.into_van(id.clone()));
        tracing::debug!(van_id = %id, "added van");
        self.commit();
        id
    }

    /// Merges `patch` into the van. Occupancy and route may be overwritten
    /// directly; nothing is re-derived.
    pub fn update_van(&mut self, id: &VanId, patch: VanPatch) -> bool {
        let Some(van) = self.vans.get_mut(id) else {
            tracing::debug!(van_id = %id, "update_van: no such van, ignoring");
            return false;
        };
        patch.apply(van);
        tracing::debug!(van_id = %id, "updated van");
        self.commit();
        true
    }

    /// Removes the van. Bookings pointing at it are left as they are.
    pub fn delete_van(&mut self, id: &VanId) -> bool {
        if self.vans.remove(id).is_none() {
            tracing::debug!(van_id = %id, "delete_van: no such van, ignoring");
            return false;
        }
        let orphaned = self.bookings_for_van(id).count();
        tracing::debug!(van_id = %id, orphaned_bookings = orphaned, "deleted van");
        self.commit();
        true
    }

    // ---- routes ----

    pub fn add_route(&mut self, draft: RouteDraft) -> RouteId {
        let id = RouteId::new(fresh_id(self.ids.as_mut(), &self.routes, EntityKind::Route));
        self.routes.push(draft.into_route(id.clone()));
        tracing::debug!(route_id = %id, "added route");
        self.commit();
        id
    }

    /// Merges `patch` into the route. Vans already carrying a copy keep it.
    pub fn update_route(&mut self, id: &RouteId, patch: RoutePatch) -> bool {
        let Some(route) = self.routes.get_mut(id) else {
            tracing::debug!(route_id = %id, "update_route: no such route, ignoring");
            return false;
        };
        patch.apply(route);
        tracing::debug!(route_id = %id, "updated route");
        self.commit();
        true
    }

    pub fn delete_route(&mut self, id: &RouteId) -> bool {
        if self.routes.remove(id).is_none() {
            tracing::debug!(route_id = %id, "delete_route: no such route, ignoring");
            return false;
        }
        tracing::debug!(route_id = %id, "deleted route");
        self.commit();
        true
    }

    // ---- bookings ----

    /// Appends the booking and takes one seat on its van, if that van exists.
    /// Occupancy saturates at `u32::MAX`.
    /// The seat number is not checked against other bookings.
    pub fn add_booking(&mut self, draft: BookingDraft) -> BookingId {
        let id = BookingId::new(fresh_id(
            self.ids.as_mut(),
            &self.bookings,
            EntityKind::Booking,
        ));
        let van_id = draft.van_id.clone();
        self.bookings.push(draft.into_booking(id.clone()));

        match self.vans.get_mut(&van_id) {
            Some(van) => {
                van.occupied_seats = van.occupied_seats.saturating_add(1);
                tracing::debug!(
                    booking_id = %id,
                    van_id = %van_id,
                    occupied_seats = van.occupied_seats,
                    "added booking"
                );
            }
            None => {
                tracing::debug!(booking_id = %id, van_id = %van_id, "added booking for unknown van");
            }
        }
        self.commit();
        id
    }

    /// Merges `patch` into the booking. Occupancy is left alone, whatever
    /// the status becomes.
    pub fn update_booking(&mut self, id: &BookingId, patch: BookingPatch) -> bool {
        let Some(booking) = self.bookings.get_mut(id) else {
            tracing::debug!(booking_id = %id, "update_booking: no such booking, ignoring");
            return false;
        };
        patch.apply(booking);
        tracing::debug!(booking_id = %id, status = ?booking.status, "updated booking");
        self.commit();
        true
    }

    /// Removes the booking and frees one seat on its van, never going
    /// below zero.
    pub fn delete_booking(&mut self, id: &BookingId) -> bool {
        let Some(booking) = self.bookings.remove(id) else {
            tracing::debug!(booking_id = %id, "delete_booking: no such booking, ignoring");
            return false;
        };
        if let Some(van) = self.vans.get_mut(&booking.van_id) {
            van.occupied_seats = van.occupied_seats.saturating_sub(1);
        }
        tracing::debug!(booking_id = %id, van_id = %booking.van_id, "deleted booking");
        self.commit();
        true
    }

    // ---- route assignment ----

    /// Stores a copy of the route on the van. `None`, or a route id that
    /// does not resolve, clears the van's route.
    pub fn assign_route_to_van(&mut self, van_id: &VanId, route_id: Option<&RouteId>) -> bool {
        let route = route_id.and_then(|id| self.routes.get(id)).cloned();
        if route.is_none() {
            if let Some(missing) = route_id {
                tracing::debug!(route_id = %missing, "assign_route_to_van: no such route, clearing");
            }
        }

        let Some(van) = self.vans.get_mut(van_id) else {
            tracing::debug!(van_id = %van_id, "assign_route_to_van: no such van, ignoring");
            return false;
        };
        van.route = route;
        tracing::debug!(
            van_id = %van_id,
            route_id = van.route.as_ref().map(|r| r.id.as_str()).unwrap_or("none"),
            "assigned route"
        );
        self.commit();
        true
    }

    fn commit(&mut self) {
        self.revision += 1;
        let snapshot = self.build_snapshot();
        self.publisher.publish(snapshot);
    }

    fn build_snapshot(&self) -> FleetSnapshot {
        FleetSnapshot {
            revision: self.revision,
            vans: self.vans.as_slice().to_vec(),
            routes: self.routes.as_slice().to_vec(),
            bookings: self.bookings.as_slice().to_vec(),
        }
    }
}

/// Draws an id for `kind` that `collection` has never held. A repeated draw
/// gets a numeric suffix until it is unique.
fn fresh_id<T>(ids: &mut dyn IdGenerator, collection: &Collection<T>, kind: EntityKind) -> String
where
    T: Keyed,
    T::Id: From<String>,
{
    let raw = ids.next_id(kind);
    if !collection.has_issued(&T::Id::from(raw.clone())) {
        return raw;
    }
    tracing::warn!(kind = %kind, id = %raw, "id generator repeated an issued id");
    let mut attempt = 2u64;
    loop {
        let candidate = format!("{}-{}", raw, attempt);
        if !collection.has_issued(&T::Id::from(candidate.clone())) {
            return candidate;
        }
        attempt += 1;
    }
}

fn insert_seed<T: Keyed>(collection: &mut Collection<T>, ids: &mut dyn IdGenerator, item: T, kind: EntityKind)
where
    T::Id: fmt::Display,
{
    let id = item.key().clone();
    ids.observe(kind, &id.to_string());
    if !collection.push(item) {
        tracing::warn!(kind = %kind, id = %id, "duplicate id in seed data, skipping");
    }
}
