use proptest::prelude::*;
use van_fleet::{BookingDraft, BookingId, Coordinates, FleetStore, SequentialIdGenerator, VanDraft};

#[derive(Debug, Clone)]
enum Step {
    Add { seat: u32 },
    /// Deletes the n-th live booking (modulo the count), or a never-issued id.
    Delete { pick: usize, bogus: bool },
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (1u32..=8).prop_map(|seat| Step::Add { seat }),
        (any::<usize>(), any::<bool>()).prop_map(|(pick, bogus)| Step::Delete { pick, bogus }),
    ]
}

proptest! {
    #[test]
    fn occupancy_tracks_added_minus_deleted(steps in prop::collection::vec(step(), 0..64)) {
        let mut store = FleetStore::new(SequentialIdGenerator::new());
        let van_id = store.add_van(VanDraft::new("V1", "VAN-0001", 8, Coordinates::new(0.0, 0.0)));

        let mut live: Vec<BookingId> = Vec::new();
        let mut added = 0u32;
        let mut deleted = 0u32;

        for step in steps {
            match step {
                Step::Add { seat } => {
                    live.push(store.add_booking(BookingDraft::new(van_id.clone(), seat, "P", "p")));
                    added += 1;
                }
                Step::Delete { bogus: true, .. } => {
                    let before = store.snapshot();
                    prop_assert!(!store.delete_booking(&BookingId::new("booking-bogus")));
                    prop_assert_eq!(store.snapshot(), before);
                }
                Step::Delete { pick, bogus: false } => {
                    if live.is_empty() {
                        continue;
                    }
                    let id = live.remove(pick % live.len());
                    prop_assert!(store.delete_booking(&id));
                    deleted += 1;
                }
            }

            let occupied = store.van(&van_id).unwrap().occupied_seats;
            prop_assert_eq!(occupied, added.saturating_sub(deleted));
            prop_assert_eq!(occupied as usize, store.bookings().len());
        }
    }

    #[test]
    fn occupancy_never_goes_negative(start in 0u32..3, deletes in 0usize..6) {
        let mut store = FleetStore::new(SequentialIdGenerator::new());
        let van_id = store.add_van(VanDraft::new("V1", "VAN-0001", 8, Coordinates::new(0.0, 0.0)));
        let ids: Vec<BookingId> = (0..deletes)
            .map(|seat| store.add_booking(BookingDraft::new(van_id.clone(), seat as u32 + 1, "P", "p")))
            .collect();
        store.update_van(&van_id, van_fleet::VanPatch { occupied_seats: Some(start), ..Default::default() });

        for id in &ids {
            store.delete_booking(id);
        }

        prop_assert_eq!(
            store.van(&van_id).unwrap().occupied_seats,
            start.saturating_sub(deletes as u32)
        );
    }
}
