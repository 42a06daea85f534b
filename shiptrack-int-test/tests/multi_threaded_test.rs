use shiptrack::shipment::{DeliveryStatus, Shipment};
use shiptrack::store::ShipmentStore;
use std::sync::{Arc, Barrier};
use std::thread;

#[ctor::ctor]
fn init() {
    colog::init();
}

#[test]
fn test_multi_threaded_insert() {
    let store = ShipmentStore::new();

    let num_threads = 5u64;
    let inserts_per_thread = 20u64;
    let barrier = Arc::new(Barrier::new(num_threads as usize));

    let mut handles = vec![];
    for thread_id in 0..num_threads {
        let store_clone = store.clone();
        let barrier_clone = Arc::clone(&barrier);

        let handle = thread::spawn(move || {
            // Wait for all threads to be ready
            barrier_clone.wait();

            for i in 0..inserts_per_thread {
                let id = thread_id * inserts_per_thread + i + 1;
                let shipment = Shipment::builder()
                    .id(id)
                    .sender(&format!("thread-{}", thread_id))
                    .recipient("shared")
                    .priority(id % 4 == 0)
                    .product_name("Parcel")
                    .build()
                    .unwrap();
                store_clone.add(shipment).unwrap();
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let total = num_threads * inserts_per_thread;
    assert_eq!(store.len() as u64, total);

    // No partial registrations: every index agrees on membership.
    assert_eq!(store.get_by_recipient("shared").len() as u64, total);
    let in_tree: Vec<u64> = store.tree_layout().keys().copied().collect();
    let expected: Vec<u64> = (1..=total).collect();
    assert_eq!(in_tree, expected);
    assert_eq!(store.priority_queue().len() as u64, total / 4);
}

#[test]
fn test_multi_threaded_status_updates() {
    let store = ShipmentStore::new();
    for id in 1..=40u64 {
        let shipment = Shipment::builder()
            .id(id)
            .sender("S")
            .recipient("R")
            .priority(id % 2 == 0)
            .product_name("Parcel")
            .build()
            .unwrap();
        store.add(shipment).unwrap();
    }

    let mut handles = vec![];
    for thread_id in 0..4u64 {
        let store_clone = store.clone();
        handles.push(thread::spawn(move || {
            for offset in 0..10u64 {
                let id = thread_id * 10 + offset + 1;
                store_clone
                    .update_status(id, DeliveryStatus::Delivered)
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(store
        .get_all()
        .iter()
        .all(|shipment| shipment.status().is_delivered()));
    // The urgency queue survived every reheapify intact.
    assert_eq!(store.priority_queue().len(), 20);
    assert_eq!(store.peek_urgent().unwrap().id(), 2);
}
