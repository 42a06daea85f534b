use rand::seq::SliceRandom;
use shiptrack::errors::ShiptrackResult;
use shiptrack::shipment::{DeliveryStatus, Shipment};
use shiptrack::store::ShipmentStore;

fn main() -> ShiptrackResult<()> {
    println!("Starting stress test...");
    let store = ShipmentStore::new();

    let count: u64 = 100_000;
    let senders = ["Ashok", "Dharma", "Raghaven", "Muthu", "Aswini"];

    // Shuffled insertion keeps the tree at a sane depth for this volume.
    let mut ids: Vec<u64> = (1..=count).collect();
    ids.shuffle(&mut rand::thread_rng());

    let start = std::time::Instant::now();
    for id in ids {
        let shipment = Shipment::builder()
            .id(id)
            .sender(senders[(id % senders.len() as u64) as usize])
            .recipient(senders[((id + 2) % senders.len() as u64) as usize])
            .priority(id % 10 == 0)
            .product_name("Parcel")
            .distance_km((id % 40) as f64)
            .build()?;
        store.add(shipment)?;
    }
    println!("Registered {} shipments in {:?}", count, start.elapsed());

    let start = std::time::Instant::now();
    let from_ashok = store.get_by_sender("Ashok");
    println!(
        "Sender query returned {} shipments in {:?}",
        from_ashok.len(),
        start.elapsed()
    );

    let start = std::time::Instant::now();
    for id in (1..=count).step_by(7) {
        store.update_status(id, DeliveryStatus::Delivered)?;
    }
    println!("Updated statuses in {:?}", start.elapsed());

    let start = std::time::Instant::now();
    let balanced = store.is_tree_balanced();
    println!("Balance check ({}) in {:?}", balanced, start.elapsed());

    if !balanced {
        let start = std::time::Instant::now();
        store.rebalance_tree();
        println!(
            "Rebalanced to height {} in {:?}",
            store.tree_height(),
            start.elapsed()
        );
    }

    let start = std::time::Instant::now();
    let graph = store.tree_graph();
    println!(
        "Laid out {} nodes / {} edges in {:?}",
        graph.nodes.len(),
        graph.edges.len(),
        start.elapsed()
    );

    Ok(())
}
