//! B-Tree walkthrough: builds a small order-2 tree and searches it.

use strata_btree::BTreeIndex;
use strata_common::Result;

fn main() -> Result<()> {
    env_logger::init();

    // Order 2: nodes hold 1..=3 keys, so splits happen early and often.
    let mut tree = BTreeIndex::new(2)?;
    let keys = [10, 20, 5, 30, 15, 25, 35, 2, 7, 12, 18, 22, 28, 32, 38, 1, 3];

    println!("inserting {} keys into an order-2 B-Tree", keys.len());
    for key in keys {
        tree.insert(key);
    }

    println!(
        "\ntree structure ({} nodes, depth {}):\n",
        tree.node_count(),
        tree.depth()
    );
    print!("{}", tree.render());

    println!("searches:");
    for probe in [15, 25, 10, 1, 38, 99, 0, 21] {
        match tree.search(probe) {
            Some((node, idx)) => println!(
                "  {probe:3} found in {node} at position {idx}, keys {:?}",
                tree.node(node).keys()
            ),
            None => println!("  {probe:3} not found"),
        }
    }

    Ok(())
}
