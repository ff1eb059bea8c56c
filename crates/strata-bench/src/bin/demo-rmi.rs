//! Learned-index walkthrough: trains an RMI over a generated dataset and
//! probes it with hits, misses, and out-of-range keys.

use rand::rngs::StdRng;
use rand::SeedableRng;

use strata_bench::dataset::generate_sorted_keys;
use strata_bench::timing::time;
use strata_common::Result;
use strata_rmi::LearnedIndex;

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(7);
    let data = generate_sorted_keys(&mut rng, 1_000, 0, 10_000);
    println!(
        "dataset: {} sorted unique keys, first {:?} ... last {:?}",
        data.len(),
        &data[..5],
        &data[data.len() - 5..]
    );

    let (index, build_time) = time(|| LearnedIndex::build(data.clone(), 10, 10));
    let index = index?;

    let stats = index.stats();
    println!("\ntrained in {build_time:?}:");
    println!(
        "  level 0: position = {:.6} * key + {:.6}",
        stats.level0_slope, stats.level0_intercept
    );
    println!(
        "  level 1: {}/{} segments trained, window +/-{}",
        stats.trained_segments, stats.segment_count, stats.search_window
    );

    let probes = [
        data[data.len() / 4],
        data[data.len() / 2],
        data[data.len() * 3 / 4],
        data[0],
        data[data.len() - 1],
        data[0] - 1,            // below the minimum
        data[data.len() - 1] + 1, // above the maximum
        99_999_999,             // far outside the range
    ];

    println!("\nsearches:");
    for probe in probes {
        match index.search(probe) {
            Some(pos) => println!("  {probe:10} found at index {pos}"),
            None => println!("  {probe:10} not found"),
        }
    }

    Ok(())
}
