//! Basic usage example for the red-black tree.

use ordered_rbtree::{RbTree, Reverse, Natural, Identity};
use simplelog::{Config, LevelFilter, TermLogger, TerminalMode, ColorChoice};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Rebalancing steps are logged at trace level, structural events at debug
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    println!("=== Ordered Red-Black Tree Example ===\n");

    let mut tree = RbTree::<u64>::new();

    // Unique insertion rejects duplicates
    println!("Inserting keys: 42, 17, 99, 5, 17");
    for key in [42, 17, 99, 5, 17] {
        let (_, inserted) = tree.insert_unique(key)?;
        println!("  insert_unique({key}) -> inserted: {inserted}");
    }

    println!("\nTree stats:");
    println!("  Length: {}", tree.len());
    println!("  First: {:?}", tree.first());
    println!("  Last: {:?}", tree.last());
    println!("  Black height: {}", tree.validate()?);

    println!("\nLookups:");
    println!("  contains(42): {}", tree.contains(&42));
    println!("  contains(100): {}", tree.contains(&100));
    println!("  lower_bound(18): {:?}", tree.value_at(tree.lower_bound(&18)));
    println!("  upper_bound(42): {:?}", tree.value_at(tree.upper_bound(&42)));

    println!("\nIn-order: {:?}", tree.iter().collect::<Vec<_>>());
    println!("Reversed: {:?}", tree.iter().rev().collect::<Vec<_>>());

    // Multi insertion keeps equal keys in arrival order
    println!("\n=== Multiset Example ===\n");
    let mut multi = RbTree::<u64>::new();
    multi.extend_multi([3, 1, 3, 2, 3])?;
    println!("  Contents: {:?}", multi.iter().collect::<Vec<_>>());
    println!("  count_multi(3): {}", multi.count_multi(&3));
    println!("  erase_multi(3) removed {}", multi.erase_multi(&3));
    println!("  After erase: {:?}", multi.iter().collect::<Vec<_>>());

    // Walking with a cursor wraps through the end position
    println!("\n=== Cursor Example ===\n");
    let mut cursor = tree.cursor_front();
    for _ in 0..=tree.len() {
        match cursor.get() {
            Some(value) => println!("  at {value}"),
            None => println!("  at end"),
        }
        cursor.advance();
    }

    // Erasing through a position returns the following position
    let pos = tree.find(&17);
    let next = tree.erase(pos)?;
    println!("\nErased 17, next value is {:?}", tree.value_at(next));

    // Custom ordering
    println!("\n=== Descending Order ===\n");
    let mut desc: RbTree<u64, Identity, Reverse<Natural>> =
        RbTree::with_comparator(Reverse(Natural));
    desc.extend_unique(1..=10)?;
    println!("  range(8..=3): {:?}", desc.range(8..=3).collect::<Vec<_>>());

    println!("\n=== Example Complete ===");
    Ok(())
}
