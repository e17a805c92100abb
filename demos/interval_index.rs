//! Map-like tree keyed by interval start.
//!
//! Reservations are stored as `(start, (end, owner))` pairs. Several
//! reservations may begin at the same instant, so the index uses the
//! multi-key operations.

use ordered_rbtree::MapTree;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

type Reservations = MapTree<u32, (u32, &'static str)>;

/// Reservations that overlap `[from, to)`.
fn overlapping(index: &Reservations, from: u32, to: u32) -> Vec<(u32, u32, &'static str)> {
    index
        .range(..to)
        .filter(|(_, (end, _))| *end > from)
        .map(|&(start, (end, owner))| (start, end, owner))
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    println!("=== Interval Index Example ===\n");

    let mut index = Reservations::new();

    // Bookings arrive mostly in time order, so hint at the end
    println!("Loading bookings...");
    for (start, end, owner) in [
        (900, 1000, "alice"),
        (930, 1030, "bob"),
        (1000, 1100, "carol"),
        (1000, 1030, "dave"),
        (1300, 1400, "erin"),
    ] {
        let hint = index.end();
        index.insert_multi_hint(hint, (start, (end, owner)))?;
    }
    // A late arrival in the middle
    index.insert_multi((1100, (1200, "frank")))?;

    println!("  Bookings: {}", index.len());
    println!("  Starting at 1000: {}", index.count_multi(&1000));

    println!("\nOverlapping [1015, 1130):");
    for (start, end, owner) in overlapping(&index, 1015, 1130) {
        println!("  {owner}: {start}-{end}");
    }

    // Equal keys come back in the order they were inserted
    let (first, last) = index.equal_range_multi(&1000);
    let owners: Vec<_> = index
        .range_between(first, last)
        .map(|(_, (_, owner))| *owner)
        .collect();
    println!("\nStarting at 1000, in booking order: {owners:?}");

    // Cancel everything before 1000
    let cutoff = index.lower_bound(&1000);
    let begin = index.begin();
    index.erase_range(begin, cutoff)?;
    println!("\nAfter cancelling morning slots: {} bookings", index.len());
    println!("  Earliest: {:?}", index.first());

    // Cancel one of the two 1000 bookings by position
    let pos = index.find(&1000);
    let removed = index.remove_at(pos)?;
    println!("  Cancelled {:?}", removed);
    println!("  Next at 1000: {:?}", index.get(&1000));

    println!("\n=== Example Complete ===");
    Ok(())
}
