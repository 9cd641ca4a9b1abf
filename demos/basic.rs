//! Basic arena usage: allocate, write, release, inspect the chunk list.
//!
//! Run with:
//!     cargo run --example basic

use arenars::{Arena, ArenaConfig, ArenaError};

fn print_chunks(arena: &Arena<'_>) {
    for chunk in arena.chunks() {
        println!("  {}", chunk);
    }
    println!(
        "  free={} used={} pool={} ({} slots)\n",
        arena.free_size(),
        arena.used_size(),
        arena.pool_bytes(),
        arena.descriptor_slots()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // One buffer, owned by us for the arena's whole lifetime
    let mut buf = [0u8; 2048];
    let mut arena = Arena::new(&mut buf)?;

    println!("Fresh arena over {} bytes:", arena.capacity());
    print_chunks(&arena);

    let greeting = arena.alloc(32)?;
    let scratch = arena.alloc(500)?;
    let tail = arena.alloc(64)?;

    arena.get_mut(&greeting).unwrap()[..13].copy_from_slice(b"hello, arena!");
    arena.get_mut(&scratch).unwrap().fill(0xEE);

    println!("After three allocations:");
    print_chunks(&arena);

    // Freeing the middle chunk leaves a hole; freeing its neighbours merges it back
    arena.release(scratch.offset())?;
    println!("After releasing {}:", scratch);
    print_chunks(&arena);

    // Double release is reported, not ignored
    match arena.release(scratch.offset()) {
        Err(ArenaError::AlreadyFree { offset }) => println!("double release at {} rejected\n", offset),
        other => println!("unexpected: {:?}\n", other),
    }

    println!(
        "greeting still reads: {}",
        String::from_utf8_lossy(&arena.get(&greeting).unwrap()[..13])
    );

    arena.release(greeting.offset())?;
    arena.release(tail.offset())?;
    println!("\nAll released:");
    print_chunks(&arena);

    // The classic fixed descriptor table, sized up front
    let mut fixed_buf = vec![0u8; 2048];
    let mut fixed = Arena::with_config(&mut fixed_buf, ArenaConfig::fixed_for(2048))?;
    let mut count = 0;
    while fixed.alloc(16).is_ok() {
        count += 1;
    }
    println!("Fixed-table arena held {} minimum-size allocations", count);

    Ok(())
}
