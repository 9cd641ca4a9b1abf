#![no_main]

use libfuzzer_sys::fuzz_target;
use arenars::{Allocation, Arena, ArenaConfig, ArenaError, PoolMode};

fuzz_target!(|data: Vec<u8>| {
    if data.len() < 2 {
        return;
    }

    // First two bytes pick the buffer size and pool mode
    let len = 48 + data[0] as usize * 16;
    let config = match data[1] % 3 {
        0 => ArenaConfig::default(),
        1 => ArenaConfig::fixed_for(len),
        _ => ArenaConfig::default().with_pool_mode(PoolMode::Fixed(1 + data[1] as usize % 8)),
    };

    let mut buf = vec![0u8; len];
    let Ok(mut arena) = Arena::with_config(&mut buf, config) else {
        return;
    };
    let mut live: Vec<(Allocation, u8)> = Vec::new();

    // Remaining bytes are (op, arg) pairs
    for (step, pair) in data[2..].chunks_exact(2).enumerate() {
        let (op, arg) = (pair[0], pair[1]);
        if op & 1 == 0 {
            let size = arg as usize * (1 + (op as usize >> 5));
            match arena.alloc(size) {
                Ok(a) => {
                    let tag = step as u8;
                    arena.get_mut(&a).unwrap().fill(tag);
                    live.push((a, tag));
                }
                Err(ArenaError::OutOfSpace { .. }) => {}
                Err(e) => panic!("unexpected alloc error: {}", e),
            }
        } else if !live.is_empty() {
            let (a, _) = live.swap_remove(arg as usize % live.len());
            arena.release(a.offset()).unwrap();
            // Double release never succeeds and never corrupts
            assert!(arena.release(a.offset()).is_err());
        } else {
            // Release with nothing live is always rejected
            assert!(arena.release(arg as usize).is_err());
        }

        // Verify: chunks tile the payload region
        let mut expected = arena.pool_bytes();
        let mut free = 0;
        let mut prev_free = false;
        for chunk in arena.chunks() {
            assert_eq!(chunk.offset, expected);
            assert!(chunk.size > 0);
            expected = chunk.end();
            if !chunk.used {
                // Verify: no two adjacent free chunks
                assert!(!prev_free);
                free += chunk.size;
            }
            prev_free = !chunk.used;
        }
        assert_eq!(expected, arena.capacity());

        // Verify: free space accounting matches the list
        assert_eq!(free, arena.free_size());
    }

    // Verify: payloads survive every split, merge and pool resize
    for (a, tag) in &live {
        assert!(arena.get(a).unwrap().iter().all(|b| b == tag));
    }
});
