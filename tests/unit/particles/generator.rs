use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::foundation::core::FrameIndex;
use crate::scene::banner::bubble_types;
use crate::scene::model::SpriteId;

fn bubble(start: u64, length: u64) -> Bubble {
    Bubble {
        type_index: 0,
        x: 0.0,
        start_y: 810.0,
        end_y: 170.0,
        start,
        end: start + length,
        length,
        rotation: 0.0,
        scale: 1.0,
        seam_copy: false,
    }
}

fn generate(seed: u64) -> Vec<Bubble> {
    let types = bubble_types();
    let mut rng = StdRng::seed_from_u64(seed);
    BubbleGenerator::new(&types, GeneratorOpts::default())
        .unwrap()
        .generate(&mut rng)
}

#[test]
fn every_original_bubble_finishes_inside_the_loop() {
    for seed in 0..8 {
        let window = GeneratorOpts::default().window;
        for b in generate(seed).iter().filter(|b| !b.seam_copy) {
            assert!(b.end <= window.end.0, "{b:?}");
            assert_eq!(b.end, b.start + b.length);
            assert!((50..230).contains(&b.length));
            assert!(b.start >= 250);
        }
    }
}

#[test]
fn spawn_values_stay_in_their_ranges() {
    let types = bubble_types();
    for b in generate(3) {
        assert!((-469.0..469.0).contains(&b.x));
        assert!((0.0..std::f64::consts::TAU).contains(&b.rotation));
        assert_eq!(b.start_y, 810.0);
        assert_eq!(b.end_y, 170.0);
        assert!(b.type_index < types.len());
    }
}

#[test]
fn burst_cluster_survives_the_filter() {
    let on_burst = generate(11)
        .iter()
        .filter(|b| b.start == 250 && !b.seam_copy)
        .count();
    assert!(on_burst >= 100);
}

#[test]
fn seam_copies_match_straddling_originals() {
    let window = GeneratorOpts::default().window;
    let shift = window.len_frames();
    let bubbles = generate(5);
    let straddling: Vec<_> = bubbles
        .iter()
        .filter(|b| !b.seam_copy && window.straddles_start(b.start, b.end))
        .collect();
    let copies: Vec<_> = bubbles.iter().filter(|b| b.seam_copy).collect();
    assert_eq!(straddling.len(), copies.len());
    for (orig, copy) in straddling.iter().zip(copies.iter()) {
        assert_eq!(copy.start, orig.start + shift);
        assert_eq!(copy.end, orig.end + shift);
        assert_eq!(copy.x, orig.x);
        assert_eq!(copy.rotation, orig.rotation);
        assert_eq!(copy.type_index, orig.type_index);
    }
}

#[test]
fn seam_copy_continues_the_original_pose() {
    let window = GeneratorOpts::default().window;
    let mut bubbles = vec![bubble(330, 100)];
    assert_eq!(wrap_loop_seam(&mut bubbles, window), 1);
    let (orig, copy) = (bubbles[0], bubbles[1]);
    // The tick after 1259 lands on 360, so the copy at 1259 must match the original at 359.
    let before_wrap = copy.pose_at(FrameIndex(1259)).unwrap();
    let expected = orig.pose_at(FrameIndex(359)).unwrap();
    assert_eq!(before_wrap, expected);
    assert!(orig.active_at(FrameIndex(360)));
}

#[test]
fn filter_and_seam_boundaries_are_exact() {
    let window = GeneratorOpts::default().window;
    let mut bubbles = vec![bubble(1210, 50), bubble(1211, 50), bubble(310, 50)];
    assert_eq!(retain_within_loop(&mut bubbles, window), 1);
    assert_eq!(bubbles.len(), 2);
    // 310 + 50 == 360 ends exactly at the loop start and is not copied.
    assert_eq!(wrap_loop_seam(&mut bubbles, window), 0);
}

#[test]
fn weighted_pick_uses_cumulative_sums() {
    let mut types = bubble_types();
    types.truncate(3);
    types[0].chance = 1.0;
    types[1].chance = 2.0;
    types[2].chance = 1.0;
    assert_eq!(pick_weighted(&types, 0.0), 0);
    assert_eq!(pick_weighted(&types, 0.24), 0);
    assert_eq!(pick_weighted(&types, 0.25), 1);
    assert_eq!(pick_weighted(&types, 0.74), 1);
    assert_eq!(pick_weighted(&types, 0.75), 2);
    assert_eq!(pick_weighted(&types, 1.0), 2);
}

#[test]
fn zero_chance_types_are_never_picked_except_as_fallback() {
    let mut types = bubble_types();
    types.truncate(2);
    types[0].chance = 0.0;
    types[1].chance = 1.0;
    for u in [0.0, 0.3, 0.999] {
        assert_eq!(pick_weighted(&types, u), 1);
    }
}

#[test]
fn weighted_frequencies_follow_chances() {
    let mut types = bubble_types();
    types.truncate(2);
    types[0].chance = 3.0;
    types[1].chance = 1.0;
    let mut rng = StdRng::seed_from_u64(42);
    let n = 20_000;
    let firsts = (0..n).filter(|_| choose_type(&types, &mut rng) == 0).count();
    let ratio = firsts as f64 / n as f64;
    assert!((ratio - 0.75).abs() < 0.02, "ratio={ratio}");
}

#[test]
fn default_table_picks_every_sprite() {
    let types = bubble_types();
    let mut seen = [false; 9];
    for b in generate(1) {
        seen[b.type_index] = true;
    }
    assert!(seen.iter().all(|s| *s));
    assert_eq!(types[7].sprite, SpriteId::CBubble1);
}

#[test]
fn invalid_options_are_rejected() {
    let types = bubble_types();
    let opts = GeneratorOpts {
        burst_frame: 1260,
        ..GeneratorOpts::default()
    };
    assert!(BubbleGenerator::new(&types, opts).is_err());

    let opts = GeneratorOpts {
        burst_frame: 10,
        window: LoopWindow {
            start: FrameIndex(1260),
            end: FrameIndex(360),
        },
        ..GeneratorOpts::default()
    };
    assert!(BubbleGenerator::new(&types, opts).is_err());

    let opts = GeneratorOpts {
        lifetime: 10.0..10.0,
        ..GeneratorOpts::default()
    };
    assert!(BubbleGenerator::new(&types, opts).is_err());

    assert!(BubbleGenerator::new(&[], GeneratorOpts::default()).is_err());

    let mut zeroed = bubble_types();
    for t in &mut zeroed {
        t.chance = 0.0;
    }
    assert!(BubbleGenerator::new(&zeroed, GeneratorOpts::default()).is_err());
}
