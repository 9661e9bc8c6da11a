use std::collections::HashMap;

use treasure_game::{
    BrawlOutcome, Hunter, Item, LeaveOutcome, SeededSource, Shop, TerrainKind, Town, Traveler,
};

const TOWN_SAMPLE: u32 = 2000;
const TERRAIN_SAMPLE: u32 = 6000;
const BRAWL_SAMPLE: u32 = 4000;

fn rate(hits: u32, total: u32) -> f64 {
    f64::from(hits) / f64::from(total)
}

/// Four standard deviations of a binomial proportion.
fn tolerance(p: f64, n: u32) -> f64 {
    4.0 * (p * (1.0 - p) / f64::from(n)).sqrt()
}

#[test]
fn toughness_fraction_tracks_probability() {
    for (p, seed) in [(0.0, 11_u64), (0.5, 12), (1.0, 13)] {
        let mut rng = SeededSource::from_seed(seed);
        let tough = (0..TOWN_SAMPLE)
            .filter(|_| Town::new(p, "Ada", Shop::default(), &mut rng).is_tough())
            .count();
        let observed = rate(u32::try_from(tough).expect("count fits"), TOWN_SAMPLE);
        assert!(
            (observed - p).abs() <= tolerance(p, TOWN_SAMPLE),
            "toughness {p} drifted: observed {observed:.4}"
        );
    }
}

#[test]
fn terrains_are_uniformly_distributed() {
    let mut rng = SeededSource::from_seed(0x7E44);
    let mut counts: HashMap<TerrainKind, u32> = HashMap::new();
    for _ in 0..TERRAIN_SAMPLE {
        let town = Town::new(0.4, "Ada", Shop::default(), &mut rng);
        *counts.entry(town.terrain().kind()).or_default() += 1;
    }
    assert_eq!(counts.len(), TerrainKind::ALL.len());

    let expected = f64::from(TERRAIN_SAMPLE) / 6.0;
    let chi_square: f64 = counts
        .values()
        .map(|&observed| (f64::from(observed) - expected).powi(2) / expected)
        .sum();
    // 5 degrees of freedom; 30 is far past the 0.001 critical value.
    assert!(chi_square < 30.0, "terrain chi-square too high: {chi_square:.2}");
}

#[test]
fn crossing_breaks_the_item_about_half_the_time() {
    let mut rng = SeededSource::from_seed(0xB0A7);
    let mut lost = 0_u32;
    for _ in 0..TOWN_SAMPLE {
        let mut hunter = Hunter::new("Ada", 10).with_kit(Item::ALL);
        let mut town = Town::new(0.4, "Ada", Shop::default(), &mut rng);
        let LeaveOutcome::Crossed { item, item_lost, .. } = town.attempt_leave(&mut hunter) else {
            panic!("a fully equipped hunter always crosses");
        };
        assert_eq!(hunter.has_item(item), !item_lost);
        if item_lost {
            lost += 1;
        }
    }
    let observed = rate(lost, TOWN_SAMPLE);
    assert!(
        (observed - 0.5).abs() <= tolerance(0.5, TOWN_SAMPLE),
        "item loss drifted: observed {observed:.4}"
    );
}

#[test]
fn brawl_frequency_depends_on_toughness() {
    for (toughness, expected) in [(0.0, 0.33), (1.0, 0.66)] {
        let mut rng = SeededSource::from_seed(0xF157);
        let mut town = Town::new(toughness, "Ada", Shop::default(), &mut rng);
        let mut hunter = Hunter::new("Ada", 1_000);
        let mut quiet = 0_u32;
        for _ in 0..BRAWL_SAMPLE {
            let before = hunter.gold();
            let outcome = town.look_for_trouble(&mut hunter);
            match outcome {
                BrawlOutcome::NoTrouble => quiet += 1,
                BrawlOutcome::Won { stake } | BrawlOutcome::Lost { stake } => {
                    assert!((1..=10).contains(&stake), "stake out of range: {stake}");
                }
            }
            assert_eq!(hunter.gold() - before, outcome.gold_delta());
        }
        let observed = rate(quiet, BRAWL_SAMPLE);
        assert!(
            (observed - expected).abs() <= tolerance(expected, BRAWL_SAMPLE),
            "no-trouble rate drifted for toughness {toughness}: observed {observed:.4}"
        );
    }
}
