//! End-to-end benchmarks for the loot filter engine.
//!
//! These benchmarks measure the pipeline from raw screen-reader fragments
//! through boundary detection, tooltip parsing and rule evaluation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use loot_filter_engine::dictionary::UniqueEntry;
use loot_filter_engine::{
    should_keep, Dictionaries, GlobalConfig, ItemDetector, LootFilter, ProfileSet,
};
use std::sync::Arc;

const PROFILE: &str = r#"
Affixes:
  - Helm:
      itemType: helm
      minPower: 700
      affixPool:
        - count: [cooldown_reduction, [maximum_life, 100], strength]
          minCount: 2
  - Weapon:
      itemType: [quarterstaff, sword, axe]
      minGreaterAffixCount: 1
      affixPool:
        - count: [dexterity, {name: maximum_life, greater: true}, overpower_damage]
          minCount: 2
Uniques:
  - aspect: harlequin_crest
"#;

const TOOLTIPS: [&[&str]; 3] = [
    &[
        "DREAD VISAGE",
        "Rare Helm",
        "750 Item Power",
        "350 Armor",
        "+8.0% Cooldown Reduction [6.0 - 9.0]%",
        "+120 Maximum Life [100 - 140]",
        "+30 Strength [25 - 35]",
        "Empty Socket",
        "Right mouse button",
    ],
    &[
        "ASCENDANT QUARTERSTAFF OF UNYIELDING HITS",
        "Ancestral Legendary Quarterstaff",
        "800 Item Power",
        "596 Damage Per Second",
        "[434 - 650] Damage per Hit",
        "1.10 Attacks per Second (Fast)",
        "45% Block Chance [45]%",
        "+231 Dexterity +[214 - 242]",
        "+1,370 Maximum Life",
        "+292 Life On Hit [292 - 318]",
        "+114.0% Overpower Damage [110.0 - 130.0]%",
        "Casting a Gorilla Skill increases your Weapon Damage by 52% [20 - 60]% of your Armor for 3 seconds.",
        "Right mouse button",
    ],
    &[
        "HARLEQUIN CREST",
        "Unique Helm",
        "800 Item Power",
        "1,000 Armor",
        "+800 Maximum Life [700 - 900]",
        "+120 Armor [100 - 150]",
        "+800 Maximum Life [700 - 900]",
        "+120 Armor [100 - 150]",
        "Gain 20% [10 - 20]% damage reduction.",
        "Right mouse button",
    ],
];

fn setup_filter() -> LootFilter {
    let dictionaries = Arc::new(
        Dictionaries::new()
            .with_affixes([
                ("armor", "Armor"),
                ("block_chance", "Block Chance"),
                ("cooldown_reduction", "Cooldown Reduction"),
                ("dexterity", "Dexterity"),
                ("life_on_hit", "Life On Hit"),
                ("maximum_life", "Maximum Life"),
                ("overpower_damage", "Overpower Damage"),
                ("strength", "Strength"),
            ])
            .with_legendary_aspects([("of_unyielding_hits", "of Unyielding Hits")])
            .with_uniques([("harlequin_crest", UniqueEntry::default())]),
    );
    let (profiles, errors) = ProfileSet::from_documents([("bench", PROFILE)], &dictionaries);
    assert!(errors.is_empty(), "{errors:?}");
    LootFilter::with_profiles(dictionaries, profiles, GlobalConfig::default())
}

fn blocks() -> Vec<Vec<String>> {
    TOOLTIPS
        .iter()
        .map(|lines| lines.iter().map(|l| l.to_string()).collect())
        .collect()
}

fn bench_process_single_block(c: &mut Criterion) {
    let filter = setup_filter();
    let blocks = blocks();

    c.bench_function("process_single_block", |b| {
        b.iter(|| filter.process_block(black_box(&blocks[1])))
    });
}

fn bench_batch_evaluation(c: &mut Criterion) {
    let filter = setup_filter();
    let blocks = blocks();

    for batch_size in [1, 10, 100, 1000].iter() {
        let batch: Vec<Vec<String>> = (0..*batch_size)
            .map(|i| blocks[i % blocks.len()].clone())
            .collect();
        c.bench_with_input(
            BenchmarkId::new("evaluate_batch", batch_size),
            &batch,
            |b, batch| b.iter(|| filter.evaluate_batch(black_box(batch))),
        );
    }
}

fn bench_evaluation_only(c: &mut Criterion) {
    let filter = setup_filter();
    let items: Vec<_> = blocks()
        .iter()
        .filter_map(|block| filter.parse(block).ok())
        .collect();
    let profiles = filter.profiles().snapshot();

    c.bench_function("evaluation_only", |b| {
        b.iter(|| {
            for item in &items {
                black_box(should_keep(item, &profiles, filter.config()));
            }
        })
    });
}

fn bench_boundary_detection(c: &mut Criterion) {
    let fragments: Vec<&str> = TOOLTIPS.iter().flat_map(|lines| lines.iter().copied()).collect();

    c.bench_function("boundary_detection", |b| {
        b.iter(|| {
            let mut detector = ItemDetector::new();
            let mut blocks = 0;
            for fragment in &fragments {
                if detector.ingest(black_box(fragment)).is_some() {
                    blocks += 1;
                }
            }
            blocks
        })
    });
}

criterion_group!(
    benches,
    bench_process_single_block,
    bench_batch_evaluation,
    bench_evaluation_only,
    bench_boundary_detection
);
criterion_main!(benches);
