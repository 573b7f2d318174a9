use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use dungeondex::core::database::Database;
use dungeondex::core::types::{Monster, Review, ReviewId, UserId};
use dungeondex::query::planner::QueryNormalizer;
use dungeondex::query::types::MonsterQuery;
use dungeondex::search::executor::MonsterSearch;
use chrono::Utc;
use rand::Rng;

const TYPES: [&str; 6] = ["humanoid", "beast", "undead", "dragon", "fiend", "giant"];
const WORDS: [&str; 8] = ["goblin", "young", "ancient", "shadow", "fire", "bone", "dire", "wolf"];

/// Helper to create a monster with a random name and a handful of reviews
fn create_test_monster(id: usize) -> Monster {
    let mut rng = rand::thread_rng();
    let name = (0..3)
        .map(|_| WORDS[rng.gen_range(0..WORDS.len())])
        .collect::<Vec<_>>()
        .join(" ");

    let mut monster = Monster::new(
        &format!("{} {}", name, id),
        TYPES[id % TYPES.len()],
        rng.gen_range(1..500),
    );
    for _ in 0..rng.gen_range(0..5) {
        monster = monster.with_review(Review {
            id: ReviewId::new(),
            user: UserId::new(),
            difficulty: rng.gen_range(0.0..100.0),
            description: String::new(),
            created_at: Utc::now(),
        });
    }
    monster
}

fn populated(size: usize) -> Database {
    let db = Database::in_memory();
    for id in 0..size {
        db.add_monster(create_test_monster(id)).unwrap();
    }
    db
}

/// Benchmark each resolver branch over a fixed collection
fn bench_query_branches(c: &mut Criterion) {
    let db = populated(2_000);
    let normalizer = QueryNormalizer::default();
    let cases = [
        ("plain", MonsterQuery::new().types(["humanoid", "beast"])),
        ("two_phase_search", MonsterQuery::new().search("gob").page(16, 8)),
        ("difficulty_desc", MonsterQuery::new().sort("difficulty-desc")),
        ("reviews_desc", MonsterQuery::new().search("wolf").sort("reviews-desc")),
        ("suggestions", MonsterQuery::new().search("shad").suggestions()),
    ];

    let mut group = c.benchmark_group("monster_query");
    for (label, query) in cases.iter() {
        let plan = normalizer.plan(query);
        group.bench_with_input(BenchmarkId::from_parameter(label), &plan, |b, plan| {
            b.iter(|| {
                MonsterSearch::new(db.monsters())
                    .execute(black_box(plan))
                    .unwrap()
            });
        });
    }
    group.finish();
}

/// Benchmark two-phase search as the collection grows
fn bench_search_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_scaling");

    for size in [100, 1_000, 10_000].iter() {
        let db = populated(*size);
        let plan = QueryNormalizer::default().plan(&MonsterQuery::new().search("fire"));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| MonsterSearch::new(db.monsters()).execute(black_box(&plan)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_query_branches, bench_search_scaling);
criterion_main!(benches);
