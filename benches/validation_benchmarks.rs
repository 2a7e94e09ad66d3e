use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use family_domain::{
    persistence::normalize_basic, FamilyAttributes, FamilyFilter, FamilyRecord, FamilyRepository,
    InMemoryFamilyRepository, Validate,
};
use tokio::runtime::Runtime;

fn setup_runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn person(name: String, year: i32) -> FamilyRecord {
    FamilyRecord::new(FamilyAttributes {
        name,
        birth_date: Some(Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap()),
        document: format!("{year}-doc"),
        father_id: None,
        mother_id: None,
    })
}

fn benchmark_validate_all(c: &mut Criterion) {
    let father = person("Father Doe".to_string(), 1960);
    let mother = person("Mother Doe".to_string(), 1962);
    let mut child = FamilyRecord::new(FamilyAttributes {
        name: "Child Doe".to_string(),
        birth_date: Some(Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap()),
        document: "123".to_string(),
        father_id: Some(father.id()),
        mother_id: Some(mother.id()),
    });
    child.set_father(father).set_mother(mother);
    let invalid = FamilyRecord::new(FamilyAttributes {
        name: "A".to_string(),
        birth_date: None,
        document: String::new(),
        father_id: None,
        mother_id: None,
    });

    c.bench_function("validate_all_with_parents", |b| {
        b.iter(|| black_box(&child).validate_all())
    });
    c.bench_function("validate_all_invalid", |b| {
        b.iter(|| black_box(&invalid).validate_all())
    });
}

fn benchmark_paginated_search(c: &mut Criterion) {
    let rt = setup_runtime();
    let mut group = c.benchmark_group("find_paginated_search");

    for size in [100usize, 1_000, 10_000] {
        let repository = InMemoryFamilyRepository::builder()
            .seed((0..size).map(|i| person(format!("Person Number {i}"), 1950 + (i % 50) as i32)))
            .build()
            .unwrap();
        let filter = FamilyFilter::new().search("number 9").limit(20);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                rt.block_on(async {
                    black_box(repository.find_paginated(&filter).await.unwrap());
                })
            })
        });
    }

    group.finish();
}

fn benchmark_normalize_basic(c: &mut Criterion) {
    c.bench_function("normalize_basic", |b| {
        b.iter(|| normalize_basic(black_box("  Maria   DA   Silva  Souza ")))
    });
}

criterion_group!(
    benches,
    benchmark_validate_all,
    benchmark_paginated_search,
    benchmark_normalize_basic
);

criterion_main!(benches);
