//! Benchmarks for dashboard aggregation and list filtering
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use refugee_connect::model::{Refugee, MEDICAL_NONE, STATUS_PENDING};
use refugee_connect::report::build_prompt;
use refugee_connect::stats::DashboardStats;
use refugee_connect::views::{ListFilter, ListView};

const SHELTERS: [&str; 4] = ["วัดป่า", "โรงเรียนบ้านใหม่", "ศาลาประชาคม", ""];
const GENDERS: [&str; 3] = ["ชาย", "หญิง", "อื่นๆ"];

fn create_test_records(count: usize) -> Vec<Refugee> {
    (0..count)
        .map(|i| Refugee {
            id: Some(i.to_string()),
            first_name: format!("First{}", i),
            last_name: format!("Last{}", i),
            age: (i % 90) as u32,
            gender: GENDERS[i % GENDERS.len()].to_string(),
            phone_number: String::new(),
            shelter_name: SHELTERS[i % SHELTERS.len()].to_string(),
            family_size: (i % 6 + 1) as u32,
            medical_needs: if i % 7 == 0 {
                "ยาความดัน".to_string()
            } else {
                MEDICAL_NONE.to_string()
            },
            registration_date: "2025-01-05".to_string(),
            status: STATUS_PENDING.to_string(),
        })
        .collect()
}

fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");

    for size in [100, 1000, 10000] {
        let records = create_test_records(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("compute_{}", size), |b| {
            b.iter(|| DashboardStats::compute(black_box(&records)))
        });
    }

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let records = create_test_records(10000);
    group.throughput(Throughput::Elements(records.len() as u64));

    group.bench_function("search_all_shelters", |b| {
        let filter = ListFilter::default().search("last99");
        b.iter(|| ListView::build(black_box(&records), filter.clone()))
    });

    group.bench_function("single_shelter", |b| {
        let filter = ListFilter::default().shelter("วัดป่า");
        b.iter(|| ListView::build(black_box(&records), filter.clone()))
    });

    group.finish();
}

fn bench_prompt(c: &mut Criterion) {
    let records = create_test_records(10000);

    c.bench_function("build_prompt_10000", |b| {
        b.iter(|| build_prompt(black_box(&records), 50))
    });
}

criterion_group!(benches, bench_aggregation, bench_filter, bench_prompt);
criterion_main!(benches);
