use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::student::StudentService;
use service::student::domain::{SearchFilter, StudentInput};
use service::student::repository::mock::InMemoryStudentRepository;

fn bench_duplicate_check(c: &mut Criterion) {
    let repo = Arc::new(InMemoryStudentRepository::default());
    let svc = StudentService::new(repo);
    let dob = chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();

    // pre-populate outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    let batch: Vec<StudentInput> = (0..1_000)
        .map(|i| StudentInput::new(&format!("First{i}"), &format!("Last{i}"), dob, Some("CS")))
        .collect();
    rt.block_on(svc.create_many(batch)).unwrap();

    c.bench_function("student_exists_by_full_name", |b| {
        b.iter(|| rt.block_on(svc.exists_by_full_name("first999", "LAST999")).unwrap());
    });

    c.bench_function("student_search_by_last_name", |b| {
        b.iter(|| {
            let filter = SearchFilter { last_name: Some("Last500".into()), ..Default::default() };
            rt.block_on(svc.search(filter)).unwrap()
        });
    });
}

criterion_group!(benches, bench_duplicate_check);
criterion_main!(benches);
