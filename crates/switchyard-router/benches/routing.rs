//! Resolution benchmarks, one per index stage.
//!
//! Run with: `cargo bench -p switchyard-router`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use switchyard_router::{HttpMethod, Matcher, RouteDeclaration, RouteTable};

fn pattern(p: &str) -> Matcher {
    Matcher::pattern(p).unwrap()
}

fn build_table(num_routes: usize) -> RouteTable<String> {
    let per_stage = num_routes / 4;
    let mut declarations = Vec::with_capacity(num_routes);

    for i in 0..per_stage {
        declarations.push(
            RouteDeclaration::new(
                HttpMethod::Get,
                format!("/api/v1/resource{i}"),
                format!("exact{i}"),
            )
            .content_type("application/json"),
        );
    }

    for i in 0..per_stage {
        declarations.push(
            RouteDeclaration::new(
                HttpMethod::Post,
                format!("/api/v1/upload{i}"),
                format!("upload{i}"),
            )
            .content_type(pattern("^image/")),
        );
    }

    for i in 0..per_stage {
        declarations.push(RouteDeclaration::new(
            HttpMethod::Get,
            pattern(&format!(r"^/api/v1/resource{i}/\d+$")),
            format!("byId{i}"),
        ));
    }

    for i in 0..per_stage {
        declarations.push(
            RouteDeclaration::new(
                HttpMethod::Put,
                pattern(&format!(r"^/api/v1/org/[^/]+/resource{i}$")),
                format!("orgResource{i}"),
            )
            .content_type(pattern("json$")),
        );
    }

    RouteTable::build(declarations).unwrap()
}

fn bench_exact(c: &mut Criterion) {
    let table = build_table(100);

    c.bench_function("exact", |b| {
        b.iter(|| {
            black_box(table.resolve(
                HttpMethod::Get,
                "/api/v1/resource12",
                Some("application/json"),
            ))
        });
    });
}

fn bench_literal_path(c: &mut Criterion) {
    let table = build_table(100);

    c.bench_function("literal_path", |b| {
        b.iter(|| {
            black_box(table.resolve(HttpMethod::Post, "/api/v1/upload12", Some("image/png")))
        });
    });
}

fn bench_literal_content_type(c: &mut Criterion) {
    let table = build_table(100);

    c.bench_function("literal_content_type", |b| {
        b.iter(|| black_box(table.resolve(HttpMethod::Get, "/api/v1/resource12/42", None)));
    });
}

fn bench_pattern(c: &mut Criterion) {
    let table = build_table(100);

    c.bench_function("pattern", |b| {
        b.iter(|| {
            black_box(table.resolve(
                HttpMethod::Put,
                "/api/v1/org/acme/resource12",
                Some("application/json"),
            ))
        });
    });
}

fn bench_miss(c: &mut Criterion) {
    let table = build_table(100);

    c.bench_function("miss", |b| {
        b.iter(|| black_box(table.resolve(HttpMethod::Get, "/api/v1/nonexistent/path", None)));
    });
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for num_routes in [20, 100, 400, 1000] {
        let table = build_table(num_routes);

        group.bench_with_input(BenchmarkId::new("exact", num_routes), &num_routes, |b, &n| {
            let path = format!("/api/v1/resource{}", n / 8);
            b.iter(|| black_box(table.resolve(HttpMethod::Get, &path, Some("application/json"))));
        });

        group.bench_with_input(BenchmarkId::new("pattern", num_routes), &num_routes, |b, &n| {
            let path = format!("/api/v1/org/acme/resource{}", n / 8);
            b.iter(|| black_box(table.resolve(HttpMethod::Put, &path, Some("application/json"))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_exact,
    bench_literal_path,
    bench_literal_content_type,
    bench_pattern,
    bench_miss,
    bench_scaling
);
criterion_main!(benches);
