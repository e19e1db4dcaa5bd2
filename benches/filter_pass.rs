/// Filter pass benchmarks
///
/// Measures projection of a compat-data document and a full filter pass
/// over the projected tree, at sizes close to the real data set.
use bcd_query::compat_data::CompatData;
use bcd_query::engine::Engine;
use bcd_query::filter_def::{run_query, FilterDef};
use bcd_query::predicates::VersionSupportFilter;
use bcd_query::projector;
use bcd_query::release::ReleaseCatalogue;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Map, Value};

const BROWSERS: [&str; 6] = [
    "chrome",
    "chrome_android",
    "firefox",
    "firefox_android",
    "safari",
    "safari_ios",
];

/// Synthetic document: `interfaces` entries under `api`, each with `members` subfeatures
fn synthetic_document(interfaces: usize, members: usize) -> Value {
    let mut browsers = Map::new();
    for browser in BROWSERS {
        browsers.insert(
            browser.to_string(),
            json!({
                "name": browser,
                "releases": {
                    "140": { "status": "retired" },
                    "141": { "status": "current" },
                    "142": { "status": "beta" }
                }
            }),
        );
    }

    let mut api = Map::new();
    for i in 0..interfaces {
        let mut interface = Map::new();
        interface.insert("__compat".to_string(), compat(i, 0));
        for m in 0..members {
            interface.insert(format!("member{}", m), json!({ "__compat": compat(i, m + 1) }));
        }
        api.insert(format!("Interface{}", i), Value::Object(interface));
    }

    json!({ "browsers": browsers, "api": api })
}

fn compat(i: usize, m: usize) -> Value {
    let mut support = Map::new();
    for (b, browser) in BROWSERS.iter().enumerate() {
        let added = match (i + m + b) % 4 {
            0 => json!(false),
            1 => json!("140"),
            2 => json!("141"),
            _ => json!("142"),
        };
        support.insert(browser.to_string(), json!({ "version_added": added }));
    }
    json!({
        "description": format!("Interface{}.member{}", i, m),
        "support": support,
        "status": { "experimental": false, "standard_track": true, "deprecated": (i * 7 + m) % 31 == 0 }
    })
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");

    for interfaces in [100, 1000] {
        let data = CompatData::from_value(synthetic_document(interfaces, 10)).unwrap();
        group.throughput(Throughput::Elements((interfaces * 11) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(interfaces), &data, |b, data| {
            b.iter(|| projector::project_categories(black_box(data), &["api"]).unwrap());
        });
    }

    group.finish();
}

fn bench_filter_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_pass");

    let data = CompatData::from_value(synthetic_document(1000, 10)).unwrap();
    let releases = ReleaseCatalogue::from_browsers(&data.browsers);
    let tree = projector::project_categories(&data, &["api"]).unwrap();
    group.throughput(Throughput::Elements(tree.node_count() as u64));

    let filters = [
        FilterDef::default(),
        FilterDef::VersionSupport(VersionSupportFilter::new(Engine::Firefox, "141")),
        FilterDef::ApproachingBaseline,
        FilterDef::NewlyBaseline,
    ];

    for filter in &filters {
        group.bench_with_input(BenchmarkId::new("run_query", filter.kind()), filter, |b, filter| {
            b.iter(|| run_query(black_box(&tree), filter, "", &releases));
        });
    }

    group.bench_function("run_query_with_title", |b| {
        b.iter(|| run_query(black_box(&tree), &FilterDef::NewlyBaseline, "member1", &releases));
    });

    group.finish();
}

criterion_group!(benches, bench_projection, bench_filter_pass);
criterion_main!(benches);
