//! Benchmark for config parsing performance

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::path::Path;

fn bench_config_load_from_file(c: &mut Criterion) {
    let config_path = Path::new("geomux.example.toml");

    c.bench_function("config_parse_from_file", |b| {
        b.iter(|| {
            let config = geomux::config::GeomuxConfig::load(Some(black_box(config_path)));
            black_box(config)
        });
    });
}

fn bench_config_load_defaults(c: &mut Criterion) {
    c.bench_function("config_parse_defaults_only", |b| {
        b.iter(|| {
            let config = geomux::config::GeomuxConfig::load(None);
            black_box(config)
        });
    });
}

fn bench_config_toml_parsing(c: &mut Criterion) {
    let toml_content = r#"
[lookup]
provider_timeout_ms = 5000

[lookup.throttle]
mode = "exponential"
initial_delay_seconds = 30
max_delay_seconds = 900
multiplier = 2.0

[[providers]]
type = "google"
api_key_env = "GOOGLE_GEOCODE_KEY"

[[providers]]
type = "bing"
api_key = "inline-key"
base_url = "https://dev.virtualearth.net/REST/v1/Locations"

[logging]
level = "debug"
format = "json"

[logging.component_levels]
selector = "trace"
geocode = "debug"
"#;

    c.bench_function("config_parse_toml_full", |b| {
        b.iter(|| {
            let config: Result<geomux::config::GeomuxConfig, _> =
                toml::from_str(black_box(toml_content));
            black_box(config)
        });
    });
}

fn bench_config_validate(c: &mut Criterion) {
    let config: geomux::config::GeomuxConfig =
        toml::from_str(include_str!("../geomux.example.toml")).unwrap();

    c.bench_function("config_validate", |b| {
        b.iter(|| black_box(black_box(&config).validate()));
    });
}

criterion_group!(
    benches,
    bench_config_load_from_file,
    bench_config_load_defaults,
    bench_config_toml_parsing,
    bench_config_validate
);
criterion_main!(benches);
