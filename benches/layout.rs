use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use switchsvg::config::{LayoutConfig, SwitchConfig, ValidatedConfig};
use switchsvg::ir::{LayoutMode, PortAssignment, PortStatus};
use switchsvg::layout::compute_geometry;
use switchsvg::render::render_svg;
use switchsvg::text_metrics::ApproxMeasure;
use switchsvg::theme::Theme;

fn scenario(name: &str) -> (ValidatedConfig, PortAssignment) {
    let config = match name {
        "small_8" => SwitchConfig {
            num_ports: 8,
            ..Default::default()
        },
        "default_24" => SwitchConfig::default(),
        "large_48_sfp" => SwitchConfig {
            num_ports: 48,
            sfp_ports: 4,
            ..Default::default()
        },
        "single_row_48" => SwitchConfig {
            num_ports: 48,
            layout_mode: LayoutMode::SingleRow,
            ..Default::default()
        },
        "sfp_only_32" => SwitchConfig {
            sfp_only_mode: true,
            sfp_ports: 32,
            ..Default::default()
        },
        _ => panic!("unknown scenario"),
    };
    let validated = config.validate().expect("valid scenario");

    let mut assignment = PortAssignment::new();
    let total = validated.num_ports + validated.sfp_ports;
    for port in 1..=total {
        assignment.set_vlan(port, [1, 10, 20, 30, 40][(port as usize) % 5]);
        if port % 7 == 0 {
            assignment.set_status(port, PortStatus::Down);
        }
    }
    (validated, assignment)
}

const SCENARIOS: [&str; 5] = [
    "small_8",
    "default_24",
    "large_48_sfp",
    "single_row_48",
    "sfp_only_32",
];

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let theme = Theme::dark();
    let layout = LayoutConfig::default();
    for name in SCENARIOS {
        let (config, assignment) = scenario(name);
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(config, assignment),
            |b, (config, assignment)| {
                b.iter(|| {
                    let geom = compute_geometry(
                        black_box(config),
                        assignment,
                        &theme,
                        &layout,
                        &ApproxMeasure,
                    );
                    black_box(geom.ports.len());
                });
            },
        );
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_svg");
    let theme = Theme::dark();
    let layout = LayoutConfig::default();
    for name in SCENARIOS {
        let (config, assignment) = scenario(name);
        let geom = compute_geometry(&config, &assignment, &theme, &layout, &ApproxMeasure);
        group.bench_with_input(BenchmarkId::from_parameter(name), &geom, |b, geom| {
            b.iter(|| {
                let svg = render_svg(black_box(geom), &theme, &layout);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let theme = Theme::dark();
    let layout = LayoutConfig::default();
    for name in SCENARIOS {
        group.bench_with_input(BenchmarkId::from_parameter(name), name, |b, name| {
            b.iter(|| {
                let (config, assignment) = scenario(black_box(name));
                let geom = compute_geometry(&config, &assignment, &theme, &layout, &ApproxMeasure);
                let svg = render_svg(&geom, &theme, &layout);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_layout, bench_render, bench_end_to_end
);
criterion_main!(benches);
