use criterion::{black_box, criterion_group, criterion_main, Criterion};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::encode::writer::simple::SimpleWriter;
use log4rs::encode::Encode;
use pattern_logger::{compile, record, PatternRender, Record, Render};

const PATTERN: &str = "%D %T %L [%s] %M";
const LOG4RS_PATTERN: &str = "{d(%Y/%m/%d %H:%M:%S%.3f)} {l} [{f}:{L}] {m}";

fn sample_record() -> Record {
    record! {
        "level" => "INFO",
        "levelValue" => 2,
        "time" => "2024-01-01 00:00:00.000",
        "source" => "/srv/app/src/handlers/payment.rs:218",
        "instanceID" => "i-0f3c",
        "user" => "alice",
        "amount" => 1299,
        "log" => "payment accepted",
    }
}

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile default pattern", |b| {
        b.iter(|| compile(black_box(PATTERN)))
    });
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("Render Comparison");
    let rec = sample_record();

    let text = PatternRender::new(PATTERN);
    group.bench_function("pattern text", |b| {
        b.iter(|| text.render_bytes(black_box(&rec)).unwrap())
    });

    let json = PatternRender::json(PATTERN);
    group.bench_function("pattern json", |b| {
        b.iter(|| json.render_bytes(black_box(&rec)).unwrap())
    });

    // Traditional layout baseline on an equivalent log record.
    let encoder = PatternEncoder::new(LOG4RS_PATTERN);
    group.bench_function("log4rs pattern encoder", |b| {
        b.iter(|| {
            let mut out = SimpleWriter(Vec::with_capacity(128));
            encoder
                .encode(
                    &mut out,
                    &log::Record::builder()
                        .level(log::Level::Info)
                        .args(format_args!("user=alice amount=1299 payment accepted"))
                        .file(Some("/srv/app/src/handlers/payment.rs"))
                        .line(Some(218))
                        .build(),
                )
                .unwrap();
            black_box(out.0)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_compile, bench_render);
criterion_main!(benches);
