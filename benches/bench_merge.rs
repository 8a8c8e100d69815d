use criterion::{black_box, criterion_group, criterion_main, Criterion};
use genotype::{GenotypeCall, GenotypeMerger, PairList, SampleDirectory, SamplePair};

const N_SAMPLES: usize = 500;
const CALLS    : [&str; 6] = ["0/0", "1/1", "0/1", "./.", "1|1", "0|1"];

fn roster() -> Vec<String> {
    (0..N_SAMPLES).map(|i| format!("S{i}")).collect()
}

/// Pair every sample with its successor.
fn pairs(roster: &[String]) -> PairList {
    roster.windows(2).map(|w| SamplePair::new(w[0].as_str(), w[1].as_str())).collect()
}

fn site_calls() -> Vec<GenotypeCall> {
    CALLS.iter().cycle()
        .take(N_SAMPLES)
        .map(|gt| gt.parse().expect("Invalid bench genotype"))
        .collect()
}

fn bench_merge_site(c: &mut Criterion) {
    let roster    = roster();
    let pairs     = pairs(&roster);
    let directory = SampleDirectory::build(roster.iter());
    let calls     = site_calls();

    let mut group = c.benchmark_group("merge-site");
    for keep_old_samples in [false, true] {
        let merger = GenotypeMerger::new(&directory, &pairs, keep_old_samples).expect("Invalid bench pairs");
        group.bench_function(format!("keep-old-samples={keep_old_samples}"), |b| b.iter(|| {
            merger.merge_site(black_box(&calls))
        }));
    }
    group.finish();
}

fn bench_parse_calls(c: &mut Criterion) {
    let genotypes: Vec<&str> = CALLS.iter().copied().cycle().take(N_SAMPLES).collect();
    c.bench_function("parse-genotype-calls", |b| b.iter(|| {
        black_box(&genotypes).iter()
            .map(|gt| gt.parse::<GenotypeCall>())
            .collect::<Result<Vec<_>, _>>()
    }));
}

criterion_group!(benches, bench_merge_site, bench_parse_calls);
criterion_main!(benches);
