//! Criterion benchmarks for the rewrite engine.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use falx::analysis::normalizer::normalize;
use falx::rewrite::{RewriteOptions, rewrite};
use falx::similarity::shingle::{DEFAULT_SHINGLE_SIZE, ShingleSet, jaccard};
use falx::similarity::simhash::Fingerprint;

const NEWS_PARAGRAPH: &str = "Строительство моста началось, власти планируют завершить работы около конца года. \
Мэрия сообщила, что движение запустят до первых заморозков. \
Реконструкция подъездных дорог началась одновременно с основными работами. \
Жители ближайших районов давно ждали эту переправу и поддержали планы. \
Ремонт старой переправы признали нецелесообразным, поэтому выбрали новое строительство. \
Застройщик обещает установить освещение и шумовые экраны. \
Около переправы обустроят парковку и остановки транспорта. \
Примерно через год здесь откроют пешеходный маршрут.";

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize", |b| {
        b.iter(|| normalize(black_box(NEWS_PARAGRAPH)));
    });
}

fn bench_similarity(c: &mut Criterion) {
    let doc = normalize(NEWS_PARAGRAPH);
    let tokens = doc.normalized_tokens();

    c.bench_function("shingle_jaccard", |b| {
        b.iter(|| {
            let set = ShingleSet::build(black_box(&tokens), DEFAULT_SHINGLE_SIZE);
            jaccard(&set, &set)
        });
    });

    c.bench_function("simhash_fingerprint", |b| {
        b.iter(|| Fingerprint::from_tokens(black_box(&tokens)));
    });
}

fn bench_rewrite(c: &mut Criterion) {
    let options = RewriteOptions::new(300);
    c.bench_function("rewrite_pipeline", |b| {
        b.iter(|| rewrite(black_box(NEWS_PARAGRAPH), &options));
    });
}

criterion_group!(benches, bench_normalize, bench_similarity, bench_rewrite);
criterion_main!(benches);
