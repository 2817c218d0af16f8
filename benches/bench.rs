// Copyright 2026 the flakegen authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use criterion::{Criterion, criterion_group, criterion_main};
use flakegen::{Snowflake, decompose};

fn bench_new(c: &mut Criterion) {
    c.bench_function("bench_new", |b| {
        b.iter(|| Snowflake::new(1, 1));
    });
}

fn bench_next_id(c: &mut Criterion) {
    let sf = Snowflake::new(1, 1).expect("Could not create Snowflake");
    c.bench_function("bench_next_id", |b| {
        b.iter(|| sf.next_id());
    });
}

fn bench_decompose(c: &mut Criterion) {
    let sf = Snowflake::new(1, 1).expect("Could not create Snowflake");
    let id = sf.next_id().expect("Could not generate an id");
    c.bench_function("bench_decompose", |b| {
        b.iter(|| decompose(id));
    });
}

criterion_group!(snowflake_perf, bench_new, bench_next_id, bench_decompose);
criterion_main!(snowflake_perf);
