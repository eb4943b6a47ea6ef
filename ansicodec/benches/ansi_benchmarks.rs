//
// Copyright 2025-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Benchmarks for the color token codec hot paths.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use runemud_ansicodec::{encode, strip};

const PLAIN: &str = "You are standing in a small clearing. Paths lead off in \
                     every direction, and a brook murmurs somewhere nearby.";

const TOKENED: &str = "$fg(#96)[H:100] [M:100] > $fg(#37)You see $fg(#31)a \
                       wolf$fg(#37) and $bg(#104)something shiny$bg(#40).";

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    group.bench_function("plain_short_circuit", |b| {
        b.iter(|| encode(black_box(PLAIN)))
    });
    group.bench_function("tokened", |b| b.iter(|| encode(black_box(TOKENED))));
    group.finish();
}

fn bench_strip(c: &mut Criterion) {
    let mut group = c.benchmark_group("strip");
    group.bench_function("plain_short_circuit", |b| {
        b.iter(|| strip(black_box(PLAIN)))
    });
    group.bench_function("tokened", |b| b.iter(|| strip(black_box(TOKENED))));
    group.finish();
}

criterion_group!(benches, bench_encode, bench_strip);
criterion_main!(benches);
