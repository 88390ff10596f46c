//! Benchmarks for wswire codec operations
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use wswire::frame::{format_masked_message, message_frame_size, OpCode};
use wswire::mask::apply_mask;
use wswire::utf8::is_valid_utf8;
use wswire::{FrameHandler, ServerState};

struct Sink;

impl FrameHandler<true> for Sink {
    fn handle_fragment(
        &mut self,
        data: &[u8],
        _remaining_bytes: u64,
        _opcode: OpCode,
        _fin: bool,
        _state: &mut ServerState,
    ) -> bool {
        black_box(data.len());
        false
    }

    fn force_close(&mut self, _state: &mut ServerState, reason: &'static str) {
        panic!("unexpected close in bench: {}", reason);
    }
}

fn bench_mask(c: &mut Criterion) {
    let mut group = c.benchmark_group("mask");

    for size in [64, 256, 1024, 4096, 16384, 65536] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("apply_mask", size), &size, |b, &size| {
            let mut data = vec![0x42u8; size];
            let mask = [0x37, 0xfa, 0x21, 0x3d];
            b.iter(|| {
                apply_mask(black_box(&mut data), black_box(mask));
            });
        });
    }

    group.finish();
}

fn bench_utf8(c: &mut Criterion) {
    let mut group = c.benchmark_group("utf8");

    for size in [64, 1024, 16384] {
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("ascii", size), &size, |b, &size| {
            let data = "a".repeat(size);
            b.iter(|| is_valid_utf8(black_box(data.as_bytes())));
        });

        group.bench_with_input(BenchmarkId::new("multibyte", size), &size, |b, &size| {
            let data = "\u{65e5}\u{672c}\u{8a9e}".repeat(size / 9 + 1);
            b.iter(|| is_valid_utf8(black_box(data.as_bytes())));
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [125usize, 1024, 16384] {
        // one masked binary frame of `size` bytes
        let payload = vec![0x42u8; size];
        let mut frame = vec![0u8; message_frame_size(size) + 4];
        let written = format_masked_message(
            &mut frame,
            &payload,
            OpCode::Binary,
            size as u64,
            false,
            true,
            [0x37, 0xfa, 0x21, 0x3d],
        );

        let pre = ServerState::CONSUME_PRE_PADDING;
        let post = ServerState::CONSUME_POST_PADDING;

        group.throughput(Throughput::Bytes(written as u64));
        group.bench_with_input(
            BenchmarkId::new("masked_frame", size),
            &size,
            |b, _| {
                let mut state = ServerState::new();
                let mut sink = Sink;
                let mut buf = vec![0u8; pre + written + post];
                b.iter(|| {
                    // unmasking is in place, so the wire bytes are restored each round
                    buf[pre..pre + written].copy_from_slice(&frame[..written]);
                    state.consume(&mut buf, written, &mut sink);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_mask, bench_utf8, bench_parse);
criterion_main!(benches);
