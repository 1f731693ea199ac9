//! Benchmarks for RC5 key expansion, single-block transforms and the
//! chained stream mode.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rc5::io::{decrypt_stream, encrypt_stream};
use rc5::{KeySchedule, Rc5, WordSize};

const KEY: &[u8; 16] = b"BenchmarkKey2024";

/// Stream payload size in bytes.
const STREAM_LEN: usize = 64 * 1024;

const WORD_SIZES: [WordSize; 3] = [WordSize::W16, WordSize::W32, WordSize::W64];

fn bench_key_schedule(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_schedule");
    for rounds in [12u32, 20, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(rounds), &rounds, |b, &rounds| {
            b.iter(|| KeySchedule::new(WordSize::W32, rounds, black_box(KEY)));
        });
    }
    group.finish();
}

/// Single-block encrypt and decrypt for each word size, 12 rounds.
fn bench_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("block");
    for word in WORD_SIZES {
        let rc5 = Rc5::with_word_size(word, 12, KEY);
        let block = 0x0123_4567_89AB_CDEF_0123_4567_89AB_CDEF & word.block_mask();
        group.throughput(Throughput::Bytes(word.block_len() as u64));

        group.bench_function(BenchmarkId::new("encrypt", word.bits()), |b| {
            b.iter(|| rc5.encrypt_block(black_box(block)))
        });
        group.bench_function(BenchmarkId::new("decrypt", word.bits()), |b| {
            b.iter(|| rc5.decrypt_block(black_box(block)))
        });
    }
    group.finish();
}

fn bench_stream(c: &mut Criterion) {
    let plaintext: Vec<u8> = (0..STREAM_LEN).map(|i| (i % 251) as u8 + 1).collect();

    let mut group = c.benchmark_group("stream");
    group.throughput(Throughput::Bytes(STREAM_LEN as u64));
    for word in WORD_SIZES {
        let rc5 = Rc5::with_word_size(word, 12, KEY);
        let ciphertext =
            encrypt_stream(&rc5, 1, &mut &plaintext[..], Vec::with_capacity(STREAM_LEN + 32)).unwrap();

        group.bench_function(BenchmarkId::new("encrypt", word.bits()), |b| {
            b.iter(|| {
                encrypt_stream(&rc5, 1, &mut black_box(&plaintext[..]), Vec::with_capacity(STREAM_LEN + 32))
                    .unwrap()
            })
        });
        group.bench_function(BenchmarkId::new("decrypt", word.bits()), |b| {
            b.iter(|| {
                decrypt_stream(&rc5, &mut black_box(&ciphertext[..]), Vec::with_capacity(STREAM_LEN)).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_key_schedule, bench_block, bench_stream);
criterion_main!(benches);
