use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use aes_core::{expand_key, Aes, AesKey};

fn bench_key_schedule(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_schedule");
    for len in [16usize, 24, 32] {
        let key = AesKey::new(&vec![0x24u8; len]).expect("valid key length");
        group.bench_function(format!("expand_{}", key.size().bits()), |b| {
            b.iter(|| expand_key(black_box(&key)));
        });
    }
    group.finish();
}

fn bench_blocks(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
    let mut group = c.benchmark_group("block");
    for len in [16usize, 24, 32] {
        let mut key = vec![0u8; len];
        rng.fill_bytes(&mut key);
        let aes = Aes::new(&key).expect("valid key length");
        let mut block = [0u8; 16];
        rng.fill_bytes(&mut block);
        let bits = aes.key_size().bits();
        group.bench_function(format!("encrypt_{bits}"), |b| {
            b.iter(|| aes.encrypt_block(black_box(&block)));
        });
        group.bench_function(format!("decrypt_{bits}"), |b| {
            b.iter(|| aes.decrypt_block(black_box(&block)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_key_schedule, bench_blocks);
criterion_main!(benches);
