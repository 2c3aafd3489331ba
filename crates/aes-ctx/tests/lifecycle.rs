use std::thread;

use aes_core::Aes;
use aes_ctx::{ContextStore, StoreError};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

#[test]
fn round_trip_through_handles() {
    let store = ContextStore::new();
    let mut rng = ChaCha20Rng::from_seed([11u8; 32]);
    for len in [16usize, 24, 32] {
        let mut key = vec![0u8; len];
        rng.fill_bytes(&mut key);
        let handle = store.create(&key).unwrap();
        for _ in 0..32 {
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut block);
            let ct = store.encrypt(handle, &block).unwrap();
            assert_eq!(store.decrypt(handle, &ct).unwrap(), block);
        }
        store.destroy(handle).unwrap();
    }
    assert!(store.is_empty());
}

#[test]
fn handles_match_direct_context() {
    let store = ContextStore::new();
    let key = [0x77u8; 24];
    let first = store.create(&key).unwrap();
    let second = store.create(&key).unwrap();
    let direct = Aes::new(&key).unwrap();

    let block = *b"sixteen byte blk";
    let expected = direct.encrypt_block(&block);
    assert_eq!(store.encrypt(first, &block).unwrap(), expected);
    assert_eq!(store.encrypt(second, &block).unwrap(), expected);
}

#[test]
fn key_length_rejections() {
    let store = ContextStore::new();
    for len in [0usize, 1, 15, 17, 33] {
        let err = store.create(&vec![0u8; len]).unwrap_err();
        assert_eq!(
            err,
            StoreError::Cipher(aes_core::Error::InvalidKeyLength { len })
        );
    }
    for len in [16usize, 24, 32] {
        assert!(store.create(&vec![0u8; len]).is_ok());
    }
    assert_eq!(store.len(), 3);
}

#[test]
fn repeated_create_destroy_leaves_nothing_behind() {
    let store = ContextStore::new();
    for cycle in 0..1_000u32 {
        let key = cycle.to_be_bytes().repeat(4);
        let handle = store.create(&key).unwrap();
        store.encrypt(handle, &[0u8; 16]).unwrap();
        store.destroy(handle).unwrap();
    }
    assert!(store.is_empty());
}

#[test]
fn double_destroy_is_rejected() {
    let store = ContextStore::new();
    let keep = store.create(&[1u8; 16]).unwrap();
    let gone = store.create(&[2u8; 16]).unwrap();
    store.destroy(gone).unwrap();
    assert_eq!(store.destroy(gone), Err(StoreError::InvalidContext(gone)));
    assert_eq!(
        store.decrypt(gone, &[0u8; 16]),
        Err(StoreError::InvalidContext(gone))
    );
    assert!(store.contains(keep));
    assert_eq!(store.len(), 1);
}

#[test]
fn handles_from_another_store_are_rejected() {
    let a = ContextStore::new();
    let b = ContextStore::new();
    let handle = a.create(&[0u8; 16]).unwrap();
    assert_eq!(
        b.encrypt(handle, &[0u8; 16]),
        Err(StoreError::InvalidContext(handle))
    );
}

#[test]
fn concurrent_transforms_share_one_context() {
    let store = ContextStore::new();
    let key = [0x13u8; 32];
    let handle = store.create(&key).unwrap();
    let reference = Aes::new(&key).unwrap();

    thread::scope(|scope| {
        for worker in 0..8u8 {
            let store = &store;
            let reference = &reference;
            scope.spawn(move || {
                for i in 0..200u8 {
                    let block = [worker ^ i; 16];
                    let ct = store.encrypt(handle, &block).unwrap();
                    assert_eq!(ct, reference.encrypt_block(&block));
                    assert_eq!(store.decrypt(handle, &ct).unwrap(), block);
                }
            });
        }
    });

    store.destroy(handle).unwrap();
    assert!(store.is_empty());
}

#[test]
fn concurrent_creation_yields_unique_handles() {
    let store = ContextStore::new();
    let handles: Vec<_> = thread::scope(|scope| {
        let workers: Vec<_> = (0..4u8)
            .map(|w| {
                let store = &store;
                scope.spawn(move || {
                    (0..50)
                        .map(|_| store.create(&[w; 16]).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        workers
            .into_iter()
            .flat_map(|w| w.join().unwrap())
            .collect()
    });

    let mut raw: Vec<u64> = handles.iter().map(|h| h.to_raw()).collect();
    raw.sort_unstable();
    raw.dedup();
    assert_eq!(raw.len(), 200);
    assert_eq!(store.len(), 200);
    for handle in handles {
        store.destroy(handle).unwrap();
    }
    assert!(store.is_empty());
}
