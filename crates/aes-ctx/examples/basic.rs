//! Creates a context, encrypts two blocks, and releases the context.

use aes_core::{encrypt_block, expand_key, AesKey};
use aes_ctx::ContextStore;

fn main() -> Result<(), aes_ctx::StoreError> {
    let key = [0u8; 16];
    let store = ContextStore::new();
    let handle = store.create(&key)?;

    let first = *b"first block here";
    let second = *b"second blockhere";
    let ct_first = store.encrypt(handle, &first)?;
    let ct_second = store.encrypt(handle, &second)?;

    let round_keys = expand_key(&AesKey::from(key));
    assert_eq!(ct_first, encrypt_block(&first, &round_keys));
    assert_eq!(ct_second, encrypt_block(&second, &round_keys));
    assert_eq!(store.decrypt(handle, &ct_first)?, first);

    store.destroy(handle)?;
    assert!(store.is_empty());
    println!("example succeeded; ciphertext matches AES reference");
    Ok(())
}
