#![no_main]

//! Whatever sits under the storage key, loading must not panic and must
//! either yield the records or an empty store.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use remindme::board::{bucket_by_day, order_list};
use remindme::dates::{decode_key, encode_key};
use remindme::{AssignmentStore, MemoryBlobStore, STORAGE_KEY};

#[derive(Arbitrary, Debug)]
struct BlobInput {
    /// Raw stored value
    blob: String,
    /// Candidate date key
    key: String,
}

fuzz_target!(|input: BlobInput| {
    let store = AssignmentStore::load(MemoryBlobStore::with_entry(STORAGE_KEY, &input.blob));
    let all = store.all();
    let _ = order_list(&all);
    let _ = bucket_by_day(&all);

    if let Ok(date) = decode_key(&input.key) {
        assert_eq!(encode_key(date), input.key);
    }
});
