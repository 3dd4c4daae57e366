use super::fixtures::{Profile, sample_profile};
use crate::{CodecPool, Message};

#[test]
fn pooled_round_trip() {
    let pool = CodecPool::new();
    let original = sample_profile();

    let mut bytes = Vec::new();
    pool.encode(&mut bytes, &original).unwrap();
    let decoded: Profile = pool.decode(bytes.as_slice()).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn instances_are_recycled() {
    let pool = CodecPool::new();
    assert_eq!(pool.idle_decoders(), 0);
    assert_eq!(pool.idle_encoders(), 0);

    let p = sample_profile();
    let mut bytes = Vec::new();
    pool.encode(&mut bytes, &p).unwrap();
    let _: Profile = pool.decode(bytes.as_slice()).unwrap();
    assert_eq!(pool.idle_decoders(), 1);
    assert_eq!(pool.idle_encoders(), 1);

    // the second round reuses the same scratch, no growth
    let mut bytes2 = Vec::new();
    pool.encode(&mut bytes2, &p).unwrap();
    let _: Profile = pool.decode(bytes2.as_slice()).unwrap();
    assert_eq!(pool.idle_decoders(), 1);
    assert_eq!(pool.idle_encoders(), 1);
    assert_eq!(bytes, bytes2);
}

#[test]
fn guards_release_on_error_paths() {
    let pool = CodecPool::new();
    let res: Result<Profile, _> = pool.decode(&b"{\"id\":"[..]);
    assert!(res.is_err());
    assert_eq!(pool.idle_decoders(), 1);

    // a failed call leaves no residue for the next one
    let ok: Profile = pool.decode(&b"{\"name\":\"fresh\"}"[..]).unwrap();
    assert_eq!(ok.name, "fresh");
    assert_eq!(pool.idle_decoders(), 1);
}

#[test]
fn manual_guard_use() {
    let pool = CodecPool::new();
    let mut d = pool.decoder(&b"{\"name\":\"via guard\"}"[..]);
    let mut p = Profile::default();
    p.decode_json(&mut d);
    d.close().unwrap();
    drop(d);
    assert_eq!(p.name, "via guard");
    assert_eq!(pool.idle_decoders(), 1);
}

#[test]
fn pool_is_shared_across_threads() {
    let pool = CodecPool::new();
    let p = sample_profile();
    let bytes = crate::to_vec(&p).unwrap();

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..25 {
                    let decoded: Profile = pool.decode(bytes.as_slice()).unwrap();
                    assert_eq!(decoded.id, p.id);
                }
            });
        }
    });
    assert!(pool.idle_decoders() >= 1);
    assert!(pool.idle_decoders() <= 4);
}
