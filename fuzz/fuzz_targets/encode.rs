#![no_main]
use libfuzzer_sys::fuzz_target;
use denseform::CompactInt;
use serde_bytes::Bytes;

fuzz_target!(|data: &[u8]| {
    // Any text encodes, as its stored bytes
    let text = String::from_utf8_lossy(data).into_owned();
    let enc = denseform::to_vec(&text).unwrap();
    let prefix = CompactInt::from(text.len()).encoded_len();
    assert_eq!(enc.len(), prefix + text.len());
    assert_eq!(&enc[prefix..], text.as_bytes());

    let blob = denseform::to_vec(Bytes::new(text.as_bytes())).unwrap();
    assert_eq!(blob, enc);

    let raw = denseform::to_vec(Bytes::new(data)).unwrap();
    assert_eq!(&raw[CompactInt::from(data.len()).encoded_len()..], data);

    let ints: Vec<i64> = data
        .chunks(8)
        .map(|c| {
            let mut raw = [0u8; 8];
            raw[..c.len()].copy_from_slice(c);
            i64::from_le_bytes(raw)
        })
        .collect();
    let first = denseform::to_vec(&(ints.as_slice(), &text)).unwrap();
    let second = denseform::to_vec(&(ints.as_slice(), &text)).unwrap();
    assert_eq!(first, second);
});
