#![no_main]
use libfuzzer_sys::fuzz_target;
use libutf8::core::{wide_len, widen};
use libutf8::text::{codepoints, length, reverse, substring};

fuzz_target!(|data: &[u8]| {
    let n = length(data);
    assert_eq!(codepoints(data).map(|u| u.len).sum::<usize>(), data.len());
    assert_eq!(reverse(data).len(), data.len());
    assert_eq!(widen(data).len(), wide_len(data));
    // 1..=-1 spans every codepoint
    if !data.is_empty() {
        assert_eq!(substring(data, 1, -1), data);
    }
    if n > 0 && std::str::from_utf8(data).is_ok() {
        assert_eq!(reverse(&reverse(data)), data);
    }
});
