#![no_main]
use libfuzzer_sys::fuzz_target;
use slotfs::Shell;

// Arbitrary bytes as protocol input: the shell must never panic, and every
// response it writes must be valid protocol text.
fuzz_target!(|data: &[u8]| {
    let mut shell = Shell::builder().flush_each_response(false).build();
    let mut out = Vec::new();

    if shell.run(data, &mut out).is_err() {
        return;
    }

    let text = String::from_utf8(out).expect("responses are UTF-8");
    for line in text.lines() {
        assert!(
            line == "no" || line.starts_with("ok") || line.starts_with("contenuto "),
            "unexpected response line {:?}",
            line
        );
    }
});
