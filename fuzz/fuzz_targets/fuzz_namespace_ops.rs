#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use slotfs::Namespace;

#[derive(Arbitrary, Debug)]
enum Op {
    CreateFile(String),
    CreateDir(String),
    Write(String, String),
    Read(String),
    Delete(String),
    DeleteRecursive(String),
    Find(String),
}

fuzz_target!(|ops: Vec<Op>| {
    let mut ns = Namespace::new();

    for op in ops.iter().take(512) {
        match op {
            Op::CreateFile(p) => {
                let _ = ns.create_file(p);
            }
            Op::CreateDir(p) => {
                let _ = ns.create_dir(p);
            }
            Op::Write(p, d) => {
                if let Ok(len) = ns.write(p, d) {
                    assert_eq!(len, d.len());
                }
            }
            Op::Read(p) => {
                let _ = ns.read(p);
            }
            Op::Delete(p) => {
                let _ = ns.delete(p);
            }
            Op::DeleteRecursive(p) => {
                let _ = ns.delete_recursive(p);
            }
            Op::Find(n) => {
                if let Ok(paths) = ns.find(n) {
                    assert!(!paths.is_empty());
                    assert!(paths.windows(2).all(|w| w[0] <= w[1]));
                }
            }
        }
    }

    // The root is never released
    assert!(ns.resident_nodes() >= 1);
});
