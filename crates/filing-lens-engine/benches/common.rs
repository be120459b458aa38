// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_report(sections: usize) -> String {
    let header = "\
=== COMPREHENSIVE SEC ANALYSIS ===
Original Query: benchmark
Generated: 2024-06-01 10:00:00
================================================================================

COMPREHENSIVE COMBINED ANALYSIS:
================================================================================
";
    let section = "\
## Section

Paragraph with **bold**, *italic* and `code` spans. ✅ Revenue up, ⚠️ margin down.

- First point with __emphasis__
- Second point 📊
1. Ordered one
2. Ordered two

> Quoted guidance from management.
> Second quote line.

```
let total = a + b;
=== not a banner inside a fence ===
```

---
";
    let mut report = String::from(header);
    for _ in 0..sections {
        report.push_str(section);
    }
    report
}

#[allow(dead_code)]
pub fn generate_plain_paragraphs(lines: usize) -> String {
    "Plain text line with no markup at all, just words.\n".repeat(lines)
}
