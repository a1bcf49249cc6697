//! Glob matching for `SCAN MATCH` style patterns on the in-memory backend.
//! Only `*` is special; every other byte matches itself.

pub fn glob_match(pattern: &str, candidate: &str) -> bool {
    let pattern = pattern.as_bytes();
    let candidate = candidate.as_bytes();

    let (mut p, mut c) = (0, 0);
    let mut star: Option<usize> = None;
    let mut resume = 0;

    while c < candidate.len() {
        if p < pattern.len() && pattern[p] == b'*' {
            star = Some(p);
            p += 1;
            resume = c;
        }
        else if p < pattern.len() && pattern[p] == candidate[c] {
            p += 1;
            c += 1;
        }
        else if let Some(star_at) = star {
            p = star_at + 1;
            resume += 1;
            c = resume;
        }
        else {
            return false;
        }
    }

    pattern[p..].iter().all(|b| *b == b'*')
}
