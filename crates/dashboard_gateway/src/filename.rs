/// Name under which a downloaded upload is stored locally: path separators
/// and characters Windows rejects become `_`, reserved device names get a
/// trailing `_`.
pub fn local_filename(remote: &str) -> String {
    let cleaned: String = remote
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]);
    let mut name = if cleaned.is_empty() {
        "download".to_string()
    } else {
        cleaned.to_string()
    };
    if name.len() > 120 {
        let mut end = 120;
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        name.truncate(end);
    }
    let stem = name.split('.').next().unwrap_or_default();
    if is_reserved_windows_name(stem) {
        name.insert(stem.len(), '_');
    }
    name
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::local_filename;

    #[test]
    fn path_components_cannot_escape() {
        assert_eq!(local_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(local_filename("..\\secret.csv"), "secret.csv");
    }

    #[test]
    fn plain_names_are_kept() {
        assert_eq!(local_filename("prices 2024.csv"), "prices 2024.csv");
    }

    #[test]
    fn empty_and_reserved_names_are_patched() {
        assert_eq!(local_filename("..."), "download");
        assert_eq!(local_filename("con.json"), "con_.json");
    }
}
