/// Calculate the display width of a string, counting CJK glyphs as two columns.
pub fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

fn char_width(c: char) -> usize {
    match c {
        '\u{1100}'..='\u{115F}'   // Hangul Jamo
        | '\u{2E80}'..='\u{303F}' // CJK radicals, symbols and punctuation
        | '\u{3040}'..='\u{33FF}' // Kana, Bopomofo, compatibility blocks
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}' // Unified ideographs
        | '\u{A000}'..='\u{A4CF}' // Yi
        | '\u{AC00}'..='\u{D7AF}' // Hangul syllables
        | '\u{F900}'..='\u{FAFF}'
        | '\u{FE30}'..='\u{FE6F}'
        | '\u{FF00}'..='\u{FFEF}' // Fullwidth forms
        | '\u{20000}'..='\u{2EBEF}' => 2,
        _ => 1,
    }
}

/// Wrap a string into lines with a given maximum display width.
pub fn wrap_text(text: &str, max_line_len: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        if display_width(remaining) <= max_line_len {
            lines.push(remaining.to_string());
            break;
        }

        // Prefer breaking at a space inside the width limit
        let mut break_pos = 0;
        let mut current_width = 0;
        for (pos, ch) in remaining.char_indices() {
            let width = char_width(ch);
            if current_width + width > max_line_len {
                break;
            }
            if ch == ' ' {
                break_pos = pos;
            }
            current_width += width;
        }

        if break_pos > 0 {
            lines.push(remaining[..break_pos].to_string());
            remaining = remaining[break_pos + 1..].trim_start();
        } else {
            let mut char_end = 0;
            let mut current_width = 0;
            for (pos, ch) in remaining.char_indices() {
                let width = char_width(ch);
                if current_width + width > max_line_len {
                    break;
                }
                char_end = pos + ch.len_utf8();
                current_width += width;
            }
            lines.push(remaining[..char_end].to_string());
            remaining = &remaining[char_end..];
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cjk_counts_double_width() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("设备"), 4);
    }

    #[test]
    fn wrap_breaks_at_spaces() {
        let lines = wrap_text("reboot the core switch now", 12);
        assert!(lines.iter().all(|l| display_width(l) <= 12));
        assert_eq!(lines.join(" "), "reboot the core switch now");
    }
}
