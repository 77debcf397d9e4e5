//! Redis glob 模式匹配（SCAN MATCH / KEYS 使用的语法）
//!
//! 支持 `*`、`?`、`[abc]`、`[^abc]`、`[a-z]` 以及 `\` 转义

/// 转义字面量中的 glob 元字符，使其只匹配自身
pub fn escape_pattern(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len());
    for c in literal.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 判断 `text` 是否匹配 `pattern`
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern = pattern.as_bytes();
    let text = text.as_bytes();

    let (mut p, mut t) = (0, 0);
    // 最近一个 `*` 之后的模式位置，以及它当前吞掉的文本位置
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() {
            match pattern[p] {
                b'*' => {
                    star = Some((p + 1, t));
                    p += 1;
                    continue;
                }
                b'?' => {
                    p += 1;
                    t += 1;
                    continue;
                }
                b'[' => {
                    let (matched, next) = match_class(pattern, p, text[t]);
                    if matched {
                        p = next;
                        t += 1;
                        continue;
                    }
                }
                b'\\' if p + 1 < pattern.len() => {
                    if pattern[p + 1] == text[t] {
                        p += 2;
                        t += 1;
                        continue;
                    }
                }
                c => {
                    if c == text[t] {
                        p += 1;
                        t += 1;
                        continue;
                    }
                }
            }
        }

        // 回溯：让上一个 `*` 多吞一个字符
        match star {
            Some((star_p, star_t)) => {
                p = star_p;
                t = star_t + 1;
                star = Some((star_p, star_t + 1));
            }
            None => return false,
        }
    }

    while p < pattern.len() && pattern[p] == b'*' {
        p += 1;
    }
    p == pattern.len()
}

/// 匹配从 `start`（指向 `[`）开始的字符类，返回 (是否匹配, 字符类之后的位置)
fn match_class(pattern: &[u8], start: usize, ch: u8) -> (bool, usize) {
    let mut i = start + 1;
    let negate = pattern.get(i) == Some(&b'^');
    if negate {
        i += 1;
    }

    let mut matched = false;
    while i < pattern.len() && pattern[i] != b']' {
        if pattern[i] == b'\\' && i + 1 < pattern.len() {
            i += 1;
            if pattern[i] == ch {
                matched = true;
            }
        } else if i + 2 < pattern.len() && pattern[i + 1] == b'-' && pattern[i + 2] != b']' {
            let (mut lo, mut hi) = (pattern[i], pattern[i + 2]);
            if lo > hi {
                std::mem::swap(&mut lo, &mut hi);
            }
            if (lo..=hi).contains(&ch) {
                matched = true;
            }
            i += 2;
        } else if pattern[i] == ch {
            matched = true;
        }
        i += 1;
    }

    // 未闭合的字符类在模式结尾处结束
    (matched != negate, (i + 1).min(pattern.len()))
}
