//! Character-count paragraph filling.
//!
//! Lines are packed greedily by character count, not pixel width. The rules
//! match the classic paragraph filler found in most scripting runtimes:
//!
//! - tabs expand to multiples of 8 and every whitespace character becomes a space
//! - words split after hyphens that sit between letters
//! - whitespace is dropped at the end of every line and at the start of every
//!   line but the first
//! - a chunk longer than the line width is hard-broken, preferring the last
//!   hyphen that fits

const TAB_SIZE: usize = 8;

/// Wrap `text` into lines of at most `width` characters.
///
/// A `width` of 0 is treated as 1.
pub fn fill_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut chunks: Vec<Vec<char>> = split_chunks(&normalize_whitespace(text));
    chunks.reverse();

    let mut lines: Vec<String> = Vec::new();
    while !chunks.is_empty() {
        let mut line: Vec<Vec<char>> = Vec::new();
        let mut len = 0usize;

        if !lines.is_empty() && chunks.last().is_some_and(|c| is_blank(c)) {
            chunks.pop();
        }

        while let Some(chunk) = chunks.pop() {
            if len + chunk.len() <= width {
                len += chunk.len();
                line.push(chunk);
            } else {
                chunks.push(chunk);
                break;
            }
        }

        if let Some(chunk) = chunks.last_mut() {
            if chunk.len() > width {
                break_long_chunk(chunk, &mut line, width - len.min(width));
            }
        }

        if line.last().is_some_and(|c| is_blank(c)) {
            line.pop();
        }

        if !line.is_empty() {
            lines.push(line.concat().into_iter().collect());
        }
    }

    lines
}

/// [`fill_lines`] joined with `\n`.
pub fn fill(text: &str, width: usize) -> String {
    fill_lines(text, width).join("\n")
}

/// Move as much of `chunk` as fits in `space_left` onto the current line.
fn break_long_chunk(chunk: &mut Vec<char>, line: &mut Vec<Vec<char>>, space_left: usize) {
    let mut end = space_left;
    if let Some(hyphen) = chunk[..space_left].iter().rposition(|&c| c == '-') {
        if hyphen > 0 && chunk[..hyphen].iter().any(|&c| c != '-') {
            end = hyphen + 1;
        }
    }
    let rest = chunk.split_off(end);
    line.push(std::mem::replace(chunk, rest));
}

fn is_wrap_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

fn is_blank(chunk: &[char]) -> bool {
    chunk.iter().all(|&c| is_wrap_whitespace(c))
}

fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0usize;
    for c in text.chars() {
        match c {
            '\t' => {
                let pad = TAB_SIZE - column % TAB_SIZE;
                out.extend(std::iter::repeat_n(' ', pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(' ');
                column = 0;
            }
            c if is_wrap_whitespace(c) => {
                out.push(' ');
                column += 1;
            }
            c => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

/// Split into alternating whitespace runs and words, breaking words after
/// letter-hyphen-letter sequences.
fn split_chunks(text: &str) -> Vec<Vec<char>> {
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut current: Vec<char> = Vec::new();

    for (i, &c) in chars.iter().enumerate() {
        let blank = c == ' ';
        if let Some(&prev) = current.last() {
            if (prev == ' ') != blank {
                chunks.push(std::mem::take(&mut current));
            }
        }
        current.push(c);

        let hyphen_break = c == '-'
            && i > 0
            && chars[i - 1].is_alphabetic()
            && chars.get(i + 1).is_some_and(|n| n.is_alphabetic());
        if hyphen_break {
            chunks.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
