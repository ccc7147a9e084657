//! mIRC text formatting codes.

const BOLD: char = '\x02';
const COLOR: char = '\x03';
const HEX_COLOR: char = '\x04';
const RESET: char = '\x0f';
const MONOSPACE: char = '\x11';
const REVERSE: char = '\x16';
const ITALIC: char = '\x1d';
const STRIKETHROUGH: char = '\x1e';
const UNDERLINE: char = '\x1f';

/// Remove formatting control codes (and colour arguments) from `text`.
pub fn strip_formatting(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            COLOR => {
                // \x03[fg[,bg]] with one or two digits each
                if skip_digits(&mut chars, 2) > 0
                    && chars.peek() == Some(&',')
                {
                    let mut lookahead = chars.clone();
                    lookahead.next();
                    if lookahead.peek().is_some_and(char::is_ascii_digit) {
                        chars.next();
                        skip_digits(&mut chars, 2);
                    }
                }
            }
            HEX_COLOR => {
                if skip_hex(&mut chars) && chars.peek() == Some(&',') {
                    let mut lookahead = chars.clone();
                    lookahead.next();
                    if lookahead.peek().is_some_and(char::is_ascii_hexdigit) {
                        chars.next();
                        skip_hex(&mut chars);
                    }
                }
            }
            BOLD | RESET | MONOSPACE | REVERSE | ITALIC | STRIKETHROUGH | UNDERLINE => {}
            _ => out.push(c),
        }
    }
    out
}

fn skip_digits<I: Iterator<Item = char>>(chars: &mut std::iter::Peekable<I>, max: usize) -> usize {
    let mut n = 0;
    while n < max && chars.peek().is_some_and(char::is_ascii_digit) {
        chars.next();
        n += 1;
    }
    n
}

fn skip_hex<I: Iterator<Item = char>>(chars: &mut std::iter::Peekable<I>) -> bool {
    let mut n = 0;
    while n < 6 && chars.peek().is_some_and(char::is_ascii_hexdigit) {
        chars.next();
        n += 1;
    }
    n == 6
}
