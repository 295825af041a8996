//! ASCII wiring diagrams for series/parallel topologies.
//!
//! A topology description such as `[<1.000E+02>,(<3.300E+02>;<3.300E+02>)]` is drawn left to
//! right between a source terminal `O---` and a sink terminal `---O`:
//! ```text
//! O------<1.000E+02>------<3.300E+02>---
//!                      |               |
//!                      ---<3.300E+02>------O
//! ```
//! Series halves follow each other on the same row. The second half of a parallel group
//! is drawn two rows below the first, with `|` connectors at the split and at the merge.

use std::cmp;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

const SOURCE: &str = "O---";
const SINK: &str = "---O";

/// A rendered diagram, one string per text line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schematic {
    lines: Vec<String>,
}

impl Schematic {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl FromStr for Schematic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().collect();
        let end = check(&chars, 0)?;
        if end != chars.len() {
            return malformed(end, "trailing input after topology");
        }
        layout(&chars)
    }
}

impl fmt::Display for Schematic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, line) in self.lines.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

fn malformed<T>(pos: usize, reason: &'static str) -> Result<T> {
    Err(Error::MalformedTopology { pos, reason })
}

/// Recursive descent over the grammar, returns the position after the schema at `pos`.
fn check(s: &[char], pos: usize) -> Result<usize> {
    let (sep, close) = match s.get(pos) {
        Some('<') => {
            let len = s[pos + 1..]
                .iter()
                .position(|c| "<>[](),;".contains(*c))
                .unwrap_or(s.len() - pos - 1);
            return match s.get(pos + 1 + len) {
                Some('>') if len > 0 => Ok(pos + len + 2),
                Some('>') => malformed(pos, "empty resistor value"),
                _ => malformed(pos + 1 + len, "unterminated resistor value"),
            };
        }
        Some('[') => (',', ']'),
        Some('(') => (';', ')'),
        Some(_) => return malformed(pos, "unexpected character"),
        None => return malformed(pos, "unexpected end of topology"),
    };
    let mid = check(s, pos + 1)?;
    if s.get(mid) != Some(&sep) {
        return malformed(mid, "missing separator");
    }
    let end = check(s, mid + 1)?;
    if s.get(end) != Some(&close) {
        return malformed(end, "unbalanced brackets");
    }
    Ok(end + 1)
}

/// Line buffers that only grow to the right or downwards.
struct Canvas {
    rows: Vec<Vec<char>>,
}

impl Canvas {
    fn width(&self, row: usize) -> usize {
        self.rows[row].len()
    }

    fn get(&self, row: usize, col: usize) -> char {
        self.rows[row].get(col).cloned().unwrap_or(' ')
    }

    fn push_str(&mut self, row: usize, s: &str) {
        self.rows[row].extend(s.chars());
    }

    fn pad(&mut self, row: usize, width: usize, fill: char) {
        while self.rows[row].len() < width {
            self.rows[row].push(fill);
        }
    }

    fn put(&mut self, row: usize, col: usize, c: char) {
        self.pad(row, col + 1, ' ');
        self.rows[row][col] = c;
    }
}

fn layout(s: &[char]) -> Result<Schematic> {
    // every wire row is followed by a spacer row for connectors
    let mut canvas = Canvas {
        rows: vec![Vec::new(), Vec::new()],
    };
    let mut y = 0;
    let mut entries: Vec<usize> = Vec::new();
    let mut exits: Vec<usize> = Vec::new();

    let mut pos = 0;
    while pos < s.len() {
        match s[pos] {
            '<' => {
                let len = s[pos + 1..].iter().position(|&c| c == '>');
                let len = match len {
                    Some(len) => len,
                    None => return malformed(pos, "unterminated resistor value"),
                };
                canvas.push_str(y, "---<");
                canvas.rows[y].extend_from_slice(&s[pos + 1..pos + 1 + len]);
                canvas.push_str(y, ">---");
                pos += len + 1;
            }
            '(' => entries.push(canvas.width(y)),
            ';' => {
                let x = match entries.pop() {
                    Some(x) => x,
                    None => return malformed(pos, "separator outside parallel group"),
                };
                exits.push(y);
                canvas.rows.push(Vec::new());
                canvas.rows.push(Vec::new());
                y = canvas.rows.len() - 2;
                canvas.put(y - 1, x, '|');
                for row in (0..y - 1).rev() {
                    if canvas.get(row, x) != ' ' {
                        break;
                    }
                    canvas.put(row, x, '|');
                }
                canvas.pad(y, x, ' ');
            }
            ')' => {
                let top = match exits.pop() {
                    Some(top) => top,
                    None => return malformed(pos, "unbalanced brackets"),
                };
                let end = cmp::max(canvas.width(top), canvas.width(y));
                canvas.pad(top, end, '-');
                canvas.pad(y, end, '-');
                for row in top + 1..y {
                    if canvas.width(row) < end {
                        canvas.pad(row, end - 1, ' ');
                        canvas.put(row, end - 1, '|');
                    }
                }
            }
            '[' | ',' | ']' => {}
            _ => return malformed(pos, "unexpected character"),
        }
        pos += 1;
    }
    if !entries.is_empty() || !exits.is_empty() {
        return malformed(s.len(), "unbalanced brackets");
    }

    canvas.push_str(y, SINK);
    let lines = canvas.rows[..=y]
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let prefix = if idx == 0 { SOURCE.to_string() } else { " ".repeat(SOURCE.len()) };
            let line: String = prefix.chars().chain(row.iter().cloned()).collect();
            line.trim_end().to_string()
        })
        .collect();
    Ok(Schematic { lines })
}
