use crossterm::style::{style, Stylize};

use crate::puzzle::Board;

/// Terminal rendering: tiles in their goal cell are green, the blank is dimmed.
/// Plain boards should use `Display` instead.
pub fn colored(board: &Board) -> String {
    let size = board.size();
    let mut out = String::new();
    for (index, value) in board.cells().enumerate() {
        let (row, col) = (index / size, index % size);
        if col > 0 {
            out.push(' ');
        } else if row > 0 {
            out.push('\n');
        }
        let cell = if value == 0 {
            style(value).dark_grey()
        } else if value as usize == index {
            style(value).green().bold()
        } else {
            style(value)
        };
        out.push_str(&cell.to_string());
    }
    out
}
