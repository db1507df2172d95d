use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_engine::board::{Board, Cell};

/// Terminal coordinates of a cell, drawn upwards from the line above `origin`
///
/// Rows that do not fit above the origin are clipped to the top line.
fn cell_position((origin_x, origin_y): (u16, u16), row: usize, column: usize) -> (u16, u16) {
    (
        origin_x.saturating_add(column as u16),
        origin_y.saturating_sub(1 + row as u16),
    )
}

/// Draws the board at the cursor, highlighting the cells of `winning_coords`
pub fn draw(board: &Board, winning_coords: &[(usize, usize)]) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (1..=board.cols()).map(|x| (x % 10).to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;
    for _ in 0..board.rows() {
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;

    let (origin_x, origin_y) = crossterm::cursor::position()?;

    for row in 0..board.rows() {
        for column in 0..board.cols() {
            let (pos_x, pos_y) = cell_position((origin_x, origin_y), row, column);
            let background = if winning_coords.contains(&(row, column)) {
                Color::DarkGreen
            } else {
                Color::DarkBlue
            };

            stdout
                .queue(MoveTo(pos_x, pos_y))?
                .queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(background)
                        .with(match board.get(row, column) {
                            Cell::PlayerOne => Color::Red,
                            Cell::PlayerTwo => Color::Yellow,
                            Cell::Empty => background,
                        }),
                ))?;
        }
    }
    stdout
        .queue(MoveTo(0, origin_y))?
        .queue(PrintStyledContent(style("\n")))?;
    stdout.flush()?;
    Ok(())
}
