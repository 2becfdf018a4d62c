//! Terminal-oriented Unicode board renderer, used by `Display` and in test
//! diagnostics.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::Square;
use crate::game_state::game_state::GameState;

/// Render the board to a Unicode string, rank 8 at the top.
pub fn render_board(board: &BoardState) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..8u8 {
            match board.occupant_at(Square::at(file, rank)) {
                Some(piece) => out.push(piece.glyph()),
                None => out.push('·'),
            }

            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

/// Board plus the side to move and the move count.
pub fn render_game_state(game: &GameState) -> String {
    format!(
        "{}\n{} to move, {} moves played",
        render_board(&game.board),
        game.side_to_move,
        game.history.cursor()
    )
}
