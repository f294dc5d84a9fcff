//! Text rendering of the board.
//!
//! Gray pieces render uppercase, green pieces lowercase: L/l for leaves,
//! B/b for branches, T/t for trunks. Empty root-zone cells show `=` (gray)
//! or `-` (green); plain empty cells show `.`.

use treego_core::{GameSession, Piece, Player, Rank};

fn piece_glyph(piece: Piece) -> char {
    let glyph = match piece.rank {
        Rank::Leaf => 'l',
        Rank::Branch => 'b',
        Rank::Trunk => 't',
    };
    match piece.owner {
        Player::Gray => glyph.to_ascii_uppercase(),
        Player::Green => glyph,
    }
}

fn zone_glyph(zone: Option<Player>) -> char {
    match zone {
        Some(Player::Gray) => '=',
        Some(Player::Green) => '-',
        None => '.',
    }
}

/// Player name as shown in prompts and logs.
pub fn player_name(player: Player) -> &'static str {
    match player {
        Player::Gray => "gray",
        Player::Green => "green",
    }
}

/// Render the whole board with coordinate rulers.
pub fn board_to_string(session: &GameSession) -> String {
    let width = session.board.width();
    let height = session.board.height();

    let mut out = String::new();
    out.push_str("   ");
    for x in 0..width {
        out.push_str(&format!("{x:>2}"));
    }
    out.push('\n');

    for y in 0..height {
        out.push_str(&format!("{y:>2} "));
        for x in 0..width {
            // In-bounds by construction.
            let (zone, occupant) = session.cell_at(x, y).unwrap();
            let glyph = match occupant {
                Some(piece) => piece_glyph(piece),
                None => zone_glyph(zone),
            };
            out.push(' ');
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_board_rendering() {
        let session = GameSession::default();
        let text = board_to_string(&session);
        let rows: Vec<&str> = text.lines().collect();

        // Ruler + 8 board rows.
        assert_eq!(rows.len(), 9);
        // Green root spans the middle of the top row.
        assert_eq!(rows[1], " 0  .  .  -  -  -  -  .  .");
        // Green starting leaves.
        assert_eq!(rows[2], " 1  .  .  .  l  l  .  .  .");
        // Gray root and starting leaves at the bottom.
        assert_eq!(rows[7], " 6  .  .  .  L  L  .  .  .");
        assert_eq!(rows[8], " 7  .  .  =  =  =  =  .  .");
    }
}
