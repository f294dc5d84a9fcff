//! Integration tests for the TreeGo rules engine.
//!
//! These tests drive whole sessions through the public API: multi-turn
//! scenarios, cooldown cycles, and a random-playout invariant check.

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use treego_core::*;

/// Place directly on the board, bypassing the rules, to craft a position.
fn put(session: &mut GameSession, player: Player, rank: Rank, x: usize, y: usize) {
    session
        .board
        .set_occupant(x, y, Some(Piece::new(player, rank)))
        .unwrap();
}

/// Drive one move that must be accepted.
fn play(session: &mut GameSession, x: usize, y: usize, rank: Rank) -> PlaceOutcome {
    let outcome = session.attempt_place(x, y, rank);
    assert!(outcome.accepted, "expected ({x}, {y}) {rank:?} to be legal");
    outcome
}

#[test]
fn test_fresh_session_layout() {
    let session = GameSession::default();

    assert_eq!(session.current_player, Player::Gray);
    assert_eq!(session.board.count_pieces(|_| true), 4);
    for player in [Player::Gray, Player::Green] {
        assert_eq!(session.board.count_pieces(|p| p.owner == player), 2);
        assert_eq!(
            session.special_pieces(player).branch,
            Availability::Available
        );
        assert_eq!(session.special_pieces(player).trunk, Availability::Available);
    }
    assert!(!session.is_finished());
}

#[test]
fn test_quiet_opening_move() {
    let mut session = GameSession::default();

    // Gray grows a leaf diagonally off a starting leaf; nothing else is
    // nearby, so no pushes and no eliminations.
    let outcome = play(&mut session, 2, 5, Rank::Leaf);
    assert!(outcome.pushed.is_empty());
    assert!(outcome.eliminated.is_empty());
    assert_eq!(outcome.winner, None);
    assert_eq!(session.current_player, Player::Green);
}

#[test]
fn test_three_in_a_row_clears_on_the_completing_move() {
    let mut session = GameSession::default();

    // Gray assembles a horizontal run on row 5 (no root-zone cells) while
    // Green grows off in its own corner.
    play(&mut session, 3, 5, Rank::Leaf);
    play(&mut session, 2, 2, Rank::Leaf);
    play(&mut session, 4, 5, Rank::Leaf);
    play(&mut session, 5, 2, Rank::Leaf);

    // The third gray leaf completes the line and it clears within the
    // same call.
    let outcome = play(&mut session, 2, 5, Rank::Leaf);
    assert_eq!(outcome.eliminated.len(), 3);
    for x in 2..=4 {
        assert_eq!(session.board.occupant(x, 5), None);
    }
    assert_eq!(outcome.winner, None);
    assert_eq!(session.current_player, Player::Green);
}

#[test]
fn test_branch_cooldown_cycle() {
    let mut session = GameSession::default();

    // Gray's Branch goes down first, then two leaves complete its row.
    play(&mut session, 3, 5, Rank::Branch);
    play(&mut session, 2, 2, Rank::Leaf);
    play(&mut session, 4, 5, Rank::Leaf);
    play(&mut session, 5, 2, Rank::Leaf);

    let outcome = play(&mut session, 2, 5, Rank::Leaf);
    assert_eq!(outcome.eliminated.len(), 3);
    assert_eq!(
        session.special_pieces(Player::Gray).branch,
        Availability::Cooldown
    );

    play(&mut session, 2, 3, Rank::Leaf); // Green

    // Gray's Branch is still cooling down: the placement is rejected with
    // no state change.
    let before = session.clone();
    assert!(!session.attempt_place(5, 5, Rank::Branch).accepted);
    assert_eq!(session, before);

    // Gray completes a turn with a leaf instead; that consumes the
    // cooldown.
    play(&mut session, 5, 5, Rank::Leaf);
    assert_eq!(
        session.special_pieces(Player::Gray).branch,
        Availability::Available
    );

    play(&mut session, 6, 2, Rank::Leaf); // Green

    // One full round later the Branch is placeable again.
    play(&mut session, 5, 4, Rank::Branch);
    assert_eq!(
        session.special_pieces(Player::Gray).branch,
        Availability::InPlay
    );
}

#[test]
fn test_chain_push_moves_every_piece_one_step() {
    let mut session = GameSession::default();
    put(&mut session, Player::Green, Rank::Leaf, 5, 3);
    put(&mut session, Player::Green, Rank::Branch, 6, 3);
    put(&mut session, Player::Gray, Rank::Leaf, 3, 3);

    // Gray places at (4,3); the two-piece green run slides right into the
    // empty (7,3).
    let outcome = play(&mut session, 4, 3, Rank::Leaf);
    assert_eq!(outcome.pushed.len(), 2);
    assert_eq!(session.board.occupant(5, 3), None);
    assert_eq!(
        session.board.occupant(6, 3),
        Some(Piece::new(Player::Green, Rank::Leaf))
    );
    assert_eq!(
        session.board.occupant(7, 3),
        Some(Piece::new(Player::Green, Rank::Branch))
    );
}

#[test]
fn test_blocked_chain_push_moves_nothing() {
    let mut session = GameSession::default();
    // Green pieces flush against the left edge: no landing cell.
    put(&mut session, Player::Green, Rank::Leaf, 0, 3);
    put(&mut session, Player::Green, Rank::Leaf, 1, 3);
    put(&mut session, Player::Gray, Rank::Leaf, 3, 3);

    let outcome = play(&mut session, 2, 3, Rank::Leaf);
    assert!(outcome.pushed.is_empty());
    for x in 0..=1 {
        assert_eq!(
            session.board.occupant(x, 3),
            Some(Piece::new(Player::Green, Rank::Leaf))
        );
    }
}

#[test]
fn test_snapshot_round_trips_through_json() {
    let mut session = GameSession::default();
    play(&mut session, 2, 5, Rank::Leaf);

    let snapshot = session.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: SessionSnapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(snapshot, restored);
    assert_eq!(restored.width, 8);
    assert_eq!(restored.current_player, Player::Green);
    // 8 zone cells plus 5 pieces, none standing on a zone cell yet.
    assert_eq!(restored.cells.len(), 13);
}

#[test]
fn test_abandoned_session_accepts_nothing() {
    let mut session = GameSession::default();
    play(&mut session, 2, 5, Rank::Leaf);
    session.abandon();

    assert!(session.is_finished());
    assert_eq!(session.winner(), None);
    assert!(!session.attempt_place(3, 2, Rank::Leaf).accepted);
}

/// Random playouts: in every reachable state, no player's piece may stand
/// inside that player's own root zone. Placement forbids it and pushes
/// abort rather than land there, so the invariant must hold throughout.
#[test]
fn test_random_playouts_never_breach_own_root_sanctuary() {
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = GameSession::default();

        for _ in 0..300 {
            if session.is_finished() {
                break;
            }

            let mut moves: Vec<(Square, Rank)> = Vec::new();
            for rank in Rank::ALL {
                for sq in session.valid_positions(rank) {
                    moves.push((sq, rank));
                }
            }
            // A player with no legal move is frozen out; nothing more to
            // check on this playout.
            if moves.is_empty() {
                break;
            }

            let (sq, rank) = moves[rng.gen_range(0..moves.len())];
            let outcome = session.attempt_place(sq.x, sq.y, rank);
            assert!(outcome.accepted, "enumerated move must be accepted");

            for (cell_sq, cell) in session.board.iter() {
                if let Some(piece) = cell.occupant {
                    assert!(
                        !session.board.in_zone(cell_sq.x, cell_sq.y, piece.owner),
                        "seed {seed}: {piece:?} breached its own root at {cell_sq:?}"
                    );
                }
            }
        }
    }
}
