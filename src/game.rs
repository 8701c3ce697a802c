use serde::{Deserialize, Serialize};

use crate::board::{Board, Capture, Color, GameError, Piece, Position, Rank};
use crate::events::GameEvent;

/// Where the current turn stands. The option lists are cached when the
/// phase is entered and stay fixed until the next transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
enum Phase {
    AwaitingSelection,
    PieceSelected {
        at: Position,
        captures: Vec<Capture>,
        steps: Vec<Position>,
    },
    CaptureChainActive {
        at: Position,
        captures: Vec<Capture>,
    },
}

/// One checkers session: the board, whose turn it is, the live selection
/// and capture-chain state, and the winner once decided. Illegal input is
/// ignored rather than erroring, so it can never corrupt the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    current_player: Color,
    phase: Phase,
    winner: Option<Color>,
}

impl Game {
    /// Fresh game with the standard layout, Black to move.
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            current_player: Color::Black,
            phase: Phase::AwaitingSelection,
            winner: None,
        }
    }

    /// Session over an arbitrary position, used for custom setups and
    /// test fixtures.
    pub fn from_position(board: Board, to_move: Color) -> Self {
        Game {
            board,
            current_player: to_move,
            phase: Phase::AwaitingSelection,
            winner: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Position of the currently selected piece, if any.
    pub fn selected(&self) -> Option<Position> {
        match &self.phase {
            Phase::AwaitingSelection => None,
            Phase::PieceSelected { at, .. } | Phase::CaptureChainActive { at, .. } => Some(*at),
        }
    }

    /// True while a capture chain forces the selected piece to keep
    /// jumping.
    pub fn must_continue_capture(&self) -> bool {
        matches!(self.phase, Phase::CaptureChainActive { .. })
    }

    /// Legal destination cells for the current selection. Captures
    /// suppress simple steps, so at most one of the two lists is
    /// non-empty.
    pub fn highlighted_cells(&self) -> Vec<Position> {
        match &self.phase {
            Phase::AwaitingSelection => Vec::new(),
            Phase::PieceSelected {
                captures, steps, ..
            } => captures
                .iter()
                .map(|c| c.to)
                .chain(steps.iter().copied())
                .collect(),
            Phase::CaptureChainActive { captures, .. } => {
                captures.iter().map(|c| c.to).collect()
            }
        }
    }

    /// Single entry point for user input: a cell was clicked. Returns the
    /// events the input produced; input that matches no legal action is
    /// ignored and returns no events. Out-of-range coordinates are the
    /// only error.
    pub fn select_cell(&mut self, row: usize, col: usize) -> Result<Vec<GameEvent>, GameError> {
        let pos = Position::new(row, col);
        let cell = self.board.get(pos)?;

        if self.winner.is_some() {
            return Ok(Vec::new());
        }

        match cell {
            Some(piece) if piece.color == self.current_player => Ok(self.try_select(pos)),
            _ => Ok(self.try_destination(pos)),
        }
    }

    /// The clicked cell holds one of the current player's pieces.
    fn try_select(&mut self, pos: Position) -> Vec<GameEvent> {
        // Mid-chain the forced piece stays selected with its cached
        // options; no re-selection of any kind is accepted.
        if matches!(self.phase, Phase::CaptureChainActive { .. }) {
            return Vec::new();
        }

        let captures = self.board.captures_from(pos);
        let steps = if captures.is_empty() {
            self.board.simple_targets(pos)
        } else {
            // A piece that can capture must capture; plain steps are
            // neither offered nor accepted.
            Vec::new()
        };

        let targets: Vec<Position> = captures
            .iter()
            .map(|c| c.to)
            .chain(steps.iter().copied())
            .collect();
        self.phase = Phase::PieceSelected {
            at: pos,
            captures,
            steps,
        };
        vec![GameEvent::SelectionChanged {
            selected: pos,
            targets,
        }]
    }

    /// The clicked cell is empty or holds an enemy piece: treat it as a
    /// destination for the current selection.
    fn try_destination(&mut self, pos: Position) -> Vec<GameEvent> {
        match self.phase.clone() {
            Phase::AwaitingSelection => Vec::new(),
            Phase::PieceSelected {
                at,
                captures,
                steps,
            } => {
                if let Some(capture) = captures.iter().find(|c| c.to == pos) {
                    self.execute_capture(at, *capture)
                } else if steps.contains(&pos) {
                    self.execute_step(at, pos)
                } else {
                    Vec::new()
                }
            }
            Phase::CaptureChainActive { at, captures } => {
                match captures.iter().find(|c| c.to == pos) {
                    Some(capture) => self.execute_capture(at, *capture),
                    None => Vec::new(),
                }
            }
        }
    }

    fn execute_step(&mut self, from: Position, to: Position) -> Vec<GameEvent> {
        // A selection phase always points at an occupied cell
        let mover = self.board.piece_at(from).unwrap();
        self.board.put(from, None);
        self.board.put(to, Some(mover));

        let mut events = vec![GameEvent::PieceMoved { from, to }];
        self.check_promotion(to, &mut events);
        self.end_turn(&mut events);
        events
    }

    fn execute_capture(&mut self, from: Position, capture: Capture) -> Vec<GameEvent> {
        let mover = self.board.piece_at(from).unwrap();
        self.board.put(from, None);
        self.board.put(capture.captured, None);
        self.board.put(capture.to, Some(mover));

        let mut events = vec![GameEvent::PieceCaptured {
            from,
            to: capture.to,
            captured: capture.captured,
        }];
        self.check_promotion(capture.to, &mut events);

        // The continuation scan runs with the rank the piece had before
        // landing: a man crowned by this hop still looks for its next
        // jump as a man. If it does jump again, the rank is re-read from
        // the board and the piece goes on as a king.
        let continuations = self
            .board
            .captures_for(capture.to, mover.color, mover.rank);

        if continuations.is_empty() {
            self.end_turn(&mut events);
        } else {
            let targets: Vec<Position> = continuations.iter().map(|c| c.to).collect();
            self.phase = Phase::CaptureChainActive {
                at: capture.to,
                captures: continuations,
            };
            events.push(GameEvent::SelectionChanged {
                selected: capture.to,
                targets,
            });
        }
        events
    }

    /// Crowns a man that landed on its far row. Runs after every landing,
    /// intermediate capture hops included. Kings are left untouched.
    fn check_promotion(&mut self, at: Position, events: &mut Vec<GameEvent>) {
        if let Some(piece) = self.board.piece_at(at) {
            if piece.rank == Rank::Man && at.row == piece.color.promotion_row() {
                self.board.put(at, Some(Piece::king(piece.color)));
                events.push(GameEvent::PiecePromoted { at });
            }
        }
    }

    /// Ends the completed turn: clears the selection, evaluates the win
    /// condition, and hands the move to the opponent if the game goes on.
    fn end_turn(&mut self, events: &mut Vec<GameEvent>) {
        self.phase = Phase::AwaitingSelection;

        if let Some(winner) = self.evaluate_winner() {
            self.winner = Some(winner);
            events.push(GameEvent::GameOver { winner });
            return;
        }

        self.current_player = self.current_player.opponent();
    }

    /// A side with no pieces left has lost. A side with pieces but no
    /// legal moves is not detected; such a game simply stalls.
    fn evaluate_winner(&self) -> Option<Color> {
        if self.board.count_pieces(Color::Red) == 0 {
            Some(Color::Black)
        } else if self.board.count_pieces(Color::Black) == 0 {
            Some(Color::Red)
        } else {
            None
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
