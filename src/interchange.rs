//! Text files exchanged with an external judge.
//!
//! Input file: a piece type line (`1` or `2`), then `N` digit rows for the
//! previous board, then `N` digit rows for the current board. Decision file:
//! `PASS` or `row,col`.

use std::fs;
use std::path::Path;

use crate::board::{Board, Stone};
use crate::constants::{N, PASS_TOKEN};
use crate::error::InterchangeError;
use crate::position::Move;

/// Contents of a board interchange file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRecord {
    /// Colour to move
    pub stone: Stone,
    pub previous: Board,
    pub board: Board,
}

pub fn parse_input(text: &str) -> Result<BoardRecord, InterchangeError> {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let first = lines.first().copied().unwrap_or_default();
    let stone = first
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(Stone::from_code)
        .ok_or_else(|| InterchangeError::PieceType(first.to_string()))?;

    let rows = &lines[1..];
    let (previous_rows, rest) = rows.split_at(rows.len().min(N));
    let previous = Board::from_digit_rows(previous_rows)?;
    let current = Board::from_digit_rows(&rest[..rest.len().min(N)])?;
    Ok(BoardRecord {
        stone,
        previous,
        board: current,
    })
}

/// Render a record. There is no trailing newline.
pub fn format_input(record: &BoardRecord) -> String {
    let mut lines = vec![record.stone.code().to_string()];
    lines.extend(record.previous.to_digit_rows());
    lines.extend(record.board.to_digit_rows());
    lines.join("\n")
}

pub fn read_input(path: &Path) -> Result<BoardRecord, InterchangeError> {
    let text = fs::read_to_string(path).map_err(|e| InterchangeError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_input(&text)
}

pub fn write_input(path: &Path, record: &BoardRecord) -> Result<(), InterchangeError> {
    fs::write(path, format_input(record)).map_err(|e| InterchangeError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse a `row,col` or `PASS` line into a move for `stone`.
///
/// Fields after the second are ignored.
pub fn parse_move(line: &str, stone: Stone) -> Option<Move> {
    let line = line.trim();
    if line.eq_ignore_ascii_case(PASS_TOKEN) {
        return Some(Move::Pass(stone));
    }
    let mut fields = line.split(',').map(str::trim);
    let row = fields.next()?.parse().ok()?;
    let col = fields.next()?.parse().ok()?;
    Some(Move::Place { row, col, stone })
}

pub fn format_move(mv: &Move) -> String {
    match *mv {
        Move::Place { row, col, .. } => format!("{row},{col}"),
        Move::Pass(_) => PASS_TOKEN.to_string(),
    }
}

/// Read the first line of a decision file as a move for `stone`.
pub fn read_decision(path: &Path, stone: Stone) -> Result<Move, InterchangeError> {
    let text = fs::read_to_string(path).map_err(|e| InterchangeError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let line = text.lines().next().unwrap_or_default();
    parse_move(line, stone).ok_or_else(|| InterchangeError::Decision(line.to_string()))
}

pub fn write_decision(path: &Path, mv: &Move) -> Result<(), InterchangeError> {
    fs::write(path, format_move(mv)).map_err(|e| InterchangeError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardParseError;

    const SAMPLE: &str = "2\n00000\n00000\n00100\n00000\n00000\n00000\n00000\n00100\n00200\n00000";

    #[test]
    fn test_parse_input() {
        let record = parse_input(SAMPLE).unwrap();
        assert_eq!(record.stone, Stone::White);
        assert_eq!(record.previous.get(2, 2), Some(Stone::Black));
        assert_eq!(record.board.get(3, 2), Some(Stone::White));
        assert_eq!(record.board.count(Stone::Black), 1);
    }

    #[test]
    fn test_format_matches_file_shape() {
        let record = parse_input(SAMPLE).unwrap();
        assert_eq!(format_input(&record), SAMPLE);
    }

    #[test]
    fn test_parse_input_tolerates_crlf() {
        let record = parse_input(&SAMPLE.replace('\n', "\r\n")).unwrap();
        assert_eq!(record.stone, Stone::White);
    }

    #[test]
    fn test_bad_piece_type() {
        let text = SAMPLE.replacen('2', "3", 1);
        assert!(matches!(
            parse_input(&text),
            Err(InterchangeError::PieceType(s)) if s == "3"
        ));
        assert!(matches!(parse_input(""), Err(InterchangeError::PieceType(_))));
    }

    #[test]
    fn test_truncated_board() {
        let text: String = SAMPLE.lines().take(8).collect::<Vec<_>>().join("\n");
        assert!(matches!(
            parse_input(&text),
            Err(InterchangeError::Board(BoardParseError::RowCount { found: 2, .. }))
        ));
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_move("PASS\n", Stone::White), Some(Move::Pass(Stone::White)));
        assert_eq!(parse_move("pass", Stone::White), Some(Move::Pass(Stone::White)));
        assert_eq!(
            parse_move(" 2, 3 ", Stone::Black),
            Some(Move::Place {
                row: 2,
                col: 3,
                stone: Stone::Black
            })
        );
        assert_eq!(parse_move("2;3", Stone::Black), None);
        assert_eq!(parse_move("-1,3", Stone::Black), None);
        assert_eq!(parse_move("2", Stone::Black), None);
    }

    #[test]
    fn test_parse_move_ignores_extra_fields() {
        assert_eq!(
            parse_move("1,2,3", Stone::Black),
            Some(Move::Place {
                row: 1,
                col: 2,
                stone: Stone::Black
            })
        );
        assert_eq!(
            parse_move("4,0,", Stone::White),
            Some(Move::Place {
                row: 4,
                col: 0,
                stone: Stone::White
            })
        );
    }

    #[test]
    fn test_decision_with_extra_fields_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.txt");
        fs::write(&path, "3,1,9\n").unwrap();
        assert_eq!(
            read_decision(&path, Stone::Black).unwrap(),
            Move::Place {
                row: 3,
                col: 1,
                stone: Stone::Black
            }
        );
    }

    #[test]
    fn test_decision_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.txt");

        let mv = Move::Place {
            row: 1,
            col: 3,
            stone: Stone::Black,
        };
        write_decision(&path, &mv).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1,3");
        assert_eq!(read_decision(&path, Stone::Black).unwrap(), mv);

        write_decision(&path, &Move::Pass(Stone::Black)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "PASS");
        assert_eq!(
            read_decision(&path, Stone::Black).unwrap(),
            Move::Pass(Stone::Black)
        );
    }

    #[test]
    fn test_malformed_and_missing_decision() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.txt");
        assert!(matches!(
            read_decision(&path, Stone::White),
            Err(InterchangeError::Read { .. })
        ));
        fs::write(&path, "up").unwrap();
        assert!(matches!(
            read_decision(&path, Stone::White),
            Err(InterchangeError::Decision(s)) if s == "up"
        ));
    }

    #[test]
    fn test_input_file_roundtrip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        let record = parse_input(SAMPLE).unwrap();
        write_input(&path, &record).unwrap();
        assert_eq!(read_input(&path).unwrap(), record);
    }
}
