//! Game page parsing.
//!
//! A game page holds up to three rounds:
//!
//! | Round | Markup | Required |
//! |-------|--------|----------|
//! | First | first `table.round` | yes |
//! | Second | second `table.round` | no |
//! | Final | `table.final_round` | no |
//!
//! Board rounds share one layout: a header row of `td.category` cells, then
//! one row per difficulty whose `td.clue` cells line up with the categories.
//! A clue cell holds a nested table with the clue in `td.clue_text` and the
//! response in `.correct_response`; a cell without that table was never
//! revealed and is skipped.
//!
//! Parsing never logs. Everything worth reporting comes back as
//! [`Notice`]s on the [`GameParse`].
//!
//! # Submodules
//!
//! - [`air_date`]: Broadcast date from the page title
//! - [`category`]: Category label normalization
//! - [`quality`]: Candidate clue filter
//! - [`record`]: Clue id and record construction
//! - [`index`]: Season list and season page link extraction

pub mod air_date;
pub mod category;
mod dom;
pub mod index;
pub mod quality;
pub mod record;

use crate::error::{ParseError, Result};
use crate::models::{BoardRound, CandidateClue, ClueSlot, GameId, GameParse, Notice};
use air_date::page_air_date;
use dom::{all_in_document, direct_rows, first_in, text_of};
use quality::quality_pass;
use record::build_clue;
use scraper::{ElementRef, Html};

/// Parse raw page markup.
pub fn parse_game_html(html: &str, game_id: impl Into<GameId>) -> Result<GameParse> {
    let document = Html::parse_document(html);
    parse_game(&document, game_id.into())
}

/// Parse an already-built document into the page's dated clues.
///
/// Clues come back in board order: first round row by row, then the second
/// round, then the final clue. Any structural problem aborts the page.
pub fn parse_game(document: &Html, game_id: GameId) -> Result<GameParse> {
    let air_date = page_air_date(document)?;
    let mut notices = Vec::new();

    let round_tables = all_in_document(document, "table.round")?;
    let first = round_tables
        .first()
        .copied()
        .ok_or(ParseError::MissingSection("first round table"))?;

    let mut candidates = parse_round(first, BoardRound::First, &game_id, &mut notices)?;

    match round_tables.get(1).copied() {
        Some(second) => candidates.extend(parse_round(second, BoardRound::Second, &game_id, &mut notices)?),
        None => notices.push(Notice::RoundAbsent {
            round: BoardRound::Second.number(),
        }),
    }

    candidates.extend(parse_final_round(document, &game_id, &mut notices)?);

    let clues = candidates
        .into_iter()
        .map(|candidate| candidate.dated(air_date))
        .collect();

    Ok(GameParse {
        game_id,
        air_date,
        clues,
        notices,
    })
}

/// Parse one board round and run its candidates through the quality filter.
fn parse_round(
    table: ElementRef<'_>,
    round: BoardRound,
    game_id: &GameId,
    notices: &mut Vec<Notice>,
) -> Result<Vec<CandidateClue>> {
    let category_sel = dom::selector("td.category")?;
    let categories: Vec<String> = table.select(&category_sel).map(text_of).collect();

    let mut candidates = Vec::new();
    // The first row is the category header.
    for (difficulty, row) in direct_rows(table).into_iter().skip(1).enumerate() {
        candidates.extend(parse_row(row, round, difficulty, &categories, game_id, notices)?);
    }

    Ok(quality_pass(candidates, notices))
}

fn parse_row(
    row: ElementRef<'_>,
    round: BoardRound,
    difficulty: usize,
    categories: &[String],
    game_id: &GameId,
    notices: &mut Vec<Notice>,
) -> Result<Vec<CandidateClue>> {
    let cell_sel = dom::selector("td.clue")?;
    let mut candidates = Vec::new();

    for (category_index, cell) in row.select(&cell_sel).enumerate() {
        let slot = ClueSlot::board(round, category_index, difficulty);

        let Some(clue_table) = first_in(cell, "table")? else {
            notices.push(Notice::EmptyCell { slot });
            continue;
        };

        let location = || {
            format!(
                "round {}, row {}, column {}",
                round.number(),
                difficulty,
                category_index
            )
        };
        let clue_text = first_in(clue_table, "td.clue_text")?.ok_or_else(|| ParseError::MalformedCell {
            location: location(),
            field: "clue text",
        })?;
        let solution = first_in(clue_table, ".correct_response")?.ok_or_else(|| ParseError::MalformedCell {
            location: location(),
            field: "correct response",
        })?;
        let category = categories
            .get(category_index)
            .filter(|name| !name.is_empty())
            .ok_or(ParseError::MissingCategory {
                round: round.number(),
                column: category_index,
            })?;

        candidates.push(build_clue(
            &text_of(clue_text),
            &text_of(solution),
            category,
            slot,
            None,
            game_id,
        ));
    }

    Ok(candidates)
}

/// Parse the final round block, if the page has one.
fn parse_final_round(document: &Html, game_id: &GameId, notices: &mut Vec<Notice>) -> Result<Vec<CandidateClue>> {
    let Some(final_table) = all_in_document(document, "table.final_round")?.into_iter().next() else {
        notices.push(Notice::RoundAbsent {
            round: ClueSlot::Final.round_number(),
        });
        return Ok(Vec::new());
    };

    let missing = |field| ParseError::MalformedCell {
        location: "final round".to_string(),
        field,
    };
    let category = first_in(final_table, ".category_name")?
        .map(text_of)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| missing("category name"))?;
    let clue_text = first_in(final_table, "#clue_FJ")?.ok_or_else(|| missing("clue text"))?;
    let solution = first_in(final_table, "em.correct_response")?.ok_or_else(|| missing("correct response"))?;

    let candidate = build_clue(
        &text_of(clue_text),
        &text_of(solution),
        &category,
        ClueSlot::Final,
        None,
        game_id,
    );

    Ok(quality_pass(vec![candidate], notices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rejection;
    use chrono::NaiveDate;

    const CATEGORIES: [&str; 6] = ["SCIENCE", "HISTORY", "ART", "SPORTS", "RIVERS", "WORDS"];

    fn clue_cell(text: &str, response: &str) -> String {
        format!(
            r#"<td class="clue"><table>
                 <tr><td class="clue_header">$200</td></tr>
                 <tr><td class="clue_text">{text}</td></tr>
                 <tr><td class="clue_text"><em class="correct_response">{response}</em></td></tr>
               </table></td>"#
        )
    }

    fn round_table(categories: &[&str], rows: &[Vec<String>]) -> String {
        let header: String = categories
            .iter()
            .map(|c| {
                format!(
                    r#"<td class="category"><table><tr><td class="category_name">{c}</td></tr></table></td>"#
                )
            })
            .collect();
        let body: String = rows
            .iter()
            .map(|cells| format!("<tr>{}</tr>", cells.concat()))
            .collect();
        format!(r#"<table class="round"><tr>{header}</tr>{body}</table>"#)
    }

    fn full_board(prefix: &str) -> Vec<Vec<String>> {
        (0..5)
            .map(|row| {
                (0..6)
                    .map(|col| clue_cell(&format!("{prefix} clue {row}-{col}"), &format!("answer {row}-{col}")))
                    .collect()
            })
            .collect()
    }

    const FINAL_ROUND: &str = r#"<table class="final_round">
        <tr><td class="category"><table><tr><td class="category_name">FAMOUS NAMES</td></tr></table></td></tr>
        <tr><td class="clue"><table>
            <tr><td id="clue_FJ" class="clue_text">He wrote "Hamlet"</td></tr>
            <tr><td><em class="correct_response">Shakespeare</em></td></tr>
        </table></td></tr>
    </table>"#;

    fn page(title: &str, body: &str) -> String {
        format!("<html><head><title>{title}</title></head><body>{body}</body></html>")
    }

    #[test]
    fn test_round_composition_without_second_round() {
        let html = page(
            "J! Archive - Show #4567, aired 2004-06-02",
            &format!("{}{}", round_table(&CATEGORIES, &full_board("J")), FINAL_ROUND),
        );
        let parsed = parse_game_html(&html, "4567").unwrap();

        let first: Vec<_> = parsed.clues.iter().filter(|c| c.round_number == 1).collect();
        assert_eq!(first.len(), 30);
        assert!(first.iter().all(|c| c.category_index <= 5));
        assert!(parsed.clues.iter().all(|c| c.round_number != 2));

        let finals: Vec<_> = parsed.clues.iter().filter(|c| c.round_number == 3).collect();
        assert_eq!(finals.len(), 1);
        assert_eq!(finals[0].category_index, 0);
        assert_eq!(finals[0].difficulty, 5);
        assert_eq!(finals[0].category, "FAMOUS NAMES");
        assert_eq!(finals[0].solution, "Shakespeare");
        assert_eq!(finals[0].id, "004567-3-0-5");

        assert!(parsed.notices.contains(&Notice::RoundAbsent { round: 2 }));
    }

    #[test]
    fn test_cells_map_to_columns_and_rows() {
        let html = page(
            "aired 2004-06-02",
            &round_table(&CATEGORIES, &full_board("J")),
        );
        let parsed = parse_game_html(&html, "12").unwrap();

        let clue = parsed.clues.iter().find(|c| c.id == "000012-1-4-2").unwrap();
        assert_eq!(clue.clue_text, "J clue 2-4");
        assert_eq!(clue.solution, "answer 2-4");
        assert_eq!(clue.category, "RIVERS");
        assert_eq!(clue.difficulty, 2);
        // Row-major board order.
        assert_eq!(parsed.clues[0].id, "000012-1-0-0");
        assert_eq!(parsed.clues[1].id, "000012-1-1-0");
        assert_eq!(parsed.clues[6].id, "000012-1-0-1");
    }

    #[test]
    fn test_second_round_follows_first() {
        let html = page(
            "aired 2010-01-05",
            &format!(
                "{}{}{}",
                round_table(&CATEGORIES, &full_board("J")),
                round_table(&CATEGORIES, &full_board("DJ")),
                FINAL_ROUND
            ),
        );
        let parsed = parse_game_html(&html, "6000").unwrap();

        assert_eq!(parsed.clues.len(), 61);
        let rounds: Vec<u8> = parsed.clues.iter().map(|c| c.round_number).collect();
        assert!(rounds.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(parsed.clues[30].clue_text, "DJ clue 0-0");
        assert_eq!(parsed.clues[30].id, "006000-2-0-0");
    }

    #[test]
    fn test_air_date_stamped_on_every_clue() {
        let html = page(
            "Show #1, aired 1984-09-10",
            &format!("{}{}", round_table(&CATEGORIES, &full_board("J")), FINAL_ROUND),
        );
        let parsed = parse_game_html(&html, "1").unwrap();
        let expected = NaiveDate::from_ymd_opt(1984, 9, 10).unwrap();

        assert_eq!(parsed.air_date, expected);
        assert!(parsed.clues.iter().all(|c| c.air_date == expected));
    }

    #[test]
    fn test_unrevealed_cells_are_skipped() {
        let mut board = full_board("J");
        board[4][5] = r#"<td class="clue"></td>"#.to_string();
        board[0][0] = r#"<td class="clue"> </td>"#.to_string();
        let html = page("aired 2004-06-02", &round_table(&CATEGORIES, &board));

        let parsed = parse_game_html(&html, "3").unwrap();
        assert_eq!(parsed.clues.len(), 28);
        assert!(parsed.notices.contains(&Notice::EmptyCell {
            slot: ClueSlot::board(BoardRound::First, 5, 4)
        }));
        assert!(parsed.clues.iter().all(|c| c.id != "000003-1-0-0"));
    }

    #[test]
    fn test_filtered_clues_dropped_and_categories_normalized() {
        let mut board = full_board("J");
        board[1][2] = clue_cell("=", "nothing");
        board[3][0] = clue_cell("(Kelly reports from the field.) This landmark", "the Alamo");
        let categories = [
            "SCIENCE (submitted by: J. Smith) redux",
            "HISTORY",
            "ART",
            "SPORTS",
            "RIVERS",
            "WORDS",
        ];
        let html = page("aired 2004-06-02", &round_table(&categories, &board));

        let parsed = parse_game_html(&html, "9").unwrap();
        assert_eq!(parsed.clues.len(), 28);
        assert!(parsed.notices.contains(&Notice::Rejected {
            id: "000009-1-2-1".to_string(),
            reason: Rejection::Placeholder
        }));
        assert!(parsed.notices.contains(&Notice::Rejected {
            id: "000009-1-0-3".to_string(),
            reason: Rejection::Preamble
        }));
        assert!(parsed
            .clues
            .iter()
            .filter(|c| c.category_index == 0)
            .all(|c| c.category == "SCIENCE [submitted by: J. Smith] redux"));
    }

    #[test]
    fn test_reparse_gives_identical_ids() {
        let html = page(
            "aired 2004-06-02",
            &format!("{}{}", round_table(&CATEGORIES, &full_board("J")), FINAL_ROUND),
        );
        let a: Vec<_> = parse_game_html(&html, "77").unwrap().clues.into_iter().map(|c| c.id).collect();
        let b: Vec<_> = parse_game_html(&html, "77").unwrap().clues.into_iter().map(|c| c.id).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_first_round_is_fatal() {
        let html = page("aired 2004-06-02", FINAL_ROUND);
        assert_eq!(
            parse_game_html(&html, "1").unwrap_err(),
            ParseError::MissingSection("first round table")
        );
    }

    #[test]
    fn test_missing_air_date_is_fatal() {
        let html = page("Show #1", &round_table(&CATEGORIES, &full_board("J")));
        assert!(matches!(
            parse_game_html(&html, "1"),
            Err(ParseError::MissingAirDate(_))
        ));
    }

    #[test]
    fn test_cell_without_response_is_fatal() {
        let mut board = full_board("J");
        board[2][1] = r#"<td class="clue"><table><tr><td class="clue_text">Only a clue</td></tr></table></td>"#.to_string();
        let html = page("aired 2004-06-02", &round_table(&CATEGORIES, &board));

        assert_eq!(
            parse_game_html(&html, "1").unwrap_err(),
            ParseError::MalformedCell {
                location: "round 1, row 2, column 1".to_string(),
                field: "correct response",
            }
        );
    }

    #[test]
    fn test_cell_beyond_categories_is_fatal() {
        let html = page("aired 2004-06-02", &round_table(&CATEGORIES[..5], &full_board("J")));
        assert_eq!(
            parse_game_html(&html, "1").unwrap_err(),
            ParseError::MissingCategory { round: 1, column: 5 }
        );
    }

    #[test]
    fn test_blank_category_is_fatal() {
        let mut categories = CATEGORIES;
        categories[2] = "  ";
        let html = page("aired 2004-06-02", &round_table(&categories, &full_board("J")));
        assert_eq!(
            parse_game_html(&html, "1").unwrap_err(),
            ParseError::MissingCategory { round: 1, column: 2 }
        );
    }

    #[test]
    fn test_incomplete_final_round_is_fatal() {
        let broken_final = r#"<table class="final_round"><tr><td class="category_name">X</td></tr></table>"#;
        let html = page(
            "aired 2004-06-02",
            &format!("{}{}", round_table(&CATEGORIES, &full_board("J")), broken_final),
        );
        assert!(matches!(
            parse_game_html(&html, "1"),
            Err(ParseError::MalformedCell { field: "clue text", .. })
        ));
    }
}
