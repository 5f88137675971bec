//! Small helpers over `scraper`'s document tree.

use crate::error::{ParseError, Result};
use scraper::{ElementRef, Html, Selector};

pub(crate) fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ParseError::Selector {
        css,
        reason: e.to_string(),
    })
}

/// All text under `element`, concatenated and trimmed.
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

pub(crate) fn first_in<'a>(element: ElementRef<'a>, css: &'static str) -> Result<Option<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(element.select(&sel).next())
}

pub(crate) fn all_in_document<'a>(document: &'a Html, css: &'static str) -> Result<Vec<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(document.select(&sel).collect())
}

/// Rows belonging to `table` itself, not to tables nested in its cells.
///
/// The HTML parser wraps bare rows in an implied `<tbody>`, so rows are
/// collected from the table and from its row-group children.
pub(crate) fn direct_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut rows = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => rows.extend(
                child
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|el| el.value().name() == "tr"),
            ),
            _ => {}
        }
    }
    rows
}
