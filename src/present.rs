//! Instructor-facing HTML export
//!
//! This module produces the solutions document: the full notebook (solution
//! code included) rendered to HTML, with the bare `#<keep>` / `#</keep>`
//! marker lines stripped from code cells and a copy-guard style injected into
//! the document head. The style disables text selection and the platform copy
//! callout on code input areas. It is a deterrent against casual copy-paste,
//! not a security control.

use markup5ever::{
    Attribute, LocalName, QualName,
    interface::{NodeOrText, TreeSink},
    tendril::StrTendril,
};
use scraper::{Html, HtmlTreeSink, Selector};

use crate::errors::AppError;
use crate::markers::strip_marker_lines;
use crate::notebook::{Cell, Notebook};
use crate::render::render_html;

/// Style rule that makes code input areas non-selectable
const COPY_GUARD_CSS: &str = ".input .inner_cell .input_area pre {
        -webkit-touch-callout: none;
        -webkit-user-select: none;
        -khtml-user-select: none;
        -moz-user-select: none;
        -ms-user-select: none;
        user-select: none;
    }";

/// Render the instructor copy of `notebook` as a self-contained HTML document
///
/// The input is not mutated; marker stripping happens on an independent copy.
/// Outputs, execution counts, tags and non-code cells are rendered exactly as
/// authored.
pub fn present(notebook: &Notebook, title: &str) -> Result<String, AppError> {
    let mut presented = notebook.clone();

    // remove '#<keep>' and '#</keep>' lines, keep the solutions between them
    for cell in &mut presented.cells {
        if let Cell::Code(code) = cell {
            code.source = strip_marker_lines(&code.source)?;
        }
    }

    let html = render_html(&presented, title)?;
    inject_copy_guard(&html, title)
}

/// Inject the copy-guard `<style>` element into the document head
///
/// If the document has no `head` element an error is returned; the renderer
/// always produces one, so this only fires on malformed collaborator output.
fn inject_copy_guard(content: &str, name: &str) -> Result<String, AppError> {
    let html = Html::parse_document(content);
    let tree_sink = HtmlTreeSink::new(html);

    let head_selector = Selector::parse("head").unwrap();
    let head_id = {
        let html_ref = tree_sink.0.borrow();
        html_ref
            .select(&head_selector)
            .next()
            .map(|elem| elem.id())
            .ok_or_else(|| AppError::HtmlParsingError {
                file: name.to_string(),
                reason: "Could not find head element".to_string(),
            })
    }?;

    let style_id = {
        let style_name = QualName::new(None, Default::default(), LocalName::from("style"));
        let attrs = vec![Attribute {
            name: QualName::new(None, Default::default(), LocalName::from("type")),
            value: StrTendril::from("text/css"),
        }];
        tree_sink.create_element(style_name, attrs, Default::default())
    };

    tree_sink.append(
        &style_id,
        NodeOrText::AppendText(StrTendril::from(COPY_GUARD_CSS)),
    );
    tree_sink.append(&head_id, NodeOrText::AppendNode(style_id));

    let modified_html = tree_sink.0.into_inner();
    Ok(modified_html.html())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notebook::{CellMetadata, CodeCell, TextCell};
    use serde_json::json;

    fn solution_notebook() -> Notebook {
        Notebook {
            cells: vec![
                Cell::Markdown(TextCell {
                    source: "# Exercise\n".to_string(),
                    metadata: CellMetadata::default(),
                    extra: Default::default(),
                }),
                Cell::Code(CodeCell {
                    source: "#<keep>\nSECRET\n#</keep>\n".to_string(),
                    metadata: CellMetadata {
                        tags: ["keep".to_string()].into_iter().collect(),
                        extra: Default::default(),
                    },
                    execution_count: Some(5),
                    outputs: vec![json!({
                        "output_type": "stream",
                        "name": "stdout",
                        "text": "answer\n"
                    })],
                    extra: Default::default(),
                }),
            ],
            metadata: json!({}),
            nbformat: 4,
            nbformat_minor: 5,
        }
    }

    #[test]
    fn test_present_keeps_solutions_and_strips_markers() {
        let html = present(&solution_notebook(), "lecture1").unwrap();
        assert!(html.contains("SECRET"));
        assert!(!html.contains("keep&gt;"));
        assert!(!html.contains("#<keep>"));
    }

    #[test]
    fn test_present_injects_copy_guard_into_head() {
        let html = present(&solution_notebook(), "lecture1").unwrap();

        let head_end = html.find("</head>").unwrap();
        let style_pos = html
            .find(".input .inner_cell .input_area pre")
            .unwrap();
        assert!(style_pos < head_end);
        assert!(html.contains("user-select: none"));
        assert_eq!(html.matches("-webkit-touch-callout").count(), 1);
    }

    #[test]
    fn test_present_renders_outputs_and_execution_count() {
        let html = present(&solution_notebook(), "lecture1").unwrap();
        assert!(html.contains("In&nbsp;[5]:"));
        assert!(html.contains("answer"));
    }

    #[test]
    fn test_present_does_not_mutate_input() {
        let notebook = solution_notebook();
        let _ = present(&notebook, "lecture1").unwrap();

        assert_eq!(notebook.cells[1].source(), "#<keep>\nSECRET\n#</keep>\n");
        assert!(notebook.cells[1].metadata().tags.contains("keep"));
    }

    #[test]
    fn test_present_and_redact_are_independent() {
        let notebook = solution_notebook();

        let redacted_before = crate::redact::redact(&notebook).unwrap();
        let _ = present(&notebook, "lecture1").unwrap();
        let redacted_after = crate::redact::redact(&notebook).unwrap();

        assert_eq!(
            redacted_before.to_json_string().unwrap(),
            redacted_after.to_json_string().unwrap()
        );
    }
}
