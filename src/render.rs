//! Notebook to HTML rendering
//!
//! This module renders a parsed notebook into a single self-contained HTML
//! document. Markdown cells go through `pulldown-cmark`; code cells render into
//! the classic `input / inner_cell / input_area` structure so that styling (in
//! particular the copy-guard rule) can target the code input areas by class.
//! Rich outputs are inlined: images become `data:` URIs, so no auxiliary files
//! are produced next to the HTML artifact.

use pulldown_cmark::escape::escape_html;
use pulldown_cmark::{Options, Parser, html};
use regex::Regex;
use serde_json::Value;

use crate::errors::AppError;
use crate::notebook::{Cell, CodeCell, Notebook, TextCell};

/// Base stylesheet for the rendered document
const BASE_CSS: &str = "\
body { font-family: sans-serif; max-width: 60em; margin: 0 auto; padding: 1em; }
.cell { margin: 0.5em 0; }
.input { display: flex; }
.prompt { min-width: 6em; color: #303f9f; font-family: monospace; padding: 0.4em 0.2em; text-align: right; }
.input_area { flex: 1; border: 1px solid #cfcfcf; border-radius: 2px; background: #f7f7f7; }
.input_area pre { margin: 0; padding: 0.4em; font-family: monospace; overflow-x: auto; }
.output_area pre { margin: 0; padding: 0.4em 0.4em 0.4em 6.4em; font-family: monospace; overflow-x: auto; }
.output_error pre { color: #b71c1c; }
.output_png img { max-width: 100%; padding-left: 6em; }
.text_cell_render { padding: 0.2em; }
";

/// Render `notebook` into a complete HTML document titled `title`
pub fn render_html(notebook: &Notebook, title: &str) -> Result<String, AppError> {
    let mut body = String::new();
    for cell in &notebook.cells {
        match cell {
            Cell::Code(code) => render_code_cell(code, &mut body)?,
            Cell::Markdown(text) => render_markdown_cell(text, &mut body),
            Cell::Raw(text) => render_raw_cell(text, &mut body)?,
        }
    }

    let mut escaped_title = String::new();
    escape_html(&mut escaped_title, title)?;

    Ok(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\"/>\n\
         <title>{escaped_title}</title>\n\
         <style type=\"text/css\">\n{BASE_CSS}</style>\n\
         </head>\n<body>\n{body}</body>\n</html>\n"
    ))
}

/// Render a code cell: prompt, input area, and any recorded outputs
fn render_code_cell(cell: &CodeCell, body: &mut String) -> Result<(), AppError> {
    let prompt = match cell.execution_count {
        Some(count) => format!("In&nbsp;[{count}]:"),
        None => "In&nbsp;[&nbsp;]:".to_string(),
    };

    body.push_str("<div class=\"cell border-box-sizing code_cell rendered\">\n");
    body.push_str("<div class=\"input\">\n");
    body.push_str(&format!("<div class=\"prompt input_prompt\">{prompt}</div>\n"));
    body.push_str("<div class=\"inner_cell\">\n<div class=\"input_area\">\n<pre>");
    escape_html(&mut *body, &cell.source)?;
    body.push_str("</pre>\n</div>\n</div>\n</div>\n");

    if !cell.outputs.is_empty() {
        body.push_str("<div class=\"output_wrapper\">\n<div class=\"output\">\n");
        for output in &cell.outputs {
            render_output(output, body)?;
        }
        body.push_str("</div>\n</div>\n");
    }

    body.push_str("</div>\n");
    Ok(())
}

/// Render a markdown cell through pulldown-cmark
fn render_markdown_cell(cell: &TextCell, body: &mut String) {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(&cell.source, options);

    body.push_str("<div class=\"cell border-box-sizing text_cell rendered\">\n");
    body.push_str("<div class=\"inner_cell\">\n<div class=\"text_cell_render\">\n");
    html::push_html(body, parser);
    body.push_str("</div>\n</div>\n</div>\n");
}

/// Render a raw cell as preformatted text
fn render_raw_cell(cell: &TextCell, body: &mut String) -> Result<(), AppError> {
    body.push_str("<div class=\"cell border-box-sizing raw_cell rendered\">\n<pre>");
    escape_html(&mut *body, &cell.source)?;
    body.push_str("</pre>\n</div>\n");
    Ok(())
}

/// Render a single recorded output
///
/// Unknown output types are skipped rather than failing the export.
fn render_output(output: &Value, body: &mut String) -> Result<(), AppError> {
    match output.get("output_type").and_then(Value::as_str) {
        Some("stream") => {
            let class = match output.get("name").and_then(Value::as_str) {
                Some("stderr") => "output_stderr",
                _ => "output_stdout",
            };
            body.push_str(&format!(
                "<div class=\"output_area output_stream {class}\">\n<pre>"
            ));
            escape_html(&mut *body, &json_text(output.get("text")))?;
            body.push_str("</pre>\n</div>\n");
        }
        Some("execute_result") | Some("display_data") => {
            render_rich_output(output.get("data"), body)?;
        }
        Some("error") => {
            let traceback = output
                .get("traceback")
                .and_then(Value::as_array)
                .map(|lines| {
                    lines
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join("\n")
                })
                .unwrap_or_default();
            body.push_str("<div class=\"output_area output_error\">\n<pre>");
            escape_html(&mut *body, &strip_ansi(&traceback)?)?;
            body.push_str("</pre>\n</div>\n");
        }
        _ => {}
    }
    Ok(())
}

/// Render the richest representation available in a mime bundle
fn render_rich_output(data: Option<&Value>, body: &mut String) -> Result<(), AppError> {
    let Some(data) = data else {
        return Ok(());
    };

    if let Some(png) = data.get("image/png") {
        let encoded: String = json_text(Some(png))
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        body.push_str(&format!(
            "<div class=\"output_area output_png\">\n\
             <img src=\"data:image/png;base64,{encoded}\"/>\n</div>\n"
        ));
    } else if let Some(html_data) = data.get("text/html") {
        body.push_str("<div class=\"output_area output_html\">\n");
        body.push_str(&json_text(Some(html_data)));
        body.push_str("</div>\n");
    } else if let Some(text) = data.get("text/plain") {
        body.push_str("<div class=\"output_area output_text\">\n<pre>");
        escape_html(&mut *body, &json_text(Some(text)))?;
        body.push_str("</pre>\n</div>\n");
    }

    Ok(())
}

/// Join a JSON text field that is either a string or a list of lines
fn json_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(lines)) => lines
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .concat(),
        _ => String::new(),
    }
}

/// Remove ANSI color escape sequences from error tracebacks
fn strip_ansi(text: &str) -> Result<String, AppError> {
    let regex = Regex::new(r"\x1b\[[0-9;]*m")?;
    Ok(regex.replace_all(text, "").into_owned())
}
