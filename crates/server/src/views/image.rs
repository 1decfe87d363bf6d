//! SVG images for each view.
//!
//! 1200×630 (1.91:1) canvas. Centred white text at size 60 on a
//! left-to-right #432889 → #17101F gradient, or on black for error views.

use html_escape::encode_text;

use super::{View, ViewContext};

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 630;
const FONT_SIZE: u32 = 60;
/// Rough glyph budget per line at FONT_SIZE with 120px side padding
const MAX_LINE_CHARS: usize = 28;

/// Render the image for `view` as a standalone SVG document.
pub fn render_image(view: View, context: &ViewContext) -> String {
    let message = view.message(context);
    let lines = wrap(&message, MAX_LINE_CHARS);

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = WIDTH,
        h = HEIGHT
    );

    if view.is_error() {
        // Error cards: no gradient
        svg.push_str(&format!(
            "<rect width=\"{}\" height=\"{}\" fill=\"#000000\"/>",
            WIDTH, HEIGHT
        ));
    } else {
        svg.push_str(
            "<defs><linearGradient id=\"bg\" x1=\"0\" y1=\"0\" x2=\"1\" y2=\"0\">\
             <stop offset=\"0%\" stop-color=\"#432889\"/>\
             <stop offset=\"100%\" stop-color=\"#17101F\"/>\
             </linearGradient></defs>",
        );
        svg.push_str(&format!(
            "<rect width=\"{}\" height=\"{}\" fill=\"url(#bg)\"/>",
            WIDTH, HEIGHT
        ));
    }

    // Centre the block of lines vertically, nudged down a little
    let line_height = FONT_SIZE + 12;
    let block_height = line_height * lines.len() as u32;
    let first_baseline = (HEIGHT.saturating_sub(block_height)) / 2 + FONT_SIZE + 15;

    svg.push_str(&format!(
        "<text x=\"{}\" text-anchor=\"middle\" fill=\"#ffffff\" font-family=\"sans-serif\" font-size=\"{}\">",
        WIDTH / 2,
        FONT_SIZE
    ));
    for (i, line) in lines.iter().enumerate() {
        svg.push_str(&format!(
            "<tspan x=\"{}\" y=\"{}\">{}</tspan>",
            WIDTH / 2,
            first_baseline + line_height * i as u32,
            encode_text(line)
        ));
    }
    svg.push_str("</text></svg>");
    svg
}

/// Greedy word wrap; a single word longer than `width` gets its own line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
