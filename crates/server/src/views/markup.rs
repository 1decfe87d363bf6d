//! Frame HTML: an otherwise empty document whose meta tags describe the
//! image, the buttons and the post-back target.

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::{ButtonAction, View, ViewContext};
use crate::frame::FrameState;

const TITLE: &str = "Check Interactions with Warpcast";

/// Render `view` as a frame document.
pub fn render_frame(view: View, context: &ViewContext) -> String {
    let image_url = context.image_url(view);
    let buttons = view.buttons(context);
    let state = FrameState::from_buttons(&buttons);

    let mut tags: Vec<(String, String)> = vec![
        ("fc:frame".into(), "vNext".into()),
        ("fc:frame:image".into(), image_url.to_string()),
        ("fc:frame:image:aspect_ratio".into(), "1.91:1".into()),
        ("og:image".into(), image_url.to_string()),
        ("og:title".into(), TITLE.into()),
        ("fc:frame:post_url".into(), context.post_url.to_string()),
        ("fc:frame:state".into(), state.encode()),
    ];

    for (i, button) in buttons.iter().enumerate() {
        let n = i + 1;
        tags.push((format!("fc:frame:button:{}", n), button.label.clone()));
        match &button.action {
            ButtonAction::Post { .. } => {
                tags.push((format!("fc:frame:button:{}:action", n), "post".into()));
            }
            ButtonAction::Link { target } => {
                tags.push((format!("fc:frame:button:{}:action", n), "link".into()));
                tags.push((format!("fc:frame:button:{}:target", n), target.to_string()));
            }
        }
    }

    let mut html = String::from("<!DOCTYPE html><html><head><meta charset=\"utf-8\"/>");
    html.push_str(&format!("<title>{}</title>", encode_text(TITLE)));
    for (property, content) in &tags {
        html.push_str(&format!(
            "<meta property=\"{}\" content=\"{}\"/>",
            encode_double_quoted_attribute(property),
            encode_double_quoted_attribute(content)
        ));
    }
    html.push_str("</head><body>");
    html.push_str(&format!(
        "<img src=\"{}\" alt=\"{}\"/>",
        encode_double_quoted_attribute(image_url.as_str()),
        encode_double_quoted_attribute(&view.message(context))
    ));
    html.push_str("</body></html>");
    html
}
