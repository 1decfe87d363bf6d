//! Development preview page: every view's image and frame markup on one page.

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::{View, ViewContext, render_frame};

pub fn render_preview(context: &ViewContext) -> String {
    let mut html = String::from(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"/><title>Frame preview</title>\
         <style>body{font-family:sans-serif;background:#111;color:#eee;margin:2rem}\
         section{margin-bottom:3rem}img{width:600px;border:1px solid #333}\
         pre{white-space:pre-wrap;background:#222;padding:1rem;font-size:12px}</style>\
         </head><body><h1>Frame preview</h1>",
    );

    html.push_str(&format!(
        "<p>Requirements: {}</p>",
        encode_text(&super::join_verbs(&context.requirements))
    ));

    for view in View::ALL {
        let buttons: Vec<String> = view
            .buttons(context)
            .iter()
            .map(|b| b.label.clone())
            .collect();
        html.push_str(&format!(
            "<section><h2>{}</h2><img src=\"{}\" alt=\"{}\"/><p>Buttons: {}</p><pre>{}</pre></section>",
            encode_text(view.name()),
            encode_double_quoted_attribute(context.image_url(view).as_str()),
            encode_double_quoted_attribute(&view.message(context)),
            encode_text(&if buttons.is_empty() {
                "none".to_string()
            } else {
                buttons.join(" | ")
            }),
            encode_text(&render_frame(view, context))
        ));
    }

    html.push_str("</body></html>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::tests::context;
    use qualification::RequirementKind;

    #[test]
    fn test_preview_lists_every_view() {
        let html = render_preview(&context(vec![RequirementKind::Like, RequirementKind::Recast]));

        for view in View::ALL {
            assert!(html.contains(&format!("<h2>{}</h2>", view.name())));
        }
        // Frame markup is shown escaped, not interpreted
        assert!(html.contains("&lt;meta property="));
        assert!(html.contains("Requirements: like and recast"));
    }
}
