use pulldown_cmark::{html, Event, Options, Parser};

/// Render a post body to HTML. Line breaks inside paragraphs are kept.
pub fn render_html(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(content, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        _ => event,
    });

    let mut body_html = String::new();
    html::push_html(&mut body_html, parser);
    body_html
}
