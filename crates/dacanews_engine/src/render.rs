/// Turns a results fragment into something readable in a terminal.
pub trait FragmentRenderer: Send + Sync {
    fn to_markdown(&self, html: &str) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Html2MdRenderer;

impl FragmentRenderer for Html2MdRenderer {
    fn to_markdown(&self, html: &str) -> String {
        html2md::parse_html(html).trim().to_string()
    }
}
