use std::fmt::Write;

use dacanews_core::{
    NavLinkView, WidgetViewModel, HAMBURGER_ACTIVE_CLASS, MOBILE_NAV_HIDDEN_CLASS,
};
use dacanews_engine::FragmentRenderer;

pub fn render(view: &WidgetViewModel, renderer: &dyn FragmentRenderer) -> String {
    let mut out = String::new();

    let menu = if view.hamburger_active {
        HAMBURGER_ACTIVE_CLASS
    } else {
        "closed"
    };
    let panel = if view.mobile_nav_hidden {
        MOBILE_NAV_HIDDEN_CLASS
    } else {
        "shown"
    };
    let _ = writeln!(
        out,
        "page {} | menu: {menu} | mobile nav: {panel}",
        view.path.as_deref().unwrap_or("?")
    );

    render_nav(&mut out, "main nav", &view.main_nav, NavLinkView::main_classes);
    render_nav(&mut out, "mobile nav", &view.mobile_nav, NavLinkView::mobile_classes);

    match &view.search_query {
        Some(query) => {
            let _ = writeln!(out, "search: [{query}]");
        }
        None => out.push_str("search: (not on this page)\n"),
    }

    if !view.sources.is_empty() {
        let sources = view
            .sources
            .iter()
            .map(|source| {
                if source.selected {
                    format!("[x] {}", source.name)
                } else {
                    format!("[ ] {}", source.name)
                }
            })
            .collect::<Vec<_>>();
        let _ = writeln!(out, "sources: {}", sources.join("  "));
    }

    let mut sections = Vec::new();
    if view.featured_articles_visible {
        sections.push("featured articles");
    }
    if view.recent_articles_visible {
        sections.push("recent articles");
    }
    if !sections.is_empty() {
        let _ = writeln!(out, "showing: {}", sections.join(", "));
    }

    if let Some(request_id) = view.pending_request {
        let _ = writeln!(out, "loading... (request {request_id})");
    }

    if let Some(fragment) = &view.results_fragment {
        out.push_str("--- results ---\n");
        let text = renderer.to_markdown(fragment);
        if text.is_empty() {
            out.push_str("(no results)\n");
        } else {
            out.push_str(&text);
            out.push('\n');
        }
    }

    for (index, url) in view.pagination_urls.iter().enumerate() {
        let _ = writeln!(out, "  page {}: {url}", index + 1);
    }

    if let Some(alert) = &view.alert {
        let _ = writeln!(out, "!! {alert} (type `dismiss`)");
    }

    out
}

fn render_nav(
    out: &mut String,
    label: &str,
    links: &[NavLinkView],
    classes: fn(&NavLinkView) -> &'static [&'static str],
) {
    if links.is_empty() {
        return;
    }
    let items = links
        .iter()
        .map(|link| {
            let link_classes = classes(link);
            if link.active {
                format!("*{}*", link.href)
            } else if link_classes.is_empty() {
                link.href.clone()
            } else {
                format!("{} ({})", link.href, link_classes.join(" "))
            }
        })
        .collect::<Vec<_>>();
    let _ = writeln!(out, "{label}: {}", items.join("  "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use dacanews_core::SourceButtonView;

    struct PlainText;
    impl FragmentRenderer for PlainText {
        fn to_markdown(&self, html: &str) -> String {
            html.replace("<p>", "").replace("</p>", "")
        }
    }

    fn link(href: &str, active: bool) -> NavLinkView {
        NavLinkView {
            href: href.to_string(),
            active,
        }
    }

    #[test]
    fn active_links_and_selected_sources_are_marked() {
        let view = WidgetViewModel {
            path: Some("/archive/".into()),
            mobile_nav_hidden: true,
            main_nav: vec![link("/", false), link("/archive/", true)],
            mobile_nav: vec![link("/", false), link("/archive/", true)],
            search_query: Some("daca".into()),
            sources: vec![
                SourceButtonView {
                    name: "BBC".into(),
                    selected: true,
                },
                SourceButtonView {
                    name: "CNN".into(),
                    selected: false,
                },
            ],
            ..WidgetViewModel::default()
        };

        let text = render(&view, &PlainText);
        assert!(text.contains("page /archive/ | menu: closed | mobile nav: hidden"));
        assert!(text.contains("main nav: /  */archive/*"));
        assert!(text.contains("mobile nav: / (text-gray-700)  */archive/*"));
        assert!(text.contains("search: [daca]"));
        assert!(text.contains("sources: [x] BBC  [ ] CNN"));
        assert!(!text.contains("--- results ---"));
    }

    #[test]
    fn results_pages_and_alert_are_listed() {
        let view = WidgetViewModel {
            results_fragment: Some("<p>ruling upheld</p>".into()),
            pagination_urls: vec!["search/?q=&page=2".into()],
            alert: Some("Cannot request x, got 500".into()),
            pending_request: Some(3),
            ..WidgetViewModel::default()
        };

        let text = render(&view, &PlainText);
        assert!(text.contains("search: (not on this page)"));
        assert!(text.contains("loading... (request 3)"));
        assert!(text.contains("--- results ---\nruling upheld\n"));
        assert!(text.contains("  page 1: search/?q=&page=2"));
        assert!(text.contains("!! Cannot request x, got 500 (type `dismiss`)"));
        assert!(!text.contains("showing:"));
    }
}
