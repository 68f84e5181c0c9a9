use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use dacanews_core::{Msg, Origin, SearchWidget};
use dacanews_engine::{EngineHandle, Html2MdRenderer, PageDocument};
use dacanews_logging::{parse_level, widget_info, widget_warn, LogDestination};
use url::Url;

use super::config::WidgetConfig;
use super::effects::EffectRunner;
use super::ui::commands::{self, Command, HELP};
use super::ui::render::render;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Parser, Debug)]
#[command(
    name = "dacanews",
    about = "Drive the dacanews search widget from a terminal",
    version
)]
pub struct Cli {
    /// Page to bind the widget to; overrides `page_url` from the config file.
    #[arg(long)]
    url: Option<String>,

    /// RON config file. Defaults to ./dacanews.ron when it exists.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where logs go: terminal, file or both.
    #[arg(long)]
    log: Option<LogDestination>,

    /// Log level: error, warn, info, debug or trace.
    #[arg(long)]
    log_level: Option<String>,

    /// Print the widget view as JSON instead of text.
    #[arg(long)]
    json: bool,
}

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let (mut config, config_source) = WidgetConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.page_url = Some(url);
    }
    if let Some(destination) = cli.log {
        config.log_destination = destination;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    dacanews_logging::initialize(
        config.log_destination,
        parse_level(&config.log_level),
        config.log_file.as_deref(),
    );
    match &config_source {
        Some(path) => widget_info!("loaded config from {:?}", path),
        None => widget_info!("no config file, using defaults"),
    }

    let page_url = config
        .page_url
        .clone()
        .context("no page to load: pass --url or set page_url in the config file")?;
    let origin = Origin::parse(&page_url)?;

    let runner = EffectRunner::new(EngineHandle::new(config.fetch_settings()));
    let page = runner
        .engine()
        .load_page(page_url.as_str())
        .with_context(|| format!("loading {page_url}"))?;
    let path = Url::parse(&page.metadata.final_url)
        .map(|url| url.path().to_string())
        .unwrap_or_else(|_| "/".to_string());

    let document = PageDocument::parse(&page.html);
    let layout = document.layout()?;
    widget_info!(
        "bound to {} ({} sources, search input: {})",
        path,
        layout.source_buttons.len(),
        layout.search_input.is_some()
    );
    let widget = SearchWidget::load(origin, layout, &path);

    let mut session = Session::new(widget, document, runner, cli.json);
    session.render();
    println!("type `help` for commands");

    let lines = spawn_stdin_reader();
    let mut input_open = true;
    loop {
        while let Some(msg) = session.runner.poll() {
            session.dispatch(msg);
        }
        if !input_open {
            // Input is exhausted; stay only until the last request settles.
            if session.widget.view().pending_request.is_none() {
                break;
            }
            thread::sleep(POLL_INTERVAL);
            continue;
        }
        match lines.recv_timeout(POLL_INTERVAL) {
            Ok(line) => {
                if session.handle_line(&line) == Flow::Quit {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => input_open = false,
        }
    }

    Ok(())
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Session {
    widget: SearchWidget,
    document: PageDocument,
    runner: EffectRunner,
    renderer: Html2MdRenderer,
    json: bool,
}

impl Session {
    fn new(widget: SearchWidget, document: PageDocument, runner: EffectRunner, json: bool) -> Self {
        Self {
            widget,
            document,
            runner,
            renderer: Html2MdRenderer,
            json,
        }
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        match commands::parse(line) {
            Command::Event(msg) => {
                self.dispatch(msg);
            }
            Command::Page(n) => {
                let target = self.widget.view().pagination_urls.get(n - 1).cloned();
                match target {
                    Some(pagination_url) => {
                        self.dispatch(Msg::PaginationClicked { pagination_url });
                    }
                    None => eprintln!("no page link {n}"),
                }
            }
            Command::Show => self.render(),
            Command::Html => println!("{}", self.document.html()),
            Command::Help => println!("{HELP}"),
            Command::Quit => return Flow::Quit,
            Command::Empty => {}
            Command::Invalid(reason) => eprintln!("{reason}"),
        }
        Flow::Continue
    }

    /// Feeds one message through the widget and returns the alerts it raised.
    fn dispatch(&mut self, msg: Msg) -> Vec<String> {
        let effects = self.widget.dispatch(msg);
        let alerts = self.runner.enqueue(effects);
        for alert in &alerts {
            eprintln!("ALERT: {alert}");
        }
        if self.widget.consume_dirty() {
            if let Err(err) = self.document.apply_view(&self.widget.view()) {
                widget_warn!("cannot update page document: {}", err);
            }
            self.render();
        }
        alerts
    }

    fn render(&self) {
        let view = self.widget.view();
        if self.json {
            match serde_json::to_string_pretty(&view) {
                Ok(text) => println!("{text}"),
                Err(err) => widget_warn!("cannot serialize view: {}", err),
            }
        } else {
            print!("{}", render(&view, &self.renderer));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Instant;

    use super::*;
    use dacanews_engine::{FailureKind, FetchError, FetchMetadata, FetchOutput, Fetcher};
    use pretty_assertions::assert_eq;

    const INDEX: &str = r#"<!DOCTYPE html>
<html><body>
<button id="hamburger"></button>
<nav id="sm-nav" class="hidden"><a href="/">Home</a></nav>
<input id="dacanews-search" value="">
<button id="search-icon">go</button>
<section id="featured-articles"><article>lead story</article></section>
<section id="recent-articles"><article>recent story</article></section>
<div id="search-results"><p>nothing yet</p></div>
</body></html>"#;

    /// `q=daca` finds two stories; any other query is a server error.
    struct SearchServer;

    #[async_trait::async_trait]
    impl Fetcher for SearchServer {
        async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
            if !url.ends_with("q=daca") {
                return Err(FetchError {
                    kind: FailureKind::HttpStatus(500),
                    message: format!("Cannot request {url}, got 500"),
                });
            }
            let body = "<ul><li>ruling upheld</li><li>renewals open</li></ul>";
            Ok(FetchOutput {
                bytes: body.as_bytes().to_vec(),
                metadata: FetchMetadata {
                    original_url: url.to_string(),
                    final_url: url.to_string(),
                    redirect_count: 0,
                    content_type: Some("text/html; charset=utf-8".into()),
                    byte_len: body.len() as u64,
                },
            })
        }
    }

    fn session() -> Session {
        dacanews_logging::initialize_for_tests();
        let document = PageDocument::parse(INDEX);
        let layout = document.layout().unwrap();
        let widget = SearchWidget::load(
            Origin::parse("http://dacanews.test").unwrap(),
            layout,
            "/",
        );
        let runner = EffectRunner::new(EngineHandle::with_fetcher(Arc::new(SearchServer)));
        Session::new(widget, document, runner, false)
    }

    /// Dispatches engine completions until no request is pending.
    fn settle(session: &mut Session) -> Vec<String> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut alerts = Vec::new();
        while session.widget.view().pending_request.is_some() {
            assert!(Instant::now() < deadline, "request never completed");
            match session.runner.poll() {
                Some(msg) => alerts.extend(session.dispatch(msg)),
                None => thread::sleep(POLL_INTERVAL),
            }
        }
        alerts
    }

    #[test]
    fn search_results_are_spliced_into_the_page() {
        let mut session = session();
        assert_eq!(session.handle_line("type daca"), Flow::Continue);
        session.handle_line("enter");
        assert!(settle(&mut session).is_empty());

        let html = session.document.html();
        assert!(html.contains(
            r#"<div id="search-results"><ul><li>ruling upheld</li><li>renewals open</li></ul></div>"#
        ));
        assert!(!html.contains("featured-articles"));
        assert!(!html.contains("recent-articles"));
        assert!(!html.contains("nothing yet"));

        // Later renders leave the splice alone.
        session.handle_line("menu");
        session.handle_line("menu");
        assert_eq!(session.document.html(), html);
    }

    #[test]
    fn failed_search_raises_an_alert_and_keeps_the_page() {
        let mut session = session();
        session.handle_line("type nothing");
        session.handle_line("search");
        let alerts = settle(&mut session);

        assert_eq!(
            alerts,
            vec!["Cannot request http://dacanews.test/search/?q=nothing, got 500".to_string()]
        );
        assert_eq!(session.widget.view().alert, alerts.first().cloned());
        let html = session.document.html();
        assert!(html.contains("nothing yet"));
        assert!(html.contains("featured-articles"));

        session.handle_line("dismiss");
        assert_eq!(session.widget.view().alert, None);
    }
}
