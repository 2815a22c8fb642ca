use simple_logger::SimpleLogger;
use snoo::{Client, Config, Node, Thing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // setting up logging.
    SimpleLogger::new().init()?;

    // A respectful client needs a user agent.
    let client = Client::new(Config::new("snoo-front-page-demo/0.1"))?;

    // Five hot links from /r/rust.
    let page = client.hot(Some("rust"), Some(5)).await?;
    for link in page.iter().filter_map(Node::as_thing).filter_map(Thing::as_link) {
        println!(
            "({}) {}",
            link.score().unwrap_or_default(),
            link.title().unwrap_or_default()
        );
    }

    // The listing remembers where it came from, so the next page is one call away.
    if page.has_more() {
        let next = page.next_listing(None).await?;
        println!("next page has {} links", next.len());
    }

    Ok(())
}
