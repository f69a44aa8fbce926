use std::time::Duration;

use quick_xml::{events::Event, Reader};
use rss::{Channel, Item};
use tracing::{debug, info, instrument};
use url::Url;

use crate::{config::FEED_TIMEOUT, error::Result};

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Enclosure {
    pub url: String,
    pub mime_type: String,
}

/// A single item of a podcast feed, flattened to the fields the browser shows.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub title: String,
    pub description: String,
    pub pub_date: String,
    pub duration: String,
    pub enclosure: Enclosure,
}

impl From<&Item> for Episode {
    fn from(item: &Item) -> Self {
        Self {
            title: item.title().unwrap_or_default().to_string(),
            description: item.description().unwrap_or_default().to_string(),
            pub_date: item.pub_date().unwrap_or_default().to_string(),
            duration: item
                .itunes_ext()
                .and_then(|ext| ext.duration())
                .unwrap_or_default()
                .to_string(),
            enclosure: item
                .enclosure()
                .map(|e| Enclosure {
                    url: e.url().to_string(),
                    mime_type: e.mime_type().to_string(),
                })
                .unwrap_or_default(),
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    pub title: String,
    pub description: String,
    pub episodes: Vec<Episode>,
}

impl From<&Channel> for Feed {
    fn from(channel: &Channel) -> Self {
        Self {
            title: channel.title().to_string(),
            description: channel.description().to_string(),
            episodes: channel.items().iter().map(Episode::from).collect(),
        }
    }
}

/// Parses an RSS document, keeping items in document order.
pub fn parse_feed(content: &[u8]) -> Result<Feed> {
    let channel = Channel::read_from(content)?;
    let mut feed = Feed::from(&channel);
    if feed.episodes.iter().any(|e| e.duration.is_empty()) {
        // rss only knows the itunes namespace; pick up any other <duration> too
        let durations = scan_durations(content);
        for (episode, duration) in feed.episodes.iter_mut().zip(durations) {
            if episode.duration.is_empty() {
                episode.duration = duration;
            }
        }
    }
    Ok(feed)
}

// First `duration` element (any namespace) of every item, in document order.
// Items without one get an empty string.
fn scan_durations(content: &[u8]) -> Vec<String> {
    let mut reader = Reader::from_reader(content);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut durations = Vec::new();
    let mut in_item = false;
    let mut in_duration = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"item" => {
                    in_item = true;
                    durations.push(String::new());
                }
                b"duration" if in_item => in_duration = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"item" {
                    durations.push(String::new());
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"item" => in_item = false,
                b"duration" => in_duration = false,
                _ => {}
            },
            Ok(Event::Text(t)) if in_duration => {
                if let (Ok(text), Some(slot)) = (t.decode(), durations.last_mut()) {
                    if slot.is_empty() {
                        *slot = text.trim().to_string();
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                debug!("stopped scanning durations: {e}");
                break;
            }
            _ => {}
        }
        buf.clear();
    }
    durations
}

#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    timeout: Duration,
}

impl Default for FeedClient {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

impl FeedClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            timeout: FEED_TIMEOUT,
        }
    }

    #[instrument(skip(self))]
    pub async fn get_feed(&self, feed_url: &str) -> Result<Feed> {
        let u = Url::parse(feed_url)?;
        info!("fetching RSS feed from {u}");
        let content = self
            .http
            .get(u)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let feed = parse_feed(&content[..])?;
        debug!(title = feed.title, num_episodes = feed.episodes.len());
        Ok(feed)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;

    use super::{parse_feed, Enclosure, FeedClient};

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
  <channel>
    <title>Wine About It</title>
    <link>https://example.com</link>
    <description>A podcast about wine</description>
    <item>
      <title>Episode 2: Reds</title>
      <description><![CDATA[<p>All about <b>reds</b></p>]]></description>
      <pubDate>Tue, 02 May 2023 10:00:00 GMT</pubDate>
      <itunes:duration>00:42:10</itunes:duration>
      <enclosure url="https://cdn.example.com/ep2.mp3" length="123" type="audio/mpeg"/>
    </item>
    <item>
      <title>Episode 1: Whites</title>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_episodes_in_document_order() {
        let feed = parse_feed(FEED.as_bytes()).unwrap();
        assert_eq!(feed.title, "Wine About It");
        assert_eq!(feed.description, "A podcast about wine");
        assert_eq!(feed.episodes.len(), 2);

        let first = &feed.episodes[0];
        assert_eq!(first.title, "Episode 2: Reds");
        assert_eq!(first.description, "<p>All about <b>reds</b></p>");
        assert_eq!(first.pub_date, "Tue, 02 May 2023 10:00:00 GMT");
        assert_eq!(first.duration, "00:42:10");
        assert_eq!(
            first.enclosure,
            Enclosure {
                url: "https://cdn.example.com/ep2.mp3".to_string(),
                mime_type: "audio/mpeg".to_string(),
            }
        );

        let second = &feed.episodes[1];
        assert_eq!(second.title, "Episode 1: Whites");
        assert_eq!(second.duration, "");
        assert_eq!(second.enclosure, Enclosure::default());
    }

    #[test]
    fn plain_duration_elements_are_used() {
        let feed = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
  <channel>
    <title>Mixed</title>
    <link>https://example.com</link>
    <description>durations from different places</description>
    <item>
      <title>Tagged</title>
      <itunes:duration>12:00</itunes:duration>
    </item>
    <item>
      <title>Plain</title>
      <duration>1:02:03</duration>
    </item>
    <item>
      <title>None</title>
    </item>
  </channel>
</rss>"#;
        let feed = parse_feed(feed.as_bytes()).unwrap();
        let durations: Vec<&str> = feed.episodes.iter().map(|e| e.duration.as_str()).collect();
        assert_eq!(durations, vec!["12:00", "1:02:03", ""]);
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let res = parse_feed(b"<rss><channel><title>oops</channel>");
        assert!(matches!(res, Err(Error::Feed(_))));
    }

    #[test]
    fn non_rss_document_is_an_error() {
        let res = parse_feed(b"<html><body>not a feed</body></html>");
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn invalid_url_fails_before_fetching() {
        let client = FeedClient::default();
        let res = client.get_feed("feed.xml").await;
        assert!(matches!(res, Err(Error::InvalidUrl(_))));
    }
}
