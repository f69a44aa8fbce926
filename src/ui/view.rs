use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{app::App, message::View, ui::input::PLACEHOLDER};

pub const TITLE_WIDTH: usize = 70;
pub const ELLIPSIS: &str = "...";

/// What a screen shows, independent of how the terminal draws it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub title: String,
    pub subtitle: Option<String>,
    pub body: Body,
    /// (keys, action) pairs valid on this screen.
    pub footer: Vec<(&'static str, &'static str)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Prompt { value: String, placeholder: bool },
    Loading(String),
    Error(String),
    Empty(String),
    List {
        summary: String,
        rows: Vec<Row>,
        selected: usize,
        detail: Option<Detail>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based position in the list.
    pub ordinal: usize,
    pub title: String,
    pub meta: Option<String>,
}

/// Extra information about the highlighted episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub audio_url: String,
    pub mime_type: String,
    pub description: String,
}

pub fn render(app: &App) -> Screen {
    match app.view {
        View::Search => search_screen(app),
        View::PodcastList => podcast_screen(app),
        View::EpisodeList => episode_screen(app),
    }
}

fn search_screen(app: &App) -> Screen {
    let body = if app.input.is_empty() {
        Body::Prompt {
            value: PLACEHOLDER.to_string(),
            placeholder: true,
        }
    } else {
        Body::Prompt {
            value: app.input.value(),
            placeholder: false,
        }
    };
    Screen {
        title: "PODCAST BROWSER".to_string(),
        subtitle: Some("Discover and explore your favorite podcasts".to_string()),
        body,
        footer: vec![("enter", "search"), ("ctrl+c", "quit")],
    }
}

fn podcast_screen(app: &App) -> Screen {
    let body = status_body(
        app,
        "Loading podcasts...",
        "No podcasts found. Try a different search term.",
        app.podcasts.is_empty(),
    )
    .unwrap_or_else(|| Body::List {
        summary: format!("Found {} podcasts", app.podcasts.len()),
        rows: app
            .podcasts
            .iter()
            .enumerate()
            .map(|(idx, p)| Row {
                ordinal: idx + 1,
                title: p.collection_name.clone(),
                meta: Some(format!(
                    "by {} • {} episodes",
                    p.artist_name, p.track_count
                )),
            })
            .collect(),
        selected: app.selected,
        detail: None,
    });
    Screen {
        title: format!("Search Results: \"{}\"", app.search_term),
        subtitle: None,
        body,
        footer: vec![
            ("↑/↓ j/k", "navigate"),
            ("enter", "select"),
            ("esc/q", "back"),
            ("ctrl+c", "back"),
        ],
    }
}

fn episode_screen(app: &App) -> Screen {
    let body = status_body(
        app,
        "Loading episodes...",
        "No episodes found.",
        app.episodes.is_empty(),
    )
    .unwrap_or_else(|| Body::List {
        summary: format!("{} episodes available", app.episodes.len()),
        rows: app
            .episodes
            .iter()
            .enumerate()
            .map(|(idx, e)| Row {
                ordinal: idx + 1,
                title: truncate(&e.title, TITLE_WIDTH),
                meta: episode_meta(&e.pub_date, &e.duration),
            })
            .collect(),
        selected: app.selected,
        detail: app.selected_episode().map(|e| Detail {
            audio_url: e.enclosure.url.clone(),
            mime_type: e.enclosure.mime_type.clone(),
            description: e.description.clone(),
        }),
    });
    Screen {
        title: app.podcast_name.clone(),
        subtitle: None,
        body,
        footer: vec![
            ("↑/↓ j/k", "navigate"),
            ("esc/q", "back"),
            ("ctrl+c", "back"),
        ],
    }
}

// Picks loading > error > empty. None means the list should be shown.
fn status_body(app: &App, loading: &str, empty: &str, is_empty: bool) -> Option<Body> {
    if app.loading {
        Some(Body::Loading(loading.to_string()))
    } else if let Some(err) = &app.error {
        Some(Body::Error(format!("Error: {err}")))
    } else if is_empty {
        Some(Body::Empty(empty.to_string()))
    } else {
        None
    }
}

fn episode_meta(pub_date: &str, duration: &str) -> Option<String> {
    let parts: Vec<&str> = [pub_date, duration]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" • "))
    }
}

/// Shortens `s` to at most `max` display columns, ending in "..." when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let budget = max.saturating_sub(ELLIPSIS.len());
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use unicode_width::UnicodeWidthStr;

    use crate::{
        app::App,
        directory::Podcast,
        feed::{Enclosure, Episode},
        message::View,
    };

    use super::{render, truncate, Body, Detail, Row};

    fn podcast_app(n: usize) -> App {
        let mut app = App::default();
        app.view = View::PodcastList;
        app.search_term = "Radiolab".to_string();
        app.podcasts = (0..n)
            .map(|i| Podcast {
                artist_name: "WNYC".to_string(),
                collection_name: format!("Show {i}"),
                feed_url: String::new(),
                track_count: 10 + i as u32,
            })
            .collect();
        app
    }

    fn episode_app() -> App {
        let mut app = App::default();
        app.view = View::EpisodeList;
        app.podcast_name = "Radiolab".to_string();
        app
    }

    #[test]
    fn search_shows_placeholder_until_typing() {
        let mut app = App::default();
        let screen = render(&app);
        assert_eq!(screen.title, "PODCAST BROWSER");
        assert_eq!(
            screen.body,
            Body::Prompt {
                value: "Enter podcast name...".to_string(),
                placeholder: true
            }
        );
        assert_eq!(screen.footer, vec![("enter", "search"), ("ctrl+c", "quit")]);

        app.input.set_value("Radiolab");
        assert_eq!(
            render(&app).body,
            Body::Prompt {
                value: "Radiolab".to_string(),
                placeholder: false
            }
        );
    }

    #[test]
    fn loading_wins_over_everything() {
        let mut app = podcast_app(2);
        app.loading = true;
        app.error = Some("boom".to_string());
        let screen = render(&app);
        assert_eq!(screen.title, "Search Results: \"Radiolab\"");
        assert_eq!(screen.body, Body::Loading("Loading podcasts...".to_string()));
    }

    #[test]
    fn error_wins_over_list() {
        let mut app = podcast_app(2);
        app.error = Some("connection refused".to_string());
        assert_eq!(
            render(&app).body,
            Body::Error("Error: connection refused".to_string())
        );
    }

    #[test]
    fn empty_lists_have_their_own_message() {
        let app = podcast_app(0);
        assert_eq!(
            render(&app).body,
            Body::Empty("No podcasts found. Try a different search term.".to_string())
        );

        let app = episode_app();
        let screen = render(&app);
        assert_eq!(screen.title, "Radiolab");
        assert_eq!(screen.body, Body::Empty("No episodes found.".to_string()));
    }

    #[test]
    fn podcast_rows_are_numbered_from_one() {
        let mut app = podcast_app(3);
        app.selected = 2;
        match render(&app).body {
            Body::List {
                summary,
                rows,
                selected,
                detail,
            } => {
                assert_eq!(summary, "Found 3 podcasts");
                assert_eq!(selected, 2);
                assert_eq!(detail, None);
                assert_eq!(
                    rows[0],
                    Row {
                        ordinal: 1,
                        title: "Show 0".to_string(),
                        meta: Some("by WNYC • 10 episodes".to_string()),
                    }
                );
                assert_eq!(rows[2].ordinal, 3);
            }
            other => panic!("expected a list, got {other:?}"),
        }
    }

    #[test]
    fn episode_rows_truncate_and_show_details() {
        let mut app = episode_app();
        app.episodes = vec![
            Episode {
                title: "a".repeat(80),
                pub_date: "Mon, 01 May 2023".to_string(),
                ..Episode::default()
            },
            Episode {
                title: "Short".to_string(),
                description: "<p>hello</p>".to_string(),
                duration: "42:00".to_string(),
                pub_date: "Tue, 02 May 2023".to_string(),
                enclosure: Enclosure {
                    url: "https://cdn/ep.mp3".to_string(),
                    mime_type: "audio/mpeg".to_string(),
                },
            },
        ];
        app.selected = 1;

        match render(&app).body {
            Body::List {
                summary,
                rows,
                selected,
                detail,
            } => {
                assert_eq!(summary, "2 episodes available");
                assert_eq!(selected, 1);
                assert_eq!(rows[0].title, format!("{}...", "a".repeat(67)));
                assert_eq!(rows[0].meta.as_deref(), Some("Mon, 01 May 2023"));
                assert_eq!(rows[1].title, "Short");
                assert_eq!(rows[1].meta.as_deref(), Some("Tue, 02 May 2023 • 42:00"));
                assert_eq!(
                    detail,
                    Some(Detail {
                        audio_url: "https://cdn/ep.mp3".to_string(),
                        mime_type: "audio/mpeg".to_string(),
                        description: "<p>hello</p>".to_string(),
                    })
                );
            }
            other => panic!("expected a list, got {other:?}"),
        }
    }

    #[test]
    fn stale_error_does_not_reappear() {
        let mut app = podcast_app(0);
        app.error = Some("boom".to_string());
        assert!(matches!(render(&app).body, Body::Error(_)));

        app.error = None;
        app.podcasts = podcast_app(1).podcasts;
        assert!(matches!(render(&app).body, Body::List { .. }));
    }

    #[test]
    fn truncate_respects_display_width() {
        assert_eq!(truncate("short", 70), "short");
        assert_eq!(truncate(&"x".repeat(70), 70), "x".repeat(70));

        let wide = "日".repeat(40);
        let cut = truncate(&wide, 70);
        assert!(cut.ends_with("..."));
        assert!(cut.width() <= 70);
    }
}
