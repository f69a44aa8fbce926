use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info, instrument, warn};

use crate::{
    config::SEARCH_LIMIT,
    directory::Podcast,
    feed::Episode,
    message::{Effect, Event, Outcome, Request, Response, Ticket, View},
    ui::input::TextInput,
};

// App holds the state of the application. It is owned by the UI loop and only
// changes through `update`.
#[derive(Default, Debug)]
pub struct App {
    pub view: View,
    // Current value of the search box
    pub input: TextInput,
    // Last submitted search term
    pub search_term: String,
    // Display name of the podcast whose episodes are shown
    pub podcast_name: String,
    pub podcasts: Vec<Podcast>,
    pub episodes: Vec<Episode>,
    pub selected: usize,
    pub loading: bool,
    pub error: Option<String>,
    pub width: u16,
    pub height: u16,
    // ticket of the most recently issued command
    ticket: Ticket,
}

impl App {
    /// Folds one event into the state and returns the follow-up, if any.
    #[instrument(skip(self), fields(view = ?self.view))]
    pub fn update(&mut self, event: Event) -> Option<Effect> {
        match event {
            Event::Resize(width, height) => {
                self.width = width;
                self.height = height;
                None
            }
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Key(_) => None,
            Event::Response(response) => {
                self.apply_response(response);
                None
            }
        }
    }

    /// Length of the list the current view navigates over.
    pub fn active_len(&self) -> usize {
        match self.view {
            View::Search => 0,
            View::PodcastList => self.podcasts.len(),
            View::EpisodeList => self.episodes.len(),
        }
    }

    pub fn selected_podcast(&self) -> Option<&Podcast> {
        self.podcasts.get(self.selected)
    }

    pub fn selected_episode(&self) -> Option<&Episode> {
        self.episodes.get(self.selected)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Effect> {
        let interrupt =
            key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        match self.view {
            View::Search => self.handle_search_key(key, interrupt),
            View::PodcastList | View::EpisodeList => {
                if interrupt {
                    self.back();
                    return None;
                }
                match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => self.back(),
                    KeyCode::Up | KeyCode::Char('k') => self.previous(),
                    KeyCode::Down | KeyCode::Char('j') => self.next(),
                    KeyCode::Enter if self.view == View::PodcastList => {
                        return self.open_selected_podcast();
                    }
                    _ => {}
                }
                None
            }
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, interrupt: bool) -> Option<Effect> {
        if interrupt || key.code == KeyCode::Char('q') {
            info!("Closing application");
            return Some(Effect::Quit);
        }
        match key.code {
            KeyCode::Enter => self.submit_search(),
            _ => {
                self.input.handle_key(key);
                None
            }
        }
    }

    fn submit_search(&mut self) -> Option<Effect> {
        let term = self.input.value();
        if term.trim().is_empty() {
            debug!("ignoring empty search");
            return None;
        }
        info!("submitting search for {term:?}");
        self.search_term = term.clone();
        self.loading = true;
        self.error = None;
        self.view = View::PodcastList;
        self.selected = 0;
        let ticket = self.issue_ticket();
        Some(Effect::Dispatch(Request::SearchPodcasts {
            ticket,
            term,
            limit: SEARCH_LIMIT,
        }))
    }

    fn open_selected_podcast(&mut self) -> Option<Effect> {
        let podcast = self.selected_podcast()?.clone();
        info!(
            "loading episodes of {name:?} from {url}",
            name = podcast.collection_name,
            url = podcast.feed_url
        );
        self.podcast_name = podcast.collection_name;
        self.loading = true;
        self.error = None;
        self.view = View::EpisodeList;
        self.selected = 0;
        let ticket = self.issue_ticket();
        Some(Effect::Dispatch(Request::FetchEpisodes {
            ticket,
            url: podcast.feed_url,
        }))
    }

    fn back(&mut self) {
        match self.view {
            View::EpisodeList => {
                self.episodes.clear();
                self.view = View::PodcastList;
            }
            View::PodcastList => {
                self.podcasts.clear();
                self.input.clear();
                self.view = View::Search;
            }
            View::Search => return,
        }
        self.selected = 0;
        self.error = None;
        debug!(view = ?self.view, "navigated back");
    }

    // Move the selection up, stopping at the first entry.
    fn previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
        debug!(idx = self.selected);
    }

    // Move the selection down, stopping at the last entry.
    fn next(&mut self) {
        if self.selected + 1 < self.active_len() {
            self.selected += 1;
        }
        debug!(idx = self.selected);
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.ticket += 1;
        self.ticket
    }

    fn apply_response(&mut self, response: Response) {
        if response.ticket != self.ticket {
            debug!(
                ticket = response.ticket,
                current = self.ticket,
                "dropping superseded response"
            );
            return;
        }
        self.loading = false;
        match response.outcome {
            Outcome::Podcasts(podcasts) => {
                debug!(count = podcasts.len(), "podcasts received");
                self.podcasts = podcasts;
                self.error = None;
                if self.view == View::PodcastList {
                    self.selected = 0;
                }
            }
            Outcome::Episodes(episodes) => {
                debug!(count = episodes.len(), "episodes received");
                self.episodes = episodes;
                self.error = None;
                if self.view == View::EpisodeList {
                    self.selected = 0;
                }
            }
            Outcome::Error(err) => {
                warn!("background request failed: {err}");
                self.error = Some(err);
            }
        }
    }
}
